use serde_derive::{Deserialize, Serialize};

pub mod edge_weight;
pub mod multimodal_graph;

pub type Vertex = u32;
pub type Weight = f64;

/// Means of travel an edge stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    Walk,
    Bicycle,
    Car,
    Transit,
    /// Synthetic edge between an off-network location and the network.
    Link,
}

/// Which adjacency list of a vertex is walked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Outgoing,
    Incoming,
}

impl Direction {
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Outgoing => Direction::Incoming,
            Direction::Incoming => Direction::Outgoing,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    tail: Vertex,
    head: Vertex,
    weight: Weight,
    mode: Mode,
}

impl Edge {
    pub fn new(tail: Vertex, head: Vertex, weight: Weight, mode: Mode) -> Option<Edge> {
        if tail == head {
            return None;
        }

        Some(Edge {
            tail,
            head,
            weight,
            mode,
        })
    }

    pub fn tail(&self) -> Vertex {
        self.tail
    }

    pub fn head(&self) -> Vertex {
        self.head
    }

    /// Base cost of the edge before any request specific scaling.
    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The endpoint reached when the edge is found in the `direction`
    /// adjacency list of its other endpoint.
    pub fn far_end(&self, direction: Direction) -> Vertex {
        match direction {
            Direction::Outgoing => self.head,
            Direction::Incoming => self.tail,
        }
    }
}

/// Read-only view of a graph as needed by the searches in this crate.
///
/// Vertex indices are dense and smaller than `number_of_vertices`.
pub trait Graph: Send + Sync {
    fn number_of_vertices(&self) -> u32;

    fn out_edges(&self, vertex: Vertex) -> &[Edge];

    fn in_edges(&self, vertex: Vertex) -> &[Edge];

    /// Connector edges of an off-network location, `None` for vertices
    /// that are part of the network.
    fn connectors(&self, vertex: Vertex) -> Option<&[Edge]>;

    fn is_off_network(&self, vertex: Vertex) -> bool {
        self.connectors(vertex).is_some()
    }

    fn edges(&self, vertex: Vertex, direction: Direction) -> &[Edge] {
        match direction {
            Direction::Outgoing => self.out_edges(vertex),
            Direction::Incoming => self.in_edges(vertex),
        }
    }

    fn vertices(&self) -> std::ops::Range<Vertex> {
        0..self.number_of_vertices()
    }
}
