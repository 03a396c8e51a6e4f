use ahash::{HashMap, HashMapExt};
use serde_derive::{Deserialize, Serialize};

use super::{Edge, Graph, Mode, Vertex, Weight};
use crate::error::{HeuristicError, Result};

/// Street and transit network stored as outgoing and incoming adjacency
/// lists, plus off-network locations that reach the network through
/// connector edges.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MultimodalGraph {
    out_edges: Vec<Vec<Edge>>,
    in_edges: Vec<Vec<Edge>>,
    off_network: HashMap<Vertex, Vec<Edge>>,
}

impl MultimodalGraph {
    pub fn new() -> MultimodalGraph {
        MultimodalGraph {
            out_edges: Vec::new(),
            in_edges: Vec::new(),
            off_network: HashMap::new(),
        }
    }

    pub fn with_vertices(number_of_vertices: u32) -> MultimodalGraph {
        let mut graph = MultimodalGraph::new();
        graph.ensure_vertex(number_of_vertices.saturating_sub(1));
        graph
    }

    pub fn from_edges(edges: &[Edge]) -> MultimodalGraph {
        let mut graph = MultimodalGraph::new();
        edges.iter().for_each(|edge| graph.add_edge(edge.clone()));
        graph
    }

    pub fn add_vertex(&mut self) -> Vertex {
        let vertex = self.out_edges.len() as Vertex;
        self.ensure_vertex(vertex);
        vertex
    }

    /// Inserts `edge` into the adjacency lists of both endpoints, growing
    /// the graph if an endpoint does not exist yet.
    pub fn add_edge(&mut self, edge: Edge) {
        self.ensure_vertex(std::cmp::max(edge.tail(), edge.head()));
        self.in_edges[edge.head() as usize].push(edge.clone());
        self.out_edges[edge.tail() as usize].push(edge);
    }

    /// Adds a location that is not part of the network. Every `(vertex,
    /// weight)` link becomes a pair of connector edges, one in each
    /// direction.
    pub fn add_off_network_location(&mut self, links: &[(Vertex, Weight)]) -> Result<Vertex> {
        let number_of_vertices = self.number_of_vertices();
        for &(vertex, _) in links {
            if vertex >= number_of_vertices || self.off_network.contains_key(&vertex) {
                return Err(HeuristicError::VertexOutOfRange {
                    vertex,
                    number_of_vertices,
                });
            }
        }

        let location = self.add_vertex();
        let mut connectors = Vec::with_capacity(links.len() * 2);
        for &(vertex, weight) in links {
            // `location` is fresh, so neither edge can be a loop.
            if let Some(edge) = Edge::new(vertex, location, weight, Mode::Link) {
                connectors.push(edge);
            }
            if let Some(edge) = Edge::new(location, vertex, weight, Mode::Link) {
                connectors.push(edge);
            }
        }

        connectors
            .iter()
            .for_each(|connector| self.add_edge(connector.clone()));
        self.off_network.insert(location, connectors);

        Ok(location)
    }

    pub fn number_of_edges(&self) -> usize {
        self.out_edges.iter().map(Vec::len).sum()
    }

    fn ensure_vertex(&mut self, vertex: Vertex) {
        let len = vertex as usize + 1;
        if len > self.out_edges.len() {
            self.out_edges.resize(len, Vec::new());
            self.in_edges.resize(len, Vec::new());
        }
    }
}

impl Graph for MultimodalGraph {
    fn number_of_vertices(&self) -> u32 {
        self.out_edges.len() as u32
    }

    fn out_edges(&self, vertex: Vertex) -> &[Edge] {
        self.out_edges
            .get(vertex as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn in_edges(&self, vertex: Vertex) -> &[Edge] {
        self.in_edges
            .get(vertex as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn connectors(&self, vertex: Vertex) -> Option<&[Edge]> {
        self.off_network.get(&vertex).map(Vec::as_slice)
    }
}
