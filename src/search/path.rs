use serde_derive::{Deserialize, Serialize};

use crate::graphs::{Direction, Mode, Vertex, Weight};

/// Parameters of a single routing query.
///
/// `arrive_by` searches run backwards in time from the arrival vertex, so
/// the outer search walks incoming edges instead of outgoing ones.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingRequest {
    pub arrive_by: bool,
    /// Path weight beyond which the outer search gives up.
    pub max_weight: Weight,
    pub walk_reluctance: f64,
    pub bicycle_reluctance: f64,
    /// Vertex the outer search starts from, if known.
    pub origin: Option<Vertex>,
}

impl Default for RoutingRequest {
    fn default() -> Self {
        RoutingRequest {
            arrive_by: false,
            max_weight: Weight::INFINITY,
            walk_reluctance: 2.0,
            bicycle_reluctance: 1.0,
            origin: None,
        }
    }
}

impl RoutingRequest {
    pub fn depart_at(max_weight: Weight) -> RoutingRequest {
        RoutingRequest {
            max_weight,
            ..Default::default()
        }
    }

    pub fn arrive_by(max_weight: Weight) -> RoutingRequest {
        RoutingRequest {
            arrive_by: true,
            max_weight,
            ..Default::default()
        }
    }

    pub fn with_origin(mut self, origin: Vertex) -> RoutingRequest {
        self.origin = Some(origin);
        self
    }

    /// Adjacency the outer search expands.
    pub fn search_direction(&self) -> Direction {
        if self.arrive_by {
            Direction::Incoming
        } else {
            Direction::Outgoing
        }
    }

    pub fn reluctance(&self, mode: Mode) -> f64 {
        match mode {
            Mode::Walk => self.walk_reluctance,
            Mode::Bicycle => self.bicycle_reluctance,
            Mode::Car | Mode::Transit | Mode::Link => 1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub vertices: Vec<Vertex>,
    pub weight: Weight,
}
