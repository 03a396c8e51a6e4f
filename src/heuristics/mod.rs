use crate::{
    error::Result,
    graphs::{Vertex, Weight},
    search::path::RoutingRequest,
};

pub mod config;
pub mod distance_table;
pub mod remaining_weight;
pub mod reverse_search;
pub mod spawner;

/// Lower bound on the weight still needed to reach the target, consumed
/// by a best-first search.
pub trait RemainingWeightHeuristic: Send + Sync {
    /// Called once when a search from `origin` to `target` starts. Returns
    /// the estimate for `origin`.
    fn initial_weight(&self, origin: Vertex, target: Vertex, request: &RoutingRequest) -> Weight;

    /// Estimate for `vertex` in a search that walks outgoing edges, given
    /// the weight accumulated on the way to it.
    fn forward_weight(&self, vertex: Vertex, accumulated: Weight) -> Weight;

    /// Estimate for `vertex` in a search that walks incoming edges.
    fn reverse_weight(&self, vertex: Vertex, accumulated: Weight) -> Weight;

    /// Called between unrelated searches.
    fn reset(&self) {}
}

/// Lower bound on the time still needed to reach the target.
pub trait RemainingTimeHeuristic: Send + Sync {
    fn time_initialize(&self, origin: Vertex, target: Vertex, request: &RoutingRequest)
        -> Result<()>;

    fn time_lower_bound(&self, vertex: Vertex, accumulated: Weight) -> Weight;
}

/// Estimates 0 everywhere, which turns A* into Dijkstra.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrivialHeuristic;

impl RemainingWeightHeuristic for TrivialHeuristic {
    fn initial_weight(
        &self,
        _origin: Vertex,
        _target: Vertex,
        _request: &RoutingRequest,
    ) -> Weight {
        0.0
    }

    fn forward_weight(&self, _vertex: Vertex, _accumulated: Weight) -> Weight {
        0.0
    }

    fn reverse_weight(&self, _vertex: Vertex, _accumulated: Weight) -> Weight {
        0.0
    }
}
