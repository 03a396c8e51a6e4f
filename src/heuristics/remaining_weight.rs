use std::sync::Arc;

use log::debug;
use parking_lot::RwLock;

use super::{
    config::HeuristicConfig,
    distance_table::DistanceTable,
    reverse_search::ReverseSearch,
    spawner::{ThreadSpawner, WorkerSpawner},
    RemainingTimeHeuristic, RemainingWeightHeuristic,
};
use crate::{
    error::{HeuristicError, Result},
    graphs::{edge_weight::EdgeWeight, Graph, Vertex, Weight},
    search::path::RoutingRequest,
};

/// Remaining weight heuristic backed by a reverse search from the target
/// that runs next to the outer search.
///
/// `prepare` installs a new [`DistanceTable`] and hands its search to the
/// spawner unless the current table already covers the query. Estimates
/// read whatever the search has published so far and never wait for it.
/// The table survives `reset`, so repeated queries to the same target
/// reuse it.
pub struct ReverseSearchHeuristic<G, W> {
    graph: Arc<G>,
    edge_weight: Arc<W>,
    spawner: Arc<dyn WorkerSpawner>,
    config: HeuristicConfig,
    table: RwLock<Option<Arc<DistanceTable>>>,
}

impl<G, W> ReverseSearchHeuristic<G, W>
where
    G: Graph + 'static,
    W: EdgeWeight + 'static,
{
    pub fn new(graph: Arc<G>, edge_weight: Arc<W>) -> Self {
        ReverseSearchHeuristic {
            graph,
            edge_weight,
            spawner: Arc::new(ThreadSpawner),
            config: HeuristicConfig::default(),
            table: RwLock::new(None),
        }
    }

    pub fn with_spawner(mut self, spawner: Arc<dyn WorkerSpawner>) -> Self {
        self.spawner = spawner;
        self
    }

    pub fn with_config(mut self, config: HeuristicConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// The table estimates are currently read from.
    pub fn table(&self) -> Option<Arc<DistanceTable>> {
        self.table.read().clone()
    }

    /// Makes sure a table for `target` that answers `request` is current,
    /// starting a reverse search if it is not. Never waits for the search
    /// and always returns 0.
    pub fn prepare(&self, target: Vertex, request: &RoutingRequest) -> Weight {
        if self.is_reusable(&self.table.read(), target, request) {
            debug!("reusing existing heuristic for {}", target);
            return 0.0;
        }

        // Allocated outside the lock so readers are only blocked by the swap.
        let table = Arc::new(DistanceTable::new(
            target,
            request,
            self.graph.number_of_vertices(),
        ));

        let mut current = self.table.write();
        if self.is_reusable(&current, target, request) {
            debug!("reusing heuristic installed concurrently for {}", target);
            return 0.0;
        }
        let superseded = current.replace(table.clone());
        drop(current);

        if let Some(superseded) = superseded {
            if self.config.cancel_superseded {
                superseded.retire();
            }
        }

        debug!("spawning heuristic computation for {}", target);
        let search = ReverseSearch::new(
            self.graph.clone(),
            self.edge_weight.clone(),
            request.clone(),
            table,
            self.config.cancel_superseded,
        );
        self.spawner.spawn(Box::new(move || {
            search.run();
        }));

        0.0
    }

    fn is_reusable(
        &self,
        current: &Option<Arc<DistanceTable>>,
        target: Vertex,
        request: &RoutingRequest,
    ) -> bool {
        self.config.reuse_tables
            && current
                .as_ref()
                .is_some_and(|table| table.covers(target, request))
    }

    /// Lower bound on the weight between `vertex` and the current target.
    ///
    /// Off-network vertices, vertices the table has no cell for and paths
    /// lighter than `disable_below` get 0. Vertices the search has not
    /// settled yet get the largest weight it has extracted so far.
    pub fn estimate(&self, vertex: Vertex, accumulated: Weight) -> Weight {
        if self.graph.is_off_network(vertex) {
            return 0.0;
        }
        if accumulated < self.config.disable_below {
            return 0.0;
        }

        self.table
            .read()
            .as_ref()
            .map_or(0.0, |table| table.lower_bound(vertex))
    }
}

impl<G, W> RemainingWeightHeuristic for ReverseSearchHeuristic<G, W>
where
    G: Graph + 'static,
    W: EdgeWeight + 'static,
{
    fn initial_weight(&self, origin: Vertex, target: Vertex, request: &RoutingRequest) -> Weight {
        if request.origin.is_some() {
            return self.prepare(target, request);
        }
        self.prepare(target, &request.clone().with_origin(origin))
    }

    // The table is rooted at the target of the outer search whatever its
    // direction, so both directions read it the same way.
    fn forward_weight(&self, vertex: Vertex, accumulated: Weight) -> Weight {
        self.estimate(vertex, accumulated)
    }

    fn reverse_weight(&self, vertex: Vertex, accumulated: Weight) -> Weight {
        self.estimate(vertex, accumulated)
    }

    fn reset(&self) {}
}

impl<G, W> RemainingTimeHeuristic for ReverseSearchHeuristic<G, W>
where
    G: Graph + 'static,
    W: EdgeWeight + 'static,
{
    fn time_initialize(
        &self,
        _origin: Vertex,
        _target: Vertex,
        _request: &RoutingRequest,
    ) -> Result<()> {
        Err(HeuristicError::Unsupported("time heuristic initialization"))
    }

    fn time_lower_bound(&self, vertex: Vertex, accumulated: Weight) -> Weight {
        self.estimate(vertex, accumulated)
    }
}
