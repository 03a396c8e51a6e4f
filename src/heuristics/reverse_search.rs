use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use log::{debug, error, info, warn};

use super::distance_table::{DistanceTable, SearchState};
use crate::{
    graphs::{edge_weight::EdgeWeight, Direction, Graph, Weight},
    search::{
        path::RoutingRequest,
        queue::{BinaryHeapQueue, QueueElement, VertexWeightQueue},
    },
};

#[derive(Clone, Debug)]
pub struct SearchStats {
    pub settled: u32,
    /// Queue entries dropped because a better weight was found after they
    /// were inserted.
    pub stale: u32,
    pub relaxed: u32,
    pub negative_edges: u32,
    pub duration: Duration,
    pub outcome: SearchState,
}

impl Default for SearchStats {
    fn default() -> Self {
        SearchStats {
            settled: 0,
            stale: 0,
            relaxed: 0,
            negative_edges: 0,
            duration: Duration::ZERO,
            outcome: SearchState::Running,
        }
    }
}

/// Adjacency the reverse search walks for `request`: the opposite of the
/// one the outer search expands.
pub fn reverse_direction(request: &RoutingRequest) -> Direction {
    request.search_direction().reversed()
}

/// Label setting search rooted at the table's target that fills `table`
/// with the weights of paths between every vertex and the target, up to
/// the table's cutoff.
///
/// Off-network targets have no adjacency of their own. Their connector
/// edges seed the search with the network vertices on the far side at
/// weight zero.
///
/// Tentative weights stay private. A table cell is written once, when its
/// vertex is settled, and `max_found` is raised to every extracted key.
/// With `cancellable` set the search stops as soon as the table is retired.
pub fn reverse_search(
    graph: &dyn Graph,
    edge_weight: &dyn EdgeWeight,
    request: &RoutingRequest,
    table: &DistanceTable,
    cancellable: bool,
) -> SearchStats {
    let start = Instant::now();
    let mut stats = SearchStats::default();

    let target = table.target();
    let cutoff = table.cutoff();
    let direction = reverse_direction(request);

    let mut tentative = vec![Weight::INFINITY; table.len()];
    let mut queue = BinaryHeapQueue::new();

    match graph.connectors(target) {
        Some(connectors) => {
            for connector in connectors {
                let vertex = connector.far_end(direction);
                if vertex == target {
                    continue;
                }
                if let Some(weight) = tentative.get_mut(vertex as usize) {
                    if *weight > 0.0 {
                        *weight = 0.0;
                        queue.insert(vertex, 0.0);
                    }
                }
            }
        }
        None => match tentative.get_mut(target as usize) {
            Some(weight) => {
                *weight = 0.0;
                queue.insert(target, 0.0);
            }
            None => {
                warn!(
                    "target {} lies outside a table of {} vertices",
                    target,
                    table.len()
                );
                stats.outcome = SearchState::Aborted;
                stats.duration = start.elapsed();
                table.finish(stats.outcome);
                return stats;
            }
        },
    }

    stats.outcome = loop {
        if cancellable && table.is_retired() {
            debug!("reverse search for {} cancelled", target);
            break SearchState::Cancelled;
        }

        let Some(QueueElement {
            vertex: tail,
            weight: tail_weight,
        }) = queue.pop()
        else {
            break SearchState::Exhausted;
        };

        table.raise_max_found(tail_weight);
        if tail_weight > cutoff {
            break SearchState::CutoffReached;
        }
        if tail_weight > tentative[tail as usize] {
            stats.stale += 1;
            continue;
        }

        table.settle(tail, tail_weight);
        stats.settled += 1;
        if request.origin == Some(tail) {
            debug!("reverse search reached origin {}", tail);
        }

        for edge in graph.edges(tail, direction) {
            let weight = edge_weight.weight_lower_bound(edge, request);
            if weight < 0.0 {
                error!("negative edge weight {} on {:?}", weight, edge);
                stats.negative_edges += 1;
                continue;
            }

            let head = edge.far_end(direction);
            let alternative_weight = tail_weight + weight;
            if let Some(current_weight) = tentative.get_mut(head as usize) {
                if alternative_weight < *current_weight {
                    *current_weight = alternative_weight;
                    queue.insert(head, alternative_weight);
                    stats.relaxed += 1;
                }
            }
        }
    };

    stats.duration = start.elapsed();
    table.finish(stats.outcome);
    info!(
        "End SSSP for {} ({:?}, {} settled, {:?})",
        target, stats.duration, stats.settled, stats.outcome
    );

    stats
}

/// A reverse search that owns everything it touches, so it can run on
/// another thread.
pub struct ReverseSearch<G, W> {
    graph: Arc<G>,
    edge_weight: Arc<W>,
    request: RoutingRequest,
    table: Arc<DistanceTable>,
    cancellable: bool,
}

impl<G: Graph, W: EdgeWeight> ReverseSearch<G, W> {
    pub fn new(
        graph: Arc<G>,
        edge_weight: Arc<W>,
        request: RoutingRequest,
        table: Arc<DistanceTable>,
        cancellable: bool,
    ) -> Self {
        ReverseSearch {
            graph,
            edge_weight,
            request,
            table,
            cancellable,
        }
    }

    pub fn run(self) -> SearchStats {
        reverse_search(
            self.graph.as_ref(),
            self.edge_weight.as_ref(),
            &self.request,
            &self.table,
            self.cancellable,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::{
        edge_weight::GeneralizedCost, multimodal_graph::MultimodalGraph, Edge, Mode, Vertex,
    };

    const A: Vertex = 0;
    const B: Vertex = 1;
    const C: Vertex = 2;
    const D: Vertex = 3;

    fn chain() -> MultimodalGraph {
        MultimodalGraph::from_edges(&[
            Edge::new(A, B, 1.0, Mode::Car).unwrap(),
            Edge::new(B, C, 2.0, Mode::Car).unwrap(),
            Edge::new(C, D, 3.0, Mode::Car).unwrap(),
        ])
    }

    fn run(
        graph: &MultimodalGraph,
        target: Vertex,
        request: &RoutingRequest,
    ) -> (DistanceTable, SearchStats) {
        let table = DistanceTable::new(target, request, graph.number_of_vertices());
        let stats = reverse_search(graph, &GeneralizedCost, request, &table, true);
        (table, stats)
    }

    #[test]
    fn depart_at_walks_incoming_edges() {
        let (table, stats) = run(&chain(), D, &RoutingRequest::depart_at(100.0));

        assert_eq!(stats.outcome, SearchState::Exhausted);
        assert_eq!(stats.settled, 4);
        assert_eq!(table.weight(D), Some(0.0));
        assert_eq!(table.weight(C), Some(3.0));
        assert_eq!(table.weight(B), Some(5.0));
        assert_eq!(table.weight(A), Some(6.0));
        assert_eq!(table.max_found(), 6.0);
        assert_eq!(table.state(), SearchState::Exhausted);
    }

    #[test]
    fn arrive_by_walks_outgoing_edges() {
        let (table, _) = run(&chain(), A, &RoutingRequest::arrive_by(100.0));

        assert_eq!(table.weight(A), Some(0.0));
        assert_eq!(table.weight(B), Some(1.0));
        assert_eq!(table.weight(C), Some(3.0));
        assert_eq!(table.weight(D), Some(6.0));

        // Nothing leads into A, so a depart-at search from A settles only A.
        let (table, _) = run(&chain(), A, &RoutingRequest::depart_at(100.0));
        assert!(!table.is_settled(B));
    }

    #[test]
    fn stops_at_first_key_past_cutoff() {
        let (table, stats) = run(&chain(), D, &RoutingRequest::depart_at(4.0));

        assert_eq!(stats.outcome, SearchState::CutoffReached);
        assert_eq!(table.weight(D), Some(0.0));
        assert_eq!(table.weight(C), Some(3.0));
        assert!(!table.is_settled(B));
        assert!(!table.is_settled(A));
        // B was extracted at 5 and ended the search.
        assert_eq!(table.max_found(), 5.0);
        assert_eq!(table.lower_bound(B), 5.0);
        assert_eq!(table.lower_bound(A), 5.0);
    }

    #[test]
    fn stale_entries_are_skipped() {
        let graph = MultimodalGraph::from_edges(&[
            Edge::new(0, 2, 10.0, Mode::Car).unwrap(),
            Edge::new(1, 2, 1.0, Mode::Car).unwrap(),
            Edge::new(0, 1, 1.0, Mode::Car).unwrap(),
        ]);
        let (table, stats) = run(&graph, 2, &RoutingRequest::depart_at(100.0));

        assert_eq!(table.weight(0), Some(2.0));
        assert_eq!(stats.stale, 1);
        assert_eq!(stats.settled, 3);
    }

    #[test]
    fn negative_edges_are_skipped() {
        let graph = MultimodalGraph::from_edges(&[
            Edge::new(0, 2, -1.0, Mode::Car).unwrap(),
            Edge::new(1, 2, 1.0, Mode::Car).unwrap(),
        ]);
        let (table, stats) = run(&graph, 2, &RoutingRequest::depart_at(100.0));

        assert_eq!(stats.negative_edges, 1);
        assert!(!table.is_settled(0));
        assert_eq!(table.weight(1), Some(1.0));
    }

    #[test]
    fn off_network_target_seeds_connected_vertices() {
        let mut graph = MultimodalGraph::from_edges(&[
            Edge::new(0, 1, 4.0, Mode::Walk).unwrap(),
            Edge::new(0, 2, 9.0, Mode::Walk).unwrap(),
        ]);
        let location = graph.add_off_network_location(&[(1, 0.0), (2, 0.0)]).unwrap();

        let (table, stats) = run(&graph, location, &RoutingRequest::depart_at(100.0));

        assert_eq!(table.weight(1), Some(0.0));
        assert_eq!(table.weight(2), Some(0.0));
        // Walk reluctance of the default request is 2.
        assert_eq!(table.weight(0), Some(8.0));
        // The location itself is only reached through its connectors.
        assert_eq!(stats.settled, 4);
    }

    #[test]
    fn target_outside_table_aborts() {
        let graph = chain();
        let request = RoutingRequest::depart_at(100.0);
        let table = DistanceTable::new(9, &request, graph.number_of_vertices());
        let stats = reverse_search(&graph, &GeneralizedCost, &request, &table, true);

        assert_eq!(stats.outcome, SearchState::Aborted);
        assert_eq!(table.state(), SearchState::Aborted);
    }

    #[test]
    fn retired_table_cancels_search() {
        let graph = chain();
        let request = RoutingRequest::depart_at(100.0);
        let table = DistanceTable::new(D, &request, graph.number_of_vertices());
        table.retire();

        let stats = reverse_search(&graph, &GeneralizedCost, &request, &table, true);
        assert_eq!(stats.outcome, SearchState::Cancelled);
        assert_eq!(stats.settled, 0);

        let table = DistanceTable::new(D, &request, graph.number_of_vertices());
        table.retire();
        let stats = reverse_search(&graph, &GeneralizedCost, &request, &table, false);
        assert_eq!(stats.outcome, SearchState::Exhausted);
    }
}
