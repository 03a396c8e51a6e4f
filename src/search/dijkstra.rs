use super::{
    path::RoutingRequest,
    queue::{BinaryHeapQueue, VertexWeightQueue},
};
use crate::graphs::{edge_weight::EdgeWeight, Direction, Graph, Vertex, Weight};

/// Weights of shortest paths from `source` to every vertex, following the
/// `direction` adjacency. Unreachable vertices get `Weight::INFINITY`.
///
/// With `Direction::Incoming` the result holds the weights of paths from
/// every vertex to `source`.
pub fn one_to_all(
    graph: &dyn Graph,
    edge_weight: &dyn EdgeWeight,
    request: &RoutingRequest,
    source: Vertex,
    direction: Direction,
) -> Vec<Weight> {
    let mut weights = vec![Weight::INFINITY; graph.number_of_vertices() as usize];
    let mut expanded = vec![false; graph.number_of_vertices() as usize];
    let mut queue = BinaryHeapQueue::new();

    weights[source as usize] = 0.0;
    queue.insert(source, 0.0);

    while let Some(tail) = queue.pop() {
        if std::mem::replace(&mut expanded[tail.vertex as usize], true) {
            continue;
        }

        for edge in graph.edges(tail.vertex, direction) {
            let edge_weight = edge_weight.weight_lower_bound(edge, request);
            if edge_weight < 0.0 {
                continue;
            }
            let head = edge.far_end(direction);
            let alternative_weight = tail.weight + edge_weight;
            if alternative_weight < weights[head as usize] {
                weights[head as usize] = alternative_weight;
                queue.insert(head, alternative_weight);
            }
        }
    }

    weights
}
