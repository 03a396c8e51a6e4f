use super::{
    path::{Path, RoutingRequest},
    queue::{BinaryHeapQueue, VertexWeightQueue},
};
use crate::{
    graphs::{edge_weight::EdgeWeight, Direction, Graph, Vertex, Weight},
    heuristics::RemainingWeightHeuristic,
};

/// Best-first search between `origin` and `target` guided by `heuristic`.
///
/// Depart-at requests search from `origin` along outgoing edges, arrive-by
/// requests from `target` along incoming edges. Either way the heuristic is
/// prepared for the vertex the search is heading to. Estimates may change
/// while the search runs, so a vertex is expanded again whenever its weight
/// improves after an earlier expansion. Paths heavier than
/// `request.max_weight` are not explored.
pub fn astar(
    graph: &dyn Graph,
    edge_weight: &dyn EdgeWeight,
    heuristic: &dyn RemainingWeightHeuristic,
    request: &RoutingRequest,
    origin: Vertex,
    target: Vertex,
) -> Option<Path> {
    let direction = request.search_direction();
    let (start, goal) = match direction {
        Direction::Outgoing => (origin, target),
        Direction::Incoming => (target, origin),
    };
    let estimate = |vertex: Vertex, accumulated: Weight| match direction {
        Direction::Outgoing => heuristic.forward_weight(vertex, accumulated),
        Direction::Incoming => heuristic.reverse_weight(vertex, accumulated),
    };

    let number_of_vertices = graph.number_of_vertices() as usize;
    if start as usize >= number_of_vertices || goal as usize >= number_of_vertices {
        return None;
    }

    let mut weights = vec![Weight::INFINITY; number_of_vertices];
    let mut expanded_at = vec![Weight::INFINITY; number_of_vertices];
    let mut predecessors: Vec<Option<Vertex>> = vec![None; number_of_vertices];
    let mut queue = BinaryHeapQueue::new();

    let initial_estimate = heuristic.initial_weight(start, goal, request);
    weights[start as usize] = 0.0;
    queue.insert(start, initial_estimate);

    while let Some(element) = queue.pop() {
        let tail = element.vertex;
        let tail_weight = weights[tail as usize];
        if tail_weight >= expanded_at[tail as usize] {
            continue;
        }
        expanded_at[tail as usize] = tail_weight;

        if tail == goal {
            break;
        }

        for edge in graph.edges(tail, direction) {
            let weight = edge_weight.weight_lower_bound(edge, request);
            if weight < 0.0 {
                continue;
            }
            let head = edge.far_end(direction);
            let alternative_weight = tail_weight + weight;
            if alternative_weight > request.max_weight {
                continue;
            }
            if alternative_weight < weights[head as usize] {
                weights[head as usize] = alternative_weight;
                predecessors[head as usize] = Some(tail);
                let key = alternative_weight + estimate(head, alternative_weight);
                queue.insert(head, key);
            }
        }
    }

    let weight = weights[goal as usize];
    if weight.is_infinite() {
        return None;
    }

    let mut vertices = vec![goal];
    let mut current = goal;
    while let Some(predecessor) = predecessors[current as usize] {
        vertices.push(predecessor);
        current = predecessor;
    }
    // Predecessors lead back to `start`. For arrive-by that already is the
    // travel order.
    if direction == Direction::Outgoing {
        vertices.reverse();
    }

    Some(Path { vertices, weight })
}
