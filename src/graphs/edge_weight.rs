use super::{Edge, Weight};
use crate::search::path::RoutingRequest;

/// Lower bound on the cost of traversing an edge under a request.
///
/// Implementations must not return negative values. Searches treat a
/// negative result as a malformed edge and skip it.
pub trait EdgeWeight: Send + Sync {
    fn weight_lower_bound(&self, edge: &Edge, request: &RoutingRequest) -> Weight;
}

impl<F> EdgeWeight for F
where
    F: Fn(&Edge, &RoutingRequest) -> Weight + Send + Sync,
{
    fn weight_lower_bound(&self, edge: &Edge, request: &RoutingRequest) -> Weight {
        self(edge, request)
    }
}

/// Generalized cost: the edge's base weight scaled by the request's
/// reluctance for the edge's mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeneralizedCost;

impl EdgeWeight for GeneralizedCost {
    fn weight_lower_bound(&self, edge: &Edge, request: &RoutingRequest) -> Weight {
        edge.weight() * request.reluctance(edge.mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphs::Mode;

    #[test]
    fn walking_is_scaled_by_reluctance() {
        let request = RoutingRequest {
            walk_reluctance: 3.0,
            ..Default::default()
        };
        let walk = Edge::new(0, 1, 10.0, Mode::Walk).unwrap();
        let ride = Edge::new(0, 1, 10.0, Mode::Transit).unwrap();

        assert_eq!(GeneralizedCost.weight_lower_bound(&walk, &request), 30.0);
        assert_eq!(GeneralizedCost.weight_lower_bound(&ride, &request), 10.0);
    }

    #[test]
    fn closures_are_edge_weights() {
        let constant = |_: &Edge, _: &RoutingRequest| 7.0;
        let edge = Edge::new(0, 1, 1.0, Mode::Car).unwrap();

        assert_eq!(
            constant.weight_lower_bound(&edge, &RoutingRequest::default()),
            7.0
        );
    }
}
