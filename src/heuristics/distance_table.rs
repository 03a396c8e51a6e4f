use std::sync::atomic::{AtomicBool, AtomicU64, AtomicU8, Ordering};

use crate::{
    graphs::{Vertex, Weight},
    search::path::RoutingRequest,
};

/// Progress of the reverse search that owns a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum SearchState {
    Running = 0,
    /// Every reachable vertex was settled.
    Exhausted = 1,
    /// The search stopped at the first key above the cutoff.
    CutoffReached = 2,
    /// The table was retired before the search completed.
    Cancelled = 3,
    /// The search could not start, e.g. the target lies outside the table.
    Aborted = 4,
}

impl SearchState {
    fn from_u8(value: u8) -> SearchState {
        match value {
            1 => SearchState::Exhausted,
            2 => SearchState::CutoffReached,
            3 => SearchState::Cancelled,
            4 => SearchState::Aborted,
            _ => SearchState::Running,
        }
    }

    pub fn is_finished(self) -> bool {
        self != SearchState::Running
    }
}

/// Settled distances to a single target, shared between the one search
/// writing them and any number of readers.
///
/// Each cell holds the bits of an `f64` and is read and written atomically.
/// Unset cells hold infinity. A cell is written at most once, when its
/// vertex is settled, so every finite value a reader sees is exact.
/// Consistency across cells is not guaranteed beyond the ordering
/// described at [`DistanceTable::lower_bound`].
pub struct DistanceTable {
    target: Vertex,
    cutoff: Weight,
    /// Request fields the cell weights depend on.
    arrive_by: bool,
    walk_reluctance: f64,
    bicycle_reluctance: f64,
    weights: Vec<AtomicU64>,
    max_found: AtomicU64,
    state: AtomicU8,
    retired: AtomicBool,
}

impl DistanceTable {
    /// Empty table for `target`, cut off at `request.max_weight`.
    pub fn new(
        target: Vertex,
        request: &RoutingRequest,
        number_of_vertices: u32,
    ) -> DistanceTable {
        let unset = Weight::INFINITY.to_bits();
        DistanceTable {
            target,
            cutoff: request.max_weight,
            arrive_by: request.arrive_by,
            walk_reluctance: request.walk_reluctance,
            bicycle_reluctance: request.bicycle_reluctance,
            weights: (0..number_of_vertices)
                .map(|_| AtomicU64::new(unset))
                .collect(),
            max_found: AtomicU64::new(0f64.to_bits()),
            state: AtomicU8::new(SearchState::Running as u8),
            retired: AtomicBool::new(false),
        }
    }

    pub fn target(&self) -> Vertex {
        self.target
    }

    pub fn cutoff(&self) -> Weight {
        self.cutoff
    }

    /// Number of vertices the table was sized for.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Whether `request` for `target` is already answered by this table.
    ///
    /// The direction and the reluctances must match exactly, the budget may
    /// be smaller than the cutoff.
    pub fn covers(&self, target: Vertex, request: &RoutingRequest) -> bool {
        self.target == target
            && self.arrive_by == request.arrive_by
            && self.walk_reluctance == request.walk_reluctance
            && self.bicycle_reluctance == request.bicycle_reluctance
            && request.max_weight <= self.cutoff
    }

    /// Settled weight of `vertex`, infinity while unset, `None` outside the
    /// table.
    pub fn weight(&self, vertex: Vertex) -> Option<Weight> {
        let cell = self.weights.get(vertex as usize)?;
        Some(Weight::from_bits(cell.load(Ordering::Acquire)))
    }

    pub fn is_settled(&self, vertex: Vertex) -> bool {
        self.weight(vertex).is_some_and(Weight::is_finite)
    }

    /// Largest key the search has extracted so far.
    pub fn max_found(&self) -> Weight {
        Weight::from_bits(self.max_found.load(Ordering::Acquire))
    }

    /// Lower bound on the weight of a path between `vertex` and the target.
    ///
    /// `max_found` is loaded before the cell. The search publishes a cell
    /// before it raises `max_found` past it, so a cell still unset after
    /// that load belongs to a vertex at least `max_found` away.
    pub fn lower_bound(&self, vertex: Vertex) -> Weight {
        let max_found = self.max_found();
        match self.weight(vertex) {
            None => 0.0,
            Some(weight) if weight.is_infinite() => max_found,
            Some(weight) => weight,
        }
    }

    pub(crate) fn settle(&self, vertex: Vertex, weight: Weight) {
        if let Some(cell) = self.weights.get(vertex as usize) {
            debug_assert!(Weight::from_bits(cell.load(Ordering::Relaxed)).is_infinite());
            cell.store(weight.to_bits(), Ordering::Release);
        }
    }

    pub(crate) fn raise_max_found(&self, weight: Weight) {
        debug_assert!(weight >= self.max_found());
        self.max_found.store(weight.to_bits(), Ordering::Release);
    }

    pub fn state(&self) -> SearchState {
        SearchState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn finish(&self, state: SearchState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Marks the table as superseded. Its search stops at the next
    /// iteration.
    pub fn retire(&self) {
        self.retired.store(true, Ordering::Release);
    }

    pub fn is_retired(&self) -> bool {
        self.retired.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for DistanceTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DistanceTable")
            .field("target", &self.target)
            .field("cutoff", &self.cutoff)
            .field("arrive_by", &self.arrive_by)
            .field("len", &self.len())
            .field("max_found", &self.max_found())
            .field("state", &self.state())
            .field("retired", &self.is_retired())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_table_is_unset() {
        let table = DistanceTable::new(2, &RoutingRequest::depart_at(100.0), 4);

        assert_eq!(table.len(), 4);
        assert_eq!(table.weight(0), Some(Weight::INFINITY));
        assert!(!table.is_settled(0));
        assert_eq!(table.max_found(), 0.0);
        assert_eq!(table.state(), SearchState::Running);
        assert!(!table.is_retired());
    }

    #[test]
    fn lower_bound_falls_back_to_max_found() {
        let table = DistanceTable::new(0, &RoutingRequest::depart_at(100.0), 3);
        table.settle(0, 0.0);
        table.raise_max_found(0.0);
        table.settle(1, 4.5);
        table.raise_max_found(4.5);

        assert_eq!(table.lower_bound(1), 4.5);
        assert_eq!(table.lower_bound(2), 4.5);
        assert_eq!(table.lower_bound(3), 0.0);
        assert_eq!(table.weight(3), None);
    }

    #[test]
    fn covers_same_target_within_cutoff() {
        let table = DistanceTable::new(7, &RoutingRequest::depart_at(50.0), 8);

        assert!(table.covers(7, &RoutingRequest::depart_at(50.0)));
        assert!(table.covers(7, &RoutingRequest::depart_at(10.0).with_origin(3)));
        assert!(!table.covers(7, &RoutingRequest::depart_at(50.5)));
        assert!(!table.covers(6, &RoutingRequest::depart_at(10.0)));
    }

    #[test]
    fn covers_requires_same_direction_and_reluctances() {
        let table = DistanceTable::new(7, &RoutingRequest::depart_at(50.0), 8);

        assert!(!table.covers(7, &RoutingRequest::arrive_by(10.0)));
        let walk_averse = RoutingRequest {
            walk_reluctance: 4.0,
            ..RoutingRequest::depart_at(10.0)
        };
        assert!(!table.covers(7, &walk_averse));
        let bicycle_averse = RoutingRequest {
            bicycle_reluctance: 1.5,
            ..RoutingRequest::depart_at(10.0)
        };
        assert!(!table.covers(7, &bicycle_averse));
    }

    #[test]
    fn state_round_trips() {
        let table = DistanceTable::new(0, &RoutingRequest::depart_at(1.0), 1);
        table.finish(SearchState::CutoffReached);
        assert_eq!(table.state(), SearchState::CutoffReached);
        assert!(table.state().is_finished());
    }
}
