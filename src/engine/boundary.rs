use crate::engine::index_map;
use crate::engine::partition::SegmentSpan;

/// Default distance, in track units, between markers relocated by a
/// push-chain repair.
pub const PUSH_STEP: f64 = 5.0;

/// Markers closer to a repaired neighbor than this are considered to
/// violate the ordering and get pushed along.
pub const ORDER_GUARD: f64 = 1.0;

/// The ordered set of 2N boundary markers for one loaded trajectory.
///
/// Marker pairs `(2i, 2i + 1)` delimit segment `i`. Positions are
/// continuous track units in `[0, extent]` and stay non-decreasing across
/// every mutation: moving one marker past its neighbors relocates those
/// neighbors instead of letting the order break.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundarySet {
    positions: Vec<f64>,
    extent: f64,
    step: f64,
}

impl BoundarySet {
    /// Builds a set from precomputed marker positions. The caller supplies
    /// an even number of positions; odd tails would leave a segment without
    /// an end marker and are truncated.
    pub fn from_positions(mut positions: Vec<f64>, extent: f64) -> Self {
        if positions.len() % 2 != 0 {
            log::warn!(
                "dropping unpaired trailing marker ({} positions supplied)",
                positions.len()
            );
            positions.pop();
        }
        Self {
            positions,
            extent,
            step: PUSH_STEP,
        }
    }

    /// Overrides the push-chain spacing step.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn marker_count(&self) -> usize {
        self.positions.len()
    }

    pub fn segment_count(&self) -> usize {
        self.positions.len() / 2
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Moves one marker to `requested` (clamped to the track) and repairs
    /// the ordering around it.
    ///
    /// The repair walks outward from the moved marker: each neighbor that
    /// now sits within [`ORDER_GUARD`] of the already repaired marker next
    /// to it is relocated to `moved ± step × distance`, and the walk stops
    /// at the first marker that needs no repair. Relocated markers are
    /// clamped back into the track, so a drag against the edge collapses
    /// the tail of the chain there rather than shoving it out of reach.
    pub fn move_marker(&mut self, id: usize, requested: f64) {
        if id >= self.positions.len() {
            log::warn!("ignoring move for unknown marker {id}");
            return;
        }
        let target = requested.clamp(0.0, self.extent);
        self.positions[id] = target;

        for i in (id + 1)..self.positions.len() {
            if self.positions[i] >= self.positions[i - 1] + ORDER_GUARD {
                break;
            }
            let pushed = target + self.step * (i - id) as f64;
            self.positions[i] = pushed.min(self.extent);
        }
        for i in (0..id).rev() {
            if self.positions[i] <= self.positions[i + 1] - ORDER_GUARD {
                break;
            }
            let pushed = target - self.step * (id - i) as f64;
            self.positions[i] = pushed.max(0.0);
        }
    }

    /// Recomputes the per-segment index spans for a trajectory of `length`
    /// timesteps. Always derived fresh from the marker positions; nothing
    /// is cached across mutations.
    pub fn segments(&self, length: usize) -> Vec<SegmentSpan> {
        let mut spans = Vec::with_capacity(self.segment_count());
        let mut prev_end = 0;
        for i in 0..self.segment_count() {
            // A start marker pinned at the far edge floors back to the
            // last timestep while an earlier end marker there maps to
            // `length`; lifting the start to the previous end keeps the
            // spans non-overlapping.
            let start = index_map::to_index(self.positions[2 * i] / self.extent, length)
                .max(prev_end);
            let end = index_map::to_index_end(self.positions[2 * i + 1] / self.extent, length)
                .max(start);
            spans.push(SegmentSpan::new(start, end));
            prev_end = end;
        }
        spans
    }

    /// Restores non-decreasing order with a single monotonic sweep. Used
    /// after restoring positions from external data that is normally, but
    /// not provably, already ordered.
    pub fn enforce_order(&mut self) {
        for i in 1..self.positions.len() {
            if self.positions[i] < self.positions[i - 1] {
                self.positions[i] = self.positions[i - 1];
            }
        }
    }

    /// True when markers are in non-decreasing order.
    pub fn is_ordered(&self) -> bool {
        self.positions.windows(2).all(|w| w[0] <= w[1])
    }
}
