//! The segment-boundary engine: everything that turns pointer actions into
//! an ordered, non-overlapping partition of a trajectory's timesteps.
//! Rendering reads the engine's state after each mutation; nothing in here
//! touches a widget or a painter.

use egui::Pos2;

mod boundary;
mod index_map;
mod partition;

pub use boundary::{BoundarySet, ORDER_GUARD, PUSH_STEP};
pub use partition::{Partition, PartitionBuilder, SegmentSpan};

/// Which pointer button started a drag. Primary drags a segment's start
/// marker, secondary its end marker; anything that can supply
/// `(coordinate, DragButton)` pairs can drive the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragButton {
    Primary,
    Secondary,
}

/// Default logical track width, matching the board the original recordings
/// were scaled for.
pub const DEFAULT_EXTENT: f64 = 1800.0;

// State for one loaded trajectory; dropped wholesale on the next load.
struct Board {
    points: Vec<Pos2>,
    target_len: usize,
    boundaries: BoundarySet,
    active_marker: Option<usize>,
}

/// Façade owning the currently loaded trajectory and its marker set.
///
/// Pointer events arrive in order and each one fully repairs the marker
/// ordering before returning, so callers never observe an inconsistent
/// partition. Every operation is a defensive no-op while nothing is
/// loaded; pointer timing is racy and must never take the session down.
pub struct SegmentEngine {
    extent: f64,
    board: Option<Board>,
}

impl Default for SegmentEngine {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENT)
    }
}

impl SegmentEngine {
    /// `extent` is the logical track width pointer coordinates are
    /// expressed in.
    pub fn new(extent: f64) -> Self {
        Self {
            extent,
            board: None,
        }
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    pub fn is_loaded(&self) -> bool {
        self.board.is_some()
    }

    /// Replaces the active trajectory. Saved index lists, when given, are
    /// handed to [`PartitionBuilder`], which falls back to the default
    /// layout on a segment-count mismatch. Any unsaved edits of the
    /// previous trajectory are discarded; the caller flushes them first.
    pub fn load(&mut self, points: Vec<Pos2>, target_len: usize, saved: Option<&[Vec<usize>]>) {
        if target_len == 0 || points.is_empty() {
            log::warn!(
                "refusing to load a board with {} segments over {} points",
                target_len,
                points.len()
            );
            self.board = None;
            return;
        }
        let builder = PartitionBuilder::new(target_len, points.len(), self.extent);
        let boundaries = match saved {
            Some(lists) => builder.restore(lists),
            None => builder.default_layout(),
        };
        log::info!(
            "loaded trajectory: {} timesteps, {} segments",
            points.len(),
            target_len
        );
        self.board = Some(Board {
            points,
            target_len,
            boundaries,
            active_marker: None,
        });
    }

    /// The loaded trajectory, empty while nothing is loaded.
    pub fn points(&self) -> &[Pos2] {
        match &self.board {
            Some(board) => &board.points,
            None => &[],
        }
    }

    pub fn target_len(&self) -> usize {
        self.board.as_ref().map_or(0, |b| b.target_len)
    }

    /// Current marker positions in track units, for rendering.
    pub fn marker_positions(&self) -> &[f64] {
        match &self.board {
            Some(board) => board.boundaries.positions(),
            None => &[],
        }
    }

    /// The marker a drag is currently manipulating, if any.
    pub fn active_marker(&self) -> Option<usize> {
        self.board.as_ref().and_then(|b| b.active_marker)
    }

    /// Selects the marker for the ensuing drag and places it at `x`.
    ///
    /// Tie-break policy: a coordinate beyond the last marker (still inside
    /// the track) picks the last marker; before the first, the first;
    /// otherwise the pair of adjacent markers straddling the coordinate is
    /// found and the primary button picks its even-indexed (segment start)
    /// marker, the secondary its odd-indexed (segment end) one — so the
    /// two buttons can grab either boundary even when the pair sits close
    /// together. A coordinate matching no rule leaves the engine idle.
    pub fn pointer_down(&mut self, x: f64, button: DragButton) {
        let Some(board) = self.board.as_mut() else {
            return;
        };
        let positions = board.boundaries.positions();
        let last = positions.len() - 1;

        board.active_marker = if x > positions[last] && x < self.extent {
            Some(last)
        } else if x < positions[0] && x > 0.0 {
            Some(0)
        } else {
            let mut picked = None;
            for i in 0..last {
                if x > positions[i] && x < positions[i + 1] {
                    picked = Some(match button {
                        DragButton::Primary if i % 2 == 0 => i,
                        DragButton::Primary => i + 1,
                        DragButton::Secondary if i % 2 == 1 => i,
                        DragButton::Secondary => i + 1,
                    });
                    break;
                }
            }
            picked
        };

        if let Some(id) = board.active_marker {
            board.boundaries.move_marker(id, x);
        }
    }

    /// Continues the active drag; no-op while no marker is selected.
    pub fn pointer_move(&mut self, x: f64) {
        let Some(board) = self.board.as_mut() else {
            return;
        };
        let Some(id) = board.active_marker else {
            return;
        };
        board.boundaries.move_marker(id, x);
    }

    /// Ends the drag. Positions already applied stay applied; there is no
    /// rollback.
    pub fn pointer_up(&mut self) {
        if let Some(board) = self.board.as_mut() {
            board.active_marker = None;
        }
    }

    /// The current per-segment index spans, recomputed from the marker
    /// positions on every call.
    pub fn current_partition(&self) -> Partition {
        match &self.board {
            Some(board) => Partition::from_spans(board.boundaries.segments(board.points.len())),
            None => Partition::default(),
        }
    }
}
