use serde::{Deserialize, Serialize};

use crate::engine::boundary::BoundarySet;
use crate::engine::index_map;

/// Half-open range `[start, end)` of timestep indices covered by one
/// segment. `start == end` is a legal, empty labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSpan {
    pub start: usize,
    pub end: usize,
}

impl SegmentSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }

    /// The explicit member indices, the shape the labeled files store.
    pub fn indices(&self) -> Vec<usize> {
        (self.start..self.end).collect()
    }
}

/// The ordered list of per-segment index spans for one trajectory — the
/// unit of labeling progress that gets persisted and restored. Spans are
/// pairwise non-overlapping and in non-decreasing order, mirroring the
/// marker ordering they are derived from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Partition {
    spans: Vec<SegmentSpan>,
}

impl Partition {
    pub fn from_spans(spans: Vec<SegmentSpan>) -> Self {
        Self { spans }
    }

    pub fn spans(&self) -> &[SegmentSpan] {
        &self.spans
    }

    pub fn segment_count(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Expands every span into its explicit index list, the
    /// `labeled_idx_list` shape of the word files.
    pub fn index_lists(&self) -> Vec<Vec<usize>> {
        self.spans.iter().map(SegmentSpan::indices).collect()
    }

    /// Per-timestep membership flags for a trajectory of `length` steps.
    /// A flag is true iff the index falls inside some span.
    pub fn flags(&self, length: usize) -> Vec<bool> {
        let mut flags = vec![false; length];
        for span in &self.spans {
            for index in span.start..span.end.min(length) {
                flags[index] = true;
            }
        }
        flags
    }

    /// True when spans are ordered and non-overlapping
    /// (`start <= end <= next start`).
    pub fn is_ordered(&self) -> bool {
        self.spans.iter().all(|s| s.start <= s.end)
            && self.spans.windows(2).all(|w| w[0].end <= w[1].start)
    }
}

/// Builds the initial marker layout for a freshly loaded trajectory,
/// either by even default spacing or by restoring previously saved index
/// lists.
pub struct PartitionBuilder {
    segments: usize,
    length: usize,
    extent: f64,
}

impl PartitionBuilder {
    /// `segments` is the target word length, `length` the timestep count,
    /// `extent` the track width the markers live on.
    pub fn new(segments: usize, length: usize, extent: f64) -> Self {
        Self {
            segments,
            length,
            extent,
        }
    }

    /// Even default spacing: with `cursor_range = 1 / (2N - 1)`, segment i
    /// spans positions `2i·cursor_range .. (2i+1)·cursor_range`, giving N
    /// equal segments with equal gaps across the whole track.
    pub fn default_layout(&self) -> BoundarySet {
        if self.segments == 0 {
            return BoundarySet::from_positions(Vec::new(), self.extent);
        }
        let cursor_range = 1.0 / (2 * self.segments - 1) as f64;
        let mut positions = Vec::with_capacity(2 * self.segments);
        for i in 0..self.segments {
            positions.push(2.0 * i as f64 * cursor_range * self.extent);
            positions.push((2.0 * i as f64 + 1.0) * cursor_range * self.extent);
        }
        BoundarySet::from_positions(positions, self.extent)
    }

    /// Restores markers from saved per-segment index lists.
    ///
    /// A saved list is only trusted when its segment count matches the
    /// current target length; on mismatch the whole thing is rejected and
    /// the default layout is used instead — never a partial merge. An
    /// empty per-segment list restores as a marker pair collapsed at the
    /// trajectory midpoint.
    pub fn restore(&self, saved: &[Vec<usize>]) -> BoundarySet {
        if saved.len() != self.segments {
            log::warn!(
                "saved partition has {} segments but the target word has {}; using the default layout",
                saved.len(),
                self.segments
            );
            return self.default_layout();
        }

        let mut positions = Vec::with_capacity(2 * self.segments);
        for list in saved {
            let (start, end) = match (list.first(), list.last()) {
                (Some(&first), Some(&last)) => (first, last + 1),
                _ => (self.length / 2, self.length / 2),
            };
            positions.push(index_map::to_position(start, self.length) * self.extent);
            positions.push(index_map::to_position(end, self.length) * self.extent);
        }

        let mut set = BoundarySet::from_positions(positions, self.extent);
        if !set.is_ordered() {
            log::warn!("restored markers were out of order; repairing");
            set.enforce_order();
        }
        set
    }
}
