use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::engine::Partition;

/// Logical board size the trajectories are scaled into. Matches the
/// window the original recordings were labeled on.
pub const BOARD_WIDTH: f32 = 1800.0;
pub const BOARD_HEIGHT: f32 = 1000.0;

/// One recorded timestep of a trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeStep {
    /// Normalized 2-D position.
    pub pos: [f32; 2],
    /// Whether this timestep is currently covered by any segment.
    #[serde(rename = "isL", default)]
    pub labeled: bool,
}

/// On-disk record for one word: the target word, its timestep sequence,
/// and — once labeling has started — the per-letter index lists.
///
/// The field names match the labeled files the tool has always produced,
/// so previously labeled data keeps loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub data: Vec<TimeStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labeled_idx_list: Option<Vec<Vec<usize>>>,
}

impl WordRecord {
    /// Number of symbols the trajectory gets segmented into.
    pub fn target_len(&self) -> usize {
        self.word.chars().count()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Scales the raw positions into the fixed board extent.
    ///
    /// The larger coordinate range drives the scale so the aspect ratio
    /// survives; the board keeps a 5% horizontal and 10% vertical margin.
    pub fn board_points(&self) -> Vec<Pos2> {
        if self.data.is_empty() {
            return Vec::new();
        }
        let mut x_min = f32::INFINITY;
        let mut x_max = f32::NEG_INFINITY;
        let mut y_min = f32::INFINITY;
        let mut y_max = f32::NEG_INFINITY;
        for step in &self.data {
            x_min = x_min.min(step.pos[0]);
            x_max = x_max.max(step.pos[0]);
            y_min = y_min.min(step.pos[1]);
            y_max = y_max.max(step.pos[1]);
        }
        let range = (x_max - x_min).max(y_max - y_min).max(f32::EPSILON);
        let scale = 1.0 / range;

        self.data
            .iter()
            .map(|step| {
                Pos2::new(
                    (step.pos[0] - x_min) * scale * BOARD_WIDTH * 0.9 + BOARD_WIDTH * 0.05,
                    (step.pos[1] - y_min) * scale * BOARD_HEIGHT * 0.8 + BOARD_HEIGHT * 0.1,
                )
            })
            .collect()
    }

    /// Writes the current partition back into the record: every `isL`
    /// flag is rewritten and `labeled_idx_list` replaced, so the two
    /// stay in agreement.
    pub fn apply_partition(&mut self, partition: &Partition) {
        let flags = partition.flags(self.data.len());
        for (step, labeled) in self.data.iter_mut().zip(flags) {
            step.labeled = labeled;
        }
        self.labeled_idx_list = Some(partition.index_lists());
    }
}
