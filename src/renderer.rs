use eframe::egui::{self, Color32, Pos2, Rect, Stroke};

use crate::document::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::engine::SegmentEngine;

/// Height of the marker track above the bottom edge of the board.
const TRACK_Y_OFFSET: f32 = 30.0;

/// Rotating high-contrast palette for segment colors.
const SEGMENT_COLORS: [Color32; 5] = [
    Color32::from_rgb(255, 77, 77),
    Color32::from_rgb(77, 255, 77),
    Color32::from_rgb(77, 77, 255),
    Color32::from_rgb(255, 26, 255),
    Color32::from_rgb(255, 255, 77),
];

const TRAJECTORY_COLOR: Color32 = Color32::from_gray(153);

/// Draws the labeling board: the grey trajectory, each segment's colored
/// sub-polyline, the marker track, and the cursor handles.
///
/// The renderer holds no labeling state of its own — every frame is a
/// fresh read of the engine, so it can never disagree with the partition
/// that gets saved.
#[derive(Debug, Default)]
pub struct Renderer {}

impl Renderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Color assigned to segment `index`.
    pub fn segment_color(index: usize) -> Color32 {
        SEGMENT_COLORS[index % SEGMENT_COLORS.len()]
    }

    /// Maps a board-space point into the screen rect. Board y grows
    /// upward, screen y downward.
    fn to_screen(rect: Rect, p: Pos2) -> Pos2 {
        Pos2::new(
            rect.left() + p.x / BOARD_WIDTH * rect.width(),
            rect.bottom() - p.y / BOARD_HEIGHT * rect.height(),
        )
    }

    /// Maps a marker track position into a screen x coordinate.
    fn track_to_screen_x(rect: Rect, position: f64, extent: f64) -> f32 {
        rect.left() + (position / extent) as f32 * rect.width()
    }

    /// Renders one frame of the board from the engine's current state.
    pub fn render(&self, painter: &egui::Painter, rect: Rect, engine: &SegmentEngine) {
        let points = engine.points();
        if points.is_empty() {
            return;
        }
        let screen: Vec<Pos2> = points.iter().map(|&p| Self::to_screen(rect, p)).collect();

        // base trajectory in grey, points over a translucent polyline
        painter.add(egui::Shape::line(
            screen.clone(),
            Stroke::new(3.0, TRAJECTORY_COLOR.gamma_multiply(0.6)),
        ));
        for p in &screen {
            painter.circle_filled(*p, 2.5, TRAJECTORY_COLOR);
        }

        // colored sub-polylines for the currently selected timesteps
        let partition = engine.current_partition();
        for (i, span) in partition.spans().iter().enumerate() {
            let color = Self::segment_color(i);
            let slice = &screen[span.start..span.end];
            match slice {
                [] => {}
                [only] => {
                    painter.circle_filled(*only, 3.5, color);
                }
                _ => {
                    painter.add(egui::Shape::line(
                        slice.to_vec(),
                        Stroke::new(2.5, color),
                    ));
                }
            };
        }

        self.render_track(painter, rect, engine);
    }

    // marker track with per-segment cursor pairs
    fn render_track(&self, painter: &egui::Painter, rect: Rect, engine: &SegmentEngine) {
        let track_y = rect.bottom() - TRACK_Y_OFFSET;
        painter.line_segment(
            [
                Pos2::new(rect.left(), track_y),
                Pos2::new(rect.right(), track_y),
            ],
            Stroke::new(1.0, Color32::from_gray(100)),
        );

        let markers = engine.marker_positions();
        let extent = engine.extent();
        for pair in 0..markers.len() / 2 {
            let color = Self::segment_color(pair);
            let start_x = Self::track_to_screen_x(rect, markers[2 * pair], extent);
            let end_x = Self::track_to_screen_x(rect, markers[2 * pair + 1], extent);
            painter.line_segment(
                [Pos2::new(start_x, track_y), Pos2::new(end_x, track_y)],
                Stroke::new(5.0, color),
            );
        }
        for (id, &position) in markers.iter().enumerate() {
            let x = Self::track_to_screen_x(rect, position, extent);
            let center = Pos2::new(x, track_y);
            painter.circle_filled(center, 6.0, Self::segment_color(id / 2));
            if engine.active_marker() == Some(id) {
                painter.circle_stroke(center, 7.5, Stroke::new(1.5, Color32::WHITE));
            }
        }
    }
}
