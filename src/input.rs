use egui::{Context, PointerButton, Pos2, Rect};

use crate::engine::DragButton;

/// Pointer events over the labeling board, expressed in engine track
/// coordinates rather than screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button went down inside the board.
    PointerDown { x: f64, button: DragButton },
    /// The pointer moved while a drag is in progress.
    PointerMove { x: f64 },
    /// The dragging button was released.
    PointerUp,
}

/// Converts raw egui pointer input into [`InputEvent`]s.
///
/// Screen coordinates are mapped into the engine's logical track width, so
/// the engine never sees the actual on-screen board size. Downs are only
/// reported inside the board rect; moves keep flowing during a drag even
/// when the pointer strays outside, since the engine clamps.
pub struct InputHandler {
    extent: f64,
    board_rect: Option<Rect>,
    last_pointer_pos: Option<Pos2>,
    dragging: bool,
}

impl InputHandler {
    pub fn new(extent: f64) -> Self {
        Self {
            extent,
            board_rect: None,
            last_pointer_pos: None,
            dragging: false,
        }
    }

    /// Update the board rectangle for the current frame.
    pub fn set_board_rect(&mut self, rect: Rect) {
        self.board_rect = Some(rect);
    }

    /// Maps a screen position to a track coordinate.
    fn to_track_x(&self, pos: Pos2) -> f64 {
        match self.board_rect {
            Some(rect) if rect.width() > 0.0 => {
                (pos.x - rect.left()) as f64 / rect.width() as f64 * self.extent
            }
            _ => 0.0,
        }
    }

    fn drag_button(button: PointerButton) -> Option<DragButton> {
        match button {
            PointerButton::Primary => Some(DragButton::Primary),
            PointerButton::Secondary => Some(DragButton::Secondary),
            _ => None,
        }
    }

    /// Process raw egui input and generate the frame's events.
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            for raw_button in [PointerButton::Primary, PointerButton::Secondary] {
                if input.pointer.button_pressed(raw_button) {
                    let (Some(pos), Some(rect)) = (input.pointer.hover_pos(), self.board_rect)
                    else {
                        continue;
                    };
                    if rect.contains(pos) {
                        if let Some(button) = Self::drag_button(raw_button) {
                            self.dragging = true;
                            events.push(InputEvent::PointerDown {
                                x: self.to_track_x(pos),
                                button,
                            });
                        }
                    }
                }
                if input.pointer.button_released(raw_button) && self.dragging {
                    self.dragging = false;
                    events.push(InputEvent::PointerUp);
                }
            }

            if let Some(pos) = input.pointer.hover_pos() {
                if self.dragging && Some(pos) != self.last_pointer_pos {
                    events.push(InputEvent::PointerMove {
                        x: self.to_track_x(pos),
                    });
                }
                self.last_pointer_pos = Some(pos);
            } else {
                self.last_pointer_pos = None;
            }
        });

        events
    }
}
