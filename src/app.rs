use std::path::PathBuf;

use eframe::egui;

use crate::document::WordRecord;
use crate::engine::SegmentEngine;
use crate::input::{InputEvent, InputHandler};
use crate::renderer::Renderer;
use crate::store::WordStore;

/// The labeling application: one word on screen at a time, draggable
/// segment markers below it, save-on-navigate.
pub struct LabelApp {
    data_root: PathBuf,
    store: Option<WordStore>,
    engine: SegmentEngine,
    input: InputHandler,
    renderer: Renderer,
    /// The record backing the word on screen; written back on navigation.
    record: Option<WordRecord>,
    word_idx: isize,
    user_id_input: String,
    id_prompt: &'static str,
    finished: bool,
}

impl LabelApp {
    /// Called once before the first frame.
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let data_root =
            std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::with_data_root(data_root)
    }

    /// Points the app at a directory containing `normalized_voc/` and
    /// `labeled_voc/`.
    pub fn with_data_root(data_root: PathBuf) -> Self {
        let engine = SegmentEngine::default();
        let input = InputHandler::new(engine.extent());
        Self {
            data_root,
            store: None,
            engine,
            input,
            renderer: Renderer::new(),
            record: None,
            word_idx: -1,
            user_id_input: String::new(),
            id_prompt: "User ID",
            finished: false,
        }
    }

    fn word_count(&self) -> isize {
        self.store.as_ref().map_or(0, |s| s.len() as isize)
    }

    fn is_idx_valid(&self, index: isize) -> bool {
        index >= 0 && index < self.word_count()
    }

    fn enter_user_id(&mut self) {
        match WordStore::open(&self.data_root, self.user_id_input.trim()) {
            Ok(store) => {
                self.store = Some(store);
                self.word_idx = -1;
                self.move_word(1);
            }
            Err(err) => {
                log::warn!("rejecting user id: {err}");
                self.id_prompt = "BAD ID";
            }
        }
    }

    /// Writes the current partition into the on-screen record and saves
    /// it. Failures are logged, never fatal; the annotator keeps working.
    fn flush_current(&mut self) {
        if !self.is_idx_valid(self.word_idx) {
            return;
        }
        let (Some(store), Some(record)) = (&self.store, &mut self.record) else {
            return;
        };
        record.apply_partition(&self.engine.current_partition());
        let name = &store.words()[self.word_idx as usize];
        if let Err(err) = store.save(name, record) {
            log::error!("failed to save {name}: {err}");
        }
    }

    /// Saves the current word and moves `step` words forward or back.
    /// Stepping past the last word finishes the session.
    fn move_word(&mut self, step: isize) {
        self.flush_current();
        let next = self.word_idx + step;
        if self.is_idx_valid(next) {
            self.load_word(next);
        } else if step > 0 && self.store.is_some() {
            self.finished = true;
        }
    }

    fn load_word(&mut self, index: isize) {
        let Some(store) = &self.store else {
            return;
        };
        let name = &store.words()[index as usize];
        match store.load(name) {
            Ok(record) => {
                log::info!("labeling word {:?} ({})", record.word, name);
                self.engine.load(
                    record.board_points(),
                    record.target_len(),
                    record.labeled_idx_list.as_deref(),
                );
                self.record = Some(record);
                self.word_idx = index;
            }
            Err(err) => {
                log::error!("failed to load {name}: {err}");
                self.record = None;
                self.word_idx = index;
            }
        }
    }

    fn user_id_window(&mut self, ctx: &egui::Context) {
        egui::Window::new(self.id_prompt)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                let response = ui.text_edit_singleline(&mut self.user_id_input);
                let submitted = response.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Enter").clicked() || submitted {
                    self.enter_user_id();
                }
            });
    }

    fn finished_window(&mut self, ctx: &egui::Context) {
        let labeled_dir = self
            .store
            .as_ref()
            .map(|s| s.labeled_dir().display().to_string())
            .unwrap_or_default();
        egui::Window::new("All done!")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Many thanks!\nAll labeled data has been saved to:\n{labeled_dir}"
                ));
                if ui.button("Close App").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
    }

    fn navigation_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("navigation").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("⟵ Last").clicked() {
                    self.move_word(-1);
                }
                if ui.button("Next ⟶").clicked() {
                    self.move_word(1);
                }
                if let Some(record) = &self.record {
                    ui.separator();
                    ui.label(format!(
                        "word: {}   ({}/{})",
                        record.word,
                        self.word_idx + 1,
                        self.word_count()
                    ));
                }
            });
        });
    }

    fn board_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let available_size = ui.available_size();
            let (response, painter) =
                ui.allocate_painter(available_size, egui::Sense::click_and_drag());
            let rect = response.rect;

            self.input.set_board_rect(rect);
            for event in self.input.process_input(ctx) {
                match event {
                    InputEvent::PointerDown { x, button } => {
                        self.engine.pointer_down(x, button)
                    }
                    InputEvent::PointerMove { x } => self.engine.pointer_move(x),
                    InputEvent::PointerUp => self.engine.pointer_up(),
                }
            }

            self.renderer.render(&painter, rect, &self.engine);
        });
    }
}

impl eframe::App for LabelApp {
    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.finished {
            self.finished_window(ctx);
            return;
        }
        if self.store.is_none() {
            self.user_id_window(ctx);
            return;
        }
        self.navigation_bar(ctx);
        self.board_panel(ctx);
    }
}
