#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod document;
pub mod engine;
pub mod input;
pub mod renderer;
pub mod store;

pub use app::LabelApp;
pub use document::{TimeStep, WordRecord};
pub use engine::{
    BoundarySet, DragButton, Partition, PartitionBuilder, SegmentEngine, SegmentSpan,
};
pub use input::{InputEvent, InputHandler};
pub use renderer::Renderer;
pub use store::{StoreError, WordStore};
