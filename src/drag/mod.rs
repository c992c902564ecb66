//! Drag-disconnect interaction - dragging cable clamps off battery terminals

pub mod handle;
pub mod scene;

pub use handle::Handle;
pub use scene::{CableScene, DragSignal};
