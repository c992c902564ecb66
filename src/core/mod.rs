pub mod config;
pub mod error;
pub mod types;

pub use config::{DragConfig, HandleConfig, PlayerConfig};
pub use error::{PlayerError, Result};
pub use types::{HandleId, SessionId, Status};
