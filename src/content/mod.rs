//! Content model - static, pre-authored chapters and tasks

pub mod builtin;
pub mod chapter;
pub mod integrity;
mod loader;
pub mod task;

pub use builtin::{engine_bay, engine_bay_hotspots};
pub use chapter::{Chapter, Interaction, Module};
pub use integrity::{check_module, ContentIssue, IssueKind};
pub use task::{ChoiceTask, ClickTask, Task, TaskKind, TerminalTask};
