//! Task definitions - one learner-facing unit of work
//!
//! Tasks are tagged by `type` in content files:
//! `click`, `choice` (also accepted as `mcq`) and `done` (also `terminal`).

use serde::{Deserialize, Serialize};

/// A single task inside a chapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Task {
    /// Identify one target (hotspot or cable handle)
    Click(ClickTask),
    /// Multi-select question, answered as a set
    #[serde(alias = "mcq")]
    Choice(ChoiceTask),
    /// Completion screen, succeeds as soon as it is entered
    #[serde(rename = "done", alias = "terminal")]
    Terminal(TerminalTask),
}

/// Discriminant of [`Task`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Click,
    Choice,
    Terminal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickTask {
    pub id: String,
    pub instruction: String,
    /// Exact, case-sensitive identifier of the one correct target
    pub correct_target: String,
    pub success_message: String,
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceTask {
    pub id: String,
    pub question: String,
    /// Options in authored display order; unique
    pub options: Vec<String>,
    /// Non-empty subset of `options`; order carries no meaning
    pub correct_answers: Vec<String>,
    pub success_message: String,
    pub error_message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalTask {
    pub id: String,
    pub title: String,
    pub body: String,
}

impl Task {
    pub fn id(&self) -> &str {
        match self {
            Task::Click(t) => &t.id,
            Task::Choice(t) => &t.id,
            Task::Terminal(t) => &t.id,
        }
    }

    pub fn kind(&self) -> TaskKind {
        match self {
            Task::Click(_) => TaskKind::Click,
            Task::Choice(_) => TaskKind::Choice,
            Task::Terminal(_) => TaskKind::Terminal,
        }
    }

    pub fn as_click(&self) -> Option<&ClickTask> {
        match self {
            Task::Click(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_choice(&self) -> Option<&ChoiceTask> {
        match self {
            Task::Choice(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Task::Terminal(_))
    }
}

impl ChoiceTask {
    /// Position of an option in authored order
    pub fn option_index(&self, option: &str) -> Option<usize> {
        self.options.iter().position(|o| o == option)
    }
}
