//! Progression state machine
//!
//! Owns the learner's position through the module and the feedback for the
//! current task. Every intent is total: an intent that does not apply to
//! the current state returns `None` and changes nothing.
//!
//! Feedback transitions:
//! - `Idle -> Success | Error` on an answer
//! - `Error -> Success` on a later correct answer
//! - `Success` ignores further answers until the position changes
//! - any position change resets to `Idle`, except that entering a terminal
//!   task succeeds immediately

use crate::content::chapter::{Chapter, Module};
use crate::content::integrity::{check_module, ContentIssue};
use crate::content::task::Task;
use crate::core::types::Status;
use crate::progression::navigation::{NavigationPolicy, ReachView};
use crate::progression::state::ProgressionState;
use crate::validation::{choice_matches, click_matches};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of an applied answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Correct,
    Incorrect,
}

/// Chapter and task index pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub chapter: usize,
    pub task: usize,
}

pub struct ProgressionMachine {
    module: Arc<Module>,
    state: ProgressionState,
    policy: Box<dyn NavigationPolicy>,
}

impl std::fmt::Debug for ProgressionMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressionMachine")
            .field("module", &self.module.title)
            .field("state", &self.state)
            .field("policy", &self.policy)
            .finish()
    }
}

impl ProgressionMachine {
    /// Start at the first task of the first chapter
    ///
    /// Refuses content that fails the integrity checks.
    pub fn new(
        module: Arc<Module>,
        policy: Box<dyn NavigationPolicy>,
    ) -> Result<Self, ContentIssue> {
        check_module(&module)?;
        let state = ProgressionState::new(module.chapter_count());
        let mut machine = Self { module, state, policy };
        machine.enter_position(0, 0);
        Ok(machine)
    }

    pub fn module(&self) -> &Arc<Module> {
        &self.module
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn position(&self) -> Position {
        Position {
            chapter: self.state.chapter_index(),
            task: self.state.task_index(),
        }
    }

    pub fn current_chapter(&self) -> &Chapter {
        // Indices are kept valid by every transition
        &self.module.chapters[self.state.chapter_index()]
    }

    pub fn current_task(&self) -> &Task {
        &self.current_chapter().tasks[self.state.task_index()]
    }

    pub fn status(&self) -> Status {
        self.state.status()
    }

    pub fn message(&self) -> Option<&str> {
        self.state.message()
    }

    // ------------------------------------------------------------------
    // Answers
    // ------------------------------------------------------------------

    /// Validate a clicked target against the current click task
    pub fn submit_click_answer(&mut self, target_id: &str) -> Option<Verdict> {
        if self.state.status().is_success() {
            tracing::trace!(target_id, "Click ignored: task already succeeded");
            return None;
        }
        let task = self.current_task().as_click()?;

        if click_matches(task, target_id) {
            let message = task.success_message.clone();
            Some(self.record_success(message))
        } else {
            let message = task.error_message.clone();
            Some(self.record_failure(message))
        }
    }

    /// Flip an option of the current choice task; returns the new membership
    ///
    /// Ignored once the task has succeeded and for texts that are not
    /// options of the task.
    pub fn toggle_choice_option(&mut self, option: &str) -> Option<bool> {
        if self.state.status().is_success() {
            return None;
        }
        let task = self.current_task().as_choice()?;
        task.option_index(option)?;
        Some(self.state.toggle(option))
    }

    /// Validate the current selection against the current choice task
    pub fn submit_choice_answer(&mut self) -> Option<Verdict> {
        if self.state.status().is_success() {
            return None;
        }
        let task = self.current_task().as_choice()?;

        let selected = self.state.selected().iter().map(String::as_str);
        if choice_matches(task, selected) {
            let message = task.success_message.clone();
            Some(self.record_success(message))
        } else {
            let message = task.error_message.clone();
            Some(self.record_failure(message))
        }
    }

    fn record_success(&mut self, message: String) -> Verdict {
        let Position { chapter, task } = self.position();
        self.state.set_feedback(Status::Success, Some(message));
        self.state.reach_task(chapter, task);
        tracing::debug!(chapter, task, "Task answered correctly");
        Verdict::Correct
    }

    fn record_failure(&mut self, message: String) -> Verdict {
        let Position { chapter, task } = self.position();
        self.state.set_feedback(Status::Error, Some(message));
        tracing::debug!(chapter, task, "Task answered incorrectly");
        Verdict::Incorrect
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    /// Whether `advance` would move the learner
    pub fn can_advance(&self) -> bool {
        self.state.status().is_success() && !self.is_at_last_task()
    }

    /// Last task of the last chapter
    pub fn is_at_last_task(&self) -> bool {
        let Position { chapter, task } = self.position();
        chapter + 1 >= self.module.chapter_count()
            && task + 1 >= self.current_chapter().task_count()
    }

    /// The final task has been completed
    pub fn is_complete(&self) -> bool {
        self.is_at_last_task() && self.state.status().is_success()
    }

    /// Move to the next task, or the first task of the next chapter
    pub fn advance(&mut self) -> Option<Position> {
        if !self.state.status().is_success() {
            return None;
        }
        let Position { chapter, task } = self.position();

        let next = if task + 1 < self.current_chapter().task_count() {
            self.state.reach_task(chapter, task + 1);
            Position { chapter, task: task + 1 }
        } else if chapter + 1 < self.module.chapter_count() {
            self.state.reach_chapter(chapter + 1);
            Position { chapter: chapter + 1, task: 0 }
        } else {
            tracing::trace!("Advance ignored: module finished");
            return None;
        };

        self.enter_position(next.chapter, next.task);
        tracing::debug!(chapter = next.chapter, task = next.task, "Advanced");
        Some(next)
    }

    pub fn is_chapter_reachable(&self, index: usize) -> bool {
        self.policy.can_enter_chapter(&self.reach_view(), index)
    }

    pub fn is_task_reachable(&self, index: usize) -> bool {
        self.policy.can_enter_task(&self.reach_view(), index)
    }

    /// Jump to the first task of a reachable chapter
    pub fn jump_to_chapter(&mut self, index: usize) -> Option<Position> {
        if !self.is_chapter_reachable(index) {
            tracing::trace!(index, "Chapter jump refused");
            return None;
        }
        self.enter_position(index, 0);
        tracing::debug!(chapter = index, "Jumped to chapter");
        Some(self.position())
    }

    /// Jump to a reachable task of the current chapter
    pub fn jump_to_task(&mut self, index: usize) -> Option<Position> {
        if !self.is_task_reachable(index) {
            tracing::trace!(index, "Task jump refused");
            return None;
        }
        let chapter = self.state.chapter_index();
        self.enter_position(chapter, index);
        tracing::debug!(chapter, task = index, "Jumped to task");
        Some(self.position())
    }

    /// Restart the session from scratch, forgetting all progress
    pub fn reset(&mut self) {
        self.state.reset();
        self.enter_position(0, 0);
        tracing::debug!("Progress reset");
    }

    fn enter_position(&mut self, chapter: usize, task: usize) {
        self.state.set_position(chapter, task);
        if self.current_task().is_terminal() {
            self.state.set_feedback(Status::Success, None);
        }
    }

    fn reach_view(&self) -> ReachView {
        let chapter = self.state.chapter_index();
        ReachView {
            chapter_count: self.module.chapter_count(),
            chapter_index: chapter,
            task_count: self.current_chapter().task_count(),
            task_index: self.state.task_index(),
            max_chapter_reached: self.state.max_chapter_reached(),
            max_task_reached: self.state.max_task_reached(chapter),
        }
    }

    // ------------------------------------------------------------------
    // Derived values
    // ------------------------------------------------------------------

    /// Progress through the current chapter, 0-100
    ///
    /// Scoped to the chapter, so it drops when a new chapter begins.
    pub fn progress_percent(&self) -> u8 {
        percent(self.state.task_index() + 1, self.current_chapter().task_count())
    }

    /// Position through the whole module, 0-100
    pub fn module_progress_percent(&self) -> u8 {
        let done = self.module.tasks_before(self.state.chapter_index()) + self.state.task_index() + 1;
        percent(done, self.module.total_task_count())
    }
}

fn percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    (100.0 * part as f64 / whole as f64).round().min(100.0) as u8
}
