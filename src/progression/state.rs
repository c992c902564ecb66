//! Mutable, session-scoped progression state

use crate::core::types::Status;
use ahash::AHashSet;

/// Position, feedback, selection and watermarks of one learner
///
/// Only the progression machine mutates this; everything else reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressionState {
    chapter_index: usize,
    task_index: usize,
    status: Status,
    message: Option<String>,
    /// Meaningful only while the current task is a choice task
    selected: AHashSet<String>,
    max_chapter_reached: usize,
    /// Indexed by chapter; never decreases except on reset
    max_task_reached: Vec<usize>,
}

impl ProgressionState {
    pub fn new(chapter_count: usize) -> Self {
        Self {
            chapter_index: 0,
            task_index: 0,
            status: Status::Idle,
            message: None,
            selected: AHashSet::new(),
            max_chapter_reached: 0,
            max_task_reached: vec![0; chapter_count],
        }
    }

    pub fn chapter_index(&self) -> usize {
        self.chapter_index
    }

    pub fn task_index(&self) -> usize {
        self.task_index
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn selected(&self) -> &AHashSet<String> {
        &self.selected
    }

    pub fn is_selected(&self, option: &str) -> bool {
        self.selected.contains(option)
    }

    pub fn max_chapter_reached(&self) -> usize {
        self.max_chapter_reached
    }

    pub fn max_task_reached(&self, chapter: usize) -> usize {
        self.max_task_reached.get(chapter).copied().unwrap_or(0)
    }

    /// Move to a position, dropping feedback and selection
    pub(crate) fn set_position(&mut self, chapter: usize, task: usize) {
        self.chapter_index = chapter;
        self.task_index = task;
        self.selected.clear();
        self.clear_feedback();
    }

    pub(crate) fn set_feedback(&mut self, status: Status, message: Option<String>) {
        self.status = status;
        self.message = message;
    }

    pub(crate) fn clear_feedback(&mut self) {
        self.set_feedback(Status::Idle, None);
    }

    /// Flip membership of an option; returns whether it is now selected
    pub(crate) fn toggle(&mut self, option: &str) -> bool {
        if self.selected.remove(option) {
            false
        } else {
            self.selected.insert(option.to_string());
            true
        }
    }

    /// Raise a chapter's task watermark to include `task`
    pub(crate) fn reach_task(&mut self, chapter: usize, task: usize) {
        if let Some(mark) = self.max_task_reached.get_mut(chapter) {
            *mark = (*mark).max(task);
        }
    }

    /// Raise the chapter watermark and open the chapter's first task
    pub(crate) fn reach_chapter(&mut self, chapter: usize) {
        self.max_chapter_reached = self.max_chapter_reached.max(chapter);
        self.reach_task(chapter, 0);
    }

    /// Full session restart
    pub(crate) fn reset(&mut self) {
        let chapter_count = self.max_task_reached.len();
        *self = Self::new(chapter_count);
    }
}
