//! Navigation policies - which steps the learner may jump to
//!
//! The policy only answers reachability questions; the machine applies the
//! jump. Swapping policies changes nothing else about progression.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Read-only view of the position and watermarks a policy decides on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReachView {
    pub chapter_count: usize,
    pub chapter_index: usize,
    pub task_count: usize,
    pub task_index: usize,
    /// Highest chapter index ever visited
    pub max_chapter_reached: usize,
    /// Highest task index reached in the current chapter
    pub max_task_reached: usize,
}

/// Decides whether a jump target is reachable
pub trait NavigationPolicy: fmt::Debug + Send + Sync {
    fn can_enter_chapter(&self, view: &ReachView, target: usize) -> bool;

    /// `target` indexes tasks of the current chapter
    fn can_enter_task(&self, view: &ReachView, target: usize) -> bool;
}

/// Only steps up to the furthest one reached
#[derive(Debug, Clone, Copy, Default)]
pub struct LockedNavigation;

impl NavigationPolicy for LockedNavigation {
    fn can_enter_chapter(&self, view: &ReachView, target: usize) -> bool {
        target < view.chapter_count && target <= view.max_chapter_reached
    }

    fn can_enter_task(&self, view: &ReachView, target: usize) -> bool {
        target < view.task_count && target <= view.max_task_reached.max(view.task_index)
    }
}

/// Any existing step
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlockedNavigation;

impl NavigationPolicy for UnlockedNavigation {
    fn can_enter_chapter(&self, view: &ReachView, target: usize) -> bool {
        target < view.chapter_count
    }

    fn can_enter_task(&self, view: &ReachView, target: usize) -> bool {
        target < view.task_count
    }
}

/// Configuration switch between the built-in policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    #[default]
    Locked,
    Unlocked,
}

impl NavigationMode {
    pub fn policy(self) -> Box<dyn NavigationPolicy> {
        match self {
            NavigationMode::Locked => Box::new(LockedNavigation),
            NavigationMode::Unlocked => Box::new(UnlockedNavigation),
        }
    }
}
