//! Task validators - pure answer checks
//!
//! Neither validator normalizes input: identifiers and option texts must
//! match exactly, including case.

use crate::content::task::{ChoiceTask, ClickTask};
use ahash::AHashSet;
use std::hash::Hash;

/// Check a clicked target against the task's single correct target
pub fn click_matches(task: &ClickTask, target_id: &str) -> bool {
    task.correct_target == target_id
}

/// Check a selection against the task's correct answers as sets
///
/// Order never matters and there is no partial credit: a subset or
/// superset of the correct answers is wrong.
pub fn choice_matches<'a, I>(task: &ChoiceTask, selection: I) -> bool
where
    I: IntoIterator<Item = &'a str>,
{
    let selected: AHashSet<&str> = selection.into_iter().collect();
    let correct: AHashSet<&str> = task.correct_answers.iter().map(String::as_str).collect();
    sets_equal(&selected, &correct)
}

fn sets_equal<T: Eq + Hash>(a: &AHashSet<T>, b: &AHashSet<T>) -> bool {
    a.len() == b.len() && a.iter().all(|item| b.contains(item))
}
