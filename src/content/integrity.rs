//! Load-time integrity checks for module content
//!
//! The engine assumes well-formed content at runtime. Every loader runs
//! [`check_module`] first so authoring mistakes stop the session from
//! starting instead of surfacing mid-lesson.

use crate::content::chapter::{Interaction, Module};
use crate::content::task::Task;
use crate::core::types::HandleId;
use ahash::AHashSet;
use thiserror::Error;

/// What is wrong with a piece of content
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueKind {
    #[error("module has no chapters")]
    EmptyModule,
    #[error("chapter has no tasks")]
    EmptyChapter,
    #[error("empty {0}")]
    EmptyIdentifier(&'static str),
    #[error("duplicate chapter id")]
    DuplicateChapterId,
    #[error("duplicate task id")]
    DuplicateTaskId,
    #[error("choice task has no options")]
    EmptyOptions,
    #[error("duplicate option '{0}'")]
    DuplicateOption(String),
    #[error("choice task has no correct answers")]
    EmptyCorrectAnswers,
    #[error("correct answer '{0}' listed twice")]
    DuplicateCorrectAnswer(String),
    #[error("correct answer '{0}' is not one of the options")]
    UnknownCorrectAnswer(String),
    #[error("cable-drag target '{0}' is not a handle (expected negative or positive)")]
    NotAHandle(String),
    #[error("click target '{0}' has no hotspot in the scene")]
    UnknownHotspot(String),
    #[error("duplicate hotspot id '{0}'")]
    DuplicateHotspotId(String),
    #[error("hotspot '{0}' has a shape that can never be hit")]
    DegenerateHotspot(String),
    #[error("hotspot scene must have a positive size")]
    InvalidSceneSize,
}

/// A content defect with the chapter/task it was found in
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {kind}", location(.chapter_id, .task_id))]
pub struct ContentIssue {
    pub chapter_id: Option<String>,
    pub task_id: Option<String>,
    pub kind: IssueKind,
}

impl ContentIssue {
    fn module(kind: IssueKind) -> Self {
        Self { chapter_id: None, task_id: None, kind }
    }

    fn chapter(chapter_id: &str, kind: IssueKind) -> Self {
        Self { chapter_id: Some(chapter_id.to_string()), task_id: None, kind }
    }

    fn task(chapter_id: &str, task_id: &str, kind: IssueKind) -> Self {
        Self {
            chapter_id: Some(chapter_id.to_string()),
            task_id: Some(task_id.to_string()),
            kind,
        }
    }
}

/// `chapter 'c', task 't'`, `chapter 'c'` or `module`
fn location(chapter_id: &Option<String>, task_id: &Option<String>) -> String {
    match (chapter_id, task_id) {
        (Some(chapter), Some(task)) => format!("chapter '{}', task '{}'", chapter, task),
        (Some(chapter), None) => format!("chapter '{}'", chapter),
        _ => "module".to_string(),
    }
}

/// Check a module, returning the first defect found
pub fn check_module(module: &Module) -> Result<(), ContentIssue> {
    if module.chapters.is_empty() {
        return Err(ContentIssue::module(IssueKind::EmptyModule));
    }

    if let Some(layer) = &module.hotspots {
        let size_ok = |v: f32| v.is_finite() && v > 0.0;
        if !size_ok(layer.width) || !size_ok(layer.height) {
            return Err(ContentIssue::module(IssueKind::InvalidSceneSize));
        }
        let mut seen = AHashSet::new();
        for hotspot in &layer.hotspots {
            if hotspot.id.is_empty() {
                return Err(ContentIssue::module(IssueKind::EmptyIdentifier("hotspot id")));
            }
            if !seen.insert(hotspot.id.as_str()) {
                return Err(ContentIssue::module(IssueKind::DuplicateHotspotId(hotspot.id.clone())));
            }
            if hotspot.shape.is_degenerate() {
                return Err(ContentIssue::module(IssueKind::DegenerateHotspot(hotspot.id.clone())));
            }
        }
    }

    let mut chapter_ids = AHashSet::new();
    for chapter in &module.chapters {
        if chapter.id.is_empty() {
            return Err(ContentIssue::module(IssueKind::EmptyIdentifier("chapter id")));
        }
        if !chapter_ids.insert(chapter.id.as_str()) {
            return Err(ContentIssue::chapter(&chapter.id, IssueKind::DuplicateChapterId));
        }
        if chapter.tasks.is_empty() {
            return Err(ContentIssue::chapter(&chapter.id, IssueKind::EmptyChapter));
        }

        let mut task_ids = AHashSet::new();
        for task in &chapter.tasks {
            if task.id().is_empty() {
                return Err(ContentIssue::chapter(&chapter.id, IssueKind::EmptyIdentifier("task id")));
            }
            if !task_ids.insert(task.id()) {
                return Err(ContentIssue::task(&chapter.id, task.id(), IssueKind::DuplicateTaskId));
            }
            check_task(module, chapter.interaction, task)
                .map_err(|kind| ContentIssue::task(&chapter.id, task.id(), kind))?;
        }
    }

    Ok(())
}

fn check_task(module: &Module, interaction: Interaction, task: &Task) -> Result<(), IssueKind> {
    match task {
        Task::Click(click) => {
            if click.correct_target.is_empty() {
                return Err(IssueKind::EmptyIdentifier("correct target"));
            }
            match interaction {
                Interaction::CableDrag => {
                    if click.correct_target.parse::<HandleId>().is_err() {
                        return Err(IssueKind::NotAHandle(click.correct_target.clone()));
                    }
                }
                Interaction::Hotspots => {
                    // Without a layer the rendering layer supplies its own targets
                    if let Some(layer) = &module.hotspots {
                        if layer.get(&click.correct_target).is_none() {
                            return Err(IssueKind::UnknownHotspot(click.correct_target.clone()));
                        }
                    }
                }
            }
        }
        Task::Choice(choice) => {
            if choice.options.is_empty() {
                return Err(IssueKind::EmptyOptions);
            }
            let mut options = AHashSet::new();
            for option in &choice.options {
                if !options.insert(option.as_str()) {
                    return Err(IssueKind::DuplicateOption(option.clone()));
                }
            }
            if choice.correct_answers.is_empty() {
                return Err(IssueKind::EmptyCorrectAnswers);
            }
            let mut answers = AHashSet::new();
            for answer in &choice.correct_answers {
                if !options.contains(answer.as_str()) {
                    return Err(IssueKind::UnknownCorrectAnswer(answer.clone()));
                }
                if !answers.insert(answer.as_str()) {
                    return Err(IssueKind::DuplicateCorrectAnswer(answer.clone()));
                }
            }
        }
        Task::Terminal(_) => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::builtin::engine_bay;
    use crate::content::chapter::Chapter;
    use crate::content::task::{ChoiceTask, ClickTask};

    fn click(id: &str, target: &str) -> Task {
        Task::Click(ClickTask {
            id: id.into(),
            instruction: String::new(),
            correct_target: target.into(),
            success_message: String::new(),
            error_message: String::new(),
        })
    }

    fn choice(options: &[&str], answers: &[&str]) -> Task {
        Task::Choice(ChoiceTask {
            id: "q".into(),
            question: String::new(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct_answers: answers.iter().map(|s| s.to_string()).collect(),
            success_message: String::new(),
            error_message: String::new(),
        })
    }

    fn module_with(interaction: Interaction, tasks: Vec<Task>) -> Module {
        Module {
            title: "test".into(),
            chapters: vec![Chapter {
                id: "ch".into(),
                title: "Chapter".into(),
                context: String::new(),
                interaction,
                tasks,
            }],
            hotspots: None,
        }
    }

    #[test]
    fn test_builtin_module_passes() {
        assert_eq!(check_module(&engine_bay()), Ok(()));
    }

    #[test]
    fn test_unknown_correct_answer_reports_location() {
        let module = module_with(Interaction::Hotspots, vec![choice(&["A", "B"], &["A", "Z"])]);
        let issue = check_module(&module).unwrap_err();
        assert_eq!(issue.chapter_id.as_deref(), Some("ch"));
        assert_eq!(issue.task_id.as_deref(), Some("q"));
        assert_eq!(issue.kind, IssueKind::UnknownCorrectAnswer("Z".into()));
        assert_eq!(
            issue.to_string(),
            "chapter 'ch', task 'q': correct answer 'Z' is not one of the options"
        );
    }

    #[test]
    fn test_empty_correct_answers_rejected() {
        let module = module_with(Interaction::Hotspots, vec![choice(&["A"], &[])]);
        assert_eq!(check_module(&module).unwrap_err().kind, IssueKind::EmptyCorrectAnswers);
    }

    #[test]
    fn test_duplicate_option_rejected() {
        let module = module_with(Interaction::Hotspots, vec![choice(&["A", "A"], &["A"])]);
        assert_eq!(
            check_module(&module).unwrap_err().kind,
            IssueKind::DuplicateOption("A".into())
        );
    }

    #[test]
    fn test_empty_click_target_rejected() {
        let module = module_with(Interaction::Hotspots, vec![click("c", "")]);
        assert_eq!(
            check_module(&module).unwrap_err().kind,
            IssueKind::EmptyIdentifier("correct target")
        );
    }

    #[test]
    fn test_cable_drag_targets_must_be_handles() {
        let module = module_with(Interaction::CableDrag, vec![click("c", "battery")]);
        assert_eq!(
            check_module(&module).unwrap_err().kind,
            IssueKind::NotAHandle("battery".into())
        );

        let module = module_with(Interaction::CableDrag, vec![click("c", "negative")]);
        assert!(check_module(&module).is_ok());
    }

    #[test]
    fn test_click_target_must_exist_in_hotspot_layer() {
        let mut module = engine_bay();
        module.chapters[0].tasks[0] = click("step1", "radiator");
        let issue = check_module(&module).unwrap_err();
        assert_eq!(issue.chapter_id.as_deref(), Some("intro"));
        assert_eq!(issue.kind, IssueKind::UnknownHotspot("radiator".into()));
    }

    #[test]
    fn test_duplicate_task_and_chapter_ids_rejected() {
        let module = module_with(Interaction::Hotspots, vec![click("c", "x"), click("c", "y")]);
        assert_eq!(check_module(&module).unwrap_err().kind, IssueKind::DuplicateTaskId);

        let mut module = module_with(Interaction::Hotspots, vec![click("c", "x")]);
        module.chapters.push(module.chapters[0].clone());
        assert_eq!(check_module(&module).unwrap_err().kind, IssueKind::DuplicateChapterId);
    }

    #[test]
    fn test_issue_display_per_location() {
        let issue = ContentIssue::chapter("ch", IssueKind::EmptyChapter);
        assert_eq!(issue.to_string(), "chapter 'ch': chapter has no tasks");
        let issue = ContentIssue::module(IssueKind::EmptyModule);
        assert_eq!(issue.to_string(), "module: module has no chapters");
    }

    #[test]
    fn test_non_finite_scene_size_rejected() {
        let mut module = engine_bay();
        if let Some(layer) = module.hotspots.as_mut() {
            layer.width = f32::NAN;
        }
        assert_eq!(check_module(&module).unwrap_err().kind, IssueKind::InvalidSceneSize);
    }

    #[test]
    fn test_empty_module_and_chapter_rejected() {
        let module = Module { title: "m".into(), chapters: vec![], hotspots: None };
        assert_eq!(check_module(&module).unwrap_err().kind, IssueKind::EmptyModule);

        let module = module_with(Interaction::Hotspots, vec![]);
        assert_eq!(check_module(&module).unwrap_err().kind, IssueKind::EmptyChapter);
    }
}
