//! Command execution - applies parsed commands to a session

use crate::command::parser::{Command, OptionRef};
use crate::drag::DragSignal;
use crate::progression::Verdict;
use crate::session::Session;

/// Applies engine commands to a session
pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute a command, describing what happened
    ///
    /// Display-only commands (`status`, `json`, `help`, `quit`) belong to the
    /// caller and are reported as not applied.
    pub fn execute(session: &mut Session, command: &Command) -> ExecutionResult {
        match command {
            Command::Select(target) => {
                let verdict = session.select_target(target);
                verdict_result(session, verdict)
            }
            Command::ClickAt(point) => {
                let verdict = session.select_at(*point);
                if verdict.is_none() && session.current_task().as_click().is_some() {
                    return ExecutionResult::ignored("Nothing to click there.");
                }
                verdict_result(session, verdict)
            }
            Command::Toggle(option) => {
                let Some(text) = resolve_option(session, option) else {
                    return ExecutionResult::ignored("No such option.");
                };
                match session.toggle_choice(&text) {
                    Some(true) => ExecutionResult::applied(format!("[x] {}", text)),
                    Some(false) => ExecutionResult::applied(format!("[ ] {}", text)),
                    None => ExecutionResult::ignored("Options cannot be changed now."),
                }
            }
            Command::Submit => {
                let verdict = session.submit_choice();
                verdict_result(session, verdict)
            }
            Command::Next => match session.advance() {
                Some(position) => ExecutionResult::applied(format!(
                    "Chapter {}, task {}.",
                    position.chapter + 1,
                    position.task + 1
                )),
                None if session.is_complete() => {
                    ExecutionResult::ignored("The module is finished. Type 'reset' to start over.")
                }
                None => ExecutionResult::ignored("Complete this task first."),
            },
            Command::Reset => {
                session.reset();
                ExecutionResult::applied("Module restarted.".to_string())
            }
            Command::Chapter(index) => match session.jump_to_chapter(*index) {
                Some(_) => ExecutionResult::applied(format!("Chapter {}.", index + 1)),
                None => ExecutionResult::ignored("That chapter is locked."),
            },
            Command::Task(index) => match session.jump_to_task(*index) {
                Some(_) => ExecutionResult::applied(format!("Task {}.", index + 1)),
                None => ExecutionResult::ignored("That task is locked."),
            },
            Command::Grab(handle) => {
                if session.cable().is_none() {
                    return ExecutionResult::ignored("There is no cable to grab here.");
                }
                let signal = session.begin_drag(*handle);
                let held = session.cable().and_then(|scene| scene.dragging()) == Some(*handle);
                match (signal, held) {
                    (Some(DragSignal::WrongHandle(_)), _) => feedback(session),
                    (_, true) => ExecutionResult::applied(format!("Holding the {} clamp.", handle)),
                    _ => ExecutionResult::ignored("That clamp cannot be moved now."),
                }
            }
            Command::Move(point) => {
                let Some(scene) = session.cable() else {
                    return ExecutionResult::ignored("There is no cable to drag here.");
                };
                let Some(handle) = scene.dragging() else {
                    return ExecutionResult::ignored("Grab a clamp first.");
                };
                match session.move_drag(*point) {
                    Some(DragSignal::Disconnected(_)) => feedback(session),
                    _ => {
                        let offset = session
                            .cable()
                            .map(|scene| scene.handle(handle).offset())
                            .unwrap_or_default();
                        ExecutionResult::applied(format!(
                            "The {} clamp is {:.0} units from its terminal.",
                            handle, offset
                        ))
                    }
                }
            }
            Command::Release => match session.end_drag() {
                Some(handle) => ExecutionResult::applied(format!("Released the {} clamp.", handle)),
                None => ExecutionResult::ignored("You are not holding a clamp."),
            },
            Command::Status | Command::Json | Command::Help | Command::Quit => ExecutionResult {
                applied: false,
                summary: String::new(),
            },
        }
    }
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    /// The session changed
    pub applied: bool,
    pub summary: String,
}

impl ExecutionResult {
    fn applied(summary: String) -> Self {
        Self { applied: true, summary }
    }

    fn ignored(summary: &str) -> Self {
        Self { applied: false, summary: summary.to_string() }
    }
}

fn verdict_result(session: &Session, verdict: Option<Verdict>) -> ExecutionResult {
    match verdict {
        Some(_) => feedback(session),
        None if session.status().is_success() => {
            ExecutionResult::ignored("Already done. Type 'next' to continue.")
        }
        None => ExecutionResult::ignored("That does not apply to this task."),
    }
}

/// The task's feedback banner
fn feedback(session: &Session) -> ExecutionResult {
    let title = if session.status().is_success() { "Well done." } else { "Try again." };
    let summary = match session.message() {
        Some(message) => format!("{} {}", title, message),
        None => title.to_string(),
    };
    ExecutionResult::applied(summary)
}

fn resolve_option(session: &Session, option: &OptionRef) -> Option<String> {
    let task = session.current_task().as_choice()?;
    match option {
        OptionRef::Index(i) => task.options.get(*i).cloned(),
        OptionRef::Text(text) => task.option_index(text).map(|_| text.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parser::parse_command;
    use crate::content::builtin::engine_bay;
    use crate::core::config::PlayerConfig;
    use std::sync::Arc;

    fn run(session: &mut Session, line: &str) -> ExecutionResult {
        let command = parse_command(line).unwrap();
        CommandExecutor::execute(session, &command)
    }

    fn session() -> Session {
        Session::new(Arc::new(engine_bay()), PlayerConfig::default()).unwrap()
    }

    #[test]
    fn test_select_reports_feedback() {
        let mut s = session();
        let result = run(&mut s, "select engine");
        assert!(result.applied);
        assert_eq!(result.summary, "Try again. That is not the battery. Try again.");

        let result = run(&mut s, "select battery");
        assert_eq!(result.summary, "Well done. Correct! That is the battery.");

        let result = run(&mut s, "select battery");
        assert!(!result.applied);
    }

    #[test]
    fn test_next_before_success_is_refused() {
        let mut s = session();
        let result = run(&mut s, "next");
        assert!(!result.applied);
        assert_eq!(result.summary, "Complete this task first.");
    }

    #[test]
    fn test_toggle_by_number() {
        let mut s = session();
        run(&mut s, "select battery");
        run(&mut s, "next");
        run(&mut s, "select engine");
        run(&mut s, "next");

        let result = run(&mut s, "toggle 3");
        assert_eq!(result.summary, "[x] Wear appropriate eye protection.");
        let result = run(&mut s, "toggle 9");
        assert!(!result.applied);
    }

    #[test]
    fn test_locked_chapter_refused() {
        let mut s = session();
        let result = run(&mut s, "chapter 3");
        assert_eq!(result.summary, "That chapter is locked.");
    }

    #[test]
    fn test_grab_outside_cable_chapter() {
        let mut s = session();
        let result = run(&mut s, "grab negative");
        assert!(!result.applied);
    }

    #[test]
    fn test_status_is_left_to_caller() {
        let mut s = session();
        let revision = s.revision();
        let result = run(&mut s, "status");
        assert!(!result.applied);
        assert_eq!(s.revision(), revision);
    }
}
