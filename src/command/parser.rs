//! Parse player commands typed at the terminal

use crate::core::types::HandleId;
use glam::Vec2;
use thiserror::Error;

/// A command typed by the learner
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Answer a click task with a target id
    Select(String),
    /// Click a scene point
    ClickAt(Vec2),
    Toggle(OptionRef),
    Submit,
    Next,
    Reset,
    /// 0-based chapter index
    Chapter(usize),
    /// 0-based task index within the current chapter
    Task(usize),
    Grab(HandleId),
    Move(Vec2),
    Release,
    Status,
    Json,
    Help,
    Quit,
}

/// How a choice option was named
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionRef {
    /// 0-based position in the option list
    Index(usize),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error("step numbers start at 1")]
    ZeroStep,
    #[error("{0}")]
    InvalidHandle(String),
}

pub const HELP: &str = "\
Commands:
  select <id>          - Answer a click task with a target id
  click <x> <y>        - Click a point of the scene
  toggle <n|text>      - Toggle a choice option (by number or exact text)
  submit               - Check the selected options
  next / n             - Go to the next task
  reset                - Start the module over
  chapter <n>          - Jump to chapter n
  task <n>             - Jump to task n of this chapter
  grab <negative|positive>
                       - Press on a cable clamp
  move <x> <y>         - Drag the held clamp to a point
  release              - Let go of the clamp
  status / s           - Show the current task
  json                 - Print the session snapshot as JSON
  help                 - Show this help
  quit / q             - Exit";

/// Parse one input line
pub fn parse_command(input: &str) -> Result<Command, CommandError> {
    let input = input.trim();
    let (word, rest) = match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (input, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "select" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("select <id>"));
            }
            Ok(Command::Select(rest.to_string()))
        }
        "click" => Ok(Command::ClickAt(parse_point(rest, "click <x> <y>")?)),
        "toggle" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("toggle <n|text>"));
            }
            match rest.parse::<usize>() {
                Ok(n) => Ok(Command::Toggle(OptionRef::Index(step_index(n)?))),
                Err(_) => Ok(Command::Toggle(OptionRef::Text(rest.to_string()))),
            }
        }
        "submit" | "check" => Ok(Command::Submit),
        "next" | "n" => Ok(Command::Next),
        "reset" => Ok(Command::Reset),
        "chapter" => Ok(Command::Chapter(parse_step(rest, "chapter <n>")?)),
        "task" => Ok(Command::Task(parse_step(rest, "task <n>")?)),
        "grab" => {
            if rest.is_empty() {
                return Err(CommandError::Usage("grab <negative|positive>"));
            }
            let handle = rest
                .to_ascii_lowercase()
                .parse::<HandleId>()
                .map_err(CommandError::InvalidHandle)?;
            Ok(Command::Grab(handle))
        }
        "move" => Ok(Command::Move(parse_point(rest, "move <x> <y>")?)),
        "release" => Ok(Command::Release),
        "status" | "s" => Ok(Command::Status),
        "json" => Ok(Command::Json),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

fn parse_step(rest: &str, usage: &'static str) -> Result<usize, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::Usage(usage));
    }
    let n = rest
        .parse::<usize>()
        .map_err(|_| CommandError::InvalidNumber(rest.to_string()))?;
    step_index(n)
}

/// Convert a 1-based step number to an index
fn step_index(n: usize) -> Result<usize, CommandError> {
    n.checked_sub(1).ok_or(CommandError::ZeroStep)
}

fn parse_point(rest: &str, usage: &'static str) -> Result<Vec2, CommandError> {
    let mut parts = rest.split_whitespace();
    let (Some(x), Some(y), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandError::Usage(usage));
    };
    let x = x
        .parse::<f32>()
        .map_err(|_| CommandError::InvalidNumber(x.to_string()))?;
    let y = y
        .parse::<f32>()
        .map_err(|_| CommandError::InvalidNumber(y.to_string()))?;
    Ok(Vec2::new(x, y))
}
