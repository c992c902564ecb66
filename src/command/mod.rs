//! Terminal command pipeline
//!
//! Input line -> parse_command -> Command -> CommandExecutor -> ExecutionResult

pub mod executor;
pub mod parser;

pub use executor::{CommandExecutor, ExecutionResult};
pub use parser::{parse_command, Command, CommandError, OptionRef, HELP};
