//! Module Player - Entry Point
//!
//! Plays a tutorial module in the terminal. Each line of input is parsed
//! into a command and applied to a session; the current task is shown
//! after every change.

use module_player::command::{parse_command, Command, CommandExecutor, HELP};
use module_player::content::{engine_bay, Module, Task};
use module_player::core::config::PlayerConfig;
use module_player::core::error::Result;
use module_player::progression::NavigationMode;
use module_player::session::Session;

use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Module Player - interactive step-by-step tutorials
#[derive(Parser, Debug)]
#[command(name = "module-player")]
#[command(about = "Play an interactive tutorial module in the terminal")]
struct Args {
    /// Module content file (.toml or .json); the built-in engine bay module otherwise
    #[arg(long)]
    content: Option<PathBuf>,

    /// Player configuration file (.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Allow jumping to any chapter or task
    #[arg(long, default_value_t = false)]
    unlocked: bool,

    /// Print the session snapshot as JSON after every applied command
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("module_player=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let module = match &args.content {
        Some(path) => Module::load(path)?,
        None => engine_bay(),
    };
    let mut config = match &args.config {
        Some(path) => PlayerConfig::load(path)?,
        None => PlayerConfig::default(),
    };
    if args.unlocked {
        config.navigation = NavigationMode::Unlocked;
    }

    let mut session = Session::new(Arc::new(module), config)?;

    println!("\n=== {} ===", session.module().title);
    println!("Type 'help' for commands.");
    display_status(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Status => display_detailed_status(&session),
            Command::Json => print_snapshot(&session)?,
            command => {
                let result = CommandExecutor::execute(&mut session, &command);
                if !result.summary.is_empty() {
                    println!("{}", result.summary);
                }
                for event in session.drain_events() {
                    tracing::debug!(?event, "Session event");
                }
                if result.applied {
                    if args.json {
                        print_snapshot(&session)?;
                    } else {
                        display_status(&session);
                    }
                }
            }
        }
    }

    tracing::info!(session = %session.id(), "Player exiting");
    Ok(())
}

fn print_snapshot(session: &Session) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
    Ok(())
}

/// Display the current task
fn display_status(session: &Session) {
    let position = session.position();
    let chapter = session.current_chapter();

    println!();
    println!(
        "--- Chapter {}/{}: {} | Task {}/{} | {}% ---",
        position.chapter + 1,
        session.module().chapter_count(),
        chapter.title,
        position.task + 1,
        chapter.task_count(),
        session.progress_percent()
    );

    match session.current_task() {
        Task::Click(task) => {
            println!("  {}", task.instruction);
            if let Some(scene) = session.cable() {
                for handle in scene.handles() {
                    let state = if handle.disconnected { "disconnected" } else { "connected" };
                    println!(
                        "  [{}] {} at ({:.0}, {:.0}), {:.0} from terminal",
                        handle.id,
                        state,
                        handle.position.x,
                        handle.position.y,
                        handle.offset()
                    );
                }
            }
        }
        Task::Choice(task) => {
            println!("  {}", task.question);
            let selected = session.selected_options();
            for (i, option) in task.options.iter().enumerate() {
                let mark = if selected.contains(option) { "x" } else { " " };
                println!("  {}. [{}] {}", i + 1, mark, option);
            }
        }
        Task::Terminal(task) => {
            println!("  {}", task.title);
            println!("  {}", task.body);
        }
    }

    if session.can_advance() {
        println!("  Type 'next' to continue.");
    } else if session.is_complete() {
        println!("  Module complete.");
    }
    println!();
}

/// Display chapter context, reachability and overall progress
fn display_detailed_status(session: &Session) {
    let module = session.module();
    let position = session.position();

    println!();
    println!("=== {} ===", module.title);
    println!("Overall progress: {}%", session.module_progress_percent());
    println!();

    for (i, chapter) in module.chapters.iter().enumerate() {
        let marker = if i == position.chapter {
            ">"
        } else if session.is_chapter_reachable(i) {
            " "
        } else {
            "#"
        };
        println!("{} {}. {}", marker, i + 1, chapter.title);
    }

    let chapter = session.current_chapter();
    println!();
    println!("{}", chapter.context);
    let tasks: Vec<String> = (0..chapter.task_count())
        .map(|i| {
            if i == position.task {
                format!("[{}]", i + 1)
            } else if session.is_task_reachable(i) {
                format!("{}", i + 1)
            } else {
                "#".to_string()
            }
        })
        .collect();
    println!("Tasks: {}", tasks.join(" "));
    println!("Status: {:?}", session.status());
    if let Some(message) = session.message() {
        println!("{}", message);
    }
    println!();
}
