//! Module Player - interactive step-by-step tutorial engine
//!
//! Chapters of click, multiple-choice and cable-drag tasks, with answer
//! validation, locked navigation and a polling session boundary for the
//! rendering layer.

pub mod command;
pub mod content;
pub mod core;
pub mod drag;
pub mod hotspot;
pub mod progression;
pub mod session;
pub mod validation;
