//! Progression - chapter/task position, feedback and locked navigation

pub mod machine;
pub mod navigation;
pub mod state;

pub use machine::{Position, ProgressionMachine, Verdict};
pub use navigation::{
    LockedNavigation, NavigationMode, NavigationPolicy, ReachView, UnlockedNavigation,
};
pub use state::ProgressionState;
