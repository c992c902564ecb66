//! Player configuration with documented constants
//!
//! All tunable numbers of the engine are collected here. Every field has a
//! default matching the bundled engine-bay scene, so a config file only
//! needs to name what it overrides.

use crate::core::error::{PlayerError, Result};
use crate::core::types::HandleId;
use crate::progression::NavigationMode;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a player session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Which steps the learner may jump to
    ///
    /// `Locked` only allows steps up to the furthest one reached.
    /// `Unlocked` allows any existing step.
    pub navigation: NavigationMode,

    /// Geometry of the cable-disconnect scene
    pub drag: DragConfig,

    /// Maximum number of undrained session events kept
    ///
    /// When full, the oldest event is dropped. Pollers that drain at least
    /// once per input never lose events.
    pub event_log_capacity: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationMode::Locked,
            drag: DragConfig::default(),
            event_log_capacity: 64,
        }
    }
}

/// Geometry of the cable-disconnect scene, in scene units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Width and height of the scene; clamps never leave `[0, viewport]`
    pub viewport: Vec2,

    /// Distance from the terminal at which a clamp counts as disconnected
    ///
    /// The comparison is inclusive: a clamp exactly this far away is off.
    pub disconnect_distance: f32,

    pub negative: HandleConfig,
    pub positive: HandleConfig,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            viewport: Vec2::new(800.0, 569.0),
            disconnect_distance: 90.0,
            negative: HandleConfig {
                terminal: Vec2::new(280.0, 150.0),
                anchor: Vec2::new(0.0, 700.0),
            },
            positive: HandleConfig {
                terminal: Vec2::new(580.0, 90.0),
                anchor: Vec2::new(800.0, 800.0),
            },
        }
    }
}

impl DragConfig {
    pub fn handle(&self, id: HandleId) -> &HandleConfig {
        match id {
            HandleId::Negative => &self.negative,
            HandleId::Positive => &self.positive,
        }
    }
}

/// Fixed points of one cable
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleConfig {
    /// Resting position of the clamp while attached
    pub terminal: Vec2,
    /// Off-scene origin the cable is drawn from
    pub anchor: Vec2,
}

impl PlayerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PlayerConfig = toml::from_str(content)?;
        config.validate().map_err(PlayerError::InvalidConfig)?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        let drag = &self.drag;

        if !positive(drag.viewport.x) || !positive(drag.viewport.y) {
            return Err(format!(
                "drag.viewport must be positive, got [{}, {}]",
                drag.viewport.x, drag.viewport.y
            ));
        }

        if !positive(drag.disconnect_distance) {
            return Err(format!(
                "drag.disconnect_distance ({}) must be positive",
                drag.disconnect_distance
            ));
        }

        // Terminals must sit inside the scene or the clamp could never rest there
        for id in HandleId::ALL {
            let terminal = drag.handle(id).terminal;
            let inside = terminal.is_finite()
                && terminal.x >= 0.0
                && terminal.y >= 0.0
                && terminal.x <= drag.viewport.x
                && terminal.y <= drag.viewport.y;
            if !inside {
                return Err(format!(
                    "drag.{}.terminal [{}, {}] lies outside the viewport",
                    id, terminal.x, terminal.y
                ));
            }
        }

        if self.event_log_capacity == 0 {
            return Err("event_log_capacity must be at least 1".into());
        }

        Ok(())
    }
}

/// Finite and strictly greater than zero
fn positive(value: f32) -> bool {
    value.is_finite() && value > 0.0
}
