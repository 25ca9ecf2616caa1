//! TOML input scripts for the simulator.
//!
//! A script is a list of steps, each holding the stick and button levels for a
//! duration. Script time starts at the first button poll, which is the first
//! controller tick after calibration.
//!
//! ```toml
//! rest = [2048, 2048]
//!
//! [[step]]
//! duration_ms = 300
//! x = 2600
//! buttons = ["draw"]
//! ```

use crate::input::ButtonLevels;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Button names accepted in scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptButton {
    Draw,
    Tool,
    Undo,
    Wheel,
}

/// One segment of scripted input.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptStep {
    /// How long these levels are held
    pub duration_ms: u64,
    /// Raw X reading; the rest position when omitted
    #[serde(default)]
    pub x: Option<u16>,
    /// Raw Y reading; the rest position when omitted
    #[serde(default)]
    pub y: Option<u16>,
    /// Buttons held during the step
    #[serde(default)]
    pub buttons: Vec<ScriptButton>,
}

/// Stick and button levels at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputFrame {
    pub x: u16,
    pub y: u16,
    pub levels: ButtonLevels,
}

impl InputFrame {
    /// Stick at `rest`, nothing pressed.
    pub fn at_rest(rest: [u16; 2]) -> Self {
        Self {
            x: rest[0],
            y: rest[1],
            levels: ButtonLevels::default(),
        }
    }
}

/// A full simulated session.
#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    /// Stick rest readings, also reported during calibration
    #[serde(default = "default_rest")]
    pub rest: [u16; 2],

    /// Script time after which every peripheral read fails
    #[serde(default)]
    pub fail_at_ms: Option<u64>,

    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
}

fn default_rest() -> [u16; 2] {
    [2048, 2048]
}

impl Script {
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse input script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Total scripted time.
    pub fn total_ms(&self) -> u64 {
        self.steps
            .iter()
            .fold(0u64, |total, step| total.saturating_add(step.duration_ms))
    }

    /// Levels at `elapsed_ms` into the script; at rest once the script ends.
    pub fn frame_at(&self, elapsed_ms: u64) -> InputFrame {
        let mut start: u64 = 0;
        for step in &self.steps {
            let end = start.saturating_add(step.duration_ms);
            if elapsed_ms < end {
                return self.frame_for(step);
            }
            start = end;
        }
        InputFrame::at_rest(self.rest)
    }

    fn frame_for(&self, step: &ScriptStep) -> InputFrame {
        let mut levels = ButtonLevels::default();
        for button in &step.buttons {
            match button {
                ScriptButton::Draw => levels.draw = true,
                ScriptButton::Tool => levels.tool = true,
                ScriptButton::Undo => levels.undo = true,
                ScriptButton::Wheel => levels.wheel = true,
            }
        }
        InputFrame {
            x: step.x.unwrap_or(self.rest[0]),
            y: step.y.unwrap_or(self.rest[1]),
            levels,
        }
    }
}
