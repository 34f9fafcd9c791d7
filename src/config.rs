//! Scene configuration: layout constants, default styles, and capability flags.
//!
//! Every field has a default matching the stock editor page, so a host only
//! has to supply the keys it wants to change:
//!
//! ```json
//! { "layout": { "baseline_y": 80 }, "capabilities": { "balls": false } }
//! ```
//!
//! The page variants that only display letters, and the ones that add balls,
//! are all expressed through [`Capabilities`] on the same engine.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BASELINE_Y, DEFAULT_BALL_SIZE, DEFAULT_COLOR, DEFAULT_FONT_SIZE, DEFAULT_ROTATION, FALLBACK_VIEWPORT_HEIGHT,
    FALLBACK_VIEWPORT_WIDTH, LETTER_STEP_X, ROW_LEFT_MARGIN, ROW_STEP_Y,
};
use crate::doc::{FontFamily, is_hex_color};
use crate::input::DragPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Row placement for submitted text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// X of the first letter in every row.
    pub left_margin: f64,
    /// Horizontal distance between letters.
    pub step_x: f64,
    /// Y of the first row on an empty scene.
    pub baseline_y: f64,
    /// Gap between the lowest element and the next row.
    pub row_step_y: f64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            left_margin: ROW_LEFT_MARGIN,
            step_x: LETTER_STEP_X,
            baseline_y: BASELINE_Y,
            row_step_y: ROW_STEP_Y,
        }
    }
}

/// Style given to freshly created letters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterDefaults {
    pub font_size: f64,
    pub color: String,
    pub font_family: FontFamily,
    pub rotation: f64,
}

impl Default for LetterDefaults {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            color: DEFAULT_COLOR.to_owned(),
            font_family: FontFamily::Arial,
            rotation: DEFAULT_ROTATION,
        }
    }
}

/// Feature flags distinguishing the editor page variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Selection, dragging and property edits. Off for read-only displays.
    pub editing: bool,
    /// Whether `add_ball` is available.
    pub balls: bool,
    /// How a pointer-down on an unselected element behaves.
    pub drag_policy: DragPolicy,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            editing: true,
            balls: true,
            drag_policy: DragPolicy::SelectFirst,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub layout: Layout,
    pub letter: LetterDefaults,
    /// Diameter substituted when `add_ball` gets an unusable size.
    pub ball_size: f64,
    /// Canvas width assumed until the host calls `set_viewport`.
    pub viewport_width: f64,
    /// Canvas height assumed until the host calls `set_viewport`.
    pub viewport_height: f64,
    pub capabilities: Capabilities,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            letter: LetterDefaults::default(),
            ball_size: DEFAULT_BALL_SIZE,
            viewport_width: FALLBACK_VIEWPORT_WIDTH,
            viewport_height: FALLBACK_VIEWPORT_HEIGHT,
            capabilities: Capabilities::default(),
        }
    }
}

impl SceneConfig {
    /// Parse a JSON config handed over by the host and validate it.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce an unusable scene.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_positive(self.layout.step_x) {
            return Err(ConfigError::Invalid { field: "layout.step_x", reason: "must be positive" });
        }
        if !self.layout.row_step_y.is_finite() {
            return Err(ConfigError::Invalid { field: "layout.row_step_y", reason: "must be finite" });
        }
        if !self.layout.left_margin.is_finite() || !self.layout.baseline_y.is_finite() {
            return Err(ConfigError::Invalid { field: "layout", reason: "origin must be finite" });
        }
        if !is_positive(self.letter.font_size) {
            return Err(ConfigError::Invalid { field: "letter.font_size", reason: "must be positive" });
        }
        if !is_hex_color(&self.letter.color) {
            return Err(ConfigError::Invalid { field: "letter.color", reason: "expected #RRGGBB" });
        }
        if !is_positive(self.ball_size) {
            return Err(ConfigError::Invalid { field: "ball_size", reason: "must be positive" });
        }
        if !is_positive(self.viewport_width) || !is_positive(self.viewport_height) {
            return Err(ConfigError::Invalid { field: "viewport", reason: "must be positive" });
        }
        Ok(())
    }
}

pub(crate) fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
