//! Shared numeric and style constants for the letterboard crate.

// ── Text layout ─────────────────────────────────────────────────

/// X coordinate of the first letter in a submitted row.
pub const ROW_LEFT_MARGIN: f64 = 100.0;

/// Horizontal distance between consecutive letters in a row.
pub const LETTER_STEP_X: f64 = 50.0;

/// Y coordinate of the first row on an empty scene.
pub const BASELINE_Y: f64 = 150.0;

/// Vertical distance between a new row and the lowest existing element.
pub const ROW_STEP_Y: f64 = 60.0;

// ── Letter defaults ─────────────────────────────────────────────

pub const DEFAULT_FONT_SIZE: f64 = 36.0;
pub const DEFAULT_COLOR: &str = "#ffffff";
pub const DEFAULT_ROTATION: f64 = 0.0;

// ── Property panel bounds ───────────────────────────────────────

pub const MIN_FONT_SIZE: f64 = 10.0;
pub const MAX_FONT_SIZE: f64 = 100.0;
pub const MIN_ROTATION: f64 = 0.0;
pub const MAX_ROTATION: f64 = 360.0;

// ── Balls ───────────────────────────────────────────────────────

/// Diameter used when `add_ball` receives an unusable size.
pub const DEFAULT_BALL_SIZE: f64 = 40.0;

/// Canvas size assumed until the host reports a real viewport.
pub const FALLBACK_VIEWPORT_WIDTH: f64 = 800.0;
pub const FALLBACK_VIEWPORT_HEIGHT: f64 = 600.0;

// ── Quick text ──────────────────────────────────────────────────

/// One-click suggestions shown next to the text input.
pub const QUICK_TEXTS: [&str; 5] = ["Hello", "Hi", "Music", "UnisonX", "♪ ♫ ♬"];
