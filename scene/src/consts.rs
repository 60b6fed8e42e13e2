//! Shared constants for the scene crate.

// ── Canvas ──────────────────────────────────────────────────────

/// Logical canvas width. Pinterest pins use a 2:3 aspect ratio.
pub const CANVAS_WIDTH: f64 = 1000.0;

/// Logical canvas height.
pub const CANVAS_HEIGHT: f64 = 1500.0;

/// Flat background color of a fresh scene.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Title given to a template created from the dashboard.
pub const NEW_TEMPLATE_TITLE: &str = "New Template";

// ── New objects ─────────────────────────────────────────────────

/// Where newly added objects land when no explicit position is given.
pub const DEFAULT_POSITION_X: f64 = 50.0;
pub const DEFAULT_POSITION_Y: f64 = 50.0;

pub const DEFAULT_FILL: &str = "#000000";
pub const DEFAULT_STROKE: &str = "#000000";

pub const DEFAULT_TEXT: &str = "Click to edit";
pub const DEFAULT_FONT_FAMILY: &str = "Arial";
pub const DEFAULT_FONT_SIZE: u32 = 24;

pub const DEFAULT_RECT_SIZE: f64 = 100.0;
pub const DEFAULT_CIRCLE_RADIUS: f64 = 50.0;

/// Horizontal extent of a default line, measured from its start point.
pub const DEFAULT_LINE_LENGTH: f64 = 150.0;
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

// ── Images ──────────────────────────────────────────────────────

/// Cap for the larger side of a dropped foreground image after scaling.
pub const IMAGE_MAX_DIMENSION: f64 = 400.0;

// ── Closed sets offered by the text panel ───────────────────────

pub const FONT_FAMILIES: [&str; 7] = ["Arial", "Helvetica", "Times New Roman", "Roboto", "Open Sans", "Lato", "Montserrat"];

pub const FONT_SIZES: [u32; 13] = [12, 14, 16, 18, 20, 24, 28, 32, 36, 48, 64, 72, 96];
