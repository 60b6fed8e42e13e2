//! Placement math for images dropped onto the canvas.
//!
//! Foreground images are *fit*: the larger side is mapped to a fixed cap and
//! the aspect ratio is kept. Background images are *cover*: scaled until both
//! sides reach the canvas edges, cropping whatever overflows. Either way the
//! scaled image is centered on the canvas.

#[cfg(test)]
#[path = "scale_test.rs"]
mod scale_test;

use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::doc::Point;

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ScaleError {
    #[error("degenerate dimensions {width}x{height}")]
    Degenerate { width: f64, height: f64 },
}

/// Size of the logical canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self { width: CANVAS_WIDTH, height: CANVAS_HEIGHT }
    }
}

/// Result of scaling and centering an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f64,
    /// Left edge of the scaled image.
    pub x: f64,
    /// Top edge of the scaled image.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

fn check(width: f64, height: f64) -> Result<(), ScaleError> {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if valid(width) && valid(height) {
        Ok(())
    } else {
        Err(ScaleError::Degenerate { width, height })
    }
}

/// Uniform scale that maps the larger of `width`/`height` onto `max_dimension`.
///
/// # Errors
///
/// Returns `Degenerate` for zero, negative, or non-finite inputs.
pub fn fit_scale(width: f64, height: f64, max_dimension: f64) -> Result<f64, ScaleError> {
    check(width, height)?;
    check(max_dimension, max_dimension)?;
    Ok(max_dimension / width.max(height))
}

/// Uniform scale that makes `width`x`height` fully cover `canvas`.
///
/// # Errors
///
/// Returns `Degenerate` for zero, negative, or non-finite inputs.
pub fn cover_scale(width: f64, height: f64, canvas: CanvasSize) -> Result<f64, ScaleError> {
    check(width, height)?;
    check(canvas.width, canvas.height)?;
    Ok((canvas.width / width).max(canvas.height / height))
}

/// Top-left corner that centers a box of the given size on `canvas`.
#[must_use]
pub fn centered(width: f64, height: f64, canvas: CanvasSize) -> Point {
    Point::new((canvas.width - width) / 2.0, (canvas.height - height) / 2.0)
}

fn place(width: f64, height: f64, scale: f64, canvas: CanvasSize) -> Placement {
    let scaled_width = width * scale;
    let scaled_height = height * scale;
    let at = centered(scaled_width, scaled_height, canvas);
    Placement { scale, x: at.x, y: at.y, width: scaled_width, height: scaled_height }
}

/// Fit-scale and center a foreground image.
///
/// # Errors
///
/// Returns `Degenerate` for zero, negative, or non-finite inputs.
pub fn fit_placement(width: f64, height: f64, max_dimension: f64, canvas: CanvasSize) -> Result<Placement, ScaleError> {
    let scale = fit_scale(width, height, max_dimension)?;
    Ok(place(width, height, scale, canvas))
}

/// Cover-scale and center a background image.
///
/// # Errors
///
/// Returns `Degenerate` for zero, negative, or non-finite inputs.
pub fn cover_placement(width: f64, height: f64, canvas: CanvasSize) -> Result<Placement, ScaleError> {
    let scale = cover_scale(width, height, canvas)?;
    Ok(place(width, height, scale, canvas))
}
