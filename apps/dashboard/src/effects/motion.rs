//! Scroll parallax, hero float and card tilt transforms.

use super::geometry::{Point, Rect, Viewport};
use crate::render::format_number;

const PARALLAX_BASE_SPEED: f64 = 0.5;
const PARALLAX_SPEED_STEP: f64 = 0.2;
const HERO_FLOAT_RANGE_PX: f64 = 20.0;
const TILT_DAMPING: f64 = 20.0;

/// Transform value that clears a tilt when the pointer leaves a card.
pub const TILT_RESET: &str = "";

/// Speed multiplier of the `index`-th decorative shape.
pub fn parallax_speed(index: usize) -> f64 {
    PARALLAX_BASE_SPEED + index as f64 * PARALLAX_SPEED_STEP
}

pub fn parallax_offset(scroll_y: f64, index: usize) -> f64 {
    scroll_y * parallax_speed(index)
}

pub fn parallax_transform(scroll_y: f64, index: usize) -> String {
    format!("translateY({}px)", format_number(parallax_offset(scroll_y, index)))
}

/// Hero drift following the pointer, up to ±10px on each axis.
pub fn hero_float(pointer: Point, viewport: Viewport) -> Point {
    Point::new(
        (pointer.x / viewport.width - 0.5) * HERO_FLOAT_RANGE_PX,
        (pointer.y / viewport.height - 0.5) * HERO_FLOAT_RANGE_PX,
    )
}

pub fn hero_transform(pointer: Point, viewport: Viewport) -> String {
    let offset = hero_float(pointer, viewport);
    format!(
        "translate({}px, {}px)",
        format_number(offset.x),
        format_number(offset.y)
    )
}

/// Rotation in degrees: pointer below centre tips the card back, pointer
/// right of centre turns it right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

pub fn tilt(card: Rect, pointer: Point) -> Tilt {
    let local = card.local(pointer);
    let center = card.local_center();
    Tilt {
        rotate_x: (local.y - center.y) / TILT_DAMPING,
        rotate_y: (center.x - local.x) / TILT_DAMPING,
    }
}

pub fn tilt_transform(card: Rect, pointer: Point) -> String {
    let t = tilt(card, pointer);
    format!(
        "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY(-8px)",
        format_number(t.rotate_x),
        format_number(t.rotate_y)
    )
}
