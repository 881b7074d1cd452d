//! Click ripples: a circle that expands from the pointer and removes itself.

use std::time::{Duration, Instant};

use super::geometry::{Point, Rect};
use crate::render::format_number;

pub const RIPPLE_LIFETIME: Duration = Duration::from_millis(600);
pub const RIPPLE_CLASS: &str = "ripple";

#[derive(Debug, Clone, PartialEq)]
pub struct Ripple {
    pub id: u64,
    /// Diameter; the larger side of the button.
    pub size: f64,
    pub left: f64,
    pub top: f64,
    pub spawned_at: Instant,
}

impl Ripple {
    pub fn style(&self) -> String {
        let size = format_number(self.size);
        format!(
            "width: {size}px; height: {size}px; left: {}px; top: {}px",
            format_number(self.left),
            format_number(self.top)
        )
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.spawned_at) >= RIPPLE_LIFETIME
    }
}

/// Live ripples of one page.
#[derive(Debug, Default)]
pub struct RippleLayer {
    next_id: u64,
    active: Vec<Ripple>,
}

impl RippleLayer {
    /// Spawns a ripple centred on the pointer, positioned relative to the button.
    pub fn spawn(&mut self, button: Rect, pointer: Point, now: Instant) -> &Ripple {
        let size = button.width.max(button.height);
        let local = button.local(pointer);
        let ripple = Ripple {
            id: self.next_id,
            size,
            left: local.x - size / 2.0,
            top: local.y - size / 2.0,
            spawned_at: now,
        };
        self.next_id += 1;
        self.active.push(ripple);
        &self.active[self.active.len() - 1]
    }

    /// Drops ripples past their lifetime and returns their ids for removal.
    pub fn expire(&mut self, now: Instant) -> Vec<u64> {
        let mut removed = Vec::new();
        self.active.retain(|r| {
            if r.is_expired(now) {
                removed.push(r.id);
                false
            } else {
                true
            }
        });
        removed
    }

    pub fn active(&self) -> &[Ripple] {
        &self.active
    }
}
