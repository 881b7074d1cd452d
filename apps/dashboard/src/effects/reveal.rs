//! Visibility measurement and the one-shot reveal of cards entering the viewport.

use std::collections::HashSet;
use std::hash::Hash;

use super::geometry::{Rect, Viewport};

/// Visibility trigger: fraction of the element that must be visible, and a
/// margin applied to the bottom edge of the viewport (negative shrinks it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Visibility {
    pub threshold: f64,
    pub bottom_margin: f64,
}

/// Cards reveal once 10% is visible, measured 100px above the viewport bottom.
pub const REVEAL_VISIBILITY: Visibility = Visibility {
    threshold: 0.1,
    bottom_margin: -100.0,
};

impl Visibility {
    /// Fraction of `rect` inside the (margin-adjusted) viewport, 0.0 – 1.0.
    pub fn ratio(&self, rect: Rect, viewport: Viewport) -> f64 {
        let root = Rect::new(0.0, 0.0, viewport.width, viewport.height + self.bottom_margin);

        let width = rect.right().min(root.right()) - rect.left.max(root.left);
        let height = rect.bottom().min(root.bottom()) - rect.top.max(root.top);
        if width < 0.0 || height < 0.0 {
            return 0.0;
        }

        let area = rect.area();
        if area == 0.0 {
            // zero-sized targets count as fully visible when they touch the root
            return 1.0;
        }
        (width * height / area).clamp(0.0, 1.0)
    }

    pub fn is_met(&self, rect: Rect, viewport: Viewport) -> bool {
        let ratio = self.ratio(rect, viewport);
        ratio > 0.0 && ratio >= self.threshold
    }
}

/// Inline style applied to a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardStyle {
    pub opacity: &'static str,
    pub transform: &'static str,
    pub transition: &'static str,
}

pub const HIDDEN: CardStyle = CardStyle {
    opacity: "0",
    transform: "translateY(30px)",
    transition: "opacity 0.6s ease, transform 0.6s ease",
};

pub const REVEALED: CardStyle = CardStyle {
    opacity: "1",
    transform: "translateY(0)",
    transition: "opacity 0.6s ease, transform 0.6s ease",
};

/// Hides observed cards and reveals each exactly once.
#[derive(Debug)]
pub struct RevealTracker<K> {
    visibility: Visibility,
    hidden: HashSet<K>,
    revealed: HashSet<K>,
}

impl<K: Eq + Hash + Clone> Default for RevealTracker<K> {
    fn default() -> Self {
        Self::new(REVEAL_VISIBILITY)
    }
}

impl<K: Eq + Hash + Clone> RevealTracker<K> {
    pub fn new(visibility: Visibility) -> Self {
        Self {
            visibility,
            hidden: HashSet::new(),
            revealed: HashSet::new(),
        }
    }

    /// Starts observing a card; returns the style that hides it.
    pub fn observe(&mut self, id: K) -> CardStyle {
        if !self.revealed.contains(&id) {
            self.hidden.insert(id);
        }
        HIDDEN
    }

    /// Returns the revealed style the first time an observed card becomes visible.
    pub fn on_layout(&mut self, id: &K, rect: Rect, viewport: Viewport) -> Option<CardStyle> {
        if !self.hidden.contains(id) || !self.visibility.is_met(rect, viewport) {
            return None;
        }
        self.hidden.remove(id);
        self.revealed.insert(id.clone());
        Some(REVEALED)
    }

    pub fn is_revealed(&self, id: &K) -> bool {
        self.revealed.contains(id)
    }
}
