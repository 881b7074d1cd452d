//! Stat counters that count up from zero the first time they scroll into view.

use std::collections::HashSet;
use std::hash::Hash;
use std::time::Duration;

use super::geometry::{Rect, Viewport};
use super::reveal::Visibility;

pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Counters start once half the label is visible.
pub const COUNTER_VISIBILITY: Visibility = Visibility {
    threshold: 0.5,
    bottom_margin: 0.0,
};

/// Target value of a stat label such as `"10,000+"`, `"5x"` or `"98%"`.
/// Labels without one of those markers, or without digits, are not animated.
pub fn parse_target(label: &str) -> Option<u64> {
    if !label.contains(['+', 'x', '%']) {
        return None;
    }
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// Formats with en-US thousands separators.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Frame-by-frame label texts of one counter run.
///
/// Each frame adds `target / (duration / 16ms)`; intermediate frames show the
/// floored running value, the last frame restores the original label.
#[derive(Debug, Clone)]
pub struct CounterFrames {
    label: String,
    target: f64,
    increment: f64,
    current: f64,
    done: bool,
}

impl CounterFrames {
    pub fn new(label: &str, target: u64, duration: Duration) -> Self {
        let frames = duration.as_millis() as f64 / FRAME_INTERVAL.as_millis() as f64;
        Self {
            label: label.to_string(),
            target: target as f64,
            increment: target as f64 / frames,
            current: 0.0,
            done: false,
        }
    }
}

impl Iterator for CounterFrames {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }
        self.current += self.increment;
        if self.current < self.target {
            Some(group_thousands(self.current.floor() as u64))
        } else {
            self.done = true;
            Some(self.label.clone())
        }
    }
}

/// Applies each frame to `apply`, one per frame interval.
pub async fn play<F: FnMut(String)>(frames: CounterFrames, mut apply: F) {
    let mut ticker = tokio::time::interval(FRAME_INTERVAL);
    for text in frames {
        ticker.tick().await;
        apply(text);
    }
}

/// Starts each counter at most once.
#[derive(Debug)]
pub struct CounterTracker<K> {
    counted: HashSet<K>,
}

impl<K> Default for CounterTracker<K> {
    fn default() -> Self {
        Self {
            counted: HashSet::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> CounterTracker<K> {
    /// Returns the animation for a counter that just became visible enough
    /// and has never run. Labels without a numeric target are still marked.
    pub fn on_layout(
        &mut self,
        id: &K,
        label: &str,
        rect: Rect,
        viewport: Viewport,
    ) -> Option<CounterFrames> {
        if self.counted.contains(id) || !COUNTER_VISIBILITY.is_met(rect, viewport) {
            return None;
        }
        self.counted.insert(id.clone());
        parse_target(label).map(|target| CounterFrames::new(label, target, COUNTER_DURATION))
    }

    pub fn is_counted(&self, id: &K) -> bool {
        self.counted.contains(id)
    }
}
