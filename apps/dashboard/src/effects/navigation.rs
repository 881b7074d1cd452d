//! Navbar scroll state, same-page anchor scrolling and the mobile menu toggle.

/// Scroll distance past which the navbar takes its "scrolled" look.
pub const SCROLLED_THRESHOLD_PX: f64 = 50.0;
/// Fixed header height compensated for when scrolling to an anchor.
pub const HEADER_OFFSET_PX: f64 = 80.0;

pub const SCROLLED_CLASS: &str = "scrolled";
pub const MENU_PANEL_CLASS: &str = "mobile-active";
pub const MENU_BUTTON_CLASS: &str = "active";

pub fn is_scrolled(scroll_y: f64) -> bool {
    scroll_y > SCROLLED_THRESHOLD_PX
}

/// Tracks the navbar class so hosts only touch the DOM on transitions.
#[derive(Debug, Default)]
pub struct NavbarState {
    scrolled: bool,
}

impl NavbarState {
    /// Returns the new state when it flipped.
    pub fn on_scroll(&mut self, scroll_y: f64) -> Option<bool> {
        let scrolled = is_scrolled(scroll_y);
        if scrolled == self.scrolled {
            return None;
        }
        self.scrolled = scrolled;
        Some(scrolled)
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }
}

/// Smooth-scroll destination for a same-page anchor.
///
/// `offset_top` looks up an element's document offset by id. Non-fragment
/// links, a bare `#`, and unknown targets yield `None`.
pub fn anchor_scroll_target(href: &str, offset_top: impl Fn(&str) -> Option<f64>) -> Option<f64> {
    let id = href.strip_prefix('#').filter(|id| !id.is_empty())?;
    offset_top(id).map(|top| (top - HEADER_OFFSET_PX).max(0.0))
}

/// Mobile navigation panel; the panel and its trigger button toggle together.
#[derive(Debug, Default)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn panel_class(&self) -> Option<&'static str> {
        self.open.then_some(MENU_PANEL_CLASS)
    }

    pub fn button_class(&self) -> Option<&'static str> {
        self.open.then_some(MENU_BUTTON_CLASS)
    }
}
