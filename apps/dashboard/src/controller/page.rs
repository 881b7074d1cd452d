use std::sync::Mutex;

use tracing::debug;

/// Output regions the controller renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Results,
    Ranking,
}

/// Triggering controls the controller disables while a request is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Analyze,
    Rank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlState {
    pub disabled: bool,
    pub label: String,
}

impl ControlState {
    pub fn idle(label: &str) -> Self {
        Self {
            disabled: false,
            label: label.to_string(),
        }
    }

    pub fn busy(label: &str) -> Self {
        Self {
            disabled: true,
            label: label.to_string(),
        }
    }
}

/// The document the controller writes to. Implementations own the actual
/// markup tree; the controller only swaps region contents and control states.
pub trait Page: Send + Sync {
    fn set_region(&self, region: Region, html: String);

    fn set_control(&self, control: Control, state: ControlState);
}

/// Every mutation applied to a `MemoryPage`, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    Region(Region, String),
    Control(Control, ControlState),
}

#[derive(Debug, Clone)]
pub struct PageSnapshot {
    pub results: String,
    pub ranking: String,
    pub analyze: ControlState,
    pub rank: ControlState,
    #[allow(dead_code)]
    pub events: Vec<PageEvent>,
}

/// In-memory page. Used per request by the HTTP layer and directly in tests.
pub struct MemoryPage {
    state: Mutex<PageSnapshot>,
}

impl MemoryPage {
    pub fn new(analyze_label: &str, rank_label: &str) -> Self {
        Self {
            state: Mutex::new(PageSnapshot {
                results: String::new(),
                ranking: String::new(),
                analyze: ControlState::idle(analyze_label),
                rank: ControlState::idle(rank_label),
                events: Vec::new(),
            }),
        }
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, PageSnapshot> {
        // A poisoned page still holds the last complete mutation.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Page for MemoryPage {
    fn set_region(&self, region: Region, html: String) {
        let mut state = self.lock();
        match region {
            Region::Results => state.results = html.clone(),
            Region::Ranking => state.ranking = html.clone(),
        }
        state.events.push(PageEvent::Region(region, html));
    }

    fn set_control(&self, control: Control, control_state: ControlState) {
        debug!(
            "{control:?} control -> disabled={}, label={:?}",
            control_state.disabled, control_state.label
        );
        let mut state = self.lock();
        match control {
            Control::Analyze => state.analyze = control_state.clone(),
            Control::Rank => state.rank = control_state.clone(),
        }
        state.events.push(PageEvent::Control(control, control_state));
    }
}

/// Holds a control in its busy state; restores it to idle when dropped, so
/// every exit path of a request flow re-enables the control.
pub struct BusyGuard<'a, P: Page + ?Sized> {
    page: &'a P,
    control: Control,
    idle_label: &'static str,
}

impl<'a, P: Page + ?Sized> BusyGuard<'a, P> {
    pub fn engage(
        page: &'a P,
        control: Control,
        busy_label: &str,
        idle_label: &'static str,
    ) -> Self {
        page.set_control(control, ControlState::busy(busy_label));
        Self {
            page,
            control,
            idle_label,
        }
    }
}

impl<P: Page + ?Sized> Drop for BusyGuard<'_, P> {
    fn drop(&mut self) {
        self.page
            .set_control(self.control, ControlState::idle(self.idle_label));
    }
}
