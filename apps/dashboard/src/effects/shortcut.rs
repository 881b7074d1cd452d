/// A key press with its modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    SubmitAnalysis,
}

/// Ctrl+Enter (Cmd+Enter on macOS) submits the single-resume analysis.
pub fn action_for(press: KeyPress<'_>) -> Option<ShortcutAction> {
    ((press.ctrl || press.meta) && press.key == "Enter").then_some(ShortcutAction::SubmitAnalysis)
}
