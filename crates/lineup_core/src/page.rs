use crate::status::{BadgeView, SearchPhase, TITLE_ICON};

/// One snapshot of search progress, already lifted off the wire.
///
/// Snapshots are idempotent: applying the same one twice leaves the page in
/// the same state, which is what makes overlapping refreshes harmless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub phase: SearchPhase,
    pub channels_found: u64,
    pub valid_channels: u64,
    pub title: Option<String>,
}

/// Abstraction over the validation page the poller renders into.
///
/// A document-backed implementation looks elements up by id and silently
/// skips updates whose target is missing; a missing element is never an
/// error. Test and terminal implementations just record the calls.
pub trait StatusPage {
    /// Rendered text of the status badge, if the page has one.
    fn badge_text(&self) -> Option<String>;
    /// Path component of the page location, e.g. `/validate/42`.
    fn path(&self) -> String;

    fn set_badge(&mut self, badge: &BadgeView);
    fn set_channels_found(&mut self, count: u64);
    fn set_valid_channels(&mut self, count: u64);
    /// Overwrite the page title with an icon-prefixed rendering.
    fn set_title(&mut self, icon: &str, title: &str);
    fn hide_processing_alert(&mut self);
    /// Request a full page reload, ceding further state to a fresh render.
    fn reload(&mut self);
}

/// Applies one status snapshot to the page, field by field.
pub fn apply_status(page: &mut dyn StatusPage, snapshot: &StatusSnapshot) {
    page.set_channels_found(snapshot.channels_found);
    page.set_valid_channels(snapshot.valid_channels);
    page.set_badge(&BadgeView::for_phase(snapshot.phase));

    if let Some(title) = snapshot.title.as_deref() {
        page.set_title(TITLE_ICON, title);
    }

    if snapshot.phase == SearchPhase::Completed {
        page.hide_processing_alert();
    }
}
