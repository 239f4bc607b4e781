/// Marker substring in the rendered badge text that identifies a page whose
/// search is still running. Labels follow the pt-BR convention of the
/// server-rendered templates.
pub const PROCESSING_MARKER: &str = "Processando";

/// Icon token prefixed to the page title when the server supplies one.
pub const TITLE_ICON: &str = "list";

/// Lifecycle phase of a search as reported by the server.
///
/// The wire value is a free-form string; everything outside `processing` and
/// `completed` collapses into `Failed` so the presentation mapping stays total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Processing,
    Completed,
    Failed,
}

impl SearchPhase {
    pub fn from_wire(status: &str) -> Self {
        match status {
            "completed" => SearchPhase::Completed,
            "processing" => SearchPhase::Processing,
            _ => SearchPhase::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Success,
    Warning,
    Danger,
}

impl BadgeStyle {
    /// CSS class used by document-backed views.
    pub fn css_class(self) -> &'static str {
        match self {
            BadgeStyle::Success => "bg-success",
            BadgeStyle::Warning => "bg-warning",
            BadgeStyle::Danger => "bg-danger",
        }
    }
}

/// Presentation of the status badge: styling, label and icon token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeView {
    pub style: BadgeStyle,
    pub label: &'static str,
    pub icon: &'static str,
}

impl BadgeView {
    /// Total mapping from phase to badge presentation. `Failed` doubles as the
    /// default branch, so unknown future statuses render as an error badge
    /// instead of leaving the badge unstyled.
    pub fn for_phase(phase: SearchPhase) -> Self {
        match phase {
            SearchPhase::Completed => BadgeView {
                style: BadgeStyle::Success,
                label: "Concluído",
                icon: "check",
            },
            SearchPhase::Processing => BadgeView {
                style: BadgeStyle::Warning,
                label: "Processando",
                icon: "spinner",
            },
            SearchPhase::Failed => BadgeView {
                style: BadgeStyle::Danger,
                label: "Erro",
                icon: "times",
            },
        }
    }
}
