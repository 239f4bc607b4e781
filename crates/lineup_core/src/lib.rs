//! Lineup core: pure status-to-presentation mapping and view helpers.
mod format;
mod page;
mod route;
mod status;
mod toast;

pub use format::{format_date, format_duration};
pub use page::{apply_status, StatusPage, StatusSnapshot};
pub use route::{search_id_from_path, SearchId};
pub use status::{BadgeStyle, BadgeView, SearchPhase, PROCESSING_MARKER, TITLE_ICON};
pub use toast::{Notifier, ToastId, ToastKind, ToastRecord, ToastStack};
