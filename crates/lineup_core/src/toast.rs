use std::time::{SystemTime, UNIX_EPOCH};

pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    /// Icon token for the toast header. Total: unlisted kinds fall back to
    /// the info icon.
    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Success => "check-circle",
            ToastKind::Error => "exclamation-circle",
            ToastKind::Warning => "exclamation-triangle",
            ToastKind::Info => "info-circle",
        }
    }

    /// Color token for the toast header icon.
    pub fn color(self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "danger",
            ToastKind::Warning => "warning",
            ToastKind::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastRecord {
    pub id: ToastId,
    pub title: String,
    pub message: String,
    pub kind: ToastKind,
}

/// Anything that can surface a transient notification to the operator.
pub trait Notifier {
    fn notify(&mut self, title: &str, message: &str, kind: ToastKind) -> ToastId;
}

/// Stack of live toasts. Each record is independent and removed once its
/// dismissal completes; ids never repeat within one stack.
#[derive(Debug, Clone)]
pub struct ToastStack {
    next_id: ToastId,
    toasts: Vec<ToastRecord>,
}

impl ToastStack {
    pub fn new() -> Self {
        // Ids are seeded from the creation timestamp so they read like the
        // millisecond ids the templates historically used, then incremented
        // per toast so concurrent creation within one millisecond still
        // yields distinct ids.
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0);
        Self {
            next_id: seed,
            toasts: Vec::new(),
        }
    }

    pub fn toasts(&self) -> &[ToastRecord] {
        &self.toasts
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Marks a toast as fully dismissed and drops its record. Unknown ids
    /// are ignored; a toast dismissed twice is not an error.
    pub fn dismissed(&mut self, id: ToastId) {
        self.toasts.retain(|toast| toast.id != id);
    }
}

impl Default for ToastStack {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ToastStack {
    fn notify(&mut self, title: &str, message: &str, kind: ToastKind) -> ToastId {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(ToastRecord {
            id,
            title: title.to_string(),
            message: message.to_string(),
            kind,
        });
        id
    }
}
