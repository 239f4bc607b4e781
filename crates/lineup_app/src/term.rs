//! Terminal implementations of the page and notifier abstractions.

use lineup_core::{BadgeView, Notifier, StatusPage, ToastId, ToastKind, ToastStack};
use watch_logging::watch_error;

/// Terminal rendering of a validation page: prints one summary line per
/// applied snapshot and records the fields a browser page would show.
#[derive(Debug)]
pub struct TermPage {
    path: String,
    badge_label: Option<String>,
    channels_found: u64,
    valid_channels: u64,
    title: Option<String>,
    alert_hidden: bool,
    reload_requested: bool,
}

impl TermPage {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            badge_label: None,
            channels_found: 0,
            valid_channels: 0,
            title: None,
            alert_hidden: false,
            reload_requested: false,
        }
    }

    /// True once the page asked to be replaced by a fresh render.
    pub fn reload_requested(&self) -> bool {
        self.reload_requested
    }

    /// Clears a pending reload request; the caller is about to re-render.
    pub fn begin_render(&mut self) {
        self.reload_requested = false;
    }

    fn print_summary(&self) {
        let badge = self.badge_label.as_deref().unwrap_or("-");
        let title = self.title.as_deref().unwrap_or("(sem título)");
        println!(
            "[{badge}] {title}: {}/{} canais válidos",
            self.valid_channels, self.channels_found
        );
    }
}

impl StatusPage for TermPage {
    fn badge_text(&self) -> Option<String> {
        self.badge_label.clone()
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn set_badge(&mut self, badge: &BadgeView) {
        self.badge_label = Some(badge.label.to_string());
        // The badge is the last field the mapper touches before the
        // alert/title tweaks, so this is where the summary line goes out.
        self.print_summary();
    }

    fn set_channels_found(&mut self, count: u64) {
        self.channels_found = count;
    }

    fn set_valid_channels(&mut self, count: u64) {
        self.valid_channels = count;
    }

    fn set_title(&mut self, _icon: &str, title: &str) {
        self.title = Some(title.to_string());
    }

    fn hide_processing_alert(&mut self) {
        if !self.alert_hidden {
            println!("Processamento concluído.");
        }
        self.alert_hidden = true;
    }

    fn reload(&mut self) {
        self.reload_requested = true;
    }
}

/// Terminal toasts: printed immediately and dismissed on the spot, since a
/// terminal line needs no hide animation.
#[derive(Debug, Default)]
pub struct TermNotifier {
    stack: ToastStack,
}

impl TermNotifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for TermNotifier {
    fn notify(&mut self, title: &str, message: &str, kind: ToastKind) -> ToastId {
        println!("({}) {title}: {message}", kind.icon());
        let id = self.stack.notify(title, message, kind);
        self.stack.dismissed(id);
        id
    }
}

/// Copies `text` to the system clipboard and surfaces the outcome as a toast.
pub fn copy_to_clipboard(text: &str, toasts: &mut dyn Notifier) {
    let result = arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string()));
    match result {
        Ok(()) => {
            toasts.notify(
                "Copiado",
                "Texto copiado para a área de transferência",
                ToastKind::Success,
            );
        }
        Err(err) => {
            watch_error!("clipboard copy failed: {err}");
            toasts.notify("Erro", "Erro ao copiar texto", ToastKind::Error);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lineup_core::{apply_status, SearchPhase, StatusSnapshot};

    fn snapshot(phase: SearchPhase) -> StatusSnapshot {
        StatusSnapshot {
            phase,
            channels_found: 12,
            valid_channels: 7,
            title: Some("Lista".to_string()),
        }
    }

    #[test]
    fn fresh_page_is_blank() {
        let page = TermPage::new("/validate/5");
        assert!(!page.reload_requested());
        assert_eq!(page.badge_text(), None);
    }

    #[test]
    fn applied_snapshot_fills_the_page() {
        let mut page = TermPage::new("/validate/5");

        apply_status(&mut page, &snapshot(SearchPhase::Processing));

        assert_eq!(page.badge_text().as_deref(), Some("Processando"));
        assert_eq!(page.path(), "/validate/5");
        assert!(!page.reload_requested());
    }

    #[test]
    fn reload_raises_the_flag_until_the_next_render() {
        let mut page = TermPage::new("/validate/5");
        apply_status(&mut page, &snapshot(SearchPhase::Completed));

        page.reload();
        assert!(page.reload_requested());

        page.begin_render();
        assert!(!page.reload_requested());
    }
}
