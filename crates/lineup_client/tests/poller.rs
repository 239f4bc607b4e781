use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use lineup_client::{
    ApiError, ChannelId, FailureKind, PollerSettings, RefreshOutcome, StatusApi, StatusPoller,
    StatusReport, TestReport,
};
use lineup_core::{BadgeView, SearchId, StatusPage};

fn report(status: &str, channels_found: u64, valid_channels: u64) -> StatusReport {
    StatusReport {
        status: status.to_string(),
        channels_found,
        valid_channels,
        title: None,
    }
}

fn network_error() -> ApiError {
    ApiError {
        kind: FailureKind::Network,
        message: "connection refused".to_string(),
    }
}

/// Replays a scripted sequence of status replies, then keeps answering
/// `processing` forever. Counts every request it serves.
struct ScriptedApi {
    calls: AtomicUsize,
    script: Mutex<VecDeque<Result<StatusReport, ApiError>>>,
}

impl ScriptedApi {
    fn new(script: Vec<Result<StatusReport, ApiError>>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            script: Mutex::new(script.into()),
        })
    }

    fn endless_processing() -> Arc<Self> {
        Self::new(Vec::new())
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusApi for ScriptedApi {
    async fn search_status(&self, _id: SearchId) -> Result<StatusReport, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(report("processing", 0, 0)))
    }

    async fn test_channel(&self, _id: ChannelId) -> Result<TestReport, ApiError> {
        Ok(TestReport {
            status: "testing".to_string(),
        })
    }
}

#[derive(Debug, Default)]
struct TestPage {
    initial_badge: Option<String>,
    path: String,
    badge: Option<BadgeView>,
    channels_found: Option<u64>,
    valid_channels: Option<u64>,
    title: Option<String>,
    alert_hidden: bool,
    reloads: usize,
}

impl TestPage {
    fn processing(path: &str) -> Self {
        Self {
            initial_badge: Some("Processando".to_string()),
            path: path.to_string(),
            ..Self::default()
        }
    }

    fn completed(path: &str) -> Self {
        Self {
            initial_badge: Some("Concluído".to_string()),
            path: path.to_string(),
            ..Self::default()
        }
    }
}

impl StatusPage for TestPage {
    fn badge_text(&self) -> Option<String> {
        match self.badge {
            Some(badge) => Some(badge.label.to_string()),
            None => self.initial_badge.clone(),
        }
    }

    fn path(&self) -> String {
        self.path.clone()
    }

    fn set_badge(&mut self, badge: &BadgeView) {
        self.badge = Some(*badge);
    }

    fn set_channels_found(&mut self, count: u64) {
        self.channels_found = Some(count);
    }

    fn set_valid_channels(&mut self, count: u64) {
        self.valid_channels = Some(count);
    }

    fn set_title(&mut self, _icon: &str, title: &str) {
        self.title = Some(title.to_string());
    }

    fn hide_processing_alert(&mut self) {
        self.alert_hidden = true;
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}

fn settings() -> PollerSettings {
    PollerSettings {
        poll_interval: Duration::from_secs(5),
        reload_delay: Duration::from_secs(1),
    }
}

/// Lets spawned poller tasks run up to their next await point.
async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

async fn advance(duration: Duration) {
    tokio::time::advance(duration).await;
    settle().await;
}

#[tokio::test(start_paused = true)]
async fn attach_requires_marker_and_parseable_id() {
    let api = ScriptedApi::endless_processing();

    let page = Arc::new(Mutex::new(TestPage::processing("/validate/9")));
    let mut poller = StatusPoller::new(api.clone(), page, settings());
    assert_eq!(poller.attach(), Some(9));
    assert_eq!(poller.search_id(), Some(9));

    let page = Arc::new(Mutex::new(TestPage::completed("/validate/9")));
    let mut poller = StatusPoller::new(api.clone(), page, settings());
    assert_eq!(poller.attach(), None);

    let page = Arc::new(Mutex::new(TestPage::processing("/history")));
    let mut poller = StatusPoller::new(api, page, settings());
    assert_eq!(poller.attach(), None);
}

#[tokio::test(start_paused = true)]
async fn starting_twice_leaves_exactly_one_schedule() {
    let api = ScriptedApi::endless_processing();
    let page = Arc::new(Mutex::new(TestPage::processing("/validate/9")));
    let mut poller = StatusPoller::new(api.clone(), page, settings());
    poller.attach();

    poller.start();
    poller.start();
    settle().await;

    advance(Duration::from_secs(5)).await;
    assert_eq!(api.calls(), 1);

    advance(Duration::from_secs(5)).await;
    assert_eq!(api.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_the_schedule_and_is_idempotent() {
    let api = ScriptedApi::endless_processing();
    let page = Arc::new(Mutex::new(TestPage::processing("/validate/9")));
    let mut poller = StatusPoller::new(api.clone(), page, settings());
    poller.attach();

    // Stopping before any start is a no-op.
    poller.stop();
    assert!(!poller.is_polling());

    poller.start();
    settle().await;
    assert!(poller.is_polling());

    poller.stop();
    poller.stop();
    settle().await;

    advance(Duration::from_secs(30)).await;
    assert_eq!(api.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn refresh_without_attached_id_makes_no_calls() {
    let api = ScriptedApi::endless_processing();
    let page = Arc::new(Mutex::new(TestPage::completed("/validate/9")));
    let mut poller = StatusPoller::new(api.clone(), page, settings());
    assert_eq!(poller.attach(), None);

    assert_eq!(poller.refresh().await, RefreshOutcome::Skipped);

    poller.start();
    settle().await;
    advance(Duration::from_secs(15)).await;

    assert_eq!(api.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn ticked_refresh_applies_snapshot_to_page() {
    let api = ScriptedApi::new(vec![Ok(StatusReport {
        status: "processing".to_string(),
        channels_found: 120,
        valid_channels: 37,
        title: Some("Lista IPTV".to_string()),
    })]);
    let page = Arc::new(Mutex::new(TestPage::processing("/validate/9")));
    let mut poller = StatusPoller::new(api.clone(), page.clone(), settings());
    poller.attach();
    poller.start();
    settle().await;

    advance(Duration::from_secs(5)).await;

    let page = page.lock().unwrap();
    assert_eq!(page.channels_found, Some(120));
    assert_eq!(page.valid_channels, Some(37));
    assert_eq!(page.title.as_deref(), Some("Lista IPTV"));
    assert!(!page.alert_hidden);
}

#[tokio::test(start_paused = true)]
async fn completed_status_stops_polling_and_reloads_after_delay() {
    let api = ScriptedApi::new(vec![Ok(report("completed", 10, 8))]);
    let page = Arc::new(Mutex::new(TestPage::processing("/validate/9")));
    let mut poller = StatusPoller::new(api.clone(), page.clone(), settings());
    poller.attach();
    poller.start();
    settle().await;

    advance(Duration::from_secs(5)).await;
    assert_eq!(api.calls(), 1);
    assert!(page.lock().unwrap().alert_hidden);
    assert!(poller.reload_pending());
    assert!(!poller.reload_fired());
    assert_eq!(page.lock().unwrap().reloads, 0);

    // The reload waits out its grace delay.
    advance(Duration::from_millis(800)).await;
    assert!(!poller.reload_fired());

    advance(Duration::from_millis(300)).await;
    assert!(poller.reload_fired());
    assert_eq!(page.lock().unwrap().reloads, 1);

    // No further ticks after completion.
    advance(Duration::from_secs(20)).await;
    assert_eq!(api.calls(), 1);
    assert!(!poller.is_polling());
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_leaves_page_alone_and_retries_next_tick() {
    let api = ScriptedApi::new(vec![Err(network_error()), Ok(report("processing", 3, 1))]);
    let page = Arc::new(Mutex::new(TestPage::processing("/validate/9")));
    let mut poller = StatusPoller::new(api.clone(), page.clone(), settings());
    poller.attach();
    poller.start();
    settle().await;

    advance(Duration::from_secs(5)).await;
    assert_eq!(api.calls(), 1);
    assert_eq!(page.lock().unwrap().channels_found, None);

    // The fixed interval itself is the retry mechanism.
    advance(Duration::from_secs(5)).await;
    assert_eq!(api.calls(), 2);
    assert_eq!(page.lock().unwrap().channels_found, Some(3));
}

#[tokio::test(start_paused = true)]
async fn manual_refresh_on_completed_arms_the_reload() {
    let api = ScriptedApi::new(vec![Ok(report("completed", 4, 4))]);
    let page = Arc::new(Mutex::new(TestPage::processing("/validate/9")));
    let mut poller = StatusPoller::new(api.clone(), page.clone(), settings());
    poller.attach();

    let outcome = poller.refresh().await;
    assert!(matches!(outcome, RefreshOutcome::Applied(_)));
    assert!(poller.reload_pending());

    advance(Duration::from_millis(1100)).await;
    assert!(poller.reload_fired());
    assert_eq!(page.lock().unwrap().reloads, 1);
}
