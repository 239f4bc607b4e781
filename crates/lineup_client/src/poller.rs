use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use watch_logging::{watch_debug, watch_warn};

use lineup_core::{
    apply_status, search_id_from_path, SearchId, SearchPhase, StatusPage, PROCESSING_MARKER,
};

use crate::api::StatusApi;
use crate::deferred::Deferred;

#[derive(Debug, Clone)]
pub struct PollerSettings {
    /// Interval between status refreshes.
    pub poll_interval: Duration,
    /// Grace delay between a completed status and the page reload, so the
    /// final counters are visible before the page is replaced.
    pub reload_delay: Duration,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            reload_delay: Duration::from_secs(1),
        }
    }
}

/// Result of a single refresh pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// No search id attached; nothing was fetched.
    Skipped,
    /// A snapshot was fetched and applied to the page.
    Applied(SearchPhase),
    /// The fetch failed; the page was left untouched.
    Failed,
}

/// Owns the repeating refresh task for one validation page.
///
/// At most one ticker task is alive per poller: `start` aborts any prior
/// ticker before spawning a new one, and `stop` is a no-op when idle.
/// Refreshes within the ticker run back to back, never overlapped, so a
/// slow stale response can not overwrite a newer completed one.
pub struct StatusPoller<A, P> {
    api: Arc<A>,
    page: Arc<Mutex<P>>,
    settings: PollerSettings,
    search_id: Option<SearchId>,
    ticker: Option<JoinHandle<()>>,
    reload: Arc<Mutex<Option<Deferred>>>,
}

impl<A, P> StatusPoller<A, P>
where
    A: StatusApi + 'static,
    P: StatusPage + Send + 'static,
{
    pub fn new(api: Arc<A>, page: Arc<Mutex<P>>, settings: PollerSettings) -> Self {
        Self {
            api,
            page,
            settings,
            search_id: None,
            ticker: None,
            reload: Arc::new(Mutex::new(None)),
        }
    }

    /// Initialization contract: polls are wanted only when the page's badge
    /// still shows the processing marker and the path carries a parseable
    /// search id. Anything else leaves the poller detached, silently.
    pub fn attach(&mut self) -> Option<SearchId> {
        let (badge, path) = {
            let page = self.page.lock().expect("lock page");
            (page.badge_text(), page.path())
        };
        if !badge.is_some_and(|text| text.contains(PROCESSING_MARKER)) {
            return None;
        }
        let id = search_id_from_path(&path)?;
        self.search_id = Some(id);
        Some(id)
    }

    pub fn search_id(&self) -> Option<SearchId> {
        self.search_id
    }

    /// Starts the repeating refresh at the configured interval.
    pub fn start(&mut self) {
        self.start_with_interval(self.settings.poll_interval);
    }

    /// Starts the repeating refresh, cancelling any prior schedule first.
    /// Calling this twice leaves exactly one ticker running.
    pub fn start_with_interval(&mut self, interval: Duration) {
        self.stop();

        let api = self.api.clone();
        let page = self.page.clone();
        let reload_slot = self.reload.clone();
        let search_id = self.search_id;
        let reload_delay = self.settings.reload_delay;

        let handle = tokio::spawn(async move {
            let mut timer = tokio::time::interval(interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick of a tokio interval completes immediately;
            // swallow it so the first refresh lands one interval from now.
            timer.tick().await;

            let mut tick = 0u64;
            loop {
                timer.tick().await;
                tick += 1;
                watch_logging::set_poll_tick(tick);

                let outcome = refresh_page(api.as_ref(), &page, search_id).await;
                if outcome == RefreshOutcome::Applied(SearchPhase::Completed) {
                    schedule_reload(&page, &reload_slot, reload_delay);
                    break;
                }
            }
        });
        self.ticker = Some(handle);
    }

    /// Cancels the repeating refresh; safe to call when none is running.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }

    /// True while the ticker task is scheduled and has not completed.
    pub fn is_polling(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|ticker| !ticker.is_finished())
    }

    /// One manual refresh, outside the ticker. On a completed status this
    /// stops the schedule and arms the reload, exactly like a ticked refresh.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        let outcome = refresh_page(self.api.as_ref(), &self.page, self.search_id).await;
        if outcome == RefreshOutcome::Applied(SearchPhase::Completed) {
            self.stop();
            schedule_reload(&self.page, &self.reload, self.settings.reload_delay);
        }
        outcome
    }

    /// True once a completed status has armed the reload and it has not
    /// fired yet.
    pub fn reload_pending(&self) -> bool {
        self.reload
            .lock()
            .expect("lock reload slot")
            .as_ref()
            .is_some_and(Deferred::is_pending)
    }

    /// True once the armed reload has fired.
    pub fn reload_fired(&self) -> bool {
        self.reload
            .lock()
            .expect("lock reload slot")
            .as_ref()
            .is_some_and(Deferred::has_fired)
    }
}

impl<A, P> Drop for StatusPoller<A, P> {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

async fn refresh_page<A, P>(
    api: &A,
    page: &Arc<Mutex<P>>,
    search_id: Option<SearchId>,
) -> RefreshOutcome
where
    A: StatusApi + ?Sized,
    P: StatusPage,
{
    let Some(id) = search_id else {
        return RefreshOutcome::Skipped;
    };

    match api.search_status(id).await {
        Ok(report) => {
            let snapshot = report.snapshot();
            let phase = snapshot.phase;
            watch_debug!(
                "search {id}: {:?}, {}/{} channels valid",
                phase,
                snapshot.valid_channels,
                snapshot.channels_found
            );
            apply_status(&mut *page.lock().expect("lock page"), &snapshot);
            RefreshOutcome::Applied(phase)
        }
        Err(err) => {
            // The fixed-interval schedule is the retry mechanism; nothing to
            // unwind here.
            watch_warn!("search {id}: status refresh failed: {err}");
            RefreshOutcome::Failed
        }
    }
}

fn schedule_reload<P>(
    page: &Arc<Mutex<P>>,
    slot: &Arc<Mutex<Option<Deferred>>>,
    delay: Duration,
) where
    P: StatusPage + Send + 'static,
{
    let page = page.clone();
    let deferred = Deferred::spawn(delay, move || {
        page.lock().expect("lock page").reload();
    });
    *slot.lock().expect("lock reload slot") = Some(deferred);
}
