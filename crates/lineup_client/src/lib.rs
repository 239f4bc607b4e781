//! Lineup client: REST access to the channel manager and the polling lifecycle.
mod api;
mod deferred;
mod poller;

pub use api::{
    ApiError, ChannelId, ClientSettings, FailureKind, RestClient, StatusApi, StatusReport,
    TestReport,
};
pub use channel_test::{run_channel_test, TestButton, TestSettings};
pub use deferred::Deferred;
pub use poller::{PollerSettings, RefreshOutcome, StatusPoller};
