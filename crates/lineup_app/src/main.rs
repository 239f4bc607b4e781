//! Terminal companion for the channel manager's validation pages.
//!
//! Attaches to a `/validate/{id}` URL and mirrors what the page's embedded
//! script does in a browser: poll the search status every few seconds,
//! render progress, and re-render once the search completes.

mod logging;
mod term;

use std::env;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use lineup_client::{ClientSettings, PollerSettings, RestClient, StatusApi, StatusPoller};
use lineup_core::{apply_status, search_id_from_path};
use watch_logging::{watch_error, watch_info};

use crate::logging::LogDestination;
use crate::term::{copy_to_clipboard, TermNotifier, TermPage};

fn print_usage() {
    eprintln!("Usage: lineup_app <validation-page-url>");
    eprintln!("       lineup_app --copy <text>");
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::initialize(LogDestination::File);

    let args: Vec<String> = env::args().skip(1).collect();
    match args.split_first() {
        Some((flag, rest)) if flag == "--copy" => {
            if rest.is_empty() {
                print_usage();
                return ExitCode::FAILURE;
            }
            let mut toasts = TermNotifier::new();
            copy_to_clipboard(&rest.join(" "), &mut toasts);
            ExitCode::SUCCESS
        }
        Some((page_url, [])) => watch(page_url).await,
        _ => {
            print_usage();
            ExitCode::FAILURE
        }
    }
}

async fn watch(page_url: &str) -> ExitCode {
    let parsed = match url::Url::parse(page_url) {
        Ok(parsed) => parsed,
        Err(err) => {
            eprintln!("invalid page url {page_url}: {err}");
            return ExitCode::FAILURE;
        }
    };
    let path = parsed.path().to_string();
    let base = match parsed.join("/") {
        Ok(base) => base,
        Err(err) => {
            eprintln!("cannot derive API origin from {page_url}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let Some(search_id) = search_id_from_path(&path) else {
        eprintln!("{page_url} is not a validation page; nothing to watch");
        return ExitCode::FAILURE;
    };

    let client = match RestClient::new(base.as_str(), ClientSettings::default()) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            eprintln!("cannot build API client: {err}");
            return ExitCode::FAILURE;
        }
    };

    // Stand-in for the server-rendered page: take one snapshot up front so
    // the badge reflects the current state before any polling decision.
    let initial = match client.search_status(search_id).await {
        Ok(report) => report,
        Err(err) => {
            eprintln!("cannot fetch status for search {search_id}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let page = Arc::new(Mutex::new(TermPage::new(path)));
    apply_status(&mut *page.lock().expect("lock page"), &initial.snapshot());

    let mut poller = StatusPoller::new(client.clone(), page.clone(), PollerSettings::default());
    if poller.attach().is_none() {
        watch_info!("search {search_id} is not processing; nothing to poll");
        return ExitCode::SUCCESS;
    }
    poller.start();

    // Wait for the completed status to request a fresh render.
    while !page.lock().expect("lock page").reload_requested() {
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    // A browser would reload the whole page here; re-fetch and render the
    // final state instead.
    page.lock().expect("lock page").begin_render();
    match client.search_status(search_id).await {
        Ok(report) => {
            apply_status(&mut *page.lock().expect("lock page"), &report.snapshot());
        }
        Err(err) => watch_error!("final refresh for search {search_id} failed: {err}"),
    }
    ExitCode::SUCCESS
}
