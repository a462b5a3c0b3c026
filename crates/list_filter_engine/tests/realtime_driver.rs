use std::time::Duration;

use list_filter_core::{Lifecycle, SessionConfig};
use list_filter_engine::{drive, drive_for, DriveOutcome, HtmlTree, PagingOptions, SessionRunner};
use tokio_util::sync::CancellationToken;

fn runner() -> SessionRunner<HtmlTree> {
    let entries: String = (0..18)
        .map(|i| {
            format!(r#"<div><button><img alt=""><h3>Place {i}</h3><span>Cafe</span></button></div>"#)
        })
        .collect();
    let tree = HtmlTree::parse(&format!(
        r#"<div role="main"><div data-virtual-list="1">{entries}</div></div>"#
    ))
    .with_paging(PagingOptions::default())
    .with_location("https://www.google.com/maps/placelists/list/a");
    SessionRunner::new(tree, SessionConfig::default())
}

#[tokio::test(start_paused = true)]
async fn driver_runs_the_session_until_settled() {
    let mut runner = runner();
    runner.start();

    let outcome = drive(&mut runner, CancellationToken::new(), true).await;

    assert_eq!(outcome, DriveOutcome::Settled);
    assert_eq!(runner.tree().pending_entries(), 0);
    assert!(runner.stats().loads_completed >= 1);
}

#[tokio::test(start_paused = true)]
async fn cancellation_tears_the_session_down() {
    let mut runner = runner();
    runner.start();

    let token = CancellationToken::new();
    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(20)).await;
        canceller.cancel();
    });

    let outcome = drive(&mut runner, token, false).await;

    assert_eq!(outcome, DriveOutcome::Cancelled);
    assert_eq!(runner.view().lifecycle, Lifecycle::TornDown);
    assert_eq!(runner.next_deadline(), None);
}

#[tokio::test(start_paused = true)]
async fn wall_clock_limit_cancels_unsettled_session() {
    let tree = HtmlTree::parse(r#"<div class="spinner"></div>"#);
    let mut runner = SessionRunner::new(tree, SessionConfig::default());
    runner.start();

    let outcome = drive_for(&mut runner, Duration::from_secs(5)).await;

    assert_eq!(outcome, DriveOutcome::Cancelled);
    assert_eq!(runner.view().lifecycle, Lifecycle::TornDown);
}
