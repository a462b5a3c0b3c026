//! `list-filter` host: loads a saved list page, runs a filtering session over it and
//! reports which entries stay visible.
pub mod cli;
pub mod config;
pub mod logging;
pub mod report;

use anyhow::Context;
use filter_logging::{filter_info, filter_warn};
use list_filter_engine::{drive_for, read_snapshot, DriveOutcome, HtmlTree, SessionRunner};

pub use cli::{Cli, LogTarget};
pub use config::{load_config, AppConfig, ConfigError};
pub use report::{EntryReport, Report, RunContext};

pub fn run(cli: &Cli) -> anyhow::Result<Report> {
    let app_config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    let snapshot = read_snapshot(&cli.snapshot, cli.charset.as_deref())?;
    let location = cli
        .location
        .clone()
        .or_else(|| app_config.location.clone())
        .unwrap_or_default();

    let mut tree = HtmlTree::parse(&snapshot.html).with_location(location);
    if let Some(selector) = &app_config.container_selector {
        tree = tree.with_container_selector(selector);
    }
    let tree = tree.with_paging(app_config.paging(cli.page_size));

    let mut runner = SessionRunner::new(tree, app_config.session_config());
    runner.query_changed(cli.query.as_str());
    runner.start();

    let limit = app_config.settle_limit();
    let settled = if cli.realtime {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .context("failed to start the timer runtime")?;
        runtime.block_on(drive_for(&mut runner, limit)) == DriveOutcome::Settled
    } else {
        runner.run_until_settled(limit)
    };
    if !settled {
        filter_warn!("session did not settle within {:?}", limit);
    }

    let snapshot_name = cli.snapshot.display().to_string();
    let report = Report::collect(
        &runner,
        RunContext {
            snapshot: &snapshot_name,
            query: &cli.query,
            encoding: snapshot.encoding,
            settled,
        },
    );
    filter_info!(
        "run finished: {} entries, {} shown, {} loads",
        report.entries.len(),
        report.shown,
        report.loads_completed
    );
    runner.teardown();
    Ok(report)
}
