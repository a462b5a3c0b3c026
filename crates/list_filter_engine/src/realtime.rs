//! Wall-clock driver for a [`SessionRunner`].

use std::time::Duration;

use filter_logging::filter_info;
use tokio_util::sync::CancellationToken;

use crate::runner::SessionRunner;
use crate::tree::DocumentTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    /// The session settled and the caller asked to stop there.
    Settled,
    /// The token was cancelled; the session was torn down.
    Cancelled,
    /// No timer is pending and nothing can wake the session up again.
    Idle,
}

/// Sleeps until each pending timer falls due and fires it, until cancelled or settled.
pub async fn drive<T: DocumentTree>(
    runner: &mut SessionRunner<T>,
    cancel: CancellationToken,
    stop_when_settled: bool,
) -> DriveOutcome {
    loop {
        if stop_when_settled && runner.is_settled() {
            return DriveOutcome::Settled;
        }

        let Some(deadline) = runner.next_deadline() else {
            if stop_when_settled {
                return DriveOutcome::Idle;
            }
            cancel.cancelled().await;
            runner.teardown();
            return DriveOutcome::Cancelled;
        };
        let wait = deadline.saturating_sub(runner.now());

        tokio::select! {
            _ = cancel.cancelled() => {
                filter_info!("driver cancelled, tearing session down");
                runner.teardown();
                return DriveOutcome::Cancelled;
            }
            _ = tokio::time::sleep(wait) => {
                runner.advance(wait);
            }
        }
    }
}

/// Convenience for hosts that want a hard wall-clock limit.
pub async fn drive_for<T: DocumentTree>(
    runner: &mut SessionRunner<T>,
    limit: Duration,
) -> DriveOutcome {
    let cancel = CancellationToken::new();
    let guard = cancel.clone();
    let timeout = tokio::time::sleep(limit);
    tokio::pin!(timeout);
    let drive = drive(runner, cancel, true);
    tokio::pin!(drive);
    tokio::select! {
        outcome = &mut drive => outcome,
        _ = &mut timeout => {
            guard.cancel();
            drive.await
        }
    }
}
