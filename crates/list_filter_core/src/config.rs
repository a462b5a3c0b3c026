use std::time::Duration;

/// Timing and threshold knobs for one filtering session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Interval between container probes until the list shows up.
    pub container_poll: Duration,
    /// Delay between attempts to find the scrollable region.
    pub locate_retry_delay: Duration,
    /// Retries allowed after the first failed locate before the attempt gives up.
    pub max_locate_tries: u32,
    /// Scroll extent must exceed visible extent by more than this to count as scrollable.
    pub scroll_slack: u64,
    /// Wait after each scroll before re-measuring.
    pub settle_delay: Duration,
    /// Unchanged measurements tolerated before the load is declared complete.
    pub stall_tolerance: u32,
    /// Mutation batches touching more nodes than this may be a list replacement.
    pub mutation_threshold: usize,
    /// Quiet period after a large mutation batch before checking the fingerprint.
    pub mutation_quiet_period: Duration,
    pub navigation_poll: Duration,
    pub navigation_settle: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            container_poll: Duration::from_millis(1000),
            locate_retry_delay: Duration::from_millis(300),
            max_locate_tries: 20,
            scroll_slack: 20,
            settle_delay: Duration::from_millis(500),
            stall_tolerance: 3,
            mutation_threshold: 5,
            mutation_quiet_period: Duration::from_millis(1000),
            navigation_poll: Duration::from_millis(1000),
            navigation_settle: Duration::from_millis(500),
        }
    }
}
