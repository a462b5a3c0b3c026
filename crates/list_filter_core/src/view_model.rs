use crate::{Lifecycle, LoadMode, LoadState, Timer};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionView {
    pub lifecycle: Lifecycle,
    pub load_state: LoadState,
    pub load_mode: Option<LoadMode>,
    pub reload_pending: bool,
    pub raw_query: String,
    pub query_display: String,
    pub confirmed_lists: usize,
    pub tracked_fingerprint: Option<String>,
    pub location: Option<String>,
    pub armed_timers: Vec<Timer>,
    pub completed_loads: u32,
    /// Entries counted during the latest loader attempt.
    pub candidates_found: usize,
}
