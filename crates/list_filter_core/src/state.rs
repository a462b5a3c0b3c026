use std::collections::{BTreeMap, HashSet};
use std::time::Duration;

use crate::view_model::SessionView;
use crate::{Effect, ListFingerprint, LoadMode, LoadState, Loader, ParsedQuery, SessionConfig, Timer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lifecycle {
    /// Waiting for the container to appear.
    #[default]
    Waiting,
    Attached,
    TornDown,
}

/// Page classification used by the navigation monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// A list of lists; nothing to filter.
    Overview,
    /// A single list.
    Detail,
}

/// Everything one filtering session knows. Owned by whoever drives `update`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    config: SessionConfig,
    lifecycle: Lifecycle,
    raw_query: String,
    query: ParsedQuery,
    confirmed: HashSet<ListFingerprint>,
    loader: Option<Loader>,
    reload_pending: bool,
    tracked_fingerprint: Option<ListFingerprint>,
    location: Option<String>,
    armed: BTreeMap<Timer, u64>,
    next_token: u64,
    completed_loads: u32,
    candidates_found: usize,
}

impl SessionState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn query(&self) -> &ParsedQuery {
        &self.query
    }

    pub fn load_state(&self) -> LoadState {
        self.loader.as_ref().map(Loader::state).unwrap_or_default()
    }

    pub fn loader(&self) -> Option<&Loader> {
        self.loader.as_ref()
    }

    pub fn is_confirmed(&self, fingerprint: &ListFingerprint) -> bool {
        self.confirmed.contains(fingerprint)
    }

    pub fn is_armed(&self, timer: Timer) -> bool {
        self.armed.contains_key(&timer)
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            lifecycle: self.lifecycle,
            load_state: self.load_state(),
            load_mode: self.loader.as_ref().map(Loader::mode),
            reload_pending: self.reload_pending,
            raw_query: self.raw_query.clone(),
            query_display: self.query.to_string(),
            confirmed_lists: self.confirmed.len(),
            tracked_fingerprint: self.tracked_fingerprint.as_ref().map(ListFingerprint::digest),
            location: self.location.clone(),
            armed_timers: self.armed.keys().copied().collect(),
            completed_loads: self.completed_loads,
            candidates_found: self.candidates_found,
        }
    }

    pub(crate) fn set_lifecycle(&mut self, lifecycle: Lifecycle) {
        self.lifecycle = lifecycle;
    }

    pub(crate) fn set_query(&mut self, raw: String, query: ParsedQuery) {
        self.raw_query = raw;
        self.query = query;
    }

    pub(crate) fn loader_mut(&mut self) -> Option<&mut Loader> {
        self.loader.as_mut()
    }

    pub(crate) fn has_active_loader(&self) -> bool {
        self.loader.as_ref().is_some_and(Loader::is_active)
    }

    pub(crate) fn install_loader(&mut self, mode: LoadMode) {
        self.loader = Some(Loader::arm(mode));
        self.candidates_found = 0;
    }

    pub(crate) fn set_candidates_found(&mut self, found: usize) {
        self.candidates_found = found;
    }

    pub(crate) fn set_reload_pending(&mut self, pending: bool) {
        self.reload_pending = pending;
    }

    pub(crate) fn take_reload_pending(&mut self) -> bool {
        std::mem::take(&mut self.reload_pending)
    }

    pub(crate) fn record_completed_load(&mut self) {
        self.completed_loads += 1;
    }

    pub(crate) fn confirm(&mut self, fingerprint: ListFingerprint) {
        self.confirmed.insert(fingerprint);
    }

    pub(crate) fn clear_confirmed(&mut self) {
        self.confirmed.clear();
    }

    pub(crate) fn tracked_fingerprint(&self) -> Option<&ListFingerprint> {
        self.tracked_fingerprint.as_ref()
    }

    pub(crate) fn set_tracked_fingerprint(&mut self, fingerprint: ListFingerprint) {
        self.tracked_fingerprint = Some(fingerprint);
    }

    pub(crate) fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub(crate) fn set_location(&mut self, location: String) {
        self.location = Some(location);
    }

    /// Arms `timer` with a fresh token, superseding any pending instance.
    pub(crate) fn arm(&mut self, timer: Timer, delay: Duration) -> Effect {
        self.next_token += 1;
        let token = self.next_token;
        self.armed.insert(timer, token);
        Effect::Schedule {
            timer,
            token,
            delay,
        }
    }

    /// Consumes a timer fire. Returns false for stale or cancelled timers.
    pub(crate) fn disarm(&mut self, timer: Timer, token: u64) -> bool {
        if self.armed.get(&timer) == Some(&token) {
            self.armed.remove(&timer);
            true
        } else {
            false
        }
    }

    /// Cancels every armed timer and forgets all session data except the config.
    pub(crate) fn tear_down(&mut self) -> Vec<Effect> {
        let effects = self
            .armed
            .keys()
            .map(|&timer| Effect::Cancel { timer })
            .collect();
        let config = std::mem::take(&mut self.config);
        let next_token = self.next_token;
        *self = Self {
            config,
            lifecycle: Lifecycle::TornDown,
            next_token,
            ..Self::default()
        };
        effects
    }
}
