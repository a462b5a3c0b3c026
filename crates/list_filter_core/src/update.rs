use filter_logging::{filter_debug, filter_info, filter_trace, filter_warn};

use crate::query::parse;
use crate::{
    Effect, FingerprintPurpose, Lifecycle, ListFingerprint, LoadMode, LoaderStep, Msg,
    SessionState, Timer, ViewKind,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// Effects are meant to be executed in order; replies they produce are fed back
/// through `update` after the whole batch has run.
pub fn update(mut state: SessionState, msg: Msg) -> (SessionState, Vec<Effect>) {
    if state.lifecycle() == Lifecycle::TornDown {
        filter_trace!("ignoring {:?} after teardown", msg);
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::SessionStarted => {
            if state.lifecycle() == Lifecycle::Waiting {
                vec![Effect::ProbeContainer]
            } else {
                Vec::new()
            }
        }
        Msg::ContainerProbed { present } => on_container_probed(&mut state, present),
        Msg::QueryChanged(raw) => {
            let query = parse(&raw);
            filter_debug!(
                "query changed: {} include, {} exclude",
                query.include_terms().len(),
                query.exclude_terms().len()
            );
            state.set_query(raw, query.clone());
            vec![Effect::ApplyFilter { query }]
        }
        Msg::Mutations { added, removed } => on_mutations(&mut state, added, removed),
        Msg::TimerFired { timer, token } => {
            if state.disarm(timer, token) {
                on_timer(&mut state, timer)
            } else {
                filter_trace!("stale {:?} fire (token {}) dropped", timer, token);
                Vec::new()
            }
        }
        Msg::ScrollableLocated { found } => on_scrollable_located(&mut state, found),
        Msg::CandidatesCounted(found) => {
            if state.has_active_loader() {
                filter_debug!("loading entries... ({found} found)");
                state.set_candidates_found(found);
            }
            Vec::new()
        }
        Msg::ExtentMeasured(extent) => on_extent_measured(&mut state, extent),
        Msg::FingerprintComputed {
            purpose,
            fingerprint,
        } => on_fingerprint(&mut state, purpose, fingerprint),
        Msg::LocationRead(location) => on_location_read(&mut state, location),
        Msg::ViewClassified { kind, fingerprint } => on_view_classified(&mut state, kind, fingerprint),
        Msg::Teardown => {
            filter_info!("session teardown");
            state.tear_down()
        }
    };

    (state, effects)
}

fn on_container_probed(state: &mut SessionState, present: bool) -> Vec<Effect> {
    if state.lifecycle() != Lifecycle::Waiting {
        return Vec::new();
    }
    if !present {
        let delay = state.config().container_poll;
        return vec![state.arm(Timer::ContainerPoll, delay)];
    }

    filter_info!("container detected, attaching session");
    state.set_lifecycle(Lifecycle::Attached);
    let mut effects = vec![Effect::ComputeFingerprint {
        purpose: FingerprintPurpose::Attach,
    }];
    effects.extend(arm_loader(state, LoadMode::Initial));
    effects.push(Effect::ReadLocation);
    effects
}

fn on_mutations(state: &mut SessionState, added: usize, removed: usize) -> Vec<Effect> {
    if state.lifecycle() != Lifecycle::Attached {
        return Vec::new();
    }
    let mut effects = vec![Effect::ApplyFilter {
        query: state.query().clone(),
    }];
    if added + removed > state.config().mutation_threshold {
        filter_trace!("significant mutation batch (+{added} -{removed}), debouncing");
        let delay = state.config().mutation_quiet_period;
        effects.push(state.arm(Timer::MutationDebounce, delay));
    }
    effects
}

fn on_timer(state: &mut SessionState, timer: Timer) -> Vec<Effect> {
    match timer {
        Timer::ContainerPoll => vec![Effect::ProbeContainer],
        Timer::LocateRetry => vec![Effect::LocateScrollable {
            min_overflow: state.config().scroll_slack,
        }],
        Timer::ScrollSettle => vec![Effect::CountCandidates, Effect::MeasureExtent],
        Timer::MutationDebounce => vec![Effect::ComputeFingerprint {
            purpose: FingerprintPurpose::ChangeCheck,
        }],
        Timer::NavigationPoll => vec![Effect::ReadLocation],
        Timer::NavigationSettle => vec![Effect::ClassifyView],
    }
}

/// Starts a loader attempt, or defers it when one is already running.
fn arm_loader(state: &mut SessionState, mode: LoadMode) -> Vec<Effect> {
    if state.has_active_loader() {
        filter_debug!("loader busy, deferring {:?} request", mode);
        state.set_reload_pending(true);
        return Vec::new();
    }
    filter_info!("arming loader ({:?})", mode);
    state.install_loader(mode);
    vec![Effect::LocateScrollable {
        min_overflow: state.config().scroll_slack,
    }]
}

fn resume_pending(state: &mut SessionState) -> Vec<Effect> {
    if state.take_reload_pending() {
        arm_loader(state, LoadMode::Reload)
    } else {
        Vec::new()
    }
}

fn on_scrollable_located(state: &mut SessionState, found: bool) -> Vec<Effect> {
    let config = state.config().clone();
    let (mode, step) = match state.loader_mut() {
        Some(loader) => (loader.mode(), loader.on_located(found, &config)),
        None => return Vec::new(),
    };

    match step {
        LoaderStep::RetryLocate => {
            filter_trace!("no scrollable region yet, retrying");
            vec![state.arm(Timer::LocateRetry, config.locate_retry_delay)]
        }
        LoaderStep::Scroll => scroll_and_settle(state),
        LoaderStep::GiveUp => {
            filter_warn!(
                "no scrollable region after {} retries, abandoning {:?} load",
                config.max_locate_tries,
                mode
            );
            let mut effects = vec![Effect::LoadAbandoned { mode }];
            effects.extend(resume_pending(state));
            effects
        }
        LoaderStep::Complete | LoaderStep::Ignored => Vec::new(),
    }
}

fn on_extent_measured(state: &mut SessionState, extent: u64) -> Vec<Effect> {
    let config = state.config().clone();
    let (mode, step, steps) = match state.loader_mut() {
        Some(loader) => {
            let step = loader.on_measured(extent, &config);
            (loader.mode(), step, loader.steps())
        }
        None => return Vec::new(),
    };

    match step {
        LoaderStep::Scroll => {
            filter_trace!("extent {extent}, continuing to scroll");
            scroll_and_settle(state)
        }
        LoaderStep::Complete => {
            filter_info!("{:?} load complete after {} measurements", mode, steps);
            state.record_completed_load();
            let mut effects = vec![
                Effect::LoadCompleted { mode },
                Effect::ApplyFilter {
                    query: state.query().clone(),
                },
                Effect::ComputeFingerprint {
                    purpose: FingerprintPurpose::Confirm,
                },
            ];
            effects.extend(resume_pending(state));
            effects
        }
        LoaderStep::RetryLocate | LoaderStep::GiveUp | LoaderStep::Ignored => Vec::new(),
    }
}

fn scroll_and_settle(state: &mut SessionState) -> Vec<Effect> {
    let delay = state.config().settle_delay;
    vec![Effect::ScrollToEnd, state.arm(Timer::ScrollSettle, delay)]
}

fn on_fingerprint(
    state: &mut SessionState,
    purpose: FingerprintPurpose,
    fingerprint: ListFingerprint,
) -> Vec<Effect> {
    match purpose {
        FingerprintPurpose::Attach => {
            filter_debug!("attach fingerprint {}", fingerprint.digest());
            state.set_tracked_fingerprint(fingerprint);
            Vec::new()
        }
        FingerprintPurpose::Confirm => {
            filter_info!("list {} confirmed fully loaded", fingerprint.digest());
            state.confirm(fingerprint);
            Vec::new()
        }
        FingerprintPurpose::ChangeCheck => {
            if state.tracked_fingerprint() == Some(&fingerprint) {
                return Vec::new();
            }
            filter_info!("list replaced, now {}", fingerprint.digest());
            state.set_tracked_fingerprint(fingerprint);
            arm_loader(state, LoadMode::Reload)
        }
        FingerprintPurpose::Navigation => {
            if !state.is_confirmed(&fingerprint) {
                filter_debug!("navigated to unconfirmed list, dropping confirmed set");
                state.clear_confirmed();
            }
            let delay = state.config().navigation_settle;
            vec![state.arm(Timer::NavigationSettle, delay)]
        }
    }
}

fn on_location_read(state: &mut SessionState, location: String) -> Vec<Effect> {
    if state.lifecycle() != Lifecycle::Attached {
        return Vec::new();
    }
    let mut effects = Vec::new();
    match state.location() {
        None => state.set_location(location),
        Some(previous) if previous != location => {
            filter_info!("location changed");
            state.set_location(location);
            effects.push(Effect::ComputeFingerprint {
                purpose: FingerprintPurpose::Navigation,
            });
        }
        Some(_) => {}
    }
    let delay = state.config().navigation_poll;
    effects.push(state.arm(Timer::NavigationPoll, delay));
    effects
}

fn on_view_classified(
    state: &mut SessionState,
    kind: ViewKind,
    fingerprint: ListFingerprint,
) -> Vec<Effect> {
    match kind {
        ViewKind::Overview => {
            filter_debug!("overview page, nothing to load");
            Vec::new()
        }
        ViewKind::Detail if state.is_confirmed(&fingerprint) => {
            filter_debug!("list {} already loaded, re-applying query", fingerprint.digest());
            vec![Effect::ApplyFilter {
                query: state.query().clone(),
            }]
        }
        ViewKind::Detail => arm_loader(state, LoadMode::Reload),
    }
}
