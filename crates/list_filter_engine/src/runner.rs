//! Synchronous effect runner on a virtual clock.
//!
//! The runner owns the session state and the document tree it filters. Messages are
//! processed FIFO: each one goes through `update`, its effects run in order, replies
//! and any mutation batches the tree recorded are queued behind it.

use std::collections::VecDeque;
use std::time::Duration;

use filter_logging::{filter_debug, filter_error, filter_info, filter_trace, set_virtual_millis};
use list_filter_core::{
    update, Effect, Lifecycle, Msg, SessionConfig, SessionState, SessionView, Timer,
};

use crate::classify::ViewClassifier;
use crate::extract::RecordExtractor;
use crate::filter::{apply_filter, FilterOutcome};
use crate::scroll::locate_scrollable;
use crate::timers::TimerQueue;
use crate::tree::DocumentTree;

/// Upper bound on messages handled by one pump; a feedback loop past it is dropped.
const MAX_MESSAGES_PER_PUMP: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    pub filter_passes: u32,
    pub loads_completed: u32,
    pub loads_abandoned: u32,
    pub timers_fired: u32,
    pub last_filter: Option<FilterOutcome>,
}

pub struct SessionRunner<T: DocumentTree> {
    tree: T,
    state: SessionState,
    timers: TimerQueue,
    inbox: VecDeque<Msg>,
    extractor: RecordExtractor,
    classifier: ViewClassifier,
    scrollable: Option<T::Handle>,
    stats: RunStats,
}

impl<T: DocumentTree> SessionRunner<T> {
    pub fn new(tree: T, config: SessionConfig) -> Self {
        Self {
            tree,
            state: SessionState::new(config),
            timers: TimerQueue::new(),
            inbox: VecDeque::new(),
            extractor: RecordExtractor::new(),
            classifier: ViewClassifier::default(),
            scrollable: None,
            stats: RunStats::default(),
        }
    }

    pub fn start(&mut self) {
        self.dispatch(Msg::SessionStarted);
    }

    pub fn query_changed(&mut self, raw: impl Into<String>) {
        self.dispatch(Msg::QueryChanged(raw.into()));
    }

    pub fn teardown(&mut self) {
        self.dispatch(Msg::Teardown);
    }

    pub fn dispatch(&mut self, msg: Msg) {
        self.inbox.push_back(msg);
        self.pump();
    }

    /// Lets the host change the document, then reports whatever the change recorded.
    pub fn mutate_tree<R>(&mut self, change: impl FnOnce(&mut T) -> R) -> R {
        let result = change(&mut self.tree);
        self.collect_mutations();
        self.pump();
        result
    }

    /// Moves the virtual clock forward by `by`, firing every timer that falls due.
    pub fn advance(&mut self, by: Duration) {
        let target = self.timers.now() + by;
        self.advance_until(target);
    }

    /// Fires timers until the session settles or `limit` of virtual time has passed.
    /// Returns whether it settled.
    pub fn run_until_settled(&mut self, limit: Duration) -> bool {
        let horizon = self.timers.now() + limit;
        loop {
            if self.is_settled() {
                return true;
            }
            match self.timers.next_deadline() {
                Some(deadline) if deadline <= horizon => self.advance_until(deadline),
                _ => {
                    self.advance_until(horizon);
                    return self.is_settled();
                }
            }
        }
    }

    /// No load running and nothing armed besides the navigation poll.
    pub fn is_settled(&self) -> bool {
        let loading = self.state.loader().is_some_and(|loader| loader.is_active());
        let busy_timer = Timer::ALL
            .iter()
            .any(|&timer| timer != Timer::NavigationPoll && self.state.is_armed(timer));
        self.state.lifecycle() != Lifecycle::Waiting && !loading && !busy_timer
    }

    pub fn view(&self) -> SessionView {
        self.state.view()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    fn advance_until(&mut self, target: Duration) {
        while let Some(due) = self.timers.pop_due(target) {
            sync_clock(due.deadline);
            self.stats.timers_fired += 1;
            self.dispatch(Msg::TimerFired {
                timer: due.timer,
                token: due.token,
            });
        }
        self.timers.advance_to(target);
        sync_clock(self.timers.now());
    }

    fn pump(&mut self) {
        let mut handled = 0;
        while let Some(msg) = self.inbox.pop_front() {
            handled += 1;
            if handled > MAX_MESSAGES_PER_PUMP {
                filter_error!(
                    "message budget exhausted, dropping {} queued messages",
                    self.inbox.len() + 1
                );
                self.inbox.clear();
                return;
            }

            filter_trace!("msg {:?}", msg);
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;

            for effect in effects {
                if let Some(reply) = self.execute(effect) {
                    self.inbox.push_back(reply);
                }
            }
            self.collect_mutations();
        }
    }

    fn execute(&mut self, effect: Effect) -> Option<Msg> {
        match effect {
            Effect::Schedule {
                timer,
                token,
                delay,
            } => {
                self.timers.schedule(timer, token, delay);
                None
            }
            Effect::Cancel { timer } => {
                self.timers.cancel(timer);
                None
            }
            Effect::ProbeContainer => Some(Msg::ContainerProbed {
                present: self.tree.container().is_some(),
            }),
            Effect::ApplyFilter { query } => {
                let outcome = apply_filter(&mut self.tree, &self.extractor, &query);
                self.stats.filter_passes += 1;
                self.stats.last_filter = Some(outcome);
                None
            }
            Effect::LocateScrollable { min_overflow } => {
                self.scrollable = locate_scrollable(&self.tree, min_overflow);
                Some(Msg::ScrollableLocated {
                    found: self.scrollable.is_some(),
                })
            }
            Effect::ScrollToEnd => {
                if let Some(node) = self.scrollable {
                    self.tree.scroll_to_end(node);
                }
                None
            }
            Effect::CountCandidates => Some(Msg::CandidatesCounted(
                self.extractor.candidate_count(&self.tree),
            )),
            Effect::MeasureExtent => {
                let extent = self
                    .scrollable
                    .map(|node| self.tree.scroll_metrics(node).scroll_extent)
                    .unwrap_or(0);
                Some(Msg::ExtentMeasured(extent))
            }
            Effect::ComputeFingerprint { purpose } => Some(Msg::FingerprintComputed {
                purpose,
                fingerprint: self.extractor.fingerprint(&self.tree),
            }),
            Effect::ReadLocation => Some(Msg::LocationRead(self.tree.location())),
            Effect::ClassifyView => {
                let kind = self.classifier.classify(&self.tree);
                filter_debug!("view classified as {:?}", kind);
                Some(Msg::ViewClassified {
                    kind,
                    fingerprint: self.extractor.fingerprint(&self.tree),
                })
            }
            Effect::LoadCompleted { mode } => {
                self.stats.loads_completed += 1;
                filter_info!("{:?} load finished", mode);
                None
            }
            Effect::LoadAbandoned { mode } => {
                self.stats.loads_abandoned += 1;
                self.scrollable = None;
                filter_info!("{:?} load abandoned", mode);
                None
            }
        }
    }

    fn collect_mutations(&mut self) {
        for batch in self.tree.take_mutations() {
            self.inbox.push_back(Msg::Mutations {
                added: batch.added,
                removed: batch.removed,
            });
        }
    }
}

fn sync_clock(now: Duration) {
    set_virtual_millis(u64::try_from(now.as_millis()).unwrap_or(u64::MAX));
}
