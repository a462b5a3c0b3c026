use std::time::Duration;

use crate::{LoadMode, ParsedQuery};

/// Named timers a session may arm. At most one of each is pending at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Timer {
    ContainerPoll,
    LocateRetry,
    ScrollSettle,
    MutationDebounce,
    NavigationPoll,
    NavigationSettle,
}

impl Timer {
    pub const ALL: [Timer; 6] = [
        Timer::ContainerPoll,
        Timer::LocateRetry,
        Timer::ScrollSettle,
        Timer::MutationDebounce,
        Timer::NavigationPoll,
        Timer::NavigationSettle,
    ];
}

/// Why a fingerprint was requested; echoed back in `Msg::FingerprintComputed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintPurpose {
    /// Baseline captured when the session attaches to the container.
    Attach,
    /// The loader finished; the list is fully materialized.
    Confirm,
    /// The mutation quiet period elapsed.
    ChangeCheck,
    /// The location changed.
    Navigation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Arm `timer`, replacing any pending instance. Fire back `Msg::TimerFired` with `token`.
    Schedule {
        timer: Timer,
        token: u64,
        delay: Duration,
    },
    Cancel {
        timer: Timer,
    },
    /// Reply with `Msg::ContainerProbed`.
    ProbeContainer,
    /// Extract records and toggle visibility according to `query`.
    ApplyFilter {
        query: ParsedQuery,
    },
    /// Reply with `Msg::ScrollableLocated`.
    LocateScrollable {
        min_overflow: u64,
    },
    ScrollToEnd,
    /// Reply with `Msg::CandidatesCounted`: how many entries are on screen so far.
    CountCandidates,
    /// Reply with `Msg::ExtentMeasured`.
    MeasureExtent,
    /// Reply with `Msg::FingerprintComputed`.
    ComputeFingerprint {
        purpose: FingerprintPurpose,
    },
    /// Reply with `Msg::LocationRead`.
    ReadLocation,
    /// Reply with `Msg::ViewClassified`.
    ClassifyView,
    /// A loader attempt reached `Complete`. Emitted exactly once per attempt,
    /// immediately before the continuation's `ApplyFilter`.
    LoadCompleted {
        mode: LoadMode,
    },
    /// A loader attempt ran out of locate retries.
    LoadAbandoned {
        mode: LoadMode,
    },
}
