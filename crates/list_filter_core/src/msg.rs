use crate::{FingerprintPurpose, ListFingerprint, Timer, ViewKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Host started the session; begin probing for the container.
    SessionStarted,
    /// Result of `Effect::ProbeContainer`.
    ContainerProbed { present: bool },
    /// User edited the query input (raw text).
    QueryChanged(String),
    /// One mutation batch observed in the container subtree.
    Mutations { added: usize, removed: usize },
    /// A scheduled timer elapsed.
    TimerFired { timer: Timer, token: u64 },
    /// Result of `Effect::LocateScrollable`.
    ScrollableLocated { found: bool },
    /// Result of `Effect::CountCandidates`.
    CandidatesCounted(usize),
    /// Result of `Effect::MeasureExtent`.
    ExtentMeasured(u64),
    /// Result of `Effect::ComputeFingerprint`.
    FingerprintComputed {
        purpose: FingerprintPurpose,
        fingerprint: ListFingerprint,
    },
    /// Result of `Effect::ReadLocation`.
    LocationRead(String),
    /// Result of `Effect::ClassifyView`.
    ViewClassified {
        kind: ViewKind,
        fingerprint: ListFingerprint,
    },
    /// Host is tearing the session down.
    Teardown,
}
