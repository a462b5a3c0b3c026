//! Bounded polling state machine that scrolls a lazily-loaded list to exhaustion.
//!
//! The list gives no completion signal, so termination is inferred from a fixed point
//! on the measured scroll extent. The machine is pure: the session feeds it locate
//! results and measurements and turns the returned [`LoaderStep`] into effects.

use crate::SessionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Locating,
    Scrolling,
    Stalled,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// First load after the container appeared.
    Initial,
    /// Re-armed after a list replacement or navigation.
    Reload,
}

/// What the session should do next for the active attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderStep {
    RetryLocate,
    Scroll,
    Complete,
    GiveUp,
    /// Input arrived in a state that does not expect it.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loader {
    mode: LoadMode,
    state: LoadState,
    tries: u32,
    last_extent: u64,
    stalls: u32,
    steps: u32,
}

impl Loader {
    pub fn arm(mode: LoadMode) -> Self {
        Self {
            mode,
            state: LoadState::Locating,
            tries: 0,
            last_extent: 0,
            stalls: 0,
            steps: 0,
        }
    }

    pub fn mode(&self) -> LoadMode {
        self.mode
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Scroll/measure cycles run so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self.state,
            LoadState::Locating | LoadState::Scrolling | LoadState::Stalled
        )
    }

    pub fn on_located(&mut self, found: bool, config: &SessionConfig) -> LoaderStep {
        if self.state != LoadState::Locating {
            return LoaderStep::Ignored;
        }
        if found {
            self.state = LoadState::Scrolling;
            return LoaderStep::Scroll;
        }
        if self.tries < config.max_locate_tries {
            self.tries += 1;
            LoaderStep::RetryLocate
        } else {
            self.state = LoadState::Idle;
            LoaderStep::GiveUp
        }
    }

    pub fn on_measured(&mut self, extent: u64, config: &SessionConfig) -> LoaderStep {
        if !matches!(self.state, LoadState::Scrolling | LoadState::Stalled) {
            return LoaderStep::Ignored;
        }
        self.steps += 1;
        if extent != self.last_extent {
            self.last_extent = extent;
            self.stalls = 0;
            self.state = LoadState::Scrolling;
            LoaderStep::Scroll
        } else if self.stalls < config.stall_tolerance {
            self.stalls += 1;
            self.state = LoadState::Stalled;
            LoaderStep::Scroll
        } else {
            self.state = LoadState::Complete;
            LoaderStep::Complete
        }
    }
}
