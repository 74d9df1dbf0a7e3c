//! Overlay amplitude ramps, threaded explicitly between synthesis calls.

use crate::params::TransitionMode;
use crate::state::{Flag, FlagState};

/// When each currently asserted flag was first seen set (seconds)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransitionState {
    asserted_since: [Option<f64>; 4],
}

impl TransitionState {
    /// Next state after seeing `flags` at `now`.
    ///
    /// Newly asserted flags start their ramp at `now`, flags that stay set
    /// keep their start time, cleared flags are forgotten.
    pub fn observe(&self, flags: &FlagState, now: f64) -> Self {
        let mut next = Self::default();
        for flag in flags.active() {
            next.asserted_since[flag.index()] =
                Some(self.asserted_since[flag.index()].unwrap_or(now));
        }
        next
    }

    pub fn asserted_since(&self, flag: Flag) -> Option<f64> {
        self.asserted_since[flag.index()]
    }

    /// Ramp progress in [0, 1] for `flag` at `now`
    pub fn progress(&self, flag: Flag, now: f64, mode: TransitionMode) -> f64 {
        match mode {
            TransitionMode::Immediate => 1.0,
            TransitionMode::Ramped { duration_s } => match self.asserted_since(flag) {
                Some(since) => ((now - since) / duration_s).clamp(0.0, 1.0),
                None => 0.0,
            },
        }
    }
}
