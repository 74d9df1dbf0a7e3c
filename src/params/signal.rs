//! Synthesis configuration and compiled signal constants.

use crate::error::{Error, Result};

/// Signal constants (compile-time, shared by synthesis and analysis)
pub mod signal_constants {
    /// Sampling rate of the simulated feed (Hz)
    pub const SAMPLE_RATE_HZ: usize = 256;

    /// Length of the synthesized buffer (seconds)
    pub const WINDOW_S: usize = 4;

    /// Samples per synthesized buffer (256 Hz × 4 s)
    pub const BUFFER_LEN: usize = SAMPLE_RATE_HZ * WINDOW_S;

    /// Length of the time-domain output (seconds, most recent part of the buffer)
    pub const DISPLAY_WINDOW_S: usize = 2;

    /// Samples in the time-domain output
    pub const DISPLAY_LEN: usize = SAMPLE_RATE_HZ * DISPLAY_WINDOW_S;

    /// Passband kept in the spectrum (Hz, inclusive)
    pub const PASSBAND_HZ: (f64, f64) = (1.0, 50.0);

    /// Half-width of the spectral moving average (bins each side)
    pub const SMOOTHING_HALF_WINDOW: usize = 3;

    /// Gain applied to the inverse-transformed pink noise
    pub const PINK_NOISE_GAIN: f64 = 8.0;

    /// White noise std while any flag is asserted (µV)
    pub const ACTIVE_NOISE_STD: f64 = 3.0;

    /// White noise std of the idle/disconnected baseline (µV)
    pub const IDLE_NOISE_STD: f64 = 0.1;

    /// Background band frequency jitter (± Hz)
    pub const BACKGROUND_FREQ_JITTER_HZ: f64 = 0.5;

    /// Background band amplitude factor range
    pub const BACKGROUND_AMP_RANGE: (f64, f64) = (0.8, 1.2);

    /// Slow frequency wobble of asserted bands (Hz amplitude, Hz rate)
    pub const FREQ_MODULATION_DEPTH_HZ: f64 = 0.5;
    pub const FREQ_MODULATION_RATE_HZ: f64 = 0.1;

    /// Harmonic weights relative to the fundamental
    pub const SECOND_HARMONIC_GAIN: f64 = 0.3;
    pub const THIRD_HARMONIC_GAIN: f64 = 0.1;

    /// Alpha suppression applied by focus-class bands (µV at 10 Hz)
    pub const ALPHA_SUPPRESSION_AMP: f64 = 8.0;
    pub const ALPHA_SUPPRESSION_HZ: f64 = 10.0;

    /// Half-width of the shaded region around an asserted band (Hz)
    pub const HIGHLIGHT_HALF_WIDTH_HZ: f64 = 2.0;

    /// Default chance of injecting an artifact per synthesis call
    pub const DEFAULT_ARTIFACT_PROBABILITY: f64 = 0.05;

    /// Default duration of the amplitude ramp after a flag is asserted (seconds)
    pub const DEFAULT_RAMP_DURATION_S: f64 = 2.0;
}

/// How the overlay amplitude evolves after a flag is asserted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionMode {
    /// Every call is treated as past the transition (progress = 1)
    Immediate,

    /// Amplitude ramps from base to focus over `duration_s` of wall-clock time
    Ramped { duration_s: f64 },
}

impl Default for TransitionMode {
    fn default() -> Self {
        Self::Immediate
    }
}

impl TransitionMode {
    /// Ramped mode with the default 2 s duration
    pub fn ramped() -> Self {
        Self::Ramped {
            duration_s: signal_constants::DEFAULT_RAMP_DURATION_S,
        }
    }
}

/// Behavioural toggles of the synthesizer
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Overlay amplitude ramp behaviour
    pub transition: TransitionMode,

    /// Probability of injecting one artifact per call (0..=1)
    /// Default: 0.05
    pub artifact_probability: f64,

    /// Give each background band a random phase offset
    /// Default: false (all rhythms start at phase 0)
    pub random_phase: bool,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            transition: TransitionMode::default(),
            artifact_probability: signal_constants::DEFAULT_ARTIFACT_PROBABILITY,
            random_phase: false,
        }
    }
}

impl SynthesisConfig {
    /// Validate configuration (probability in range, positive ramp)
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.artifact_probability) {
            return Err(Error::Config(format!(
                "artifact probability must be within [0, 1], got {}",
                self.artifact_probability
            )));
        }
        if let TransitionMode::Ramped { duration_s } = self.transition {
            if !(duration_s > 0.0) {
                return Err(Error::Config(format!(
                    "ramp duration must be > 0 s, got {}",
                    duration_s
                )));
            }
        }
        Ok(())
    }
}
