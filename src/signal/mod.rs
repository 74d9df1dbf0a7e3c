//! Signal synthesis and spectral analysis.
//!
//! Builds a 4 s EEG-like buffer from background rhythms, pink noise and the
//! overlays of asserted need flags, then reduces it to a 2 s display window
//! and a smoothed 1-50 Hz power spectrum.

mod artifacts;
mod noise;
mod spectrum;
mod synthesis;
mod transition;

use serde::Serialize;

use crate::params::BandDefinition;

// Re-export public types
pub use artifacts::{maybe_inject, Artifact};
pub use noise::{add_white_noise, standard_normal, PinkNoise};
pub use spectrum::{
    fft_frequencies, passband_mask, rfft_frequencies, smooth_spectrum, SpectrumAnalyzer,
    SpectrumResult,
};
pub use synthesis::SignalSynthesizer;
pub use transition::TransitionState;

/// Most recent part of the synthesized buffer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleWindow {
    /// Sample timestamps within the 4 s buffer (seconds)
    pub times: Vec<f64>,

    /// Amplitudes (µV)
    pub values: Vec<f64>,
}

impl SampleWindow {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (time, amplitude) pairs in time order
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Population standard deviation of the amplitudes
    pub fn std_dev(&self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let n = self.values.len() as f64;
        let mean = self.values.iter().sum::<f64>() / n;
        let var = self.values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        var.sqrt()
    }
}

/// Band highlighted for the first asserted flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HighlightInfo {
    /// Base frequency of the band (Hz)
    pub freq: f64,

    /// Display name of the band
    pub name: &'static str,
}

impl From<&BandDefinition> for HighlightInfo {
    fn from(band: &BandDefinition) -> Self {
        Self {
            freq: band.base_frequency_hz,
            name: band.display_name,
        }
    }
}

/// Result of one synthesis call
#[derive(Debug, Clone)]
pub struct Synthesis {
    pub window: SampleWindow,
    pub spectrum: SpectrumResult,
    pub highlight: Option<HighlightInfo>,

    /// Artifact injected into this buffer, if any
    pub artifact: Option<Artifact>,

    /// Pass to the next call to keep overlay ramps continuous
    pub transitions: TransitionState,
}
