//! EEG-like waveform synthesis driven by the need-flag state.

use std::f64::consts::TAU;

use rand::Rng;

use super::artifacts;
use super::noise::{add_white_noise, PinkNoise};
use super::spectrum::SpectrumAnalyzer;
use super::transition::TransitionState;
use super::{HighlightInfo, SampleWindow, Synthesis};
use crate::error::Result;
use crate::params::{
    band_for, signal_constants::*, BandDefinition, SynthesisConfig, BACKGROUND_BANDS,
};
use crate::state::FlagState;

/// Synthesizer with pre-planned transforms; holds no per-call state
pub struct SignalSynthesizer {
    config: SynthesisConfig,
    pink: PinkNoise,
    analyzer: SpectrumAnalyzer,
    times: Vec<f64>,
}

impl SignalSynthesizer {
    /// Create a synthesizer with the specified configuration
    pub fn new(config: SynthesisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SynthesisConfig) -> Self {
        let sample_rate = SAMPLE_RATE_HZ as f64;
        let times = (0..BUFFER_LEN).map(|i| i as f64 / sample_rate).collect();

        Self {
            config,
            pink: PinkNoise::new(BUFFER_LEN, sample_rate, PINK_NOISE_GAIN),
            analyzer: SpectrumAnalyzer::new(
                BUFFER_LEN,
                sample_rate,
                PASSBAND_HZ,
                SMOOTHING_HALF_WINDOW,
            ),
            times,
        }
    }

    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Synthesize one 4 s buffer and analyze it.
    ///
    /// # Arguments
    /// * `flags` - Current need-flag snapshot
    /// * `now` - Wall-clock time in seconds (drives slow frequency modulation)
    /// * `previous` - Transition state returned by the previous call
    /// * `rng` - Random source; seed it for reproducible output
    ///
    /// # Returns
    /// The most recent 2 s of samples, the smoothed passband spectrum,
    /// highlight metadata and the transition state for the next call.
    pub fn synthesize<R: Rng>(
        &self,
        flags: &FlagState,
        now: f64,
        previous: &TransitionState,
        rng: &mut R,
    ) -> Synthesis {
        let transitions = previous.observe(flags, now);
        let mut buffer = vec![0.0; BUFFER_LEN];

        let artifact = if flags.any_active() {
            self.add_background(&mut buffer, rng);

            for (sample, noise) in buffer.iter_mut().zip(self.pink.generate(rng)) {
                *sample += noise;
            }

            for flag in flags.active() {
                let progress = transitions.progress(flag, now, self.config.transition);
                self.add_overlay(&mut buffer, band_for(flag), progress, now);
            }

            let artifact = artifacts::maybe_inject(
                &mut buffer,
                &self.times,
                self.config.artifact_probability,
                rng,
            );
            add_white_noise(&mut buffer, ACTIVE_NOISE_STD, rng);
            artifact
        } else {
            // Idle: disconnected baseline, nothing but a faint noise floor
            add_white_noise(&mut buffer, IDLE_NOISE_STD, rng);
            None
        };

        let spectrum = self.analyzer.analyze(&buffer);

        let start = BUFFER_LEN - DISPLAY_LEN;
        let window = SampleWindow {
            times: self.times[start..].to_vec(),
            values: buffer[start..].to_vec(),
        };

        Synthesis {
            window,
            spectrum,
            highlight: flags
                .first_active()
                .map(|flag| HighlightInfo::from(band_for(flag))),
            artifact,
            transitions,
        }
    }

    /// Synthesize without transition history
    pub fn synthesize_stateless<R: Rng>(
        &self,
        flags: &FlagState,
        now: f64,
        rng: &mut R,
    ) -> Synthesis {
        self.synthesize(flags, now, &TransitionState::default(), rng)
    }

    /// Sum the jittered background rhythms into `buffer`
    fn add_background<R: Rng>(&self, buffer: &mut [f64], rng: &mut R) {
        for band in BACKGROUND_BANDS.iter() {
            let freq_hz = band.frequency_hz
                + rng.gen_range(-BACKGROUND_FREQ_JITTER_HZ..=BACKGROUND_FREQ_JITTER_HZ);
            let amplitude =
                band.amplitude * rng.gen_range(BACKGROUND_AMP_RANGE.0..=BACKGROUND_AMP_RANGE.1);
            let phase = if self.config.random_phase {
                rng.gen_range(0.0..TAU)
            } else {
                0.0
            };

            for (sample, &t) in buffer.iter_mut().zip(&self.times) {
                *sample += amplitude * (TAU * freq_hz * t + phase).sin();
            }
        }
    }

    /// Add an asserted band's fundamental, harmonics and alpha suppression
    fn add_overlay(&self, buffer: &mut [f64], band: &BandDefinition, progress: f64, now: f64) {
        let freq_hz = band.base_frequency_hz
            + FREQ_MODULATION_DEPTH_HZ * (TAU * FREQ_MODULATION_RATE_HZ * now).sin();
        let amplitude =
            band.base_amplitude + (band.focus_amplitude - band.base_amplitude) * progress;
        let suppression = if band.suppresses_alpha() {
            ALPHA_SUPPRESSION_AMP * progress
        } else {
            0.0
        };

        for (sample, &t) in buffer.iter_mut().zip(&self.times) {
            let phase = TAU * freq_hz * t;
            *sample += amplitude * phase.sin()
                + amplitude * SECOND_HARMONIC_GAIN * (2.0 * phase).sin()
                + amplitude * THIRD_HARMONIC_GAIN * (3.0 * phase).sin()
                - suppression * (TAU * ALPHA_SUPPRESSION_HZ * t).sin();
        }
    }
}

impl Default for SignalSynthesizer {
    fn default() -> Self {
        Self::build(SynthesisConfig::default())
    }
}
