//! Spectral analysis: forward FFT, passband masking and smoothing.

use std::sync::Arc;

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use serde::Serialize;

/// Band-limited, smoothed power spectrum
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpectrumResult {
    /// Bin centre frequencies inside the passband (Hz)
    pub frequencies: Vec<f64>,

    /// Smoothed power per bin (µV²/Hz)
    pub power: Vec<f64>,
}

impl SpectrumResult {
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// (frequency, power) pairs in ascending frequency
    pub fn pairs(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies.iter().copied().zip(self.power.iter().copied())
    }

    /// Total power of bins within `[low_hz, high_hz]`
    pub fn band_power(&self, low_hz: f64, high_hz: f64) -> f64 {
        self.pairs()
            .filter(|(f, _)| *f >= low_hz && *f <= high_hz)
            .map(|(_, p)| p)
            .sum()
    }

    /// Frequency of the strongest bin
    pub fn peak_frequency(&self) -> Option<f64> {
        self.pairs()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(f, _)| f)
    }
}

/// Forward FFT analyzer for fixed-length real buffers
pub struct SpectrumAnalyzer {
    forward: Arc<dyn Fft<f64>>,
    len: usize,
    frequencies: Vec<f64>,
    passband: Vec<bool>,
    half_window: usize,
}

impl SpectrumAnalyzer {
    /// Create an analyzer for `len`-sample buffers
    ///
    /// # Arguments
    /// * `sample_rate_hz` - Sampling rate of the analyzed buffers
    /// * `passband_hz` - Inclusive (low, high) range kept in the output
    /// * `half_window` - Moving-average half-width in bins
    pub fn new(
        len: usize,
        sample_rate_hz: f64,
        passband_hz: (f64, f64),
        half_window: usize,
    ) -> Self {
        let mut planner = FftPlanner::new();
        let forward = planner.plan_fft_forward(len);
        let frequencies = rfft_frequencies(len, sample_rate_hz);
        let passband = passband_mask(&frequencies, passband_hz.0, passband_hz.1);

        Self {
            forward,
            len,
            frequencies,
            passband,
            half_window,
        }
    }

    /// Number of one-sided bins before masking
    pub fn bin_count(&self) -> usize {
        self.frequencies.len()
    }

    /// Masked, smoothed power spectrum of `samples`
    pub fn analyze(&self, samples: &[f64]) -> SpectrumResult {
        debug_assert_eq!(samples.len(), self.len);

        let mut buffer: Vec<Complex<f64>> =
            samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
        self.forward.process(&mut buffer);

        // One-sided spectrum with out-of-band bins zeroed before smoothing
        let power: Vec<f64> = buffer[..self.bin_count()]
            .iter()
            .zip(&self.passband)
            .map(|(c, &keep)| if keep { c.norm_sqr() } else { 0.0 })
            .collect();

        let smoothed = smooth_spectrum(&power, self.half_window);

        let (frequencies, power): (Vec<f64>, Vec<f64>) = self
            .frequencies
            .iter()
            .zip(&smoothed)
            .zip(&self.passband)
            .filter(|(_, &keep)| keep)
            .map(|((&f, &p), _)| (f, p))
            .unzip();

        SpectrumResult { frequencies, power }
    }
}

/// One-sided bin frequencies: k·fs/n for k in 0..=n/2
pub fn rfft_frequencies(len: usize, sample_rate_hz: f64) -> Vec<f64> {
    let resolution = sample_rate_hz / len as f64;
    (0..=len / 2).map(|k| k as f64 * resolution).collect()
}

/// Full FFT grid: non-negative frequencies first, then the negative half
pub fn fft_frequencies(len: usize, sample_rate_hz: f64) -> Vec<f64> {
    let resolution = sample_rate_hz / len as f64;
    let positive = (len - 1) / 2 + 1;
    (0..len)
        .map(|k| {
            if k < positive {
                k as f64 * resolution
            } else {
                (k as f64 - len as f64) * resolution
            }
        })
        .collect()
}

/// Bins whose frequency lies within `[low_hz, high_hz]`
pub fn passband_mask(frequencies: &[f64], low_hz: f64, high_hz: f64) -> Vec<bool> {
    frequencies
        .iter()
        .map(|f| *f >= low_hz && *f <= high_hz)
        .collect()
}

/// Centered moving average of width `2 * half_window + 1`.
///
/// Single pass. Bins closer than `half_window` to either edge have no full
/// window and are copied through unchanged.
pub fn smooth_spectrum(values: &[f64], half_window: usize) -> Vec<f64> {
    let mut smoothed = values.to_vec();
    if values.len() <= 2 * half_window {
        return smoothed;
    }

    let width = (2 * half_window + 1) as f64;
    for i in half_window..values.len() - half_window {
        let window = &values[i - half_window..=i + half_window];
        smoothed[i] = window.iter().sum::<f64>() / width;
    }
    smoothed
}
