//! Noise generation for the simulated feed.
//!
//! Pink noise is shaped in the frequency domain (1/|f| envelope with random
//! per-bin weights) and brought back with an inverse FFT, which gives the
//! low-frequency-dominant background typical of scalp recordings.

use std::f64::consts::TAU;
use std::sync::Arc;

use rand::Rng;
use rustfft::{num_complex::Complex, Fft, FftPlanner};

use super::spectrum::fft_frequencies;

/// Draw from N(0, 1) using the Box-Muller transform
pub fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    // u1 must stay away from 0 so ln() is finite
    let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// Add zero-mean Gaussian white noise with the given standard deviation
pub fn add_white_noise<R: Rng>(buffer: &mut [f64], std_dev: f64, rng: &mut R) {
    for sample in buffer.iter_mut() {
        *sample += std_dev * standard_normal(rng);
    }
}

/// Pink (1/f) noise generator with a pre-planned inverse FFT
pub struct PinkNoise {
    inverse: Arc<dyn Fft<f64>>,
    envelope: Vec<f64>,
    gain: f64,
}

impl PinkNoise {
    /// Create a generator for buffers of `len` samples at `sample_rate_hz`
    pub fn new(len: usize, sample_rate_hz: f64, gain: f64) -> Self {
        let mut planner = FftPlanner::new();
        let inverse = planner.plan_fft_inverse(len);

        Self {
            inverse,
            envelope: pink_envelope(len, sample_rate_hz),
            gain,
        }
    }

    /// Generate one buffer of pink noise
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        let mut spectrum: Vec<Complex<f64>> = self
            .envelope
            .iter()
            .map(|&magnitude| Complex::new(magnitude * standard_normal(rng), 0.0))
            .collect();

        self.inverse.process(&mut spectrum);

        // rustfft leaves the inverse unnormalized
        let scale = self.gain / spectrum.len() as f64;
        spectrum.iter().map(|c| c.re * scale).collect()
    }
}

/// 1/|f| magnitudes over the full FFT grid.
///
/// The DC bin would divide by zero, so it takes the first nonzero bin's value.
fn pink_envelope(len: usize, sample_rate_hz: f64) -> Vec<f64> {
    let mut envelope: Vec<f64> = fft_frequencies(len, sample_rate_hz)
        .iter()
        .map(|f| if *f == 0.0 { 0.0 } else { 1.0 / f.abs() })
        .collect();

    if len > 1 {
        envelope[0] = envelope[1];
    }
    envelope
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mean_and_std(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (mean, var.sqrt())
    }

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let draws: Vec<f64> = (0..20_000).map(|_| standard_normal(&mut rng)).collect();
        let (mean, std) = mean_and_std(&draws);

        assert!(mean.abs() < 0.05, "mean {}", mean);
        assert!((std - 1.0).abs() < 0.05, "std {}", std);
    }

    #[test]
    fn test_white_noise_scale() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut buffer = vec![0.0; 8192];
        add_white_noise(&mut buffer, 3.0, &mut rng);
        let (_, std) = mean_and_std(&buffer);

        assert!((std - 3.0).abs() < 0.2, "std {}", std);
    }

    #[test]
    fn test_pink_envelope_clamps_dc() {
        let envelope = pink_envelope(1024, 256.0);

        // Bin resolution = 256 / 1024 = 0.25 Hz, so bin 1 is 1 / 0.25
        assert_eq!(envelope[1], 4.0);
        assert_eq!(envelope[0], envelope[1]);
        assert!(envelope.iter().all(|v| v.is_finite()));

        // Mirrored negative frequencies share magnitudes
        assert_eq!(envelope[1], envelope[1023]);
        assert_eq!(envelope[100], envelope[924]);
    }

    #[test]
    fn test_pink_noise_is_finite_and_seeded() {
        let pink = PinkNoise::new(1024, 256.0, 8.0);

        let a = pink.generate(&mut StdRng::seed_from_u64(3));
        let b = pink.generate(&mut StdRng::seed_from_u64(3));

        assert_eq!(a.len(), 1024);
        assert!(a.iter().all(|v| v.is_finite()));
        assert_eq!(a, b);
    }
}
