//! Transient artifacts that mimic contamination in real recordings.

use std::f64::consts::TAU;
use std::fmt;

use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// Kind of transient disturbance injected into a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Artifact {
    /// Eye blink: one large Gaussian pulse
    Blink,

    /// Muscle tension: a burst of 50-80 Hz activity
    Muscle,

    /// Head movement: a slow signed baseline drift
    Movement,
}

impl Artifact {
    pub const ALL: [Artifact; 3] = [Artifact::Blink, Artifact::Muscle, Artifact::Movement];

    pub fn name(self) -> &'static str {
        match self {
            Artifact::Blink => "blink",
            Artifact::Muscle => "muscle",
            Artifact::Movement => "movement",
        }
    }

    /// Add this artifact to `buffer`, sampled at `times` (seconds)
    pub fn apply<R: Rng>(self, buffer: &mut [f64], times: &[f64], rng: &mut R) {
        let span_s = times.last().copied().unwrap_or(0.0);

        match self {
            Artifact::Blink => {
                let center_s = rng.gen_range(0.5..=3.5);
                let width_s = 0.2 / 4.0;
                let amplitude = 60.0 * rng.gen_range(0.5..=1.5);

                for (sample, &t) in buffer.iter_mut().zip(times) {
                    *sample += amplitude * (-((t - center_s) / width_s).powi(2)).exp();
                }
            }
            Artifact::Muscle => {
                let freq_hz = rng.gen_range(50.0..=80.0);
                let duration_s = rng.gen_range(0.3..=1.0);
                let start_s = rng.gen_range(0.0..=(span_s - duration_s).max(0.0));
                let amplitude = 25.0 * rng.gen_range(0.5..=1.5);

                for (sample, &t) in buffer.iter_mut().zip(times) {
                    if t >= start_s && t <= start_s + duration_s {
                        *sample += amplitude * (TAU * freq_hz * t).sin();
                    }
                }
            }
            Artifact::Movement => {
                let duration_s = rng.gen_range(0.5..=1.5);
                let start_s = rng.gen_range(0.0..=(span_s - duration_s).max(0.0));
                let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
                let amplitude = sign * 40.0 * rng.gen_range(0.5..=1.5);

                // Hann-shaped bump: zero at both ends, peak mid-way
                for (sample, &t) in buffer.iter_mut().zip(times) {
                    let phase = (t - start_s) / duration_s;
                    if (0.0..=1.0).contains(&phase) {
                        *sample += amplitude * 0.5 * (1.0 - (TAU * phase).cos());
                    }
                }
            }
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// With chance `probability`, pick one artifact uniformly and add it
pub fn maybe_inject<R: Rng>(
    buffer: &mut [f64],
    times: &[f64],
    probability: f64,
    rng: &mut R,
) -> Option<Artifact> {
    if rng.gen::<f64>() >= probability {
        return None;
    }

    let artifact = Artifact::ALL[rng.gen_range(0..Artifact::ALL.len())];
    artifact.apply(buffer, times, rng);
    debug!(artifact = artifact.name(), "injected artifact");
    Some(artifact)
}
