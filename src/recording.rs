//! Capture successive synthesis frames to a WAV file.

use rand::Rng;
use tracing::info;

use crate::error::Result;
use crate::params::{signal_constants::SAMPLE_RATE_HZ, RecordingConfig};
use crate::signal::{SignalSynthesizer, TransitionState};
use crate::state::FlagState;

/// Chart amplitude limit (µV) mapped to full scale
const FULL_SCALE_UV: f64 = 100.0;

/// Synthesize `config.frames` windows and write them back to back.
///
/// The timestamp advances by `config.interval_s` per frame starting at
/// `start_time`, and the transition state is threaded through every frame.
///
/// # Returns
/// Number of samples written
pub fn record_frames<R: Rng>(
    synth: &SignalSynthesizer,
    flags: &FlagState,
    start_time: f64,
    config: &RecordingConfig,
    rng: &mut R,
) -> Result<usize> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE_HZ as u32,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&config.output_path, spec)?;

    let mut transitions = TransitionState::default();
    let mut written = 0;

    for frame in 0..config.frames {
        let now = start_time + frame as f64 * config.interval_s;
        let synthesis = synth.synthesize(flags, now, &transitions, rng);

        for &value in &synthesis.window.values {
            writer.write_sample(to_full_scale(value))?;
            written += 1;
        }
        transitions = synthesis.transitions;
    }

    writer.finalize()?;
    info!(
        frames = config.frames,
        samples = written,
        path = %config.output_path.display(),
        "recording written"
    );
    Ok(written)
}

/// Map µV to [-1, 1], clipping anything beyond the chart limit
fn to_full_scale(value_uv: f64) -> f32 {
    (value_uv / FULL_SCALE_UV).clamp(-1.0, 1.0) as f32
}
