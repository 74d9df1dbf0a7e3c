//! Recording configuration.

use std::path::PathBuf;

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Number of synthesis frames to capture
    pub frames: usize,

    /// Simulated time between frames (seconds)
    /// Default: 0.5 (= 2 frames per second, the stream cadence)
    pub interval_s: f64,

    /// Output WAV file
    pub output_path: PathBuf,
}

impl RecordingConfig {
    pub fn new(frames: usize, output_path: impl Into<PathBuf>) -> Self {
        Self {
            frames,
            interval_s: 0.5,
            output_path: output_path.into(),
        }
    }

    /// Total simulated duration covered by the capture (seconds)
    pub fn duration_s(&self) -> f64 {
        self.frames as f64 * self.interval_s
    }
}
