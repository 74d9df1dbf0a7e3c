//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers of the pipeline are extracted here with:
//! - Physical units (Hz, seconds, µV)
//! - Documented ranges and meanings
//! - Type safety where possible

mod bands;
mod recording;
mod signal;

// Re-export all types
pub use bands::{
    band_for, BackgroundBand, BandDefinition, BandMarker, BACKGROUND_BANDS, BANDS, BAND_MARKERS,
};
pub use recording::RecordingConfig;
pub use signal::{signal_constants, SynthesisConfig, TransitionMode};
