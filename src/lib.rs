//! NeuroScreen library - simulated EEG feed driven by need flags

pub mod cli;
pub mod error;
pub mod params;
pub mod recording;
pub mod response;
pub mod signal;
pub mod state;

pub use error::{Error, Result};
