//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::params::{signal_constants, RecordingConfig, SynthesisConfig, TransitionMode};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "neuroscreen")]
#[command(about = "Simulated EEG feed driven by need flags", long_about = None)]
pub struct Args {
    /// State snapshot file written by the state store
    #[arg(long, value_name = "PATH", default_value = "data.txt", global = true)]
    pub state: PathBuf,

    /// Seed the random source for reproducible output
    #[arg(long, value_name = "SEED", global = true)]
    pub seed: Option<u64>,

    /// Overlay amplitude behaviour after a flag is asserted
    #[arg(long, value_enum, default_value = "immediate", global = true)]
    pub transition: TransitionArg,

    /// Chance of injecting an artifact per frame (0-1)
    #[arg(
        long,
        value_name = "P",
        default_value_t = signal_constants::DEFAULT_ARTIFACT_PROBABILITY,
        global = true
    )]
    pub artifact_probability: f64,

    /// Give background rhythms a random phase offset
    #[arg(long, global = true)]
    pub random_phase: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Synthesize one frame and print it
    Snapshot {
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Print one JSON frame per line, re-reading the state file each frame
    Stream {
        /// Time between frames (milliseconds)
        #[arg(long, value_name = "MS", default_value = "500")]
        interval_ms: u64,

        /// Stop after this many frames (runs until interrupted otherwise)
        #[arg(long, value_name = "N")]
        frames: Option<usize>,
    },

    /// Record successive frames to a WAV file
    Record {
        /// Number of frames to capture
        #[arg(long, value_name = "N", default_value = "20")]
        frames: usize,

        /// Output WAV file
        #[arg(long, value_name = "PATH", default_value = "recording.wav")]
        output: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionArg {
    /// Full focus amplitude from the first frame
    Immediate,
    /// Ramp from base to focus amplitude over 2 s
    Ramped,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Summary,
}

impl Args {
    /// Build the synthesis configuration from command-line arguments
    pub fn synthesis_config(&self) -> SynthesisConfig {
        let transition = match self.transition {
            TransitionArg::Immediate => TransitionMode::Immediate,
            TransitionArg::Ramped => TransitionMode::ramped(),
        };

        SynthesisConfig {
            transition,
            artifact_probability: self.artifact_probability,
            random_phase: self.random_phase,
        }
    }

    /// Random source: seeded when `--seed` is given, from OS entropy otherwise
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Create recording configuration if recording mode is selected
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        match &self.command {
            Command::Record { frames, output } => {
                Some(RecordingConfig::new(*frames, output.clone()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["neuroscreen", "snapshot"]);

        assert_eq!(args.state, PathBuf::from("data.txt"));
        assert!(matches!(
            args.command,
            Command::Snapshot {
                format: OutputFormat::Json
            }
        ));

        let config = args.synthesis_config();
        assert_eq!(config.transition, TransitionMode::Immediate);
        assert_eq!(config.artifact_probability, 0.05);
        assert!(args.recording_config().is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = Args::parse_from([
            "neuroscreen",
            "stream",
            "--frames",
            "4",
            "--transition",
            "ramped",
            "--seed",
            "42",
        ]);

        assert_eq!(args.synthesis_config().transition, TransitionMode::ramped());
        assert!(matches!(
            args.command,
            Command::Stream {
                interval_ms: 500,
                frames: Some(4)
            }
        ));
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let args = Args::parse_from(["neuroscreen", "--seed", "7", "snapshot"]);
        let a: u64 = args.rng().gen();
        let b: u64 = args.rng().gen();
        assert_eq!(a, b);
    }

    #[test]
    fn test_record_config() {
        let args =
            Args::parse_from(["neuroscreen", "record", "--frames", "6", "--output", "x.wav"]);
        let config = args.recording_config().unwrap();

        assert_eq!(config.frames, 6);
        assert_eq!(config.output_path, PathBuf::from("x.wav"));
    }
}
