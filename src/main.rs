//! NeuroScreen - simulated EEG feed for the need-signaling demo
//!
//! Reads the shared need-flag snapshot, synthesizes an EEG-like signal that
//! reflects it, and prints chart-ready JSON (or records it to WAV).

use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing::{info, warn};

use neuroscreen::cli::{Args, Command, OutputFormat};
use neuroscreen::recording::record_frames;
use neuroscreen::response::EegSnapshot;
use neuroscreen::signal::{SignalSynthesizer, TransitionState};
use neuroscreen::state::load_flags;

/// Wall-clock time in seconds since the Unix epoch
fn now_s() -> f64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs_f64(),
        Err(e) => {
            warn!("system clock before Unix epoch: {}", e);
            0.0
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Args::parse();
    let synth = SignalSynthesizer::new(args.synthesis_config())?;
    let mut rng = args.rng();

    match &args.command {
        Command::Snapshot { format } => {
            let flags = load_flags(&args.state);
            let synthesis = synth.synthesize_stateless(&flags, now_s(), &mut rng);
            let snapshot = EegSnapshot::new(&synthesis, &flags);

            match format {
                OutputFormat::Json => println!("{}", snapshot.to_json()?),
                OutputFormat::Summary => println!("{}", snapshot.summary()),
            }
        }
        Command::Stream {
            interval_ms,
            frames,
        } => {
            info!(
                state = %args.state.display(),
                interval_ms,
                "streaming frames"
            );
            let interval = Duration::from_millis(*interval_ms);
            let mut transitions = TransitionState::default();
            let mut last_flags = None;
            let mut emitted = 0;

            while frames.map_or(true, |limit| emitted < limit) {
                let flags = load_flags(&args.state);
                if last_flags != Some(flags) {
                    info!(active = ?flags.active().collect::<Vec<_>>(), "state changed");
                    last_flags = Some(flags);
                }

                let synthesis = synth.synthesize(&flags, now_s(), &transitions, &mut rng);
                println!("{}", EegSnapshot::new(&synthesis, &flags).to_json()?);
                transitions = synthesis.transitions;
                emitted += 1;

                thread::sleep(interval);
            }
        }
        Command::Record { .. } => {
            let Some(config) = args.recording_config() else {
                return Ok(());
            };
            let flags = load_flags(&args.state);
            let written = record_frames(&synth, &flags, now_s(), &config, &mut rng)?;
            println!(
                "Recorded {} samples ({:.1} s simulated) to {}",
                written,
                config.duration_s(),
                config.output_path.display()
            );
        }
    }

    Ok(())
}
