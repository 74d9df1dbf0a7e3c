//! End-to-end properties of the synthesis pipeline.

use neuroscreen::params::{band_for, SynthesisConfig, BANDS};
use neuroscreen::signal::{SignalSynthesizer, Synthesis};
use neuroscreen::state::{Flag, FlagState};
use rand::rngs::StdRng;
use rand::SeedableRng;

const NOW: f64 = 1_700_000_000.0;

fn quiet_synth() -> SignalSynthesizer {
    SignalSynthesizer::new(SynthesisConfig {
        artifact_probability: 0.0,
        ..Default::default()
    })
    .unwrap()
}

fn run(synth: &SignalSynthesizer, flags: &FlagState, seed: u64) -> Synthesis {
    synth.synthesize_stateless(flags, NOW, &mut StdRng::seed_from_u64(seed))
}

#[test]
fn test_idle_output_is_faint() {
    let synth = SignalSynthesizer::default();

    for seed in 0..5 {
        let idle = run(&synth, &FlagState::default(), seed);
        assert!(idle.highlight.is_none());
        assert!(idle.artifact.is_none());
        assert!(idle.window.std_dev() < 0.5, "idle std {}", idle.window.std_dev());

        let active = run(&synth, &FlagState::with(&[Flag::Third]), seed);
        assert!(active.window.std_dev() > 10.0 * idle.window.std_dev());
    }
}

#[test]
fn test_empty_state_matches_all_zero() {
    let synth = SignalSynthesizer::default();
    let parsed = FlagState::parse("{}").unwrap();
    let zero = FlagState::parse("{'first': 0, 'second': 0, 'third': 0, 'fifth': 0}").unwrap();

    let a = run(&synth, &parsed, 12);
    let b = run(&synth, &zero, 12);

    assert_eq!(a.window, b.window);
    assert_eq!(a.spectrum, b.spectrum);
    assert_eq!(a.highlight, b.highlight);
}

#[test]
fn test_single_flag_highlight_matches_table() {
    let synth = SignalSynthesizer::default();

    for band in BANDS.iter() {
        let result = run(&synth, &FlagState::with(&[band.flag]), 1);
        let highlight = result.highlight.unwrap();

        assert_eq!(highlight.freq, band.base_frequency_hz);
        assert_eq!(highlight.name, band.display_name);
    }
}

#[test]
fn test_first_flag_concentrates_alpha() {
    let synth = quiet_synth();
    let flags = FlagState::with(&[Flag::First]);

    let active = run(&synth, &flags, 33);
    let idle = run(&synth, &FlagState::default(), 33);

    let highlight = active.highlight.unwrap();
    assert_eq!(highlight.freq, 10.0);
    assert_eq!(highlight.name, "Alpha (Relaxed Focus)");

    // Alpha overlay dominates delta background and dwarfs the idle floor
    let alpha = active.spectrum.band_power(8.0, 12.0);
    assert!(alpha > active.spectrum.band_power(1.0, 4.0));
    assert!(alpha > 1_000.0 * idle.spectrum.band_power(8.0, 12.0));
}

#[test]
fn test_multiple_flags_highlight_first_but_sum_all() {
    let synth = quiet_synth();
    let single = FlagState::with(&[Flag::First]);
    let both = FlagState::with(&[Flag::Fifth, Flag::First]);

    let a = run(&synth, &single, 5);
    let b = run(&synth, &both, 5);

    // Same seed, so only the extra 30 Hz overlay differs
    assert_eq!(b.highlight, a.highlight);
    assert_eq!(b.highlight.unwrap().name, band_for(Flag::First).display_name);

    let high_beta_single = a.spectrum.band_power(28.0, 32.0);
    let high_beta_both = b.spectrum.band_power(28.0, 32.0);
    assert!(high_beta_both > 10.0 * high_beta_single);
}

#[test]
fn test_spectrum_shape() {
    let synth = SignalSynthesizer::default();
    let result = run(&synth, &FlagState::with(&[Flag::Second]), 2);

    assert_eq!(result.spectrum.len(), 197);
    assert!(result
        .spectrum
        .frequencies
        .iter()
        .all(|f| (1.0..=50.0).contains(f)));
    assert_eq!(result.spectrum.frequencies[0], 1.0);
    assert_eq!(*result.spectrum.frequencies.last().unwrap(), 50.0);

    for pair in result.spectrum.frequencies.windows(2) {
        assert_eq!(pair[1] - pair[0], 0.25);
    }
    assert!(result.spectrum.power.iter().all(|p| *p >= 0.0));
}

#[test]
fn test_time_window_is_last_two_seconds() {
    let synth = SignalSynthesizer::default();
    let result = run(&synth, &FlagState::with(&[Flag::Fifth]), 3);

    assert_eq!(result.window.len(), 512);
    assert_eq!(result.window.times[0], 2.0);
    assert_eq!(*result.window.times.last().unwrap(), 4.0 - 1.0 / 256.0);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let synth = SignalSynthesizer::default();
    let flags = FlagState::with(&[Flag::Second, Flag::Third]);

    let a = run(&synth, &flags, 99);
    let b = run(&synth, &flags, 99);
    let c = run(&synth, &flags, 100);

    assert_eq!(a.window, b.window);
    assert_eq!(a.spectrum, b.spectrum);
    assert_eq!(a.artifact, b.artifact);
    assert_ne!(a.window, c.window);
}

#[test]
fn test_artifacts_follow_probability() {
    let always = SignalSynthesizer::new(SynthesisConfig {
        artifact_probability: 1.0,
        ..Default::default()
    })
    .unwrap();
    let flags = FlagState::with(&[Flag::First]);

    for seed in 0..10 {
        assert!(run(&always, &flags, seed).artifact.is_some());
        assert!(run(&quiet_synth(), &flags, seed).artifact.is_none());
    }

    // Idle buffers never carry artifacts
    assert!(run(&always, &FlagState::default(), 0).artifact.is_none());
}
