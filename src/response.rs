//! JSON snapshot consumed by chart renderers.

use serde::Serialize;

use crate::error::Result;
use crate::params::{
    band_for, signal_constants::HIGHLIGHT_HALF_WIDTH_HZ, BandMarker, BAND_MARKERS,
};
use crate::signal::{Artifact, HighlightInfo, Synthesis};
use crate::state::FlagState;

/// Shaded frequency range around an asserted band
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HighlightRegion {
    pub name: &'static str,
    pub low_hz: f64,
    pub high_hz: f64,
}

/// Everything a chart or JSON client needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct EegSnapshot {
    pub time_labels: Vec<f64>,
    pub eeg_values: Vec<f64>,
    pub freq_labels: Vec<f64>,
    pub power_values: Vec<f64>,

    /// Store key of the first asserted flag
    pub active_state: Option<&'static str>,
    pub highlight: Option<HighlightInfo>,

    /// One region per asserted flag, not only the highlighted one
    pub highlight_regions: Vec<HighlightRegion>,
    pub band_markers: Vec<BandMarker>,
    pub artifact: Option<Artifact>,
}

impl EegSnapshot {
    /// Shape a synthesis result for the flags it was produced from
    pub fn new(synthesis: &Synthesis, flags: &FlagState) -> Self {
        let highlight_regions = flags
            .active()
            .map(|flag| {
                let band = band_for(flag);
                HighlightRegion {
                    name: band.display_name,
                    low_hz: band.base_frequency_hz - HIGHLIGHT_HALF_WIDTH_HZ,
                    high_hz: band.base_frequency_hz + HIGHLIGHT_HALF_WIDTH_HZ,
                }
            })
            .collect();

        Self {
            time_labels: synthesis.window.times.clone(),
            eeg_values: synthesis.window.values.clone(),
            freq_labels: synthesis.spectrum.frequencies.clone(),
            power_values: synthesis.spectrum.power.clone(),
            active_state: flags.first_active().map(|flag| flag.key()),
            highlight: synthesis.highlight,
            highlight_regions,
            band_markers: BAND_MARKERS.to_vec(),
            artifact: synthesis.artifact,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// One-line human-readable digest
    pub fn summary(&self) -> String {
        let std_dev = {
            let n = self.eeg_values.len().max(1) as f64;
            let mean = self.eeg_values.iter().sum::<f64>() / n;
            (self.eeg_values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt()
        };
        let peak_hz = self
            .freq_labels
            .iter()
            .zip(&self.power_values)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(f, _)| *f);

        let state = match &self.highlight {
            Some(h) => format!("{} @ {} Hz", h.name, h.freq),
            None => "idle".to_string(),
        };
        let peak = match peak_hz {
            Some(f) => format!("{:.2} Hz", f),
            None => "-".to_string(),
        };
        let artifact = self.artifact.map(|a| a.name()).unwrap_or("none");

        format!(
            "state: {} | samples: {} | std: {:.2} µV | spectral peak: {} | artifact: {}",
            state,
            self.eeg_values.len(),
            std_dev,
            peak,
            artifact
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SignalSynthesizer;
    use crate::state::Flag;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::Value;

    fn snapshot(flags: &FlagState) -> EegSnapshot {
        let synth = SignalSynthesizer::default();
        let synthesis = synth.synthesize_stateless(flags, 0.0, &mut StdRng::seed_from_u64(21));
        EegSnapshot::new(&synthesis, flags)
    }

    #[test]
    fn test_json_has_consumer_fields() {
        let json = snapshot(&FlagState::with(&[Flag::First])).to_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();

        for field in [
            "time_labels",
            "eeg_values",
            "freq_labels",
            "power_values",
            "active_state",
            "highlight",
        ] {
            assert!(value.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(value["active_state"], "first");
        assert_eq!(value["highlight"]["name"], "Alpha (Relaxed Focus)");
        assert_eq!(value["highlight"]["freq"], 10.0);
        assert_eq!(value["eeg_values"].as_array().unwrap().len(), 512);
    }

    #[test]
    fn test_idle_snapshot_has_null_highlight() {
        let value: Value =
            serde_json::from_str(&snapshot(&FlagState::default()).to_json().unwrap()).unwrap();

        assert!(value["active_state"].is_null());
        assert!(value["highlight"].is_null());
        assert_eq!(value["highlight_regions"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_regions_cover_every_asserted_flag() {
        let flags = FlagState::with(&[Flag::Third, Flag::Second]);
        let snap = snapshot(&flags);

        assert_eq!(snap.active_state, Some("second"));
        assert_eq!(snap.highlight_regions.len(), 2);
        assert_eq!(snap.highlight_regions[0].low_hz, 16.0);
        assert_eq!(snap.highlight_regions[0].high_hz, 20.0);
        assert_eq!(snap.highlight_regions[1].name, "Beta (Active Focus)");
        assert_eq!(snap.band_markers.len(), 5);
    }

    #[test]
    fn test_summary_mentions_state() {
        let summary = snapshot(&FlagState::with(&[Flag::Fifth])).summary();
        assert!(summary.contains("High Beta (Alert) @ 30 Hz"));
        assert!(snapshot(&FlagState::default()).summary().starts_with("state: idle"));
    }
}
