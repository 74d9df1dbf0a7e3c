//! Static band tables: per-flag overlay bands and always-present background.

use crate::state::Flag;

/// Characteristic band overlaid while a flag is asserted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandDefinition {
    /// Flag that activates this band
    pub flag: Flag,

    /// Fundamental frequency of the overlay (Hz)
    pub base_frequency_hz: f64,

    /// Human-readable band name shown by consumers
    pub display_name: &'static str,

    /// Overlay amplitude at the start of a transition (µV)
    pub base_amplitude: f64,

    /// Overlay amplitude once the transition has completed (µV)
    pub focus_amplitude: f64,
}

impl BandDefinition {
    /// Focus/beta-class bands suppress background alpha while active
    pub fn suppresses_alpha(&self) -> bool {
        self.base_frequency_hz > 12.0
    }
}

/// Overlay bands in declaration order (`first`, `second`, `third`, `fifth`).
///
/// Declaration order decides which flag is highlighted when several are set.
pub const BANDS: [BandDefinition; 4] = [
    BandDefinition {
        flag: Flag::First,
        base_frequency_hz: 10.0,
        display_name: "Alpha (Relaxed Focus)",
        base_amplitude: 25.0,
        focus_amplitude: 45.0,
    },
    BandDefinition {
        flag: Flag::Second,
        base_frequency_hz: 18.0,
        display_name: "SMR (Sensory Motor)",
        base_amplitude: 15.0,
        focus_amplitude: 35.0,
    },
    BandDefinition {
        flag: Flag::Third,
        base_frequency_hz: 24.0,
        display_name: "Beta (Active Focus)",
        base_amplitude: 12.0,
        focus_amplitude: 30.0,
    },
    BandDefinition {
        flag: Flag::Fifth,
        base_frequency_hz: 30.0,
        display_name: "High Beta (Alert)",
        base_amplitude: 8.0,
        focus_amplitude: 40.0,
    },
];

/// Look up the overlay band for a flag
pub fn band_for(flag: Flag) -> &'static BandDefinition {
    &BANDS[flag.index()]
}

/// Always-present brainwave rhythm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundBand {
    pub name: &'static str,
    pub frequency_hz: f64,
    pub amplitude: f64,
}

/// Background rhythms summed into every active buffer
pub const BACKGROUND_BANDS: [BackgroundBand; 5] = [
    BackgroundBand {
        name: "delta",
        frequency_hz: 2.0,
        amplitude: 35.0,
    },
    BackgroundBand {
        name: "theta",
        frequency_hz: 6.0,
        amplitude: 20.0,
    },
    BackgroundBand {
        name: "alpha",
        frequency_hz: 10.0,
        amplitude: 25.0,
    },
    BackgroundBand {
        name: "beta",
        frequency_hz: 20.0,
        amplitude: 15.0,
    },
    BackgroundBand {
        name: "gamma",
        frequency_hz: 40.0,
        amplitude: 8.0,
    },
];

/// Reference line drawn on the frequency chart
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct BandMarker {
    pub freq: f64,
    pub label: &'static str,
}

/// Band reference lines (δ θ α β γ)
pub const BAND_MARKERS: [BandMarker; 5] = [
    BandMarker {
        freq: 2.0,
        label: "δ",
    },
    BandMarker {
        freq: 6.0,
        label: "θ",
    },
    BandMarker {
        freq: 10.0,
        label: "α",
    },
    BandMarker {
        freq: 20.0,
        label: "β",
    },
    BandMarker {
        freq: 35.0,
        label: "γ",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bands_follow_flag_order() {
        for (i, band) in BANDS.iter().enumerate() {
            assert_eq!(band.flag.index(), i);
            assert_eq!(band_for(band.flag), band);
        }
    }

    #[test]
    fn test_alpha_suppression_classes() {
        assert!(!band_for(Flag::First).suppresses_alpha());
        assert!(band_for(Flag::Second).suppresses_alpha());
        assert!(band_for(Flag::Third).suppresses_alpha());
        assert!(band_for(Flag::Fifth).suppresses_alpha());
    }

    #[test]
    fn test_focus_exceeds_base_amplitude() {
        for band in BANDS.iter() {
            assert!(band.focus_amplitude > band.base_amplitude);
        }
    }
}
