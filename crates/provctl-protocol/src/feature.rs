use std::fmt;

use serde::{Deserialize, Serialize};

/// Device subsystems a driver can be registered for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum FeatureId {
    /// Versions, temperature, fan, settings persistence.
    System,
    /// Sensor gain, exposure and readout offset.
    Cam,
    /// Color processing (brightness, contrast, saturation, hue).
    Cproc,
    /// White balance gains, black level and presets.
    WhiteBalance,
    /// Auto exposure and auto white balance.
    Auto,
    /// Knee compression and white clip.
    Knee,
    /// On-screen display: test pattern, center marker, zebra.
    Osd,
    /// Defect pixel correction.
    Dpcc,
    /// Multi-color controller.
    Mcc,
    /// Temporal noise filter.
    Tflt,
    /// Motorized lens control.
    Lens,
    /// DC iris control.
    Iris,
    /// Statistics region of interest.
    Roi,
    /// Fixed-pattern-noise correction.
    Fpnc,
    /// Video chain: mode, SDI range, genlock, flip, timecode.
    Chain,
    /// Gamma look-up table.
    Lut,
}

impl FeatureId {
    /// Every feature, in registry order.
    pub const ALL: [FeatureId; 16] = [
        Self::System,
        Self::Cam,
        Self::Cproc,
        Self::WhiteBalance,
        Self::Auto,
        Self::Knee,
        Self::Osd,
        Self::Dpcc,
        Self::Mcc,
        Self::Tflt,
        Self::Lens,
        Self::Iris,
        Self::Roi,
        Self::Fpnc,
        Self::Chain,
        Self::Lut,
    ];

    /// Returns a human-readable name for the feature.
    pub fn name(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Cam => "cam",
            Self::Cproc => "cproc",
            Self::WhiteBalance => "white_balance",
            Self::Auto => "auto",
            Self::Knee => "knee",
            Self::Osd => "osd",
            Self::Dpcc => "dpcc",
            Self::Mcc => "mcc",
            Self::Tflt => "tflt",
            Self::Lens => "lens",
            Self::Iris => "iris",
            Self::Roi => "roi",
            Self::Fpnc => "fpnc",
            Self::Chain => "chain",
            Self::Lut => "lut",
        }
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_names_are_unique() {
        let mut names: Vec<&str> = FeatureId::ALL.iter().map(|f| f.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FeatureId::ALL.len());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&FeatureId::WhiteBalance).unwrap();
        assert_eq!(json, "\"white_balance\"");
    }
}
