use crate::types::{Compliance, WorkerSafety};

/// kg CO2 per kWh of grid electricity.
pub const EF_ELECTRICITY: f64 = 0.82;
/// kg CO2 per litre of diesel.
pub const EF_DIESEL: f64 = 2.68;
/// kg CO2 per kg of LPG.
pub const EF_LPG: f64 = 1.51;

pub const WEIGHT_ENVIRONMENTAL: f64 = 0.4;
pub const WEIGHT_SOCIAL: f64 = 0.3;
pub const WEIGHT_GOVERNANCE: f64 = 0.3;

/// Ordered band classifier over emission intensity (kg CO2 per unit).
/// Each band is `(exclusive upper bound, score)`; values at or above the
/// last bound fall through to `ceiling_score`.
#[derive(Debug, Clone)]
pub struct IntensityBands {
    pub bands: &'static [(f64, u8)],
    pub ceiling_score: u8,
}

pub const ENVIRONMENTAL_BANDS: IntensityBands = IntensityBands {
    bands: &[(5.0, 85), (10.0, 65)],
    ceiling_score: 40,
};

impl IntensityBands {
    pub fn classify(&self, emission_per_unit: f64) -> u8 {
        self.bands
            .iter()
            .find(|(upper, _)| emission_per_unit < *upper)
            .map(|(_, score)| *score)
            .unwrap_or(self.ceiling_score)
    }
}

pub fn environmental_score(emission_per_unit: f64) -> u8 {
    ENVIRONMENTAL_BANDS.classify(emission_per_unit)
}

pub fn social_score(safety: WorkerSafety) -> u8 {
    match safety {
        WorkerSafety::Excellent => 90,
        WorkerSafety::Good => 75,
        WorkerSafety::Average => 60,
        WorkerSafety::Poor => 40,
    }
}

pub fn governance_score(compliance: Compliance) -> u8 {
    match compliance {
        Compliance::FullyCompliant => 85,
        Compliance::PartiallyCompliant => 60,
        Compliance::NonCompliant => 35,
    }
}

/// Weighted composite; environmental carries the largest weight.
pub fn esg_composite(environmental: u8, social: u8, governance: u8) -> f64 {
    WEIGHT_ENVIRONMENTAL * f64::from(environmental)
        + WEIGHT_SOCIAL * f64::from(social)
        + WEIGHT_GOVERNANCE * f64::from(governance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environmental_band_boundaries() {
        assert_eq!(environmental_score(0.0), 85);
        assert_eq!(environmental_score(4.999), 85);
        assert_eq!(environmental_score(5.0), 65);
        assert_eq!(environmental_score(9.999), 65);
        assert_eq!(environmental_score(10.0), 40);
        assert_eq!(environmental_score(1.0e6), 40);
    }

    #[test]
    fn test_social_and_governance_tables() {
        let social: Vec<u8> = WorkerSafety::ALL.iter().map(|s| social_score(*s)).collect();
        assert_eq!(social, vec![90, 75, 60, 40]);
        let gov: Vec<u8> = Compliance::ALL.iter().map(|c| governance_score(*c)).collect();
        assert_eq!(gov, vec![85, 60, 35]);
    }

    #[test]
    fn test_weights_are_convex() {
        let sum = WEIGHT_ENVIRONMENTAL + WEIGHT_SOCIAL + WEIGHT_GOVERNANCE;
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((esg_composite(65, 75, 85) - 74.0).abs() < 1e-9);
        assert!((esg_composite(85, 90, 85) - 86.5).abs() < 1e-9);
        assert!((esg_composite(40, 40, 35) - 38.5).abs() < 1e-9);
    }
}
