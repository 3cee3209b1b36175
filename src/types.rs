use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssessError;

/// Lowercase and fold `-`/`_` into spaces so "food-processing" matches "Food Processing".
fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '-' | '_' => ' ',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

fn parse_label<T: Copy>(s: &str, field: &str, all: &[T], label: fn(T) -> &'static str) -> Result<T, AssessError> {
    let wanted = normalize_label(s);
    all.iter()
        .copied()
        .find(|v| normalize_label(label(*v)) == wanted)
        .ok_or_else(|| AssessError::validation(format!("unknown {field}: {s:?}")))
}

/// Sector the facility reports under. Only feeds the narrative prompt.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum IndustryType {
    Manufacturing,
    Textile,
    #[serde(rename = "Food Processing")]
    FoodProcessing,
    Chemical,
    Other,
}

impl IndustryType {
    pub const ALL: [IndustryType; 5] = [
        IndustryType::Manufacturing,
        IndustryType::Textile,
        IndustryType::FoodProcessing,
        IndustryType::Chemical,
        IndustryType::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IndustryType::Manufacturing => "Manufacturing",
            IndustryType::Textile => "Textile",
            IndustryType::FoodProcessing => "Food Processing",
            IndustryType::Chemical => "Chemical",
            IndustryType::Other => "Other",
        }
    }
}

/// Worker safety rating, drives the social sub-score.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum WorkerSafety {
    Excellent,
    Good,
    Average,
    Poor,
}

impl WorkerSafety {
    pub const ALL: [WorkerSafety; 4] = [
        WorkerSafety::Excellent,
        WorkerSafety::Good,
        WorkerSafety::Average,
        WorkerSafety::Poor,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkerSafety::Excellent => "Excellent",
            WorkerSafety::Good => "Good",
            WorkerSafety::Average => "Average",
            WorkerSafety::Poor => "Poor",
        }
    }
}

/// Regulatory compliance status, drives the governance sub-score.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Compliance {
    #[serde(rename = "Fully Compliant")]
    FullyCompliant,
    #[serde(rename = "Partially Compliant")]
    PartiallyCompliant,
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
}

impl Compliance {
    pub const ALL: [Compliance; 3] = [
        Compliance::FullyCompliant,
        Compliance::PartiallyCompliant,
        Compliance::NonCompliant,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Compliance::FullyCompliant => "Fully Compliant",
            Compliance::PartiallyCompliant => "Partially Compliant",
            Compliance::NonCompliant => "Non-Compliant",
        }
    }
}

macro_rules! label_traits {
    ($ty:ty, $field:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $ty {
            type Err = AssessError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_label(s, $field, &<$ty>::ALL, <$ty>::label)
            }
        }

        impl TryFrom<String> for $ty {
            type Error = AssessError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                s.parse()
            }
        }
    };
}

label_traits!(IndustryType, "industry type");
label_traits!(WorkerSafety, "worker safety rating");
label_traits!(Compliance, "compliance status");

/// Monthly facility inputs collected by the questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    pub industry_type: IndustryType,
    pub electricity_kwh: f64,
    pub solar_kwh: f64,
    pub diesel_litres: f64,
    pub lpg_kg: f64,
    pub production_units: f64,
    pub worker_safety: WorkerSafety,
    pub compliance: Compliance,
}

impl AssessmentInput {
    /// Field checks run by `assess` before any arithmetic.
    pub fn validate(&self) -> Result<(), AssessError> {
        let quantities = [
            ("electricity_kwh", self.electricity_kwh),
            ("solar_kwh", self.solar_kwh),
            ("diesel_litres", self.diesel_litres),
            ("lpg_kg", self.lpg_kg),
        ];
        for (name, value) in quantities {
            if !value.is_finite() || value < 0.0 {
                return Err(AssessError::validation(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.solar_kwh > self.electricity_kwh {
            return Err(AssessError::validation(
                "Solar energy cannot exceed total electricity usage.",
            ));
        }
        if !self.production_units.is_finite() || self.production_units <= 0.0 {
            return Err(AssessError::Division("production_units must be greater than zero"));
        }
        Ok(())
    }
}

/// Emission source shown as one slice of the breakdown.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum EmissionSource {
    Diesel,
    Lpg,
    GridElectricity,
}

impl EmissionSource {
    /// Fixed chart order.
    pub const ORDER: [EmissionSource; 3] = [
        EmissionSource::Diesel,
        EmissionSource::Lpg,
        EmissionSource::GridElectricity,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EmissionSource::Diesel => "Diesel",
            EmissionSource::Lpg => "LPG",
            EmissionSource::GridElectricity => "Grid Electricity",
        }
    }
}

impl fmt::Display for EmissionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One source's share of the total, in fixed chart order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub source: EmissionSource,
    pub label: String,
    pub emissions_kg: f64,
}

/// Emissions, intensity, renewable share and ESG scores for one facility-month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub grid_electricity_kwh: f64,
    pub scope1_emissions_kg: f64,
    pub scope2_emissions_kg: f64,
    pub total_emissions_kg: f64,
    pub emission_per_unit: f64,
    pub renewable_percentage: f64,
    pub environmental_score: u8,
    pub social_score: u8,
    pub governance_score: u8,
    pub esg_score: f64,
    pub emission_breakdown: Vec<BreakdownEntry>,
}
