use tracing::debug;

use crate::error::AssessError;
use crate::scoring::{
    environmental_score, esg_composite, governance_score, social_score, EF_DIESEL,
    EF_ELECTRICITY, EF_LPG,
};
use crate::types::{AssessmentInput, AssessmentResult, BreakdownEntry, EmissionSource};

/// Per-source emissions in kg CO2.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SourceEmissions {
    pub diesel_kg: f64,
    pub lpg_kg: f64,
    pub electricity_kg: f64,
}

impl SourceEmissions {
    /// Direct on-site combustion.
    pub fn scope1(&self) -> f64 {
        self.diesel_kg + self.lpg_kg
    }

    /// Purchased grid electricity.
    pub fn scope2(&self) -> f64 {
        self.electricity_kg
    }

    pub fn get(&self, source: EmissionSource) -> f64 {
        match source {
            EmissionSource::Diesel => self.diesel_kg,
            EmissionSource::Lpg => self.lpg_kg,
            EmissionSource::GridElectricity => self.electricity_kg,
        }
    }
}

/// Net grid draw after the on-site solar offset.
pub fn grid_electricity_kwh(input: &AssessmentInput) -> f64 {
    input.electricity_kwh - input.solar_kwh
}

pub fn source_emissions(input: &AssessmentInput) -> SourceEmissions {
    SourceEmissions {
        diesel_kg: input.diesel_litres * EF_DIESEL,
        lpg_kg: input.lpg_kg * EF_LPG,
        electricity_kg: grid_electricity_kwh(input) * EF_ELECTRICITY,
    }
}

/// Share of electricity supplied by solar, 0 when no electricity is drawn.
pub fn renewable_percentage(electricity_kwh: f64, solar_kwh: f64) -> f64 {
    if electricity_kwh > 0.0 {
        solar_kwh / electricity_kwh * 100.0
    } else {
        0.0
    }
}

/// Compute emissions and ESG scores for one facility-month.
pub fn assess(input: &AssessmentInput) -> Result<AssessmentResult, AssessError> {
    input.validate()?;

    let grid = grid_electricity_kwh(input);
    let emissions = source_emissions(input);
    let scope1 = emissions.scope1();
    let scope2 = emissions.scope2();
    let total = scope1 + scope2;
    if !total.is_finite() {
        return Err(AssessError::validation(
            "emission total overflows; check the fuel and electricity quantities",
        ));
    }

    let emission_per_unit = total / input.production_units;
    if !emission_per_unit.is_finite() {
        return Err(AssessError::Division("emission_per_unit is not finite"));
    }

    let renewable = renewable_percentage(input.electricity_kwh, input.solar_kwh);

    let e = environmental_score(emission_per_unit);
    let s = social_score(input.worker_safety);
    let g = governance_score(input.compliance);
    let esg = esg_composite(e, s, g);

    let emission_breakdown = EmissionSource::ORDER
        .iter()
        .map(|src| BreakdownEntry {
            source: *src,
            label: src.label().to_string(),
            emissions_kg: emissions.get(*src),
        })
        .collect();

    debug!(
        industry = %input.industry_type,
        total_kg = total,
        per_unit = emission_per_unit,
        esg,
        "assessment computed"
    );

    Ok(AssessmentResult {
        grid_electricity_kwh: grid,
        scope1_emissions_kg: scope1,
        scope2_emissions_kg: scope2,
        total_emissions_kg: total,
        emission_per_unit,
        renewable_percentage: renewable,
        environmental_score: e,
        social_score: s,
        governance_score: g,
        esg_score: esg,
        emission_breakdown,
    })
}
