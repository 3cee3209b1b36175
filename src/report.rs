use std::fmt::Write as _;

use serde::Serialize;

use crate::types::AssessmentResult;

pub const CHART_TITLE: &str = "Emission Distribution by Source";
const BAR_WIDTH: usize = 40;

/// One pie slice over the emission breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: f64,
    pub share_percent: f64,
}

/// Slices in breakdown order. Shares are all zero when nothing was emitted.
pub fn chart_slices(result: &AssessmentResult) -> Vec<ChartSlice> {
    let total: f64 = result.emission_breakdown.iter().map(|b| b.emissions_kg).sum();
    result
        .emission_breakdown
        .iter()
        .map(|b| ChartSlice {
            label: b.label.clone(),
            value: b.emissions_kg,
            share_percent: if total > 0.0 {
                b.emissions_kg / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

/// Machine-readable report printed by `--json`.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    pub assessment: &'a AssessmentResult,
    pub chart: Vec<ChartSlice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
}

impl<'a> JsonReport<'a> {
    pub fn new(assessment: &'a AssessmentResult, narrative: Option<String>) -> Self {
        JsonReport {
            assessment,
            chart: chart_slices(assessment),
            narrative,
        }
    }
}

/// Emission results block, two decimals throughout.
pub fn render_text(result: &AssessmentResult) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Emission Results");
    let _ = writeln!(out, "Scope 1 Emissions: {:.2} kg CO₂", result.scope1_emissions_kg);
    let _ = writeln!(out, "Scope 2 Emissions: {:.2} kg CO₂", result.scope2_emissions_kg);
    let _ = writeln!(out, "Total Emissions: {:.2} kg CO₂", result.total_emissions_kg);
    let _ = writeln!(out, "Emission per Unit: {:.2} kg CO₂/unit", result.emission_per_unit);
    let _ = writeln!(out, "Renewable Energy Usage: {:.2}%", result.renewable_percentage);
    let _ = writeln!(
        out,
        "Sub-scores: Environmental {} / Social {} / Governance {}",
        result.environmental_score, result.social_score, result.governance_score
    );
    let _ = writeln!(out, "Final ESG Score: {:.2} / 100", result.esg_score);
    out
}

/// Terminal stand-in for the pie chart: one proportional bar per source.
pub fn render_chart(result: &AssessmentResult) -> String {
    let slices = chart_slices(result);
    let label_width = slices.iter().map(|s| s.label.len()).max().unwrap_or(0);
    let mut out = String::new();
    let _ = writeln!(out, "{CHART_TITLE}");
    for s in &slices {
        let filled = ((s.share_percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "{:<width$} |{:<bar$}| {:>6.2}% ({:.2} kg)",
            s.label,
            "#".repeat(filled.min(BAR_WIDTH)),
            s.share_percent,
            s.value,
            width = label_width,
            bar = BAR_WIDTH,
        );
    }
    out
}
