#![forbid(unsafe_code)]

//! Facility carbon footprint and ESG scoring.
//!
//! `assess` turns one month of facility inputs into Scope 1/2 emissions,
//! emission intensity, renewable share and a weighted ESG score. The form,
//! report and narrative modules sit around that pure core.

pub mod calculator;
pub mod config;
pub mod error;
pub mod form;
pub mod narrative;
pub mod report;
pub mod scoring;
pub mod types;

pub use calculator::assess;
pub use error::AssessError;
pub use types::{
    AssessmentInput, AssessmentResult, BreakdownEntry, Compliance, EmissionSource, IndustryType,
    WorkerSafety,
};
