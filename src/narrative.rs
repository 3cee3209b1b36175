//! AI-written sustainability analysis built on top of a computed assessment.
//!
//! The generator only ever sees the prompt string; failures are reported as a
//! message and never touch the `AssessmentResult` they were built from.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigError, NarrativeConfig};
use crate::types::{AssessmentResult, IndustryType};

/// Failures of the external text-generation call. None of them carry the API key.
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("request failed: {0}")]
    Http(reqwest::Error),
    #[error("service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("service returned no text")]
    EmptyResponse,
}

impl From<reqwest::Error> for NarrativeError {
    fn from(e: reqwest::Error) -> Self {
        NarrativeError::Http(e.without_url())
    }
}

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Any text-generation backend that turns a prompt into prose.
pub trait NarrativeGenerator {
    fn generate(&self, prompt: &str) -> Result<String, NarrativeError>;
}

/// Consultant prompt carrying the headline figures of an assessment.
pub fn build_prompt(industry: IndustryType, result: &AssessmentResult) -> String {
    format!(
        "You are a sustainability consultant.\n\
         \n\
         Industry Type: {industry}\n\
         Total Emissions: {total:.2} kg CO2\n\
         Emission per Unit: {per_unit:.2} kg CO2/unit\n\
         Renewable Energy Usage: {renewable:.2}%\n\
         ESG Score: {esg:.2}\n\
         \n\
         Provide:\n\
         1. Carbon footprint analysis\n\
         2. ESG interpretation\n\
         3. Risk level (Low/Medium/High)\n\
         4. 5 practical improvement suggestions\n\
         5. Long-term sustainability strategy\n",
        industry = industry,
        total = result.total_emissions_kg,
        per_unit = result.emission_per_unit,
        renewable = result.renewable_percentage,
        esg = result.esg_score,
    )
}

/// What the user sees under the analysis heading.
#[derive(Debug, Clone, PartialEq)]
pub enum NarrativeOutcome {
    Generated(String),
    Unavailable(String),
}

impl NarrativeOutcome {
    /// Text to show the user in either case.
    pub fn message(&self) -> &str {
        match self {
            NarrativeOutcome::Generated(text) => text,
            NarrativeOutcome::Unavailable(msg) => msg,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, NarrativeOutcome::Generated(_))
    }
}

/// Request the analysis; any failure becomes an `AI Error:` message.
pub fn narrate<G>(generator: &G, industry: IndustryType, result: &AssessmentResult) -> NarrativeOutcome
where
    G: NarrativeGenerator + ?Sized,
{
    let prompt = build_prompt(industry, result);
    match generator.generate(&prompt) {
        Ok(text) => NarrativeOutcome::Generated(text),
        Err(e) => {
            warn!(error = %e, "narrative generation failed");
            NarrativeOutcome::Unavailable(format!("AI Error: {e}"))
        }
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Blocking client for the Gemini `generateContent` endpoint.
pub struct GeminiClient {
    config: NarrativeConfig,
    http: reqwest::blocking::Client,
}

impl GeminiClient {
    pub fn new(config: NarrativeConfig) -> Result<Self, NarrativeError> {
        config.require_api_key()?;
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }
}

impl NarrativeGenerator for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
        let key = self.config.require_api_key()?;
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        info!(model = %self.config.model, "requesting sustainability analysis");
        let resp = self
            .http
            .post(self.config.generate_url())
            .header(API_KEY_HEADER, key)
            .json(&body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(NarrativeError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = resp.json()?;
        parsed.into_text().ok_or(NarrativeError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::assess;
    use crate::types::{AssessmentInput, Compliance, WorkerSafety};
    use std::cell::RefCell;
    use std::time::Duration;

    struct Recording {
        prompts: RefCell<Vec<String>>,
        reply: Option<String>,
    }

    impl NarrativeGenerator for Recording {
        fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.reply.clone().ok_or(NarrativeError::Status {
                status: 403,
                body: "API key not valid".into(),
            })
        }
    }

    fn sample_result() -> AssessmentResult {
        assess(&AssessmentInput {
            industry_type: IndustryType::FoodProcessing,
            electricity_kwh: 1000.0,
            solar_kwh: 200.0,
            diesel_litres: 50.0,
            lpg_kg: 20.0,
            production_units: 100.0,
            worker_safety: WorkerSafety::Good,
            compliance: Compliance::FullyCompliant,
        })
        .unwrap()
    }

    #[test]
    fn test_prompt_interpolates_figures() {
        let prompt = build_prompt(IndustryType::FoodProcessing, &sample_result());
        assert!(prompt.starts_with("You are a sustainability consultant."));
        assert!(prompt.contains("Industry Type: Food Processing"));
        assert!(prompt.contains("Total Emissions: 820.20 kg CO2"));
        assert!(prompt.contains("Emission per Unit: 8.20 kg CO2/unit"));
        assert!(prompt.contains("Renewable Energy Usage: 20.00%"));
        assert!(prompt.contains("ESG Score: 74.00"));
        assert!(prompt.contains("3. Risk level (Low/Medium/High)"));
        assert!(prompt.contains("5. Long-term sustainability strategy"));
    }

    #[test]
    fn test_narrate_passes_through_generated_text() {
        let gen = Recording {
            prompts: RefCell::new(Vec::new()),
            reply: Some("Risk level: Medium".into()),
        };
        let outcome = narrate(&gen, IndustryType::FoodProcessing, &sample_result());
        assert!(outcome.is_generated());
        assert_eq!(outcome.message(), "Risk level: Medium");
        assert_eq!(gen.prompts.borrow().len(), 1);
    }

    #[test]
    fn test_narrate_failure_keeps_result_intact() {
        let result = sample_result();
        let before = result.clone();
        let gen = Recording {
            prompts: RefCell::new(Vec::new()),
            reply: None,
        };
        let outcome = narrate(&gen, IndustryType::FoodProcessing, &result);
        assert!(!outcome.is_generated());
        assert_eq!(
            outcome.message(),
            "AI Error: service returned 403: API key not valid"
        );
        assert_eq!(result, before);
    }

    #[test]
    fn test_client_requires_api_key() {
        let err = GeminiClient::new(NarrativeConfig::default()).err().unwrap();
        assert!(matches!(err, NarrativeError::Config(ConfigError::MissingApiKey { .. })));
    }

    #[test]
    fn test_connection_failure_does_not_expose_api_key() {
        let config = NarrativeConfig {
            api_key: Some("SECRET-KEY-123".into()),
            endpoint: "http://127.0.0.1:9".into(),
            timeout: Duration::from_secs(2),
            ..NarrativeConfig::default()
        };
        let client = GeminiClient::new(config).unwrap();
        let outcome = narrate(&client, IndustryType::Textile, &sample_result());
        assert!(!outcome.is_generated());
        assert!(outcome.message().starts_with("AI Error: request failed"));
        assert!(!outcome.message().contains("SECRET-KEY-123"));
    }

    #[test]
    fn test_response_text_extraction() {
        let ok: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Part A. "},{"text":"Part B."}]}}]}"#,
        )
        .unwrap();
        assert_eq!(ok.into_text().as_deref(), Some("Part A. Part B."));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(empty.into_text().is_none());

        let blocked: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(blocked.into_text().is_none());
    }
}
