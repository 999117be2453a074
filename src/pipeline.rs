use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

use crate::catalog::PartyCatalog;
use crate::config::LlmConfig;
use crate::error::PredictError;
use crate::llm::client::{LlmClient, Variant};
use crate::llm::factory;
use crate::llm::prompts;
use crate::parser::{self, ParseStatus, PredictionFields};

/// Inputs for one prediction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredictionRequest {
    pub person_name: String,
    pub country: String,
    pub year: i32,
}

impl PredictionRequest {
    pub fn new(person_name: impl Into<String>, country: impl Into<String>, year: i32) -> Self {
        Self {
            person_name: person_name.into(),
            country: country.into(),
            year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub pol_party: Option<String>,
    pub pol_party_relaxed: Option<String>,
    pub justification: Option<String>,
    pub confidence: Option<f64>,
    pub prompt_sent: String,
    pub raw_output: String,
    pub parse_status: ParseStatus,
}

impl PredictionResult {
    fn from_parts(
        fields: PredictionFields,
        status: ParseStatus,
        prompt_sent: String,
        raw_output: String,
    ) -> Self {
        Self {
            pol_party: fields.pol_party,
            pol_party_relaxed: fields.pol_party_relaxed,
            justification: fields.justification,
            confidence: fields.confidence,
            prompt_sent,
            raw_output,
            parse_status: status,
        }
    }

    /// Whether `pol_party` is one of `candidates`. The pipeline does not
    /// enforce this; callers that need the guarantee check it here.
    pub fn is_candidate(&self, candidates: &[String]) -> bool {
        self.pol_party
            .as_ref()
            .is_some_and(|party| candidates.contains(party))
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn show(value: Option<&str>) -> &str {
            value.unwrap_or("<absent>")
        }

        writeln!(f, "pol_party:         {}", show(self.pol_party.as_deref()))?;
        writeln!(
            f,
            "pol_party_relaxed: {}",
            show(self.pol_party_relaxed.as_deref())
        )?;
        writeln!(
            f,
            "justification:     {}",
            show(self.justification.as_deref())
        )?;
        match self.confidence {
            Some(c) => writeln!(f, "confidence:        {:.2}", c)?,
            None => writeln!(f, "confidence:        <absent>")?,
        }
        match &self.parse_status {
            ParseStatus::Parsed => write!(f, "parse status:      parsed"),
            ParseStatus::Failed(reason) => write!(f, "parse status:      failed ({})", reason),
        }
    }
}

/// Lookup -> prompt -> model -> parse, one call at a time.
pub struct PredictionPipeline {
    catalog: PartyCatalog,
    llm_config: LlmConfig,
}

impl PredictionPipeline {
    pub fn new(catalog: PartyCatalog, llm_config: LlmConfig) -> Self {
        Self {
            catalog,
            llm_config,
        }
    }

    pub fn catalog(&self) -> &PartyCatalog {
        &self.catalog
    }

    /// Build the prompt for `request` without invoking a model.
    pub fn build_prompt(&self, request: &PredictionRequest) -> Result<String, PredictError> {
        let candidates = self.catalog.options_for(&request.country)?;
        Ok(prompts::build_prompt(
            &request.person_name,
            &request.country,
            request.year,
            candidates,
        ))
    }

    /// Run one prediction with the selected model variant.
    pub async fn predict(
        &self,
        request: &PredictionRequest,
        variant: Variant,
    ) -> Result<PredictionResult, PredictError> {
        let candidates = self.catalog.options_for(&request.country)?;
        let client = factory::create_client(&self.llm_config, variant, candidates)?;
        info!(
            "Predicting party for {:?} ({}, {}) with {} model",
            request.person_name, request.country, request.year, variant
        );
        self.run(request, candidates, client.as_ref()).await
    }

    /// Run one prediction against a caller-supplied client.
    pub async fn predict_with_client(
        &self,
        request: &PredictionRequest,
        client: &dyn LlmClient,
    ) -> Result<PredictionResult, PredictError> {
        let candidates = self.catalog.options_for(&request.country)?;
        self.run(request, candidates, client).await
    }

    async fn run(
        &self,
        request: &PredictionRequest,
        candidates: &[String],
        client: &dyn LlmClient,
    ) -> Result<PredictionResult, PredictError> {
        let prompt = prompts::build_prompt(
            &request.person_name,
            &request.country,
            request.year,
            candidates,
        );
        debug!("prompt ({} bytes) built for {}", prompt.len(), request.country);

        let raw_output = client.complete(&prompt).await?;
        debug!("model returned {} bytes", raw_output.len());

        let parsed = parser::parse_response(&raw_output);
        let result =
            PredictionResult::from_parts(parsed.fields, parsed.status, prompt, raw_output);

        if let Some(party) = &result.pol_party {
            if !result.is_candidate(candidates) {
                warn!(
                    "model chose {:?}, which is not a candidate for {}",
                    party, request.country
                );
            }
        }

        Ok(result)
    }
}
