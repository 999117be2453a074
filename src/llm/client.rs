use async_trait::async_trait;
use regex::Regex;
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

use crate::error::PredictError;

/// Text in, text out. Implemented by the heuristic stand-in and by remote
/// chat-completion clients.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, PredictError>;
}

/// Which model backend a prediction call should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Heuristic,
    Remote,
}

impl Variant {
    pub fn as_str(&self) -> &str {
        match self {
            Variant::Heuristic => "heuristic",
            Variant::Remote => "remote",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Variant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "heuristic" | "local" => Ok(Variant::Heuristic),
            "remote" | "llm" => Ok(Variant::Remote),
            _ => anyhow::bail!("Unknown variant: {} (expected heuristic or remote)", s),
        }
    }
}

pub const HEURISTIC_CONFIDENCE: f64 = 0.30;

pub const HEURISTIC_JUSTIFICATION: &str =
    "Heuristic stand-in: picked the first candidate whose leading word appears in the prompt, \
     or the first candidate when none does. Not derived from evidence.";

/// Deterministic, network-free stand-in for a language model.
///
/// Scans the candidates in order and returns the first one whose leading
/// word occurs in the lower-cased prompt on word boundaries, falling back
/// to the first candidate.
pub struct HeuristicClient {
    candidates: Vec<String>,
}

impl HeuristicClient {
    pub fn new(candidates: Vec<String>) -> Self {
        Self { candidates }
    }

    /// Pick a candidate for `prompt`. `None` only for an empty candidate list.
    pub fn choose(&self, prompt: &str) -> Option<&str> {
        let haystack = prompt.to_lowercase();

        let matched = self.candidates.iter().find(|candidate| {
            let Some(token) = candidate.split_whitespace().next() else {
                return false;
            };
            // Anchor on the neighbours, not `\b`: tokens like "workers'" or
            // "c++" end in a non-word character.
            let pattern = format!(r"(?:^|\W){}(?:\W|$)", regex::escape(&token.to_lowercase()));
            match Regex::new(&pattern) {
                Ok(re) => re.is_match(&haystack),
                Err(e) => {
                    debug!("heuristic: skipping token {:?}: {}", token, e);
                    false
                }
            }
        });

        matched.or_else(|| self.candidates.first()).map(String::as_str)
    }
}

#[async_trait]
impl LlmClient for HeuristicClient {
    async fn complete(&self, prompt: &str) -> Result<String, PredictError> {
        let choice = self.choose(prompt).unwrap_or_default();
        debug!("heuristic: chose {:?}", choice);

        Ok(json!({
            "pol_party": choice,
            "pol_party_relaxed": choice,
            "justification": HEURISTIC_JUSTIFICATION,
            "confidence": HEURISTIC_CONFIDENCE,
        })
        .to_string())
    }
}
