//! party-predict - Guess a person's political party with an LLM prompt
//!
//! Looks up the candidate parties for a country, renders a prompt asking a
//! model to pick one, invokes either a deterministic local heuristic or an
//! OpenAI-compatible chat endpoint, and leniently parses the JSON answer.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod llm;
pub mod parser;
pub mod pipeline;
pub mod util;

pub use catalog::PartyCatalog;
pub use error::PredictError;
pub use llm::client::Variant;
pub use pipeline::{PredictionPipeline, PredictionRequest, PredictionResult};
