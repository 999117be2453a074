use tracing::debug;

use super::client::{HeuristicClient, LlmClient, Variant};
use super::client_impl::OpenAIClient;
use crate::config::LlmConfig;
use crate::error::PredictError;

/// Build the remote client described by `llm_config`.
///
/// Fails with `MissingCredential` before any network access when the
/// configured environment variable is unset or empty.
pub fn create_remote_client(llm_config: &LlmConfig) -> Result<Box<dyn LlmClient>, PredictError> {
    match llm_config.provider.as_str() {
        "openai" | "openai-compatible" => {
            let api_key = llm_config.get_api_key()?;
            debug!(
                "Creating {} client for model {}",
                llm_config.provider, llm_config.model
            );
            Ok(Box::new(OpenAIClient::new(
                api_key,
                llm_config.model.clone(),
                llm_config.get_base_url().to_string(),
                llm_config.max_tokens,
                llm_config.timeout_secs,
            )?))
        }
        unknown => Err(PredictError::UnknownProvider(unknown.to_string())),
    }
}

/// Create the client for `variant`. The heuristic variant matches against
/// `candidates`; the remote variant ignores them.
pub fn create_client(
    llm_config: &LlmConfig,
    variant: Variant,
    candidates: &[String],
) -> Result<Box<dyn LlmClient>, PredictError> {
    match variant {
        Variant::Heuristic => Ok(Box::new(HeuristicClient::new(candidates.to_vec()))),
        Variant::Remote => create_remote_client(llm_config),
    }
}
