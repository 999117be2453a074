use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::client::LlmClient;
use crate::error::PredictError;
use crate::util::SecretString;

// ============================================================================
// OpenAI-compatible chat completions client
// ============================================================================

/// Single-message chat completion against an OpenAI-compatible endpoint.
///
/// Unhardened: no retries and no rate-limit handling. A timeout is applied
/// only when one is configured.
pub struct OpenAIClient {
    api_key: SecretString,
    model: String,
    base_url: String,
    max_tokens: Option<u32>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct OpenAIRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct OpenAIMessage<'a> {
    role: &'a str,
    content: &'a str,
}

// Content is kept as a raw value so a missing or non-string field surfaces
// as a malformed response instead of a decode error.
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    #[serde(default)]
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    #[serde(default)]
    message: Option<OpenAIResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[serde(default)]
    content: Value,
}

impl OpenAIClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        max_tokens: Option<u32>,
        timeout_secs: Option<u64>,
    ) -> Result<Self, PredictError> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            api_key: api_key.into(),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_tokens,
            client: builder.build()?,
        })
    }
}

/// Pull `choices[0].message.content` out of a chat completion body.
fn extract_content(body: &str) -> Result<String, PredictError> {
    let response: OpenAIResponse = serde_json::from_str(body)
        .map_err(|e| PredictError::MalformedRemoteResponse(format!("invalid JSON body: {}", e)))?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| PredictError::MalformedRemoteResponse("no choices".to_string()))?;

    match choice.message.map(|m| m.content) {
        Some(Value::String(content)) => Ok(content),
        Some(Value::Null) | None => Err(PredictError::MalformedRemoteResponse(
            "first choice has no message content".to_string(),
        )),
        Some(other) => Err(PredictError::MalformedRemoteResponse(format!(
            "message content is not a string: {}",
            other
        ))),
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, prompt: &str) -> Result<String, PredictError> {
        let request = OpenAIRequest {
            model: &self.model,
            messages: vec![OpenAIMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        };

        debug!(
            "Calling OpenAI-compatible API at {} with model: {}",
            self.base_url, self.model
        );

        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(PredictError::RemoteStatus { status, body });
        }

        extract_content(&body)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenAIClient {
        OpenAIClient::new(
            "test_key".to_string(),
            "gpt-4o-mini".to_string(),
            "https://api.openai.com/v1/".to_string(),
            None,
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_openai_client_creation() {
        let client = client();
        assert_eq!(client.api_key.expose(), "test_key");
        assert_eq!(client.model, "gpt-4o-mini");
        assert_eq!(client.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let client = client();
        assert_eq!(format!("{:?}", client.api_key), "***");
    }

    #[test]
    fn test_request_structure() {
        let request = OpenAIRequest {
            model: "gpt-4o-mini",
            messages: vec![OpenAIMessage {
                role: "user",
                content: "test",
            }],
            max_tokens: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"].as_array().unwrap().len(), 1);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "test");
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn test_request_with_max_tokens() {
        let request = OpenAIRequest {
            model: "m",
            messages: Vec::new(),
            max_tokens: Some(256),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 256);
    }

    #[test]
    fn test_extract_content() {
        let body = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "Hello, world!"}}
            ]
        }"#;
        assert_eq!(extract_content(body).unwrap(), "Hello, world!");
    }

    #[test]
    fn test_extract_content_empty_choices() {
        let err = extract_content(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, PredictError::MalformedRemoteResponse(_)));
    }

    #[test]
    fn test_extract_content_missing_choices() {
        let err = extract_content(r#"{"error": "nope"}"#).unwrap_err();
        assert!(matches!(err, PredictError::MalformedRemoteResponse(_)));
    }

    #[test]
    fn test_extract_content_missing_message() {
        let err = extract_content(r#"{"choices": [{"index": 0}]}"#).unwrap_err();
        assert!(err.to_string().contains("no message content"));
    }

    #[test]
    fn test_extract_content_null_content() {
        let err = extract_content(r#"{"choices": [{"message": {"content": null}}]}"#).unwrap_err();
        assert!(matches!(err, PredictError::MalformedRemoteResponse(_)));
    }

    #[test]
    fn test_extract_content_non_string_content() {
        let err =
            extract_content(r#"{"choices": [{"message": {"content": [1, 2]}}]}"#).unwrap_err();
        assert!(err.to_string().contains("not a string"));
    }

    #[test]
    fn test_extract_content_not_json() {
        let err = extract_content("<html>bad gateway</html>").unwrap_err();
        assert!(err.to_string().contains("invalid JSON body"));
    }
}
