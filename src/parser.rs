//! Best-effort parsing of model output into prediction fields.
//!
//! Parsing never fails: unusable output yields absent fields together with
//! a [`ParseStatus::Failed`] marker so callers can tell "parsed, field
//! missing" apart from "nothing parsed".

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// The four answer fields. Any of them may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionFields {
    pub pol_party: Option<String>,
    pub pol_party_relaxed: Option<String>,
    pub justification: Option<String>,
    pub confidence: Option<f64>,
}

impl PredictionFields {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum ParseStatus {
    /// A JSON object was found; individual fields may still be absent.
    Parsed,
    /// No JSON object could be read from the output.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParsedResponse {
    pub fields: PredictionFields,
    pub status: ParseStatus,
}

/// Keep only the interior of a ```` ```json ```` fenced block, if present.
///
/// An unterminated fence keeps everything after the tag. When the interior
/// is blank the original text is returned unchanged.
pub fn strip_json_fence(text: &str) -> &str {
    let Some(start) = text.find(JSON_FENCE) else {
        return text;
    };
    let rest = &text[start + JSON_FENCE.len()..];
    let inner = match rest.find(FENCE) {
        Some(end) => &rest[..end],
        None => rest,
    };

    let inner = inner.trim();
    if inner.is_empty() {
        text
    } else {
        inner
    }
}

/// Parse raw model output into prediction fields.
pub fn parse_response(raw: &str) -> ParsedResponse {
    let json_str = strip_json_fence(raw).trim();

    let object: Map<String, Value> = match serde_json::from_str(json_str) {
        Ok(map) => map,
        Err(e) => {
            warn!("failed to parse model output as a JSON object: {}", e);
            debug!(
                "unparseable output: {}",
                raw.chars().take(200).collect::<String>()
            );
            return ParsedResponse {
                fields: PredictionFields::default(),
                status: ParseStatus::Failed(e.to_string()),
            };
        }
    };

    ParsedResponse {
        fields: PredictionFields {
            pol_party: text_field(&object, "pol_party"),
            pol_party_relaxed: text_field(&object, "pol_party_relaxed"),
            justification: text_field(&object, "justification"),
            confidence: number_field(&object, "confidence"),
        },
        status: ParseStatus::Parsed,
    }
}

/// Strings as-is, other scalars stringified, null and containers absent.
fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Finite numbers, or strings holding one. "NaN" and "inf" are absent.
fn number_field(object: &Map<String, Value>, key: &str) -> Option<f64> {
    let number = match object.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}
