//! Answer extraction from chat-completion responses.
//!
//! The completion endpoint does not keep a fixed response shape across
//! versions, so the first choice is probed with an ordered list of
//! extractors. The first extractor that recognises its field wins; if none
//! does, the choice (or the whole response) is returned as JSON text so the
//! caller always has something printable.

use serde_json::{Map, Value};
use thiserror::Error;

/// A recognised field whose expected content is not there.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("response field '{0}' is missing")]
    MissingField(&'static str),
}

type Extractor = fn(&Map<String, Value>) -> Option<Result<String, AnalysisError>>;

/// Probed in order against the first choice.
const CHOICE_EXTRACTORS: [Extractor; 3] = [message_content, messages_field, misspelled_messages_field];

/// Extracts the model's answer text from a raw response.
pub fn normalize(response: &Value) -> Result<String, AnalysisError> {
    let Some(choice) = first_choice(response) else {
        tracing::debug!("Response has no choices, returning it verbatim");
        return Ok(response.to_string());
    };

    if let Some(fields) = choice.as_object() {
        for extract in CHOICE_EXTRACTORS {
            if let Some(result) = extract(fields) {
                return result;
            }
        }
    }

    tracing::debug!("No known answer field in choice, returning it verbatim");
    Ok(choice.to_string())
}

fn first_choice(response: &Value) -> Option<&Value> {
    response.get("choices")?.as_array()?.first()
}

fn message_content(choice: &Map<String, Value>) -> Option<Result<String, AnalysisError>> {
    let message = choice.get("message")?;
    Some(
        message
            .get("content")
            .filter(|content| !content.is_null())
            .map(text_of)
            .ok_or(AnalysisError::MissingField("content")),
    )
}

fn messages_field(choice: &Map<String, Value>) -> Option<Result<String, AnalysisError>> {
    choice.get("messages").map(|value| Ok(text_of(value)))
}

// Seen in the wild from an older API revision.
fn misspelled_messages_field(choice: &Map<String, Value>) -> Option<Result<String, AnalysisError>> {
    choice.get("mesages").map(|value| Ok(text_of(value)))
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
