use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Server-side rate limiting and the provider API key live behind the
/// proxy; the client only ever sees a generic retry-later failure.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("No AI endpoint configured. Run `contract-maker config` first.")]
    NotConfigured,
    #[error("prompt is too long ({0} characters, max {MAX_PROMPT_CHARS})")]
    PromptTooLong(usize),
    #[error("The AI service is unavailable right now. Please try again later.")]
    Unavailable,
}

pub const MAX_PROMPT_CHARS: usize = 2000;

#[derive(Serialize)]
struct SuggestRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct SuggestResponse {
    suggestion: String,
}

/// Asks the suggestion proxy for a completion (e.g. a service description
/// or contract note draft).
pub fn suggest(endpoint: &str, prompt: &str) -> Result<String, AiError> {
    if endpoint.is_empty() {
        return Err(AiError::NotConfigured);
    }
    let length = prompt.chars().count();
    if length > MAX_PROMPT_CHARS {
        return Err(AiError::PromptTooLong(length));
    }

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|_| AiError::Unavailable)?;

    let response = client
        .post(endpoint)
        .json(&SuggestRequest { prompt })
        .send()
        .map_err(|e| {
            tracing::warn!("AI suggestion request failed: {e}");
            AiError::Unavailable
        })?;

    if !response.status().is_success() {
        tracing::warn!("AI suggestion endpoint returned {}", response.status());
        return Err(AiError::Unavailable);
    }

    let parsed: SuggestResponse = response.json().map_err(|e| {
        tracing::warn!("AI suggestion response unreadable: {e}");
        AiError::Unavailable
    })?;
    Ok(parsed.suggestion.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_endpoint_is_reported_before_any_network_call() {
        assert!(matches!(suggest("", "hola"), Err(AiError::NotConfigured)));
    }

    #[test]
    fn oversized_prompts_are_rejected_locally() {
        let prompt = "x".repeat(MAX_PROMPT_CHARS + 1);
        assert!(matches!(
            suggest("http://localhost/ai", &prompt),
            Err(AiError::PromptTooLong(_))
        ));
    }
}
