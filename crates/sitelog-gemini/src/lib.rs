//! Gemini `generateContent` client.
//!
//! Blocking on purpose: the CLI issues one request at a time and waits for it,
//! so there is no runtime to drive. Requests are sent once; failures go back
//! to the caller unchanged.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sitelog_engine::{GenerationError, TextGenerator};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
const CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiOptions {
    pub api_key: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl GeminiOptions {
    /// Options with the API key read from the environment variable `var`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::MissingApiKey`] when `var` is unset or empty.
    pub fn from_env_key(var: &str) -> Result<Self, GenerationError> {
        let api_key = std::env::var(var)
            .ok()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| GenerationError::MissingApiKey {
                var: var.to_string(),
            })?;
        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }
}

pub struct GeminiClient {
    http: reqwest::blocking::Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(options: GeminiOptions) -> Result<Self, GenerationError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| GenerationError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            api_key: options.api_key,
            base_url: options.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{model}:generateContent", self.base_url)
    }

    fn send_json(&self, url: &str, body: &impl Serialize) -> Result<String, GenerationError> {
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .map_err(|e| GenerationError::Request(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(GenerationError::Response { status, body: text });
        }
        Ok(text)
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationError> {
        log::debug!("Calling {model} with a {}-byte prompt", prompt.len());
        let body = GenerateRequest::user_prompt(prompt);
        let text = self.send_json(&self.endpoint(model), &body)?;
        parse_generate_response(&text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn user_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Joins the text parts of the first candidate.
///
/// A response without candidates or text yields an empty string rather than
/// an error; the caller owns the fallback wording.
fn parse_generate_response(body: &str) -> Result<String, GenerationError> {
    let response: GenerateResponse =
        serde_json::from_str(body).map_err(|e| GenerationError::Parse(e.to_string()))?;
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|p| p.text)
                .collect::<String>()
        })
        .unwrap_or_default();
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(GenerateRequest::user_prompt("写周报")).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "写周报" }] }]
            })
        );
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let client = GeminiClient::new(GeminiOptions {
            api_key: "k".to_string(),
            base_url: "http://localhost:9/v1beta/".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(
            client.endpoint("gemini-3-flash-preview"),
            "http://localhost:9/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }

    #[test]
    fn joins_parts_of_first_candidate() {
        let body = r###"{
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "## 一、" }, { "text": "本周工作回顾" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }"###;
        assert_eq!(parse_generate_response(body).unwrap(), "## 一、本周工作回顾");
    }

    #[test]
    fn missing_candidates_is_empty_text() {
        assert_eq!(parse_generate_response("{}").unwrap(), "");
        assert_eq!(
            parse_generate_response(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap(),
            ""
        );
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let err = parse_generate_response("<html>").unwrap_err();
        assert!(matches!(err, GenerationError::Parse(_)));
    }

    #[test]
    fn missing_key_names_variable() {
        let err = GeminiOptions::from_env_key("SITELOG_TEST_SURELY_UNSET_KEY").unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing API key: env var SITELOG_TEST_SURELY_UNSET_KEY not set"
        );
    }
}
