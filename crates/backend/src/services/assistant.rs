//! Best-effort client for the generative-language API.
//!
//! Every call resolves to a usable string: a missing key, a transport
//! failure or an unparseable response all degrade to fixed fallback
//! messages, never to an error the handler has to deal with.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

pub const NOT_CONFIGURED: &str = "AI service is not configured.";
pub const COULD_NOT_PROCESS: &str = "AI could not process the request.";
pub const SERVICE_ERROR: &str = "AI service error.";

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TEMPERATURE: f32 = 0.3;

#[derive(Clone)]
pub struct Assistant {
    api_key: Option<String>,
    model: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl Assistant {
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty());
        let model =
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        if api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY not set, assistant replies with fallback text");
        }
        Assistant {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }

    /// One round-trip, no retries. Failures surface as fallback
    /// strings so the caller always has something to show.
    pub async fn generate(&self, prompt: &str, max_tokens: u32) -> String {
        let Some(key) = &self.api_key else {
            return NOT_CONFIGURED.to_string();
        };

        match self.request(key, prompt, max_tokens).await {
            Ok(Some(text)) => text,
            Ok(None) => COULD_NOT_PROCESS.to_string(),
            Err(e) => {
                tracing::warn!("assistant request failed: {:?}", e);
                SERVICE_ERROR.to_string()
            }
        }
    }

    async fn request(
        &self,
        key: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> anyhow::Result<Option<String>> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent",
            self.model
        );

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: DEFAULT_TEMPERATURE,
                max_output_tokens: max_tokens,
            },
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", key)])
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let parsed: GenerateResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        Ok(text)
    }
}

/// Pull the first `{...}` block out of a raw completion. Models asked for
/// bare JSON still wrap it in prose often enough that this has to be
/// lenient.
pub fn extract_json(text: &str) -> Option<serde_json::Value> {
    static JSON_BLOCK: OnceLock<Regex> = OnceLock::new();
    let re = JSON_BLOCK.get_or_init(|| Regex::new(r"\{[\s\S]*\}").expect("static regex"));

    let block = re.find(text)?.as_str();
    serde_json::from_str(block).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_json_wrapped_in_prose() {
        let raw = "Sure! Here you go:\n{\"intent\": \"chat\", \"reply\": \"hi\"}\nanything else?";
        let value = extract_json(raw).unwrap();
        assert_eq!(value["intent"], "chat");
        assert_eq!(value["reply"], "hi");
    }

    #[test]
    fn extracts_multiline_json() {
        let raw = "{\n  \"intent\": \"create_task\",\n  \"title\": \"buy milk\",\n  \"estimated_duration_minutes\": 15\n}";
        let value = extract_json(raw).unwrap();
        assert_eq!(value["intent"], "create_task");
        assert_eq!(value["estimated_duration_minutes"], 15);
    }

    #[test]
    fn rejects_text_without_json() {
        assert!(extract_json("no braces here").is_none());
        assert!(extract_json("").is_none());
        assert!(extract_json("{not valid json}").is_none());
    }
}
