//! Groq chat-completions client for report narratives.
//!
//! Narratives are flavor, not data: every failure past construction is
//! converted into a human-readable placeholder string carrying the error
//! detail, so report generation always gets a displayable string back. The
//! one exception is a missing API key, which is a deployment error and
//! propagates as [`DescribeError::MissingApiKey`] from the constructor.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{config, error::DescribeError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const ROAST_SYSTEM_PROMPT: &str = "You are a music analyst who roasts and insults the user \
     (use 2nd perspective) behavior based on their music tastes in less than 100 words.";

const COMPARE_SYSTEM_PROMPT: &str = "You are a music critic who roasts and humorously compares \
     two artists (use 2nd perspective) in less than 100 words. Be witty and sarcastic.";

/// Errors that can occur when talking to the completion endpoint. These
/// never leave this module as errors; they end up embedded in placeholder
/// strings.
#[derive(Debug, Error)]
enum CompletionError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("request timeout")]
    Timeout,
}

/// Generates the narrative pieces of a report.
///
/// Implementations must uphold the always-a-string contract: whatever goes
/// wrong downstream, the returned string is displayable as-is.
#[async_trait]
pub trait Narrator: Send + Sync {
    /// A roast of how someone with these favorite artists acts, thinks,
    /// and dresses.
    async fn describe(&self, favorite_artists: &[String]) -> String;

    /// The quirky variant, fed with the lowest-popularity artists.
    async fn describe_quirky(&self, quirkiest_artists: &[String]) -> String;

    /// A two-artist comparison roast for duo reports.
    async fn compare(&self, artist_1: &str, artist_2: &str) -> String;
}

/// Groq-backed [`Narrator`] using the OpenAI-compatible chat-completions
/// endpoint.
pub struct GroqClient {
    http: Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl GroqClient {
    /// Creates a client against the configured endpoint and model.
    ///
    /// # Errors
    ///
    /// Returns `DescribeError::MissingApiKey` if `api_key` is empty. This
    /// must propagate to the operator; narratives never silently degrade
    /// because of a missing key.
    pub fn new(api_key: &str) -> Result<Self, DescribeError> {
        Self::with_endpoint(api_key, config::groq_apiurl(), config::groq_model())
    }

    /// Creates a client from the `GROQ_API_KEY` environment variable.
    pub fn from_env() -> Result<Self, DescribeError> {
        Self::new(&config::groq_api_key()?)
    }

    /// Creates a client against an explicit endpoint and model. Used by
    /// tests to point at an unreachable endpoint without touching the
    /// process environment.
    pub fn with_endpoint(
        api_key: &str,
        api_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, DescribeError> {
        if api_key.is_empty() {
            return Err(DescribeError::MissingApiKey);
        }

        Ok(GroqClient {
            http: Client::new(),
            api_key: api_key.to_string(),
            api_url: api_url.into(),
            model: model.into(),
        })
    }

    async fn chat_completion(&self, system: &str, user: String) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
        };

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout
                } else {
                    CompletionError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::InvalidResponse("no choices in response".to_string()))
    }
}

#[async_trait]
impl Narrator for GroqClient {
    async fn describe(&self, favorite_artists: &[String]) -> String {
        let prompt = format!(
            "Describe how someone who listens to artists like {} tends to act, think, and dress.",
            favorite_artists.join(", ")
        );

        match self.chat_completion(ROAST_SYSTEM_PROMPT, prompt).await {
            Ok(description) => description,
            Err(e) => format!("Description unavailable due to API error: {}", e),
        }
    }

    async fn describe_quirky(&self, quirkiest_artists: &[String]) -> String {
        let prompt = format!(
            "Describe how someone who only listens to artists like {} just to be quirky and \
             stand out from the crowd tends to act, think, and dress.",
            quirkiest_artists.join(", ")
        );

        match self.chat_completion(ROAST_SYSTEM_PROMPT, prompt).await {
            Ok(description) => description,
            Err(e) => format!("Description unavailable due to API error: {}", e),
        }
    }

    async fn compare(&self, artist_1: &str, artist_2: &str) -> String {
        let prompt = format!(
            "Compare {} and {} in a funny way that roasts both. Highlight their differences \
             in style, fanbase, and anything else that makes them opposites.",
            artist_1, artist_2
        );

        match self.chat_completion(COMPARE_SYSTEM_PROMPT, prompt).await {
            Ok(comparison) => comparison,
            Err(e) => format!("Comparison unavailable due to API error: {}", e),
        }
    }
}

// Groq API types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}
