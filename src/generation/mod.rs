//! Quiz and feedback generation through an external text-generation service.
//!
//! [`QuizGenerator`] owns the prompt/parse/validate/retry logic and talks to
//! the service only through the [`TextGenerator`] trait, so it can be driven
//! by a scripted fake in tests. [`GeminiClient`] is the production backend.

mod client;
mod gemini;
mod parse;
mod prompt;
#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;

pub use client::{DelayFn, QuizGenerator, DEFAULT_MAX_ATTEMPTS, fallback_feedback, tokio_delay};
pub use gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, GeminiConfig};
pub use parse::{normalize_json, parse_quiz};
pub use prompt::{difficulty_instructions, feedback_prompt, quiz_prompt};

/// A black-box text completion service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` to `model` and return the full reply text.
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, GenerationError>;
}

/// Errors raised while generating a quiz.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("request to text generation service failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("text generation service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("text generation service returned no text")]
    EmptyResponse,

    #[error("response is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Failed to generate quiz after {attempts} attempts. Please try again.")]
    Failed {
        attempts: u32,
        #[source]
        source: Box<GenerationError>,
    },
}

impl GenerationError {
    /// True for failures of the call itself rather than of its content.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GenerationError::Request(_) | GenerationError::Status { .. } | GenerationError::EmptyResponse
        )
    }
}

/// The reply parsed but does not describe a usable quiz.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid quiz data structure")]
    InvalidStructure,

    #[error("Question {index} is missing required fields ({field})")]
    MissingField { index: usize, field: &'static str },

    #[error("Question {index} must have non-empty options A, B, C and D")]
    InvalidOptions { index: usize },

    #[error("Question {index} has invalid correctAnswer {value:?}")]
    InvalidAnswer { index: usize, value: String },
}
