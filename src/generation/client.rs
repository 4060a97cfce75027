use std::sync::Arc;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;

use crate::models::{Difficulty, QuizData};

use super::parse::parse_quiz;
use super::prompt::{feedback_prompt, quiz_prompt};
use super::{GenerationError, TextGenerator};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Step of the linear backoff: attempt `n` failing waits `n` steps.
const RETRY_DELAY_STEP: Duration = Duration::from_millis(1000);

/// Sleeps for the given duration. Swapped out in tests.
pub type DelayFn = Arc<dyn Fn(Duration) -> BoxFuture<'static, ()> + Send + Sync>;

pub fn tokio_delay() -> DelayFn {
    Arc::new(|duration| tokio::time::sleep(duration).boxed())
}

/// Text shown when the feedback call fails.
pub fn fallback_feedback(topic: &str, score: usize, total: usize) -> String {
    format!(
        "You scored {} out of {} on {}. Keep practicing to improve your knowledge!",
        score, total, topic
    )
}

/// Generates quizzes and feedback through a [`TextGenerator`].
pub struct QuizGenerator<G> {
    generator: G,
    model: String,
    max_attempts: u32,
    delay: DelayFn,
}

impl<G: TextGenerator> QuizGenerator<G> {
    pub fn new(generator: G, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: tokio_delay(),
        }
    }

    /// Sets the attempt limit. Values below one are treated as one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_delay(mut self, delay: DelayFn) -> Self {
        self.delay = delay;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Generates five validated questions, retrying the whole request on any
    /// failure with a linearly growing pause between attempts.
    pub async fn generate_quiz_questions(
        &self,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<QuizData, GenerationError> {
        let prompt = quiz_prompt(topic, difficulty);
        let mut attempt = 1;

        loop {
            tracing::debug!(attempt, %topic, %difficulty, "requesting quiz");
            let error = match self.attempt_quiz(&prompt, topic, difficulty).await {
                Ok(quiz) => {
                    tracing::info!(attempt, %topic, %difficulty, "quiz generated");
                    return Ok(quiz);
                }
                Err(e) => e,
            };

            tracing::warn!(attempt, error = %error, "quiz generation attempt failed");
            if attempt >= self.max_attempts {
                return Err(GenerationError::Failed {
                    attempts: self.max_attempts,
                    source: Box::new(error),
                });
            }

            (self.delay)(RETRY_DELAY_STEP * attempt).await;
            attempt += 1;
        }
    }

    async fn attempt_quiz(
        &self,
        prompt: &str,
        topic: &str,
        difficulty: Difficulty,
    ) -> Result<QuizData, GenerationError> {
        let reply = self.generator.complete(prompt, &self.model).await?;
        parse_quiz(&reply, topic, difficulty)
    }

    /// Asks for a short motivational summary. Never fails: any error is
    /// replaced by [`fallback_feedback`].
    pub async fn generate_feedback(
        &self,
        topic: &str,
        difficulty: Difficulty,
        score: usize,
        total: usize,
    ) -> String {
        let prompt = feedback_prompt(topic, difficulty, score, total);
        match self.generator.complete(&prompt, &self.model).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                tracing::warn!("feedback reply was empty, using fallback");
                fallback_feedback(topic, score, total)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to generate feedback, using fallback");
                fallback_feedback(topic, score, total)
            }
        }
    }
}
