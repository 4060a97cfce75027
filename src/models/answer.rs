use serde::{Deserialize, Serialize};

use super::{OptionKey, QuizQuestion};

/// The user's choice for one question. `selected` is `None` until answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub question_id: u32,
    pub selected: Option<OptionKey>,
}

impl UserAnswer {
    pub fn unanswered(question_id: u32) -> Self {
        Self {
            question_id,
            selected: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.selected.is_some()
    }
}

/// Counts answers matching the correct answer of the question at the same index.
pub fn score(questions: &[QuizQuestion], answers: &[UserAnswer]) -> usize {
    answers
        .iter()
        .zip(questions.iter())
        .filter(|(answer, question)| question.is_correct(answer.selected))
        .count()
}
