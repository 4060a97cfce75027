mod answer;
mod question;

pub use answer::{UserAnswer, score};
pub use question::{
    Difficulty, OptionKey, ParseOptionKeyError, QUESTIONS_PER_QUIZ, QuizData, QuizOptions,
    QuizQuestion,
};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn question(id: u32, correct_answer: OptionKey) -> QuizQuestion {
        QuizQuestion {
            id,
            question: format!("Question number {}?", id),
            options: QuizOptions {
                a: "Alpha".to_string(),
                b: "Bravo".to_string(),
                c: "Charlie".to_string(),
                d: "Delta".to_string(),
            },
            correct_answer,
            explanation: format!("Explanation for question {}.", id),
        }
    }

    /// Five questions whose correct answers are `A, B, C, D, A`.
    pub fn quiz(topic: &str, difficulty: Difficulty) -> QuizData {
        let keys = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D, OptionKey::A];
        QuizData {
            topic: topic.to_string(),
            difficulty,
            questions: keys
                .iter()
                .enumerate()
                .map(|(i, key)| question(i as u32 + 1, *key))
                .collect(),
        }
    }

    /// The reply a well-behaved model would send for `quiz`.
    pub fn reply_json(quiz: &QuizData) -> String {
        serde_json::to_string_pretty(quiz).expect("quiz serializes")
    }
}
