//! Answer collection while a quiz is on screen.

use crate::models::{OptionKey, QuizData, QuizQuestion, UserAnswer, score};

/// Outcome of [`QuizRunner::next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the following question.
    Moved,
    /// The current question has no answer yet; nothing changed.
    Unanswered,
    /// The last question was submitted.
    Completed {
        score: usize,
        answers: Vec<UserAnswer>,
    },
}

#[derive(Debug, Clone)]
pub struct QuizRunner {
    quiz: QuizData,
    current: usize,
    answers: Vec<UserAnswer>,
}

impl QuizRunner {
    pub fn new(quiz: QuizData) -> Self {
        let answers = quiz
            .questions
            .iter()
            .map(|question| UserAnswer::unanswered(question.id))
            .collect();

        Self {
            quiz,
            current: 0,
            answers,
        }
    }

    pub fn quiz(&self) -> &QuizData {
        &self.quiz
    }

    pub fn into_quiz(self) -> QuizData {
        self.quiz
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &QuizQuestion {
        &self.quiz.questions[self.current]
    }

    pub fn current_answer(&self) -> Option<OptionKey> {
        self.answers[self.current].selected
    }

    pub fn answers(&self) -> &[UserAnswer] {
        &self.answers
    }

    pub fn total(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.total()
    }

    /// Records `key` for the current question, replacing any earlier choice.
    pub fn select_answer(&mut self, key: OptionKey) {
        self.answers[self.current].selected = Some(key);
    }

    /// Moves the answer highlight by `step` options, wrapping around.
    pub fn cycle_answer(&mut self, step: isize) {
        let count = OptionKey::ALL.len() as isize;
        let key = match self.current_answer() {
            Some(key) => (key.index() as isize + step).rem_euclid(count),
            None if step < 0 => count - 1,
            None => 0,
        };
        if let Some(key) = OptionKey::from_index(key as usize) {
            self.select_answer(key);
        }
    }

    pub fn next(&mut self) -> Advance {
        if self.current_answer().is_none() {
            return Advance::Unanswered;
        }

        if !self.is_last() {
            self.current += 1;
            return Advance::Moved;
        }

        Advance::Completed {
            score: score(&self.quiz.questions, &self.answers),
            answers: self.answers.clone(),
        }
    }

    /// Steps back one question. Returns false on the first question.
    pub fn previous(&mut self) -> bool {
        if self.is_first() {
            return false;
        }
        self.current -= 1;
        true
    }
}
