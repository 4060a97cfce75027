use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Every generated quiz has exactly this many questions.
pub const QUESTIONS_PER_QUIZ: usize = 5;

/// How hard the generated questions should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Lowercase identifier, as sent to the model.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Perfect for beginners",
            Difficulty::Medium => "Test your knowledge",
            Difficulty::Hard => "For true experts",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter identifying one of the four answer options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionKey {
    A,
    B,
    C,
    D,
}

impl OptionKey {
    pub const ALL: [OptionKey; 4] = [OptionKey::A, OptionKey::B, OptionKey::C, OptionKey::D];

    pub fn letter(&self) -> char {
        match self {
            OptionKey::A => 'A',
            OptionKey::B => 'B',
            OptionKey::C => 'C',
            OptionKey::D => 'D',
        }
    }

    pub fn index(&self) -> usize {
        match self {
            OptionKey::A => 0,
            OptionKey::B => 1,
            OptionKey::C => 2,
            OptionKey::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Case-insensitive lookup, used for keyboard input.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'A' => Some(OptionKey::A),
            'B' => Some(OptionKey::B),
            'C' => Some(OptionKey::C),
            'D' => Some(OptionKey::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("answer key must be one of A, B, C or D, got {0:?}")]
pub struct ParseOptionKeyError(pub String);

impl FromStr for OptionKey {
    type Err = ParseOptionKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => {
                OptionKey::from_char(c).ok_or_else(|| ParseOptionKeyError(s.to_string()))
            }
            _ => Err(ParseOptionKeyError(s.to_string())),
        }
    }
}

/// The four answer texts of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOptions {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl QuizOptions {
    pub fn get(&self, key: OptionKey) -> &str {
        match key {
            OptionKey::A => &self.a,
            OptionKey::B => &self.b,
            OptionKey::C => &self.c,
            OptionKey::D => &self.d,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionKey, &str)> {
        OptionKey::ALL.into_iter().map(move |key| (key, self.get(key)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String,
    pub options: QuizOptions,
    pub correct_answer: OptionKey,
    pub explanation: String,
}

impl QuizQuestion {
    pub fn is_correct(&self, answer: Option<OptionKey>) -> bool {
        answer == Some(self.correct_answer)
    }
}

/// A generated quiz: one topic, one difficulty, five questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizData {
    pub topic: String,
    pub difficulty: Difficulty,
    pub questions: Vec<QuizQuestion>,
}

impl QuizData {
    pub fn total(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_key_parsing() {
        assert_eq!("A".parse::<OptionKey>(), Ok(OptionKey::A));
        assert_eq!(" D ".parse::<OptionKey>(), Ok(OptionKey::D));
        assert!("a".parse::<OptionKey>().is_err());
        assert!("E".parse::<OptionKey>().is_err());
        assert!("AB".parse::<OptionKey>().is_err());
        assert!("".parse::<OptionKey>().is_err());
    }

    #[test]
    fn test_option_key_from_char_is_case_insensitive() {
        assert_eq!(OptionKey::from_char('b'), Some(OptionKey::B));
        assert_eq!(OptionKey::from_char('C'), Some(OptionKey::C));
        assert_eq!(OptionKey::from_char('x'), None);
    }

    #[test]
    fn test_options_iterate_in_letter_order() {
        let options = QuizOptions {
            a: "one".to_string(),
            b: "two".to_string(),
            c: "three".to_string(),
            d: "four".to_string(),
        };
        let keys: Vec<char> = options.iter().map(|(key, _)| key.letter()).collect();
        assert_eq!(keys, vec!['A', 'B', 'C', 'D']);
        assert_eq!(options.get(OptionKey::C), "three");
    }

    #[test]
    fn test_question_serializes_with_camel_case_answer() {
        let question = QuizQuestion {
            id: 1,
            question: "Q?".to_string(),
            options: QuizOptions {
                a: "a".to_string(),
                b: "b".to_string(),
                c: "c".to_string(),
                d: "d".to_string(),
            },
            correct_answer: OptionKey::B,
            explanation: "because".to_string(),
        };
        let json = serde_json::to_string(&question).unwrap();
        assert!(json.contains("\"correctAnswer\":\"B\""));
        assert!(json.contains("\"A\":\"a\""));
    }

    #[test]
    fn test_difficulty_display_is_lowercase() {
        assert_eq!(Difficulty::Hard.to_string(), "hard");
        assert_eq!(Difficulty::Medium.label(), "Medium");
    }
}
