//! Turning a model reply into validated [`QuizData`].

use serde_json::Value;

use crate::models::{Difficulty, OptionKey, QUESTIONS_PER_QUIZ, QuizData, QuizOptions, QuizQuestion};

use super::{GenerationError, ValidationError};

const FENCE: &str = "```";

/// Extracts the JSON object from a model reply.
///
/// Tries a fenced code block (optionally tagged `json`) first, then the span
/// from the first `{` to the last `}`. Falls back to the trimmed reply.
pub fn normalize_json(text: &str) -> &str {
    let text = text.trim();

    if let Some(inner) = fenced_object(text) {
        return inner;
    }

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start <= end => &text[start..=end],
        _ => text,
    }
}

fn fenced_object(text: &str) -> Option<&str> {
    let start = text.find(FENCE)?;
    let after = &text[start + FENCE.len()..];
    let body = after.strip_prefix("json").unwrap_or(after).trim_start();
    if !body.starts_with('{') {
        return None;
    }

    let end = body.rfind(FENCE)?;
    let inner = body[..end].trim_end();
    inner.ends_with('}').then_some(inner)
}

/// Parses and validates a raw reply.
///
/// Question ids are assigned by position and the requested topic and
/// difficulty are kept, whatever the model echoed back.
pub fn parse_quiz(raw: &str, topic: &str, difficulty: Difficulty) -> Result<QuizData, GenerationError> {
    let value: Value = serde_json::from_str(normalize_json(raw))?;

    let questions = value
        .get("questions")
        .and_then(Value::as_array)
        .filter(|questions| questions.len() == QUESTIONS_PER_QUIZ)
        .ok_or(ValidationError::InvalidStructure)?;

    let questions = questions
        .iter()
        .enumerate()
        .map(|(i, question)| parse_question(i + 1, question))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuizData {
        topic: topic.to_string(),
        difficulty,
        questions,
    })
}

fn parse_question(index: usize, value: &Value) -> Result<QuizQuestion, ValidationError> {
    let question = required_text(value, "question", index)?;
    let options = value
        .get("options")
        .filter(|options| !options.is_null())
        .ok_or(ValidationError::MissingField {
            index,
            field: "options",
        })?;
    let correct_answer = required_text(value, "correctAnswer", index)?;
    let explanation = required_text(value, "explanation", index)?;

    let options = parse_options(options).ok_or(ValidationError::InvalidOptions { index })?;
    let correct_answer =
        correct_answer
            .parse::<OptionKey>()
            .map_err(|_| ValidationError::InvalidAnswer {
                index,
                value: correct_answer.to_string(),
            })?;

    Ok(QuizQuestion {
        id: index as u32,
        question: question.to_string(),
        options,
        correct_answer,
        explanation: explanation.to_string(),
    })
}

fn required_text<'a>(
    value: &'a Value,
    field: &'static str,
    index: usize,
) -> Result<&'a str, ValidationError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .ok_or(ValidationError::MissingField { index, field })
}

fn parse_options(value: &Value) -> Option<QuizOptions> {
    let map = value.as_object()?;
    if map.len() != OptionKey::ALL.len() {
        return None;
    }

    let text = |key: OptionKey| {
        map.get(key.letter().to_string().as_str())
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string)
    };

    Some(QuizOptions {
        a: text(OptionKey::A)?,
        b: text(OptionKey::B)?,
        c: text(OptionKey::C)?,
        d: text(OptionKey::D)?,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::models::fixtures;

    fn reply_with(mutate: impl FnOnce(&mut Value)) -> String {
        let quiz = fixtures::quiz("Space", Difficulty::Hard);
        let mut value = serde_json::to_value(&quiz).unwrap();
        mutate(&mut value);
        value.to_string()
    }

    fn validation_error(raw: &str) -> ValidationError {
        match parse_quiz(raw, "Space", Difficulty::Hard) {
            Err(GenerationError::Validation(e)) => e,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_normalize_fenced_json() {
        assert_eq!(normalize_json("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(normalize_json("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(
            normalize_json("Here you go:\n```json\n{\"a\":{\"b\":2}}\n```\nEnjoy!"),
            "{\"a\":{\"b\":2}}"
        );
    }

    #[test]
    fn test_normalize_brace_span() {
        assert_eq!(normalize_json("noise{\"a\":1}moretext"), "{\"a\":1}");
        assert_eq!(normalize_json("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_normalize_without_braces_returns_trimmed_text() {
        assert_eq!(normalize_json("  no json here \n"), "no json here");
        assert_eq!(normalize_json("} backwards {"), "} backwards {");
    }

    #[test]
    fn test_parse_valid_reply() {
        let expected = fixtures::quiz("Space", Difficulty::Hard);
        let raw = format!("```json\n{}\n```", fixtures::reply_json(&expected));

        let quiz = parse_quiz(&raw, "Space", Difficulty::Hard).unwrap();
        assert_eq!(quiz, expected);
        for question in &quiz.questions {
            let keys: Vec<OptionKey> = question.options.iter().map(|(key, _)| key).collect();
            assert_eq!(keys, OptionKey::ALL.to_vec());
        }
    }

    #[test]
    fn test_parse_assigns_positional_ids_and_requested_topic() {
        let raw = reply_with(|value| {
            value["topic"] = json!("Outer Space");
            value["difficulty"] = json!("easy");
            for question in value["questions"].as_array_mut().unwrap() {
                question["id"] = json!(42);
            }
        });

        let quiz = parse_quiz(&raw, "Space", Difficulty::Hard).unwrap();
        assert_eq!(quiz.topic, "Space");
        assert_eq!(quiz.difficulty, Difficulty::Hard);
        let ids: Vec<u32> = quiz.questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = parse_quiz("{\"questions\": [", "Space", Difficulty::Hard);
        assert!(matches!(result, Err(GenerationError::Parse(_))));
    }

    #[test]
    fn test_wrong_question_count_is_invalid_structure() {
        let raw = reply_with(|value| {
            value["questions"].as_array_mut().unwrap().pop();
        });
        assert_eq!(validation_error(&raw), ValidationError::InvalidStructure);
        assert_eq!(
            validation_error(&raw).to_string(),
            "Invalid quiz data structure"
        );
    }

    #[test]
    fn test_missing_or_non_array_questions_is_invalid_structure() {
        assert_eq!(
            validation_error("{\"topic\": \"Space\"}"),
            ValidationError::InvalidStructure
        );
        assert_eq!(
            validation_error("{\"questions\": {\"1\": {}}}"),
            ValidationError::InvalidStructure
        );
    }

    #[test]
    fn test_missing_field_names_first_offending_question() {
        let raw = reply_with(|value| {
            value["questions"][2]["explanation"] = json!("");
            value["questions"][4]["question"] = Value::Null;
        });
        let error = validation_error(&raw);
        assert_eq!(
            error,
            ValidationError::MissingField {
                index: 3,
                field: "explanation"
            }
        );
        assert!(error.to_string().starts_with("Question 3 is missing required fields"));
    }

    #[test]
    fn test_incomplete_options_are_rejected() {
        let raw = reply_with(|value| {
            value["questions"][1]["options"]
                .as_object_mut()
                .unwrap()
                .remove("D");
        });
        assert_eq!(
            validation_error(&raw),
            ValidationError::InvalidOptions { index: 2 }
        );

        let raw = reply_with(|value| {
            value["questions"][0]["options"]["E"] = json!("Echo");
        });
        assert_eq!(
            validation_error(&raw),
            ValidationError::InvalidOptions { index: 1 }
        );
    }

    #[test]
    fn test_answer_outside_options_is_rejected() {
        let raw = reply_with(|value| {
            value["questions"][4]["correctAnswer"] = json!("E");
        });
        assert_eq!(
            validation_error(&raw),
            ValidationError::InvalidAnswer {
                index: 5,
                value: "E".to_string()
            }
        );
    }
}
