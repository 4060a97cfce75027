use crate::models::{Difficulty, QUESTIONS_PER_QUIZ};

/// Extra guidance appended to the quiz prompt for each difficulty.
pub fn difficulty_instructions(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => {
            "Make questions straightforward and suitable for beginners. Focus on basic concepts and fundamental knowledge."
        }
        Difficulty::Medium => {
            "Make questions moderately challenging. Include some nuance and require good understanding of the topic."
        }
        Difficulty::Hard => {
            "Make questions very challenging. Include advanced concepts, tricky details, and require deep expertise."
        }
    }
}

pub fn quiz_prompt(topic: &str, difficulty: Difficulty) -> String {
    format!(
        r#"You are an AI quiz generator.
Generate exactly {count} multiple-choice questions (MCQs) on the topic "{topic}" at {level} difficulty level.
{instructions}

Each question must include: question text, 4 options (A–D), correctAnswer, and explanation.
Return only valid JSON like:
{{
  "topic": "{topic}",
  "difficulty": "{difficulty}",
  "questions": [
    {{
      "id": 1,
      "question": "Question text?",
      "options": {{"A": "Option A", "B": "Option B", "C": "Option C", "D": "Option D"}},
      "correctAnswer": "C",
      "explanation": "Short explanation."
    }}
  ]
}}
No extra text or markdown."#,
        count = QUESTIONS_PER_QUIZ,
        topic = topic,
        level = difficulty.as_str().to_uppercase(),
        instructions = difficulty_instructions(difficulty),
        difficulty = difficulty,
    )
}

pub fn feedback_prompt(topic: &str, difficulty: Difficulty, score: usize, total: usize) -> String {
    format!(
        r#"You are an AI feedback generator.
Given topic: "{}" at {} difficulty level, score: {} out of {}, write 2–3 motivational sentences summarizing the user's performance and suggesting improvement.
Plain text only."#,
        topic,
        difficulty.as_str().to_uppercase(),
        score,
        total
    )
}
