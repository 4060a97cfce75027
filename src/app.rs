//! Session state machine.
//!
//! Each screen is an [`AppState`] variant carrying only the data valid on
//! that screen. Operations called from the wrong screen do nothing.

use crate::generation::{GenerationError, QuizGenerator, TextGenerator};
use crate::models::{Difficulty, OptionKey, QuizData, UserAnswer};
use crate::runner::{Advance, QuizRunner};

pub const PRESET_TOPICS: [&str; 10] = [
    "Wellness",
    "Tech Trends",
    "Space",
    "History",
    "Geography",
    "Music",
    "Art & Culture",
    "Sports",
    "Literature",
    "Programming",
];

/// Longest custom topic accepted from the keyboard.
pub const MAX_TOPIC_LENGTH: usize = 40;

/// Current screen of the session.
#[derive(Debug, Clone)]
pub enum AppState {
    /// Choosing a topic.
    TopicSelect {
        cursor: usize,
        /// Free-text entry, `Some` while the user is typing a custom topic.
        custom: Option<String>,
    },

    /// Choosing a difficulty for `topic`.
    DifficultySelect {
        topic: String,
        cursor: usize,
        error: Option<String>,
    },

    /// Waiting for the quiz to be generated.
    Loading { topic: String, difficulty: Difficulty },

    /// Answering questions.
    Quiz(QuizRunner),

    /// Score, review and AI feedback.
    Feedback(FeedbackReport),
}

impl Default for AppState {
    fn default() -> Self {
        Self::topic_select()
    }
}

impl AppState {
    pub fn topic_select() -> Self {
        Self::TopicSelect {
            cursor: 0,
            custom: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TopicSelect { .. } => "topic-select",
            Self::DifficultySelect { .. } => "difficulty-select",
            Self::Loading { .. } => "loading",
            Self::Quiz(_) => "quiz",
            Self::Feedback(_) => "feedback",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedbackReport {
    pub quiz: QuizData,
    pub answers: Vec<UserAnswer>,
    pub score: usize,
    /// `None` until the feedback call returns.
    pub feedback: Option<String>,
    pub scroll: usize,
}

impl FeedbackReport {
    pub fn total(&self) -> usize {
        self.quiz.questions.len()
    }

    pub fn percentage(&self) -> f64 {
        if self.total() > 0 {
            self.score as f64 / self.total() as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Quiz generation to start after entering [`AppState::Loading`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub topic: String,
    pub difficulty: Difficulty,
}

/// Feedback generation to start after entering [`AppState::Feedback`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRequest {
    /// Session the request belongs to; replies for older sessions are dropped.
    pub session: u64,
    pub topic: String,
    pub difficulty: Difficulty,
    pub score: usize,
    pub total: usize,
}

/// The single quiz session.
#[derive(Debug, Default)]
pub struct App {
    pub state: AppState,
    session: u64,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn selected_topic(&self) -> Option<&str> {
        match &self.state {
            AppState::TopicSelect { .. } => None,
            AppState::DifficultySelect { topic, .. } | AppState::Loading { topic, .. } => {
                Some(topic.as_str())
            }
            AppState::Quiz(runner) => Some(runner.quiz().topic.as_str()),
            AppState::Feedback(report) => Some(report.quiz.topic.as_str()),
        }
    }

    pub fn quiz_data(&self) -> Option<&QuizData> {
        match &self.state {
            AppState::Quiz(runner) => Some(runner.quiz()),
            AppState::Feedback(report) => Some(&report.quiz),
            _ => None,
        }
    }

    pub fn score(&self) -> Option<usize> {
        match &self.state {
            AppState::Feedback(report) => Some(report.score),
            _ => None,
        }
    }

    pub fn user_answers(&self) -> &[UserAnswer] {
        match &self.state {
            AppState::Quiz(runner) => runner.answers(),
            AppState::Feedback(report) => &report.answers,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            AppState::DifficultySelect { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn runner(&self) -> Option<&QuizRunner> {
        match &self.state {
            AppState::Quiz(runner) => Some(runner),
            _ => None,
        }
    }

    // Topic selection

    pub fn select_next_topic(&mut self) {
        if let AppState::TopicSelect {
            cursor,
            custom: None,
        } = &mut self.state
        {
            *cursor = (*cursor + 1) % PRESET_TOPICS.len();
        }
    }

    pub fn select_previous_topic(&mut self) {
        if let AppState::TopicSelect {
            cursor,
            custom: None,
        } = &mut self.state
        {
            *cursor = (*cursor + PRESET_TOPICS.len() - 1) % PRESET_TOPICS.len();
        }
    }

    pub fn highlighted_topic(&self) -> Option<&'static str> {
        match &self.state {
            AppState::TopicSelect { cursor, .. } => PRESET_TOPICS.get(*cursor).copied(),
            _ => None,
        }
    }

    pub fn start_custom_topic(&mut self) {
        if let AppState::TopicSelect { custom, .. } = &mut self.state {
            custom.get_or_insert_with(String::new);
        }
    }

    pub fn cancel_custom_topic(&mut self) {
        if let AppState::TopicSelect { custom, .. } = &mut self.state {
            *custom = None;
        }
    }

    pub fn custom_topic_push(&mut self, c: char) {
        if let AppState::TopicSelect {
            custom: Some(input),
            ..
        } = &mut self.state
        {
            if input.chars().count() < MAX_TOPIC_LENGTH {
                input.push(c);
            }
        }
    }

    pub fn custom_topic_pop(&mut self) {
        if let AppState::TopicSelect {
            custom: Some(input),
            ..
        } = &mut self.state
        {
            input.pop();
        }
    }

    pub fn custom_topic(&self) -> Option<&str> {
        match &self.state {
            AppState::TopicSelect { custom, .. } => custom.as_deref(),
            _ => None,
        }
    }

    /// Records `topic` and moves to difficulty selection. Blank topics are
    /// ignored.
    pub fn select_topic(&mut self, topic: impl Into<String>) -> bool {
        let topic = topic.into();
        let topic = topic.trim();
        if topic.is_empty() || !matches!(self.state, AppState::TopicSelect { .. }) {
            return false;
        }

        tracing::info!(%topic, "topic selected");
        self.state = AppState::DifficultySelect {
            topic: topic.to_string(),
            cursor: 0,
            error: None,
        };
        true
    }

    // Difficulty selection

    pub fn select_next_difficulty(&mut self) {
        if let AppState::DifficultySelect { cursor, .. } = &mut self.state {
            *cursor = (*cursor + 1) % Difficulty::ALL.len();
        }
    }

    pub fn select_previous_difficulty(&mut self) {
        if let AppState::DifficultySelect { cursor, .. } = &mut self.state {
            *cursor = (*cursor + Difficulty::ALL.len() - 1) % Difficulty::ALL.len();
        }
    }

    pub fn highlighted_difficulty(&self) -> Option<Difficulty> {
        match &self.state {
            AppState::DifficultySelect { cursor, .. } => Difficulty::ALL.get(*cursor).copied(),
            _ => None,
        }
    }

    pub fn back_to_topics(&mut self) {
        if matches!(self.state, AppState::DifficultySelect { .. }) {
            self.state = AppState::topic_select();
        }
    }

    pub fn dismiss_error(&mut self) {
        if let AppState::DifficultySelect { error, .. } = &mut self.state {
            *error = None;
        }
    }

    /// Moves to loading and returns the generation request to issue.
    pub fn select_difficulty(&mut self, difficulty: Difficulty) -> Option<QuizRequest> {
        let AppState::DifficultySelect { topic, .. } = &mut self.state else {
            return None;
        };

        let topic = std::mem::take(topic);
        tracing::info!(%topic, %difficulty, "difficulty selected, generating quiz");
        self.state = AppState::Loading {
            topic: topic.clone(),
            difficulty,
        };
        Some(QuizRequest { topic, difficulty })
    }

    /// Applies the outcome of the quiz request issued by [`select_difficulty`].
    ///
    /// [`select_difficulty`]: App::select_difficulty
    pub fn finish_loading(&mut self, result: Result<QuizData, GenerationError>) {
        let AppState::Loading { topic, difficulty } = &mut self.state else {
            return;
        };
        let topic = std::mem::take(topic);
        let difficulty = *difficulty;

        self.state = match result {
            Ok(quiz) => AppState::Quiz(QuizRunner::new(quiz)),
            Err(e) => {
                tracing::error!(error = %e, %topic, %difficulty, "quiz generation failed");
                AppState::DifficultySelect {
                    topic,
                    cursor: Difficulty::ALL
                        .iter()
                        .position(|d| *d == difficulty)
                        .unwrap_or(0),
                    error: Some(e.to_string()),
                }
            }
        };
    }

    /// Select a difficulty and wait for the quiz.
    pub async fn choose_difficulty<G: TextGenerator>(
        &mut self,
        difficulty: Difficulty,
        generator: &QuizGenerator<G>,
    ) {
        if let Some(request) = self.select_difficulty(difficulty) {
            let result = generator
                .generate_quiz_questions(&request.topic, request.difficulty)
                .await;
            self.finish_loading(result);
        }
    }

    // Quiz

    pub fn select_answer(&mut self, key: OptionKey) {
        if let AppState::Quiz(runner) = &mut self.state {
            runner.select_answer(key);
        }
    }

    pub fn cycle_answer(&mut self, step: isize) {
        if let AppState::Quiz(runner) = &mut self.state {
            runner.cycle_answer(step);
        }
    }

    pub fn previous_question(&mut self) {
        if let AppState::Quiz(runner) = &mut self.state {
            runner.previous();
        }
    }

    /// Advances the quiz. On the final submission moves to feedback and
    /// returns the feedback request to issue.
    pub fn next_question(&mut self) -> Option<FeedbackRequest> {
        let AppState::Quiz(runner) = &mut self.state else {
            return None;
        };

        let Advance::Completed { score, answers } = runner.next() else {
            return None;
        };

        let quiz = runner.quiz().clone();
        tracing::info!(score, total = quiz.total(), topic = %quiz.topic, "quiz completed");
        let request = FeedbackRequest {
            session: self.session,
            topic: quiz.topic.clone(),
            difficulty: quiz.difficulty,
            score,
            total: quiz.total(),
        };
        self.state = AppState::Feedback(FeedbackReport {
            quiz,
            answers,
            score,
            feedback: None,
            scroll: 0,
        });
        Some(request)
    }

    // Feedback

    /// Stores the feedback text if still on the feedback screen of `session`.
    pub fn set_feedback(&mut self, session: u64, text: String) {
        if session != self.session {
            tracing::debug!(session, current = self.session, "dropping stale feedback");
            return;
        }
        if let AppState::Feedback(report) = &mut self.state {
            report.feedback = Some(text);
        }
    }

    /// Fetch feedback for the current report and store it.
    pub async fn load_feedback<G: TextGenerator>(&mut self, generator: &QuizGenerator<G>) {
        let AppState::Feedback(report) = &self.state else {
            return;
        };

        let text = generator
            .generate_feedback(
                &report.quiz.topic,
                report.quiz.difficulty,
                report.score,
                report.total(),
            )
            .await;
        self.set_feedback(self.session, text);
    }

    pub fn scroll_feedback_down(&mut self) {
        if let AppState::Feedback(report) = &mut self.state {
            let max_scroll = report.total().saturating_sub(1);
            report.scroll = (report.scroll + 1).min(max_scroll);
        }
    }

    pub fn scroll_feedback_up(&mut self) {
        if let AppState::Feedback(report) = &mut self.state {
            report.scroll = report.scroll.saturating_sub(1);
        }
    }

    /// Discards the session and returns to topic selection.
    pub fn restart(&mut self) {
        if matches!(self.state, AppState::Feedback(_)) {
            tracing::info!(session = self.session, "restarting session");
            self.state = AppState::topic_select();
            self.session += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::generation::testing::{ScriptedGenerator, outage, recording_delay};
    use crate::models::fixtures;

    fn quiz_generator(
        replies: Vec<Result<String, GenerationError>>,
    ) -> QuizGenerator<ScriptedGenerator> {
        let (delay, _) = recording_delay();
        QuizGenerator::new(ScriptedGenerator::new(replies), "test-model").with_delay(delay)
    }

    fn app_in_quiz() -> App {
        let mut app = App::new();
        app.select_topic("Space");
        app.select_difficulty(Difficulty::Hard);
        app.finish_loading(Ok(fixtures::quiz("Space", Difficulty::Hard)));
        app
    }

    fn app_in_feedback() -> (App, FeedbackRequest) {
        let mut app = app_in_quiz();
        let mut request = None;
        for _ in 0..5 {
            app.select_answer(OptionKey::A);
            request = app.next_question();
        }
        (app, request.expect("quiz completes"))
    }

    #[test]
    fn test_starts_in_topic_select() {
        let app = App::new();
        assert_eq!(app.state.name(), "topic-select");
        assert_eq!(app.selected_topic(), None);
        assert!(app.quiz_data().is_none());
    }

    #[test]
    fn test_blank_topic_is_ignored() {
        let mut app = App::new();
        assert!(!app.select_topic("   "));
        assert_eq!(app.state.name(), "topic-select");
    }

    #[test]
    fn test_back_clears_topic() {
        let mut app = App::new();
        app.select_topic("History");
        assert_eq!(app.selected_topic(), Some("History"));

        app.back_to_topics();
        assert_eq!(app.state.name(), "topic-select");
        assert_eq!(app.selected_topic(), None);
    }

    #[tokio::test]
    async fn test_successful_generation_enters_quiz() {
        let quiz = fixtures::quiz("Space", Difficulty::Hard);
        let generator = quiz_generator(vec![Ok(fixtures::reply_json(&quiz))]);
        let mut app = App::new();

        app.select_topic("Space");
        assert_eq!(app.state.name(), "difficulty-select");
        app.choose_difficulty(Difficulty::Hard, &generator).await;

        assert_eq!(app.state.name(), "quiz");
        let data = app.quiz_data().unwrap();
        assert_eq!(data.topic, "Space");
        assert_eq!(data.difficulty, Difficulty::Hard);
        assert_eq!(app.user_answers().len(), 5);
    }

    #[tokio::test]
    async fn test_failed_generation_returns_to_difficulty_with_error() {
        let generator = quiz_generator(vec![outage(), outage(), outage()]);
        let mut app = App::new();

        app.select_topic("Space");
        app.choose_difficulty(Difficulty::Hard, &generator).await;

        assert_eq!(app.state.name(), "difficulty-select");
        assert_eq!(app.selected_topic(), Some("Space"));
        assert_eq!(app.highlighted_difficulty(), Some(Difficulty::Hard));
        let error = app.error().unwrap();
        assert!(error.contains("3 attempts"));
    }

    #[test]
    fn test_loading_passes_through_state() {
        let mut app = App::new();
        app.select_topic("Space");
        let request = app.select_difficulty(Difficulty::Medium).unwrap();

        assert_eq!(
            request,
            QuizRequest {
                topic: "Space".to_string(),
                difficulty: Difficulty::Medium
            }
        );
        assert_eq!(app.state.name(), "loading");
        assert_eq!(app.selected_topic(), Some("Space"));
        // A second request cannot be issued while loading.
        assert_eq!(app.select_difficulty(Difficulty::Easy), None);
    }

    #[test]
    fn test_retry_clears_error_and_dismiss_clears_it_too() {
        let mut app = App::new();
        app.select_topic("Space");
        app.select_difficulty(Difficulty::Easy);
        app.finish_loading(Err(GenerationError::EmptyResponse));
        assert!(app.error().is_some());

        app.dismiss_error();
        assert_eq!(app.error(), None);

        app.select_difficulty(Difficulty::Easy);
        app.finish_loading(Err(GenerationError::EmptyResponse));
        assert!(app.error().is_some());
        app.select_difficulty(Difficulty::Easy);
        assert_eq!(app.error(), None);
        assert_eq!(app.state.name(), "loading");
    }

    #[test]
    fn test_quiz_completion_enters_feedback() {
        let (app, request) = app_in_feedback();

        assert_eq!(app.state.name(), "feedback");
        // Fixture answers are A, B, C, D, A.
        assert_eq!(app.score(), Some(2));
        assert_eq!(request.score, 2);
        assert_eq!(request.total, 5);
        assert_eq!(request.topic, "Space");
        assert_eq!(app.user_answers().len(), 5);
    }

    #[test]
    fn test_unanswered_question_blocks_next() {
        let mut app = app_in_quiz();
        assert_eq!(app.next_question(), None);
        assert_eq!(app.runner().unwrap().current_index(), 0);
    }

    #[tokio::test]
    async fn test_feedback_is_loaded_for_current_session() {
        let (mut app, _) = app_in_feedback();
        let generator = quiz_generator(vec![outage()]);

        app.load_feedback(&generator).await;

        let AppState::Feedback(report) = &app.state else {
            panic!("expected feedback state");
        };
        assert_eq!(
            report.feedback.as_deref(),
            Some("You scored 2 out of 5 on Space. Keep practicing to improve your knowledge!")
        );
    }

    #[test]
    fn test_restart_resets_everything() {
        let (mut app, _) = app_in_feedback();
        app.restart();

        assert_eq!(app.state.name(), "topic-select");
        assert_eq!(app.selected_topic(), None);
        assert!(app.quiz_data().is_none());
        assert_eq!(app.score(), None);
        assert!(app.user_answers().is_empty());
        assert_eq!(app.error(), None);
    }

    #[test]
    fn test_stale_feedback_is_dropped() {
        let (mut app, first) = app_in_feedback();
        app.restart();
        app.select_topic("Space");
        app.select_difficulty(Difficulty::Hard);
        app.finish_loading(Ok(fixtures::quiz("Space", Difficulty::Hard)));
        for _ in 0..5 {
            app.select_answer(OptionKey::B);
            app.next_question();
        }

        app.set_feedback(first.session, "old".to_string());
        let AppState::Feedback(report) = &app.state else {
            panic!("expected feedback state");
        };
        assert_eq!(report.feedback, None);
    }

    #[test]
    fn test_custom_topic_entry() {
        let mut app = App::new();
        app.start_custom_topic();
        for c in "Rust".chars() {
            app.custom_topic_push(c);
        }
        app.custom_topic_push('x');
        app.custom_topic_pop();
        assert_eq!(app.custom_topic(), Some("Rust"));

        let topic = app.custom_topic().unwrap().to_string();
        assert!(app.select_topic(topic));
        assert_eq!(app.selected_topic(), Some("Rust"));
    }

    #[test]
    fn test_topic_cursor_wraps() {
        let mut app = App::new();
        app.select_previous_topic();
        assert_eq!(app.highlighted_topic(), Some("Programming"));
        app.select_next_topic();
        assert_eq!(app.highlighted_topic(), Some("Wellness"));
    }
}
