//! # ai-quiz
//!
//! A terminal quiz whose questions are written by a generative language model.
//!
//! Pick a topic and a difficulty, answer five multiple-choice questions, then
//! read your score, a per-question review and a short AI-written summary.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ai_quiz::generation::{GeminiClient, GeminiConfig, QuizGenerator, DEFAULT_MODEL};
//! use ai_quiz::{Quiz, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let client = GeminiClient::new(GeminiConfig::new("my-api-key"));
//!     let generator = QuizGenerator::new(client, DEFAULT_MODEL);
//!
//!     // Run the quiz in the terminal
//!     Quiz::new(generator).run().await
//! }
//! ```

mod app;
pub mod generation;
pub mod logging;
mod models;
mod runner;
pub mod terminal;
mod ui;

use std::io;
use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use futures_util::StreamExt;
use tokio::sync::mpsc;

pub use app::{
    App, AppState, FeedbackReport, FeedbackRequest, MAX_TOPIC_LENGTH, PRESET_TOPICS, QuizRequest,
};
pub use models::{
    Difficulty, OptionKey, ParseOptionKeyError, QUESTIONS_PER_QUIZ, QuizData, QuizOptions,
    QuizQuestion, UserAnswer, score,
};
pub use runner::{Advance, QuizRunner};

use generation::{GenerationError, QuizGenerator, TextGenerator};

/// Error type for running the quiz front end.
#[derive(Debug, thiserror::Error)]
pub enum QuizError {
    /// IO error while driving the terminal.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// A quiz session that can be run in the terminal.
pub struct Quiz<G> {
    app: App,
    generator: Arc<QuizGenerator<G>>,
}

impl<G: TextGenerator + 'static> Quiz<G> {
    pub fn new(generator: QuizGenerator<G>) -> Self {
        Self {
            app: App::new(),
            generator: Arc::new(generator),
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// This takes over the terminal and returns when the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app, &self.generator).await;
        terminal::restore()?;
        result
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

/// Results of background generation calls, fed back into the event loop.
#[derive(Debug)]
enum Reply {
    Quiz(Result<QuizData, GenerationError>),
    Feedback { session: u64, text: String },
}

/// What the event loop should do after a key press.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    None,
    Quit,
    GenerateQuiz(QuizRequest),
    GenerateFeedback(FeedbackRequest),
}

async fn run_event_loop<G: TextGenerator + 'static>(
    terminal: &mut terminal::QuizTerminal,
    app: &mut App,
    generator: &Arc<QuizGenerator<G>>,
) -> Result<(), QuizError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Reply>();
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            event = events.next() => {
                let Some(event) = event else {
                    break;
                };
                let Event::Key(key) = event? else {
                    continue;
                };
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match handle_input(app, key.code) {
                    Action::None => {}
                    Action::Quit => break,
                    Action::GenerateQuiz(request) => {
                        spawn_quiz(Arc::clone(generator), tx.clone(), request);
                    }
                    Action::GenerateFeedback(request) => {
                        spawn_feedback(Arc::clone(generator), tx.clone(), request);
                    }
                }
            }
            Some(reply) = rx.recv() => match reply {
                Reply::Quiz(result) => app.finish_loading(result),
                Reply::Feedback { session, text } => app.set_feedback(session, text),
            },
        }
    }

    tracing::info!("quitting");
    Ok(())
}

fn spawn_quiz<G: TextGenerator + 'static>(
    generator: Arc<QuizGenerator<G>>,
    tx: mpsc::UnboundedSender<Reply>,
    request: QuizRequest,
) {
    tokio::spawn(async move {
        let result = generator
            .generate_quiz_questions(&request.topic, request.difficulty)
            .await;
        let _ = tx.send(Reply::Quiz(result));
    });
}

fn spawn_feedback<G: TextGenerator + 'static>(
    generator: Arc<QuizGenerator<G>>,
    tx: mpsc::UnboundedSender<Reply>,
    request: FeedbackRequest,
) {
    tokio::spawn(async move {
        let text = generator
            .generate_feedback(
                &request.topic,
                request.difficulty,
                request.score,
                request.total,
            )
            .await;
        let _ = tx.send(Reply::Feedback {
            session: request.session,
            text,
        });
    });
}

fn handle_input(app: &mut App, key: KeyCode) -> Action {
    match app.state {
        AppState::TopicSelect { custom: None, .. } => handle_topic_input(app, key),
        AppState::TopicSelect { custom: Some(_), .. } => handle_custom_topic_input(app, key),
        AppState::DifficultySelect { .. } => handle_difficulty_input(app, key),
        AppState::Loading { .. } => handle_loading_input(key),
        AppState::Quiz(_) => handle_quiz_input(app, key),
        AppState::Feedback(_) => handle_feedback_input(app, key),
    }
}

fn is_quit(key: KeyCode) -> bool {
    matches!(key, KeyCode::Char('q') | KeyCode::Char('Q'))
}

fn handle_topic_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_topic(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_topic(),
        KeyCode::Enter => {
            if let Some(topic) = app.highlighted_topic() {
                app.select_topic(topic);
            }
        }
        KeyCode::Char('t') | KeyCode::Char('T') => app.start_custom_topic(),
        KeyCode::Esc => return Action::Quit,
        key if is_quit(key) => return Action::Quit,
        _ => {}
    }
    Action::None
}

fn handle_custom_topic_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Char(c) => app.custom_topic_push(c),
        KeyCode::Backspace => app.custom_topic_pop(),
        KeyCode::Enter => {
            let topic = app.custom_topic().unwrap_or_default().to_string();
            app.select_topic(topic);
        }
        KeyCode::Esc => app.cancel_custom_topic(),
        _ => {}
    }
    Action::None
}

fn handle_difficulty_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_difficulty(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_difficulty(),
        KeyCode::Enter => {
            let request = app
                .highlighted_difficulty()
                .and_then(|difficulty| app.select_difficulty(difficulty));
            if let Some(request) = request {
                return Action::GenerateQuiz(request);
            }
        }
        KeyCode::Char('x') | KeyCode::Char('X') => app.dismiss_error(),
        KeyCode::Esc | KeyCode::Backspace | KeyCode::Char('b') => app.back_to_topics(),
        key if is_quit(key) => return Action::Quit,
        _ => {}
    }
    Action::None
}

/// Only quitting is possible while the quiz is generated.
fn handle_loading_input(key: KeyCode) -> Action {
    if is_quit(key) {
        Action::Quit
    } else {
        Action::None
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.cycle_answer(-1),
        KeyCode::Down | KeyCode::Char('j') => app.cycle_answer(1),
        KeyCode::Left | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Right | KeyCode::Enter | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(request) = app.next_question() {
                return Action::GenerateFeedback(request);
            }
        }
        key if is_quit(key) => return Action::Quit,
        KeyCode::Char(c) => {
            if let Some(answer) = OptionKey::from_char(c) {
                app.select_answer(answer);
            }
        }
        _ => {}
    }
    Action::None
}

fn handle_feedback_input(app: &mut App, key: KeyCode) -> Action {
    match key {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_feedback_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_feedback_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.restart(),
        key if is_quit(key) => return Action::Quit,
        _ => {}
    }
    Action::None
}
