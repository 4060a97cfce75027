mod difficulty;
mod feedback;
mod loading;
mod quiz;
mod topic;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::{App, AppState};

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match &app.state {
        AppState::TopicSelect { .. } => topic::render(frame, area, app),
        AppState::DifficultySelect { .. } => difficulty::render(frame, area, app),
        AppState::Loading { topic, difficulty } => loading::render(frame, area, topic, *difficulty),
        AppState::Quiz(runner) => quiz::render(frame, area, runner),
        AppState::Feedback(report) => feedback::render(frame, area, report),
    }
}

/// One-line key hint at the bottom of a screen.
fn render_controls(frame: &mut Frame, area: Rect, hint: &str) {
    let widget = Paragraph::new(hint)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
