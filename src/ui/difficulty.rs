use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::{App, AppState};
use crate::models::Difficulty;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let AppState::DifficultySelect {
        topic,
        cursor,
        error,
    } = &app.state
    else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(3),
        Constraint::Length(11),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0], topic);
    if let Some(error) = error {
        render_error(frame, chunks[1], error);
    }
    render_levels(frame, chunks[2], *cursor);

    let hint = if error.is_some() {
        "j/k navigate  ·  enter retry  ·  x dismiss  ·  esc back  ·  q quit"
    } else {
        "j/k navigate  ·  enter start  ·  esc back to topics  ·  q quit"
    };
    super::render_controls(frame, chunks[4], hint);
}

fn render_title(frame: &mut Frame, area: Rect, topic: &str) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "CHOOSE YOUR DIFFICULTY",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(vec![
            Span::styled("Topic: ", Style::default().fg(Color::DarkGray)),
            Span::styled(topic, Style::default().fg(Color::Yellow).bold()),
        ]),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let widget = Paragraph::new(error)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bg(Color::Red).bold())
        .block(Block::default().padding(Padding::vertical(1)));
    frame.render_widget(widget, area);
}

fn level_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Cyan,
        Difficulty::Hard => Color::Red,
    }
}

fn render_levels(frame: &mut Frame, area: Rect, cursor: usize) {
    let mut lines: Vec<Line> = Vec::with_capacity(Difficulty::ALL.len() * 3);

    for (index, difficulty) in Difficulty::ALL.iter().enumerate() {
        let is_selected = index == cursor;
        let style = if is_selected {
            Style::default().fg(level_color(*difficulty)).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(difficulty.label(), style),
        ]));
        lines.push(Line::from(Span::styled(
            format!("   {}", difficulty.description()),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
