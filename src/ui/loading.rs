use ratatui::{prelude::*, widgets::Paragraph};

use crate::models::Difficulty;

pub fn render(frame: &mut Frame, area: Rect, topic: &str, difficulty: Difficulty) {
    let chunks = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(7),
        Constraint::Percentage(40),
    ])
    .split(area);

    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "GENERATING QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} · {}", topic, difficulty.label()),
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from("The AI is writing your questions...".fg(Color::DarkGray)),
    ];

    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), chunks[1]);
}
