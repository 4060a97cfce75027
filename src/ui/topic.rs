use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::app::{App, AppState, PRESET_TOPICS};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let AppState::TopicSelect { cursor, custom } = &app.state else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_title(frame, chunks[0]);
    render_topics(frame, chunks[1], *cursor, custom.is_none());
    render_custom_entry(frame, chunks[2], custom.as_deref());

    let hint = if custom.is_some() {
        "type a topic  ·  enter confirm  ·  esc cancel"
    } else {
        "j/k navigate  ·  enter select  ·  t custom topic  ·  q quit"
    };
    super::render_controls(frame, chunks[3], hint);
}

fn render_title(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "AI-ASSISTED KNOWLEDGE QUIZ",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from("Choose a topic to test your knowledge".fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_topics(frame: &mut Frame, area: Rect, cursor: usize, active: bool) {
    let lines: Vec<Line> = PRESET_TOPICS
        .iter()
        .enumerate()
        .map(|(index, topic)| {
            let is_selected = active && index == cursor;
            let style = if is_selected {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if is_selected { ">" } else { " " };

            Line::from(vec![
                Span::styled(format!(" {} ", marker), style),
                Span::styled(*topic, style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" Topics ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_custom_entry(frame: &mut Frame, area: Rect, input: Option<&str>) {
    let line = match input {
        Some(input) => Line::from(vec![
            Span::styled("Custom topic: ", Style::default().fg(Color::White)),
            Span::styled(input, Style::default().fg(Color::Yellow)),
            Span::styled("_", Style::default().fg(Color::Yellow)),
        ]),
        None => Line::from("Press [T] to enter your own topic".fg(Color::DarkGray)),
    };

    let widget = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
