use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::models::{OptionKey, QuizOptions};
use crate::runner::QuizRunner;

pub fn render(frame: &mut Frame, area: Rect, runner: &QuizRunner) {
    let question = runner.current_question();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], runner);
    render_progress(frame, chunks[1], runner);
    render_question_text(frame, chunks[2], &question.question);
    render_options(frame, chunks[3], &question.options, runner.current_answer());
    render_navigation(frame, chunks[4], runner);
    super::render_controls(
        frame,
        chunks[5],
        "a-d or j/k choose  ·  enter/l next  ·  h previous  ·  q quit",
    );
}

fn render_header(frame: &mut Frame, area: Rect, runner: &QuizRunner) {
    let title = format!("{} Quiz", runner.quiz().topic);
    let position = format!("{}/{}", runner.current_index() + 1, runner.total());

    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(position.len() as u16)])
            .areas(area);

    frame.render_widget(Paragraph::new(title).fg(Color::White).bold(), left);
    frame.render_widget(
        Paragraph::new(position)
            .alignment(Alignment::Right)
            .fg(Color::DarkGray),
        right,
    );
}

fn render_progress(frame: &mut Frame, area: Rect, runner: &QuizRunner) {
    let ratio = (runner.current_index() + 1) as f64 / runner.total().max(1) as f64;
    let widget = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .label("")
        .ratio(ratio.clamp(0.0, 1.0));
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .style(Style::default().fg(Color::White).bold())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    options: &QuizOptions,
    selected: Option<OptionKey>,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(OptionKey::ALL.len() * 2);

    for (key, option) in options.iter() {
        let is_selected = selected == Some(key);
        let style = if is_selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_selected { ">" } else { " " };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", marker), style),
            Span::styled(format!("{}. ", key), style),
            Span::styled(option, style),
        ]));
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Options ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_navigation(frame: &mut Frame, area: Rect, runner: &QuizRunner) {
    let enabled = Style::default().fg(Color::Green).bold();
    let disabled = Style::default().fg(Color::DarkGray);

    let previous = Span::styled(
        "< Previous",
        if runner.is_first() { disabled } else { enabled },
    );
    let next_label = if runner.is_last() { "Submit >" } else { "Next >" };
    let next = Span::styled(
        next_label,
        if runner.current_answer().is_some() {
            enabled
        } else {
            disabled
        },
    );

    let [left, right] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).areas(area);
    frame.render_widget(Paragraph::new(Line::from(previous)), left);
    frame.render_widget(
        Paragraph::new(Line::from(next)).alignment(Alignment::Right),
        right,
    );
}
