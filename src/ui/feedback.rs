use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::FeedbackReport;
use crate::models::{QuizQuestion, UserAnswer};

pub fn render(frame: &mut Frame, area: Rect, report: &FeedbackReport) {
    let percentage = report.percentage();
    let grade_color = grade_color(percentage);

    let chunks = Layout::vertical([
        Constraint::Length(6),
        Constraint::Length(6),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[0], report, percentage, grade_color);
    render_ai_feedback(frame, chunks[1], report.feedback.as_deref());
    render_review(frame, chunks[2], report);
    super::render_controls(frame, chunks[3], "j/k scroll  ·  r take another quiz  ·  q quit");
}

fn grade_color(percentage: f64) -> Color {
    match percentage {
        p if p >= 80.0 => Color::Green,
        p if p >= 60.0 => Color::Cyan,
        p if p >= 40.0 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(
    frame: &mut Frame,
    area: Rect,
    report: &FeedbackReport,
    percentage: f64,
    grade_color: Color,
) {
    let content = vec![
        Line::from(Span::styled(
            "QUIZ COMPLETE",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(Span::styled(
            format!("{} · {}", report.quiz.topic, report.quiz.difficulty.label()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} / {}  ({:.0}% correct)", report.score, report.total(), percentage),
            Style::default().fg(grade_color).bold(),
        )),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_ai_feedback(frame: &mut Frame, area: Rect, feedback: Option<&str>) {
    let widget = match feedback {
        Some(text) => Paragraph::new(text).fg(Color::White),
        None => Paragraph::new("Generating feedback...").fg(Color::Yellow),
    };

    let widget = widget.wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray)
            .title(" AI Feedback ")
            .title_style(Style::default().fg(Color::Cyan))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}

fn render_review(frame: &mut Frame, area: Rect, report: &FeedbackReport) {
    let lines: Vec<Line> = report
        .answers
        .iter()
        .zip(report.quiz.questions.iter())
        .enumerate()
        .flat_map(|(index, (answer, question))| review_lines(index, answer, question))
        .collect();

    // One scroll step is one five-line question block, before wrapping.
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Color::DarkGray)
                .title(" Review Your Answers ")
                .title_style(Style::default().fg(Color::Cyan))
                .padding(Padding::horizontal(1)),
        )
        .scroll(((report.scroll * 5) as u16, 0));
    frame.render_widget(widget, area);
}

fn review_lines<'a>(
    index: usize,
    answer: &UserAnswer,
    question: &'a QuizQuestion,
) -> Vec<Line<'a>> {
    let is_correct = question.is_correct(answer.selected);
    let (symbol, color) = if is_correct {
        ("+", Color::Green)
    } else {
        ("-", Color::Red)
    };

    let your_answer = match answer.selected {
        Some(key) => Span::styled(
            format!("{} - {}", key, question.options.get(key)),
            Style::default().fg(color),
        ),
        None => Span::styled("No answer selected", Style::default().fg(Color::DarkGray)),
    };

    let correct_answer = if is_correct {
        Line::from("")
    } else {
        let key = question.correct_answer;
        Line::from(vec![
            Span::styled("   Correct answer: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{} - {}", key, question.options.get(key)),
                Style::default().fg(Color::Green),
            ),
        ])
    };

    vec![
        Line::from(vec![
            Span::styled(format!(" {} ", symbol), Style::default().fg(color).bold()),
            Span::styled(
                format!("Question {}: ", index + 1),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(question.question.as_str(), Style::default().fg(Color::White)),
        ]),
        Line::from(vec![
            Span::styled("   Your answer: ", Style::default().fg(Color::Gray)),
            your_answer,
        ]),
        correct_answer,
        Line::from(Span::styled(
            format!("   {}", question.explanation),
            Style::default().fg(Color::DarkGray).italic(),
        )),
        Line::from(""),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grade_color_thresholds() {
        assert_eq!(grade_color(100.0), Color::Green);
        assert_eq!(grade_color(80.0), Color::Green);
        assert_eq!(grade_color(60.0), Color::Cyan);
        assert_eq!(grade_color(40.0), Color::Yellow);
        assert_eq!(grade_color(20.0), Color::Red);
    }
}
