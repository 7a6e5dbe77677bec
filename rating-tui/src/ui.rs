//! UI rendering
//!
//! Pure rendering functions that turn the rating box state into a frame:
//! a row of stars, a submit control gated by submit eligibility, and a
//! status line for the submission state.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use libratingbox::{Rating, SubmissionState, MAX_STARS};

use crate::app::App;

const FILLED_STAR: &str = "★";
const EMPTY_STAR: &str = "☆";

/// Render the application UI
pub fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.size());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Stars
            Constraint::Length(3), // Submit control
            Constraint::Min(3),    // Status
            Constraint::Length(1), // Hints
        ])
        .split(area);

    render_stars(frame, chunks[0], app);
    render_submit(frame, chunks[1], app);
    render_status(frame, chunks[2], app);

    let hints = Paragraph::new("0-5/←→: rate | Enter: submit | F1: help | q: quit")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[3]);

    if app.help_visible {
        render_help_overlay(frame, frame.size());
    }
}

/// Stars for a rating, filled for every star index below the rating
pub fn star_line(rating: Rating) -> String {
    (0..MAX_STARS)
        .map(|i| if i < rating { FILLED_STAR } else { EMPTY_STAR })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Human-readable status text and color for a submission state
pub fn status_line(state: &SubmissionState) -> (String, Color) {
    match state {
        SubmissionState::Idle => ("Please choose a rating".to_string(), Color::Reset),
        SubmissionState::Submitting => ("Submitting...".to_string(), Color::Blue),
        SubmissionState::Success => ("Submitted! Thanks for your rating".to_string(), Color::Green),
        SubmissionState::Failure(reason) => (format!("Error: {}", reason), Color::Red),
    }
}

fn style(app: &App, color: Color) -> Style {
    if app.config.colors_enabled {
        Style::default().fg(color)
    } else {
        Style::default()
    }
}

fn render_stars(frame: &mut Frame, area: Rect, app: &App) {
    let stars = Paragraph::new(star_line(app.rating_box.current_rating()))
        .style(style(app, Color::Yellow).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().title(" Rating ").borders(Borders::ALL));

    frame.render_widget(stars, area);
}

fn render_submit(frame: &mut Frame, area: Rect, app: &App) {
    let enabled = app.rating_box.is_submit_enabled();
    let label = if enabled {
        Span::styled(
            "[ Submit rating ]",
            style(app, Color::Cyan).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "[ Submit rating ]",
            style(app, Color::DarkGray).add_modifier(Modifier::DIM),
        )
    };

    let submit = Paragraph::new(Line::from(label))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(submit, area);
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let (text, color) = status_line(app.rating_box.submission_state());

    let status = Paragraph::new(text)
        .style(style(app, color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" Status ").borders(Borders::ALL));

    frame.render_widget(status, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(50, 50, area);

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("  1-5      - Choose stars"),
        Line::from("  0        - Clear rating"),
        Line::from("  ←/→ h/l  - One star less/more"),
        Line::from("  Enter s  - Submit rating"),
        Line::from("  F1       - Toggle help"),
        Line::from("  q Esc    - Quit"),
        Line::from(""),
        Line::from("Press Esc or F1 to close"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup_area);
    frame.render_widget(help, popup_area);
}

/// Helper to create centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
