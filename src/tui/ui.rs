//! TUI rendering with ratatui.

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::feedback::{spinner_frame, turn_glyph, OptionVisual};
use crate::flags::{flag_grid, Rgb};
use crate::quiz::{Phase, RandomSource, FINAL_SCORE_TITLE, OPTIONS_PER_ROUND, WRONG_TITLE};
use crate::runner::GameController;

use super::app::TuiState;

/// Draw the entire TUI.
pub fn draw<R: RandomSource>(
    f: &mut Frame,
    controller: &GameController<R>,
    state: &TuiState,
    now: Instant,
) {
    let area = f.area();

    // Main layout: header, prompt, flags, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(4), // Prompt
            Constraint::Min(6),    // Flags
            Constraint::Length(2), // Footer
        ])
        .split(area);

    draw_header(f, chunks[0], controller, state);
    draw_prompt(f, chunks[1], controller, state);
    draw_flags(f, chunks[2], controller, state, now);
    draw_footer(f, chunks[3], controller.quiz().phase());

    match controller.quiz().phase() {
        Phase::RoundOver => draw_wrong_notice(f, area, controller),
        Phase::GameOver => draw_final_score(f, area, controller),
        Phase::AwaitingAnswer | Phase::ShowingFeedback => {}
    }
}

fn round_label<R: RandomSource>(controller: &GameController<R>) -> String {
    let quiz = controller.quiz();
    let current = match quiz.phase() {
        Phase::AwaitingAnswer | Phase::ShowingFeedback => quiz.rounds_played() + 1,
        Phase::RoundOver | Phase::GameOver => quiz.rounds_played(),
    };
    format!("Round {}/{}", current.min(quiz.max_rounds()), quiz.max_rounds())
}

/// Draw the header bar.
fn draw_header<R: RandomSource>(
    f: &mut Frame,
    area: Rect,
    controller: &GameController<R>,
    state: &TuiState,
) {
    let quiz = controller.quiz();
    let elapsed = state.elapsed_secs();
    let time_str = format!("{:02}:{:02}", (elapsed / 60.0) as u32, (elapsed % 60.0) as u32);

    let score_color = match quiz.score() {
        s if s > 0 => Color::Green,
        s if s < 0 => Color::Red,
        _ => Color::White,
    };

    let mut spans = vec![
        Span::styled(" ⚑ ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::styled("flagquiz", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            round_label(controller),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled("Score ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            quiz.score().to_string(),
            Style::default().fg(score_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(Color::DarkGray)),
        Span::styled(time_str, Style::default().fg(Color::Blue)),
    ];

    if quiz.phase() == Phase::ShowingFeedback {
        spans.push(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            spinner_frame(state.spinner_frame),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );

    f.render_widget(header, area);
}

/// Draw the question and status line.
fn draw_prompt<R: RandomSource>(
    f: &mut Frame,
    area: Rect,
    controller: &GameController<R>,
    state: &TuiState,
) {
    let quiz = controller.quiz();
    let mut lines = vec![Line::from(vec![
        Span::styled("Which one is the flag of ", Style::default().fg(Color::White)),
        Span::styled(
            quiz.target_country().to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled("?", Style::default().fg(Color::White)),
    ])];

    if let Some(status) = &state.status {
        let color = if status.starts_with('✓') {
            Color::Green
        } else if status.starts_with('⚠') {
            Color::Yellow
        } else {
            Color::Cyan
        };
        lines.push(Line::from(Span::styled(status.clone(), Style::default().fg(color))));
    }

    let prompt = Paragraph::new(lines).centered().block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );

    f.render_widget(prompt, area);
}

/// Draw the three option panels side by side.
fn draw_flags<R: RandomSource>(
    f: &mut Frame,
    area: Rect,
    controller: &GameController<R>,
    state: &TuiState,
    now: Instant,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, OPTIONS_PER_ROUND as u32); OPTIONS_PER_ROUND])
        .split(area);

    for (index, column) in columns.iter().enumerate() {
        draw_flag(f, *column, index, controller, state, now);
    }
}

fn draw_flag<R: RandomSource>(
    f: &mut Frame,
    area: Rect,
    index: usize,
    controller: &GameController<R>,
    state: &TuiState,
    now: Instant,
) {
    let quiz = controller.quiz();
    let visual = controller.visual(index, now);

    let border_color = if controller.feedback().selected() == Some(index) {
        Color::Cyan
    } else if quiz.phase() == Phase::AwaitingAnswer && state.highlighted == index {
        Color::Yellow
    } else {
        Color::DarkGray
    };

    let block = Block::default()
        .title(format!(" {} {} ", index + 1, turn_glyph(visual.rotation_degrees)))
        .title_style(Style::default().fg(border_color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .border_set(symbols::border::ROUNDED);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let flag_area = scaled(inner, visual);
    let country = quiz.options()[index].as_str();
    let lines: Vec<Line> = flag_grid(country, flag_area.width as usize, flag_area.height as usize)
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|cell| Span::styled(" ", Style::default().bg(shade(cell, visual.opacity))))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    f.render_widget(Paragraph::new(lines), flag_area);
}

/// Shrink `area` about its centre by the visual's scale, keeping a 3:2 flag.
fn scaled(area: Rect, visual: OptionVisual) -> Rect {
    let scale = visual.scale.clamp(0.1, 1.0);
    // Terminal cells are about twice as tall as wide.
    let max_height = area.height.min((area.width as f32 / 3.0) as u16);
    let height = ((max_height as f32) * scale).round().max(1.0) as u16;
    let width = ((height as f32) * 3.0).round() as u16;
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Darken `cell` towards black by `opacity`.
fn shade(cell: Rgb, opacity: f32) -> Color {
    let o = opacity.clamp(0.0, 1.0);
    let scale = |c: u8| (c as f32 * o).round() as u8;
    Color::Rgb(scale(cell.r), scale(cell.g), scale(cell.b))
}

/// Draw the footer bar.
fn draw_footer(f: &mut Frame, area: Rect, phase: Phase) {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let label = Style::default().fg(Color::DarkGray);

    let mut help = match phase {
        Phase::AwaitingAnswer => vec![
            Span::styled(" 1-3", key),
            Span::styled(" answer  ", label),
            Span::styled("←→", key),
            Span::styled(" move  ", label),
            Span::styled("enter", key),
            Span::styled(" pick  ", label),
        ],
        Phase::ShowingFeedback => vec![Span::styled(" checking...  ", label)],
        Phase::RoundOver => vec![Span::styled(" enter", key), Span::styled(" continue  ", label)],
        Phase::GameOver => vec![Span::styled(" enter", key), Span::styled(" play again  ", label)],
    };
    help.push(Span::styled("q", key));
    help.push(Span::styled(" quit", label));

    let footer = Paragraph::new(Line::from(help)).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray))
            .border_set(symbols::border::ROUNDED),
    );

    f.render_widget(footer, area);
}

fn draw_wrong_notice<R: RandomSource>(f: &mut Frame, area: Rect, controller: &GameController<R>) {
    let message = controller.quiz().wrong_answer_message().unwrap_or_default();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::White))),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to continue",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    let popup = centered_rect(area, 64, 8);
    let panel = Paragraph::new(lines)
        .centered()
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(format!(" ✗ {WRONG_TITLE} "))
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .border_set(symbols::border::DOUBLE),
        );

    f.render_widget(Clear, popup);
    f.render_widget(panel, popup);
}

fn draw_final_score<R: RandomSource>(f: &mut Frame, area: Rect, controller: &GameController<R>) {
    let quiz = controller.quiz();
    let tally = quiz.final_tally().unwrap_or_default();
    let border_color = if quiz.score() > 0 {
        Color::Green
    } else {
        Color::Yellow
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "★ ★ ★ ★ ★ ★ ★ ★ ★ ★",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(""),
        Line::from(Span::styled(
            tally,
            Style::default().fg(border_color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} of {} correct", quiz.correct_answers(), quiz.max_rounds()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to play again, q to quit",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ];

    let popup = centered_rect(area, 40, 10);
    let panel = Paragraph::new(lines).centered().block(
        Block::default()
            .title(format!(" {FINAL_SCORE_TITLE} "))
            .title_style(Style::default().fg(border_color).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .border_set(symbols::border::DOUBLE),
    );

    f.render_widget(Clear, popup);
    f.render_widget(panel, popup);
}

/// A `width` x `height` rectangle centred in `area`, clipped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
