//! Terminal UI rendering with ratatui
//!
//! Draws from a [`Snapshot`] only; nothing here touches the engine.

use crate::settings::Settings;
use droptris::{BOARD_HEIGHT, BOARD_WIDTH, Phase, PieceKind, Snapshot};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// Total width needed: board(22) + next/stats(18) = 40
const GAME_WIDTH: u16 = 40;
/// Total height needed: board(20) + 2 for borders = 22
const GAME_HEIGHT: u16 = 22;

/// Transient notice shown under the stats
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub message: String,
    /// Highlighted variant for big moments
    pub on_fire: bool,
}

/// Color for each piece kind
pub fn kind_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Rgb(239, 68, 68),
        PieceKind::L => Color::Rgb(249, 115, 22),
        PieceKind::J => Color::Rgb(234, 179, 8),
        PieceKind::O => Color::Rgb(34, 197, 94),
        PieceKind::T => Color::Rgb(59, 130, 246),
        PieceKind::S => Color::Rgb(168, 85, 247),
        PieceKind::Z => Color::Rgb(236, 72, 153),
    }
}

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, snapshot: &Snapshot, settings: &Settings, alert: Option<&Alert>) {
    let area = frame.area();
    let (block_char, _) = settings.visual.block_chars();

    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // board | next + stats
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(22), // Board (10*2 + 2 for borders)
            Constraint::Length(18), // Next + stats
        ])
        .split(game_area);

    render_board(frame, main_layout[0], snapshot, settings);

    let right_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Next piece
            Constraint::Min(8),    // Stats
        ])
        .split(main_layout[1]);

    render_next(frame, right_layout[0], snapshot.next, block_char);
    render_stats(frame, right_layout[1], snapshot, alert);

    match snapshot.phase {
        Phase::NotStarted => render_overlay(frame, main_layout[0], "DROPTRIS", "Enter to start"),
        Phase::Paused => render_overlay(frame, main_layout[0], "PAUSED", "P to resume"),
        Phase::GameOver => {
            let subtitle = format!("Score {} - Enter", snapshot.score);
            render_overlay(frame, main_layout[0], "GAME OVER", &subtitle);
        }
        Phase::Playing => {}
    }
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the next piece box
fn render_next(frame: &mut Frame, area: Rect, next: PieceKind, block_char: &str) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 1 || inner.width < 8 {
        return;
    }

    let color = kind_color(next);
    let shape = next.base_shape();
    let lines: Vec<Line> = (0..2)
        .map(|dy| {
            let spans: Vec<Span> = (0..4)
                .map(|dx| {
                    if shape.contains(&(dx, dy)) {
                        Span::styled(block_char, Style::default().fg(color))
                    } else {
                        Span::raw(EMPTY)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, snapshot: &Snapshot, settings: &Settings) {
    let (block_char, ghost_char) = settings.visual.block_chars();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let active_color = snapshot.active.map(|active| kind_color(active.kind));
    let ghost_cells = snapshot
        .active
        .filter(|_| settings.visual.show_ghost && snapshot.phase == Phase::Playing)
        .map(|active| active.landing_cells);

    let mut lines: Vec<Line> = Vec::with_capacity(BOARD_HEIGHT);
    for (row, cells) in snapshot.grid.iter().enumerate() {
        let mut spans = Vec::with_capacity(BOARD_WIDTH);
        for (col, &filled) in cells.iter().enumerate() {
            let (col, row) = (col as i32, row as i32);
            let (text, style) = if snapshot.is_active_cell(col, row) {
                (block_char, Style::default().fg(active_color.unwrap_or(Color::White)))
            } else if filled {
                (block_char, Style::default().fg(Color::Gray))
            } else if ghost_cells.is_some_and(|cells| cells.contains(&(col, row))) {
                (ghost_char, Style::default().fg(active_color.unwrap_or(Color::White)).dim())
            } else {
                (EMPTY, Style::default())
            };
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render stats panel
fn render_stats(frame: &mut Frame, area: Rect, snapshot: &Snapshot, alert: Option<&Alert>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::Gray)));

    let mut lines = vec![
        label("SCORE"),
        Line::from(Span::styled(
            format!("{}", snapshot.score),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        label("LEVEL"),
        Line::from(Span::styled(format!("{}", snapshot.level), Style::default().fg(Color::Cyan))),
        Line::raw(""),
        label("LINES"),
        Line::from(Span::styled(format!("{}", snapshot.lines), Style::default().fg(Color::Green))),
    ];

    if let Some(alert) = alert {
        let color = if alert.on_fire { Color::Red } else { Color::Magenta };
        lines.push(Line::raw(""));
        lines.push(Line::styled(alert.message.clone(), Style::default().fg(color).bold()));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &str, subtitle: &str) {
    let popup_area = center_rect(area, 20, 5);

    // Clear the background
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let text = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];

    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}
