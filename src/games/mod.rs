pub mod minesweeper;
pub mod snake;
pub mod tetris;

use std::time::Instant;

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

/// Host-side adapter around one engine: routes input, drives its timer,
/// and draws its snapshot.
pub trait Game {
    /// Called every frame while the game's tab is showing.
    fn update(&mut self, now: Instant);
    fn handle_input(&mut self, key: KeyEvent);
    fn handle_mouse(&mut self, _mouse: MouseEvent) {}
    fn render(&mut self, frame: &mut Frame, area: Rect);
    fn reset(&mut self);
    fn get_score(&self) -> u32;
    fn get_high_score(&self) -> u32;
    fn is_game_over(&self) -> bool;
    /// The view is being left; stop any timer so nothing fires while away.
    fn suspend(&mut self) {}
}

pub(crate) fn separator() -> Span<'static> {
    Span::styled(" │ ", Style::default().fg(Color::DarkGray))
}

pub(crate) fn help_key(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
        Span::styled(label, Style::default().fg(Color::DarkGray)),
    ]
}

/// Status line shared by all three games: score, high score, then extras.
pub(crate) fn status_line(icon: &'static str, score: u32, high: u32, extra: Vec<Span<'static>>) -> Line<'static> {
    let mut spans = vec![
        Span::styled(format!(" {} ", icon), Style::default()),
        Span::styled(
            format!("Score: {} ", score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        separator(),
        Span::styled(format!("🏆 High: {} ", high), Style::default().fg(Color::Cyan)),
    ];
    if !extra.is_empty() {
        spans.push(separator());
        spans.extend(extra);
    }
    Line::from(spans)
}

/// Bottom bar: game-over, paused, or the controls list.
pub(crate) fn footer(over: bool, paused: bool, over_hint: &'static str, controls: Vec<Span<'static>>) -> Paragraph<'static> {
    if over {
        Paragraph::new(Line::from(vec![
            Span::styled(" 💀 GAME OVER! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::styled(over_hint, Style::default().fg(Color::Gray)),
        ]))
    } else if paused {
        Paragraph::new(Line::from(vec![Span::styled(
            " ⏸ PAUSED - Press SPACE to resume ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]))
    } else {
        Paragraph::new(Line::from(controls))
    }
}

/// Rounded frame with a coloured title, returning the inner area.
pub(crate) fn game_block(frame: &mut Frame, area: Rect, title: &'static str, accent: Color) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent))
        .title(title)
        .title_style(Style::default().fg(accent).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// Status row, field, help row.
pub(crate) fn split_game_area(inner: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(inner);
    (chunks[0], chunks[1], chunks[2])
}

/// Rectangle of `width` x `height` centred in `area`, clipped to it.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}
