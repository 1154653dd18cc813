use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::prelude::*;
use ratatui::widgets::*;

use calmcade::engine::minesweeper::{
    BoardState, Cell, FlagOutcome, Minesweeper, MinesweeperConfig, RevealOutcome,
};
use calmcade::GameError;

use crate::games::{self, Game};

// Each cell is drawn three columns wide so the grid looks square.
const CELL_WIDTH: u16 = 3;

const HIDDEN_BG: Color = Color::Rgb(49, 67, 40);
const OPEN_BG: Color = Color::Rgb(200, 230, 183);
const NUMBER_COLORS: [Color; 8] = [
    Color::Rgb(37, 99, 235),
    Color::Rgb(22, 163, 74),
    Color::Rgb(220, 38, 38),
    Color::Rgb(147, 51, 234),
    Color::Rgb(202, 138, 4),
    Color::Rgb(219, 39, 119),
    Color::Rgb(13, 148, 136),
    Color::Rgb(75, 85, 99),
];

pub struct MinesweeperGame {
    engine: Minesweeper,
    cursor_x: usize,
    cursor_y: usize,
    // Where the grid was last drawn, for mouse hit-testing.
    board_area: Rect,
}

impl MinesweeperGame {
    pub fn new(config: MinesweeperConfig, seed: Option<u64>) -> Result<Self, GameError> {
        Ok(Self {
            engine: Minesweeper::new(config, seed)?,
            cursor_x: config.width / 2,
            cursor_y: config.height / 2,
            board_area: Rect::default(),
        })
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let board = self.engine.board();
        self.cursor_x = self.cursor_x.saturating_add_signed(dx).min(board.width() - 1);
        self.cursor_y = self.cursor_y.saturating_add_signed(dy).min(board.height() - 1);
    }

    fn reveal(&mut self, x: usize, y: usize) {
        match self.engine.reveal(x, y) {
            Ok(RevealOutcome::NoChange) => {}
            Ok(outcome) => log::debug!("minesweeper: reveal ({}, {}) -> {:?}", x, y, outcome),
            Err(err) => log::warn!("minesweeper: {}", err),
        }
    }

    fn toggle_flag(&mut self, x: usize, y: usize) {
        match self.engine.toggle_flag(x, y) {
            Ok(FlagOutcome::NoChange) => {}
            Ok(outcome) => log::debug!("minesweeper: flag ({}, {}) -> {:?}", x, y, outcome),
            Err(err) => log::warn!("minesweeper: {}", err),
        }
    }

    /// Primary button: a new game once over, pause toggle otherwise.
    fn primary(&mut self) {
        if self.engine.state().is_over() {
            self.engine.new_game();
        } else {
            self.engine.toggle_pause();
        }
    }

    /// Board coordinates under a terminal position, if any.
    fn cell_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let area = self.board_area;
        if column < area.x || row < area.y || column >= area.right() || row >= area.bottom() {
            return None;
        }
        let x = ((column - area.x) / CELL_WIDTH) as usize;
        let y = (row - area.y) as usize;
        let board = self.engine.board();
        (x < board.width() && y < board.height()).then_some((x, y))
    }

    fn cell_span(&self, cell: &Cell, x: usize, y: usize) -> Span<'static> {
        let (glyph, style) = if cell.is_revealed {
            if cell.is_mine {
                ('✱', Style::default().fg(Color::White).bg(Color::Rgb(220, 50, 50)).add_modifier(Modifier::BOLD))
            } else if cell.neighbor_mines > 0 {
                let color = NUMBER_COLORS[(cell.neighbor_mines as usize - 1).min(7)];
                (
                    char::from(b'0' + cell.neighbor_mines),
                    Style::default().fg(color).bg(OPEN_BG).add_modifier(Modifier::BOLD),
                )
            } else {
                (' ', Style::default().bg(OPEN_BG))
            }
        } else if cell.is_flagged {
            ('⚑', Style::default().fg(Color::Rgb(255, 90, 90)).bg(HIDDEN_BG).add_modifier(Modifier::BOLD))
        } else {
            ('·', Style::default().fg(Color::Rgb(90, 110, 80)).bg(HIDDEN_BG))
        };

        let under_cursor = x == self.cursor_x && y == self.cursor_y && !self.engine.state().is_over();
        if under_cursor {
            Span::styled(format!("[{}]", glyph), style.fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD))
        } else {
            Span::styled(format!(" {} ", glyph), style)
        }
    }

    fn render_board(&self) -> Vec<Line<'static>> {
        self.engine
            .board()
            .rows()
            .enumerate()
            .map(|(y, row)| {
                Line::from(
                    row.iter()
                        .enumerate()
                        .map(|(x, cell)| self.cell_span(cell, x, y))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

impl Game for MinesweeperGame {
    fn update(&mut self, _now: Instant) {}

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => self.primary(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            _ => {
                if self.engine.state() != BoardState::Active {
                    return;
                }
                match key.code {
                    KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => self.move_cursor(-1, 0),
                    KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => self.move_cursor(1, 0),
                    KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => self.move_cursor(0, -1),
                    KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => self.move_cursor(0, 1),
                    KeyCode::Enter => self.reveal(self.cursor_x, self.cursor_y),
                    KeyCode::Char('f') | KeyCode::Char('F') => self.toggle_flag(self.cursor_x, self.cursor_y),
                    _ => {}
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let MouseEventKind::Down(button) = mouse.kind else {
            return;
        };
        let Some((x, y)) = self.cell_at(mouse.column, mouse.row) else {
            return;
        };
        self.cursor_x = x;
        self.cursor_y = y;
        match button {
            MouseButton::Left => self.reveal(x, y),
            MouseButton::Right => self.toggle_flag(x, y),
            MouseButton::Middle => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner = games::game_block(frame, area, " 💣 Minesweeper ", Color::Rgb(120, 200, 110));
        let (status_area, field_area, help_area) = games::split_game_area(inner);

        let snap = self.engine.snapshot();
        let status = games::status_line(
            "💣",
            snap.score,
            snap.high_score,
            vec![Span::styled(
                format!("Mines: {} ", snap.mines_remaining),
                Style::default().fg(Color::Rgb(255, 120, 120)).add_modifier(Modifier::BOLD),
            )],
        );
        frame.render_widget(Paragraph::new(status), status_area);

        let board = self.engine.board();
        let grid_w = board.width() as u16 * CELL_WIDTH;
        let grid_h = board.height() as u16;
        self.board_area = games::centered(field_area, grid_w, grid_h);
        frame.render_widget(Paragraph::new(self.render_board()), self.board_area);

        let help = match self.engine.state() {
            BoardState::Won => Paragraph::new(Line::from(vec![
                Span::styled(" 🎉 CLEARED! ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
                Span::styled(
                    format!("Score: {} │ Press SPACE for a new game", self.engine.score()),
                    Style::default().fg(Color::Gray),
                ),
            ])),
            state => {
                let mut controls = Vec::new();
                controls.push(Span::raw(" "));
                controls.extend(games::help_key("←↑↓→", " Move "));
                controls.push(games::separator());
                controls.extend(games::help_key("Enter", " Reveal "));
                controls.push(games::separator());
                controls.extend(games::help_key("F", " Flag "));
                controls.push(games::separator());
                controls.extend(games::help_key("Click", " Reveal/Flag "));
                controls.push(games::separator());
                controls.extend(games::help_key("Space", " Pause "));
                controls.push(games::separator());
                controls.extend(games::help_key("Esc", " Menu"));
                games::footer(
                    state == BoardState::Lost,
                    state == BoardState::Paused,
                    "Press SPACE for a new game, Esc for menu",
                    controls,
                )
            }
        };
        frame.render_widget(help, help_area);
    }

    fn reset(&mut self) {
        self.engine.new_game();
        let board = self.engine.board();
        self.cursor_x = board.width() / 2;
        self.cursor_y = board.height() / 2;
    }

    fn get_score(&self) -> u32 {
        self.engine.score()
    }

    fn get_high_score(&self) -> u32 {
        self.engine.high_score()
    }

    fn is_game_over(&self) -> bool {
        self.engine.state().is_over()
    }
}
