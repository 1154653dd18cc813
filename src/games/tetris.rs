use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use calmcade::engine::tetris::{self, MoveOutcome, Rgb, Tetris, BOARD_HEIGHT, BOARD_WIDTH};
use calmcade::timer::TickTimer;

use crate::games::{self, Game};

const CELL_WIDTH: u16 = 2;
const WELL: Color = Color::Rgb(22, 24, 36);

fn to_color(Rgb(r, g, b): Rgb) -> Color {
    Color::Rgb(r, g, b)
}

pub struct TetrisGame {
    engine: Tetris,
    timer: TickTimer,
    lines: u32,
}

impl TetrisGame {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            engine: Tetris::new(seed),
            timer: TickTimer::new(tetris::TICK_INTERVAL),
            lines: 0,
        }
    }

    fn apply(&mut self, outcome: MoveOutcome) {
        if let MoveOutcome::Locked { lines_cleared } = outcome {
            self.lines += lines_cleared;
            if self.engine.phase().is_over() {
                log::debug!("tetris: stack reached the top after {} lines", self.lines);
            }
        }
    }

    fn primary(&mut self) {
        if self.engine.phase().is_over() {
            self.reset();
        } else {
            self.engine.toggle_pause();
            // Each resume starts a fresh period.
            self.timer.cancel();
        }
    }

    fn render_well(&self) -> Vec<Line<'static>> {
        let snap = self.engine.snapshot();
        let mut grid: Vec<Vec<Option<Color>>> = snap
            .board
            .rows()
            .iter()
            .map(|row| row.iter().map(|cell| cell.map(to_color)).collect())
            .collect();

        if !snap.over {
            let color = to_color(snap.piece.color());
            for (x, y) in snap.piece.cells() {
                if (0..BOARD_WIDTH as i32).contains(&x) && (0..BOARD_HEIGHT as i32).contains(&y) {
                    grid[y as usize][x as usize] = Some(color);
                }
            }
        }

        grid.into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|cell| match cell {
                            Some(color) => Span::styled("██", Style::default().fg(color)),
                            None => Span::styled(" ·", Style::default().fg(Color::Rgb(50, 54, 70)).bg(WELL)),
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

impl Game for TetrisGame {
    fn update(&mut self, now: Instant) {
        if !self.engine.phase().is_active() {
            return;
        }
        if self.timer.poll(now) {
            let outcome = self.engine.tick();
            self.apply(outcome);
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
                let outcome = self.engine.move_piece(-1, 0);
                self.apply(outcome);
            }
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
                let outcome = self.engine.move_piece(1, 0);
                self.apply(outcome);
            }
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
                let outcome = self.engine.move_piece(0, 1);
                self.apply(outcome);
            }
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
                self.engine.rotate();
            }
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => self.primary(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner = games::game_block(frame, area, " 🧱 Tetris ", Color::Rgb(160, 120, 255));
        let (status_area, field_area, help_area) = games::split_game_area(inner);

        let snap = self.engine.snapshot();
        let status = games::status_line(
            "🧱",
            snap.score,
            snap.high_score,
            vec![Span::styled(
                format!("Lines: {} ", self.lines),
                Style::default().fg(Color::Magenta),
            )],
        );
        frame.render_widget(Paragraph::new(status), status_area);

        let well = games::centered(
            field_area,
            BOARD_WIDTH as u16 * CELL_WIDTH + 2,
            BOARD_HEIGHT as u16 + 2,
        );
        let border = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let well_inner = border.inner(well);
        frame.render_widget(border, well);
        frame.render_widget(Paragraph::new(self.render_well()), well_inner);

        let mut controls = vec![Span::raw(" ")];
        controls.extend(games::help_key("←→", " Move "));
        controls.push(games::separator());
        controls.extend(games::help_key("↑", " Rotate "));
        controls.push(games::separator());
        controls.extend(games::help_key("↓", " Drop "));
        controls.push(games::separator());
        controls.extend(games::help_key("Space", " Pause "));
        controls.push(games::separator());
        controls.extend(games::help_key("Esc", " Menu"));
        let help = games::footer(snap.over, snap.paused, "Press SPACE to play again, Esc for menu", controls);
        frame.render_widget(help, help_area);
    }

    fn reset(&mut self) {
        self.engine.reset();
        self.timer.cancel();
        self.lines = 0;
    }

    fn get_score(&self) -> u32 {
        self.engine.score()
    }

    fn get_high_score(&self) -> u32 {
        self.engine.high_score()
    }

    fn is_game_over(&self) -> bool {
        self.engine.phase().is_over()
    }

    fn suspend(&mut self) {
        self.timer.cancel();
    }
}
