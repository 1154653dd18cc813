use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use calmcade::engine::snake::{self, Direction as Heading, Segment, Snake, TickOutcome, GRID_SIZE};
use calmcade::timer::TickTimer;

use crate::games::{self, Game};

const CELL_WIDTH: u16 = 2;

const GRASS: Color = Color::Rgb(28, 40, 30);
const HEAD: Color = Color::Rgb(120, 230, 120);
const BODY: Color = Color::Rgb(60, 170, 80);
const FOOD: Color = Color::Rgb(235, 70, 70);

pub struct SnakeGame {
    engine: Snake,
    timer: TickTimer,
}

impl SnakeGame {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            engine: Snake::new(seed),
            timer: TickTimer::new(snake::TICK_INTERVAL),
        }
    }

    fn steer(&mut self, heading: Heading) {
        if self.engine.set_direction(heading) {
            log::trace!("snake: turning {:?}", heading);
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

    fn render_field(&self) -> Vec<Line<'static>> {
        let snap = self.engine.snapshot();
        let size = GRID_SIZE as usize;
        let mut grid = vec![vec![("  ", Style::default().bg(GRASS)); size]; size];

        let Segment { x, y } = snap.food;
        grid[y as usize][x as usize] = ("● ", Style::default().fg(FOOD).bg(GRASS));

        for (i, seg) in snap.body.iter().enumerate() {
            let color = if i == 0 { HEAD } else { BODY };
            grid[seg.y as usize][seg.x as usize] = ("  ", Style::default().bg(color));
        }

        grid.into_iter()
            .map(|row| {
                Line::from(
                    row.into_iter()
                        .map(|(text, style)| Span::styled(text, style))
                        .collect::<Vec<_>>(),
                )
            })
            .collect()
    }
}

impl Game for SnakeGame {
    fn update(&mut self, now: Instant) {
        if !self.engine.phase().is_active() {
            return;
        }
        if self.timer.poll(now) {
            if let TickOutcome::Crashed(collision) = self.engine.tick() {
                log::debug!("snake: game over ({:?})", collision);
            }
        }
    }

    fn handle_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => self.steer(Heading::Up),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => self.steer(Heading::Down),
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => self.steer(Heading::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => self.steer(Heading::Right),
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => self.primary(),
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            _ => {}
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner = games::game_block(frame, area, " 🐍 Snake ", Color::Rgb(100, 220, 120));
        let (status_area, field_area, help_area) = games::split_game_area(inner);

        let snap = self.engine.snapshot();
        let status = games::status_line(
            "🐍",
            snap.score,
            snap.high_score,
            vec![Span::styled(
                format!("Length: {} ", snap.body.len()),
                Style::default().fg(Color::Green),
            )],
        );
        frame.render_widget(Paragraph::new(status), status_area);

        let size = GRID_SIZE as u16;
        let field = games::centered(field_area, size * CELL_WIDTH, size);
        frame.render_widget(Paragraph::new(self.render_field()), field);

        let mut controls = vec![Span::raw(" ")];
        controls.extend(games::help_key("←↑↓→/WASD", " Steer "));
        controls.push(games::separator());
        controls.extend(games::help_key("Space", " Pause "));
        controls.push(games::separator());
        controls.extend(games::help_key("R", " Restart "));
        controls.push(games::separator());
        controls.extend(games::help_key("Esc", " Menu"));
        let help = games::footer(snap.over, snap.paused, "Press SPACE to play again, Esc for menu", controls);
        frame.render_widget(help, help_area);
    }

    fn reset(&mut self) {
        self.engine.reset();
        self.timer.cancel();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn advances_once_per_interval() {
        let mut game = SnakeGame::new(Some(5));
        let start = Instant::now();
        game.update(start);
        assert_eq!(game.engine.head(), Segment::new(10, 10));

        game.update(start + Duration::from_millis(50));
        assert_eq!(game.engine.head(), Segment::new(10, 10));

        game.update(start + snake::TICK_INTERVAL);
        assert_eq!(game.engine.head(), Segment::new(11, 10));
    }

    #[test]
    fn suspend_stops_the_clock() {
        let mut game = SnakeGame::new(Some(5));
        let start = Instant::now();
        game.update(start);
        game.suspend();

        // Coming back after a long absence must not jump the snake.
        let back = start + Duration::from_secs(10);
        game.update(back);
        assert_eq!(game.engine.head(), Segment::new(10, 10));
        game.update(back + snake::TICK_INTERVAL);
        assert_eq!(game.engine.head(), Segment::new(11, 10));
    }

    #[test]
    fn paused_game_does_not_move() {
        let mut game = SnakeGame::new(Some(5));
        let start = Instant::now();
        game.update(start);
        game.handle_input(key(KeyCode::Char(' ')));
        game.update(start + Duration::from_secs(1));
        assert_eq!(game.engine.head(), Segment::new(10, 10));
        assert!(game.engine.phase().is_paused());
    }

    #[test]
    fn resume_waits_a_full_period() {
        let mut game = SnakeGame::new(Some(5));
        let start = Instant::now();
        game.update(start);

        game.handle_input(key(KeyCode::Char('p')));
        let resumed = start + Duration::from_secs(5);
        game.update(resumed);
        game.handle_input(key(KeyCode::Char('p')));

        game.update(resumed + Duration::from_millis(1));
        game.update(resumed + Duration::from_millis(99));
        assert_eq!(game.engine.head(), Segment::new(10, 10));

        game.update(resumed + Duration::from_millis(1) + snake::TICK_INTERVAL);
        assert_eq!(game.engine.head(), Segment::new(11, 10));
    }

    #[test]
    fn wasd_steers() {
        let mut game = SnakeGame::new(Some(5));
        game.handle_input(key(KeyCode::Char('s')));
        assert_eq!(game.engine.direction(), Heading::Down);
        game.handle_input(key(KeyCode::Char('a')));
        // Still moving right until the next tick, so left is the same axis.
        assert_eq!(game.engine.direction(), Heading::Down);
    }
}
