use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use calmcade::engine::minesweeper::MinesweeperConfig;

use crate::config::{Config, StartGame};
use crate::games::minesweeper::MinesweeperGame;
use crate::games::snake::SnakeGame;
use crate::games::tetris::TetrisGame;
use crate::games::Game;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    Home,
    Minesweeper,
    Snake,
    Tetris,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Home, Tab::Minesweeper, Tab::Snake, Tab::Tetris]
    }

    /// The game tabs in home-screen order.
    pub fn games() -> &'static [Tab] {
        &Self::all()[1..]
    }

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => " Home ",
            Tab::Minesweeper => " Minesweeper ",
            Tab::Snake => " Snake ",
            Tab::Tetris => " Tetris ",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::Minesweeper => 1,
            Tab::Snake => 2,
            Tab::Tetris => 3,
        }
    }
}

impl From<StartGame> for Tab {
    fn from(game: StartGame) -> Self {
        match game {
            StartGame::Minesweeper => Tab::Minesweeper,
            StartGame::Snake => Tab::Snake,
            StartGame::Tetris => Tab::Tetris,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    pub current_tab: Tab,
    /// Highlighted tile on the home screen, an index into `Tab::games()`.
    pub selected_game: usize,
    pub minesweeper: MinesweeperGame,
    pub snake: SnakeGame,
    pub tetris: TetrisGame,
}

impl App {
    pub fn new(config: &Config) -> calmcade::Result<Self> {
        let minesweeper = MinesweeperConfig {
            win_on_clear: config.minesweeper_win,
            ..MinesweeperConfig::default()
        };
        let current_tab = config.start.map(Tab::from).unwrap_or(Tab::Home);
        log::info!("starting on {} (seed {:?})", current_tab.title().trim(), config.seed);

        Ok(Self {
            should_quit: false,
            current_tab,
            selected_game: 0,
            minesweeper: MinesweeperGame::new(minesweeper, config.seed)?,
            snake: SnakeGame::new(config.seed),
            tetris: TetrisGame::new(config.seed),
        })
    }

    pub fn game_mut(&mut self, tab: Tab) -> Option<&mut dyn Game> {
        match tab {
            Tab::Home => None,
            Tab::Minesweeper => Some(&mut self.minesweeper),
            Tab::Snake => Some(&mut self.snake),
            Tab::Tetris => Some(&mut self.tetris),
        }
    }

    pub fn game(&self, tab: Tab) -> Option<&dyn Game> {
        match tab {
            Tab::Home => None,
            Tab::Minesweeper => Some(&self.minesweeper),
            Tab::Snake => Some(&self.snake),
            Tab::Tetris => Some(&self.tetris),
        }
    }

    pub fn on_tick(&mut self) {
        let now = Instant::now();
        if let Some(game) = self.game_mut(self.current_tab) {
            game.update(now);
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') if self.current_tab == Tab::Home => {
                self.should_quit = true;
                return;
            }
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.prev_tab();
                } else {
                    self.next_tab();
                }
                return;
            }
            KeyCode::BackTab => {
                self.prev_tab();
                return;
            }
            KeyCode::Esc if self.current_tab != Tab::Home => {
                self.switch_to(Tab::Home);
                return;
            }
            _ => {}
        }

        if self.current_tab == Tab::Home {
            self.on_home_key(key);
            return;
        }

        if let Some(game) = self.game_mut(self.current_tab) {
            game.handle_input(key);
        }
    }

    pub fn on_mouse(&mut self, mouse: MouseEvent) {
        if let Some(game) = self.game_mut(self.current_tab) {
            game.handle_mouse(mouse);
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) {
        let games = Tab::games();
        match key.code {
            KeyCode::Char(c @ '1'..='3') => {
                let idx = (c as u8 - b'1') as usize;
                self.selected_game = idx;
                self.switch_to(games[idx]);
            }
            KeyCode::Right | KeyCode::Down => {
                self.selected_game = (self.selected_game + 1) % games.len();
            }
            KeyCode::Left | KeyCode::Up => {
                self.selected_game = (self.selected_game + games.len() - 1) % games.len();
            }
            KeyCode::Enter => {
                if let Some(&tab) = games.get(self.selected_game) {
                    self.switch_to(tab);
                }
            }
            _ => {}
        }
    }

    /// Change tab, stopping the timer of the game being left.
    fn switch_to(&mut self, tab: Tab) {
        if tab == self.current_tab {
            return;
        }
        if let Some(game) = self.game_mut(self.current_tab) {
            game.suspend();
        }
        log::debug!("tab {} -> {}", self.current_tab.title().trim(), tab.title().trim());
        self.current_tab = tab;
    }

    fn next_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_to(tabs[(idx + 1) % tabs.len()]);
    }

    fn prev_tab(&mut self) {
        let tabs = Tab::all();
        let idx = self.current_tab.index();
        self.switch_to(tabs[(idx + tabs.len() - 1) % tabs.len()]);
    }
}
