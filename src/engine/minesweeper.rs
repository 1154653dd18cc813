use rand::rngs::StdRng;
use rand::Rng;

use crate::engine::{rng_from_seed, Score};
use crate::error::{GameError, Result};

pub const BOARD_SIZE: usize = 10;
pub const MINES_COUNT: usize = 15;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub is_mine: bool,
    pub is_revealed: bool,
    pub is_flagged: bool,
    pub neighbor_mines: u8,
}

/// Row-major grid of cells. Neighbour counts are fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Place `mines` mines at distinct random cells, then count neighbours.
    pub fn generate<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        mines: usize,
        rng: &mut R,
    ) -> Result<Self> {
        let total = width * height;
        if mines > total {
            return Err(GameError::TooManyMines { mines, cells: total });
        }

        let mut board = Self::empty(width, height);
        let mut placed = 0;
        while placed < mines {
            let x = rng.gen_range(0..width);
            let y = rng.gen_range(0..height);
            let idx = board.index(x, y);
            if !board.cells[idx].is_mine {
                board.cells[idx].is_mine = true;
                placed += 1;
            }
        }
        board.count_neighbors();
        Ok(board)
    }

    /// Build a board with mines at exactly the given coordinates.
    pub fn from_mines(width: usize, height: usize, mines: &[(usize, usize)]) -> Result<Self> {
        let mut board = Self::empty(width, height);
        for &(x, y) in mines {
            board.check_coords(x, y)?;
            let idx = board.index(x, y);
            board.cells[idx].is_mine = true;
        }
        board.count_neighbors();
        Ok(board)
    }

    fn empty(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    fn count_neighbors(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.index(x, y);
                if self.cells[idx].is_mine {
                    continue;
                }
                let count = self
                    .neighbors(x, y)
                    .filter(|&(nx, ny)| self.cells[self.index(nx, ny)].is_mine)
                    .count();
                self.cells[idx].neighbor_mines = count as u8;
            }
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(self.index(x, y))
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn mine_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_mine).count()
    }

    pub fn revealed_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_revealed).count()
    }

    pub fn safe_cell_count(&self) -> usize {
        self.cells.len() - self.mine_count()
    }

    /// In-bounds coordinates of the up to 8 cells around (x, y).
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        let (w, h) = (self.width as isize, self.height as isize);
        let (x, y) = (x as isize, y as isize);
        (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&(dx, dy)| dx != 0 || dy != 0)
            .map(move |(dx, dy)| (x + dx, y + dy))
            .filter(move |&(nx, ny)| nx >= 0 && ny >= 0 && nx < w && ny < h)
            .map(|(nx, ny)| (nx as usize, ny as usize))
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn check_coords(&self, x: usize, y: usize) -> Result<()> {
        if x < self.width && y < self.height {
            Ok(())
        } else {
            Err(GameError::InvalidCoords { x, y })
        }
    }

    /// Reveal from (x, y), expanding through zero-count cells.
    /// Returns how many cells were newly revealed.
    fn flood_reveal(&mut self, x: usize, y: usize) -> u32 {
        let mut revealed = 0;
        let mut worklist = vec![(x, y)];

        while let Some((cx, cy)) = worklist.pop() {
            let idx = self.index(cx, cy);
            let cell = &mut self.cells[idx];
            if cell.is_mine || cell.is_flagged || cell.is_revealed {
                continue;
            }
            cell.is_revealed = true;
            revealed += 1;

            if cell.neighbor_mines == 0 {
                worklist.extend(self.neighbors(cx, cy));
            }
        }
        revealed
    }

    /// Hide every cell and drop all flags, keeping the mine layout.
    fn cover(&mut self) {
        for cell in &mut self.cells {
            cell.is_revealed = false;
            cell.is_flagged = false;
        }
    }

    fn reveal_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|c| c.is_mine) {
            cell.is_revealed = true;
            cell.is_flagged = false;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoardState {
    #[default]
    Active,
    Paused,
    Lost,
    Won,
}

impl BoardState {
    pub const fn is_over(self) -> bool {
        matches!(self, BoardState::Lost | BoardState::Won)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed(u32),
    HitMine,
    Won,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoChange,
    Flagged,
    Unflagged,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinesweeperConfig {
    pub width: usize,
    pub height: usize,
    pub mines: usize,
    /// End the game as won once every safe cell is revealed.
    pub win_on_clear: bool,
}

impl Default for MinesweeperConfig {
    fn default() -> Self {
        Self {
            width: BOARD_SIZE,
            height: BOARD_SIZE,
            mines: MINES_COUNT,
            win_on_clear: false,
        }
    }
}

/// Borrowed view for rendering.
#[derive(Clone, Copy, Debug)]
pub struct MinesweeperSnapshot<'a> {
    pub board: &'a Board,
    pub state: BoardState,
    pub score: u32,
    pub high_score: u32,
    pub flags_placed: i32,
    pub mines_remaining: i32,
}

#[derive(Debug)]
pub struct Minesweeper {
    board: Board,
    state: BoardState,
    score: Score,
    flags_placed: i32,
    config: MinesweeperConfig,
    rng: StdRng,
}

impl Minesweeper {
    pub fn new(config: MinesweeperConfig, seed: Option<u64>) -> Result<Self> {
        let mut rng = rng_from_seed(seed);
        let board = Board::generate(config.width, config.height, config.mines, &mut rng)?;
        log::info!(
            "minesweeper: new {}x{} board with {} mines",
            config.width,
            config.height,
            config.mines
        );
        Ok(Self::assemble(board, config, rng))
    }

    /// Start from a prepared board. `new_game` still generates random boards
    /// sized from `config`.
    pub fn from_board(board: Board, config: MinesweeperConfig) -> Self {
        Self::assemble(board, config, rng_from_seed(None))
    }

    fn assemble(board: Board, config: MinesweeperConfig, rng: StdRng) -> Self {
        Self {
            board,
            state: BoardState::Active,
            score: Score::default(),
            flags_placed: 0,
            config,
            rng,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score.current()
    }

    pub fn high_score(&self) -> u32 {
        self.score.high()
    }

    pub fn flags_placed(&self) -> i32 {
        self.flags_placed
    }

    pub fn mines_remaining(&self) -> i32 {
        self.board.mine_count() as i32 - self.flags_placed
    }

    pub fn snapshot(&self) -> MinesweeperSnapshot<'_> {
        MinesweeperSnapshot {
            board: &self.board,
            state: self.state,
            score: self.score.current(),
            high_score: self.score.high(),
            flags_placed: self.flags_placed,
            mines_remaining: self.mines_remaining(),
        }
    }

    pub fn reveal(&mut self, x: usize, y: usize) -> Result<RevealOutcome> {
        self.board.check_coords(x, y)?;
        if self.state != BoardState::Active {
            return Ok(RevealOutcome::NoChange);
        }

        let cell = self.board.cells[self.board.index(x, y)];
        if cell.is_revealed || cell.is_flagged {
            return Ok(RevealOutcome::NoChange);
        }

        if cell.is_mine {
            self.board.reveal_mines();
            self.state = BoardState::Lost;
            self.score.commit_high();
            log::info!(
                "minesweeper: hit mine at ({}, {}), final score {}",
                x,
                y,
                self.score.current()
            );
            return Ok(RevealOutcome::HitMine);
        }

        let revealed = self.board.flood_reveal(x, y);
        self.score.add(revealed);
        log::debug!("minesweeper: reveal ({}, {}) opened {} cells", x, y, revealed);

        if self.config.win_on_clear && self.board.revealed_count() == self.board.safe_cell_count() {
            self.state = BoardState::Won;
            self.score.commit_high();
            log::info!("minesweeper: board cleared, score {}", self.score.current());
            return Ok(RevealOutcome::Won);
        }
        Ok(RevealOutcome::Revealed(revealed))
    }

    pub fn toggle_flag(&mut self, x: usize, y: usize) -> Result<FlagOutcome> {
        self.board.check_coords(x, y)?;
        if self.state != BoardState::Active {
            return Ok(FlagOutcome::NoChange);
        }

        let idx = self.board.index(x, y);
        let cell = &mut self.board.cells[idx];
        if cell.is_revealed {
            return Ok(FlagOutcome::NoChange);
        }

        cell.is_flagged = !cell.is_flagged;
        Ok(if cell.is_flagged {
            self.flags_placed += 1;
            FlagOutcome::Flagged
        } else {
            self.flags_placed -= 1;
            FlagOutcome::Unflagged
        })
    }

    /// Active <-> Paused. Ignored once the game is over.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            BoardState::Active => BoardState::Paused,
            BoardState::Paused => BoardState::Active,
            over => over,
        };
    }

    /// Regenerate the board and zero the score and flags.
    pub fn new_game(&mut self) {
        let config = self.config;
        match Board::generate(config.width, config.height, config.mines, &mut self.rng) {
            Ok(board) => self.board = board,
            Err(err) => {
                log::warn!("minesweeper: keeping current layout, regeneration failed: {}", err);
                self.board.cover();
            }
        }
        self.state = BoardState::Active;
        self.score.reset();
        self.flags_placed = 0;
        log::info!("minesweeper: new game");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn game_with_mines(mines: &[(usize, usize)]) -> Minesweeper {
        let board = Board::from_mines(BOARD_SIZE, BOARD_SIZE, mines).unwrap();
        Minesweeper::from_board(board, MinesweeperConfig::default())
    }

    #[test]
    fn generated_board_has_exact_mine_count_and_counts() {
        let mut rng = StdRng::seed_from_u64(42);
        let board = Board::generate(BOARD_SIZE, BOARD_SIZE, MINES_COUNT, &mut rng).unwrap();
        assert_eq!(board.mine_count(), MINES_COUNT);

        for y in 0..board.height() {
            for x in 0..board.width() {
                let cell = board.cell(x, y).unwrap();
                if cell.is_mine {
                    continue;
                }
                let expected = board
                    .neighbors(x, y)
                    .filter(|&(nx, ny)| board.cell(nx, ny).unwrap().is_mine)
                    .count();
                assert_eq!(cell.neighbor_mines as usize, expected, "at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn too_many_mines_is_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = Board::generate(2, 2, 5, &mut rng).unwrap_err();
        assert_eq!(err, GameError::TooManyMines { mines: 5, cells: 4 });
    }

    #[test]
    fn corner_cells_have_three_neighbors() {
        let board = Board::from_mines(3, 3, &[]).unwrap();
        assert_eq!(board.neighbors(0, 0).count(), 3);
        assert_eq!(board.neighbors(1, 1).count(), 8);
        assert_eq!(board.neighbors(2, 1).count(), 5);
    }

    #[test]
    fn single_mine_reveal_opens_whole_board() {
        let mut game = game_with_mines(&[(0, 0)]);

        let outcome = game.reveal(9, 9).unwrap();

        assert_eq!(outcome, RevealOutcome::Revealed(99));
        assert_eq!(game.score(), 99);
        assert!(!game.board().cell(0, 0).unwrap().is_revealed);
        assert_eq!(game.board().cell(1, 1).unwrap().neighbor_mines, 1);
        assert_eq!(game.board().revealed_count(), 99);
        assert_eq!(game.state(), BoardState::Active);
    }

    #[test]
    fn numbered_cell_reveals_only_itself() {
        let mut game = game_with_mines(&[(0, 0)]);

        assert_eq!(game.reveal(1, 0).unwrap(), RevealOutcome::Revealed(1));
        assert_eq!(game.board().revealed_count(), 1);
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn cascade_stops_at_flags_and_numbered_border() {
        // A wall of mines down column 5 splits the board.
        let wall: Vec<_> = (0..BOARD_SIZE).map(|y| (5, y)).collect();
        let mut game = game_with_mines(&wall);
        game.toggle_flag(0, 9).unwrap();

        game.reveal(0, 0).unwrap();

        let board = game.board();
        for y in 0..BOARD_SIZE {
            for x in 0..5 {
                let cell = board.cell(x, y).unwrap();
                if (x, y) == (0, 9) {
                    assert!(!cell.is_revealed && cell.is_flagged);
                } else {
                    assert!(cell.is_revealed, "({}, {}) should be open", x, y);
                }
            }
            for x in 5..BOARD_SIZE {
                assert!(!board.cell(x, y).unwrap().is_revealed);
            }
        }
        assert_eq!(game.score(), 49);
    }

    #[test]
    fn hitting_a_mine_reveals_all_mines_and_ends_game() {
        let mut game = game_with_mines(&[(0, 0), (4, 4), (9, 0)]);
        game.toggle_flag(4, 4).unwrap();
        game.reveal(9, 9).unwrap();
        let score = game.score();

        assert_eq!(game.reveal(0, 0).unwrap(), RevealOutcome::HitMine);
        assert_eq!(game.state(), BoardState::Lost);
        for &(x, y) in &[(0, 0), (4, 4), (9, 0)] {
            let cell = game.board().cell(x, y).unwrap();
            assert!(cell.is_revealed && !cell.is_flagged);
        }
        assert_eq!(game.high_score(), score);

        // Over: further actions are ignored.
        assert_eq!(game.reveal(5, 5).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.toggle_flag(5, 0).unwrap(), FlagOutcome::NoChange);
    }

    #[test]
    fn flagging_a_revealed_cell_is_a_no_op() {
        let mut game = game_with_mines(&[(0, 0)]);
        game.reveal(1, 0).unwrap();

        assert_eq!(game.toggle_flag(1, 0).unwrap(), FlagOutcome::NoChange);
        assert_eq!(game.flags_placed(), 0);
        assert!(!game.board().cell(1, 0).unwrap().is_flagged);
    }

    #[test]
    fn toggling_flag_twice_is_idempotent() {
        let mut game = game_with_mines(&[(0, 0)]);
        let before = *game.board().cell(3, 3).unwrap();

        assert_eq!(game.toggle_flag(3, 3).unwrap(), FlagOutcome::Flagged);
        assert_eq!(game.mines_remaining(), 0);
        assert_eq!(game.toggle_flag(3, 3).unwrap(), FlagOutcome::Unflagged);

        assert_eq!(*game.board().cell(3, 3).unwrap(), before);
        assert_eq!(game.flags_placed(), 0);
    }

    #[test]
    fn flagged_cell_cannot_be_revealed() {
        let mut game = game_with_mines(&[(0, 0)]);
        game.toggle_flag(0, 0).unwrap();
        assert_eq!(game.reveal(0, 0).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.state(), BoardState::Active);
    }

    #[test]
    fn paused_game_ignores_actions() {
        let mut game = game_with_mines(&[(0, 0)]);
        game.toggle_pause();
        assert_eq!(game.state(), BoardState::Paused);

        assert_eq!(game.reveal(5, 5).unwrap(), RevealOutcome::NoChange);
        assert_eq!(game.toggle_flag(5, 5).unwrap(), FlagOutcome::NoChange);

        game.toggle_pause();
        assert!(matches!(game.reveal(5, 5).unwrap(), RevealOutcome::Revealed(_)));
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut game = game_with_mines(&[]);
        assert_eq!(
            game.reveal(10, 0).unwrap_err(),
            GameError::InvalidCoords { x: 10, y: 0 }
        );
        assert!(game.toggle_flag(0, 10).is_err());
    }

    #[test]
    fn win_on_clear_is_opt_in() {
        let board = Board::from_mines(BOARD_SIZE, BOARD_SIZE, &[(0, 0)]).unwrap();
        let mut game = Minesweeper::from_board(
            board,
            MinesweeperConfig {
                win_on_clear: true,
                ..MinesweeperConfig::default()
            },
        );

        assert_eq!(game.reveal(9, 9).unwrap(), RevealOutcome::Won);
        assert_eq!(game.state(), BoardState::Won);
        assert_eq!(game.high_score(), 99);
    }

    #[test]
    fn new_game_resets_score_and_flags_but_keeps_high_score() {
        let mut game = Minesweeper::new(MinesweeperConfig::default(), Some(7)).unwrap();
        let (mx, my) = (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| (x, y)))
            .find(|&(x, y)| game.board().cell(x, y).unwrap().is_mine)
            .unwrap();
        let (sx, sy) = (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| (x, y)))
            .find(|&(x, y)| {
                let c = game.board().cell(x, y).unwrap();
                !c.is_mine && c.neighbor_mines > 0
            })
            .unwrap();

        game.reveal(sx, sy).unwrap();
        game.toggle_flag(mx, my).unwrap();
        let (fx, fy) = (0..BOARD_SIZE)
            .flat_map(|y| (0..BOARD_SIZE).map(move |x| (x, y)))
            .find(|&(x, y)| !game.board().cell(x, y).unwrap().is_revealed && (x, y) != (mx, my))
            .unwrap();
        game.toggle_flag(fx, fy).unwrap();
        assert_eq!(game.flags_placed(), 2);
        assert_eq!(game.toggle_flag(mx, my).unwrap(), FlagOutcome::Unflagged);
        assert_eq!(game.reveal(mx, my).unwrap(), RevealOutcome::HitMine);
        assert_eq!(game.high_score(), 1);

        game.new_game();

        assert_eq!(game.state(), BoardState::Active);
        assert_eq!(game.score(), 0);
        assert_eq!(game.flags_placed(), 0);
        assert_eq!(game.high_score(), 1);
        assert_eq!(game.board().revealed_count(), 0);
        assert_eq!(game.board().mine_count(), MINES_COUNT);
    }
}
