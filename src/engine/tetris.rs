use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

use crate::engine::{rng_from_seed, Phase, Score};
use crate::error::{GameError, Result};

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);
pub const POINTS_PER_LINE: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    Z,
    S,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::Z,
        ShapeKind::S,
    ];

    pub const fn color(self) -> Rgb {
        match self {
            ShapeKind::I => Rgb(0xFF, 0x00, 0x00),
            ShapeKind::O => Rgb(0x00, 0xFF, 0x00),
            ShapeKind::T => Rgb(0x00, 0x00, 0xFF),
            ShapeKind::L => Rgb(0xFF, 0xFF, 0x00),
            ShapeKind::J => Rgb(0xFF, 0x00, 0xFF),
            ShapeKind::Z => Rgb(0x00, 0xFF, 0xFF),
            ShapeKind::S => Rgb(0xFF, 0xA5, 0x00),
        }
    }

    pub fn shape(self) -> Shape {
        let rows: &[&[u8]] = match self {
            ShapeKind::I => &[&[1, 1, 1, 1]],
            ShapeKind::O => &[&[1, 1], &[1, 1]],
            ShapeKind::T => &[&[1, 1, 1], &[0, 1, 0]],
            ShapeKind::L => &[&[1, 1, 1], &[1, 0, 0]],
            ShapeKind::J => &[&[1, 1, 1], &[0, 0, 1]],
            ShapeKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
            ShapeKind::S => &[&[0, 1, 1], &[1, 1, 0]],
        };
        Shape {
            rows: rows
                .iter()
                .map(|row| row.iter().map(|&v| v != 0).collect())
                .collect(),
        }
    }
}

/// Binary occupancy matrix, rows top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    rows: Vec<Vec<bool>>,
}

impl Shape {
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }

    /// 90° clockwise: transpose, then reverse each new row.
    pub fn rotated(&self) -> Shape {
        let h = self.height();
        let rows = (0..self.width())
            .map(|col| (0..h).rev().map(|row| self.rows[row][col]).collect())
            .collect();
        Shape { rows }
    }

    /// Offsets of filled cells relative to the top-left anchor.
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &filled)| filled)
                .map(move |(x, _)| (x as i32, y as i32))
        })
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub position: Position,
}

impl Piece {
    /// Centered horizontally on the top row.
    fn spawn(kind: ShapeKind) -> Self {
        let shape = kind.shape();
        let x = (BOARD_WIDTH / 2) as i32 - (shape.width() / 2) as i32;
        Self {
            kind,
            shape,
            position: Position::new(x, 0),
        }
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    /// Absolute board coordinates of the piece's filled cells.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let Position { x, y } = self.position;
        self.shape.filled().map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// Locked cells, row 0 at the top.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    rows: Vec<[Option<Rgb>; BOARD_WIDTH]>,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            rows: vec![[None; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }
}

impl Board {
    pub fn rows(&self) -> &[[Option<Rgb>; BOARD_WIDTH]] {
        &self.rows
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.rows.get(y).and_then(|row| row.get(x).copied().flatten())
    }

    pub fn set_locked(&mut self, x: usize, y: usize, color: Rgb) -> Result<()> {
        match self.rows.get_mut(y).and_then(|row| row.get_mut(x)) {
            Some(cell) => {
                *cell = Some(color);
                Ok(())
            }
            None => Err(GameError::InvalidCoords { x, y }),
        }
    }

    pub fn locked_count(&self) -> usize {
        self.rows.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Inside the side walls, above the floor, and clear of locked cells.
    /// Rows above the board are only checked against the walls.
    pub fn fits(&self, shape: &Shape, position: Position) -> bool {
        shape.filled().all(|(dx, dy)| {
            let x = position.x + dx;
            let y = position.y + dy;
            if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
                return false;
            }
            y < 0 || self.rows[y as usize][x as usize].is_none()
        })
    }

    fn lock(&mut self, piece: &Piece) {
        let color = piece.color();
        for (x, y) in piece.cells() {
            if let Some(cell) = usize::try_from(y)
                .ok()
                .and_then(|y| self.rows.get_mut(y))
                .and_then(|row| usize::try_from(x).ok().and_then(|x| row.get_mut(x)))
            {
                *cell = Some(color);
            }
        }
    }

    /// Drop every full row and refill from the top. Returns rows removed.
    fn clear_lines(&mut self) -> u32 {
        let before = self.rows.len();
        self.rows.retain(|row| row.iter().any(Option::is_none));
        let cleared = before - self.rows.len();
        for _ in 0..cleared {
            self.rows.insert(0, [None; BOARD_WIDTH]);
        }
        cleared as u32
    }
}

/// Supplies the next shape to spawn.
pub trait ShapeSource {
    fn next_shape(&mut self) -> ShapeKind;
}

/// Uniform draw over the seven shapes.
#[derive(Debug)]
pub struct RandomShapes {
    rng: StdRng,
}

impl RandomShapes {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: rng_from_seed(seed),
        }
    }
}

impl ShapeSource for RandomShapes {
    fn next_shape(&mut self) -> ShapeKind {
        ShapeKind::ALL[self.rng.gen_range(0..ShapeKind::ALL.len())]
    }
}

/// Replays a fixed list of shapes in a loop.
#[derive(Clone, Debug)]
pub struct SequenceShapes {
    kinds: Vec<ShapeKind>,
    next: usize,
}

impl SequenceShapes {
    pub fn new(kinds: Vec<ShapeKind>) -> Result<Self> {
        if kinds.is_empty() {
            return Err(GameError::EmptyShapeSequence);
        }
        Ok(Self { kinds, next: 0 })
    }
}

impl ShapeSource for SequenceShapes {
    fn next_shape(&mut self) -> ShapeKind {
        let kind = self.kinds[self.next % self.kinds.len()];
        self.next = (self.next + 1) % self.kinds.len();
        kind
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Paused or over.
    Ignored,
    Moved,
    Blocked,
    Locked { lines_cleared: u32 },
}

#[derive(Clone, Copy, Debug)]
pub struct TetrisSnapshot<'a> {
    pub board: &'a Board,
    pub piece: &'a Piece,
    pub score: u32,
    pub high_score: u32,
    pub paused: bool,
    pub over: bool,
}

#[derive(Debug)]
pub struct Tetris<S: ShapeSource = RandomShapes> {
    board: Board,
    piece: Piece,
    phase: Phase,
    score: Score,
    source: S,
}

impl Tetris<RandomShapes> {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_source(RandomShapes::new(seed))
    }
}

impl<S: ShapeSource> Tetris<S> {
    pub fn with_source(source: S) -> Self {
        Self::with_board(Board::default(), source)
    }

    /// Start on a prepared board. The first piece may already be blocked,
    /// in which case the game starts over.
    pub fn with_board(board: Board, mut source: S) -> Self {
        let piece = Piece::spawn(source.next_shape());
        let mut game = Self {
            board,
            piece,
            phase: Phase::Active,
            score: Score::default(),
            source,
        };
        game.check_spawn();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score.current()
    }

    pub fn high_score(&self) -> u32 {
        self.score.high()
    }

    pub fn snapshot(&self) -> TetrisSnapshot<'_> {
        TetrisSnapshot {
            board: &self.board,
            piece: &self.piece,
            score: self.score.current(),
            high_score: self.score.high(),
            paused: self.phase.is_paused(),
            over: self.phase.is_over(),
        }
    }

    pub fn is_valid_move(&self, shape: &Shape, position: Position) -> bool {
        self.board.fits(shape, position)
    }

    /// Translate the piece. A blocked downward move locks it in place.
    pub fn move_piece(&mut self, dx: i32, dy: i32) -> MoveOutcome {
        if !self.phase.is_active() {
            return MoveOutcome::Ignored;
        }

        let target = self.piece.position.offset(dx, dy);
        if self.is_valid_move(&self.piece.shape, target) {
            self.piece.position = target;
            MoveOutcome::Moved
        } else if dy > 0 {
            MoveOutcome::Locked {
                lines_cleared: self.lock_piece(),
            }
        } else {
            MoveOutcome::Blocked
        }
    }

    /// Rotate clockwise in place; no wall kicks. Returns whether it applied.
    pub fn rotate(&mut self) -> bool {
        if !self.phase.is_active() {
            return false;
        }
        let rotated = self.piece.shape.rotated();
        if self.is_valid_move(&rotated, self.piece.position) {
            self.piece.shape = rotated;
            true
        } else {
            false
        }
    }

    pub fn tick(&mut self) -> MoveOutcome {
        self.move_piece(0, 1)
    }

    pub fn toggle_pause(&mut self) {
        self.phase.toggle_pause();
    }

    /// Empty board, zero score, fresh piece. The high score is kept.
    pub fn reset(&mut self) {
        self.board = Board::default();
        self.score.reset();
        self.phase = Phase::Active;
        self.piece = Piece::spawn(self.source.next_shape());
        self.check_spawn();
        log::info!("tetris: reset");
    }

    fn lock_piece(&mut self) -> u32 {
        self.board.lock(&self.piece);
        let cleared = self.board.clear_lines();
        if cleared > 0 {
            self.score.add(cleared * POINTS_PER_LINE);
            self.score.commit_high();
            log::debug!("tetris: cleared {} lines, score {}", cleared, self.score.current());
        }

        self.piece = Piece::spawn(self.source.next_shape());
        self.check_spawn();
        cleared
    }

    fn check_spawn(&mut self) {
        if !self.is_valid_move(&self.piece.shape, self.piece.position) {
            self.phase = Phase::Over;
            self.score.commit_high();
            log::info!(
                "tetris: {:?} blocked at spawn, final score {}",
                self.piece.kind,
                self.score.current()
            );
        }
    }
}
