use std::collections::VecDeque;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::Rng;

use crate::engine::{rng_from_seed, Phase, Score};

pub const GRID_SIZE: i32 = 20;
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

const INITIAL_SEGMENT: Segment = Segment { x: 10, y: 10 };
const INITIAL_DIRECTION: Direction = Direction::Right;
const INITIAL_FOOD: Segment = Segment { x: 15, y: 15 };

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Segment {
    pub x: i32,
    pub y: i32,
}

impl Segment {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.vector();
        Self::new(self.x + dx, self.y + dy)
    }

    fn in_bounds(self) -> bool {
        (0..GRID_SIZE).contains(&self.x) && (0..GRID_SIZE).contains(&self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const fn vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    fn same_axis(self, other: Direction) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    Body,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused or over; nothing moved.
    Idle,
    Moved,
    Ate,
    Crashed(Collision),
}

#[derive(Clone, Copy, Debug)]
pub struct SnakeSnapshot<'a> {
    pub body: &'a VecDeque<Segment>,
    pub food: Segment,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub paused: bool,
    pub over: bool,
}

#[derive(Debug)]
pub struct Snake {
    body: VecDeque<Segment>,
    /// Direction of the last executed move.
    direction: Direction,
    /// Direction the next tick will move in.
    pending: Direction,
    food: Segment,
    phase: Phase,
    score: Score,
    rng: StdRng,
}

impl Snake {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            body: VecDeque::from([INITIAL_SEGMENT]),
            direction: INITIAL_DIRECTION,
            pending: INITIAL_DIRECTION,
            food: INITIAL_FOOD,
            phase: Phase::Active,
            score: Score::default(),
            rng: rng_from_seed(seed),
        }
    }

    /// Start from an arbitrary body (head first) and food position.
    pub fn with_body(body: &[Segment], direction: Direction, food: Segment, seed: Option<u64>) -> Self {
        let mut snake = Self::new(seed);
        if !body.is_empty() {
            snake.body = body.iter().copied().collect();
        }
        snake.direction = direction;
        snake.pending = direction;
        snake.food = food;
        snake
    }

    pub fn body(&self) -> &VecDeque<Segment> {
        &self.body
    }

    pub fn head(&self) -> Segment {
        self.body.front().copied().unwrap_or(INITIAL_SEGMENT)
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn food(&self) -> Segment {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.pending
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

    pub fn snapshot(&self) -> SnakeSnapshot<'_> {
        SnakeSnapshot {
            body: &self.body,
            food: self.food,
            direction: self.pending,
            score: self.score.current(),
            high_score: self.score.high(),
            paused: self.phase.is_paused(),
            over: self.phase.is_over(),
        }
    }

    /// Queue a turn. Requests on the current movement axis are rejected,
    /// which also blocks reversing into the neck. Returns whether it was taken.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if !self.phase.is_active() || direction.same_axis(self.direction) {
            return false;
        }
        self.pending = direction;
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.phase.is_active() {
            return TickOutcome::Idle;
        }

        let direction = self.pending;
        let head = self.head().step(direction);

        let collision = if !head.in_bounds() {
            Some(Collision::Wall)
        } else if self.body.contains(&head) {
            Some(Collision::Body)
        } else {
            None
        };
        if let Some(collision) = collision {
            self.phase = Phase::Over;
            self.score.commit_high();
            log::info!(
                "snake: crashed into {:?} at ({}, {}) with score {}",
                collision,
                head.x,
                head.y,
                self.score.current()
            );
            return TickOutcome::Crashed(collision);
        }

        self.direction = direction;
        self.body.push_front(head);

        if head == self.food {
            // May land under the body; the food is not constrained to free cells.
            self.food = Segment::new(
                self.rng.gen_range(0..GRID_SIZE),
                self.rng.gen_range(0..GRID_SIZE),
            );
            self.score.add(1);
            self.score.commit_high();
            log::debug!("snake: ate, length {}, food now at ({}, {})", self.body.len(), self.food.x, self.food.y);
            TickOutcome::Ate
        } else {
            self.body.pop_back();
            TickOutcome::Moved
        }
    }

    pub fn toggle_pause(&mut self) {
        self.phase.toggle_pause();
    }

    /// Back to the starting snake. The high score is kept.
    pub fn reset(&mut self) {
        self.body = VecDeque::from([INITIAL_SEGMENT]);
        self.direction = INITIAL_DIRECTION;
        self.pending = INITIAL_DIRECTION;
        self.food = INITIAL_FOOD;
        self.phase = Phase::Active;
        self.score.reset();
        log::info!("snake: reset");
    }
}
