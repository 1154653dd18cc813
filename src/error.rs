use std::io;

use thiserror::Error;

/// Misuse of an engine API. Rule violations (blocked moves, revealed cells,
/// collisions) are outcomes, not errors.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates ({x}, {y})")]
    InvalidCoords { x: usize, y: usize },
    #[error("Too many mines: {mines} requested but the board has {cells} cells")]
    TooManyMines { mines: usize, cells: usize },
    #[error("Shape sequence is empty")]
    EmptyShapeSequence,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("could not open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("could not install logger: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error(transparent)]
    Game(#[from] GameError),
}
