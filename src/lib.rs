pub mod engine;
pub mod error;
pub mod timer;

pub use error::{AppError, GameError, Result};
