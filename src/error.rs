use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board size must be at least 1")]
    InvalidSize,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Too many mines for the available cells")]
    TooManyMines,
}

pub type Result<T> = core::result::Result<T, GameError>;
