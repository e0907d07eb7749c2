use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board height and width must both be at least 1")]
    InvalidDimensions,
    #[error("Too many mines, at least one cell must stay free")]
    TooManyMines,
    #[error("Cell index out of range")]
    InvalidIndex,
    #[error("Mine layout does not match the board")]
    InvalidLayout,
}

pub type Result<T> = core::result::Result<T, GameError>;
