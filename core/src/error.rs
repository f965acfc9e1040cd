use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Tile size must be non-zero")]
    InvalidTileSize,
    #[error("No card with that id")]
    InvalidCard,
    #[error("Too many cards for one board")]
    TooManyCards,
    #[error("Unknown direction")]
    UnknownDirection,
}

pub type Result<T> = core::result::Result<T, GameError>;
