use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Board must have at least one row and one column")]
    InvalidSize,
    #[error("Too many mines, at least one cell must stay safe")]
    TooManyMines,
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Mine layout does not match board size")]
    InvalidBoardShape,
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
}

pub type Result<T> = core::result::Result<T, GameError>;
