use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Snapshot shape does not match declared size")]
    InvalidBoardShape,
    #[error("Mine probability must lie in [0, 1]")]
    InvalidProbability,
}

pub type Result<T> = core::result::Result<T, BoardError>;
