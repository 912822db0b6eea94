use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(ConfigProblem),
    #[error("Invalid coordinates")]
    InvalidCoords,
}

/// What made a configuration unusable.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    #[error("board must have at least one row and one column")]
    EmptyBoard,
    #[error("{mines} mines do not leave a safe cell on a board of {cells} cells")]
    TooManyMines { mines: u16, cells: u16 },
    #[error("mine layout shape does not match the board")]
    LayoutShape,
    #[error("mine layout holds {actual} mines, expected {expected}")]
    LayoutMineCount { actual: u16, expected: u16 },
    #[error("unknown difficulty preset")]
    UnknownDifficulty,
}

impl From<ConfigProblem> for GameError {
    fn from(problem: ConfigProblem) -> Self {
        Self::InvalidConfiguration(problem)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
