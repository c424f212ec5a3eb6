//! Quiz error types.
//!
//! These are the recoverable failures a front end has to react to. Anything
//! that is only ever reported to the user (bad config path, unreadable
//! dataset file) stays an `anyhow::Error` at the edge instead.

use thiserror::Error;

use crate::model::{Side, TileRef};

/// Errors raised by the matching engine, session controller and history store.
#[derive(Debug, Error)]
pub enum QuizError {
    /// `start` was called with an empty (or all-whitespace) user name.
    #[error("Please enter your name to start!")]
    MissingUserName,

    /// The referenced tile position does not exist on the board.
    #[error("no {side} tile at position {position}")]
    UnknownTile { side: Side, position: usize },

    /// A quiz action was attempted outside the quiz screen.
    #[error("no quiz in progress")]
    NotPlaying,

    /// A tile was selected while the pause overlay is shown.
    #[error("quiz is paused, resume to continue")]
    Paused,

    /// The dataset cannot be played.
    #[error("invalid dataset: {0}")]
    Dataset(String),

    /// The key-value slot could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// History could not be encoded.
    #[error("failed to serialize history: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QuizError {
    pub(crate) fn unknown_tile(tile: TileRef) -> Self {
        QuizError::UnknownTile {
            side: tile.side,
            position: tile.position,
        }
    }

    /// Returns `true` if the error is about user input rather than the
    /// environment, i.e. the front end should prompt and carry on.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            QuizError::MissingUserName
                | QuizError::UnknownTile { .. }
                | QuizError::NotPlaying
                | QuizError::Paused
        )
    }
}

/// Result alias for quiz operations.
pub type Result<T> = std::result::Result<T, QuizError>;
