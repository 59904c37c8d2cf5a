//! Error types for the agent and its board
//!
//! Search and evaluation themselves cannot fail; every error here comes from
//! the boundary: building or modifying a board, asking for a move on a
//! finished game, or handing the agent a board it was not built for.

use thiserror::Error;

use crate::{CONNECT, HEIGHT, WIDTH};

/// Errors surfaced to the host driving the agent
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// A move was requested but the board has no legal moves
    #[error("No legal moves available, the game is already over")]
    NoLegalMoves,

    /// The host's board does not match the fixed geometry of the evaluator
    #[error(
        "Unsupported board: {rows}x{columns} connect {connect} (expected {}x{} connect {})",
        HEIGHT,
        WIDTH,
        CONNECT
    )]
    DimensionMismatch {
        rows: usize,
        columns: usize,
        connect: usize,
    },

    /// Column index outside the board (0-indexed)
    #[error("Invalid move, column {column} out of range. Columns must be between 0 and {}", WIDTH - 1)]
    ColumnOutOfRange { column: usize },

    /// Column has no free cell left
    #[error("Invalid move, column {column} full")]
    ColumnFull { column: usize },

    /// Move attempted on a position that is already won or drawn
    #[error("Invalid move, game is over")]
    GameOver,

    /// Unknown character in a board diagram
    #[error("could not parse '{ch}' as a board cell")]
    InvalidCell { ch: char },

    /// Unknown character in a move sequence
    #[error("could not parse '{ch}' as a valid move")]
    InvalidMoveChar { ch: char },

    /// A token sits above an empty cell
    #[error("Invalid position, token at row {row} column {column} is not supported")]
    FloatingToken { row: usize, column: usize },

    /// Unreadable or malformed configuration file
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for agent and board operations
pub type Result<T> = std::result::Result<T, AgentError>;
