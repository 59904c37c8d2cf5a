//! A heuristic agent for playing the board game 'Connect 4'
//!
//! The agent scores positions with a fixed window-counting heuristic and
//! looks ahead with a depth-limited minimax search using alpha-beta pruning.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{agent::{Agent, HeuristicAgent}, board::{Board, Player}};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let agent = HeuristicAgent::new(Player::One);
//! let best_move = agent.choose_move(&Board::new())?;
//!
//! assert_eq!(best_move, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod evaluator;

pub mod search;

pub mod config;

pub mod agent;

pub mod arena;

pub mod display;

mod test;

pub use error::{AgentError, Result};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tiles needed to win
pub const CONNECT: usize = 4;

// the evaluator's window table is only laid out for a standard board
const_assert!(CONNECT <= WIDTH && CONNECT <= HEIGHT);
const_assert_eq!(WIDTH * HEIGHT, 42);
