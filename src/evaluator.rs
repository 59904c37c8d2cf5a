//! Static evaluation of a position
//!
//! Every run of four cells (a "window") along a row, a column or a diagonal
//! is scored from the number of agent tokens, opponent tokens and empty cells
//! it holds. Columns near the middle add a small bonus for whichever side
//! controls them.

use static_assertions::*;

use crate::{
    board::{Board, Player},
    CONNECT, HEIGHT, WIDTH,
};

/// Position score, positive values favour the agent
pub type Score = i32;

/// Four agent tokens in a window
pub const AGENT_FOUR: Score = 50_000;
/// Four opponent tokens in a window
pub const OPPONENT_FOUR: Score = -80_000;
/// Three agent tokens and an empty cell
pub const AGENT_THREE: Score = 5_000;
/// Three opponent tokens and an empty cell
pub const OPPONENT_THREE: Score = -8_000;
/// Two agent tokens and two empty cells
pub const AGENT_TWO: Score = 500;
/// Two opponent tokens and two empty cells
pub const OPPONENT_TWO: Score = -800;

/// Multiplier of the per-column center weight
pub const CENTER_FACTOR: Score = 3;

/// The number of distinct windows on the board
pub const NUM_WINDOWS: usize = HEIGHT * (WIDTH - CONNECT + 1)
    + WIDTH * (HEIGHT - CONNECT + 1)
    + 2 * (WIDTH - CONNECT + 1) * (HEIGHT - CONNECT + 1);

const_assert_eq!(NUM_WINDOWS, 69);

// (row step, column step): horizontal, vertical, diagonal /, diagonal \
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Cell indexes (column + WIDTH * row) of every window on the board
pub const WINDOWS: [[usize; CONNECT]; NUM_WINDOWS] = windows();

const fn windows() -> [[usize; CONNECT]; NUM_WINDOWS] {
    let mut windows = [[0; CONNECT]; NUM_WINDOWS];
    let mut n = 0;
    let mut d = 0;
    while d < DIRECTIONS.len() {
        let (d_row, d_column) = DIRECTIONS[d];
        let mut row = 0;
        while row < HEIGHT {
            let mut column = 0;
            while column < WIDTH {
                let end_row = row as isize + d_row * (CONNECT as isize - 1);
                let end_column = column as isize + d_column * (CONNECT as isize - 1);
                if end_row >= 0
                    && end_row < HEIGHT as isize
                    && end_column >= 0
                    && end_column < WIDTH as isize
                {
                    let mut i = 0;
                    while i < CONNECT {
                        let r = (row as isize + d_row * i as isize) as usize;
                        let c = (column as isize + d_column * i as isize) as usize;
                        windows[n][i] = c + WIDTH * r;
                        i += 1;
                    }
                    n += 1;
                }
                column += 1;
            }
            row += 1;
        }
        d += 1;
    }
    windows
}

/// Scores a board for `agent`
///
/// Pure function of the board contents: the sum of every window's score plus
/// the center-column bonus.
pub fn evaluate(board: &Board, agent: Player) -> Score {
    let agent_cell = agent.cell();
    let opponent_cell = agent.opponent().cell();

    let windows: Score = WINDOWS
        .iter()
        .map(|window| {
            let mut agent_count = 0;
            let mut opponent_count = 0;
            for &idx in window.iter() {
                let cell = board.cell(idx / WIDTH, idx % WIDTH);
                if cell == agent_cell {
                    agent_count += 1;
                } else if cell == opponent_cell {
                    opponent_count += 1;
                }
            }
            evaluate_window(
                agent_count,
                opponent_count,
                CONNECT - agent_count - opponent_count,
            )
        })
        .sum();

    windows + center_bonus(board, agent)
}

/// Scores a single window from its token counts
///
/// Windows holding tokens of both sides can never be completed and score 0.
pub fn evaluate_window(agent_count: usize, opponent_count: usize, empty_count: usize) -> Score {
    match (agent_count, opponent_count, empty_count) {
        (4, 0, 0) => AGENT_FOUR,
        (0, 4, 0) => OPPONENT_FOUR,
        (3, 0, 1) => AGENT_THREE,
        (0, 3, 1) => OPPONENT_THREE,
        (2, 0, 2) => AGENT_TWO,
        (0, 2, 2) => OPPONENT_TWO,
        _ => 0,
    }
}

/// The center weight of a column, highest in the middle and 0 at the edges
pub const fn column_weight(column: usize) -> Score {
    let center = (WIDTH / 2) as Score;
    (center - (column as Score - center).abs()) * CENTER_FACTOR
}

/// Center preference, counted once per column
///
/// A column adds its weight when the agent holds more of its tokens,
/// subtracts it when the opponent does.
pub fn center_bonus(board: &Board, agent: Player) -> Score {
    (0..WIDTH)
        .map(|column| {
            let balance: Score = (0..board.height(column))
                .map(|row| match board.cell(row, column).owner() {
                    Some(owner) if owner == agent => 1,
                    Some(_) => -1,
                    None => 0,
                })
                .sum();
            column_weight(column) * balance.signum()
        })
        .sum()
}
