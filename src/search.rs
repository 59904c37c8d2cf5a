//! Depth-limited minimax search with alpha-beta pruning

use crate::{
    board::{Board, Player},
    evaluator::{evaluate, Score},
};

/// Lower bound of the search window at the start of a search
pub const MIN_BOUND: Score = Score::MIN;
/// Upper bound of the search window at the start of a search
pub const MAX_BOUND: Score = Score::MAX;

/// A minimax search on behalf of one side
///
/// # Notes
/// The agent is always the maximizing side. The search window is passed down
/// through the recursion and every call to [`Search::search`] opens a fresh
/// `(MIN_BOUND, MAX_BOUND)` window, so bounds found while scoring one move can
/// never leak into the scoring of another.
#[derive(Clone, Debug)]
pub struct Search {
    agent: Player,

    /// The number of nodes visited by this `Search` so far (for diagnostics only)
    pub node_count: usize,
}

impl Search {
    /// Creates a new `Search` maximizing for `agent`
    pub fn new(agent: Player) -> Self {
        Self {
            agent,
            node_count: 0,
        }
    }

    /// Best score reachable from `board` looking at most `depth` plies ahead
    ///
    /// `maximizing` tells whether the agent is the side to move.
    pub fn search(&mut self, board: &Board, depth: u32, maximizing: bool) -> Score {
        self.alpha_beta(board, depth, MIN_BOUND, MAX_BOUND, maximizing)
    }

    fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Score {
        self.node_count += 1;

        if depth == 0 || board.is_terminal() {
            return evaluate(board, self.agent);
        }

        if maximizing {
            let mut max_eval = MIN_BOUND;
            for column in board.legal_moves() {
                let next = board.child(self.agent, column);
                let eval = self.alpha_beta(&next, depth - 1, alpha, beta, false);
                max_eval = max_eval.max(eval);
                alpha = alpha.max(max_eval);
                // the minimizing side already has a better option elsewhere
                if beta <= alpha {
                    break;
                }
            }
            max_eval
        } else {
            let opponent = self.agent.opponent();
            let mut min_eval = MAX_BOUND;
            for column in board.legal_moves() {
                let next = board.child(opponent, column);
                let eval = self.alpha_beta(&next, depth - 1, alpha, beta, true);
                min_eval = min_eval.min(eval);
                beta = beta.min(min_eval);
                if beta <= alpha {
                    break;
                }
            }
            min_eval
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;

    #[test]
    fn depth_zero_is_static_evaluation() -> Result<()> {
        let board = Board::from_moves("4453")?;
        for &maximizing in [true, false].iter() {
            let mut search = Search::new(Player::One);
            assert_eq!(
                search.search(&board, 0, maximizing),
                evaluate(&board, Player::One)
            );
            assert_eq!(search.node_count, 1);
        }
        Ok(())
    }

    #[test]
    fn terminal_position_is_not_expanded() -> Result<()> {
        let board = Board::from_moves("1213141")?;
        assert!(board.is_terminal());

        let mut search = Search::new(Player::Two);
        let score = search.search(&board, 5, true);
        assert_eq!(score, evaluate(&board, Player::Two));
        assert_eq!(search.node_count, 1);
        Ok(())
    }
}
