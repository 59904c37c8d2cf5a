//! Move selection
//!
//! [`Agent`] is the single entry point a game driver needs: given the current
//! board, return the column to play.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info};

use std::sync::Mutex;
use std::time::Instant;

use crate::{
    board::{Board, Player},
    config::AgentConfig,
    evaluator::Score,
    search::Search,
    AgentError, Result, CONNECT, HEIGHT, WIDTH,
};

/// A move-selection strategy
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;

    /// Picks a 0-indexed column to play on `board`
    ///
    /// Fails with [`AgentError::NoLegalMoves`] if the game is already over.
    fn choose_move(&self, board: &Board) -> Result<usize>;
}

/// The outcome of a root search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
    pub best_move: usize,
    pub best_score: Score,
    /// Search score of every legal move, in column order
    pub scores: Vec<(usize, Score)>,
    pub depth: u32,
    pub node_count: usize,
}

/// Minimax agent scoring leaves with the window heuristic
#[derive(Clone, Debug)]
pub struct HeuristicAgent {
    player: Player,
    config: AgentConfig,
    name: String,
}

impl HeuristicAgent {
    /// Creates an agent playing `player` with the default depth policy
    pub fn new(player: Player) -> Self {
        Self::with_config(player, AgentConfig::default())
    }

    pub fn with_config(player: Player, config: AgentConfig) -> Self {
        Self {
            player,
            config,
            name: format!("Heuristic ({})", player),
        }
    }

    /// Creates an agent for a host game, checking its geometry
    ///
    /// The evaluator only knows the standard board, so anything but
    /// `HEIGHT` x `WIDTH` with `CONNECT` in a row is rejected.
    pub fn for_game(player: Player, rows: usize, columns: usize, connect: usize) -> Result<Self> {
        if (rows, columns, connect) != (HEIGHT, WIDTH, CONNECT) {
            return Err(AgentError::DimensionMismatch {
                rows,
                columns,
                connect,
            });
        }
        Ok(Self::new(player))
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Scores every legal move and picks the best one
    ///
    /// Each root move is searched independently, so they are scored in
    /// parallel. The pick walks the results in column order and only replaces
    /// the current best on a strictly greater score.
    pub fn analyse(&self, board: &Board) -> Result<Analysis> {
        let start = Instant::now();

        let plies = board.ply_count();
        let depth = self.config.depth_for(plies);

        let moves: Vec<usize> = board.legal_moves().collect();
        if moves.is_empty() {
            return Err(AgentError::NoLegalMoves);
        }

        let results: Vec<(usize, Score, usize)> = moves
            .par_iter()
            .map(|&column| {
                let next = board.child(self.player, column);
                let mut search = Search::new(self.player);
                // the opponent replies to our move
                let score = search.search(&next, depth, false);
                (column, score, search.node_count)
            })
            .collect();

        let (mut best_move, mut best_score, _) = results[0];
        for &(column, score, nodes) in results.iter() {
            debug!(column, score, nodes, "scored root move");
            if score > best_score {
                best_score = score;
                best_move = column;
            }
        }
        let node_count = results.iter().map(|&(_, _, nodes)| nodes).sum();

        info!(
            player = %self.player,
            column = best_move,
            score = best_score,
            depth,
            plies,
            nodes = node_count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "chose move"
        );

        Ok(Analysis {
            best_move,
            best_score,
            scores: results
                .into_iter()
                .map(|(column, score, _)| (column, score))
                .collect(),
            depth,
            node_count,
        })
    }
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, board: &Board) -> Result<usize> {
        self.analyse(board).map(|analysis| analysis.best_move)
    }
}

/// Plays a uniformly random legal move
pub struct RandomAgent {
    name: String,
    rng: Mutex<StdRng>,
}

impl RandomAgent {
    pub fn new() -> Self {
        Self {
            name: "Random".to_string(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// A random agent with a reproducible move sequence
    pub fn seeded(seed: u64) -> Self {
        Self {
            name: format!("Random (seed {})", seed),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, board: &Board) -> Result<usize> {
        let moves: Vec<usize> = board.legal_moves().collect();
        let mut rng = match self.rng.lock() {
            Ok(rng) => rng,
            Err(poisoned) => poisoned.into_inner(),
        };
        moves
            .choose(&mut *rng)
            .copied()
            .ok_or(AgentError::NoLegalMoves)
    }
}
