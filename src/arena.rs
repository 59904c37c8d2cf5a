//! Self-play between two agents

use tracing::debug;

use crate::{
    agent::Agent,
    board::{Board, Player},
    Result,
};

/// A finished game
#[derive(Clone, Debug)]
pub struct GameRecord {
    /// 0-indexed columns in the order they were played
    pub moves: Vec<usize>,
    pub board: Board,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Player> {
        self.board.winner()
    }

    /// The moves as a 1-indexed column string, as accepted by `Board::from_moves`
    pub fn move_string(&self) -> String {
        self.moves.iter().map(|column| (column + 1).to_string()).collect()
    }
}

/// Results of a series, `first` being the agent seated as player one
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub first_wins: usize,
    pub second_wins: usize,
    pub draws: usize,
}

impl Tally {
    pub fn games(&self) -> usize {
        self.first_wins + self.second_wins + self.draws
    }
}

/// Seats two agents against each other, `first` moving as player one
pub struct Arena<'a> {
    first: &'a dyn Agent,
    second: &'a dyn Agent,
}

impl<'a> Arena<'a> {
    pub fn new(first: &'a dyn Agent, second: &'a dyn Agent) -> Self {
        Self { first, second }
    }

    /// Plays one game from the empty board
    pub fn play_game(&self) -> Result<GameRecord> {
        let mut board = Board::new();
        let mut moves = Vec::new();

        while !board.is_terminal() {
            let agent = match board.next_player() {
                Player::One => self.first,
                Player::Two => self.second,
            };
            let column = agent.choose_move(&board)?;
            board.play(column)?;
            moves.push(column);
        }

        Ok(GameRecord { moves, board })
    }

    /// Plays `games` games with the same seating
    ///
    /// `on_game` is called after each finished game.
    pub fn play_series<F>(&self, games: usize, mut on_game: F) -> Result<Tally>
    where
        F: FnMut(&GameRecord),
    {
        let mut tally = Tally::default();
        for game in 0..games {
            let record = self.play_game()?;
            match record.winner() {
                Some(Player::One) => tally.first_wins += 1,
                Some(Player::Two) => tally.second_wins += 1,
                None => tally.draws += 1,
            }
            debug!(game, moves = %record.move_string(), "game finished");
            on_game(&record);
        }
        Ok(tally)
    }
}
