//! The game board the agent plays on
//!
//! A `Board` is a small `Copy` value. The search never mutates a position it
//! was handed: every hypothetical move derives a fresh board.

use std::fmt;

use crate::{evaluator::WINDOWS, AgentError, Result, HEIGHT, WIDTH};

/// One of the two sides of the game
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The cell value of a token belonging to this player
    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "Player 1"),
            Player::Two => write!(f, "Player 2"),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    PlayerOne,
    PlayerTwo,
    Empty,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }

    pub fn owner(&self) -> Option<Player> {
        match self {
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
            Cell::Empty => None,
        }
    }

    fn from_char(ch: char) -> Result<Self> {
        match ch {
            '.' | '_' => Ok(Cell::Empty),
            'X' | 'x' | '1' => Ok(Cell::PlayerOne),
            'O' | 'o' | '2' => Ok(Cell::PlayerTwo),
            _ => Err(AgentError::InvalidCell { ch }),
        }
    }

    fn to_char(self) -> char {
        match self {
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
            Cell::Empty => '.',
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        match self {
            GameState::Playing => false,
            _ => true,
        }
    }

    fn win_for(player: Player) -> Self {
        match player {
            Player::One => GameState::PlayerOneWin,
            Player::Two => GameState::PlayerTwoWin,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [Cell; WIDTH * HEIGHT], // cells are stored left-to-right, bottom-to-top
    heights: [usize; WIDTH],
    state: GameState,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; WIDTH * HEIGHT],
            heights: [0; WIDTH],
            state: GameState::Playing,
        }
    }

    /// Replays a sequence of 1-indexed column digits, starting with player one
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    board.play(column - 1)?;
                }
                _ => return Err(AgentError::InvalidMoveChar { ch: column_char }),
            }
        }
        Ok(board)
    }

    /// Builds a board from a diagram, top row first
    ///
    /// `.` is an empty cell, `X` (or `1`) a player one token and `O` (or `2`)
    /// a player two token.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let columns = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .find(|&len| len != WIDTH)
            .unwrap_or(WIDTH);
        if rows.len() != HEIGHT || columns != WIDTH {
            return Err(AgentError::DimensionMismatch {
                rows: rows.len(),
                columns,
                connect: crate::CONNECT,
            });
        }

        let mut board = Self::new();
        for (idx, line) in rows.iter().enumerate() {
            let row = HEIGHT - 1 - idx;
            for (column, ch) in line.as_ref().chars().enumerate() {
                board.cells[column + WIDTH * row] = Cell::from_char(ch)?;
            }
        }

        for column in 0..WIDTH {
            let height = (0..HEIGHT)
                .take_while(|&row| !board.cell(row, column).is_empty())
                .count();
            if let Some(row) = (height..HEIGHT).find(|&row| !board.cell(row, column).is_empty()) {
                return Err(AgentError::FloatingToken { row, column });
            }
            board.heights[column] = height;
        }

        board.state = board.scan_state();
        Ok(board)
    }

    /// Plays a move for the side to move, updating the board in place
    pub fn play(&mut self, column: usize) -> Result<GameState> {
        let player = self.next_player();
        self.check_move(column)?;
        self.place(player, column);
        Ok(self.state)
    }

    /// Derives the position after `player` drops a token in `column`
    pub fn with_move(&self, player: Player, column: usize) -> Result<Self> {
        self.check_move(column)?;
        Ok(self.child(player, column))
    }

    // successor for a column already known to be legal
    pub(crate) fn child(&self, player: Player, column: usize) -> Self {
        let mut next = *self;
        next.place(player, column);
        next
    }

    fn check_move(&self, column: usize) -> Result<()> {
        if self.state.is_over() {
            return Err(AgentError::GameOver);
        }
        if column >= WIDTH {
            return Err(AgentError::ColumnOutOfRange { column });
        }
        if !self.playable(column) {
            return Err(AgentError::ColumnFull { column });
        }
        Ok(())
    }

    fn place(&mut self, player: Player, column: usize) {
        debug_assert!(self.playable(column));

        self.state = if self.check_winning_move(player, column) {
            GameState::win_for(player)
        } else if self.check_draw_move() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.cells[column + WIDTH * self.heights[column]] = player.cell();
        self.heights[column] += 1;
    }

    /// Columns that can still take a token, in ascending order
    ///
    /// Empty once the game is won or drawn.
    pub fn legal_moves(&self) -> impl Iterator<Item = usize> + '_ {
        let over = self.state.is_over();
        (0..WIDTH).filter(move |&column| !over && self.playable(column))
    }

    pub fn playable(&self, column: usize) -> bool {
        self.heights[column] < HEIGHT
    }

    /// The token at `row` (0 is the bottom row) and `column`
    ///
    /// # Panics
    /// Panics if `row >= HEIGHT` or `column >= WIDTH`.
    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[column + WIDTH * row]
    }

    pub fn height(&self, column: usize) -> usize {
        self.heights[column]
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_over()
    }

    pub fn winner(&self) -> Option<Player> {
        match self.state {
            GameState::PlayerOneWin => Some(Player::One),
            GameState::PlayerTwoWin => Some(Player::Two),
            _ => None,
        }
    }

    /// Number of tokens on the board, counted fresh on every call
    pub fn ply_count(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_empty()).count()
    }

    /// The side to move, assuming player one started
    pub fn next_player(&self) -> Player {
        let ones = self
            .cells
            .iter()
            .filter(|&&cell| cell == Cell::PlayerOne)
            .count();
        if ones * 2 > self.ply_count() {
            Player::Two
        } else {
            Player::One
        }
    }

    /// The board reflected left to right
    pub fn mirror(&self) -> Self {
        let mut mirrored = *self;
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                mirrored.cells[column + WIDTH * row] = self.cell(row, WIDTH - 1 - column);
            }
        }
        for column in 0..WIDTH {
            mirrored.heights[column] = self.heights[WIDTH - 1 - column];
        }
        mirrored
    }

    fn check_draw_move(&self) -> bool {
        self.cells.iter().filter(|x| x.is_empty()).count() == 1
    }

    fn check_winning_move(&self, player: Player, column: usize) -> bool {
        let player = player.cell();
        // check vertical alignment
        if self.heights[column] >= 3
            && self.cells[column + WIDTH * (self.heights[column] - 1)] == player
            && self.cells[column + WIDTH * (self.heights[column] - 2)] == player
            && self.cells[column + WIDTH * (self.heights[column] - 3)] == player
        {
            return true;
        }

        // check horizontal and diagonal alignment
        for dy_dx in -1i32..=1 {
            let mut run = 0;
            for dx in [-1i32, 1].iter() {
                let mut x = column as i32 + dx;
                let mut y = self.heights[column] as i32 + dx * dy_dx;
                loop {
                    if x < 0
                        || x >= WIDTH as i32
                        || y < 0
                        || y >= HEIGHT as i32
                        || self.cells[x as usize + WIDTH * y as usize] != player
                    {
                        break;
                    }
                    x += dx;
                    y += dx * dy_dx;
                    run += 1;
                }
            }
            if run >= 3 {
                return true;
            }
        }

        false
    }

    // full scan for boards that were not built move by move
    fn scan_state(&self) -> GameState {
        for window in WINDOWS.iter() {
            let first = self.cells[window[0]];
            if let Some(player) = first.owner() {
                if window.iter().all(|&idx| self.cells[idx] == first) {
                    return GameState::win_for(player);
                }
            }
        }
        if self.cells.iter().all(|cell| !cell.is_empty()) {
            GameState::Draw
        } else {
            GameState::Playing
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..HEIGHT).rev() {
            let line: String = (0..WIDTH).map(|column| self.cell(row, column).to_char()).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
