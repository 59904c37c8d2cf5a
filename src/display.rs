//! Terminal drawing of a board

use anyhow::Result;
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use crate::{
    board::{Board, Cell},
    HEIGHT, WIDTH,
};

/// Draws `board` at the cursor, column numbers on top
///
/// `last_move` (0-indexed column) is highlighted in the header.
pub fn draw(board: &Board, last_move: Option<usize>) -> Result<()> {
    let mut stdout = stdout();

    for column in 0..WIDTH {
        let label = style((column + 1).to_string());
        let label = if Some(column) == last_move {
            label.attribute(Attribute::Bold).with(Color::Green)
        } else {
            label
        };
        stdout.queue(PrintStyledContent(label))?;
    }
    stdout.queue(PrintStyledContent(style("\n")))?;
    for _ in 0..HEIGHT {
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;

    let (origin_x, origin_y) = crossterm::cursor::position()?;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            let (pos_x, pos_y) = (origin_x + column as u16, origin_y - 1 - row as u16);

            stdout
                .queue(MoveTo(pos_x, pos_y))?
                .queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match board.cell(row, column) {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
        }
    }
    stdout
        .queue(MoveTo(origin_x, origin_y))?
        .queue(PrintStyledContent(style("\n")))?;
    stdout.flush()?;
    Ok(())
}
