use anyhow::Result;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Stdin, Write};

use connect4_minimax::{
    agent::HeuristicAgent,
    board::{Board, GameState, Player},
    config::AgentConfig,
    display, WIDTH,
};

fn ask_ai_controlled(stdin: &Stdin, player: Player) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("Is {} AI controlled? y/n: ", player);
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut board = Board::new();
    let mut last_move = None;
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    let config = AgentConfig::load_or_default()?;

    let ai_players = (
        ask_ai_controlled(&stdin, Player::One)?,
        ask_ai_controlled(&stdin, Player::Two)?,
    );
    let agents = (
        HeuristicAgent::with_config(Player::One, config),
        HeuristicAgent::with_config(Player::Two, config),
    );
    for &(ai_controlled, agent) in [(ai_players.0, &agents.0), (ai_players.1, &agents.1)].iter() {
        if ai_controlled {
            println!(
                "{} searches {} plies in the opening, {} afterwards",
                agent.player(),
                agent.config().opening_depth,
                agent.config().standard_depth
            );
        }
    }

    // game loop
    loop {
        display::draw(&board, last_move).expect("Failed to draw board!");

        match board.state() {
            GameState::Playing => {
                let player = board.next_player();
                let (ai_controlled, agent) = match player {
                    Player::One => (ai_players.0, &agents.0),
                    Player::Two => (ai_players.1, &agents.1),
                };

                let next_move =
                    // AI player
                    if ai_controlled {
                        println!("AI is thinking...");
                        stdout().flush().expect("Failed to flush to stdout!");

                        // slow down play if both players are AI
                        if ai_players == (true, true) {
                            std::thread::sleep(std::time::Duration::new(1, 0));
                        }

                        let analysis = agent.analyse(&board)?;
                        println!(
                            "Searched {} positions at depth {}, score {}",
                            analysis.node_count, analysis.depth, analysis.best_score
                        );
                        println!("Best move: {}", analysis.best_move + 1);
                        analysis.best_move

                    // human player
                    } else {
                        print!("Move input > ");
                        stdout().flush().expect("Failed to flush to stdout!");
                        let mut input_str = String::new();
                        stdin.read_line(&mut input_str)?;

                        match input_str.trim().parse::<usize>() {
                            Ok(column @ 1..=WIDTH) => column - 1,
                            _ => {
                                println!(
                                    "Invalid move: {}, columns must be between 1 and {}",
                                    input_str.trim(),
                                    WIDTH
                                );
                                continue;
                            }
                        }
                    };

                if let Err(err) = board.play(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
                last_move = Some(next_move);
            }

            // end states
            GameState::PlayerOneWin => {
                println!("Player 1 wins!");
                break;
            }
            GameState::PlayerTwoWin => {
                println!("Player 2 wins!");
                break;
            }
            GameState::Draw => {
                println!("Draw!");
                break;
            }
        }
    }
    Ok(())
}
