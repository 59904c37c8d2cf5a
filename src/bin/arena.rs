//! Plays the heuristic agent against a random agent and reports the results
//!
//! Usage: arena [games]

use anyhow::{anyhow, Result};
use indicatif::*;
use tracing_subscriber::EnvFilter;

use std::env;
use std::time::Instant;

use connect4_minimax::{
    agent::{Agent, HeuristicAgent, RandomAgent},
    arena::Arena,
    board::Player,
    config::AgentConfig,
};

const DEFAULT_GAMES: usize = 20;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let games = match env::args().nth(1) {
        Some(arg) => arg
            .parse::<usize>()
            .map_err(|_| anyhow!("could not parse '{}' as a number of games", arg))?,
        None => DEFAULT_GAMES,
    };

    let config = AgentConfig::load_or_default()?;
    let heuristic = HeuristicAgent::with_config(Player::One, config);
    let random = RandomAgent::new();
    let arena = Arena::new(&heuristic, &random);

    println!("{} vs {}, {} games", heuristic.name(), random.name(), games);

    let start = Instant::now();
    let progress = ProgressBar::new(games as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {msg} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let tally = arena.play_series(games, |record| {
        progress.inc(1);
        progress.set_message(&format!(
            "({} / {}) last game: {} moves",
            progress.position(),
            games,
            record.moves.len()
        ));
    })?;
    progress.finish();

    println!(
        "{} wins: {}, {} wins: {}, draws: {}",
        heuristic.name(),
        tally.first_wins,
        random.name(),
        tally.second_wins,
        tally.draws
    );
    println!("Completed in {}", HumanDuration(start.elapsed()));
    Ok(())
}
