use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::warn;

use std::io::{stdin, stdout, BufRead, Write};

use connect4_search::match_runner::{MatchConfig, MatchRunner};
use connect4_search::*;

/// Play Connect 4 against depth-limited search strategies
#[derive(Parser)]
#[command(name = "connect4_search", about = "Connect 4 with minimax, alpha-beta and expectimax players")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Play an interactive game on the terminal
    Play {
        /// Let the AI control player 1
        #[arg(long)]
        ai_one: bool,

        /// Let the AI control player 2
        #[arg(long)]
        ai_two: bool,

        /// Search strategy used by AI players: minimax, alphabeta or expectimax
        #[arg(long, default_value = "alphabeta")]
        strategy: Strategy,

        /// Search depth in plies
        #[arg(long, default_value_t = 4)]
        depth: usize,

        #[arg(long, default_value_t = HEIGHT)]
        rows: usize,

        #[arg(long, default_value_t = WIDTH)]
        cols: usize,
    },
    /// Play a self-play match between two strategies
    Match {
        first: Strategy,

        second: Strategy,

        /// Number of games to play
        #[arg(long, default_value_t = 10)]
        games: usize,

        /// Search depth in plies
        #[arg(long, default_value_t = 4)]
        depth: usize,

        #[arg(long, default_value_t = HEIGHT)]
        rows: usize,

        #[arg(long, default_value_t = WIDTH)]
        cols: usize,

        /// Play the games one after another instead of in parallel
        #[arg(long)]
        sequential: bool,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Play {
            ai_one,
            ai_two,
            strategy,
            depth,
            rows,
            cols,
        } => play(ArrayBoard::new(rows, cols)?, (ai_one, ai_two), strategy, depth),
        Command::Match {
            first,
            second,
            games,
            depth,
            rows,
            cols,
            sequential,
        } => {
            let config = MatchConfig {
                num_games: games,
                depth,
                rows,
                cols,
                parallel: !sequential,
                ..MatchConfig::default()
            };
            let runner = MatchRunner::new(config).context("invalid match configuration")?;
            let result = runner.run_match(first, second)?;
            println!(
                "{} vs {}: {} wins, {} draws, {} losses ({:.1}/{})",
                first,
                second,
                result.wins,
                result.draws,
                result.losses,
                result.score(),
                result.games()
            );
            Ok(())
        }
    }
}

fn play(mut board: ArrayBoard, ai_players: (bool, bool), strategy: Strategy, depth: usize) -> Result<()> {
    let stdin = stdin();

    println!("Welcome to Connect 4\n");

    // game loop
    loop {
        board.display().context("Failed to draw board!")?;

        match board.state {
            GameState::Playing => {
                let player = board.to_move();
                let next_move =
                    // AI player
                    if (player == Player::One && ai_players.0) || (player == Player::Two && ai_players.1) {
                        println!("AI is thinking...");
                        stdout().flush()?;

                        // slow down play if both players are AI
                        if ai_players == (true, true) {
                            std::thread::sleep(std::time::Duration::new(1, 0));
                        }

                        let outcome = strategy.search(player, &board, depth);
                        match outcome.column {
                            Some(column) => {
                                println!(
                                    "Best move: {} (value {:.2}, {} positions searched)",
                                    column + 1,
                                    outcome.value,
                                    outcome.node_count
                                );
                                column + 1
                            }
                            None => {
                                warn!("{} found no move at depth {}", strategy, depth);
                                println!("{} gives up the game!", player);
                                break;
                            }
                        }

                    // human player
                    } else {
                        print!("Move input > ");
                        stdout().flush()?;
                        let input_str = match read_input(&mut stdin.lock())? {
                            Some(line) => line,
                            None => bail!("input closed before the game finished"),
                        };

                        match input_str.trim().parse::<usize>() {
                            Err(_) => {
                                println!("Invalid number: {}", input_str.trim());
                                continue;
                            }
                            Ok(column) => column,
                        }
                    };

                if let Err(err) = board.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
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

/// Reads one line of input, `None` once the input is exhausted
fn read_input<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
