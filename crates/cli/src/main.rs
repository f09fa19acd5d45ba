mod command;
mod opponent;
mod render;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use command::{Command, HELP};
use crossterm::tty::IsTty;
use opponent::{EvaluatorKind, Opponent};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use xiangqi_engine::constants::DEFAULT_SEARCH_DEPTH;
use xiangqi_engine::{Board, Config, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Controller {
    Human,
    Engine,
}

#[derive(Parser, Debug)]
#[command(name = "xiangqi", about = "Play Xiangqi against a minimax opponent")]
struct Arguments {
    /// Search depth in plies.
    #[arg(short, long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: i32,

    /// Seed for the random evaluator.
    #[arg(short, long)]
    seed: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = EvaluatorKind::Random)]
    evaluator: EvaluatorKind,

    #[arg(long, value_enum, default_value_t = Controller::Human)]
    red: Controller,

    #[arg(long, value_enum, default_value_t = Controller::Engine)]
    black: Controller,

    /// Stop after this many plies.
    #[arg(long)]
    max_turns: Option<u32>,
}

/// Who sits on each side. `None` is a human at the keyboard.
struct Seats {
    red: Option<Opponent>,
    black: Option<Opponent>,
}

impl Seats {
    fn new(args: &Arguments, config: &Config) -> Self {
        let seat = |side, controller| {
            (controller == Controller::Engine).then(|| Opponent::new(side, config.clone(), args.evaluator))
        };
        Self {
            red: seat(Side::Red, args.red),
            black: seat(Side::Black, args.black),
        }
    }

    fn engine(&self, side: Side) -> Option<&Opponent> {
        match side {
            Side::Red => self.red.as_ref(),
            Side::Black => self.black.as_ref(),
        }
    }

    fn has_human(&self) -> bool {
        self.red.is_none() || self.black.is_none()
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Arguments::parse();
    let config = Config {
        max_depth: args.depth.max(1),
        seed: args.seed,
        ..Config::default()
    };
    tracing::info!(?config, red = ?args.red, black = ?args.black, "starting game");

    let seats = Seats::new(&args, &config);
    let color = io::stdout().is_tty();
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut board = Board::new();
    let mut plies = 0u32;

    println!("--- Xiangqi ---");
    println!("{HELP}");

    loop {
        println!();
        print!("{}", render::board(&board, color));

        let side = board.side_to_move();
        let playing = match board.winner() {
            Some(winner) => {
                println!("Game over: {} wins.", winner.label());
                false
            }
            None if board.legal_moves(side).is_empty() => {
                println!("{side} has no legal response.");
                false
            }
            None => true,
        };

        if playing && args.max_turns.is_some_and(|max| plies >= max) {
            println!("Stopping after {plies} plies.");
            return Ok(());
        }

        if playing {
            if let Some(opponent) = seats.engine(side) {
                println!("{} is thinking...", opponent.side());
                if let Some(child) = opponent.think(&board).await? {
                    if let Some(record) = child.last_move() {
                        let played = board.move_from(record.from, record.to)?.as_move();
                        println!("{side} plays {played}");
                        announce(&board);
                        plies += 1;
                        continue;
                    }
                }
            }
        }

        if !seats.has_human() {
            return Ok(());
        }

        print!("{side}> ");
        io::stdout().flush()?;
        let Some(line) = input.next_line().await? else {
            return Ok(());
        };

        match line.parse::<Command>() {
            Err(err) => println!("{err}"),
            Ok(Command::Quit) => return Ok(()),
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Restart) => {
                board.restart();
                plies = 0;
            }
            Ok(Command::Undo) => {
                // Take back engine replies too, so the human is on move again.
                let mut undone = 0;
                while board.last_move().is_some() {
                    board.undo_move();
                    undone += 1;
                    if seats.engine(board.side_to_move()).is_none() {
                        break;
                    }
                }
                plies = plies.saturating_sub(undone);
                if undone == 0 {
                    println!("Nothing to undo.");
                }
            }
            Ok(Command::Move { from, to }) => match board.move_from(from, to) {
                Ok(_) => {
                    announce(&board);
                    plies += 1;
                }
                Err(err) => println!("Illegal move: {err}"),
            },
        }
    }
}

/// Prints what the last move captured, and any streak it completed.
fn announce(board: &Board) {
    if let Some(capture) = board.last_capture() {
        println!("{} takes {:?} on {}", capture.from, capture.victim, capture.to);
    }
    if let Some(streak) = board.streak() {
        let name = board.piece(streak.piece).map(|p| p.name()).unwrap_or("?");
        println!("{}{} is on a killing streak: {} captures!", streak.side, name, streak.captures);
    }
}
