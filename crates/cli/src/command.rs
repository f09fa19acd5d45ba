//! Parsing of the lines a human player types.

use std::str::FromStr;
use thiserror::Error;
use xiangqi_engine::Square;
use xiangqi_engine::error::SquareParseError;

pub const HELP: &str = "Moves are file+rank pairs, e.g. b2e2 (a-i left to right, 0 at red's back rank).
Other commands: undo, restart, help, quit.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move { from: Square, to: Square },
    Undo,
    Restart,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("nothing entered, type `help` for commands")]
    Empty,

    #[error("unknown command `{0}`, type `help` for commands")]
    Unknown(String),

    #[error(transparent)]
    Square(#[from] SquareParseError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_ascii_lowercase();
        match input.as_str() {
            "" => Err(CommandError::Empty),
            "undo" | "u" => Ok(Command::Undo),
            "restart" | "new" => Ok(Command::Restart),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            _ => {
                let (Some(from), Some(to)) = (input.get(..2), input.get(2..)) else {
                    return Err(CommandError::Unknown(input.clone()));
                };
                if to.len() != 2 {
                    return Err(CommandError::Unknown(input.clone()));
                }
                Ok(Command::Move {
                    from: from.parse()?,
                    to: to.parse()?,
                })
            }
        }
    }
}
