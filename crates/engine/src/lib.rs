pub mod board;
pub mod config;
pub mod constants;
pub mod error;
pub mod evaluate;
pub mod events;
pub mod move_gen;
pub mod piece;
pub mod record;
pub mod search;
pub mod square;
pub mod state;

pub use board::Board;
pub use config::Config;
pub use constants::{PieceKind, Side};
pub use error::MoveError;
pub use piece::{Piece, PieceId};
pub use record::{Move, MoveRecord};
pub use search::Search;
pub use square::Square;
