//! Core board types.
//!
//! - `Piece`, `Color` and `Cell` - piece kinds, sides and square contents
//! - `Square` - (rank, file) board coordinates
//! - `CastlingRights` - castling state

mod castling;
mod piece;
mod square;

pub use castling::CastlingRights;
pub use piece::{Cell, Color, Piece};
pub use square::Square;
