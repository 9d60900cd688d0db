//! Position representation and static evaluation.
//!
//! A [`Position`] is an immutable 8x8 snapshot. Every evaluation term is a
//! method on it, written once from White's point of view; the Black side is
//! scored by asking the same question of [`Position::flip`].
//!
//! # Example
//! ```
//! use chess_eval::board::Position;
//!
//! let position = Position::from_fen("4k3/8/8/8/3P4/8/8/4K3 w - - 0 1");
//! let breakdown = position.evaluate();
//! assert_eq!(breakdown.pawns, (-18, -42));
//! ```

mod builder;
mod error;
mod eval_terms;
mod fen;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use builder::PositionBuilder;
pub use error::{FenError, PositionError, SquareError};
pub use state::Position;
pub use types::{CastlingRights, Cell, Color, Piece, Square};

pub use eval_terms::{
    tables, CheckKind, EvalBreakdown, EvalObserver, KingDanger, KingDangerTerms, NoopObserver,
    PawnReport, PawnWeakness, PinLine, SafeChecks, Shelter,
};
#[cfg(feature = "logging")]
pub use eval_terms::LogObserver;
