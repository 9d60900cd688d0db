pub mod board;

pub use board::{Cell, Color, EvalBreakdown, Piece, Position, PositionBuilder, Square};
