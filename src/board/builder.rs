//! Fluent builder for constructing positions.
//!
//! Allows creating positions piece by piece or from a row grid rather than
//! parsing FEN strings.
//!
//! # Example
//! ```
//! use chess_eval::board::{Color, Piece, PositionBuilder, Square};
//!
//! let position = PositionBuilder::new()
//!     .piece(Square(0, 4), Color::White, Piece::King)
//!     .piece(Square(7, 4), Color::Black, Piece::King)
//!     .piece(Square(1, 0), Color::White, Piece::Pawn)
//!     .side_to_move(Color::White)
//!     .build()
//!     .expect("valid position");
//! assert_eq!(position.to_fen(), "4k3/8/8/8/8/8/P7/4K3 w - - 0 1");
//! ```

use super::error::PositionError;
use super::{CastlingRights, Cell, Color, Piece, Position, Square};

/// A fluent builder for constructing [`Position`] values.
#[derive(Clone, Debug)]
pub struct PositionBuilder {
    squares: [[Cell; 8]; 8],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            squares: [[Cell::Empty; 8]; 8],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Create a builder starting from the standard initial position.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = Self::new();

        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, &piece) in back_rank.iter().enumerate() {
            builder.squares[0][file] = Cell::Occupied(Color::White, piece);
            builder.squares[7][file] = Cell::Occupied(Color::Black, piece);
            builder.squares[1][file] = Cell::Occupied(Color::White, Piece::Pawn);
            builder.squares[6][file] = Cell::Occupied(Color::Black, Piece::Pawn);
        }

        builder.castling = CastlingRights::all();
        builder
    }

    /// Load the piece placement from eight rows of eight cell codes.
    ///
    /// Rows run from rank 8 down to rank 1; `-` is an empty square and FEN
    /// letters are pieces. Replaces every square set so far.
    pub fn from_grid(mut self, rows: &[&str]) -> Result<Self, PositionError> {
        if rows.len() != 8 {
            return Err(PositionError::GridDimensions {
                rows: rows.len(),
                columns: rows.first().map_or(0, |row| row.chars().count()),
            });
        }

        for (row_idx, row) in rows.iter().enumerate() {
            let columns = row.chars().count();
            if columns != 8 {
                return Err(PositionError::GridDimensions { rows: 8, columns });
            }
            for (file, c) in row.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or(PositionError::InvalidCell { char: c })?;
                self.squares[7 - row_idx][file] = cell;
            }
        }
        Ok(self)
    }

    /// Place a piece on the board.
    #[must_use]
    pub fn piece(mut self, square: Square, color: Color, piece: Piece) -> Self {
        self.squares[square.rank()][square.file()] = Cell::Occupied(color, piece);
        self
    }

    /// Remove a piece from a square.
    #[must_use]
    pub fn clear(mut self, square: Square) -> Self {
        self.squares[square.rank()][square.file()] = Cell::Empty;
        self
    }

    /// Set the side to move.
    #[must_use]
    pub const fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Set castling rights from a `CastlingRights` value.
    #[must_use]
    pub const fn castling(mut self, rights: CastlingRights) -> Self {
        self.castling = rights;
        self
    }

    /// Enable kingside castling for a color.
    #[must_use]
    pub fn castle_kingside(mut self, color: Color) -> Self {
        self.castling.set(color, true);
        self
    }

    /// Enable queenside castling for a color.
    #[must_use]
    pub fn castle_queenside(mut self, color: Color) -> Self {
        self.castling.set(color, false);
        self
    }

    /// Disable all castling rights.
    #[must_use]
    pub const fn no_castling_rights(mut self) -> Self {
        self.castling = CastlingRights::none();
        self
    }

    /// Set the en passant target square.
    #[must_use]
    pub const fn en_passant(mut self, target: Square) -> Self {
        self.en_passant = Some(target);
        self
    }

    /// Clear the en passant target.
    #[must_use]
    pub const fn clear_en_passant(mut self) -> Self {
        self.en_passant = None;
        self
    }

    /// Set the halfmove clock (for 50-move rule).
    #[must_use]
    pub const fn halfmove_clock(mut self, clock: u32) -> Self {
        self.halfmove_clock = clock;
        self
    }

    #[must_use]
    pub const fn fullmove_number(mut self, number: u32) -> Self {
        self.fullmove_number = number;
        self
    }

    /// Build and validate the position.
    pub fn build(self) -> Result<Position, PositionError> {
        Position::new(
            self.squares,
            self.castling,
            self.en_passant,
            self.side_to_move,
            self.halfmove_clock,
            self.fullmove_number,
        )
    }
}
