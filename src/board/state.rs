//! Immutable position snapshot and the geometry accessors every term reads through.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::PositionError;
use super::types::{CastlingRights, Cell, Color, Piece, Square};

/// A game position as handed to the evaluator.
///
/// Uppercase (White) pieces belong to the side being evaluated. The value is
/// never mutated after construction; [`Position::flip`] produces a new one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawPosition"))]
pub struct Position {
    pub(crate) squares: [[Cell; 8]; 8], // [rank][file]
    pub(crate) castling: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) side_to_move: Color,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

/// Unchecked field layout; deserialized positions pass through [`Position::new`].
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawPosition {
    squares: [[Cell; 8]; 8],
    castling: CastlingRights,
    en_passant: Option<Square>,
    side_to_move: Color,
    halfmove_clock: u32,
    fullmove_number: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawPosition> for Position {
    type Error = PositionError;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Position::new(
            raw.squares,
            raw.castling,
            raw.en_passant,
            raw.side_to_move,
            raw.halfmove_clock,
            raw.fullmove_number,
        )
    }
}

impl Position {
    /// Build and validate a position.
    ///
    /// `squares` is indexed `[rank][file]` with rank 0 being White's back rank.
    /// Off-board sentinels inside the grid are rejected as invalid cells.
    pub fn new(
        squares: [[Cell; 8]; 8],
        castling: CastlingRights,
        en_passant: Option<Square>,
        side_to_move: Color,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> Result<Self, PositionError> {
        let position = Position {
            squares,
            castling,
            en_passant,
            side_to_move,
            halfmove_clock,
            fullmove_number,
        };
        position.validate()?;
        Ok(position)
    }

    fn validate(&self) -> Result<(), PositionError> {
        if self.squares.iter().flatten().any(|&c| c == Cell::OffBoard) {
            return Err(PositionError::InvalidCell {
                char: Cell::OffBoard.to_char(),
            });
        }

        for color in Color::BOTH {
            let found = self
                .squares
                .iter()
                .flatten()
                .filter(|c| c.is(color, Piece::King))
                .count();
            if found != 1 {
                return Err(PositionError::KingCount { color, found });
            }
        }

        if let Some(square) = self.en_passant {
            let expected = match self.side_to_move {
                Color::White => 5,
                Color::Black => 2,
            };
            if square.rank() != expected {
                return Err(PositionError::EnPassantRank {
                    square,
                    side_to_move: self.side_to_move,
                });
            }
        }

        for color in Color::BOTH {
            let home = color.back_rank();
            for (kingside, rook_file) in [(true, 7), (false, 0)] {
                if !self.castling.has(color, kingside) {
                    continue;
                }
                let king_home = self.cell(Square(home, 4)).is(color, Piece::King);
                let rook_home = self.cell(Square(home, rook_file)).is(color, Piece::Rook);
                if !king_home || !rook_home {
                    return Err(PositionError::CastlingWithoutPieces { color, kingside });
                }
            }
        }

        Ok(())
    }

    /// Cell at signed `(file, rank)` coordinates.
    ///
    /// Anything outside the board reads as [`Cell::OffBoard`]; this is the
    /// only place bounds are checked.
    #[inline]
    #[must_use]
    pub fn at(&self, file: i32, rank: i32) -> Cell {
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            self.squares[rank as usize][file as usize]
        } else {
            Cell::OffBoard
        }
    }

    /// Cell on an on-board square.
    #[inline]
    #[must_use]
    pub fn cell(&self, sq: Square) -> Cell {
        let (file, rank) = sq.coords();
        self.at(file, rank)
    }

    /// The position as seen by the other side: ranks mirrored, colors
    /// swapped, castling pairs exchanged, side to move inverted.
    #[must_use]
    pub fn flip(&self) -> Position {
        let mut squares = [[Cell::Empty; 8]; 8];
        for (rank, row) in self.squares.iter().enumerate() {
            for (file, cell) in row.iter().enumerate() {
                squares[7 - rank][file] = cell.swap_color();
            }
        }
        Position {
            squares,
            castling: self.castling.flip(),
            en_passant: self.en_passant.map(Square::flip_vertical),
            side_to_move: self.side_to_move.opponent(),
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// Apply `score` to every square and sum the results.
    ///
    /// Every board-wide term total is a fold of its per-square contribution.
    pub fn fold<T, F>(&self, mut score: F) -> T
    where
        T: std::iter::Sum<T>,
        F: FnMut(&Position, Square) -> T,
    {
        Square::all().map(|sq| score(self, sq)).sum()
    }

    /// Square of `color`'s king.
    #[must_use]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| self.cell(sq).is(color, Piece::King))
    }

    #[inline]
    #[must_use]
    pub const fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    #[must_use]
    pub const fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    #[must_use]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// `(halfmove clock, fullmove number)`, carried but never scored.
    #[inline]
    #[must_use]
    pub const fn move_counters(&self) -> (u32, u32) {
        (self.halfmove_clock, self.fullmove_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_position(fen: &str) -> Position {
        fen.parse().expect("valid fen")
    }

    #[test]
    fn test_at_returns_sentinel_off_board() {
        let pos = make_position("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(pos.at(-1, 0), Cell::OffBoard);
        assert_eq!(pos.at(0, 8), Cell::OffBoard);
        assert_eq!(pos.at(8, -3), Cell::OffBoard);
        assert_eq!(pos.at(4, 0), Cell::Occupied(Color::White, Piece::King));
        assert_eq!(pos.at(4, 7), Cell::Occupied(Color::Black, Piece::King));
        assert_eq!(pos.at(3, 3), Cell::Empty);
    }

    #[test]
    fn test_flip_mirrors_and_recolors() {
        let pos = make_position("r3k3/8/8/8/4P3/8/8/4K3 b q e3 4 20");
        let flipped = pos.flip();
        assert_eq!(
            flipped.cell(Square(3, 4)),
            Cell::Occupied(Color::Black, Piece::Pawn)
        );
        assert_eq!(
            flipped.cell(Square(0, 0)),
            Cell::Occupied(Color::White, Piece::Rook)
        );
        assert_eq!(flipped.side_to_move(), Color::White);
        assert_eq!(flipped.en_passant(), Some(Square(5, 4)));
        assert!(flipped.castling().has(Color::White, false));
        assert!(!flipped.castling().has(Color::Black, false));
        assert_eq!(flipped.move_counters(), (4, 20));
        assert_eq!(flipped.flip(), pos);
    }

    #[test]
    fn test_fold_visits_every_square() {
        let pos = make_position("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(pos.fold(|_, _| 1), 64);
        let occupied: i32 = pos.fold(|p, sq| i32::from(p.cell(sq) != Cell::Empty));
        assert_eq!(occupied, 2);
    }

    #[test]
    fn test_king_square() {
        let pos = make_position("6k1/8/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(pos.king_square(Color::White), Some(Square(0, 0)));
        assert_eq!(pos.king_square(Color::Black), Some(Square(7, 6)));
    }

    #[test]
    fn test_new_rejects_off_board_cells() {
        let mut squares = [[Cell::Empty; 8]; 8];
        squares[0][4] = Cell::Occupied(Color::White, Piece::King);
        squares[7][4] = Cell::Occupied(Color::Black, Piece::King);
        squares[3][3] = Cell::OffBoard;
        let err = Position::new(squares, CastlingRights::none(), None, Color::White, 0, 1);
        assert_eq!(err, Err(PositionError::InvalidCell { char: 'x' }));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let pos = make_position("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
        let json = serde_json::to_string(&pos).expect("serialize");
        let back: Position = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, pos);

        let kingless = json.replace(r#"{"Occupied":["Black","King"]}"#, r#""Empty""#);
        assert_ne!(kingless, json);
        assert!(serde_json::from_str::<Position>(&kingless).is_err());

        let off_board = json.replacen(r#""Empty""#, r#""OffBoard""#, 1);
        assert!(serde_json::from_str::<Position>(&off_board).is_err());
    }
}
