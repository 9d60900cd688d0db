//! Piece, color and board-cell types.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Chess piece types.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Piece {
    /// All piece types in index order
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Index in the `P, N, B, R, Q, K` ordering used by the weight tables.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Piece::Pawn => 0,
            Piece::Knight => 1,
            Piece::Bishop => 2,
            Piece::Rook => 3,
            Piece::Queen => 4,
            Piece::King => 5,
        }
    }

    /// Parse a piece from a character of either case (p, n, b, r, q, k)
    #[must_use]
    pub fn from_char(c: char) -> Option<Piece> {
        match c.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }

    /// Convert piece to lowercase character
    #[inline]
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    /// Convert piece to character with case based on color (uppercase for White)
    #[inline]
    #[must_use]
    pub fn to_fen_char(self, color: Color) -> char {
        let c = self.to_char();
        if color == Color::White {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    /// Returns true if this piece can attack diagonally (Bishop, Queen)
    #[inline]
    #[must_use]
    pub const fn attacks_diagonally(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Queen)
    }

    /// Returns true if this piece can attack along ranks/files (Rook, Queen)
    #[inline]
    #[must_use]
    pub const fn attacks_straight(self) -> bool {
        matches!(self, Piece::Rook | Piece::Queen)
    }
}

/// Chess colors.
///
/// White (uppercase) is always the side being evaluated; Black (lowercase)
/// is the opponent. [`Position::flip`](crate::board::Position::flip) swaps
/// the roles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// Both colors in index order (White=0, Black=1)
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    /// Returns the opposite color
    #[inline]
    #[must_use]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Back rank for this color (0 for White, 7 for Black)
    #[inline]
    #[must_use]
    pub(crate) const fn back_rank(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Content of one board square.
///
/// Reads outside the 8x8 grid return [`Cell::OffBoard`], which matches no
/// piece and is never empty, so ray walks stop at the edge on their own.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Color, Piece),
    OffBoard,
}

impl Cell {
    /// True if the cell holds `piece` of `color`.
    #[inline]
    #[must_use]
    pub fn is(self, color: Color, piece: Piece) -> bool {
        self == Cell::Occupied(color, piece)
    }

    /// True for an on-board square with nothing on it.
    #[inline]
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    /// False only for the off-board sentinel.
    #[inline]
    #[must_use]
    pub fn is_on_board(self) -> bool {
        self != Cell::OffBoard
    }

    #[inline]
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Cell::Occupied(color, _) => Some(color),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn piece(self) -> Option<Piece> {
        match self {
            Cell::Occupied(_, piece) => Some(piece),
            _ => None,
        }
    }

    /// The piece on this cell if it belongs to `color`.
    #[inline]
    #[must_use]
    pub fn piece_of(self, color: Color) -> Option<Piece> {
        match self {
            Cell::Occupied(c, piece) if c == color => Some(piece),
            _ => None,
        }
    }

    /// True for any queen regardless of color.
    #[inline]
    #[must_use]
    pub fn is_queen(self) -> bool {
        self.piece() == Some(Piece::Queen)
    }

    /// Same piece, other color. Empty and off-board cells are unchanged.
    #[inline]
    #[must_use]
    pub const fn swap_color(self) -> Cell {
        match self {
            Cell::Occupied(color, piece) => Cell::Occupied(color.opponent(), piece),
            other => other,
        }
    }

    /// Parse a grid code: `-` for empty, FEN letters for pieces.
    #[must_use]
    pub fn from_char(c: char) -> Option<Cell> {
        if c == '-' {
            return Some(Cell::Empty);
        }
        let piece = Piece::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Cell::Occupied(color, piece))
    }

    /// Grid code for this cell (`x` for the off-board sentinel).
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::Occupied(color, piece) => piece.to_fen_char(color),
            Cell::OffBoard => 'x',
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
