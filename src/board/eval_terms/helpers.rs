//! Shared geometry for evaluation terms.
//!
//! Direction tables, the evaluated-side constants and the pin line type used
//! by the attack and king safety terms.

use std::ops::RangeInclusive;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::types::Color;

/// Side whose pieces are scored.
pub(crate) const US: Color = Color::White;
/// Side whose king is under attack.
pub(crate) const THEM: Color = Color::Black;

/// `(file, rank)` offsets of a knight jump.
pub(crate) const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const DIAGONALS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub(crate) const ORTHOGONALS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// King step directions, also the queen's rays.
pub(crate) const ALL_DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Line through the board along which a pinned piece may still act.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PinLine {
    /// Along a rank.
    Horizontal,
    /// Along a file.
    Vertical,
    /// a1-h8 direction.
    Diagonal,
    /// a8-h1 direction.
    AntiDiagonal,
}

impl PinLine {
    /// The line containing the step `(df, dr)`; both senses map to the same line.
    #[inline]
    #[must_use]
    pub const fn of(df: i32, dr: i32) -> PinLine {
        if dr == 0 {
            PinLine::Horizontal
        } else if df == 0 {
            PinLine::Vertical
        } else if df == dr {
            PinLine::Diagonal
        } else {
            PinLine::AntiDiagonal
        }
    }
}

/// Files forming the flank of a king on `king_file`.
#[inline]
pub(crate) fn flank_files(king_file: i32) -> RangeInclusive<i32> {
    match king_file {
        0 => 0..=2,
        1 | 2 => 0..=3,
        3 | 4 => 2..=5,
        5 | 6 => 4..=7,
        _ => 5..=7,
    }
}

/// King file pulled off the edge, so the three shelter files stay on the board.
#[inline]
pub(crate) fn clamp_centre(file: i32) -> i32 {
    file.clamp(1, 6)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_line_ignores_sense() {
        for &(df, dr) in &ALL_DIRECTIONS {
            assert_eq!(PinLine::of(df, dr), PinLine::of(-df, -dr));
        }
        assert_eq!(PinLine::of(1, 0), PinLine::Horizontal);
        assert_eq!(PinLine::of(0, -1), PinLine::Vertical);
        assert_eq!(PinLine::of(-1, -1), PinLine::Diagonal);
        assert_eq!(PinLine::of(1, -1), PinLine::AntiDiagonal);
    }

    #[test]
    fn test_flank_files() {
        assert_eq!(flank_files(0), 0..=2);
        assert_eq!(flank_files(2), 0..=3);
        assert_eq!(flank_files(4), 2..=5);
        assert_eq!(flank_files(6), 4..=7);
        assert_eq!(flank_files(7), 5..=7);
    }

    #[test]
    fn test_direction_tables_are_distinct() {
        let mut all = ALL_DIRECTIONS.to_vec();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 8);
        for d in DIAGONALS.iter().chain(ORTHOGONALS.iter()) {
            assert!(ALL_DIRECTIONS.contains(d));
        }
        for &(df, dr) in &KNIGHT_JUMPS {
            assert_eq!(df.abs() + dr.abs(), 3);
        }
    }
}
