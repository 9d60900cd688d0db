//! Pawn shelter and pawn storm around their king.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::state::Position;
use crate::board::types::{Piece, Square};

use super::helpers::{clamp_centre, THEM, US};
use super::observer::{EvalObserver, NoopObserver};
use super::tables::{
    BLOCKED_STORM, SHELTER_WEAKNESS, STORM_EG_BASE, STRENGTH_BASE, UNBLOCKED_STORM,
};

/// Shelter and storm of the king square chosen for their king.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Shelter {
    pub strength: i32,
    pub storm: i32,
    pub storm_eg: i32,
    /// Centre of the three sheltering files, `None` if no square qualified.
    pub centre_file: Option<i32>,
}

impl Default for Shelter {
    fn default() -> Self {
        Shelter {
            strength: 0,
            storm: 1024,
            storm_eg: 0,
            centre_file: None,
        }
    }
}

impl Position {
    /// Shelter quality of their pawns for a king on `sq`.
    #[must_use]
    pub fn strength_square(&self, sq: Square) -> i32 {
        let (file, rank) = sq.coords();
        let centre = clamp_centre(file);
        let mut v = STRENGTH_BASE;
        for x in centre - 1..=centre + 1 {
            let shield = self.shield_row(x, rank);
            v += row_value(&SHELTER_WEAKNESS[edge_distance(x)], shield);
        }
        v
    }

    /// Storm threat of our pawns against a king on `sq`, as `(mg, eg)`.
    #[must_use]
    pub fn storm_square(&self, sq: Square) -> (i32, i32) {
        let (file, rank) = sq.coords();
        let centre = clamp_centre(file);
        let (mut mg, mut eg) = (0, STORM_EG_BASE);
        for x in centre - 1..=centre + 1 {
            let shield = self.shield_row(x, rank);
            let storm =
                row_from_top((0..=rank).rev().find(|&r| self.at(x, r).is(US, Piece::Pawn)));
            if shield > 0 && storm == shield + 1 {
                mg += row_value(&BLOCKED_STORM[0], storm);
                eg += row_value(&BLOCKED_STORM[1], storm);
            } else {
                mg += row_value(&UNBLOCKED_STORM[edge_distance(x)], storm);
            }
        }
        (mg, eg)
    }

    /// Row, counted from their back rank, of their most advanced pawn on
    /// `file` at or behind `rank` that our pawns do not attack. 0 when none.
    fn shield_row(&self, file: i32, rank: i32) -> usize {
        row_from_top((0..=rank).rev().find(|&r| {
            self.at(file, r).is(THEM, Piece::Pawn)
                && !self.at(file - 1, r - 1).is(US, Piece::Pawn)
                && !self.at(file + 1, r - 1).is(US, Piece::Pawn)
        }))
    }

    /// Best of their king square and the castling targets still allowed,
    /// minimising `storm - strength`.
    #[must_use]
    pub fn shelter(&self) -> Shelter {
        self.shelter_with(&mut NoopObserver)
    }

    pub(crate) fn shelter_with<O: EvalObserver>(&self, observer: &mut O) -> Shelter {
        let kingside = Square(7, 6);
        let queenside = Square(7, 2);
        let mut best = Shelter::default();

        for file in 0..8 {
            for rank in (0..8).rev() {
                let sq = Square(rank, file);
                let candidate = self.cell(sq).is(THEM, Piece::King)
                    || (sq == kingside && self.castling.has(THEM, true))
                    || (sq == queenside && self.castling.has(THEM, false));
                if !candidate {
                    continue;
                }
                let strength = self.strength_square(sq);
                let (storm, storm_eg) = self.storm_square(sq);
                observer.shelter_candidate(sq, strength, storm);
                if storm - strength < best.storm - best.strength {
                    best = Shelter {
                        strength,
                        storm,
                        storm_eg,
                        centre_file: Some(clamp_centre(sq.coords().0)),
                    };
                }
            }
        }
        best
    }

    #[must_use]
    pub fn shelter_strength(&self) -> i32 {
        self.shelter().strength
    }

    #[must_use]
    pub fn shelter_storm(&self) -> i32 {
        self.shelter().storm
    }

    /// Endgame part of the storm for the chosen king square.
    #[must_use]
    pub fn endgame_shelter(&self) -> i32 {
        self.shelter().storm_eg
    }

    /// True if their pawn on `sq` is the front shield pawn of its file.
    #[must_use]
    pub fn shelter_strength_at(&self, sq: Square) -> bool {
        self.cell(sq).is(THEM, Piece::Pawn) && self.front_pawn_near_shelter(sq)
    }

    /// True if the pawn on `sq`, of either color, leads its file near their king.
    #[must_use]
    pub fn shelter_storm_at(&self, sq: Square) -> bool {
        self.cell(sq).piece() == Some(Piece::Pawn) && self.front_pawn_near_shelter(sq)
    }

    fn front_pawn_near_shelter(&self, sq: Square) -> bool {
        let Some(centre) = self.shelter().centre_file else {
            return false;
        };
        let (file, rank) = sq.coords();
        let pawn = self.cell(sq);
        (centre - 1..=centre + 1).contains(&file)
            && !(rank + 1..8).any(|r| self.at(file, r) == pawn)
    }

    /// Chebyshev distance from our king to our nearest pawn, capped at 6.
    #[must_use]
    pub fn king_pawn_distance(&self) -> i32 {
        let Some(king) = self.king_square(US) else {
            return 6;
        };
        let (kf, kr) = king.coords();
        Square::all()
            .filter(|&sq| self.cell(sq).is(US, Piece::Pawn))
            .map(|sq| {
                let (f, r) = sq.coords();
                (f - kf).abs().max((r - kr).abs())
            })
            .fold(6, i32::min)
    }
}

fn edge_distance(file: i32) -> usize {
    file.min(7 - file) as usize
}

fn row_from_top(rank: Option<i32>) -> usize {
    rank.map_or(0, |r| (7 - r) as usize)
}

/// Table entry for `row`, with rows past the end worth nothing.
fn row_value(table: &[i32; 7], row: usize) -> i32 {
    table.get(row).copied().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_position(fen: &str) -> Position {
        fen.parse().expect("valid fen")
    }

    fn sq(name: &str) -> Square {
        name.parse().expect("valid square")
    }

    #[test]
    fn test_bare_corner_king() {
        let pos = make_position("7k/8/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(pos.strength_square(sq("h8")), -54);
        assert_eq!(pos.storm_square(sq("h8")), (125, 5));
        let shelter = pos.shelter();
        assert_eq!(shelter.strength, -54);
        assert_eq!(shelter.storm, 125);
        assert_eq!(shelter.storm_eg, 5);
        assert_eq!(shelter.centre_file, Some(6));
    }

    #[test]
    fn test_centre_king() {
        let pos = make_position("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        assert_eq!(pos.shelter_strength(), -83);
        assert_eq!(pos.shelter_storm(), -36);
        assert_eq!(pos.endgame_shelter(), 5);
    }

    #[test]
    fn test_castling_square_preferred() {
        let pos = make_position("4k2r/5ppp/8/8/8/8/8/4K3 w k - 0 1");
        let shelter = pos.shelter();
        assert_eq!(shelter.strength, 222);
        assert_eq!(shelter.storm, 125);
        assert_eq!(shelter.centre_file, Some(6));
        assert!(pos.shelter_strength_at(sq("f7")));
        assert!(pos.shelter_storm_at(sq("h7")));
        assert!(!pos.shelter_strength_at(sq("e8")));
    }

    #[test]
    fn test_blocked_storm_pawn() {
        // Our g6 pawn rams their g7 shield pawn.
        let pos = make_position("6k1/6p1/6P1/8/8/8/8/4K3 w - - 0 1");
        let (mg, eg) = pos.storm_square(sq("g8"));
        // f and h files hold no storm pawn, the g file is blocked at row 2.
        assert_eq!(mg, -6 + 76 + 85);
        assert_eq!(eg, 5 + 78);
    }

    #[test]
    fn test_shield_pawn_attacked_by_our_pawn_is_ignored() {
        let covered = make_position("6k1/6p1/5P2/8/8/8/8/4K3 w - - 0 1");
        let open = make_position("6k1/6p1/8/8/8/8/8/4K3 w - - 0 1");
        // f6 attacks g7, so g7 shields nothing.
        assert!(covered.strength_square(sq("g8")) < open.strength_square(sq("g8")));
    }

    #[test]
    fn test_king_pawn_distance() {
        assert_eq!(
            make_position("4k3/8/8/8/8/8/8/4K3 w - - 0 1").king_pawn_distance(),
            6
        );
        assert_eq!(
            make_position("4k3/8/8/8/8/8/1P6/4K3 w - - 0 1").king_pawn_distance(),
            3
        );
        assert_eq!(
            make_position("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").king_pawn_distance(),
            1
        );
    }
}
