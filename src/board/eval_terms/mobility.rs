//! Mobility evaluation.
//!
//! Counts the squares of the mobility area each of our knights, bishops,
//! rooks and queens attacks, and scores the count through the mobility
//! tables.

use crate::board::state::Position;
use crate::board::types::{Piece, Square};

use super::helpers::{THEM, US};
use super::tables::{
    BISHOP_MOB_EG, BISHOP_MOB_MG, KNIGHT_MOB_EG, KNIGHT_MOB_MG, QUEEN_MOB_EG, QUEEN_MOB_MG,
    ROOK_MOB_EG, ROOK_MOB_MG,
};

type AreaMap = [bool; 64];

impl Position {
    /// True if `sq` counts towards our mobility.
    ///
    /// Excluded are squares holding our king or queen, squares their pawns
    /// attack, our pawns still on ranks 1-3 or blocked, and pieces of either
    /// color pinned to our king.
    #[must_use]
    pub fn mobility_area_at(&self, sq: Square) -> bool {
        let (file, rank) = sq.coords();
        let cell = self.cell(sq);
        if cell.is(US, Piece::King) || cell.is(US, Piece::Queen) {
            return false;
        }
        if self.at(file - 1, rank + 1).is(THEM, Piece::Pawn)
            || self.at(file + 1, rank + 1).is(THEM, Piece::Pawn)
        {
            return false;
        }
        if cell.is(US, Piece::Pawn) && (rank < 3 || !self.at(file, rank + 1).is_empty()) {
            return false;
        }
        self.pinned_direction(sq).is_none()
    }

    /// Number of squares in the mobility area.
    #[must_use]
    pub fn mobility_area(&self) -> i32 {
        self.fold(|pos, sq| i32::from(pos.mobility_area_at(sq)))
    }

    fn mobility_area_map(&self) -> AreaMap {
        let mut area = [false; 64];
        for sq in Square::all() {
            area[sq.as_index()] = self.mobility_area_at(sq);
        }
        area
    }

    /// Mobility area squares attacked by our piece on `sq`; 0 for anything
    /// but a knight, bishop, rook or queen.
    #[must_use]
    pub fn mobility_at(&self, sq: Square) -> i32 {
        self.mobility_in(&self.mobility_area_map(), sq)
    }

    fn mobility_in(&self, area: &AreaMap, sq: Square) -> i32 {
        let Some(piece) = self.cell(sq).piece_of(US) else {
            return 0;
        };
        if matches!(piece, Piece::Pawn | Piece::King) {
            return 0;
        }
        Square::all()
            .filter(|target| area[target.as_index()])
            .filter(|&target| self.piece_attack(piece, target, sq) > 0)
            .count() as i32
    }

    /// Mobility bonus `(mg, eg)` of our piece on `sq`.
    #[must_use]
    pub fn mobility_bonus_at(&self, sq: Square) -> (i32, i32) {
        self.mobility_bonus_in(&self.mobility_area_map(), sq)
    }

    fn mobility_bonus_in(&self, area: &AreaMap, sq: Square) -> (i32, i32) {
        let (mg_table, eg_table): (&[i32], &[i32]) = match self.cell(sq).piece_of(US) {
            Some(Piece::Knight) => (&KNIGHT_MOB_MG, &KNIGHT_MOB_EG),
            Some(Piece::Bishop) => (&BISHOP_MOB_MG, &BISHOP_MOB_EG),
            Some(Piece::Rook) => (&ROOK_MOB_MG, &ROOK_MOB_EG),
            Some(Piece::Queen) => (&QUEEN_MOB_MG, &QUEEN_MOB_EG),
            _ => return (0, 0),
        };
        let count = (self.mobility_in(area, sq) as usize).min(mg_table.len() - 1);
        (mg_table[count], eg_table[count])
    }

    /// Total mobility bonus `(mg, eg)` of our pieces.
    #[must_use]
    pub fn mobility(&self) -> (i32, i32) {
        let area = self.mobility_area_map();
        Square::all()
            .map(|sq| self.mobility_bonus_in(&area, sq))
            .fold((0, 0), |(mg, eg), (m, e)| (mg + m, eg + e))
    }

    #[must_use]
    pub fn mobility_mg(&self) -> i32 {
        self.mobility().0
    }

    #[must_use]
    pub fn mobility_eg(&self) -> i32 {
        self.mobility().1
    }
}
