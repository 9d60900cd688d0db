//! King safety primitives.
//!
//! Ring membership, attacker counting, weak squares, checks, king blockers
//! and flank control around *their* king. Each term has a board total and a
//! per-square `_at` form; totals go through [`Position::fold`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::state::Position;
use crate::board::types::{Piece, Square};

use super::helpers::{
    flank_files, ALL_DIRECTIONS, DIAGONALS, KNIGHT_JUMPS, ORTHOGONALS, THEM, US,
};
use super::tables::{ATTACKER_UNIT, KING_ATTACKER_WEIGHTS, SAFE_CHECK_BONUS};

/// Piece giving a (hypothetical) check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CheckKind {
    Knight,
    Bishop,
    Rook,
    Queen,
    /// Knight, bishop or rook.
    Any,
}

impl CheckKind {
    /// The four single-piece kinds, in table order.
    pub const PIECES: [CheckKind; 4] = [
        CheckKind::Knight,
        CheckKind::Bishop,
        CheckKind::Rook,
        CheckKind::Queen,
    ];
}

/// Board-wide safe check counts per checking piece.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SafeChecks {
    pub knight: i32,
    pub bishop: i32,
    pub rook: i32,
    pub queen: i32,
}

impl SafeChecks {
    #[must_use]
    pub const fn get(&self, kind: CheckKind) -> i32 {
        match kind {
            CheckKind::Knight => self.knight,
            CheckKind::Bishop => self.bishop,
            CheckKind::Rook => self.rook,
            CheckKind::Queen => self.queen,
            CheckKind::Any => self.knight + self.bishop + self.rook,
        }
    }

    /// King danger contribution. Each piece pays its single-check bonus
    /// once, or a capped multiple when it has several safe checks.
    #[must_use]
    pub fn bonus(&self) -> i32 {
        CheckKind::PIECES
            .iter()
            .zip(SAFE_CHECK_BONUS.iter())
            .map(|(&kind, &[single, several])| match self.get(kind) {
                0 => 0,
                1 => single,
                _ => several,
            })
            .sum()
    }
}

impl Position {
    /// True if `sq` belongs to the ring around their king.
    ///
    /// The ring is the king's neighbourhood, stretched to two squares along
    /// an edge the king stands on. Unless `full` is set, a square covered by
    /// two of their pawns is left out.
    #[must_use]
    pub fn king_ring_at(&self, sq: Square, full: bool) -> bool {
        let (file, rank) = sq.coords();
        self.king_ring_coords(file, rank, full)
    }

    /// Number of squares in their king ring.
    #[must_use]
    pub fn king_ring(&self, full: bool) -> i32 {
        self.fold(|pos, sq| i32::from(pos.king_ring_at(sq, full)))
    }

    fn king_ring_coords(&self, file: i32, rank: i32, full: bool) -> bool {
        if !full
            && self.at(file + 1, rank + 1).is(THEM, Piece::Pawn)
            && self.at(file - 1, rank + 1).is(THEM, Piece::Pawn)
        {
            return false;
        }
        for df in -2..=2 {
            for dr in -2..=2 {
                let (kf, kr) = (file + df, rank + dr);
                if self.at(kf, kr).is(THEM, Piece::King)
                    && (df.abs() <= 1 || kf == 0 || kf == 7)
                    && (dr.abs() <= 1 || kr == 0 || kr == 7)
                {
                    return true;
                }
            }
        }
        false
    }

    /// King attacker units (see [`ATTACKER_UNIT`]) of our piece on `sq`.
    ///
    /// A pawn scores per ring square it hits, at half value when another of
    /// our pawns stands two files over on the same rank. A knight, bishop,
    /// rook or queen scores one unit if it hits any ring square.
    #[must_use]
    pub fn king_attackers_count_at(&self, sq: Square) -> i32 {
        let (file, rank) = sq.coords();
        match self.cell(sq).piece_of(US) {
            Some(Piece::Pawn) => [-1, 1]
                .iter()
                .filter(|&&dir| {
                    self.at(file + dir, rank).is_on_board()
                        && self.king_ring_coords(file + dir, rank + 1, true)
                })
                .map(|&dir| {
                    if self.at(file + 2 * dir, rank).is(US, Piece::Pawn) {
                        ATTACKER_UNIT / 2
                    } else {
                        ATTACKER_UNIT
                    }
                })
                .sum(),
            Some(piece @ (Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen)) => {
                let hits_ring = Square::all().any(|target| {
                    self.king_ring_at(target, false) && self.piece_attack(piece, target, sq) > 0
                });
                if hits_ring {
                    ATTACKER_UNIT
                } else {
                    0
                }
            }
            _ => 0,
        }
    }

    /// Total king attacker units.
    #[must_use]
    pub fn king_attackers_count(&self) -> i32 {
        self.fold(Position::king_attackers_count_at)
    }

    /// Weight of our piece on `sq` if it attacks the king ring.
    #[must_use]
    pub fn king_attackers_weight_at(&self, sq: Square) -> i32 {
        match self.cell(sq).piece_of(US) {
            Some(piece) if piece != Piece::King && self.king_attackers_count_at(sq) != 0 => {
                KING_ATTACKER_WEIGHTS[piece.index()]
            }
            _ => 0,
        }
    }

    #[must_use]
    pub fn king_attackers_weight(&self) -> i32 {
        self.fold(Position::king_attackers_weight_at)
    }

    /// Attacks by our ring attacker on `sq` against the squares next to their king.
    #[must_use]
    pub fn king_attacks_at(&self, sq: Square) -> i32 {
        let piece = match self.cell(sq).piece_of(US) {
            Some(p @ (Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen)) => p,
            _ => return 0,
        };
        if self.king_attackers_count_at(sq) == 0 {
            return 0;
        }
        let Some(king) = self.king_square(THEM) else {
            return 0;
        };
        let (kf, kr) = king.coords();
        ALL_DIRECTIONS
            .iter()
            .filter_map(|&(df, dr)| Square::from_coords(kf + df, kr + dr))
            .map(|target| self.piece_attack(piece, target, sq))
            .sum()
    }

    #[must_use]
    pub fn king_attacks(&self) -> i32 {
        self.fold(Position::king_attacks_at)
    }

    /// True if we attack `sq` and they defend it at most with a lone king or queen.
    #[must_use]
    pub fn weak_squares_at(&self, sq: Square) -> bool {
        self.weak_square_with(&self.flip(), sq)
    }

    #[must_use]
    pub fn weak_squares(&self) -> i32 {
        let flipped = self.flip();
        self.fold(|pos, sq| i32::from(pos.weak_square_with(&flipped, sq)))
    }

    pub(crate) fn weak_square_with(&self, flipped: &Position, sq: Square) -> bool {
        if self.attack(sq) == 0 {
            return false;
        }
        let mirror = sq.flip_vertical();
        match flipped.attack(mirror) {
            0 => true,
            1 => flipped.king_attack(mirror) > 0 || flipped.queen_attack(mirror, None) > 0,
            _ => false,
        }
    }

    /// Weak square inside their king ring.
    #[must_use]
    pub fn weak_bonus_at(&self, sq: Square) -> bool {
        self.weak_bonus_with(&self.flip(), sq)
    }

    #[must_use]
    pub fn weak_bonus(&self) -> i32 {
        let flipped = self.flip();
        self.fold(|pos, sq| i32::from(pos.weak_bonus_with(&flipped, sq)))
    }

    fn weak_bonus_with(&self, flipped: &Position, sq: Square) -> bool {
        self.weak_square_with(flipped, sq) && self.king_ring_at(sq, false)
    }

    /// True if a `kind` piece of ours on `sq` would check their king.
    ///
    /// The square must already be reachable by such a piece. Rays see
    /// through their queen.
    #[must_use]
    pub fn check_at(&self, sq: Square, kind: CheckKind) -> bool {
        let queen = kind == CheckKind::Queen && self.queen_attack(sq, None) > 0;
        let rook = matches!(kind, CheckKind::Rook | CheckKind::Any)
            && self.rook_xray_attack(sq, None) > 0;
        if (rook || queen) && self.ray_reaches_their_king(sq, &ORTHOGONALS) {
            return true;
        }
        let bishop = matches!(kind, CheckKind::Bishop | CheckKind::Any)
            && self.bishop_xray_attack(sq, None) > 0;
        if (bishop || queen) && self.ray_reaches_their_king(sq, &DIAGONALS) {
            return true;
        }
        let (file, rank) = sq.coords();
        matches!(kind, CheckKind::Knight | CheckKind::Any)
            && self.knight_attack(sq, None) > 0
            && KNIGHT_JUMPS
                .iter()
                .any(|&(df, dr)| self.at(file + df, rank + dr).is(THEM, Piece::King))
    }

    #[must_use]
    pub fn check(&self, kind: CheckKind) -> i32 {
        self.fold(|pos, sq| i32::from(pos.check_at(sq, kind)))
    }

    fn ray_reaches_their_king(&self, sq: Square, directions: &[(i32, i32)]) -> bool {
        let (file, rank) = sq.coords();
        directions.iter().any(|&(df, dr)| {
            (1..8)
                .map(|d| self.at(file + d * df, rank + d * dr))
                .find(|cell| !cell.is_empty() && !cell.is(THEM, Piece::Queen))
                .is_some_and(|cell| cell.is(THEM, Piece::King))
        })
    }

    /// True if a check from `sq` cannot be cheaply answered.
    ///
    /// The square must be free of our pieces and either undefended, or weak
    /// and attacked twice by us. A queen check also needs the square out of
    /// their queen's reach. Queen checks yield to rook checks on the same
    /// square and bishop checks yield to queen checks.
    #[must_use]
    pub fn safe_check_at(&self, sq: Square, kind: CheckKind) -> bool {
        self.safe_check_with(&self.flip(), sq, kind)
    }

    /// Number of safe `kind` checks.
    #[must_use]
    pub fn safe_check(&self, kind: CheckKind) -> i32 {
        let flipped = self.flip();
        self.fold(|pos, sq| i32::from(pos.safe_check_with(&flipped, sq, kind)))
    }

    /// Safe check totals for every piece kind.
    #[must_use]
    pub fn safe_checks(&self) -> SafeChecks {
        let flipped = self.flip();
        let total =
            |kind| self.fold(|pos, sq| i32::from(pos.safe_check_with(&flipped, sq, kind)));
        SafeChecks {
            knight: total(CheckKind::Knight),
            bishop: total(CheckKind::Bishop),
            rook: total(CheckKind::Rook),
            queen: total(CheckKind::Queen),
        }
    }

    pub(crate) fn safe_check_with(&self, flipped: &Position, sq: Square, kind: CheckKind) -> bool {
        if self.cell(sq).color() == Some(US) || !self.check_at(sq, kind) {
            return false;
        }
        let superseded = match kind {
            CheckKind::Queen => self.safe_check_with(flipped, sq, CheckKind::Rook),
            CheckKind::Bishop => self.safe_check_with(flipped, sq, CheckKind::Queen),
            _ => false,
        };
        if superseded {
            return false;
        }
        let mirror = sq.flip_vertical();
        let cheap = flipped.attack(mirror) == 0
            || (self.weak_square_with(flipped, sq) && self.attack(sq) > 1);
        cheap && (kind != CheckKind::Queen || flipped.queen_attack(mirror, None) == 0)
    }

    /// True if `sq` gives a knight, bishop or rook check while that piece
    /// has no safe check anywhere.
    #[must_use]
    pub fn unsafe_checks_at(&self, sq: Square) -> bool {
        self.unsafe_check_with(&self.safe_checks(), sq)
    }

    #[must_use]
    pub fn unsafe_checks(&self) -> i32 {
        let safe = self.safe_checks();
        self.fold(|pos, sq| i32::from(pos.unsafe_check_with(&safe, sq)))
    }

    pub(crate) fn unsafe_check_with(&self, safe: &SafeChecks, sq: Square) -> bool {
        [CheckKind::Knight, CheckKind::Bishop, CheckKind::Rook]
            .into_iter()
            .any(|kind| self.check_at(sq, kind) && safe.get(kind) == 0)
    }

    /// True if the piece on `sq`, of either color, is pinned to their king.
    #[must_use]
    pub fn blockers_for_king_at(&self, sq: Square) -> bool {
        self.flip().pinned_direction(sq.flip_vertical()).is_some()
    }

    #[must_use]
    pub fn blockers_for_king(&self) -> i32 {
        let flipped = self.flip();
        self.fold(|_, sq| i32::from(flipped.pinned_direction(sq.flip_vertical()).is_some()))
    }

    /// File of their king, or the a-file on a board without one.
    pub(crate) fn their_king_file(&self) -> i32 {
        self.king_square(THEM).map_or(0, |king| king.coords().0)
    }

    /// Squares on their half plus our fourth rank, within their king's flank.
    fn in_king_flank(king_file: i32, sq: Square) -> bool {
        let (file, rank) = sq.coords();
        rank >= 3 && flank_files(king_file).contains(&file)
    }

    /// Our attacks on a flank square: 1 for one attacker, 2 for several.
    #[must_use]
    pub fn flank_attack_at(&self, sq: Square) -> i32 {
        self.flank_attack_in(self.their_king_file(), sq)
    }

    #[must_use]
    pub fn flank_attack(&self) -> i32 {
        let king_file = self.their_king_file();
        self.fold(|pos, sq| pos.flank_attack_in(king_file, sq))
    }

    fn flank_attack_in(&self, king_file: i32, sq: Square) -> i32 {
        if !Self::in_king_flank(king_file, sq) {
            return 0;
        }
        self.attack(sq).min(2)
    }

    /// True if they defend the flank square `sq`.
    #[must_use]
    pub fn flank_defense_at(&self, sq: Square) -> bool {
        Self::in_king_flank(self.their_king_file(), sq)
            && self.flip().attack(sq.flip_vertical()) > 0
    }

    #[must_use]
    pub fn flank_defense(&self) -> i32 {
        let king_file = self.their_king_file();
        let flipped = self.flip();
        self.fold(|_, sq| {
            i32::from(
                Self::in_king_flank(king_file, sq) && flipped.attack(sq.flip_vertical()) > 0,
            )
        })
    }

    /// True if no pawn of either color stands on their king's flank.
    #[must_use]
    pub fn pawnless_flank(&self) -> bool {
        let files = flank_files(self.their_king_file());
        !Square::all()
            .any(|sq| files.contains(&sq.coords().0) && self.cell(sq).piece() == Some(Piece::Pawn))
    }

    /// Number of our queens.
    #[must_use]
    pub fn queen_count(&self) -> i32 {
        self.fold(|pos, sq| i32::from(pos.cell(sq).is(US, Piece::Queen)))
    }

    /// True if `sq` is covered by both our knight and our king.
    #[must_use]
    pub fn knight_defender_at(&self, sq: Square) -> bool {
        self.knight_attack(sq, None) > 0 && self.king_attack(sq) > 0
    }

    #[must_use]
    pub fn knight_defender(&self) -> i32 {
        self.fold(|pos, sq| i32::from(pos.knight_defender_at(sq)))
    }
}
