//! Pawn structure evaluation.
//!
//! Classifies each of our pawns (isolated, backward, doubled, connected,
//! blocked and so on) and sums the per-pawn deltas. Every predicate is
//! false, or zero, for a square without one of our pawns.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::state::Position;
use crate::board::types::{Color, Piece, Square};

use super::helpers::{THEM, US};
use super::observer::{EvalObserver, NoopObserver};
use super::tables::{
    BACKWARD_EG, BACKWARD_MG, BLOCKED_RANK5, BLOCKED_RANK6, CONNECTED_SEED, DOUBLED_EG,
    DOUBLED_ISOLATED_EG, DOUBLED_ISOLATED_MG, DOUBLED_MG, ISOLATED_EG, ISOLATED_MG,
    SUPPORTED_BONUS, WEAK_LEVER_EG, WEAK_UNOPPOSED_EG, WEAK_UNOPPOSED_MG,
};

/// The exclusive weakness class of a pawn, in priority order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PawnWeakness {
    #[default]
    None,
    DoubledIsolated,
    Isolated,
    Backward,
}

impl PawnWeakness {
    #[must_use]
    pub const fn mg(self) -> i32 {
        match self {
            PawnWeakness::None => 0,
            PawnWeakness::DoubledIsolated => DOUBLED_ISOLATED_MG,
            PawnWeakness::Isolated => ISOLATED_MG,
            PawnWeakness::Backward => BACKWARD_MG,
        }
    }

    #[must_use]
    pub const fn eg(self) -> i32 {
        match self {
            PawnWeakness::None => 0,
            PawnWeakness::DoubledIsolated => DOUBLED_ISOLATED_EG,
            PawnWeakness::Isolated => ISOLATED_EG,
            PawnWeakness::Backward => BACKWARD_EG,
        }
    }
}

/// Everything the pawn term knows about one of our pawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PawnReport {
    pub square: Square,
    pub weakness: PawnWeakness,
    pub doubled: bool,
    /// Connected bonus, 0 when the pawn is not connected.
    pub connected_bonus: i32,
    pub weak_unopposed: bool,
    pub weak_lever: bool,
    /// Blocked penalty `(mg, eg)`.
    pub blocked: (i32, i32),
}

impl PawnReport {
    #[must_use]
    pub fn mg(&self) -> i32 {
        self.weakness.mg()
            + i32::from(self.doubled) * DOUBLED_MG
            + self.connected_bonus
            + i32::from(self.weak_unopposed) * WEAK_UNOPPOSED_MG
            + self.blocked.0
    }

    /// Endgame delta; the connected bonus scales with the rank, truncated.
    #[must_use]
    pub fn eg(&self) -> i32 {
        let rank = self.square.rank() as i32 + 1;
        self.weakness.eg()
            + i32::from(self.doubled) * DOUBLED_EG
            + self.connected_bonus * (rank - 3) / 4
            + i32::from(self.weak_unopposed) * WEAK_UNOPPOSED_EG
            + i32::from(self.weak_lever) * WEAK_LEVER_EG
            + self.blocked.1
    }
}

impl Position {
    #[inline]
    fn pawn_of(&self, color: Color, file: i32, rank: i32) -> bool {
        self.at(file, rank).is(color, Piece::Pawn)
    }

    fn our_pawn_at(&self, sq: Square) -> Option<(i32, i32)> {
        self.cell(sq).is(US, Piece::Pawn).then(|| sq.coords())
    }

    fn pawn_on_file(&self, color: Color, file: i32, ranks: impl IntoIterator<Item = i32>) -> bool {
        ranks.into_iter().any(|r| self.pawn_of(color, file, r))
    }

    /// No pawn of ours on either neighbouring file.
    #[must_use]
    pub fn isolated_at(&self, sq: Square) -> bool {
        let Some((file, _)) = self.our_pawn_at(sq) else {
            return false;
        };
        !self.pawn_on_file(US, file - 1, 0..8) && !self.pawn_on_file(US, file + 1, 0..8)
    }

    /// No pawn of ours level with or behind it on a neighbouring file, and
    /// their pawns stop or guard the square in front.
    #[must_use]
    pub fn backward_at(&self, sq: Square) -> bool {
        let Some((file, rank)) = self.our_pawn_at(sq) else {
            return false;
        };
        if self.pawn_on_file(US, file - 1, 0..=rank) || self.pawn_on_file(US, file + 1, 0..=rank) {
            return false;
        }
        self.pawn_of(THEM, file - 1, rank + 2)
            || self.pawn_of(THEM, file + 1, rank + 2)
            || self.pawn_of(THEM, file, rank + 1)
    }

    /// Isolated with a pawn of ours behind it and one of theirs in front on
    /// the file, and no pawn of theirs on the neighbouring files.
    #[must_use]
    pub fn doubled_isolated_at(&self, sq: Square) -> bool {
        if !self.isolated_at(sq) {
            return false;
        }
        let (file, rank) = sq.coords();
        self.pawn_on_file(US, file, 0..rank)
            && self.pawn_on_file(THEM, file, rank + 1..8)
            && !self.pawn_on_file(THEM, file - 1, 0..8)
            && !self.pawn_on_file(THEM, file + 1, 0..8)
    }

    /// A pawn of ours directly behind, and neither neighbour behind that
    /// could support it.
    #[must_use]
    pub fn doubled_at(&self, sq: Square) -> bool {
        let Some((file, rank)) = self.our_pawn_at(sq) else {
            return false;
        };
        self.pawn_of(US, file, rank - 1) && self.supported_at(sq) == 0
    }

    /// Number of our pawns defending it, 0 to 2.
    #[must_use]
    pub fn supported_at(&self, sq: Square) -> i32 {
        let Some((file, rank)) = self.our_pawn_at(sq) else {
            return 0;
        };
        i32::from(self.pawn_of(US, file - 1, rank - 1))
            + i32::from(self.pawn_of(US, file + 1, rank - 1))
    }

    /// A pawn of ours beside it on the same rank.
    #[must_use]
    pub fn phalanx_at(&self, sq: Square) -> bool {
        let Some((file, rank)) = self.our_pawn_at(sq) else {
            return false;
        };
        self.pawn_of(US, file - 1, rank) || self.pawn_of(US, file + 1, rank)
    }

    #[must_use]
    pub fn connected_at(&self, sq: Square) -> bool {
        self.supported_at(sq) > 0 || self.phalanx_at(sq)
    }

    /// A pawn of theirs somewhere in front on the same file.
    #[must_use]
    pub fn opposed_at(&self, sq: Square) -> bool {
        let Some((file, rank)) = self.our_pawn_at(sq) else {
            return false;
        };
        self.pawn_on_file(THEM, file, rank + 1..8)
    }

    #[must_use]
    pub fn connected_bonus_at(&self, sq: Square) -> i32 {
        if !self.connected_at(sq) {
            return 0;
        }
        let rank = sq.rank() + 1;
        if !(2..=7).contains(&rank) {
            return 0;
        }
        let seed = CONNECTED_SEED[rank - 1];
        let phalanx = i32::from(self.phalanx_at(sq));
        let opposed = i32::from(self.opposed_at(sq));
        seed * (2 + phalanx - opposed) + SUPPORTED_BONUS * self.supported_at(sq)
    }

    /// Unopposed and either isolated or backward.
    #[must_use]
    pub fn weak_unopposed_at(&self, sq: Square) -> bool {
        self.our_pawn_at(sq).is_some()
            && !self.opposed_at(sq)
            && (self.isolated_at(sq) || self.backward_at(sq))
    }

    /// Attacked by two of their pawns and defended by none of ours.
    #[must_use]
    pub fn weak_lever_at(&self, sq: Square) -> bool {
        let Some((file, rank)) = self.our_pawn_at(sq) else {
            return false;
        };
        self.pawn_of(THEM, file - 1, rank + 1)
            && self.pawn_of(THEM, file + 1, rank + 1)
            && self.supported_at(sq) == 0
    }

    /// Penalty `(mg, eg)` for a pawn on the 5th or 6th rank stopped by a
    /// pawn of theirs.
    #[must_use]
    pub fn blocked_at(&self, sq: Square) -> (i32, i32) {
        let Some((file, rank)) = self.our_pawn_at(sq) else {
            return (0, 0);
        };
        if !self.pawn_of(THEM, file, rank + 1) {
            return (0, 0);
        }
        match rank {
            5 => BLOCKED_RANK6,
            4 => BLOCKED_RANK5,
            _ => (0, 0),
        }
    }

    fn pawn_weakness_at(&self, sq: Square) -> PawnWeakness {
        if self.doubled_isolated_at(sq) {
            PawnWeakness::DoubledIsolated
        } else if self.isolated_at(sq) {
            PawnWeakness::Isolated
        } else if self.backward_at(sq) {
            PawnWeakness::Backward
        } else {
            PawnWeakness::None
        }
    }

    /// Full classification of our pawn on `sq`.
    #[must_use]
    pub fn pawn_report_at(&self, sq: Square) -> Option<PawnReport> {
        self.our_pawn_at(sq)?;
        Some(PawnReport {
            square: sq,
            weakness: self.pawn_weakness_at(sq),
            doubled: self.doubled_at(sq),
            connected_bonus: self.connected_bonus_at(sq),
            weak_unopposed: self.weak_unopposed_at(sq),
            weak_lever: self.weak_lever_at(sq),
            blocked: self.blocked_at(sq),
        })
    }

    /// Pawn structure `(mg, eg)` of our pawns.
    #[must_use]
    pub fn pawns(&self) -> (i32, i32) {
        self.pawns_with(&mut NoopObserver)
    }

    pub(crate) fn pawns_with<O: EvalObserver>(&self, observer: &mut O) -> (i32, i32) {
        Square::all()
            .filter_map(|sq| self.pawn_report_at(sq))
            .fold((0, 0), |(mg, eg), report| {
                observer.pawn(&report);
                (mg + report.mg(), eg + report.eg())
            })
    }

    #[must_use]
    pub fn pawns_mg(&self) -> i32 {
        self.pawns().0
    }

    #[must_use]
    pub fn pawns_eg(&self) -> i32 {
        self.pawns().1
    }

    #[must_use]
    pub fn isolated(&self) -> i32 {
        self.fold(|pos, sq| i32::from(pos.isolated_at(sq)))
    }

    #[must_use]
    pub fn backward(&self) -> i32 {
        self.fold(|pos, sq| i32::from(pos.backward_at(sq)))
    }

    #[must_use]
    pub fn doubled(&self) -> i32 {
        self.fold(|pos, sq| i32::from(pos.doubled_at(sq)))
    }

    #[must_use]
    pub fn connected_bonus(&self) -> i32 {
        self.fold(Position::connected_bonus_at)
    }
}
