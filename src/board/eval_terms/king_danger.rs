//! King danger and the king safety term.
//!
//! King danger is kept in half units: pawn attackers shadowed by a
//! neighbour count half, so the exact value is `halves / 2`. Every scaling
//! division truncates toward zero.

use crate::board::state::Position;

use super::king_safety::SafeChecks;
use super::observer::{EvalObserver, NoopObserver};
use super::shelter::Shelter;
use super::tables::{
    BLOCKER_WEIGHT, FLANK_ATTACK_MG, FLANK_DEFENSE_WEIGHT, KING_ATTACKS_WEIGHT,
    KING_DANGER_BASE, KING_DANGER_THRESHOLD, KING_PAWN_DISTANCE_EG, KNIGHT_DEFENDER_WEIGHT,
    NO_QUEEN_WEIGHT, PAWNLESS_FLANK_EG, PAWNLESS_FLANK_MG, UNSAFE_CHECK_WEIGHT,
    WEAK_SQUARE_WEIGHT,
};

/// Every input of the king danger formula.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KingDangerTerms {
    /// King attacker half units.
    pub attackers_count: i32,
    pub attackers_weight: i32,
    pub king_attacks: i32,
    pub weak_squares: i32,
    /// They have a knight next to their own king.
    pub knight_defender: bool,
    pub unsafe_checks: i32,
    pub blockers: i32,
    pub flank_attack: i32,
    pub flank_defense: i32,
    pub no_queen: bool,
    pub shelter_strength: i32,
    pub shelter_storm: i32,
    /// Midgame mobility bonus of our pieces.
    pub mobility: i32,
    /// Midgame mobility bonus of their pieces.
    pub their_mobility: i32,
    pub safe_checks: SafeChecks,
}

impl KingDangerTerms {
    /// Raw danger in half units, before the threshold.
    #[must_use]
    pub fn halves(&self) -> i32 {
        let whole = KING_ATTACKS_WEIGHT * self.king_attacks
            + WEAK_SQUARE_WEIGHT * self.weak_squares
            - KNIGHT_DEFENDER_WEIGHT * i32::from(self.knight_defender)
            + UNSAFE_CHECK_WEIGHT * self.unsafe_checks
            + BLOCKER_WEIGHT * self.blockers
            - FLANK_DEFENSE_WEIGHT * self.flank_defense
            + 3 * self.flank_attack * self.flank_attack / 8
            - NO_QUEEN_WEIGHT * i32::from(self.no_queen)
            - 6 * (self.shelter_strength - self.shelter_storm) / 8
            + self.mobility
            - self.their_mobility
            + KING_DANGER_BASE
            + self.safe_checks.bonus();
        self.attackers_count * self.attackers_weight + 2 * whole
    }

    /// Danger with everything at or below the threshold dropped.
    #[must_use]
    pub fn danger(&self) -> KingDanger {
        let halves = self.halves();
        KingDanger {
            halves: if halves > KING_DANGER_THRESHOLD { halves } else { 0 },
        }
    }
}

/// King danger, stored in half units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KingDanger {
    halves: i32,
}

impl KingDanger {
    #[inline]
    #[must_use]
    pub const fn halves(self) -> i32 {
        self.halves
    }

    /// Exact danger value.
    #[must_use]
    pub fn value(self) -> f64 {
        f64::from(self.halves) / 2.0
    }

    /// `danger² / 4096`, truncated.
    #[must_use]
    pub fn mg_penalty(self) -> i32 {
        let halves = i64::from(self.halves);
        // danger² / 4096 == halves² / (4 * 4096)
        (halves * halves / 16_384) as i32
    }

    /// `danger / 16`, truncated.
    #[must_use]
    pub const fn eg_penalty(self) -> i32 {
        self.halves / 32
    }
}

impl Position {
    /// Inputs of the king danger formula against their king.
    #[must_use]
    pub fn king_danger_terms(&self) -> KingDangerTerms {
        self.king_danger_terms_for(&self.shelter())
    }

    fn king_danger_terms_for(&self, shelter: &Shelter) -> KingDangerTerms {
        let flipped = self.flip();
        let safe_checks = self.safe_checks();
        KingDangerTerms {
            attackers_count: self.king_attackers_count(),
            attackers_weight: self.king_attackers_weight(),
            king_attacks: self.king_attacks(),
            weak_squares: self.weak_bonus(),
            knight_defender: flipped.knight_defender() > 0,
            unsafe_checks: self
                .fold(|pos, sq| i32::from(pos.unsafe_check_with(&safe_checks, sq))),
            blockers: self.blockers_for_king(),
            flank_attack: self.flank_attack(),
            flank_defense: self.flank_defense(),
            no_queen: self.queen_count() == 0,
            shelter_strength: shelter.strength,
            shelter_storm: shelter.storm,
            mobility: self.mobility_mg(),
            their_mobility: flipped.mobility_mg(),
            safe_checks,
        }
    }

    #[must_use]
    pub fn king_danger(&self) -> KingDanger {
        self.king_danger_terms().danger()
    }

    /// King safety term `(mg, eg)` against their king.
    #[must_use]
    pub fn king(&self) -> (i32, i32) {
        self.king_with(&mut NoopObserver)
    }

    pub(crate) fn king_with<O: EvalObserver>(&self, observer: &mut O) -> (i32, i32) {
        let shelter = self.shelter_with(observer);
        let terms = self.king_danger_terms_for(&shelter);
        let danger = terms.danger();
        let pawnless = i32::from(self.pawnless_flank());

        let mg = -shelter.strength
            + shelter.storm
            + danger.mg_penalty()
            + FLANK_ATTACK_MG * terms.flank_attack
            + PAWNLESS_FLANK_MG * pawnless;
        let eg = -KING_PAWN_DISTANCE_EG * self.king_pawn_distance()
            + shelter.storm_eg
            + PAWNLESS_FLANK_EG * pawnless
            + danger.eg_penalty();
        (mg, eg)
    }

    #[must_use]
    pub fn king_mg(&self) -> i32 {
        self.king().0
    }

    #[must_use]
    pub fn king_eg(&self) -> i32 {
        self.king().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_position(fen: &str) -> Position {
        fen.parse().expect("valid fen")
    }

    #[test]
    fn test_bare_kings_have_no_danger() {
        let pos = make_position("7k/8/8/8/8/8/8/K7 w - - 0 1");
        let terms = pos.king_danger_terms();
        assert!(terms.no_queen);
        assert_eq!(terms.flank_defense, 3);
        assert_eq!(pos.king_danger().halves(), 0);
        assert_eq!(pos.king(), (196, 4));
    }

    #[test]
    fn test_lone_rook_danger() {
        let pos = make_position("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let terms = pos.king_danger_terms();
        assert_eq!(terms.safe_checks.rook, 1);
        assert_eq!(terms.flank_defense, 5);
        assert_eq!(terms.shelter_strength, -83);
        assert_eq!(terms.shelter_storm, -36);
        assert_eq!(terms.mobility, 41);

        let danger = pos.king_danger();
        assert_eq!(danger.halves(), 608);
        assert!((danger.value() - 304.0).abs() < f64::EPSILON);
        assert_eq!(danger.mg_penalty(), 22);
        assert_eq!(danger.eg_penalty(), 19);
        assert_eq!(pos.king_mg(), 86);
        assert_eq!(pos.king_eg(), 23);
    }

    #[test]
    fn test_no_queen_penalty() {
        let pos = make_position("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let terms = pos.king_danger_terms();
        let with_queen = KingDangerTerms {
            no_queen: false,
            ..terms
        };
        assert_eq!(with_queen.halves() - terms.halves(), 2 * NO_QUEEN_WEIGHT);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let above = KingDangerTerms {
            mobility: 64,
            ..KingDangerTerms::default()
        };
        assert_eq!(above.halves(), 2 * (37 + 64));
        assert_eq!(above.danger().halves(), 202);

        let at = KingDangerTerms {
            mobility: 63,
            ..KingDangerTerms::default()
        };
        assert_eq!(at.halves(), 200);
        assert_eq!(at.danger().halves(), 0);
    }

    #[test]
    fn test_half_unit_attackers() {
        let terms = KingDangerTerms {
            attackers_count: 3,
            attackers_weight: 81,
            ..KingDangerTerms::default()
        };
        // 1.5 attackers * 81 = 121.5, plus the base.
        assert_eq!(terms.halves(), 243 + 2 * 37);
    }

    #[test]
    fn test_shelter_scaling_truncates_toward_zero() {
        let terms = KingDangerTerms {
            shelter_strength: 0,
            shelter_storm: 5,
            ..KingDangerTerms::default()
        };
        // -(6 * -5 / 8) == 3, not 4.
        assert_eq!(terms.halves(), 2 * (37 + 3));
    }
}
