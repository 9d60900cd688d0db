//! Combined evaluation.
//!
//! Each term is computed for us and for the flipped position; the reported
//! value is the difference, so positive numbers favour White.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::state::Position;

use super::observer::{EvalObserver, NoopObserver};

/// Side-relative `(mg, eg)` of every implemented term.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EvalBreakdown {
    pub king: (i32, i32),
    pub pawns: (i32, i32),
    pub mobility: (i32, i32),
}

impl EvalBreakdown {
    /// Midgame sum of all terms.
    #[must_use]
    pub const fn mg(&self) -> i32 {
        self.king.0 + self.pawns.0 + self.mobility.0
    }

    /// Endgame sum of all terms.
    #[must_use]
    pub const fn eg(&self) -> i32 {
        self.king.1 + self.pawns.1 + self.mobility.1
    }
}

#[inline]
fn relative((us_mg, us_eg): (i32, i32), (them_mg, them_eg): (i32, i32)) -> (i32, i32) {
    (us_mg - them_mg, us_eg - them_eg)
}

impl Position {
    /// Evaluate every term for both sides.
    #[must_use]
    pub fn evaluate(&self) -> EvalBreakdown {
        self.evaluate_with(&mut NoopObserver)
    }

    /// Evaluate every term, reporting details to `observer`.
    pub fn evaluate_with<O: EvalObserver>(&self, observer: &mut O) -> EvalBreakdown {
        let flipped = self.flip();

        let king = relative(self.king_with(observer), flipped.king_with(observer));
        observer.term("king", king.0, king.1);

        let pawns = relative(self.pawns_with(observer), flipped.pawns_with(observer));
        observer.term("pawns", pawns.0, pawns.1);

        let mobility = relative(self.mobility(), flipped.mobility());
        observer.term("mobility", mobility.0, mobility.1);

        let breakdown = EvalBreakdown {
            king,
            pawns,
            mobility,
        };
        #[cfg(feature = "logging")]
        log::debug!(
            "eval {}: king={:?} pawns={:?} mobility={:?} mg={} eg={}",
            self.to_fen(),
            breakdown.king,
            breakdown.pawns,
            breakdown.mobility,
            breakdown.mg(),
            breakdown.eg()
        );
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_position(fen: &str) -> Position {
        fen.parse().expect("valid fen")
    }

    #[test]
    fn test_symmetric_position_is_balanced() {
        let pos = make_position("7k/8/8/8/8/8/8/K7 w - - 0 1");
        let eval = pos.evaluate();
        assert_eq!(eval.king, (0, 0));
        assert_eq!(eval.pawns, (0, 0));
        assert_eq!(eval.mobility, (0, 0));
        assert_eq!(eval.mg(), 0);
    }

    #[test]
    fn test_start_position_is_balanced() {
        let pos = make_position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert_eq!(pos.evaluate(), EvalBreakdown::default());
    }

    #[test]
    fn test_single_pawn_breakdown() {
        let pos = make_position("4k3/8/8/8/3P4/8/8/4K3 w - - 0 1");
        let eval = pos.evaluate();
        assert_eq!(eval.pawns, (-18, -42));
        assert_eq!(eval.mobility, (0, 0));
    }

    #[test]
    fn test_flip_negates() {
        let pos = make_position("r3k2r/ppp2ppp/2n5/3p4/3P4/2N2N2/PPP2PPP/R3K2R w KQkq - 0 1");
        let eval = pos.evaluate();
        let mirrored = pos.flip().evaluate();
        assert_eq!(eval.mg(), -mirrored.mg());
        assert_eq!(eval.eg(), -mirrored.eg());
        assert_eq!(eval.pawns.0, -mirrored.pawns.0);
    }
}
