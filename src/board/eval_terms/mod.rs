//! Static evaluation terms.
//!
//! Every term scores the position for White (uppercase, "us") against
//! Black ("them"); the opponent's view is the same formula applied to
//! [`Position::flip`](crate::board::Position::flip). Contains:
//! - Attack and pin detection
//! - King safety (king ring, attackers, checks, flanks, shelter and storm)
//! - King danger and the king term
//! - Pawn structure (isolated, backward, doubled, connected, blocked pawns)
//! - Mobility
//! - The combined breakdown and its observer hooks

mod attacks;
mod combined;
mod helpers;
mod king_danger;
mod king_safety;
mod mobility;
mod observer;
mod pawn_structure;
mod shelter;
pub mod tables;

pub use combined::EvalBreakdown;
pub use helpers::PinLine;
pub use king_danger::{KingDanger, KingDangerTerms};
pub use king_safety::{CheckKind, SafeChecks};
#[cfg(feature = "logging")]
pub use observer::LogObserver;
pub use observer::{EvalObserver, NoopObserver};
pub use pawn_structure::{PawnReport, PawnWeakness};
pub use shelter::Shelter;
