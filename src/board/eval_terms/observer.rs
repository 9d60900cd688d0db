//! Hooks into the evaluation.
//!
//! An [`EvalObserver`] sees intermediate results at fixed points: each pawn
//! report, each shelter candidate and each finished term. Observers only
//! watch; nothing they do feeds back into a score.

use crate::board::types::Square;

use super::pawn_structure::PawnReport;

/// Receives evaluation details. Every method defaults to doing nothing.
pub trait EvalObserver {
    /// Called once per pawn of the evaluated side.
    fn pawn(&mut self, _report: &PawnReport) {}

    /// Called for every king square considered for the shelter.
    fn shelter_candidate(&mut self, _square: Square, _strength: i32, _storm: i32) {}

    /// Called with the side-relative `(mg, eg)` of a finished term.
    fn term(&mut self, _name: &'static str, _mg: i32, _eg: i32) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl EvalObserver for NoopObserver {}

/// Observer that writes every event at `trace` level.
#[cfg(feature = "logging")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

#[cfg(feature = "logging")]
impl EvalObserver for LogObserver {
    fn pawn(&mut self, report: &PawnReport) {
        log::trace!(
            "pawn {}: {:?} mg={} eg={}",
            report.square,
            report.weakness,
            report.mg(),
            report.eg()
        );
    }

    fn shelter_candidate(&mut self, square: Square, strength: i32, storm: i32) {
        log::trace!("shelter {square}: strength={strength} storm={storm}");
    }

    fn term(&mut self, name: &'static str, mg: i32, eg: i32) {
        log::trace!("term {name}: mg={mg} eg={eg}");
    }
}
