use serde::Deserialize;

use chess_eval::board::{CheckKind, Position, PositionBuilder};
use chess_eval::{Color, Piece, Square};

#[derive(Deserialize)]
struct ScenarioSet {
    positions: Vec<Scenario>,
}

#[derive(Deserialize)]
struct Scenario {
    name: String,
    fen: String,
    #[serde(default)]
    pawns: Option<(i32, i32)>,
    #[serde(default)]
    king: Option<(i32, i32)>,
    #[serde(default)]
    king_mg: Option<i32>,
    /// King danger in half units.
    #[serde(default)]
    king_danger: Option<i32>,
    #[serde(default)]
    mobility: Option<(i32, i32)>,
}

#[test]
fn reference_positions() {
    let data = include_str!("data/scenarios.json");
    let set: ScenarioSet = serde_json::from_str(data).expect("invalid scenarios.json");

    for scenario in &set.positions {
        let pos = Position::try_from_fen(&scenario.fen)
            .unwrap_or_else(|err| panic!("{}: {err}", scenario.name));
        if let Some(expected) = scenario.pawns {
            assert_eq!(pos.pawns(), expected, "{} pawns", scenario.name);
        }
        if let Some(expected) = scenario.king {
            assert_eq!(pos.king(), expected, "{} king", scenario.name);
        }
        if let Some(expected) = scenario.king_mg {
            assert_eq!(pos.king_mg(), expected, "{} king mg", scenario.name);
        }
        if let Some(expected) = scenario.king_danger {
            assert_eq!(pos.king_danger().halves(), expected, "{} king danger", scenario.name);
        }
        if let Some(expected) = scenario.mobility {
            assert_eq!(pos.mobility(), expected, "{} mobility", scenario.name);
        }
    }
}

#[test]
fn scenario_kings_on_opposite_edges() {
    let pos = PositionBuilder::new()
        .piece(Square(0, 0), Color::White, Piece::King)
        .piece(Square(7, 7), Color::Black, Piece::King)
        .build()
        .expect("valid position");
    assert!(pos.pawnless_flank());
    assert!(pos.flip().pawnless_flank());
    assert_eq!(pos.pawns(), (0, 0));
    assert_eq!(pos.evaluate().pawns, (0, 0));
}

#[test]
fn scenario_single_isolated_pawn() {
    let pos = Position::from_fen("4k3/8/8/8/3P4/8/8/4K3 w - - 0 1");
    let report = pos.pawn_report_at(Square(3, 3)).expect("pawn on d4");
    assert_eq!(report.weakness.mg(), -5);
    assert!(!report.doubled);
    assert!(!pos.backward_at(Square(3, 3)));
    assert!(!pos.connected_at(Square(3, 3)));
}

#[test]
fn scenario_blocked_pawn() {
    let pos = Position::from_fen("4k3/3p4/3P4/8/8/8/8/4K3 w - - 0 1");
    assert_eq!(pos.blocked_at(Square(5, 3)).0, -11);
}

#[test]
fn scenario_no_queens() {
    let pos = Position::from_fen("r3k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    let terms = pos.king_danger_terms();
    assert!(terms.no_queen);
    assert_eq!(terms.safe_checks.queen, 0);
    assert_eq!(pos.safe_check(CheckKind::Queen), 0);
}

#[test]
fn invalid_positions_are_rejected() {
    assert!(Position::try_from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
    assert!(Position::try_from_fen("4k3/8/8/8/8/8/8/4K2K w - - 0 1").is_err());
    assert!(Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1").is_err());
    assert!(Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - e3 0 1").is_err());
    assert!(Position::try_from_fen("4k2/8/8/8/3/8/8/4K3 w - - 0 1").is_err());
    assert!(PositionBuilder::new()
        .from_grid(&["--------"; 7])
        .is_err());
}
