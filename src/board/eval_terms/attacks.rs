//! Attack and pin detection.
//!
//! Every count is "how many of our pieces hit this square". Passing
//! `from = Some(sq)` restricts the count to the piece standing on `sq`.
//! Sliders pinned to our king only count along their pin line.

use crate::board::state::Position;
use crate::board::types::{Cell, Piece, Square};

use super::helpers::{PinLine, ALL_DIRECTIONS, DIAGONALS, KNIGHT_JUMPS, ORTHOGONALS, THEM, US};

impl Position {
    /// Line along which the piece on `sq` is pinned to our king.
    ///
    /// Pieces of either color are checked against our king; returns `None`
    /// for empty squares and unpinned pieces.
    #[must_use]
    pub fn pinned_direction(&self, sq: Square) -> Option<PinLine> {
        if !matches!(self.cell(sq), Cell::Occupied(..)) {
            return None;
        }
        let (file, rank) = sq.coords();

        for &(df, dr) in &ALL_DIRECTIONS {
            let king_behind = self
                .first_occupied(file, rank, df, dr)
                .is_some_and(|cell| cell.is(US, Piece::King));
            if !king_behind {
                continue;
            }
            let diagonal = df != 0 && dr != 0;
            let pinner = self
                .first_occupied(file, rank, -df, -dr)
                .and_then(|cell| cell.piece_of(THEM))
                .is_some_and(|piece| {
                    if diagonal {
                        piece.attacks_diagonally()
                    } else {
                        piece.attacks_straight()
                    }
                });
            if pinner {
                return Some(PinLine::of(df, dr));
            }
        }
        None
    }

    /// True if our piece on `sq` is pinned.
    #[inline]
    #[must_use]
    pub fn pinned(&self, sq: Square) -> bool {
        self.cell(sq).color() == Some(US) && self.pinned_direction(sq).is_some()
    }

    /// Sum of [`Position::pinned`] over the board.
    #[must_use]
    pub fn pinned_count(&self) -> i32 {
        self.fold(|pos, sq| i32::from(pos.pinned(sq)))
    }

    /// First non-empty cell walking from `(file, rank)` in steps of `(df, dr)`.
    /// Walking off the board yields `None`.
    fn first_occupied(&self, file: i32, rank: i32, df: i32, dr: i32) -> Option<Cell> {
        (1..8)
            .map(|d| self.at(file + d * df, rank + d * dr))
            .find(|cell| !cell.is_empty())
            .filter(|&cell| cell != Cell::OffBoard)
    }

    #[inline]
    fn source_matches(from: Option<Square>, file: i32, rank: i32) -> bool {
        from.map_or(true, |sq| sq.coords() == (file, rank))
    }

    /// Our pawns attacking `sq`.
    #[must_use]
    pub fn pawn_attack(&self, sq: Square) -> i32 {
        let (file, rank) = sq.coords();
        [-1, 1]
            .iter()
            .filter(|&&df| self.at(file + df, rank - 1).is(US, Piece::Pawn))
            .count() as i32
    }

    /// 1 if our king stands next to `sq`.
    #[must_use]
    pub fn king_attack(&self, sq: Square) -> i32 {
        let (file, rank) = sq.coords();
        i32::from(
            ALL_DIRECTIONS
                .iter()
                .any(|&(df, dr)| self.at(file + df, rank + dr).is(US, Piece::King)),
        )
    }

    /// Our unpinned knights attacking `sq`.
    #[must_use]
    pub fn knight_attack(&self, sq: Square, from: Option<Square>) -> i32 {
        let (file, rank) = sq.coords();
        let mut count = 0;
        for &(df, dr) in &KNIGHT_JUMPS {
            let (f, r) = (file + df, rank + dr);
            if !self.at(f, r).is(US, Piece::Knight) || !Self::source_matches(from, f, r) {
                continue;
            }
            if Square::from_coords(f, r).is_some_and(|knight| !self.pinned(knight)) {
                count += 1;
            }
        }
        count
    }

    /// Our bishops attacking `sq`, seeing through queens of either color.
    #[must_use]
    pub fn bishop_xray_attack(&self, sq: Square, from: Option<Square>) -> i32 {
        self.slider_attack(sq, from, Piece::Bishop, &DIAGONALS, |cell| {
            cell.is_empty() || cell.is_queen()
        })
    }

    /// Our rooks attacking `sq`, seeing through our rooks and any queen.
    #[must_use]
    pub fn rook_xray_attack(&self, sq: Square, from: Option<Square>) -> i32 {
        self.slider_attack(sq, from, Piece::Rook, &ORTHOGONALS, |cell| {
            cell.is_empty() || cell.is(US, Piece::Rook) || cell.is_queen()
        })
    }

    /// Our queens attacking `sq` directly.
    #[must_use]
    pub fn queen_attack(&self, sq: Square, from: Option<Square>) -> i32 {
        self.slider_attack(sq, from, Piece::Queen, &ALL_DIRECTIONS, Cell::is_empty)
    }

    /// Walk each ray outward from `sq`, counting our `piece`s met before a
    /// cell that `see_through` rejects. A pinned slider only counts when the
    /// ray lies on its pin line.
    fn slider_attack(
        &self,
        sq: Square,
        from: Option<Square>,
        piece: Piece,
        directions: &[(i32, i32)],
        see_through: impl Fn(Cell) -> bool,
    ) -> i32 {
        let (file, rank) = sq.coords();
        let mut count = 0;
        for &(df, dr) in directions {
            for d in 1..8 {
                let (f, r) = (file + d * df, rank + d * dr);
                let cell = self.at(f, r);
                if cell.is(US, piece) && Self::source_matches(from, f, r) {
                    let pin = Square::from_coords(f, r).and_then(|s| self.pinned_direction(s));
                    if pin.map_or(true, |line| line == PinLine::of(df, dr)) {
                        count += 1;
                    }
                }
                if !see_through(cell) {
                    break;
                }
            }
        }
        count
    }

    /// Number of our pieces attacking `sq`.
    #[must_use]
    pub fn attack(&self, sq: Square) -> i32 {
        self.pawn_attack(sq)
            + self.king_attack(sq)
            + self.knight_attack(sq, None)
            + self.bishop_xray_attack(sq, None)
            + self.rook_xray_attack(sq, None)
            + self.queen_attack(sq, None)
    }

    /// Attacks on `target` by our `piece` standing on `from`.
    pub(crate) fn piece_attack(&self, piece: Piece, target: Square, from: Square) -> i32 {
        match piece {
            Piece::Knight => self.knight_attack(target, Some(from)),
            Piece::Bishop => self.bishop_xray_attack(target, Some(from)),
            Piece::Rook => self.rook_xray_attack(target, Some(from)),
            Piece::Queen => self.queen_attack(target, Some(from)),
            Piece::Pawn | Piece::King => 0,
        }
    }
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
    fn test_rook_pinned_on_file() {
        let pos = make_position("4k3/8/8/8/4r3/8/4R3/4K3 w - - 0 1");
        assert_eq!(pos.pinned_direction(sq("e2")), Some(PinLine::Vertical));
        assert!(pos.pinned(sq("e2")));
        // Pinned rook still hits along the file, not across it.
        assert_eq!(pos.rook_xray_attack(sq("e3"), None), 1);
        assert_eq!(pos.rook_xray_attack(sq("d2"), None), 0);
        assert_eq!(pos.rook_xray_attack(sq("f2"), None), 0);
    }

    #[test]
    fn test_pinned_knight_attacks_nothing() {
        let pinned = make_position("4k3/8/8/8/4r3/8/4N3/4K3 w - - 0 1");
        assert_eq!(pinned.knight_attack(sq("d4"), None), 0);
        let free = make_position("4k3/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert_eq!(free.knight_attack(sq("d4"), None), 1);
        assert_eq!(free.knight_attack(sq("d4"), Some(sq("e2"))), 1);
        assert_eq!(free.knight_attack(sq("d4"), Some(sq("e1"))), 0);
    }

    #[test]
    fn test_their_pieces_report_pin_direction() {
        // A black knight between our king and a black bishop is still on the line.
        let pos = make_position("4k3/8/8/8/8/2b5/3n4/4K3 w - - 0 1");
        assert_eq!(pos.pinned_direction(sq("d2")), Some(PinLine::AntiDiagonal));
        assert!(!pos.pinned(sq("d2")));
        assert_eq!(pos.pinned_direction(sq("d4")), None);
    }

    #[test]
    fn test_wrong_slider_does_not_pin() {
        let pos = make_position("4k3/8/8/8/4b3/8/4R3/4K3 w - - 0 1");
        assert_eq!(pos.pinned_direction(sq("e2")), None);
    }

    #[test]
    fn test_bishop_sees_through_queen() {
        let pos = make_position("4k3/8/8/8/8/2Q5/1B6/4K3 w - - 0 1");
        assert_eq!(pos.bishop_xray_attack(sq("d4"), None), 1);
        assert_eq!(pos.queen_attack(sq("d4"), None), 1);
        assert_eq!(pos.attack(sq("d4")), 2);
    }

    #[test]
    fn test_rook_sees_through_own_rook() {
        let pos = make_position("4k3/8/8/8/8/8/R1R5/4K3 w - - 0 1");
        assert_eq!(pos.rook_xray_attack(sq("d2"), None), 2);
        assert_eq!(pos.rook_xray_attack(sq("d2"), Some(sq("a2"))), 1);
    }

    #[test]
    fn test_queen_blocked_by_anything() {
        let pos = make_position("4k3/8/8/8/8/8/Q1R5/4K3 w - - 0 1");
        assert_eq!(pos.queen_attack(sq("b2"), None), 1);
        assert_eq!(pos.queen_attack(sq("d2"), None), 0);
    }

    #[test]
    fn test_pawn_and_king_attacks() {
        let pos = make_position("4k3/8/8/8/8/8/3P1P2/4K3 w - - 0 1");
        assert_eq!(pos.pawn_attack(sq("e3")), 2);
        assert_eq!(pos.pawn_attack(sq("c3")), 1);
        assert_eq!(pos.pawn_attack(sq("e2")), 0);
        assert_eq!(pos.king_attack(sq("f2")), 1);
        assert_eq!(pos.king_attack(sq("e3")), 0);
        assert_eq!(pos.attack(sq("e3")), 2);
    }

    #[test]
    fn test_attack_at_board_edge() {
        let pos = make_position("7k/8/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(pos.attack(sq("a2")), 1);
        assert_eq!(pos.attack(sq("h1")), 0);
        assert_eq!(pos.pinned_count(), 0);
    }
}
