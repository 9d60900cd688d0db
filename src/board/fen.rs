use std::fmt;
use std::str::FromStr;

use super::error::{FenError, PositionError};
use super::{CastlingRights, Cell, Color, Piece, Position, Square};

impl Position {
    /// Parse a position from FEN notation.
    ///
    /// The halfmove clock and fullmove number are optional and default to
    /// `0` and `1`. Returns an error if the FEN string is invalid or
    /// describes an invalid position.
    pub fn try_from_fen(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() < 4 {
            return Err(FenError::TooFewParts { found: parts.len() });
        }

        let mut squares = [[Cell::Empty; 8]; 8];
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidRank { rank: ranks.len() });
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let mut file = 0;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                } else {
                    let color = if c.is_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let piece = Piece::from_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    if file >= 8 {
                        return Err(FenError::TooManyFiles {
                            rank: rank_idx,
                            files: file + 1,
                        });
                    }
                    squares[7 - rank_idx][file] = Cell::Occupied(color, piece);
                    file += 1;
                }
            }
            if file > 8 {
                return Err(FenError::TooManyFiles {
                    rank: rank_idx,
                    files: file,
                });
            }
            if file < 8 {
                return Err(FenError::Position(PositionError::GridDimensions {
                    rows: 8,
                    columns: file,
                }));
            }
        }

        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        let mut castling = CastlingRights::none();
        for c in parts[2].chars() {
            match c {
                'K' => castling.set(Color::White, true),
                'Q' => castling.set(Color::White, false),
                'k' => castling.set(Color::Black, true),
                'q' => castling.set(Color::Black, false),
                '-' => {}
                _ => return Err(FenError::InvalidCastling { char: c }),
            }
        }

        let en_passant = if parts[3] == "-" {
            None
        } else {
            Some(
                parts[3]
                    .parse::<Square>()
                    .map_err(|_| FenError::InvalidEnPassant {
                        found: parts[3].to_string(),
                    })?,
            )
        };

        let halfmove_clock = parse_counter(parts.get(4), 0)?;
        let fullmove_number = parse_counter(parts.get(5), 1)?;

        Position::new(
            squares,
            castling,
            en_passant,
            side_to_move,
            halfmove_clock,
            fullmove_number,
        )
        .map_err(FenError::from)
    }

    /// Parse a position from FEN notation.
    ///
    /// # Panics
    /// Panics if the FEN string is invalid. Use `try_from_fen` for fallible parsing.
    #[must_use]
    pub fn from_fen(fen: &str) -> Self {
        Self::try_from_fen(fen).expect("Invalid FEN string")
    }

    /// Convert the position to FEN notation.
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut rows: Vec<String> = Vec::new();
        for rank in (0..8).rev() {
            let mut row = String::new();
            let mut empty = 0;
            for file in 0..8 {
                if let Cell::Occupied(color, piece) = self.cell(Square(rank, file)) {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.to_fen_char(color));
                } else {
                    empty += 1;
                }
            }
            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            rows.push(row);
        }

        let active = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        let castling: String = self
            .castling
            .flags()
            .iter()
            .zip(['K', 'Q', 'k', 'q'])
            .filter_map(|(&set, c)| set.then_some(c))
            .collect();
        let castling = if castling.is_empty() {
            "-".to_string()
        } else {
            castling
        };
        let ep = self
            .en_passant
            .map_or_else(|| "-".to_string(), |sq| sq.to_string());

        format!(
            "{} {} {} {} {} {}",
            rows.join("/"),
            active,
            castling,
            ep,
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

fn parse_counter(field: Option<&&str>, default: u32) -> Result<u32, FenError> {
    match field {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| FenError::InvalidCounter {
            found: (*text).to_string(),
        }),
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::try_from_fen(s)
    }
}

impl fmt::Display for Position {
    /// Eight grid rows, rank 8 first, using the `-` empty code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                write!(f, "{}", self.cell(Square(rank, file)))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fen_round_trip() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        let position = Position::try_from_fen(fen).unwrap();
        assert_eq!(position.to_fen(), fen);
    }

    #[test]
    fn test_fen_black_to_move() {
        let fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1";
        let position = Position::try_from_fen(fen).unwrap();
        assert_eq!(position.side_to_move(), Color::Black);
        assert_eq!(position.en_passant(), Some(Square(2, 4)));
    }

    #[test]
    fn test_fen_error_too_few_parts() {
        let result = Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w");
        assert!(matches!(result, Err(FenError::TooFewParts { .. })));
    }

    #[test]
    fn test_fen_error_invalid_piece() {
        let result =
            Position::try_from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidPiece { char: 'x' })));
    }

    #[test]
    fn test_fen_error_rank_count() {
        let result = Position::try_from_fen("4k3/8/8/8/8/8/4K3 w - - 0 1");
        assert!(matches!(result, Err(FenError::InvalidRank { rank: 7 })));
    }

    #[test]
    fn test_fen_error_too_many_files() {
        let result = Position::try_from_fen("4k3/8/8/8/8/8/8/4K4 w - - 0 1");
        assert!(matches!(result, Err(FenError::TooManyFiles { rank: 7, .. })));
    }

    #[test]
    fn test_fen_error_short_rank() {
        let result = Position::try_from_fen("4k2/8/8/8/3/8/8/4K3 w - - 0 1");
        assert_eq!(
            result,
            Err(FenError::Position(PositionError::GridDimensions {
                rows: 8,
                columns: 7
            }))
        );

        let result = Position::try_from_fen("4k3/8/8/8//8/8/4K3 w - - 0 1");
        assert_eq!(
            result,
            Err(FenError::Position(PositionError::GridDimensions {
                rows: 8,
                columns: 0
            }))
        );
    }

    #[test]
    fn test_fen_error_invalid_side_to_move() {
        let result =
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidSideToMove { .. })));
    }

    #[test]
    fn test_fen_error_invalid_castling() {
        let result =
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1");
        assert!(matches!(result, Err(FenError::InvalidCastling { char: 'X' })));
    }

    #[test]
    fn test_fen_error_invalid_en_passant() {
        let result =
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1");
        assert!(matches!(result, Err(FenError::InvalidEnPassant { .. })));
    }

    #[test]
    fn test_fen_error_invalid_counter() {
        let result = Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 w - - x 1");
        assert!(matches!(result, Err(FenError::InvalidCounter { .. })));
    }

    #[test]
    fn test_fen_error_wraps_position_errors() {
        let result = Position::try_from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(
            result,
            Err(FenError::Position(PositionError::KingCount {
                color: Color::Black,
                found: 0
            }))
        );

        let result = Position::try_from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1");
        assert!(matches!(
            result,
            Err(FenError::Position(
                PositionError::CastlingWithoutPieces { .. }
            ))
        ));
    }

    #[test]
    fn test_fen_partial_castling() {
        let position =
            Position::try_from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1")
                .unwrap();
        assert_eq!(position.castling().flags(), [true, false, false, true]);
    }

    #[test]
    fn test_counters_default_and_parse() {
        let position = Position::try_from_fen("4k3/8/8/8/8/8/8/K7 w - -").unwrap();
        assert_eq!(position.move_counters(), (0, 1));
        let position = Position::try_from_fen("4k3/8/8/8/8/8/8/K7 w - - 42 17").unwrap();
        assert_eq!(position.move_counters(), (42, 17));
    }

    #[test]
    fn test_display_grid() {
        let position: Position = "4k3/8/8/8/3P4/8/8/4K3 w - - 0 1".parse().unwrap();
        let text = position.to_string();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[0], "----k---");
        assert_eq!(rows[4], "---P----");
        assert_eq!(rows[7], "----K---");
    }
}
