//! Evaluation constants and tables.
//!
//! Every weight the evaluation terms use lives here.

// ============================================================================
// KING SAFETY
// ============================================================================

/// Attacker weight by piece index (`P, N, B, R, Q`).
pub const KING_ATTACKER_WEIGHTS: [i32; 5] = [0, 81, 52, 44, 10];

/// Half-units per king attacker; a pawn shadowed by a neighbour counts one half.
pub const ATTACKER_UNIT: i32 = 2;

/// Safe check bonus as `[single, several]` for knight, bishop, rook, queen.
pub const SAFE_CHECK_BONUS: [[i32; 2]; 4] = [[792, 1283], [645, 967], [1084, 1897], [772, 1119]];

pub const KING_ATTACKS_WEIGHT: i32 = 69;
pub const WEAK_SQUARE_WEIGHT: i32 = 185;
pub const KNIGHT_DEFENDER_WEIGHT: i32 = 100;
pub const UNSAFE_CHECK_WEIGHT: i32 = 148;
pub const BLOCKER_WEIGHT: i32 = 98;
pub const FLANK_DEFENSE_WEIGHT: i32 = 4;
pub const NO_QUEEN_WEIGHT: i32 = 873;
pub const KING_DANGER_BASE: i32 = 37;

/// King danger at or below this many half-units is ignored.
pub const KING_DANGER_THRESHOLD: i32 = 200;

pub const FLANK_ATTACK_MG: i32 = 8;
pub const PAWNLESS_FLANK_MG: i32 = 17;
pub const PAWNLESS_FLANK_EG: i32 = 95;
pub const KING_PAWN_DISTANCE_EG: i32 = 16;

/// Shelter weakness by `[distance from edge][pawn row]`, row 0 meaning no pawn.
pub const SHELTER_WEAKNESS: [[i32; 7]; 4] = [
    [-6, 81, 93, 58, 39, 18, 25],
    [-43, 61, 35, -49, -29, -11, -63],
    [-10, 75, 23, -2, 32, 3, -45],
    [-39, -13, -29, -52, -48, -67, -166],
];

/// Storm penalty for an unopposed advancing pawn by `[distance from edge][row]`.
pub const UNBLOCKED_STORM: [[i32; 7]; 4] = [
    [85, -289, -166, 97, 50, 45, 50],
    [46, -25, 122, 45, 37, -10, 20],
    [-6, 51, 168, 34, -2, -22, -14],
    [-15, -11, 101, 4, 11, -15, -29],
];

/// Storm penalty for a pawn rammed into a shield pawn, `[mg, eg]` by row.
pub const BLOCKED_STORM: [[i32; 7]; 2] = [[0, 0, 76, -10, -7, -4, -1], [0, 0, 78, 15, 10, 6, 2]];

pub const STRENGTH_BASE: i32 = 5;
pub const STORM_EG_BASE: i32 = 5;

// ============================================================================
// PAWN STRUCTURE
// ============================================================================

pub const DOUBLED_ISOLATED_MG: i32 = -11;
pub const DOUBLED_ISOLATED_EG: i32 = -56;
pub const ISOLATED_MG: i32 = -5;
pub const ISOLATED_EG: i32 = -15;
pub const BACKWARD_MG: i32 = -9;
pub const BACKWARD_EG: i32 = -24;
pub const DOUBLED_MG: i32 = -11;
pub const DOUBLED_EG: i32 = -56;
pub const WEAK_UNOPPOSED_MG: i32 = -13;
pub const WEAK_UNOPPOSED_EG: i32 = -27;
pub const WEAK_LEVER_EG: i32 = -56;

/// Connected pawn seed by rank 1..=7.
pub const CONNECTED_SEED: [i32; 7] = [0, 7, 8, 12, 29, 48, 86];
pub const SUPPORTED_BONUS: i32 = 21;

/// Blocked pawn penalty `(mg, eg)` on the 6th and 5th rank.
pub const BLOCKED_RANK6: (i32, i32) = (-11, -4);
pub const BLOCKED_RANK5: (i32, i32) = (-3, 4);

// ============================================================================
// MOBILITY TABLES
// ============================================================================

/// Knight mobility bonus (0-8 squares)
pub const KNIGHT_MOB_MG: [i32; 9] = [-62, -53, -12, -4, 3, 13, 22, 28, 33];
pub const KNIGHT_MOB_EG: [i32; 9] = [-81, -56, -31, -16, 5, 11, 17, 20, 25];

/// Bishop mobility bonus (0-13 squares)
pub const BISHOP_MOB_MG: [i32; 14] = [-48, -20, 16, 26, 38, 51, 55, 63, 63, 68, 81, 81, 91, 98];
pub const BISHOP_MOB_EG: [i32; 14] = [-59, -23, -3, 13, 24, 42, 54, 57, 65, 73, 78, 86, 88, 97];

/// Rook mobility bonus (0-14 squares)
pub const ROOK_MOB_MG: [i32; 15] = [-60, -20, 2, 3, 3, 11, 22, 31, 40, 40, 41, 48, 57, 57, 62];
pub const ROOK_MOB_EG: [i32; 15] = [
    -78, -17, 23, 39, 70, 99, 103, 121, 134, 139, 158, 164, 168, 169, 172,
];

/// Queen mobility bonus (0-27 squares)
pub const QUEEN_MOB_MG: [i32; 28] = [
    -30, -12, -8, -9, 20, 23, 23, 35, 38, 53, 64, 65, 65, 66, 67, 67, 72, 72, 77, 79, 93, 108, 108,
    108, 110, 114, 114, 116,
];
pub const QUEEN_MOB_EG: [i32; 28] = [
    -48, -30, -7, 19, 40, 55, 59, 75, 78, 96, 96, 100, 121, 127, 131, 133, 136, 141, 147, 150, 151,
    168, 168, 171, 182, 182, 192, 219,
];
