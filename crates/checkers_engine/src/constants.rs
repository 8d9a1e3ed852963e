//! Engine constants
//!
//! Board geometry, material values and the direction tables used by move
//! generation.

/// Board edge length
pub const BOARD_SIZE: i8 = 8;

/// Number of playable (dark) squares
pub const PLAYABLE_SQUARES: u8 = 32;

/// Pawns per side in the starting layout
pub const PIECES_PER_SIDE: u32 = 12;

/// Material value of a pawn
pub const PAWN_VALUE: i32 = 2;

/// Material value of a king
pub const KING_VALUE: i32 = 3;

/// One-step diagonal offsets, (drow, dcol)
pub const STEP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Capture offsets, two squares along each diagonal
pub const JUMP_DIRECTIONS: [(i8, i8); 4] = [(2, 2), (2, -2), (-2, 2), (-2, -2)];

/// Deepest search the difficulty knob allows
pub const MAX_DEPTH: u8 = 8;

/// Shallowest search the difficulty knob allows
pub const MIN_DEPTH: u8 = 1;
