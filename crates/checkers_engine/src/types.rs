//! # Checkers Core Types
//!
//! Value types shared by every layer of the game: the two sides, the four
//! piece variants, board squares and moves.
//!
//! ## Squares and the wire code
//!
//! Only the 32 squares with odd `row + col` are ever occupied. Those squares
//! are numbered 0-31 from the top-left corner, four per row:
//!
//! ```text
//! code = 4 * row + col / 2
//! row  = code / 4
//! col  = 2 * (code % 4) + (1 if row is even)
//! ```
//!
//! The two directions are exact inverses on playable squares. Encoding a
//! light (unplayable) square is not meaningful and the engine never does it.
//!
//! ## Moves
//!
//! A [`Move`] always carries its skipped square when it is a capture, so
//! two moves compare equal only if source, destination and skip all match.
//! [`Move::new`] derives the skip from geometry; this is also how a move
//! received over the wire is rebuilt, since the skip is never transmitted.

use std::fmt;

use crate::constants::{BOARD_SIZE, PLAYABLE_SQUARES};
use crate::error::{EngineError, EngineResult};

/// One of the two competing parties
///
/// `Dark` moves first and starts on rows 5-7; its pawns advance toward row 0.
/// `Light` starts on rows 0-2 and advances toward row 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Dark,
    Light,
}

impl Side {
    /// The other side
    pub fn opponent(self) -> Side {
        match self {
            Side::Dark => Side::Light,
            Side::Light => Side::Dark,
        }
    }

    pub fn pawn(self) -> Piece {
        match self {
            Side::Dark => Piece::DarkPawn,
            Side::Light => Piece::LightPawn,
        }
    }

    pub fn king(self) -> Piece {
        match self {
            Side::Dark => Piece::DarkKing,
            Side::Light => Piece::LightKing,
        }
    }

    /// Row direction of a pawn advance
    pub fn forward(self) -> i8 {
        match self {
            Side::Dark => -1,
            Side::Light => 1,
        }
    }

    /// Row on which this side's pawns are promoted
    pub fn promotion_row(self) -> i8 {
        match self {
            Side::Dark => 0,
            Side::Light => BOARD_SIZE - 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Dark => write!(f, "Dark"),
            Side::Light => write!(f, "Light"),
        }
    }
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    DarkPawn,
    DarkKing,
    LightPawn,
    LightKing,
}

impl Piece {
    pub const ALL: [Piece; 4] = [
        Piece::DarkPawn,
        Piece::DarkKing,
        Piece::LightPawn,
        Piece::LightKing,
    ];

    pub fn side(self) -> Side {
        match self {
            Piece::DarkPawn | Piece::DarkKing => Side::Dark,
            Piece::LightPawn | Piece::LightKing => Side::Light,
        }
    }

    pub fn is_king(self) -> bool {
        matches!(self, Piece::DarkKing | Piece::LightKing)
    }

    /// King variant of the same side (kings map to themselves)
    pub fn promoted(self) -> Piece {
        self.side().king()
    }

    /// Dense index for per-variant tables
    pub fn index(self) -> usize {
        match self {
            Piece::DarkPawn => 0,
            Piece::DarkKing => 1,
            Piece::LightPawn => 2,
            Piece::LightKing => 3,
        }
    }

    /// Single character used by text renderers
    pub fn symbol(self) -> char {
        match self {
            Piece::DarkPawn => 'd',
            Piece::DarkKing => 'D',
            Piece::LightPawn => 'l',
            Piece::LightKing => 'L',
        }
    }
}

/// A square on the board, `(row, col)` with both in `[0, 8)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    pub const fn new(row: i8, col: i8) -> Self {
        Position { row, col }
    }

    /// Checked constructor
    pub fn try_new(row: i8, col: i8) -> EngineResult<Self> {
        let pos = Position::new(row, col);
        if pos.is_on_board() {
            Ok(pos)
        } else {
            Err(EngineError::InvalidSquare { row, col })
        }
    }

    #[inline]
    pub fn is_on_board(self) -> bool {
        (0..BOARD_SIZE).contains(&self.row) && (0..BOARD_SIZE).contains(&self.col)
    }

    /// Dark square that pieces can stand on
    #[inline]
    pub fn is_playable(self) -> bool {
        self.is_on_board() && (self.row + self.col) % 2 == 1
    }

    /// Square displaced by `(drow, dcol)`, if it is still on the board
    #[inline]
    pub fn offset(self, drow: i8, dcol: i8) -> Option<Position> {
        let pos = Position::new(self.row + drow, self.col + dcol);
        pos.is_on_board().then_some(pos)
    }

    /// Wire code of a playable square
    pub fn encode(self) -> u8 {
        (4 * self.row + self.col / 2) as u8
    }

    /// Square for a wire code in `[0, 31]`
    pub fn decode(code: u8) -> EngineResult<Position> {
        if code >= PLAYABLE_SQUARES {
            return Err(EngineError::InvalidSquareCode { code });
        }
        let row = (code / 4) as i8;
        let mut col = (2 * (code % 4)) as i8;
        if row % 2 == 0 {
            col += 1;
        }
        Ok(Position::new(row, col))
    }

    /// Point reflection through the board centre (the opposite player's view)
    pub fn reflected(self) -> Position {
        Position::new(BOARD_SIZE - 1 - self.row, BOARD_SIZE - 1 - self.col)
    }

    /// Iterate every square in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A transition of one piece between two squares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    /// Jumped square; present iff this is a capture
    pub skip: Option<Position>,
}

impl Move {
    /// Build a move, deriving the skipped square for captures
    pub fn new(from: Position, to: Position) -> Self {
        let is_jump = (from.row - to.row).abs() == 2 && (from.col - to.col).abs() == 2;
        let skip = is_jump.then(|| Position::new((from.row + to.row) / 2, (from.col + to.col) / 2));
        Move { from, to, skip }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.skip.is_some()
    }

    /// Rebuild a move from two wire codes
    pub fn from_codes(from: u8, to: u8) -> EngineResult<Move> {
        Ok(Move::new(Position::decode(from)?, Position::decode(to)?))
    }

    /// Wire codes of source and destination
    pub fn to_codes(&self) -> [u8; 2] {
        [self.from.encode(), self.to.encode()]
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}
