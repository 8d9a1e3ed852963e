//! Board state and move application
//!
//! [`Board`] owns the 8x8 grid, the per-variant piece counts, the side to
//! move and the continuation square of an unfinished capture chain. It is
//! only ever mutated through [`Board::apply`], which accepts nothing outside
//! the current legal set.

use tracing::trace;

use crate::constants::{BOARD_SIZE, PIECES_PER_SIDE};
use crate::error::{EngineError, EngineResult};
use crate::move_gen;
use crate::types::{Move, Piece, Position, Side};

type Grid = [[Option<Piece>; BOARD_SIZE as usize]; BOARD_SIZE as usize];

/// Complete game position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: Grid,
    counts: [u32; 4],
    side_to_move: Side,
    continuation: Option<Position>,
    local_side: Side,
}

impl Board {
    /// Standard starting layout, Dark to move
    ///
    /// `local_side` is the side of the local viewer. It orients
    /// [`Board::heuristic`] and answers [`Board::is_local_turn`].
    pub fn new(local_side: Side) -> Self {
        let mut board = Board::empty(local_side);
        for pos in Position::all().filter(|p| p.is_playable()) {
            match pos.row {
                0..=2 => board.place(pos, Piece::LightPawn),
                5..=7 => board.place(pos, Piece::DarkPawn),
                _ => {}
            }
        }
        debug_assert_eq!(board.count(Piece::DarkPawn), PIECES_PER_SIDE);
        debug_assert_eq!(board.count(Piece::LightPawn), PIECES_PER_SIDE);
        board
    }

    /// Board without pieces, Dark to move
    pub fn empty(local_side: Side) -> Self {
        Board {
            grid: [[None; BOARD_SIZE as usize]; BOARD_SIZE as usize],
            counts: [0; 4],
            side_to_move: Side::Dark,
            continuation: None,
            local_side,
        }
    }

    /// Builder for custom positions
    pub fn with_pieces(
        local_side: Side,
        side_to_move: Side,
        pieces: &[(Position, Piece)],
    ) -> EngineResult<Self> {
        let mut board = Board::empty(local_side);
        board.side_to_move = side_to_move;
        for &(pos, piece) in pieces {
            if !pos.is_on_board() {
                return Err(EngineError::InvalidSquare {
                    row: pos.row,
                    col: pos.col,
                });
            }
            board.remove(pos);
            board.place(pos, piece);
        }
        Ok(board)
    }

    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        self.grid[pos.row as usize][pos.col as usize]
    }

    /// Live count of one piece variant
    #[inline]
    pub fn count(&self, piece: Piece) -> u32 {
        self.counts[piece.index()]
    }

    /// Pawns plus kings of a side
    pub fn pieces_of(&self, side: Side) -> u32 {
        self.count(side.pawn()) + self.count(side.king())
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    #[inline]
    pub fn is_side_to_move(&self, side: Side) -> bool {
        self.side_to_move == side
    }

    #[inline]
    pub fn local_side(&self) -> Side {
        self.local_side
    }

    /// True when the local viewer is to move
    #[inline]
    pub fn is_local_turn(&self) -> bool {
        self.is_side_to_move(self.local_side)
    }

    /// Square a capture chain must continue from, if one is in progress
    #[inline]
    pub fn continuation(&self) -> Option<Position> {
        self.continuation
    }

    /// All legal moves for the side to move
    pub fn legal_moves(&self) -> Vec<Move> {
        move_gen::legal_moves(self)
    }

    /// Legal moves for the piece on `from`
    pub fn legal_moves_from(&self, from: Position) -> Vec<Move> {
        move_gen::legal_moves_from(self, from)
    }

    pub fn is_legal(&self, mv: &Move) -> bool {
        mv.from.is_on_board() && self.legal_moves_from(mv.from).contains(mv)
    }

    /// Apply a legal move
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::IllegalMove`] if `mv` is not among
    /// [`Board::legal_moves_from`] for its source. The board is unchanged in
    /// that case.
    pub fn apply(&mut self, mv: Move) -> EngineResult<()> {
        if !self.is_legal(&mv) {
            return Err(EngineError::IllegalMove { mv });
        }
        self.apply_unchecked(mv);
        Ok(())
    }

    /// Apply a move already known to be legal
    pub(crate) fn apply_unchecked(&mut self, mv: Move) {
        let Some(piece) = self.remove(mv.from) else {
            return;
        };
        self.place(mv.to, piece);

        if let Some(skip) = mv.skip {
            self.remove(skip);
        }

        if !piece.is_king() && mv.to.row == piece.side().promotion_row() {
            self.remove(mv.to);
            self.place(mv.to, piece.promoted());
            trace!("promoted {:?} on {}", piece, mv.to);
        }

        let can_chain = mv.is_capture() && !move_gen::captures_from(self, mv.to).is_empty();
        if can_chain {
            self.continuation = Some(mv.to);
        } else {
            self.continuation = None;
            self.side_to_move = self.side_to_move.opponent();
        }
    }

    /// The side to move has no legal moves
    pub fn is_terminal(&self) -> bool {
        self.legal_moves().is_empty()
    }

    /// Winner of a finished game
    ///
    /// The side to move loses when it cannot move; otherwise there is no
    /// winner yet.
    pub fn winner(&self) -> Option<Side> {
        self.is_terminal().then(|| self.side_to_move.opponent())
    }

    fn place(&mut self, pos: Position, piece: Piece) {
        self.grid[pos.row as usize][pos.col as usize] = Some(piece);
        self.counts[piece.index()] += 1;
    }

    fn remove(&mut self, pos: Position) -> Option<Piece> {
        let piece = self.grid[pos.row as usize][pos.col as usize].take()?;
        self.counts[piece.index()] -= 1;
        Some(piece)
    }
}
