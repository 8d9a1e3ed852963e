//! Where moves come from
//!
//! The turn loop asks a [`MoveSource`] for each move of its side:
//!
//! - [`LocalInput`] - moves picked by the local player, delivered through a
//!   [`MoveSelector`] handle held by the front-end
//! - [`AiOpponent`] - engine search on a blocking worker thread
//! - [`RemoteOpponent`] - move messages from the peer connection
//!
//! Sources only produce candidate moves. They never touch the live board;
//! the turn loop validates and applies every move itself.

use async_trait::async_trait;
use checkers_engine::{api, Board, Move};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::game::ai::AiPlayer;
use crate::game::error::{GameError, GameResult};
use crate::networking::{PeerConnection, Profile};

/// Capacity of the local move channel
const SELECTOR_CAPACITY: usize = 8;

#[async_trait]
pub trait MoveSource: Send {
    /// Next move for the side to move on `board`
    async fn next_move(&mut self, board: &Board) -> GameResult<Move>;

    /// Called with every move made by the other side, before it is applied
    async fn observe(&mut self, _mv: &Move) -> GameResult<()> {
        Ok(())
    }

    /// Name of the player behind this source
    fn name(&self) -> &str;
}

/// Front-end handle for submitting local moves
#[derive(Debug, Clone)]
pub struct MoveSelector {
    tx: mpsc::Sender<Move>,
}

impl MoveSelector {
    /// Submit a move; fails once the game has ended
    pub async fn select(&self, mv: Move) -> GameResult<()> {
        self.tx.send(mv).await.map_err(|_| GameError::InputClosed)
    }

    /// Submit from synchronous code (e.g. a stdin reader thread)
    pub fn blocking_select(&self, mv: Move) -> GameResult<()> {
        self.tx.blocking_send(mv).map_err(|_| GameError::InputClosed)
    }
}

/// Moves chosen by the local player
#[derive(Debug)]
pub struct LocalInput {
    name: String,
    rx: mpsc::Receiver<Move>,
}

impl LocalInput {
    /// Input source plus the handle that feeds it
    pub fn new(name: impl Into<String>) -> (MoveSelector, LocalInput) {
        let (tx, rx) = mpsc::channel(SELECTOR_CAPACITY);
        (
            MoveSelector { tx },
            LocalInput {
                name: name.into(),
                rx,
            },
        )
    }
}

#[async_trait]
impl MoveSource for LocalInput {
    async fn next_move(&mut self, _board: &Board) -> GameResult<Move> {
        self.rx.recv().await.ok_or(GameError::InputClosed)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Computer opponent
#[derive(Debug, Clone)]
pub struct AiOpponent {
    player: AiPlayer,
}

impl AiOpponent {
    pub fn new(player: AiPlayer) -> Self {
        Self { player }
    }

    pub fn profile(&self) -> &Profile {
        &self.player.profile
    }
}

#[async_trait]
impl MoveSource for AiOpponent {
    async fn next_move(&mut self, board: &Board) -> GameResult<Move> {
        let depth = self.player.difficulty.depth();
        let position = board.clone();
        let result = tokio::task::spawn_blocking(move || api::reply(&position, depth))
            .await
            .map_err(|e| GameError::SearchFailed {
                message: e.to_string(),
            })?;

        debug!(
            "[AI] depth {} visited {} nodes, {} cutoffs, score {:?}",
            depth, result.stats.nodes, result.stats.cutoffs, result.score
        );

        let mv = result.best_move.ok_or_else(|| GameError::SearchFailed {
            message: "no legal move to choose".to_string(),
        })?;
        info!("[AI] {} plays {}", self.player.profile.username, mv);
        Ok(mv)
    }

    fn name(&self) -> &str {
        &self.player.profile.username
    }
}

/// Player on the other end of a peer connection
#[derive(Debug)]
pub struct RemoteOpponent {
    conn: PeerConnection,
    profile: Profile,
}

impl RemoteOpponent {
    /// Wrap a connection whose opening handshake is complete
    pub fn new(conn: PeerConnection, profile: Profile) -> Self {
        Self { conn, profile }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}

#[async_trait]
impl MoveSource for RemoteOpponent {
    async fn next_move(&mut self, _board: &Board) -> GameResult<Move> {
        Ok(self.conn.recv_move().await?)
    }

    /// Send our move to the peer
    async fn observe(&mut self, mv: &Move) -> GameResult<()> {
        Ok(self.conn.send_move(mv).await?)
    }

    fn name(&self) -> &str {
        &self.profile.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ai::AiDifficulty;
    use checkers_engine::{Position, Side};

    #[tokio::test]
    async fn test_local_input_delivers_selected_move() {
        let (selector, mut input) = LocalInput::new("alice");
        let board = Board::new(Side::Dark);
        let mv = Move::new(Position::new(5, 0), Position::new(4, 1));
        selector.select(mv).await.expect("input is open");
        assert_eq!(input.next_move(&board).await.expect("move queued"), mv);
        assert_eq!(input.name(), "alice");
    }

    #[tokio::test]
    async fn test_local_input_closed() {
        let (selector, mut input) = LocalInput::new("alice");
        drop(selector);
        let board = Board::new(Side::Dark);
        assert!(matches!(
            input.next_move(&board).await,
            Err(GameError::InputClosed)
        ));
    }

    #[tokio::test]
    async fn test_ai_opponent_returns_legal_move() {
        let mut ai = AiOpponent::new(AiPlayer::new(AiDifficulty::new(2)));
        let board = Board::new(Side::Light);
        let mv = ai.next_move(&board).await.expect("opening has moves");
        assert!(board.is_legal(&mv), "AI move {} should be legal", mv);
    }

    #[tokio::test]
    async fn test_ai_opponent_without_moves_fails() {
        let mut ai = AiOpponent::new(AiPlayer::default());
        let board = Board::empty(Side::Dark);
        assert!(matches!(
            ai.next_move(&board).await,
            Err(GameError::SearchFailed { .. })
        ));
    }
}
