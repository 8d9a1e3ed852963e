//! Turn loop
//!
//! [`GameRunner`] is the only writer of the live board. Each turn it:
//!
//! 1. checks for game over (board result, clock expiry)
//! 2. runs the clock of the side to move and pauses the other
//! 3. waits for a move from that side's [`MoveSource`], racing the clocks
//! 4. validates the move, lets the other source observe it, applies it
//! 5. reports a [`GameEvent::MoveApplied`]
//!
//! An illegal local move is logged and the player is asked again. An illegal
//! opponent move means the two boards disagree; like a broken connection it
//! aborts the game.

use std::sync::Arc;
use std::time::Duration;

use checkers_engine::{Board, EngineError, Move, Side};
use crossbeam_channel::Sender;
use tracing::{debug, error, info, warn};

use super::move_source::MoveSource;
use crate::game::error::{GameError, GameResult};
use crate::game::events::GameEvent;
use crate::game::resources::{GameClocks, GameOutcome, SharedBoard, TurnPhase, TurnState};

enum NextTurn {
    Moved(Move),
    Flagged(Side),
}

/// Drives one game from the current position to its end
pub struct GameRunner {
    board: SharedBoard,
    local: Box<dyn MoveSource>,
    opponent: Box<dyn MoveSource>,
    clocks: Arc<GameClocks>,
    events: Sender<GameEvent>,
    turn: TurnState,
}

impl GameRunner {
    /// Set up a game on `board` with `time_limit` per player
    ///
    /// `local` plays the board's local side, `opponent` the other side.
    /// Must be called inside a tokio runtime.
    pub fn new(
        board: SharedBoard,
        local: Box<dyn MoveSource>,
        opponent: Box<dyn MoveSource>,
        time_limit: Duration,
        events: Sender<GameEvent>,
    ) -> Self {
        let turn = TurnState::new(board.read(TurnPhase::for_board));
        Self {
            board,
            local,
            opponent,
            clocks: Arc::new(GameClocks::new(time_limit)),
            events,
            turn,
        }
    }

    /// Clocks, for display
    pub fn clocks(&self) -> Arc<GameClocks> {
        self.clocks.clone()
    }

    /// Shared board, for display
    pub fn board(&self) -> SharedBoard {
        self.board.clone()
    }

    /// Whose input the loop is waiting for
    pub fn phase(&self) -> TurnPhase {
        self.turn.phase
    }

    /// Play until the game ends
    ///
    /// On error the game is aborted: clocks stop, [`GameEvent::Aborted`] is
    /// sent and the shared board is reset to a fresh game.
    pub async fn run(mut self) -> GameResult<GameOutcome> {
        info!(
            "[GAME] {} ({}) vs {} ({})",
            self.local.name(),
            self.local_side(),
            self.opponent.name(),
            self.local_side().opponent()
        );

        let result = self.play().await;
        self.clocks.stop();

        match result {
            Ok(outcome) => {
                info!("[GAME] {} after {} moves", outcome, self.turn.moves_played);
                let _ = self.events.send(GameEvent::GameOver(outcome));
                Ok(outcome)
            }
            Err(e) => {
                error!("[GAME] Game aborted: {}", e);
                let _ = self.events.send(GameEvent::Aborted {
                    reason: e.to_string(),
                });
                self.board.reset(self.local_side());
                Err(e)
            }
        }
    }

    fn local_side(&self) -> Side {
        self.board.read(|b| b.local_side())
    }

    async fn play(&mut self) -> GameResult<GameOutcome> {
        loop {
            let position = self.board.snapshot();
            if let Some(outcome) =
                GameOutcome::decide(position.winner(), self.clocks.expired_side())
            {
                self.finish()?;
                return Ok(outcome);
            }

            let side = position.side_to_move();
            let local_turn = position.is_local_turn();
            self.clocks.switch_to(side);

            let clocks = self.clocks.clone();
            let source = if local_turn {
                &mut self.local
            } else {
                &mut self.opponent
            };

            let next = tokio::select! {
                biased;
                loser = clocks.first_expired() => NextTurn::Flagged(loser),
                mv = next_legal_move(source.as_mut(), &position, local_turn) => NextTurn::Moved(mv?),
            };
            let mv = match next {
                NextTurn::Moved(mv) => mv,
                NextTurn::Flagged(loser) => {
                    info!("[GAME] {} flagged", loser);
                    self.finish()?;
                    return Ok(GameOutcome::Time {
                        winner: loser.opponent(),
                    });
                }
            };

            if local_turn {
                self.opponent.observe(&mv).await?;
            } else {
                self.local.observe(&mv).await?;
            }

            let chain_continues = self.board.apply(mv)?;
            self.clocks.get(side).pause();

            let after = self.board.snapshot();
            self.turn.advance(&after)?;
            debug!(
                "[GAME] Move {}: {} played {}{}",
                self.turn.moves_played,
                side,
                mv,
                if chain_continues { " (chain continues)" } else { "" }
            );
            let _ = self.events.send(GameEvent::MoveApplied {
                side,
                mv,
                chain_continues,
            });
        }
    }

    fn finish(&mut self) -> GameResult<()> {
        self.clocks.pause_all();
        if self.turn.phase.is_terminal() {
            return Ok(());
        }
        self.turn.transition_to(TurnPhase::Terminal)
    }
}

/// Ask `source` until it produces a legal move
///
/// Local players get another try after an illegal move; any other source
/// fails with [`EngineError::IllegalMove`].
async fn next_legal_move(
    source: &mut dyn MoveSource,
    position: &Board,
    retry_illegal: bool,
) -> GameResult<Move> {
    loop {
        let mv = source.next_move(position).await?;
        if position.is_legal(&mv) {
            return Ok(mv);
        }
        if !retry_illegal {
            warn!("[GAME] {} sent illegal move {}", source.name(), mv);
            return Err(EngineError::IllegalMove { mv }.into());
        }
        warn!("[GAME] Rejected illegal move {} from {}", mv, source.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use checkers_engine::{Piece, Position};
    use std::collections::VecDeque;

    /// Plays a fixed list of moves, then reports closed input
    struct Scripted {
        moves: VecDeque<Move>,
    }

    impl Scripted {
        fn new(moves: &[Move]) -> Box<Self> {
            Box::new(Self {
                moves: moves.iter().copied().collect(),
            })
        }
    }

    #[async_trait]
    impl MoveSource for Scripted {
        async fn next_move(&mut self, _board: &Board) -> GameResult<Move> {
            self.moves.pop_front().ok_or(GameError::InputClosed)
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    fn mv(fr: i8, fc: i8, tr: i8, tc: i8) -> Move {
        Move::new(Position::new(fr, fc), Position::new(tr, tc))
    }

    #[tokio::test]
    async fn test_blocked_side_loses() {
        // Dark captures the last Light piece
        let board = Board::with_pieces(
            Side::Dark,
            Side::Dark,
            &[
                (Position::new(5, 2), Piece::DarkPawn),
                (Position::new(4, 3), Piece::LightPawn),
            ],
        )
        .expect("valid setup");
        let shared = SharedBoard::new(board);
        let (tx, rx) = crossbeam_channel::unbounded();

        let runner = GameRunner::new(
            shared.clone(),
            Scripted::new(&[mv(5, 2, 3, 4)]),
            Scripted::new(&[]),
            Duration::from_secs(60),
            tx,
        );
        assert_eq!(runner.phase(), TurnPhase::AwaitingLocalMove, "Dark is local and to move");
        let outcome = runner.run().await.expect("game finishes");
        assert_eq!(outcome, GameOutcome::Blocked { winner: Side::Dark });

        let events: Vec<GameEvent> = rx.try_iter().collect();
        assert_eq!(events.len(), 2, "one move and game over: {:?}", events);
        assert!(matches!(
            events[0],
            GameEvent::MoveApplied { side: Side::Dark, chain_continues: false, .. }
        ));
        assert_eq!(events[1], GameEvent::GameOver(outcome));
        assert_eq!(shared.read(|b| b.pieces_of(Side::Light)), 0);
    }

    #[tokio::test]
    async fn test_illegal_local_move_is_retried() {
        let shared = SharedBoard::new(Board::with_pieces(
            Side::Dark,
            Side::Dark,
            &[
                (Position::new(5, 2), Piece::DarkPawn),
                (Position::new(4, 3), Piece::LightPawn),
            ],
        )
        .expect("valid setup"));
        let (tx, _rx) = crossbeam_channel::unbounded();

        // The plain step is illegal while a capture exists
        let runner = GameRunner::new(
            shared,
            Scripted::new(&[mv(5, 2, 4, 1), mv(5, 2, 3, 4)]),
            Scripted::new(&[]),
            Duration::from_secs(60),
            tx,
        );
        let outcome = runner.run().await.expect("second move is legal");
        assert_eq!(outcome.winner(), Side::Dark);
    }

    #[tokio::test]
    async fn test_illegal_opponent_move_aborts_and_resets() {
        let shared = SharedBoard::new(Board::new(Side::Light));
        let (tx, rx) = crossbeam_channel::unbounded();

        // Opponent (Dark) tries to move a Light piece
        let runner = GameRunner::new(
            shared.clone(),
            Scripted::new(&[]),
            Scripted::new(&[mv(2, 1, 3, 0)]),
            Duration::from_secs(60),
            tx,
        );
        assert_eq!(runner.phase(), TurnPhase::AwaitingOpponentMove, "Dark opens as the opponent");
        let result = runner.run().await;
        assert!(matches!(
            result,
            Err(GameError::Engine(EngineError::IllegalMove { .. }))
        ));
        assert!(matches!(
            rx.try_iter().last(),
            Some(GameEvent::Aborted { .. })
        ));
        assert_eq!(shared.snapshot(), Board::new(Side::Light), "board reset");
    }

    #[tokio::test]
    async fn test_clock_expiry_interrupts_wait() {
        let shared = SharedBoard::new(Board::new(Side::Dark));
        let (tx, rx) = crossbeam_channel::unbounded();
        let (_selector, input) = crate::game::systems::LocalInput::new("idle");

        let runner = GameRunner::new(
            shared,
            Box::new(input),
            Scripted::new(&[]),
            Duration::from_millis(50),
            tx,
        );
        let outcome = tokio::time::timeout(Duration::from_secs(5), runner.run())
            .await
            .expect("clock should end the game")
            .expect("time loss is not an error");
        assert_eq!(outcome, GameOutcome::Time { winner: Side::Light });
        assert!(matches!(rx.try_iter().last(), Some(GameEvent::GameOver(_))));
    }
}
