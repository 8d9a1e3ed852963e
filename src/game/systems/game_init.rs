//! Game setup for the three ways to play
//!
//! - [`ai_game`] - local player against the engine
//! - [`host_game`] - connect to a relay, send the settings, play the joiner
//! - [`join_game`] - connect to a relay, receive the settings, play the host
//!
//! Each returns a [`GameSession`]: a ready [`GameRunner`] plus the handles
//! a front-end needs to feed it moves and watch its events.

use std::time::Duration;

use checkers_engine::Board;
use crossbeam_channel::Receiver;
use tokio::net::ToSocketAddrs;
use tracing::info;

use super::game_logic::GameRunner;
use super::move_source::{AiOpponent, LocalInput, MoveSelector, MoveSource, RemoteOpponent};
use crate::core::GameSettings;
use crate::game::ai::{AiDifficulty, AiPlayer};
use crate::game::error::GameResult;
use crate::game::events::GameEvent;
use crate::game::resources::SharedBoard;
use crate::networking::protocol::DEFAULT_RATING;
use crate::networking::{PeerConnection, Profile, SettingsHandshake};

/// A game ready to run
pub struct GameSession {
    pub runner: GameRunner,
    /// Feeds local moves into the runner
    pub selector: MoveSelector,
    pub events: Receiver<GameEvent>,
    /// Who we are playing against
    pub opponent: Profile,
}

/// Profile sent to a remote opponent
pub fn local_profile(settings: &GameSettings) -> Profile {
    Profile::new(settings.username.clone(), DEFAULT_RATING)
}

/// Local player against the engine
///
/// Must be called inside a tokio runtime.
pub fn ai_game(settings: &GameSettings) -> GameSession {
    let ai = AiPlayer::new(AiDifficulty::new(settings.ai_difficulty));
    let difficulty = ai.difficulty;
    let source = AiOpponent::new(ai);
    let opponent = source.profile().clone();
    info!(
        "[GAME] New game vs {} ({}), playing {}",
        opponent.username,
        difficulty,
        settings.local_side()
    );
    build_session(
        settings,
        Board::new(settings.local_side()),
        Box::new(source),
        opponent,
        settings.time_limit(),
    )
}

/// Host side of a networked game
pub async fn host_game(
    settings: &GameSettings,
    relay_addr: impl ToSocketAddrs,
) -> GameResult<GameSession> {
    let handshake = SettingsHandshake::from_settings(settings);
    let time_limit = handshake.time_limit()?;
    let mut conn = PeerConnection::connect(relay_addr).await?;
    let opponent = conn
        .host_handshake(&handshake, &local_profile(settings))
        .await?;
    info!(
        "[NETWORK] Hosting {} as {} via {}",
        opponent.username,
        handshake.host_side,
        conn.peer_addr()
    );
    let remote = RemoteOpponent::new(conn, opponent);
    let opponent = remote.profile().clone();
    Ok(build_session(
        settings,
        Board::new(handshake.host_side),
        Box::new(remote),
        opponent,
        time_limit,
    ))
}

/// Joining side of a networked game
///
/// Side and clock come from the host's handshake; the local settings only
/// supply the username.
pub async fn join_game(
    settings: &GameSettings,
    relay_addr: impl ToSocketAddrs,
) -> GameResult<GameSession> {
    let mut conn = PeerConnection::connect(relay_addr).await?;
    let (handshake, opponent) = conn.join_handshake(&local_profile(settings)).await?;
    let side = handshake.joiner_side();
    info!(
        "[NETWORK] Joined {} as {} via {}",
        opponent.username,
        side,
        conn.peer_addr()
    );
    let remote = RemoteOpponent::new(conn, opponent);
    let opponent = remote.profile().clone();
    Ok(build_session(
        settings,
        Board::new(side),
        Box::new(remote),
        opponent,
        handshake.time_limit()?,
    ))
}

fn build_session(
    settings: &GameSettings,
    board: Board,
    opponent_source: Box<dyn MoveSource>,
    opponent: Profile,
    time_limit: Duration,
) -> GameSession {
    let (selector, input) = LocalInput::new(settings.username.clone());
    let (tx, rx) = crossbeam_channel::unbounded();
    let runner = GameRunner::new(
        SharedBoard::new(board),
        Box::new(input),
        opponent_source,
        time_limit,
        tx,
    );
    GameSession {
        runner,
        selector,
        events: rx,
        opponent,
    }
}
