//! Networking Integration Tests
//!
//! Runs the relay and peer connections over loopback TCP:
//! - The relay copies bytes verbatim in both directions
//! - Settings and profile handshake between host and joiner
//! - Move exchange keeps two boards in step
//! - A vanished peer aborts the other side's game

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;
use checkers::engine::{Board, Move, Position, Side};
use checkers::game::ai::{AiDifficulty, AiPlayer};
use checkers::game::systems::{AiOpponent, RemoteOpponent};
use checkers::game::{GameError, GameEvent, GameResult, GameRunner, MoveSource, SharedBoard};
use checkers::networking::{
    NetworkError, PeerConnection, Profile, RelayServer, RelayStats, SettingsHandshake,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

/// Start a relay on an ephemeral loopback port
async fn start_relay() -> (SocketAddr, JoinHandle<Result<RelayStats, NetworkError>>) {
    let relay = RelayServer::bind("127.0.0.1:0").await.expect("relay binds");
    let addr = relay.local_addr().expect("relay address");
    (addr, tokio::spawn(relay.run_once()))
}

/// Plays a fixed list of moves, then reports closed input
struct Scripted(VecDeque<Move>);

#[async_trait]
impl MoveSource for Scripted {
    async fn next_move(&mut self, _board: &Board) -> GameResult<Move> {
        self.0.pop_front().ok_or(GameError::InputClosed)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

// ============================================================================
// Relay Tests
// ============================================================================

#[tokio::test]
async fn test_relay_forwards_bytes_verbatim() {
    let (addr, relay) = start_relay().await;
    let mut peer1 = TcpStream::connect(addr).await.expect("peer 1 connects");
    let mut peer2 = TcpStream::connect(addr).await.expect("peer 2 connects");

    peer1.write_all(b"hello").await.expect("peer 1 writes");
    let mut buf = [0u8; 5];
    peer2.read_exact(&mut buf).await.expect("peer 2 reads");
    assert_eq!(&buf, b"hello", "bytes arrive unchanged");

    peer2.write_all(&[0, 255, 7]).await.expect("peer 2 writes");
    let mut buf = [0u8; 3];
    peer1.read_exact(&mut buf).await.expect("peer 1 reads");
    assert_eq!(buf, [0, 255, 7]);

    drop(peer1);
    let mut rest = Vec::new();
    peer2
        .read_to_end(&mut rest)
        .await
        .expect("peer 2 sees the close");
    assert!(rest.is_empty(), "nothing after the close");
    drop(peer2);

    let stats = tokio::time::timeout(Duration::from_secs(5), relay)
        .await
        .expect("relay session ends")
        .expect("relay task")
        .expect("relay result");
    assert_eq!(stats.peer1_to_peer2, 5);
    assert_eq!(stats.peer2_to_peer1, 3);
}

// ============================================================================
// Handshake Tests
// ============================================================================

#[tokio::test]
async fn test_host_and_joiner_handshake() {
    let (addr, _relay) = start_relay().await;
    let mut host = PeerConnection::connect(addr).await.expect("host connects");
    let mut joiner = PeerConnection::connect(addr).await.expect("joiner connects");

    let handshake = SettingsHandshake {
        time_limit_index: 1,
        host_side: Side::Light,
    };
    let mut host_profile = Profile::new("host", 1500);
    host_profile.avatar = vec![9; 1000];
    let joiner_profile = Profile::new("joiner", 900);

    let (host_result, joiner_result) = tokio::join!(
        host.host_handshake(&handshake, &host_profile),
        joiner.join_handshake(&joiner_profile),
    );

    let seen_by_host = host_result.expect("host handshake");
    let (received, seen_by_joiner) = joiner_result.expect("joiner handshake");
    assert_eq!(seen_by_host, joiner_profile);
    assert_eq!(seen_by_joiner, host_profile, "avatar bytes survive the trip");
    assert_eq!(received, handshake);
    assert_eq!(received.joiner_side(), Side::Dark, "joiner takes the other side");
    assert_eq!(
        received.time_limit().expect("valid index"),
        Duration::from_secs(120)
    );
}

#[tokio::test]
async fn test_moves_cross_the_relay() {
    let (addr, _relay) = start_relay().await;
    let mut a = PeerConnection::connect(addr).await.expect("a connects");
    let mut b = PeerConnection::connect(addr).await.expect("b connects");

    let capture = Move::new(Position::new(5, 2), Position::new(3, 4));
    a.send_move(&capture).await.expect("send");
    let received = b.recv_move().await.expect("receive");
    assert_eq!(received, capture);
    assert_eq!(received.skip, Some(Position::new(4, 3)), "skip rebuilt on receipt");
}

#[tokio::test]
async fn test_closed_peer_reports_closed() {
    let (addr, _relay) = start_relay().await;
    let a = PeerConnection::connect(addr).await.expect("a connects");
    let mut b = PeerConnection::connect(addr).await.expect("b connects");

    drop(a);
    let result = tokio::time::timeout(Duration::from_secs(5), b.recv_move())
        .await
        .expect("close is noticed");
    assert!(matches!(result, Err(NetworkError::Closed)));
}

// ============================================================================
// Networked Game Tests
// ============================================================================

#[tokio::test]
async fn test_networked_boards_stay_in_step() {
    //! Host (Dark) plays one scripted move and then leaves; the joiner's AI
    //! answers in between. Both sides must report the same two moves, and
    //! the joiner's game is aborted when the host goes away.
    let (addr, _relay) = start_relay().await;
    let mut host_conn = PeerConnection::connect(addr).await.expect("host connects");
    let mut joiner_conn = PeerConnection::connect(addr).await.expect("joiner connects");

    let handshake = SettingsHandshake {
        time_limit_index: 3,
        host_side: Side::Dark,
    };
    let host_local = Profile::new("host", 800);
    let joiner_local = Profile::new("joiner", 800);
    let (host_side, joiner_side) = tokio::join!(
        host_conn.host_handshake(&handshake, &host_local),
        joiner_conn.join_handshake(&joiner_local),
    );
    let joiner_profile = host_side.expect("host handshake");
    let (received, host_profile) = joiner_side.expect("joiner handshake");

    let (host_tx, host_rx) = crossbeam_channel::unbounded();
    let host = GameRunner::new(
        SharedBoard::new(Board::new(handshake.host_side)),
        Box::new(Scripted(
            [Move::new(Position::new(5, 0), Position::new(4, 1))].into(),
        )),
        Box::new(RemoteOpponent::new(host_conn, joiner_profile)),
        handshake.time_limit().expect("valid index"),
        host_tx,
    );

    let (joiner_tx, joiner_rx) = crossbeam_channel::unbounded();
    let joiner = GameRunner::new(
        SharedBoard::new(Board::new(received.joiner_side())),
        Box::new(AiOpponent::new(AiPlayer::new(AiDifficulty::new(1)))),
        Box::new(RemoteOpponent::new(joiner_conn, host_profile)),
        received.time_limit().expect("valid index"),
        joiner_tx,
    );

    let (host_result, joiner_result) = tokio::time::timeout(
        Duration::from_secs(10),
        async { tokio::join!(host.run(), joiner.run()) },
    )
    .await
    .expect("both games end");

    assert!(matches!(host_result, Err(GameError::InputClosed)));
    assert!(
        matches!(
            joiner_result,
            Err(GameError::Transport(NetworkError::Closed))
        ),
        "joiner should see the host disappear: {:?}",
        joiner_result
    );

    let moves = |rx: crossbeam_channel::Receiver<GameEvent>| -> Vec<(Side, Move)> {
        rx.try_iter()
            .filter_map(|event| match event {
                GameEvent::MoveApplied { side, mv, .. } => Some((side, mv)),
                _ => None,
            })
            .collect()
    };
    let host_moves = moves(host_rx);
    let joiner_moves = moves(joiner_rx);
    assert_eq!(host_moves.len(), 2, "host move and joiner reply");
    assert_eq!(host_moves, joiner_moves, "both boards saw the same moves");
    assert_eq!(host_moves[0].0, Side::Dark);
    assert_eq!(host_moves[1].0, Side::Light);
}
