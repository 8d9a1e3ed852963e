//! Byte relay between two peers
//!
//! The relay accepts exactly two connections and then copies bytes in both
//! directions until the peers hang up. It knows nothing about the protocol:
//! no framing, no validation, no move checking. Each peer's own board is
//! the only judge of legality, so a faulty peer can desynchronize the game.

use std::net::SocketAddr;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tracing::{debug, info, warn};

use super::error::NetworkResult;

const RELAY_BUFFER_SIZE: usize = 4096;

/// Bytes carried in each direction during one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub peer1_to_peer2: u64,
    pub peer2_to_peer1: u64,
}

/// Listening relay
#[derive(Debug)]
pub struct RelayServer {
    listener: TcpListener,
}

impl RelayServer {
    pub async fn bind(addr: impl ToSocketAddrs) -> NetworkResult<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!("[RELAY] Listening on {}", listener.local_addr()?);
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> NetworkResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Wait for both peers
    pub async fn accept_pair(&self) -> NetworkResult<RelaySession> {
        let (peer1, addr1) = self.listener.accept().await?;
        info!("[RELAY] Peer 1 connected from {}", addr1);
        let (peer2, addr2) = self.listener.accept().await?;
        info!("[RELAY] Peer 2 connected from {}", addr2);
        Ok(RelaySession { peer1, peer2 })
    }

    /// Serve a single session, then stop listening
    pub async fn run_once(self) -> NetworkResult<RelayStats> {
        let session = self.accept_pair().await?;
        drop(self.listener);
        Ok(session.run().await)
    }
}

/// Two connected peers
#[derive(Debug)]
pub struct RelaySession {
    peer1: TcpStream,
    peer2: TcpStream,
}

impl RelaySession {
    /// Forward in both directions until both sides have closed
    pub async fn run(self) -> RelayStats {
        let (read1, write1) = self.peer1.into_split();
        let (read2, write2) = self.peer2.into_split();

        let to_peer2 = tokio::spawn(forward(read1, write2, "peer1->peer2"));
        let to_peer1 = tokio::spawn(forward(read2, write1, "peer2->peer1"));

        let (sent12, sent21) = tokio::join!(to_peer2, to_peer1);
        let stats = RelayStats {
            peer1_to_peer2: sent12.unwrap_or_else(|e| {
                warn!("[RELAY] Forwarder peer1->peer2 failed: {}", e);
                0
            }),
            peer2_to_peer1: sent21.unwrap_or_else(|e| {
                warn!("[RELAY] Forwarder peer2->peer1 failed: {}", e);
                0
            }),
        };
        info!(
            "[RELAY] Session closed ({} bytes peer1->peer2, {} bytes peer2->peer1)",
            stats.peer1_to_peer2, stats.peer2_to_peer1
        );
        stats
    }
}

/// Copy `src` to `dst` chunk by chunk; returns the byte count
///
/// Stops at EOF or on the first error, then shuts down `dst` so the far
/// peer sees the close.
async fn forward(mut src: OwnedReadHalf, mut dst: OwnedWriteHalf, label: &'static str) -> u64 {
    let mut buf = [0u8; RELAY_BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let n = match src.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                debug!("[RELAY] {} read error: {}", label, e);
                break;
            }
        };
        if let Err(e) = dst.write_all(&buf[..n]).await {
            debug!("[RELAY] {} write error: {}", label, e);
            break;
        }
        total += n as u64;
    }
    let _ = dst.shutdown().await;
    debug!("[RELAY] {} finished after {} bytes", label, total);
    total
}
