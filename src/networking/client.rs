//! Connection to the other player
//!
//! Both players connect to the relay as ordinary clients; the host is simply
//! the one that also runs the relay and sends the settings handshake.

use std::net::SocketAddr;

use checkers_engine::Move;
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::{debug, info};

use super::error::NetworkResult;
use super::protocol::{self, Profile, SettingsHandshake};

/// One TCP stream to the peer (through the relay)
#[derive(Debug)]
pub struct PeerConnection {
    stream: TcpStream,
    peer_addr: SocketAddr,
}

impl PeerConnection {
    /// Connect to a relay
    pub async fn connect(addr: impl ToSocketAddrs) -> NetworkResult<Self> {
        let stream = TcpStream::connect(addr).await?;
        let conn = Self::from_stream(stream)?;
        info!("[NETWORK] Connected to {}", conn.peer_addr);
        Ok(conn)
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream) -> NetworkResult<Self> {
        stream.set_nodelay(true)?;
        let peer_addr = stream.peer_addr()?;
        Ok(Self { stream, peer_addr })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer_addr
    }

    pub async fn send_settings(&mut self, handshake: &SettingsHandshake) -> NetworkResult<()> {
        debug!("[NETWORK] Sending settings {:?}", handshake);
        protocol::write_settings(&mut self.stream, handshake).await
    }

    pub async fn recv_settings(&mut self) -> NetworkResult<SettingsHandshake> {
        let handshake = protocol::read_settings(&mut self.stream).await?;
        debug!("[NETWORK] Received settings {:?}", handshake);
        Ok(handshake)
    }

    pub async fn send_move(&mut self, mv: &Move) -> NetworkResult<()> {
        debug!("[NETWORK] Sending move {}", mv);
        protocol::write_move(&mut self.stream, mv).await
    }

    pub async fn recv_move(&mut self) -> NetworkResult<Move> {
        let mv = protocol::read_move(&mut self.stream).await?;
        debug!("[NETWORK] Received move {}", mv);
        Ok(mv)
    }

    pub async fn send_profile(&mut self, profile: &Profile) -> NetworkResult<()> {
        debug!("[NETWORK] Sending profile for {}", profile.username);
        protocol::write_profile(&mut self.stream, profile).await
    }

    pub async fn recv_profile(&mut self) -> NetworkResult<Profile> {
        let profile = protocol::read_profile(&mut self.stream).await?;
        debug!(
            "[NETWORK] Received profile for {} ({})",
            profile.username, profile.rating
        );
        Ok(profile)
    }

    /// Host side of the opening exchange
    ///
    /// Sends the settings, then its profile, then waits for the joiner's.
    pub async fn host_handshake(
        &mut self,
        handshake: &SettingsHandshake,
        profile: &Profile,
    ) -> NetworkResult<Profile> {
        self.send_settings(handshake).await?;
        self.send_profile(profile).await?;
        self.recv_profile().await
    }

    /// Joiner side of the opening exchange
    ///
    /// Receives the settings and the host's profile, then sends its own.
    pub async fn join_handshake(
        &mut self,
        profile: &Profile,
    ) -> NetworkResult<(SettingsHandshake, Profile)> {
        let handshake = self.recv_settings().await?;
        let host_profile = self.recv_profile().await?;
        self.send_profile(profile).await?;
        Ok((handshake, host_profile))
    }
}
