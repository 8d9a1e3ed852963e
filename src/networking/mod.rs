//! Networking module - two-player synchronization over TCP
//!
//! - [`protocol`] - settings, move and profile encodings
//! - [`client`] - [`PeerConnection`] to the other player
//! - [`relay`] - [`RelayServer`] byte pipe joining two peers

pub mod client;
pub mod error;
pub mod protocol;
pub mod relay;

pub use client::PeerConnection;
pub use error::{NetworkError, NetworkResult};
pub use protocol::{Profile, SettingsHandshake, DEFAULT_RELAY_PORT};
pub use relay::{RelayServer, RelaySession, RelayStats};
