//! Error types for networking module
//!
//! Covers socket failures and malformed protocol messages.

use thiserror::Error;

/// Errors raised while talking to a peer or running the relay
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Socket I/O error
    #[error("Network I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Peer closed the connection
    #[error("Connection closed by peer")]
    Closed,

    /// Settings handshake carried an unknown time-limit index
    #[error("Invalid time limit index {index}")]
    InvalidTimeLimit { index: u8 },

    /// Move message carried a square code outside 0..32
    #[error("Invalid square code {code}")]
    InvalidSquareCode { code: u8 },

    /// Profile frame longer than the allowed maximum
    #[error("Profile of {len} bytes exceeds limit of {max} bytes")]
    ProfileTooLarge { len: usize, max: usize },

    /// Profile body could not be encoded or decoded
    #[error("Profile codec error: {0}")]
    ProfileCodec(#[from] bincode::Error),
}

/// Result type alias for networking operations
pub type NetworkResult<T> = Result<T, NetworkError>;
