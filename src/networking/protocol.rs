//! Wire protocol between two peers
//!
//! Three message kinds travel over one byte stream. No message tag is sent;
//! each side knows from the game phase which message comes next:
//!
//! 1. [`SettingsHandshake`] - 2 bytes, host to joiner, once
//! 2. [`Profile`] - length-prefixed bincode, once in each direction
//! 3. moves - 2 bytes each, `[from_code, to_code]`
//!
//! The skipped square of a capture is never sent; the receiver rebuilds it
//! from the move geometry.

use std::time::Duration;

use checkers_engine::{Move, Position, Side};
use serde::{Deserialize, Serialize};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use super::error::{NetworkError, NetworkResult};
use crate::core::{time_limit_for_index, GameSettings};

/// Port the relay listens on unless told otherwise
pub const DEFAULT_RELAY_PORT: u16 = 5000;

/// Largest accepted profile body
pub const MAX_PROFILE_LEN: usize = 16 * 1024 * 1024;

/// Username of a peer that has not sent a profile
pub const DEFAULT_USERNAME: &str = "Opponent";

/// Rating of a peer that has not sent a profile
pub const DEFAULT_RATING: i32 = 800;

/// Game settings chosen by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsHandshake {
    /// Index into the shared time-limit table
    pub time_limit_index: u8,
    /// Side played by the peer that sends the handshake
    pub host_side: Side,
}

impl SettingsHandshake {
    /// Handshake describing the host's own settings
    pub fn from_settings(settings: &GameSettings) -> Self {
        Self {
            time_limit_index: settings.time_limit_index,
            host_side: settings.local_side(),
        }
    }

    pub fn encode(&self) -> [u8; 2] {
        let side = match self.host_side {
            Side::Dark => 0,
            Side::Light => 1,
        };
        [self.time_limit_index, side]
    }

    /// Parse a handshake; any non-zero side byte means Light
    pub fn decode(bytes: [u8; 2]) -> NetworkResult<Self> {
        let [time_limit_index, side] = bytes;
        if time_limit_for_index(time_limit_index).is_none() {
            return Err(NetworkError::InvalidTimeLimit {
                index: time_limit_index,
            });
        }
        let host_side = if side == 0 { Side::Dark } else { Side::Light };
        Ok(Self {
            time_limit_index,
            host_side,
        })
    }

    /// Side played by the receiving peer
    pub fn joiner_side(&self) -> Side {
        self.host_side.opponent()
    }

    /// Clock length per player
    ///
    /// # Errors
    /// [`NetworkError::InvalidTimeLimit`] when the index is outside the table.
    pub fn time_limit(&self) -> NetworkResult<Duration> {
        time_limit_for_index(self.time_limit_index).ok_or(NetworkError::InvalidTimeLimit {
            index: self.time_limit_index,
        })
    }
}

pub fn encode_move(mv: &Move) -> [u8; 2] {
    mv.to_codes()
}

/// Rebuild a move from its two square codes
pub fn decode_move(bytes: [u8; 2]) -> NetworkResult<Move> {
    let [from, to] = bytes.map(|code| {
        Position::decode(code).map_err(|_| NetworkError::InvalidSquareCode { code })
    });
    Ok(Move::new(from?, to?))
}

/// Identity shown to the other player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    pub rating: i32,
    /// Opaque image bytes
    #[serde(with = "serde_bytes")]
    pub avatar: Vec<u8>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            rating: DEFAULT_RATING,
            avatar: Vec::new(),
        }
    }
}

impl Profile {
    pub fn new(username: impl Into<String>, rating: i32) -> Self {
        Self {
            username: username.into(),
            rating,
            avatar: Vec::new(),
        }
    }

    /// Length prefix followed by the bincode body
    pub fn encode_frame(&self) -> NetworkResult<Vec<u8>> {
        let body = bincode::serialize(self)?;
        if body.len() > MAX_PROFILE_LEN {
            return Err(NetworkError::ProfileTooLarge {
                len: body.len(),
                max: MAX_PROFILE_LEN,
            });
        }
        let mut frame = Vec::with_capacity(4 + body.len());
        frame.extend_from_slice(&(body.len() as u32).to_be_bytes());
        frame.extend_from_slice(&body);
        Ok(frame)
    }

    pub fn decode_body(body: &[u8]) -> NetworkResult<Self> {
        Ok(bincode::deserialize(body)?)
    }
}

/// Read exactly `buf.len()` bytes, reporting a clean EOF as [`NetworkError::Closed`]
async fn read_exact_or_closed<R>(reader: &mut R, buf: &mut [u8]) -> NetworkResult<()>
where
    R: AsyncRead + Unpin,
{
    match reader.read_exact(buf).await {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(NetworkError::Closed),
        Err(e) => Err(e.into()),
    }
}

pub async fn write_settings<W>(writer: &mut W, handshake: &SettingsHandshake) -> NetworkResult<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&handshake.encode()).await?;
    writer.flush().await?;
    Ok(())
}

pub async fn read_settings<R>(reader: &mut R) -> NetworkResult<SettingsHandshake>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 2];
    read_exact_or_closed(reader, &mut buf).await?;
    SettingsHandshake::decode(buf)
}

pub async fn write_move<W>(writer: &mut W, mv: &Move) -> NetworkResult<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&encode_move(mv)).await?;
    writer.flush().await?;
    Ok(())
}

pub async fn read_move<R>(reader: &mut R) -> NetworkResult<Move>
where
    R: AsyncRead + Unpin,
{
    let mut buf = [0u8; 2];
    read_exact_or_closed(reader, &mut buf).await?;
    decode_move(buf)
}

pub async fn write_profile<W>(writer: &mut W, profile: &Profile) -> NetworkResult<()>
where
    W: AsyncWrite + Unpin,
{
    let frame = profile.encode_frame()?;
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one profile frame; oversized frames are rejected before allocating
pub async fn read_profile<R>(reader: &mut R) -> NetworkResult<Profile>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    read_exact_or_closed(reader, &mut len_buf).await?;
    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_PROFILE_LEN {
        return Err(NetworkError::ProfileTooLarge {
            len,
            max: MAX_PROFILE_LEN,
        });
    }
    let mut body = vec![0u8; len];
    read_exact_or_closed(reader, &mut body).await?;
    Profile::decode_body(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_handshake_bytes() {
        let handshake = SettingsHandshake {
            time_limit_index: 4,
            host_side: Side::Dark,
        };
        assert_eq!(handshake.encode(), [4, 0], "Dark host encodes side byte 0");

        let light = SettingsHandshake::decode([2, 7]).expect("valid handshake");
        assert_eq!(light.host_side, Side::Light, "any non-zero side byte is Light");
        assert_eq!(light.joiner_side(), Side::Dark);
        assert_eq!(light.time_limit().expect("decoded index"), Duration::from_secs(180));
    }

    #[test]
    fn test_settings_handshake_rejects_bad_index() {
        assert!(matches!(
            SettingsHandshake::decode([6, 0]),
            Err(NetworkError::InvalidTimeLimit { index: 6 })
        ));

        let built = SettingsHandshake {
            time_limit_index: 9,
            host_side: Side::Dark,
        };
        assert!(
            matches!(built.time_limit(), Err(NetworkError::InvalidTimeLimit { index: 9 })),
            "an unchecked index is reported, not replaced"
        );
    }

    #[test]
    fn test_move_message_rebuilds_skip() {
        let mv = Move::new(Position::new(5, 2), Position::new(3, 4));
        let bytes = encode_move(&mv);
        assert_eq!(bytes, [21, 14]);
        let decoded = decode_move(bytes).expect("valid codes");
        assert_eq!(decoded.skip, Some(Position::new(4, 3)), "skip comes from geometry");
        assert_eq!(decoded, mv);
    }

    #[test]
    fn test_move_message_rejects_bad_code() {
        assert!(matches!(
            decode_move([3, 40]),
            Err(NetworkError::InvalidSquareCode { code: 40 })
        ));
        assert!(
            matches!(decode_move([32, 5]), Err(NetworkError::InvalidSquareCode { code: 32 })),
            "the offending byte is the one reported"
        );
    }

    #[test]
    fn test_default_profile() {
        let profile = Profile::default();
        assert_eq!(profile.username, "Opponent");
        assert_eq!(profile.rating, 800);
        assert!(profile.avatar.is_empty());
    }

    #[test]
    fn test_profile_frame_prefix() {
        let mut profile = Profile::new("alice", 1200);
        profile.avatar = vec![1, 2, 3];
        let frame = profile.encode_frame().expect("encodes");
        let len = u32::from_be_bytes([frame[0], frame[1], frame[2], frame[3]]) as usize;
        assert_eq!(len, frame.len() - 4, "prefix is the body length");
        assert_eq!(Profile::decode_body(&frame[4..]).expect("decodes"), profile);
    }

    #[tokio::test]
    async fn test_read_profile_rejects_oversized_prefix() {
        let frame = ((MAX_PROFILE_LEN + 1) as u32).to_be_bytes();
        let mut reader: &[u8] = &frame;
        assert!(matches!(
            read_profile(&mut reader).await,
            Err(NetworkError::ProfileTooLarge { .. })
        ));
    }

    #[tokio::test]
    async fn test_read_move_reports_closed_stream() {
        let mut reader: &[u8] = &[5];
        assert!(matches!(read_move(&mut reader).await, Err(NetworkError::Closed)));
    }
}
