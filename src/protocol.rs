use serde::{Deserialize, Serialize};

pub const PROTOCOL_VERSION: i32 = 754; // 1.16.5

pub mod codec;
mod decoder;
pub mod dispatch;
mod encoder;
pub mod packet;
pub mod registry;

pub use decoder::{Decode, DecodeError, Decoder};
pub use encoder::{var_int_size, Encode, EncodeError, Encoder};

/// Limit to avoid out-of-memory DOS.
pub const BUFFER_LIMIT: usize = 2 * 1024 * 1024; // 2 MiB

/// Longest string, in characters, accepted for any string field.
pub const MAX_STRING_LENGTH: usize = i16::MAX as usize;

/// Widest UTF-8 encoding of a single character, used to bound string
/// byte lengths.
pub const MAX_UTF8_WIDTH: usize = 4;

/// Stage of the connection lifecycle. Each phase has its own packet id
/// namespace.
///
/// A connection only moves forward: `Handshake` to either `Status` or
/// `Login`, and `Login` to `Play`.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum ProtocolPhase {
    Handshake,
    Status,
    Login,
    Play,
}

/// Which endpoint originates a packet.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    /// Sent by the server. Encode-only on this side.
    Clientbound,
    /// Sent by the client. Decode-only on this side.
    Serverbound,
}

impl Direction {
    pub fn can_decode(self) -> bool {
        self == Direction::Serverbound
    }

    pub fn can_encode(self) -> bool {
        self == Direction::Clientbound
    }
}
