//! Enumerates the packet types of every phase.
//!
//! Full parsing of packets is _not_ implemented for every type. Packets whose
//! bodies need NBT, item slot or chunk data keep the rest of the packet's bytes
//! as a `Vec<u8>`, which round-trips without loss of information.
//!
//! Server-bound packets can only be decoded and client-bound packets can only
//! be encoded: each type implements exactly one of [`Decode`] and [`Encode`].

use crate::protocol::{
    registry::PacketRegistry, Decode, DecodeError, Direction, Encode, EncodeError, Encoder,
    ProtocolPhase,
};
use minecraft_protocol_core_macros::FromVariants;
use std::{any::TypeId, fmt::Debug};

pub mod clientbound;
pub mod common;
pub mod serverbound;

/// Static identity of a packet type.
pub trait Packet: Debug + Send + 'static {
    /// Numeric id, unique within `PHASE` and `DIRECTION`.
    const ID: i32;
    /// Stable name for logs and diagnostics.
    const NAME: &'static str;
    const PHASE: ProtocolPhase;
    const DIRECTION: Direction;
    /// Whether the packet may be exchanged before authentication
    /// completes. Everything outside the play phase may.
    const ALLOWED_BEFORE_AUTHENTICATION: bool = !matches!(Self::PHASE, ProtocolPhase::Play);
}

/// The operation a packet was asked to perform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Decode,
    Encode,
}

/// An error at the packet identity level.
#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    #[error("no {direction} packet with id {id:#04x} in the {phase} phase")]
    UnknownPacket {
        phase: ProtocolPhase,
        direction: Direction,
        id: i32,
    },
    #[error("packet type {0} is not registered")]
    Unregistered(&'static str),
    #[error("{name} is a {direction} packet and cannot {operation}")]
    UnsupportedDirection {
        name: &'static str,
        direction: Direction,
        operation: Operation,
    },
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Any packet a client can send, grouped by phase.
#[derive(Debug, Clone, FromVariants)]
pub enum ServerboundPacket {
    Handshake(serverbound::handshake::Packet),
    Status(serverbound::status::Packet),
    Login(serverbound::login::Packet),
    Play(serverbound::play::Packet),
}

/// Any packet a server can send, grouped by phase.
#[derive(Debug, Clone, FromVariants)]
pub enum ClientboundPacket {
    Status(clientbound::status::Packet),
    Login(clientbound::login::Packet),
    Play(clientbound::play::Packet),
}

impl ServerboundPacket {
    pub fn id(&self) -> i32 {
        match self {
            Self::Handshake(packet) => packet.id(),
            Self::Status(packet) => packet.id(),
            Self::Login(packet) => packet.id(),
            Self::Play(packet) => packet.id(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Handshake(packet) => packet.name(),
            Self::Status(packet) => packet.name(),
            Self::Login(packet) => packet.name(),
            Self::Play(packet) => packet.name(),
        }
    }

    pub fn phase(&self) -> ProtocolPhase {
        match self {
            Self::Handshake(_) => ProtocolPhase::Handshake,
            Self::Status(_) => ProtocolPhase::Status,
            Self::Login(_) => ProtocolPhase::Login,
            Self::Play(_) => ProtocolPhase::Play,
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::Serverbound
    }

    pub fn is_allowed_before_authentication(&self) -> bool {
        match self {
            Self::Handshake(packet) => packet.is_allowed_before_authentication(),
            Self::Status(packet) => packet.is_allowed_before_authentication(),
            Self::Login(packet) => packet.is_allowed_before_authentication(),
            Self::Play(packet) => packet.is_allowed_before_authentication(),
        }
    }
}

impl ClientboundPacket {
    pub fn id(&self) -> i32 {
        match self {
            Self::Status(packet) => packet.id(),
            Self::Login(packet) => packet.id(),
            Self::Play(packet) => packet.id(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Status(packet) => packet.name(),
            Self::Login(packet) => packet.name(),
            Self::Play(packet) => packet.name(),
        }
    }

    pub fn phase(&self) -> ProtocolPhase {
        match self {
            Self::Status(_) => ProtocolPhase::Status,
            Self::Login(_) => ProtocolPhase::Login,
            Self::Play(_) => ProtocolPhase::Play,
        }
    }

    pub fn direction(&self) -> Direction {
        Direction::Clientbound
    }

    pub fn is_allowed_before_authentication(&self) -> bool {
        match self {
            Self::Status(packet) => packet.is_allowed_before_authentication(),
            Self::Login(packet) => packet.is_allowed_before_authentication(),
            Self::Play(packet) => packet.is_allowed_before_authentication(),
        }
    }

    /// Type id of the wrapped packet, used for registry lookups.
    pub fn packet_type(&self) -> TypeId {
        match self {
            Self::Status(packet) => packet.packet_type(),
            Self::Login(packet) => packet.packet_type(),
            Self::Play(packet) => packet.packet_type(),
        }
    }
}

impl Encode for ClientboundPacket {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        match self {
            Self::Status(packet) => packet.encode(encoder),
            Self::Login(packet) => packet.encode(encoder),
            Self::Play(packet) => packet.encode(encoder),
        }
    }
}

/// Adds every known packet to `registry`.
pub(crate) fn register_all(registry: &mut PacketRegistry) {
    serverbound::handshake::Packet::register_all(registry);
    serverbound::status::Packet::register_all(registry);
    serverbound::login::Packet::register_all(registry);
    serverbound::play::Packet::register_all(registry);

    clientbound::status::Packet::register_all(registry);
    clientbound::login::Packet::register_all(registry);
    clientbound::play::Packet::register_all(registry);
}

/// Decodes a server-bound packet of type `P` and wraps it in its phase group.
pub(crate) fn decode_into<P, Group>(
    decoder: &mut crate::protocol::Decoder,
) -> Result<ServerboundPacket, DecodeError>
where
    P: Packet + Decode + Into<Group>,
    Group: Into<ServerboundPacket>,
{
    P::decode(decoder).map(|packet| packet.into().into())
}
