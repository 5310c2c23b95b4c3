//! Packet codec for the Minecraft: Java Edition protocol, version 754.
//!
//! A connection moves through the handshake, status or login, and play
//! phases. Each phase has its own packet id space in each direction, so a
//! packet is identified by `(phase, direction, id)`.
//!
//! This crate takes the server's side of the connection:
//! * server-bound packets are decoded from frames with
//!   [`protocol::codec::decode_frame`] and handed to a handler through
//!   [`protocol::dispatch::Dispatcher`];
//! * client-bound packets are encoded with
//!   [`protocol::codec::encode_packet`], which prefixes the packet id
//!   looked up in [`protocol::registry`].
//!
//! Socket I/O, compression and encryption are left to the caller.

pub mod entity_id;
pub mod position;
pub mod protocol;

pub use entity_id::EntityId;
pub use position::{BlockPosition, ChunkPosition};
