//! Packets sent by the server, one module per phase. These types only
//! implement `Encode`.
//!
//! The handshake phase has no client-bound packets.

pub mod login;
pub mod play;
pub mod status;
