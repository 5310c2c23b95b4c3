//! Packets sent by the client, one module per phase. These types only
//! implement `Decode`.

pub mod handshake;
pub mod login;
pub mod play;
pub mod status;
