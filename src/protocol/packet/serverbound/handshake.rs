use crate::protocol::ProtocolPhase;
use minecraft_protocol_core_macros::{Decode, FromVariants, Packet, PacketSet};

#[derive(Debug, Clone, FromVariants, PacketSet)]
#[packet_set(direction = "serverbound")]
pub enum Packet {
    Handshake(Handshake),
}

/// First packet of every connection.
#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x00, phase = "handshake", direction = "serverbound")]
pub struct Handshake {
    #[encoding(varint)]
    pub protocol_version: i32,
    #[encoding(max_length = 255)]
    pub server_address: String,
    pub server_port: u16,
    pub next_state: NextState,
}

impl Handshake {
    /// Phase the connection moves to once this packet is handled.
    pub fn next_phase(&self) -> ProtocolPhase {
        match self.next_state {
            NextState::Status => ProtocolPhase::Status,
            NextState::Login => ProtocolPhase::Login,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Decode)]
#[encoding(discriminant = "varint")]
pub enum NextState {
    #[encoding(id = 1)]
    Status,
    #[encoding(id = 2)]
    Login,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Decode, DecodeError, Decoder, Encoder};

    fn handshake_bytes(next_state: i32) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut encoder = Encoder::new(&mut buffer);
        encoder.write_var_int(754);
        encoder.write_string("localhost").unwrap();
        encoder.write_u16(25565);
        encoder.write_var_int(next_state);
        buffer
    }

    #[test]
    fn decode_login_handshake() {
        let bytes = handshake_bytes(2);
        let mut decoder = Decoder::new(&bytes);
        let handshake = Handshake::decode(&mut decoder).unwrap();
        assert!(decoder.is_finished());

        assert_eq!(handshake.protocol_version, 754);
        assert_eq!(handshake.server_address, "localhost");
        assert_eq!(handshake.server_port, 25565);
        assert_eq!(handshake.next_phase(), ProtocolPhase::Login);
    }

    #[test]
    fn reject_unknown_next_state() {
        let bytes = handshake_bytes(3);
        assert!(matches!(
            Handshake::decode(&mut Decoder::new(&bytes)),
            Err(DecodeError::InvalidDiscriminant {
                ty: "NextState",
                value: 3
            })
        ));
    }
}
