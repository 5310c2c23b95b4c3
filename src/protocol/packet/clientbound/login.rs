use minecraft_protocol_core_macros::{Encode, FromVariants, Packet, PacketSet};

#[derive(Debug, Clone, FromVariants, PacketSet)]
#[packet_set(direction = "clientbound")]
pub enum Packet {
    LoginDisconnect(LoginDisconnect),
    EncryptionRequest(EncryptionRequest),
    LoginSuccess(LoginSuccess),
    SetCompression(SetCompression),
    LoginPluginRequest(LoginPluginRequest),
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x00, phase = "login", direction = "clientbound")]
pub struct LoginDisconnect {
    /// Chat component JSON.
    pub reason: String,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x01, phase = "login", direction = "clientbound")]
pub struct EncryptionRequest {
    #[encoding(max_length = 20)]
    pub server_id: String,
    #[encoding(length_prefix = "varint")]
    pub public_key: Vec<u8>,
    #[encoding(length_prefix = "varint")]
    pub verify_token: Vec<u8>,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x02, phase = "login", direction = "clientbound")]
pub struct LoginSuccess {
    pub uuid: u128,
    #[encoding(max_length = 16)]
    pub username: String,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x03, phase = "login", direction = "clientbound")]
pub struct SetCompression {
    #[encoding(varint)]
    pub threshold: i32,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x04, phase = "login", direction = "clientbound")]
pub struct LoginPluginRequest {
    #[encoding(varint)]
    pub message_id: i32,
    pub channel: String,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Encode, EncodeError, Encoder};

    fn encode(packet: &impl Encode) -> Result<Vec<u8>, EncodeError> {
        let mut buffer = Vec::new();
        packet.encode(&mut Encoder::new(&mut buffer))?;
        Ok(buffer)
    }

    #[test]
    fn encode_login_success() {
        let packet = LoginSuccess {
            uuid: 0x0123_4567_89ab_cdef_0123_4567_89ab_cdef,
            username: "Notch".to_owned(),
        };
        let bytes = encode(&packet).unwrap();
        assert_eq!(&bytes[..16], &0x0123_4567_89ab_cdef_0123_4567_89ab_cdef_u128.to_be_bytes());
        assert_eq!(&bytes[16..], b"\x05Notch");
    }

    #[test]
    fn username_limit_is_enforced() {
        let packet = LoginSuccess {
            uuid: 0,
            username: "a".repeat(17),
        };
        assert!(matches!(
            encode(&packet),
            Err(EncodeError::StringTooLong { len: 17, max: 16 })
        ));
    }

    #[test]
    fn encryption_request_prefixes_arrays() {
        let packet = EncryptionRequest {
            server_id: String::new(),
            public_key: vec![1, 2, 3],
            verify_token: vec![9; 4],
        };
        let bytes = encode(&packet).unwrap();
        assert_eq!(bytes, [0, 3, 1, 2, 3, 4, 9, 9, 9, 9]);
    }

    #[test]
    fn login_set_encodes_through_the_group() {
        let packet = Packet::from(SetCompression { threshold: 256 });
        assert_eq!(packet.id(), 0x03);
        assert_eq!(packet.name(), "SetCompression");
        assert_eq!(encode(&packet).unwrap(), [0x80, 0x02]);
    }
}
