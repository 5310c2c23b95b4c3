use minecraft_protocol_core_macros::{Decode, FromVariants, Packet, PacketSet};

#[derive(Debug, Clone, FromVariants, PacketSet)]
#[packet_set(direction = "serverbound")]
pub enum Packet {
    LoginStart(LoginStart),
    EncryptionResponse(EncryptionResponse),
    LoginPluginResponse(LoginPluginResponse),
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x00, phase = "login", direction = "serverbound")]
pub struct LoginStart {
    #[encoding(max_length = 16)]
    pub name: String,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x01, phase = "login", direction = "serverbound")]
pub struct EncryptionResponse {
    #[encoding(length_prefix = "varint")]
    pub shared_secret: Vec<u8>,
    #[encoding(length_prefix = "varint")]
    pub verify_token: Vec<u8>,
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x02, phase = "login", direction = "serverbound")]
pub struct LoginPluginResponse {
    #[encoding(varint)]
    pub message_id: i32,
    pub successful: bool,
    #[encoding(length_prefix = "inferred")]
    pub data: Vec<u8>,
}
