use minecraft_protocol_core_macros::{Encode, FromVariants, Packet, PacketSet};

#[derive(Debug, Clone, FromVariants, PacketSet)]
#[packet_set(direction = "clientbound")]
pub enum Packet {
    Response(Response),
    Pong(Pong),
}

/// Server list entry, as a JSON document.
#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x00, phase = "status", direction = "clientbound")]
pub struct Response {
    pub json_response: String,
}

#[derive(Debug, Clone, Encode, Packet)]
#[packet(id = 0x01, phase = "status", direction = "clientbound")]
pub struct Pong {
    pub payload: i64,
}
