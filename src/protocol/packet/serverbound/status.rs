use minecraft_protocol_core_macros::{Decode, FromVariants, Packet, PacketSet};

#[derive(Debug, Clone, FromVariants, PacketSet)]
#[packet_set(direction = "serverbound")]
pub enum Packet {
    Request(Request),
    Ping(Ping),
}

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x00, phase = "status", direction = "serverbound")]
pub struct Request;

#[derive(Debug, Clone, Decode, Packet)]
#[packet(id = 0x01, phase = "status", direction = "serverbound")]
pub struct Ping {
    pub payload: i64,
}
