//! Packet-level framing: a VarInt packet id followed by the packet body.
//!
//! Outer framing (length prefix, compression, encryption) belongs to the
//! connection layer. [`read_frame`] and [`write_frame`] only cover the plain
//! length prefix used before compression is enabled.

use crate::protocol::{
    packet::{ClientboundPacket, Operation, Packet, PacketError, ServerboundPacket},
    registry::registry,
    var_int_size, DecodeError, Decoder, Direction, Encode, EncodeError, Encoder, ProtocolPhase,
    BUFFER_LIMIT,
};

/// Reads a packet id and the matching server-bound packet body.
///
/// On failure the decoder position is unspecified and the frame should be
/// dropped.
pub fn read_packet(
    phase: ProtocolPhase,
    decoder: &mut Decoder,
) -> Result<ServerboundPacket, PacketError> {
    let id = decoder.read_var_int()?;
    let descriptor = registry()
        .resolve(phase, Direction::Serverbound, id)
        .map_err(|e| {
            tracing::warn!("Received unknown packet id {id:#04x} in {phase} phase");
            e
        })?;
    descriptor.decode(decoder)
}

/// Decodes one complete frame holding a single packet.
///
/// Bytes left over after the packet body are logged but not rejected.
pub fn decode_frame(phase: ProtocolPhase, frame: &[u8]) -> Result<ServerboundPacket, PacketError> {
    let mut decoder = Decoder::new(frame);
    let packet = read_packet(phase, &mut decoder)?;
    if !decoder.is_finished() {
        tracing::warn!(
            "{} left {} trailing bytes in its frame",
            packet.name(),
            decoder.remaining()
        );
    }
    Ok(packet)
}

/// Writes the id and body of a client-bound packet.
///
/// Nothing is left in the buffer if the packet fails to encode.
pub fn write_packet<P: Packet + Encode>(
    packet: &P,
    encoder: &mut Encoder,
) -> Result<(), PacketError> {
    if !P::DIRECTION.can_encode() {
        return Err(PacketError::UnsupportedDirection {
            name: P::NAME,
            direction: P::DIRECTION,
            operation: Operation::Encode,
        });
    }
    let descriptor = registry().descriptor_of::<P>()?;
    let start = encoder.len();
    encoder.write_var_int(descriptor.id());
    if let Err(e) = packet.encode(encoder) {
        encoder.truncate(start);
        return Err(e.into());
    }
    Ok(())
}

/// Encodes a client-bound packet into a new buffer.
pub fn encode_packet<P: Packet + Encode>(packet: &P) -> Result<Vec<u8>, PacketError> {
    let mut buffer = Vec::new();
    write_packet(packet, &mut Encoder::new(&mut buffer))?;
    Ok(buffer)
}

/// Encodes any client-bound packet into a new buffer.
pub fn encode_clientbound(packet: &ClientboundPacket) -> Result<Vec<u8>, PacketError> {
    let descriptor = registry()
        .descriptor_for_type(packet.packet_type())
        .ok_or(PacketError::Unregistered(packet.name()))?;

    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer);
    encoder.write_var_int(descriptor.id());
    packet.encode(&mut encoder)?;
    Ok(buffer)
}

/// Reads one length-prefixed frame.
pub fn read_frame<'a>(decoder: &mut Decoder<'a>) -> Result<&'a [u8], DecodeError> {
    let length = usize::try_from(decoder.read_var_int()?)?;
    if length > BUFFER_LIMIT {
        return Err(DecodeError::FrameTooLong {
            len: length,
            max: BUFFER_LIMIT,
        });
    }
    decoder.consume_slice(length)
}

/// Prefixes `body` with its length.
pub fn write_frame(body: &[u8]) -> Result<Vec<u8>, EncodeError> {
    let length = i32::try_from(body.len())?;
    let mut buffer = Vec::with_capacity(var_int_size(length) + body.len());
    let mut encoder = Encoder::new(&mut buffer);
    encoder.write_var_int(length);
    encoder.write_slice(body);
    Ok(buffer)
}
