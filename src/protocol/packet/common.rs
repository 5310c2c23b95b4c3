//! Field types shared by both directions.

use crate::protocol::{Decode, DecodeError, Decoder, Encode, EncodeError, Encoder};
use minecraft_protocol_core_macros::{Decode, Encode};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Encode, Decode)]
#[encoding(discriminant = "varint")]
pub enum Hand {
    #[encoding(id = 0)]
    Main,
    #[encoding(id = 1)]
    Off,
}

bitflags::bitflags! {
    /// Player ability bits. The client only ever reports `FLYING`.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct AbilityFlags: u8 {
        const INVULNERABLE = 0x01;
        const FLYING = 0x02;
        const ALLOW_FLYING = 0x04;
        const CREATIVE_MODE = 0x08;
    }
}

impl Decode for AbilityFlags {
    fn decode(decoder: &mut Decoder) -> Result<Self, DecodeError> {
        // Unknown bits are kept rather than dropped.
        decoder.read_u8().map(Self::from_bits_retain)
    }
}

impl Encode for AbilityFlags {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodeError> {
        encoder.write_u8(self.bits());
        Ok(())
    }
}
