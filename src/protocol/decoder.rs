use crate::{
    entity_id::EntityId,
    position::BlockPosition,
    protocol::{MAX_STRING_LENGTH, MAX_UTF8_WIDTH},
};
use std::{convert::Infallible, num::TryFromIntError, str::Utf8Error};

/// An error while decoding packets.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("need {needed} bytes but only {remaining} remain")]
    EndOfStream { needed: usize, remaining: usize },
    #[error("invalid boolean pattern {0} - expected either 0 or 1")]
    InvalidBool(u8),
    #[error("varint is longer than 5 bytes")]
    VarIntTooLong,
    #[error("varlong is longer than 10 bytes")]
    VarLongTooLong,
    #[error("string of {len} exceeds max allowed length {max}")]
    StringTooLong { len: usize, max: usize },
    #[error("invalid utf-8 in string: {0}")]
    Utf8(#[from] Utf8Error),
    #[error(transparent)]
    IntConversion(#[from] TryFromIntError),
    /// Special variant for derive macro integer conversions to work.
    /// Cannot occur.
    #[error(transparent)]
    Infallible(#[from] Infallible),
    #[error("invalid discriminant {value} for {ty}")]
    InvalidDiscriminant { ty: &'static str, value: i64 },
    #[error("frame of {len} bytes exceeds the {max} byte limit")]
    FrameTooLong { len: usize, max: usize },
}

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;

const SEGMENT_BITS: u8 = 0b0111_1111;
const CONTINUE_BIT: u8 = 0b1000_0000;

const MAX_VAR_INT_BYTES: u32 = 5;
const MAX_VAR_LONG_BYTES: u32 = 10;

/// A raw decoder for a Minecraft bitstream.
///
/// Reads move forward only. After an error the position is unspecified
/// and the decoder should be dropped along with its frame.
#[derive(Debug)]
pub struct Decoder<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder from the buffer it will read from.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Gets the remaining buffer.
    pub fn buffer(&self) -> &'a [u8] {
        &self.buffer[self.position..]
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Returns if there is no data left in the buffer.
    pub fn is_finished(&self) -> bool {
        self.remaining() == 0
    }

    /// Consumes `n` bytes from the buffer, returning them as a slice.
    ///
    /// Nothing is consumed if fewer than `n` bytes remain.
    pub fn consume_slice(&mut self, n: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if n <= remaining {
            let data = &self.buffer[self.position..self.position + n];
            self.position += n;
            Ok(data)
        } else {
            Err(DecodeError::EndOfStream {
                needed: n,
                remaining,
            })
        }
    }

    /// Skips over `n` bytes.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.consume_slice(n).map(|_| ())
    }

    /// Consumes `N` bytes into an array.
    pub fn consume<const N: usize>(&mut self) -> Result<[u8; N]> {
        let data = self.consume_slice(N)?;
        let mut bytes = [0; N];
        bytes.copy_from_slice(data);
        Ok(bytes)
    }

    /// Reads an unsigned byte from the stream.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.consume::<1>().map(|[x]| x)
    }

    /// Reads a signed byte from the stream.
    pub fn read_i8(&mut self) -> Result<i8> {
        self.consume().map(i8::from_be_bytes)
    }

    /// Reads an unsigned short from the stream.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.consume().map(u16::from_be_bytes)
    }

    /// Reads a signed short from the stream.
    pub fn read_i16(&mut self) -> Result<i16> {
        self.consume().map(i16::from_be_bytes)
    }

    /// Reads an unsigned int from the stream.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.consume().map(u32::from_be_bytes)
    }

    /// Reads a signed int from the stream.
    pub fn read_i32(&mut self) -> Result<i32> {
        self.consume().map(i32::from_be_bytes)
    }

    /// Reads an unsigned long from the stream.
    pub fn read_u64(&mut self) -> Result<u64> {
        self.consume().map(u64::from_be_bytes)
    }

    /// Reads a signed long from the stream.
    pub fn read_i64(&mut self) -> Result<i64> {
        self.consume().map(i64::from_be_bytes)
    }

    /// Reads a float from the stream.
    pub fn read_f32(&mut self) -> Result<f32> {
        self.consume().map(f32::from_be_bytes)
    }

    /// Reads a double from the stream.
    pub fn read_f64(&mut self) -> Result<f64> {
        self.consume().map(f64::from_be_bytes)
    }

    /// Reads a boolean from the stream.
    pub fn read_bool(&mut self) -> Result<bool> {
        let x = self.read_u8()?;
        match x {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(DecodeError::InvalidBool(x)),
        }
    }

    /// Reads a big-endian UUID from the stream.
    pub fn read_uuid(&mut self) -> Result<u128> {
        self.consume().map(u128::from_be_bytes)
    }

    /// Reads a VarInt from the stream.
    ///
    /// Negative values are transmitted in two's complement and always
    /// occupy five bytes.
    pub fn read_var_int(&mut self) -> Result<i32> {
        self.read_var_u32().map(bytemuck::cast)
    }

    /// Reads a VarInt as the raw unsigned 32 bits it carries.
    pub fn read_var_u32(&mut self) -> Result<u32> {
        let mut result = 0u32;
        for i in 0..MAX_VAR_INT_BYTES {
            let read = self.read_u8()?;
            result |= u32::from(read & SEGMENT_BITS) << (7 * i);
            if read & CONTINUE_BIT == 0 {
                return Ok(result);
            }
        }
        Err(DecodeError::VarIntTooLong)
    }

    /// Reads a VarLong from the stream.
    pub fn read_var_long(&mut self) -> Result<i64> {
        let mut result = 0u64;
        for i in 0..MAX_VAR_LONG_BYTES {
            let read = self.read_u8()?;
            result |= u64::from(read & SEGMENT_BITS) << (7 * i);
            if read & CONTINUE_BIT == 0 {
                return Ok(bytemuck::cast(result));
            }
        }
        Err(DecodeError::VarLongTooLong)
    }

    /// Reads a VarInt length prefix for a list.
    ///
    /// Every element takes at least one byte, so a length larger than
    /// the remaining data is rejected before any element is read.
    pub fn read_length_prefix(&mut self) -> Result<usize> {
        let length = usize::try_from(self.read_var_int()?)?;
        let remaining = self.remaining();
        if length > remaining {
            return Err(DecodeError::EndOfStream {
                needed: length,
                remaining,
            });
        }
        Ok(length)
    }

    pub fn read_block_position(&mut self) -> Result<BlockPosition> {
        self.read_i64().map(BlockPosition::unpack)
    }

    /// Reads a string of at most [`MAX_STRING_LENGTH`] characters.
    pub fn read_string(&mut self) -> Result<&'a str> {
        self.read_string_with_limit(MAX_STRING_LENGTH)
    }

    /// Reads a string of at most `max_chars` characters.
    ///
    /// The byte length is checked against `max_chars` UTF-8 sequences of
    /// maximal width before the body is consumed.
    pub fn read_string_with_limit(&mut self, max_chars: usize) -> Result<&'a str> {
        let length = usize::try_from(self.read_var_int()?)?;
        let max_bytes = max_chars.saturating_mul(MAX_UTF8_WIDTH);
        if length > max_bytes {
            return Err(DecodeError::StringTooLong {
                len: length,
                max: max_bytes,
            });
        }

        let string = std::str::from_utf8(self.consume_slice(length)?)?;
        let chars = string.chars().count();
        if chars > max_chars {
            return Err(DecodeError::StringTooLong {
                len: chars,
                max: max_chars,
            });
        }
        Ok(string)
    }

    /// Reads a fixed-point angle in degrees, in steps of 1/256 of a turn.
    pub fn read_angle(&mut self) -> Result<f32> {
        let fixed = self.read_u8()?;
        Ok(f32::from(fixed) * 360.0 / 256.0)
    }
}

/// A type that can be read from a [`Decoder`].
pub trait Decode: Sized {
    fn decode(decoder: &mut Decoder) -> Result<Self>;
}

impl Decode for u8 {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_u8()
    }
}

impl Decode for i8 {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_i8()
    }
}

impl Decode for u16 {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_u16()
    }
}

impl Decode for i16 {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_i16()
    }
}

impl Decode for u32 {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_u32()
    }
}

impl Decode for i32 {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_i32()
    }
}

impl Decode for u64 {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_u64()
    }
}

impl Decode for i64 {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_i64()
    }
}

impl Decode for f32 {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_f32()
    }
}

impl Decode for f64 {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_f64()
    }
}

impl Decode for bool {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_bool()
    }
}

impl Decode for String {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_string().map(str::to_owned)
    }
}

impl Decode for u128 {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_uuid()
    }
}

impl Decode for BlockPosition {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_block_position()
    }
}

impl Decode for EntityId {
    fn decode(decoder: &mut Decoder) -> Result<Self> {
        decoder.read_var_int().map(EntityId::new)
    }
}

impl Decode for () {
    fn decode(_decoder: &mut Decoder) -> Result<Self> {
        Ok(())
    }
}
