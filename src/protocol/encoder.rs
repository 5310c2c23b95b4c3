use crate::{
    entity_id::EntityId,
    position::BlockPosition,
    protocol::MAX_STRING_LENGTH,
};
use std::{convert::Infallible, num::TryFromIntError};

/// An error while encoding packets.
///
/// These are always caused by the caller handing over a value
/// that has no wire representation.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("{axis} coordinate {value} is outside {min}..={max}")]
    CoordinateOutOfRange {
        axis: char,
        value: i32,
        min: i32,
        max: i32,
    },
    #[error("angle {0} is not a finite number of degrees")]
    AngleOutOfRange(f32),
    #[error("string of {len} exceeds max allowed length {max}")]
    StringTooLong { len: usize, max: usize },
    #[error(transparent)]
    IntConversion(#[from] TryFromIntError),
    /// Special variant for derive macro integer conversions to work.
    /// Cannot occur.
    #[error(transparent)]
    Infallible(#[from] Infallible),
}

pub type Result<T, E = EncodeError> = std::result::Result<T, E>;

/// A raw encoder for a Minecraft bitstream.
#[derive(Debug)]
pub struct Encoder<'a> {
    buffer: &'a mut Vec<u8>,
}

impl<'a> Encoder<'a> {
    /// Creates an encoder that will append to the provided
    /// byte buffer.
    ///
    /// Any existing contents of `buffer` are left untouched.
    pub fn new(buffer: &'a mut Vec<u8>) -> Self {
        Self { buffer }
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Drops everything written after the buffer had length `len`.
    pub fn truncate(&mut self, len: usize) {
        self.buffer.truncate(len);
    }

    /// Writes an unsigned byte to the stream.
    pub fn write_u8(&mut self, x: u8) {
        self.buffer.push(x);
    }

    /// Writes a signed byte to the stream.
    pub fn write_i8(&mut self, x: i8) {
        self.write_u8(bytemuck::cast(x));
    }

    /// Writes an unsigned short to the stream.
    pub fn write_u16(&mut self, x: u16) {
        self.buffer.extend(x.to_be_bytes());
    }

    /// Writes a signed short to the stream.
    pub fn write_i16(&mut self, x: i16) {
        self.buffer.extend(x.to_be_bytes());
    }

    /// Writes an unsigned int to the stream.
    pub fn write_u32(&mut self, x: u32) {
        self.buffer.extend(x.to_be_bytes());
    }

    /// Writes a signed int to the stream.
    pub fn write_i32(&mut self, x: i32) {
        self.buffer.extend(x.to_be_bytes());
    }

    /// Writes an unsigned long to the stream.
    pub fn write_u64(&mut self, x: u64) {
        self.buffer.extend(x.to_be_bytes());
    }

    /// Writes a signed long to the stream.
    pub fn write_i64(&mut self, x: i64) {
        self.buffer.extend(x.to_be_bytes());
    }

    /// Writes a float to the stream.
    pub fn write_f32(&mut self, x: f32) {
        self.buffer.extend(x.to_be_bytes());
    }

    /// Writes a double to the stream.
    pub fn write_f64(&mut self, x: f64) {
        self.buffer.extend(x.to_be_bytes());
    }

    /// Writes a boolean to the stream.
    pub fn write_bool(&mut self, x: bool) {
        self.write_u8(if x { 0x01 } else { 0x00 });
    }

    /// Writes a big-endian UUID to the stream.
    pub fn write_uuid(&mut self, x: u128) {
        self.buffer.extend(x.to_be_bytes());
    }

    /// Writes a series of bytes to the stream. Does not write
    /// any sort of length prefix.
    pub fn write_slice(&mut self, slice: &[u8]) {
        self.buffer.extend_from_slice(slice);
    }

    /// Writes a VarInt to the stream. Returns the number of bytes written.
    pub fn write_var_int(&mut self, x: i32) -> usize {
        self.write_var_u32(bytemuck::cast(x))
    }

    /// Writes the raw unsigned 32 bits of a VarInt. Returns the number
    /// of bytes written.
    pub fn write_var_u32(&mut self, mut x: u32) -> usize {
        let mut bytes_written = 0;
        loop {
            let mut temp = (x & 0b0111_1111) as u8;
            x >>= 7;
            if x != 0 {
                temp |= 0b1000_0000;
            }

            self.buffer.push(temp);
            bytes_written += 1;

            if x == 0 {
                break bytes_written;
            }
        }
    }

    /// Writes a VarLong to the stream. Returns the number of bytes written.
    pub fn write_var_long(&mut self, x: i64) -> usize {
        let mut x: u64 = bytemuck::cast(x);
        let mut bytes_written = 0;
        loop {
            let mut temp = (x & 0b0111_1111) as u8;
            x >>= 7;
            if x != 0 {
                temp |= 0b1000_0000;
            }

            self.buffer.push(temp);
            bytes_written += 1;

            if x == 0 {
                break bytes_written;
            }
        }
    }

    /// Writes a varint-prefixed string of at most [`MAX_STRING_LENGTH`]
    /// characters.
    pub fn write_string(&mut self, x: &str) -> Result<()> {
        self.write_string_with_limit(x, MAX_STRING_LENGTH)
    }

    /// Writes a string of at most `max_chars` characters.
    pub fn write_string_with_limit(&mut self, x: &str, max_chars: usize) -> Result<()> {
        let chars = x.chars().count();
        if chars > max_chars {
            return Err(EncodeError::StringTooLong {
                len: chars,
                max: max_chars,
            });
        }
        self.write_var_int(x.len().try_into()?);
        self.buffer.extend_from_slice(x.as_bytes());
        Ok(())
    }

    /// Writes a fixed-point-encoded angle to the stream.
    ///
    /// Angles outside `[0, 360)` wrap around. The value is rounded to the
    /// nearest of 256 steps per turn.
    pub fn write_angle(&mut self, degrees: f32) -> Result<()> {
        if !degrees.is_finite() {
            return Err(EncodeError::AngleOutOfRange(degrees));
        }
        let steps = (degrees.rem_euclid(360.0) / 360.0 * 256.0).round() as u32;
        self.write_u8((steps % 256) as u8);
        Ok(())
    }

    pub fn write_block_position(&mut self, position: BlockPosition) -> Result<()> {
        self.write_i64(position.pack()?);
        Ok(())
    }
}

/// Number of bytes `x` occupies as a VarInt.
pub fn var_int_size(x: i32) -> usize {
    Encoder::new(&mut Vec::with_capacity(5)).write_var_int(x)
}

/// A type that can be written to an [`Encoder`].
pub trait Encode {
    fn encode(&self, encoder: &mut Encoder) -> Result<()>;
}

impl Encode for u8 {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_u8(*self);
        Ok(())
    }
}

impl Encode for i8 {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_i8(*self);
        Ok(())
    }
}

impl Encode for u16 {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_u16(*self);
        Ok(())
    }
}

impl Encode for i16 {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_i16(*self);
        Ok(())
    }
}

impl Encode for u32 {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_u32(*self);
        Ok(())
    }
}

impl Encode for i32 {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_i32(*self);
        Ok(())
    }
}

impl Encode for u64 {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_u64(*self);
        Ok(())
    }
}

impl Encode for i64 {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_i64(*self);
        Ok(())
    }
}

impl Encode for f32 {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_f32(*self);
        Ok(())
    }
}

impl Encode for f64 {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_f64(*self);
        Ok(())
    }
}

impl Encode for bool {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_bool(*self);
        Ok(())
    }
}

impl Encode for String {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_string(self)
    }
}

impl Encode for u128 {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_uuid(*self);
        Ok(())
    }
}

impl Encode for BlockPosition {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_block_position(*self)
    }
}

impl Encode for EntityId {
    fn encode(&self, encoder: &mut Encoder) -> Result<()> {
        encoder.write_var_int(self.as_i32());
        Ok(())
    }
}

impl Encode for () {
    fn encode(&self, _encoder: &mut Encoder) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Decoder;

    fn encoded(f: impl FnOnce(&mut Encoder)) -> Vec<u8> {
        let mut buf = Vec::new();
        f(&mut Encoder::new(&mut buf));
        buf
    }

    #[test]
    fn var_int_boundaries() {
        assert_eq!(encoded(|e| _ = e.write_var_int(0)), [0x00]);
        assert_eq!(encoded(|e| _ = e.write_var_int(127)), [0x7f]);
        assert_eq!(encoded(|e| _ = e.write_var_int(128)), [0x80, 0x01]);
        assert_eq!(
            encoded(|e| _ = e.write_var_u32(u32::MAX)),
            [0xff, 0xff, 0xff, 0xff, 0x0f]
        );
        assert_eq!(
            encoded(|e| _ = e.write_var_int(i32::MIN)),
            [0x80, 0x80, 0x80, 0x80, 0x08]
        );
    }

    #[test]
    fn var_int_size_matches_written() {
        for value in [0, 1, 127, 128, 16383, 16384, 2_097_151, 2_097_152, i32::MAX, -1] {
            let bytes = encoded(|e| _ = e.write_var_int(value));
            assert_eq!(var_int_size(value), bytes.len(), "size of {value}");
        }
        assert_eq!(var_int_size(-1), 5);
    }

    #[test]
    fn var_long_negative_takes_ten_bytes() {
        let bytes = encoded(|e| {
            e.write_var_long(-1);
        });
        assert_eq!(bytes.len(), 10);
        assert_eq!(Decoder::new(&bytes).read_var_long().unwrap(), -1);
    }

    #[test]
    fn string_length_is_utf8_bytes() {
        let bytes = encoded(|e| e.write_string("héllo").unwrap());
        assert_eq!(bytes[0], 6);
        assert_eq!(&bytes[1..], "héllo".as_bytes());
    }

    #[test]
    fn string_limit_rejects_long_input() {
        let mut buf = Vec::new();
        let mut encoder = Encoder::new(&mut buf);
        assert!(matches!(
            encoder.write_string_with_limit("seventeen_letters", 16),
            Err(EncodeError::StringTooLong { len: 17, max: 16 })
        ));
        assert!(encoder.is_empty());
    }

    #[test]
    fn string_limit_counts_characters_not_bytes() {
        // 11 000 characters, 33 000 bytes.
        let text = "中".repeat(11_000);
        let bytes = encoded(|e| e.write_string(&text).unwrap());
        assert_eq!(bytes.len(), var_int_size(33_000) + 33_000);
        assert_eq!(Decoder::new(&bytes).read_string().unwrap(), text);

        let mut buf = Vec::new();
        let mut encoder = Encoder::new(&mut buf);
        let too_long = "é".repeat(MAX_STRING_LENGTH + 1);
        assert!(matches!(
            encoder.write_string(&too_long),
            Err(EncodeError::StringTooLong {
                len: 32768,
                max: 32767
            })
        ));
        assert!(encoder.is_empty());
    }

    #[test]
    fn angle_rounds_to_nearest_step() {
        assert_eq!(encoded(|e| e.write_angle(0.0).unwrap()), [0]);
        assert_eq!(encoded(|e| e.write_angle(90.0).unwrap()), [64]);
        assert_eq!(encoded(|e| e.write_angle(180.0).unwrap()), [128]);
        assert_eq!(encoded(|e| e.write_angle(359.9).unwrap()), [0]);
    }

    #[test]
    fn angle_wraps_around() {
        assert_eq!(encoded(|e| e.write_angle(-90.0).unwrap()), [192]);
        assert_eq!(encoded(|e| e.write_angle(450.0).unwrap()), [64]);
    }

    #[test]
    fn angle_round_trip_within_one_step() {
        let bytes = encoded(|e| e.write_angle(91.0).unwrap());
        let decoded = Decoder::new(&bytes).read_angle().unwrap();
        assert!((decoded - 91.0).abs() <= 360.0 / 256.0);
    }

    #[test]
    fn angle_rejects_non_finite() {
        let mut buf = Vec::new();
        let mut encoder = Encoder::new(&mut buf);
        assert!(matches!(
            encoder.write_angle(f32::NAN),
            Err(EncodeError::AngleOutOfRange(_))
        ));
        assert!(encoder.write_angle(f32::INFINITY).is_err());
        assert!(encoder.is_empty());
    }

    #[test]
    fn position_out_of_range_writes_nothing() {
        let mut buf = Vec::new();
        let mut encoder = Encoder::new(&mut buf);
        let result = encoder.write_block_position(BlockPosition { x: 0, y: 4096, z: 0 });
        assert!(matches!(
            result,
            Err(EncodeError::CoordinateOutOfRange { axis: 'y', .. })
        ));
        assert!(encoder.is_empty());
    }
}
