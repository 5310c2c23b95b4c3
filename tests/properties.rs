//! Property-based tests for the primitive encodings.

#![allow(clippy::unwrap_used)]

use minecraft_protocol_core::{
    protocol::{var_int_size, DecodeError, Decoder, Encoder},
    BlockPosition,
};
use proptest::prelude::*;

fn encoded(write: impl FnOnce(&mut Encoder)) -> Vec<u8> {
    let mut buffer = Vec::new();
    write(&mut Encoder::new(&mut buffer));
    buffer
}

fn angle_distance(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(360.0);
    diff.min(360.0 - diff)
}

// Property: VarInts round-trip and have the predicted size
proptest! {
    #[test]
    fn prop_var_int_roundtrip(value in any::<i32>()) {
        let bytes = encoded(|e| {
            e.write_var_int(value);
        });
        prop_assert_eq!(bytes.len(), var_int_size(value));
        prop_assert!((1..=5).contains(&bytes.len()));
        if value < 0 {
            prop_assert_eq!(bytes.len(), 5);
        }

        let mut decoder = Decoder::new(&bytes);
        prop_assert_eq!(decoder.read_var_int().unwrap(), value);
        prop_assert!(decoder.is_finished());
    }
}

// Property: VarLongs round-trip in at most ten bytes
proptest! {
    #[test]
    fn prop_var_long_roundtrip(value in any::<i64>()) {
        let bytes = encoded(|e| {
            e.write_var_long(value);
        });
        prop_assert!((1..=10).contains(&bytes.len()));
        prop_assert_eq!(Decoder::new(&bytes).read_var_long().unwrap(), value);
    }
}

// Property: A truncated VarInt is an error, never a partial value
proptest! {
    #[test]
    fn prop_truncated_var_int_fails(value in any::<i32>(), cut in 0usize..5) {
        let bytes = encoded(|e| {
            e.write_var_int(value);
        });
        prop_assume!(cut < bytes.len());
        let result = Decoder::new(&bytes[..cut]).read_var_int();
        let is_end_of_stream = matches!(result, Err(DecodeError::EndOfStream { .. }));
        prop_assert!(is_end_of_stream);
    }
}

// Property: Strings round-trip with a byte-length prefix
proptest! {
    #[test]
    fn prop_string_roundtrip(value in "\\PC{0,64}") {
        let bytes = encoded(|e| {
            e.write_string(&value).unwrap();
        });
        let mut decoder = Decoder::new(&bytes);
        prop_assert_eq!(decoder.read_var_int().unwrap() as usize, value.len());

        let mut decoder = Decoder::new(&bytes);
        prop_assert_eq!(decoder.read_string().unwrap(), value.as_str());
        prop_assert!(decoder.is_finished());
    }
}

// Property: The string limit counts characters, so wide text past 32767
// bytes still round-trips
proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn prop_wide_string_roundtrip(
        ch in prop::sample::select(vec!['é', '中', '🦀']),
        count in 16_384usize..=32_767,
    ) {
        let value: String = std::iter::repeat(ch).take(count).collect();
        let bytes = encoded(|e| {
            e.write_string(&value).unwrap();
        });
        let mut decoder = Decoder::new(&bytes);
        prop_assert_eq!(decoder.read_string().unwrap(), value.as_str());
        prop_assert!(decoder.is_finished());
    }
}

// Property: Positions in range round-trip through the packed word
proptest! {
    #[test]
    fn prop_position_roundtrip(
        x in -(1i32 << 25)..(1i32 << 25),
        y in 0i32..4096,
        z in -(1i32 << 25)..(1i32 << 25),
    ) {
        let position = BlockPosition::new(x, y, z);
        let bytes = encoded(|e| e.write_block_position(position).unwrap());
        prop_assert_eq!(Decoder::new(&bytes).read_block_position().unwrap(), position);
    }
}

// Property: Every 64-bit word is a position that packs back to itself
proptest! {
    #[test]
    fn prop_position_unpack_is_lossless(word in any::<i64>()) {
        let position = BlockPosition::unpack(word);
        prop_assert!((0..4096).contains(&position.y));
        prop_assert_eq!(position.pack().unwrap(), word);
    }
}

// Property: Every angle byte survives a decode and re-encode
proptest! {
    #[test]
    fn prop_angle_byte_roundtrip(step in any::<u8>()) {
        let degrees = Decoder::new(&[step]).read_angle().unwrap();
        let bytes = encoded(|e| e.write_angle(degrees).unwrap());
        prop_assert_eq!(bytes, vec![step]);
    }
}

// Property: Encoding an angle loses at most half a step
proptest! {
    #[test]
    fn prop_angle_precision(degrees in -720.0f32..720.0) {
        let bytes = encoded(|e| e.write_angle(degrees).unwrap());
        let decoded = Decoder::new(&bytes).read_angle().unwrap();
        prop_assert!(angle_distance(decoded, degrees) <= 360.0 / 512.0 + 1e-3);
    }
}
