use crate::protocol::EncodeError;
use serde::{Deserialize, Serialize};

const HORIZONTAL_BITS: u32 = 26;
const VERTICAL_BITS: u32 = 12;

const HORIZONTAL_MIN: i32 = -(1 << (HORIZONTAL_BITS - 1));
const HORIZONTAL_MAX: i32 = (1 << (HORIZONTAL_BITS - 1)) - 1;
const VERTICAL_MAX: i32 = (1 << VERTICAL_BITS) - 1;

const HORIZONTAL_MASK: i64 = (1 << HORIZONTAL_BITS) - 1;
const VERTICAL_MASK: i64 = (1 << VERTICAL_BITS) - 1;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPosition {
    pub x: i32,
    pub z: i32,
}

/// Block coordinates, transmitted packed into one 64-bit word as
/// `[x: 26 bits][z: 26 bits][y: 12 bits]`.
///
/// `x` and `z` are signed; `y` is unsigned in `0..=4095`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn chunk(self) -> ChunkPosition {
        ChunkPosition {
            x: self.x.div_euclid(16),
            z: self.z.div_euclid(16),
        }
    }

    /// Unpacks a position word. Every 64-bit value is a valid position.
    pub fn unpack(value: i64) -> Self {
        let x = (value >> 38) as i32;
        let y = (value & VERTICAL_MASK) as i32;
        let z = (value << 26 >> 38) as i32;

        Self { x, y, z }
    }

    /// Packs the position into one word, failing if a component
    /// does not fit its field.
    pub fn pack(self) -> Result<i64, EncodeError> {
        check_range('x', self.x, HORIZONTAL_MIN, HORIZONTAL_MAX)?;
        check_range('y', self.y, 0, VERTICAL_MAX)?;
        check_range('z', self.z, HORIZONTAL_MIN, HORIZONTAL_MAX)?;

        let x = i64::from(self.x) & HORIZONTAL_MASK;
        let y = i64::from(self.y) & VERTICAL_MASK;
        let z = i64::from(self.z) & HORIZONTAL_MASK;
        Ok((x << 38) | (z << 12) | y)
    }
}

fn check_range(axis: char, value: i32, min: i32, max: i32) -> Result<(), EncodeError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(EncodeError::CoordinateOutOfRange {
            axis,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_packs_to_zero() {
        assert_eq!(BlockPosition::new(0, 0, 0).pack().unwrap(), 0);
        assert_eq!(BlockPosition::unpack(0), BlockPosition::new(0, 0, 0));
    }

    #[test]
    fn negative_x_sets_top_bits() {
        let packed = BlockPosition::new(-1, 0, 0).pack().unwrap();
        assert_eq!(packed as u64 >> 38, (1 << 26) - 1);
        assert_eq!(packed & ((1 << 38) - 1), 0);
        assert_eq!(BlockPosition::unpack(packed), BlockPosition::new(-1, 0, 0));
    }

    #[test]
    fn known_layout() {
        let packed = 0x4607_632c_15b4_833f_i64;
        let position = BlockPosition::unpack(packed);
        assert_eq!(position, BlockPosition::new(18_357_644, 831, -20_882_616));
        assert_eq!(position.pack().unwrap(), packed);
    }

    #[test]
    fn extremes_round_trip() {
        for position in [
            BlockPosition::new(HORIZONTAL_MIN, 0, HORIZONTAL_MAX),
            BlockPosition::new(HORIZONTAL_MAX, VERTICAL_MAX, HORIZONTAL_MIN),
            BlockPosition::new(-30_000_000, 255, 30_000_000),
        ] {
            let packed = position.pack().unwrap();
            assert_eq!(BlockPosition::unpack(packed), position);
        }
    }

    #[test]
    fn out_of_range_components() {
        assert!(matches!(
            BlockPosition::new(HORIZONTAL_MAX + 1, 0, 0).pack(),
            Err(EncodeError::CoordinateOutOfRange { axis: 'x', .. })
        ));
        assert!(matches!(
            BlockPosition::new(0, -1, 0).pack(),
            Err(EncodeError::CoordinateOutOfRange { axis: 'y', .. })
        ));
        assert!(matches!(
            BlockPosition::new(0, 0, HORIZONTAL_MIN - 1).pack(),
            Err(EncodeError::CoordinateOutOfRange { axis: 'z', .. })
        ));
    }

    #[test]
    fn chunk_of_negative_block() {
        assert_eq!(
            BlockPosition::new(-1, 64, 17).chunk(),
            ChunkPosition { x: -1, z: 1 }
        );
    }
}
