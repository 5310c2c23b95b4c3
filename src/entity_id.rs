use serde::{Deserialize, Serialize};
use std::fmt;

/// Wrapper for a Minecraft network entity ID.
///
/// Transmitted as a VarInt in every packet that refers to an entity
/// by its network id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(i32);

impl EntityId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn as_i32(self) -> i32 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
