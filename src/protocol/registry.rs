//! Maps `(phase, direction, id)` to packet types and back.
//!
//! The table is built once on first use and is read-only afterwards, so it
//! can be shared between connections without locking.

use crate::protocol::{
    packet::{self, Operation, Packet, PacketError, ServerboundPacket},
    Decode, Decoder, Direction, ProtocolPhase,
};
use ahash::AHashMap;
use std::any::TypeId;

type DecodeFn = fn(&mut Decoder) -> Result<ServerboundPacket, crate::protocol::DecodeError>;

/// Composite key identifying a packet on the wire.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PacketKey {
    pub phase: ProtocolPhase,
    pub direction: Direction,
    pub id: i32,
}

impl PacketKey {
    pub fn new(phase: ProtocolPhase, direction: Direction, id: i32) -> Self {
        Self {
            phase,
            direction,
            id,
        }
    }

    fn of<P: Packet>() -> Self {
        Self::new(P::PHASE, P::DIRECTION, P::ID)
    }
}

/// Registry entry for one packet type.
#[derive(Clone, Debug)]
pub struct PacketDescriptor {
    key: PacketKey,
    name: &'static str,
    allowed_before_authentication: bool,
    type_id: TypeId,
    decode: Option<DecodeFn>,
}

impl PacketDescriptor {
    fn of<P: Packet>(decode: Option<DecodeFn>) -> Self {
        Self {
            key: PacketKey::of::<P>(),
            name: P::NAME,
            allowed_before_authentication: P::ALLOWED_BEFORE_AUTHENTICATION,
            type_id: TypeId::of::<P>(),
            decode,
        }
    }

    pub fn key(&self) -> PacketKey {
        self.key
    }

    pub fn id(&self) -> i32 {
        self.key.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn phase(&self) -> ProtocolPhase {
        self.key.phase
    }

    pub fn direction(&self) -> Direction {
        self.key.direction
    }

    pub fn is_allowed_before_authentication(&self) -> bool {
        self.allowed_before_authentication
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Decodes a packet body of this type.
    ///
    /// Client-bound types cannot be decoded. They fail before the decoder
    /// is touched.
    pub fn decode(&self, decoder: &mut Decoder) -> Result<ServerboundPacket, PacketError> {
        let Some(decode) = self.decode else {
            return Err(PacketError::UnsupportedDirection {
                name: self.name,
                direction: self.key.direction,
                operation: Operation::Decode,
            });
        };
        Ok(decode(decoder)?)
    }
}

/// Lookup tables for every known packet type.
#[derive(Debug, Default)]
pub struct PacketRegistry {
    by_key: AHashMap<PacketKey, PacketDescriptor>,
    by_type: AHashMap<TypeId, PacketKey>,
}

impl PacketRegistry {
    /// Creates a registry containing every packet of this protocol version.
    pub fn new() -> Self {
        let mut registry = Self::default();
        packet::register_all(&mut registry);
        registry
    }

    /// Registers a server-bound packet, decoded into its phase group `G`.
    pub fn register_serverbound<P, G>(&mut self)
    where
        P: Packet + Decode + Into<G>,
        G: Into<ServerboundPacket>,
    {
        assert_eq!(
            P::DIRECTION,
            Direction::Serverbound,
            "{} is not server-bound",
            P::NAME
        );
        self.insert(PacketDescriptor::of::<P>(Some(packet::decode_into::<P, G>)));
    }

    /// Registers a client-bound packet. These have no decode path.
    pub fn register_clientbound<P: Packet>(&mut self) {
        assert_eq!(
            P::DIRECTION,
            Direction::Clientbound,
            "{} is not client-bound",
            P::NAME
        );
        self.insert(PacketDescriptor::of::<P>(None));
    }

    fn insert(&mut self, descriptor: PacketDescriptor) {
        let key = descriptor.key;
        let name = descriptor.name;
        if let Some(existing) = self.by_key.insert(key, descriptor) {
            panic!(
                "packet id {:#04x} in {} {} registered for both {} and {}",
                key.id, key.phase, key.direction, existing.name, name
            );
        }
        let previous = self.by_type.insert(self.by_key[&key].type_id, key);
        assert!(previous.is_none(), "packet type {name} registered twice");
    }

    /// Looks up the packet type for an id received in `phase`.
    pub fn resolve(
        &self,
        phase: ProtocolPhase,
        direction: Direction,
        id: i32,
    ) -> Result<&PacketDescriptor, PacketError> {
        self.by_key
            .get(&PacketKey::new(phase, direction, id))
            .ok_or(PacketError::UnknownPacket {
                phase,
                direction,
                id,
            })
    }

    /// Gets the entry for a statically known packet type.
    pub fn descriptor_of<P: Packet>(&self) -> Result<&PacketDescriptor, PacketError> {
        self.descriptor_for_type(TypeId::of::<P>())
            .ok_or(PacketError::Unregistered(P::NAME))
    }

    pub fn descriptor_for_type(&self, type_id: TypeId) -> Option<&PacketDescriptor> {
        self.by_type.get(&type_id).and_then(|key| self.by_key.get(key))
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PacketDescriptor> + '_ {
        self.by_key.values()
    }
}

static REGISTRY: once_cell::sync::Lazy<PacketRegistry> =
    once_cell::sync::Lazy::new(PacketRegistry::new);

/// The shared registry of all packets.
pub fn registry() -> &'static PacketRegistry {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::packet::{clientbound, serverbound};

    #[test]
    fn catalog_sizes() {
        let registry = registry();
        let count = |phase: ProtocolPhase, direction: Direction| {
            registry
                .iter()
                .filter(|d| d.phase() == phase && d.direction() == direction)
                .count()
        };
        assert_eq!(count(ProtocolPhase::Handshake, Direction::Serverbound), 1);
        assert_eq!(count(ProtocolPhase::Handshake, Direction::Clientbound), 0);
        assert_eq!(count(ProtocolPhase::Status, Direction::Serverbound), 2);
        assert_eq!(count(ProtocolPhase::Status, Direction::Clientbound), 2);
        assert_eq!(count(ProtocolPhase::Login, Direction::Serverbound), 3);
        assert_eq!(count(ProtocolPhase::Login, Direction::Clientbound), 5);
        assert_eq!(count(ProtocolPhase::Play, Direction::Serverbound), 48);
        assert_eq!(count(ProtocolPhase::Play, Direction::Clientbound), 91);
        assert_eq!(registry.len(), 152);
    }

    #[test]
    fn same_id_resolves_per_phase() {
        let registry = registry();
        let play = registry
            .resolve(ProtocolPhase::Play, Direction::Serverbound, 0x00)
            .unwrap();
        let login = registry
            .resolve(ProtocolPhase::Login, Direction::Serverbound, 0x00)
            .unwrap();
        assert_eq!(play.name(), "TeleportConfirm");
        assert_eq!(login.name(), "LoginStart");
        assert_ne!(play.type_id(), login.type_id());
    }

    #[test]
    fn same_id_resolves_per_direction() {
        let registry = registry();
        let serverbound = registry
            .resolve(ProtocolPhase::Play, Direction::Serverbound, 0x10)
            .unwrap();
        let clientbound = registry
            .resolve(ProtocolPhase::Play, Direction::Clientbound, 0x10)
            .unwrap();
        assert_eq!(serverbound.name(), "KeepAlive");
        assert_eq!(clientbound.name(), "DeclareCommands");
    }

    #[test]
    fn unknown_id() {
        assert!(matches!(
            registry().resolve(ProtocolPhase::Status, Direction::Serverbound, 0x02),
            Err(PacketError::UnknownPacket { id: 0x02, .. })
        ));
    }

    #[test]
    fn descriptor_round_trip() {
        let registry = registry();
        let descriptor = registry
            .descriptor_of::<clientbound::play::MultiBlockChange>()
            .unwrap();
        assert_eq!(descriptor.id(), 0x3b);
        assert_eq!(descriptor.phase(), ProtocolPhase::Play);
        let resolved = registry
            .resolve(descriptor.phase(), descriptor.direction(), 0x3b)
            .unwrap();
        assert_eq!(
            resolved.type_id(),
            TypeId::of::<clientbound::play::MultiBlockChange>()
        );
    }

    #[test]
    fn decoding_clientbound_leaves_decoder_untouched() {
        let descriptor = registry()
            .resolve(ProtocolPhase::Status, Direction::Clientbound, 0x01)
            .unwrap();
        let bytes = 7i64.to_be_bytes();
        let mut decoder = Decoder::new(&bytes);
        assert!(matches!(
            descriptor.decode(&mut decoder),
            Err(PacketError::UnsupportedDirection {
                name: "Pong",
                direction: Direction::Clientbound,
                operation: Operation::Decode,
            })
        ));
        assert_eq!(decoder.position(), 0);
    }

    #[test]
    fn decode_through_descriptor() {
        let descriptor = registry()
            .resolve(ProtocolPhase::Status, Direction::Serverbound, 0x01)
            .unwrap();
        let bytes = 7i64.to_be_bytes();
        let packet = descriptor.decode(&mut Decoder::new(&bytes)).unwrap();
        assert!(matches!(
            packet,
            ServerboundPacket::Status(serverbound::status::Packet::Ping(
                serverbound::status::Ping { payload: 7 }
            ))
        ));
    }

    #[test]
    fn login_packets_are_allowed_before_authentication() {
        let registry = registry();
        for descriptor in registry.iter() {
            match descriptor.phase() {
                ProtocolPhase::Play => {}
                _ => assert!(descriptor.is_allowed_before_authentication()),
            }
        }
        assert!(registry
            .descriptor_of::<serverbound::play::KeepAlive>()
            .unwrap()
            .is_allowed_before_authentication());
        assert!(!registry
            .descriptor_of::<serverbound::play::ChatMessage>()
            .unwrap()
            .is_allowed_before_authentication());
    }

    #[test]
    #[should_panic(expected = "registered for both")]
    fn duplicate_ids_are_rejected() {
        let mut registry = PacketRegistry::default();
        registry.register_serverbound::<serverbound::status::Ping, serverbound::status::Packet>();
        registry.register_serverbound::<serverbound::status::Ping, serverbound::status::Packet>();
    }
}
