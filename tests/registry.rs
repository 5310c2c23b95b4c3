//! Registry, codec and dispatch exercised through the public API.

#![allow(clippy::unwrap_used)]

use minecraft_protocol_core::{
    protocol::{
        codec,
        dispatch::{DispatchError, Dispatcher, PacketHandler},
        packet::{clientbound, serverbound, PacketError, ServerboundPacket},
        registry::registry,
        Direction, Encoder, ProtocolPhase,
    },
    EntityId,
};

#[derive(Default)]
struct Log(Vec<ServerboundPacket>);

impl PacketHandler for Log {
    fn on_packet_decoded(&mut self, packet: ServerboundPacket) -> anyhow::Result<()> {
        self.0.push(packet);
        Ok(())
    }
}

fn frame(id: i32, body: impl FnOnce(&mut Encoder)) -> Vec<u8> {
    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer);
    encoder.write_var_int(id);
    body(&mut encoder);
    buffer
}

#[test]
fn ids_are_scoped_by_phase_and_direction() {
    let registry = registry();
    let play = registry
        .resolve(ProtocolPhase::Play, Direction::Serverbound, 0x00)
        .unwrap();
    let login = registry
        .resolve(ProtocolPhase::Login, Direction::Serverbound, 0x00)
        .unwrap();
    assert_ne!(play.type_id(), login.type_id());
    assert_ne!(play.name(), login.name());
}

#[test]
fn every_descriptor_resolves_to_itself() {
    let registry = registry();
    for descriptor in registry.iter() {
        let resolved = registry
            .resolve(descriptor.phase(), descriptor.direction(), descriptor.id())
            .unwrap();
        assert_eq!(resolved.type_id(), descriptor.type_id());
        assert_eq!(
            registry.descriptor_for_type(descriptor.type_id()).unwrap().key(),
            descriptor.key()
        );
    }
}

#[test]
fn clientbound_descriptors_cannot_decode() {
    let registry = registry();
    for descriptor in registry
        .iter()
        .filter(|d| d.direction() == Direction::Clientbound)
    {
        let mut decoder = minecraft_protocol_core::protocol::Decoder::new(&[0; 16]);
        assert!(matches!(
            descriptor.decode(&mut decoder),
            Err(PacketError::UnsupportedDirection { .. })
        ));
        assert_eq!(decoder.position(), 0);
    }
}

#[test]
fn encode_entity_packets() {
    let bytes = codec::encode_packet(&clientbound::play::DestroyEntities {
        entity_ids: vec![EntityId::new(3), EntityId::new(-1)],
    })
    .unwrap();
    assert_eq!(bytes, [0x36, 2, 3, 0xff, 0xff, 0xff, 0xff, 0x0f]);
}

#[test]
fn login_flow() {
    let mut dispatcher = Dispatcher::new(Log::default());

    let handshake = frame(0x00, |e| {
        e.write_var_int(754);
        e.write_string("localhost").unwrap();
        e.write_u16(25565);
        e.write_var_int(2);
    });
    let packet = codec::decode_frame(dispatcher.phase(), &handshake).unwrap();
    let ServerboundPacket::Handshake(serverbound::handshake::Packet::Handshake(handshake)) =
        packet
    else {
        panic!("expected a handshake");
    };
    dispatcher.set_phase(handshake.next_phase());
    assert_eq!(dispatcher.phase(), ProtocolPhase::Login);

    let login_start = frame(0x00, |e| {
        e.write_string("Alex").unwrap();
    });
    dispatcher.dispatch_frame(&login_start).unwrap();
    let received: Vec<_> = dispatcher.handler_mut().0.drain(..).collect();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].name(), "LoginStart");

    let success = codec::encode_packet(&clientbound::login::LoginSuccess {
        uuid: 1,
        username: "Alex".to_owned(),
    })
    .unwrap();
    assert_eq!(success[0], 0x02);

    dispatcher.set_phase(ProtocolPhase::Play);
    let chat = frame(0x03, |e| {
        e.write_string("hi").unwrap();
    });
    assert!(matches!(
        dispatcher.dispatch_frame(&chat),
        Err(DispatchError::NotAuthenticated { .. })
    ));

    dispatcher.mark_authenticated();
    dispatcher.dispatch_frame(&chat).unwrap();
    assert_eq!(dispatcher.handler().0.len(), 1);
    assert_eq!(dispatcher.handler().0[0].name(), "ChatMessage");
}
