//! Hands decoded server-bound packets to a handler.

use crate::protocol::{
    codec,
    packet::{PacketError, ServerboundPacket},
    ProtocolPhase,
};

/// Receives every packet that decoded successfully.
pub trait PacketHandler {
    fn on_packet_decoded(&mut self, packet: ServerboundPacket) -> anyhow::Result<()>;
}

impl<F> PacketHandler for F
where
    F: FnMut(ServerboundPacket) -> anyhow::Result<()>,
{
    fn on_packet_decoded(&mut self, packet: ServerboundPacket) -> anyhow::Result<()> {
        self(packet)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error(transparent)]
    Packet(#[from] PacketError),
    #[error("{name} is not allowed before authentication")]
    NotAuthenticated { name: &'static str },
    #[error("handler failed on {name}: {source}")]
    Handler {
        name: &'static str,
        source: anyhow::Error,
    },
}

/// Per-connection inbound state: the active phase and whether the peer
/// has authenticated.
///
/// The dispatcher never changes phase by itself. The session layer calls
/// [`Dispatcher::set_phase`] after handling the packet that triggers it.
pub struct Dispatcher<H> {
    phase: ProtocolPhase,
    authenticated: bool,
    handler: H,
}

impl<H> Dispatcher<H>
where
    H: PacketHandler,
{
    pub fn new(handler: H) -> Self {
        Self {
            phase: ProtocolPhase::Handshake,
            authenticated: false,
            handler,
        }
    }

    pub fn phase(&self) -> ProtocolPhase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: ProtocolPhase) {
        tracing::debug!("Transition to {phase} phase");
        self.phase = phase;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn mark_authenticated(&mut self) {
        self.authenticated = true;
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Decodes one frame and passes the packet to the handler.
    ///
    /// The handler only sees packets that decoded completely and passed
    /// the authentication check.
    pub fn dispatch_frame(&mut self, frame: &[u8]) -> Result<(), DispatchError> {
        let packet = codec::decode_frame(self.phase, frame)?;
        let name = packet.name();

        if !self.authenticated && !packet.is_allowed_before_authentication() {
            tracing::warn!("Rejected {name} before authentication");
            return Err(DispatchError::NotAuthenticated { name });
        }

        tracing::trace!("Dispatching {name} in {} phase", self.phase);
        self.handler
            .on_packet_decoded(packet)
            .map_err(|source| DispatchError::Handler { name, source })
    }
}
