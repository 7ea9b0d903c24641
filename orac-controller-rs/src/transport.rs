//! Collaborator seams: the message transport and the button edge source.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;

use crate::input::ButtonEdge;
use crate::protocol::{InboundPacket, Outbound};

/// Datagram transport to the remote rack.
///
/// Implementations own the wire encoding. `send` must not block; there is
/// no retry, a failed send is logged and forgotten.
#[allow(async_fn_in_trait)]
pub trait Transport {
    type Error;

    fn send(&mut self, message: &Outbound) -> Result<(), Self::Error>;

    /// Wait for the next decoded inbound packet.
    async fn receive(&mut self) -> InboundPacket;
}

/// Source of debounced press/release edges for the four logical buttons.
#[allow(async_fn_in_trait)]
pub trait ButtonSource {
    async fn next_edge(&mut self) -> ButtonEdge;
}

/// GPIO tasks usually push edges into a channel; its receiving end is a
/// button source as-is.
impl<M, const N: usize> ButtonSource for Receiver<'_, M, ButtonEdge, N>
where
    M: RawMutex,
{
    async fn next_edge(&mut self) -> ButtonEdge {
        self.receive().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Button, Edge};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embassy_sync::channel::Channel;

    #[test]
    fn channel_receiver_delivers_edges_in_order() {
        let channel: Channel<NoopRawMutex, ButtonEdge, 4> = Channel::new();
        channel
            .try_send(ButtonEdge::new(Button::Increase, Edge::Press))
            .unwrap();
        channel
            .try_send(ButtonEdge::new(Button::Increase, Edge::Release))
            .unwrap();

        let mut source = channel.receiver();
        let first = embassy_futures::block_on(source.next_edge());
        let second = embassy_futures::block_on(source.next_edge());
        assert_eq!(first, ButtonEdge::new(Button::Increase, Edge::Press));
        assert_eq!(second.edge, Edge::Release);
    }
}
