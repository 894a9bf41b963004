mod datagram;
mod stream;

pub use datagram::InstrumentedDatagram;
pub use stream::InstrumentedStream;

use crate::registry::TrafficRegistry;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::UdpSocket;

impl TrafficRegistry {
    /// Wrap a stream right after routing so every read/write is attributed to
    /// the connection's (inbound, outbound, user) triple. Empty tags are
    /// skipped, e.g. the user tag of an unauthenticated flow.
    pub fn instrument_stream<S>(
        &self,
        stream: S,
        inbound: &str,
        outbound: &str,
        user: &str,
    ) -> InstrumentedStream<S>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        InstrumentedStream::new(stream, self.resolve_set(inbound, outbound, user))
    }

    /// Datagram analogue of [`instrument_stream`](Self::instrument_stream).
    pub fn instrument_datagram(
        &self,
        socket: UdpSocket,
        inbound: &str,
        outbound: &str,
        user: &str,
    ) -> InstrumentedDatagram {
        InstrumentedDatagram::new(socket, self.resolve_set(inbound, outbound, user))
    }
}
