use crate::registry::CounterSet;
use std::io;
use std::net::SocketAddr;
use tokio::net::{ToSocketAddrs, UdpSocket};

/// Datagram wrapper; each payload's actual length is attributed as one read
/// or write event against the resolved counters.
pub struct InstrumentedDatagram {
    socket: UdpSocket,
    counters: CounterSet,
}

impl InstrumentedDatagram {
    pub fn new(socket: UdpSocket, counters: CounterSet) -> Self {
        Self { socket, counters }
    }

    pub fn get_ref(&self) -> &UdpSocket {
        &self.socket
    }

    pub fn into_inner(self) -> UdpSocket {
        self.socket
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub async fn connect<A: ToSocketAddrs>(&self, addr: A) -> io::Result<()> {
        self.socket.connect(addr).await
    }

    pub async fn send_to<A: ToSocketAddrs>(&self, buf: &[u8], target: A) -> io::Result<usize> {
        let sent = self.socket.send_to(buf, target).await?;
        if sent > 0 {
            self.counters.add_write(sent as u64);
        }
        Ok(sent)
    }

    pub async fn recv_from(&self, buf: &mut [u8]) -> io::Result<(usize, SocketAddr)> {
        let (received, peer) = self.socket.recv_from(buf).await?;
        if received > 0 {
            self.counters.add_read(received as u64);
        }
        Ok((received, peer))
    }

    /// Connected-socket variant of [`send_to`](Self::send_to).
    pub async fn send(&self, buf: &[u8]) -> io::Result<usize> {
        let sent = self.socket.send(buf).await?;
        if sent > 0 {
            self.counters.add_write(sent as u64);
        }
        Ok(sent)
    }

    /// Connected-socket variant of [`recv_from`](Self::recv_from).
    pub async fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        let received = self.socket.recv(buf).await?;
        if received > 0 {
            self.counters.add_read(received as u64);
        }
        Ok(received)
    }
}
