use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use log::{debug, trace};
use tokio::net::{lookup_host, UdpSocket};
use tokio::time::{sleep_until, timeout_at, Instant};

use crate::error::SourceQueryError;
use crate::info::ServerInfo;
use crate::packet::{request_payload, MAX_PACKET_SIZE};

/// Resolve `host:port` to the first IPv4 address it names.
async fn resolve(host: &str, port: u16) -> Result<SocketAddr, SourceQueryError> {
    if port == 0 {
        return Err(SourceQueryError::Transport(io::Error::new(
            io::ErrorKind::InvalidInput,
            "port 0 is not a valid destination",
        )));
    }

    lookup_host((host, port))
        .await
        .map_err(SourceQueryError::Transport)?
        .find(SocketAddr::is_ipv4)
        .ok_or_else(|| {
            SourceQueryError::Transport(io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                format!("{host} has no IPv4 address"),
            ))
        })
}

/// One A2S_INFO exchange: a socket, a destination and a deadline.
///
/// [QuerySession::run] consumes the session, so a session yields exactly one
/// outcome and its socket is closed before that outcome is returned.
#[derive(Debug)]
pub struct QuerySession {
    sock: UdpSocket,
    target: SocketAddr,
    deadline: Instant,
    timeout: Duration,
}

impl QuerySession {
    /// Resolve the destination and bind an ephemeral IPv4 socket.
    ///
    /// The deadline starts now; time spent resolving counts against it.
    pub async fn open(
        host: &str,
        port: u16,
        timeout: Duration,
    ) -> Result<Self, SourceQueryError> {
        let deadline = Instant::now() + timeout;

        let target = timeout_at(deadline, resolve(host, port))
            .await
            .map_err(|_| SourceQueryError::Timeout(timeout.as_millis()))??;

        // just arbitrarily bind any port, doesn't matter really
        let sock = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(SourceQueryError::Transport)?;

        Ok(QuerySession {
            sock,
            target,
            deadline,
            timeout,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.sock.local_addr()
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Send the request and race the first reply against the deadline.
    ///
    /// A session run after its deadline times out without sending.
    pub async fn run(self) -> Result<ServerInfo, SourceQueryError> {
        let QuerySession {
            sock,
            target,
            deadline,
            timeout,
        } = self;

        if Instant::now() >= deadline {
            debug!("deadline for {} passed before sending", target);
            return Err(SourceQueryError::Timeout(timeout.as_millis()));
        }

        // a reply that is ready at the same poll as the deadline wins
        let outcome = tokio::select! {
            biased;
            reply = exchange(&sock, target) => reply,
            _ = sleep_until(deadline) => Err(SourceQueryError::Timeout(timeout.as_millis())),
        };

        // close before anything else is looked at; later datagrams are never read
        drop(sock);

        let reply = outcome?;
        ServerInfo::decode(&reply)
    }
}

async fn exchange(sock: &UdpSocket, target: SocketAddr) -> Result<Vec<u8>, SourceQueryError> {
    let payload = request_payload();
    sock.send_to(&payload, target)
        .await
        .map_err(SourceQueryError::Transport)?;
    trace!("sent {} byte A2S_INFO request to {}", payload.len(), target);

    let mut resp_buf = [0u8; MAX_PACKET_SIZE];
    // the sender is not checked against `target`
    let (len, from) = sock
        .recv_from(&mut resp_buf)
        .await
        .map_err(SourceQueryError::Transport)?;
    debug!("received {} bytes from {} (queried {})", len, from, target);

    Ok(resp_buf[..len].to_vec())
}

/// Query `host:port` with a single A2S_INFO request.
///
/// One datagram is sent and the first datagram received within `timeout`
/// is decoded. There is no retry. The timeout covers resolution, sending
/// and receiving together.
///
/// The reply's source address is not verified: anyone able to inject UDP
/// packets towards this host can forge the result. Callers on hostile
/// networks should not rely on it.
///
/// Example usage:
/// ```no_run
/// # async fn run() -> Result<(), a2s_status::error::SourceQueryError> {
/// use std::time::Duration;
///
/// let info = a2s_status::query("127.0.0.1", 27016, Duration::from_secs(2)).await?;
/// println!("{} on {}: {}/{}", info.name, info.map, info.players, info.max_players);
/// # Ok(())
/// # }
/// ```
pub async fn query(
    host: &str,
    port: u16,
    timeout: Duration,
) -> Result<ServerInfo, SourceQueryError> {
    QuerySession::open(host, port, timeout).await?.run().await
}
