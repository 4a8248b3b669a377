//! Loopback fake game servers for query tests

use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tokio::task::JoinHandle;

/// Build an A2S_INFO reply carrying the given fields, followed by a few
/// trailing fields the client is expected to ignore.
pub fn info_reply(name: &str, map: &str, players: u8, max_players: u8) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFF, 0xFF, 0xFF, 0x49, 0x11];
    for s in [name, map, "dayz", "DayZ"] {
        out.extend_from_slice(s.as_bytes());
        out.push(0);
    }
    out.extend_from_slice(&[0x02, 0x01, players, max_players]);
    out.extend_from_slice(&[0x00, b'd', b'l', 0x00, 0x01]);
    out.extend_from_slice(b"1.0\0");
    out
}

/// Bind a server on loopback that receives one request and answers it with
/// each of `replies` in turn. The task resolves to the request it received.
pub async fn spawn_server(replies: Vec<Vec<u8>>) -> (SocketAddr, JoinHandle<Vec<u8>>) {
    let server = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind server");
    let addr = server.local_addr().unwrap();

    let task = tokio::spawn(async move {
        let mut buf = [0u8; 1024];
        let (len, peer) = server.recv_from(&mut buf).await.unwrap();
        for reply in replies {
            server.send_to(&reply, peer).await.unwrap();
        }
        buf[..len].to_vec()
    });

    (addr, task)
}

/// Bind a server on loopback that never answers. Keep the socket alive for
/// as long as the test needs the port to stay silent.
pub async fn silent_server() -> (SocketAddr, UdpSocket) {
    let server = UdpSocket::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind server");
    (server.local_addr().unwrap(), server)
}
