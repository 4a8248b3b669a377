use crate::error::SourceQueryError;

/// Out-of-band marker prefixing every single-packet query and response.
pub const SINGLE_PACKET_HEADER: [u8; 4] = [0xFF; 4];

/// Payload string of an A2S_INFO request, without its terminator.
pub const INFO_QUERY_BODY: &str = "Source Engine Query";

/// According to the Valve wiki, Source query responses use 1400 bytes + IP/UDP headers.
/// Anything longer than this is truncated by the receive buffer.
pub const MAX_PACKET_SIZE: usize = 1400;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PacketType {
    /// A2S_INFO Request -- https://developer.valvesoftware.com/wiki/Server_queries#A2S_INFO
    Request,
    /// S2C_CHALLENGE
    ///
    /// Newer servers may answer a bare request with a challenge ('A' or 0x41).
    /// Answering it takes a second exchange, which a single-attempt probe does not do.
    Challenge,
    /// A2S_INFO Response Packet, parsed by [crate::info::ServerInfo::decode].
    Response,
}

impl TryFrom<u8> for PacketType {
    type Error = SourceQueryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x54 => Ok(PacketType::Request),
            0x41 => Ok(PacketType::Challenge),
            0x49 => Ok(PacketType::Response),
            n => Err(SourceQueryError::protocol(format!(
                "unexpected packet header {n:#04x}"
            ))),
        }
    }
}

impl PacketType {
    pub fn to_byte(self) -> u8 {
        match self {
            PacketType::Request => 0x54,   // 'T'
            PacketType::Challenge => 0x41, // 'A'
            PacketType::Response => 0x49,  // 'I'
        }
    }
}

/// The A2S_INFO probe. Carries no state; every query packs a fresh one.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RequestPacket;

impl RequestPacket {
    pub fn new() -> Self {
        RequestPacket
    }

    /// Serializes the request into an array of bytes.
    pub fn pack(&self) -> Vec<u8> {
        // packet structure: header, type, body, terminator
        let mut payload: Vec<u8> = Vec::with_capacity(6 + INFO_QUERY_BODY.len());
        payload.extend_from_slice(&SINGLE_PACKET_HEADER);
        payload.push(PacketType::Request.to_byte());
        payload.extend_from_slice(INFO_QUERY_BODY.as_bytes());
        payload.push(0);

        payload
    }
}

/// Bytes of an A2S_INFO request, ready to send.
pub fn request_payload() -> Vec<u8> {
    RequestPacket::new().pack()
}
