use serde::Serialize;

use crate::error::SourceQueryError;
use crate::packet::PacketType;
use crate::parse::{get_string, get_u16, get_u8, skip_string};

/// Server information as obtained by [crate::query::query].
///
/// `players` and `max_players` are the raw bytes off the wire. Nothing
/// guarantees `players <= max_players`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    /// Server name
    pub name: String,
    /// Current map
    pub map: String,
    /// Current players
    pub players: u8,
    /// Max players
    pub max_players: u8,
}

impl ServerInfo {
    const TYPE_OFFSET: usize = 4;
    const BODY_OFFSET: usize = 5;

    /// Decode a raw A2S_INFO response.
    ///
    /// Reads up to and including the max players byte. Bots, server type,
    /// environment, visibility, VAC, version and the extra data block are
    /// not decoded; trailing bytes are ignored.
    pub fn decode(data: &[u8]) -> Result<ServerInfo, SourceQueryError> {
        if data.len() < Self::BODY_OFFSET {
            return Err(SourceQueryError::protocol(format!(
                "packet too short: {} bytes",
                data.len()
            )));
        }

        // the 0xFFFFFFFF marker is skipped, not checked
        match PacketType::try_from(data[Self::TYPE_OFFSET])? {
            PacketType::Response => {}
            PacketType::Challenge => {
                return Err(SourceQueryError::protocol(
                    "server answered with a challenge",
                ))
            }
            other => {
                return Err(SourceQueryError::protocol(format!(
                    "unexpected packet type {other:?}"
                )))
            }
        }

        let mut offset: usize = Self::BODY_OFFSET;
        let _protocol = get_u8(data, &mut offset)?;
        let name = get_string(data, &mut offset)?;
        let map = get_string(data, &mut offset)?;
        skip_string(data, &mut offset)?; // folder
        skip_string(data, &mut offset)?; // game
        let _app_id = get_u16(data, &mut offset)?;
        let players = get_u8(data, &mut offset)?;
        let max_players = get_u8(data, &mut offset)?;

        Ok(ServerInfo {
            name,
            map,
            players,
            max_players,
        })
    }
}
