use std::time::Duration;

use log::warn;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::config::StatusTarget;
use crate::error::SourceQueryError;
use crate::info::ServerInfo;
use crate::query::query;

/// Renderable server status. Query failures become [ServerStatus::Offline]
/// instead of errors.
///
/// Serializes with an `online` flag derived from the variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerStatus {
    Online {
        name: String,
        map: String,
        players: u8,
        max: u8,
    },
    Offline {
        error: String,
    },
}

impl Serialize for ServerStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ServerStatus::Online {
                name,
                map,
                players,
                max,
            } => {
                let mut state = serializer.serialize_struct("ServerStatus", 5)?;
                state.serialize_field("online", &true)?;
                state.serialize_field("name", name)?;
                state.serialize_field("map", map)?;
                state.serialize_field("players", players)?;
                state.serialize_field("max", max)?;
                state.end()
            }
            ServerStatus::Offline { error } => {
                let mut state = serializer.serialize_struct("ServerStatus", 2)?;
                state.serialize_field("online", &false)?;
                state.serialize_field("error", error)?;
                state.end()
            }
        }
    }
}

impl ServerStatus {
    /// Probe a server once, never failing.
    pub async fn probe(host: &str, port: u16, timeout: Duration) -> ServerStatus {
        query(host, port, timeout).await.into()
    }

    pub async fn probe_target(target: &StatusTarget) -> ServerStatus {
        Self::probe(target.host(), target.port(), target.timeout()).await
    }

    pub fn is_online(&self) -> bool {
        matches!(self, ServerStatus::Online { .. })
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

/// Ticker for re-probing a server every `period`.
///
/// A probe that outlasts the period pushes the next tick back instead of
/// firing the missed ones back to back. Must be called inside a runtime.
pub fn poll_interval(period: Duration) -> Interval {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

impl From<ServerInfo> for ServerStatus {
    fn from(info: ServerInfo) -> Self {
        ServerStatus::Online {
            name: info.name,
            map: info.map,
            players: info.players,
            max: info.max_players,
        }
    }
}

impl From<SourceQueryError> for ServerStatus {
    fn from(err: SourceQueryError) -> Self {
        ServerStatus::Offline {
            error: err.to_string(),
        }
    }
}

impl From<Result<ServerInfo, SourceQueryError>> for ServerStatus {
    fn from(result: Result<ServerInfo, SourceQueryError>) -> Self {
        match result {
            Ok(info) => info.into(),
            Err(err) => {
                warn!("server unreachable: {}", err);
                err.into()
            }
        }
    }
}
