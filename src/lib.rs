//! Pure Rust async client for the [Source A2S_INFO Query Protocol](https://developer.valvesoftware.com/wiki/Server_queries#A2S_INFO),
//! reduced to what a server status probe needs: name, map and player counts.
pub mod config;
pub mod error;
pub mod info;
pub mod packet;
mod parse;
pub mod query;
pub mod status;

pub use info::ServerInfo;
pub use query::{query, QuerySession};
pub use status::ServerStatus;
