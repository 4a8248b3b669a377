use std::time::Duration;

use clap::Parser;
use log::info;

use a2s_status::config::{StatusTarget, DEFAULT_TIMEOUT_MS};
use a2s_status::status::poll_interval;
use a2s_status::ServerStatus;

#[derive(Parser, Debug)]
#[command(author, version, about = "Probe a Source engine server with A2S_INFO", long_about = None)]
struct Args {
    /// Server address or hostname
    host: String,

    /// Query port
    port: u32,

    #[arg(long, short, default_value_t = DEFAULT_TIMEOUT_MS, help = "Reply timeout in milliseconds")]
    timeout_ms: u64,

    #[arg(long, short, help = "Re-probe every N seconds instead of once")]
    interval_secs: Option<u64>,

    #[arg(long, default_value_t = false, help = "Pretty-print the JSON status")]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let target = StatusTarget::new(&args.host, args.port, Some(args.timeout_ms))?;

    let Some(secs) = args.interval_secs.filter(|s| *s > 0) else {
        let status = ServerStatus::probe_target(&target).await;
        println!("{}", status.to_json(args.pretty)?);
        return Ok(());
    };

    info!("polling {}:{} every {}s", target.host(), target.port(), secs);
    let mut ticker = poll_interval(Duration::from_secs(secs));
    loop {
        ticker.tick().await;
        let status = ServerStatus::probe_target(&target).await;
        println!("{}", status.to_json(args.pretty)?);
    }
}
