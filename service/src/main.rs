use std::env;

use abi::Config;
use anyhow::Result;
use reservation_service::{init_tracing, start_server};

const CONFIG_ENV: &str = "BOOKING_CONFIG";
const DEFAULT_CONFIG: &str = "~/.config/booking.yml";

#[tokio::main]
async fn main() -> Result<()> {
    let filename = env::args()
        .nth(1)
        .or_else(|| env::var(CONFIG_ENV).ok())
        .unwrap_or_else(|| shellexpand::tilde(DEFAULT_CONFIG).into_owned());
    let config = Config::load(&filename)?;

    init_tracing(&config.log);
    tracing::info!(config = %filename, "configuration loaded");

    start_server(&config).await
}
