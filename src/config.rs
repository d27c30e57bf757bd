use crate::application::notifications::{DEFAULT_CAPACITY, DEFAULT_WORKERS};
use clap::{Parser, ValueEnum};
use rust_decimal::Decimal;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

/// Runtime configuration. Every flag can also come from the environment
/// (or a `.env` file).
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "In-memory banking ledger served over HTTP", long_about = None)]
pub struct Config {
    /// Address the HTTP server binds to
    #[arg(long, env = "BANK_LISTEN_ADDR", default_value = "0.0.0.0:8080")]
    pub listen_addr: SocketAddr,

    /// Key rate (percent) reported by the placeholder rate source
    #[arg(long, env = "BANK_BASE_RATE", default_value = "16.0")]
    pub base_rate: Decimal,

    /// Base rate (percent) used when the rate source fails
    #[arg(long, env = "BANK_FALLBACK_RATE", default_value = "10")]
    pub fallback_rate: Decimal,

    /// Margin (percentage points) added to the base rate for loans
    #[arg(long, env = "BANK_MARGIN", default_value = "5")]
    pub bank_margin: Decimal,

    /// Seconds a fetched key rate stays cached
    #[arg(long, env = "BANK_RATE_TTL_SECS", default_value_t = 3600)]
    pub rate_ttl_secs: u64,

    /// Number of notification delivery workers
    #[arg(long, env = "BANK_NOTIFICATION_WORKERS", default_value_t = DEFAULT_WORKERS)]
    pub notification_workers: usize,

    /// Capacity of the notification queue; overflow is dropped
    #[arg(long, env = "BANK_NOTIFICATION_QUEUE", default_value_t = DEFAULT_CAPACITY)]
    pub notification_queue: usize,

    /// Log output format
    #[arg(long, env = "BANK_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Config {
    pub fn rate_ttl(&self) -> Duration {
        Duration::from_secs(self.rate_ttl_secs)
    }
}
