use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::services::poller::PollSchedule;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    /// The bot's JSON status endpoint.
    pub bot_status_url: String,

    // Polling cadence: a short burst after startup, then a steady interval.
    pub poll_burst_interval_secs: u64,
    pub poll_burst_count: u32,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()?,

            bot_status_url: env::var("BOT_STATUS_URL")
                .map_err(|_| anyhow::anyhow!("BOT_STATUS_URL must be set"))?,

            poll_burst_interval_secs: env_or("POLL_BURST_INTERVAL_SECS", 2),
            poll_burst_count: env_or("POLL_BURST_COUNT", 5),
            poll_interval_secs: env_or("POLL_INTERVAL_SECS", 10),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 5),
        })
    }

    pub fn poll_schedule(&self) -> PollSchedule {
        PollSchedule {
            burst_interval: Duration::from_secs(self.poll_burst_interval_secs.max(1)),
            burst_count: self.poll_burst_count,
            steady_interval: Duration::from_secs(self.poll_interval_secs.max(1)),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Parse an env var, falling back to `default` when unset or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}
