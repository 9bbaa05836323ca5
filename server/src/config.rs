use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use color_eyre::eyre::{eyre, WrapErr};

use crate::form::DEFAULT_LOADER_DELAY;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 1000;

/// Runtime settings, read from the environment once at startup
#[derive(Debug, Clone)]
pub struct FormConfig {
    /// Endpoint the form polls when submitted
    pub submit_url: String,
    pub listen_addr: SocketAddr,
    pub request_timeout: Duration,
    pub loader_delay: Duration,
}

impl FormConfig {
    pub fn from_env() -> color_eyre::Result<Self> {
        let submit_url = env::var("SUBMIT_URL")
            .map_err(|_| eyre!("SUBMIT_URL environment variable not set"))?;

        let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let port = parse_var("PORT", DEFAULT_PORT)?;
        let listen_addr = format!("{host}:{port}")
            .parse::<SocketAddr>()
            .wrap_err_with(|| format!("Invalid listen address {host}:{port}"))?;

        let request_timeout =
            Duration::from_millis(parse_var("REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT_MS)?);
        let loader_delay = Duration::from_millis(parse_var(
            "LOADER_DELAY_MS",
            DEFAULT_LOADER_DELAY.as_millis() as u64,
        )?);

        Ok(Self {
            submit_url,
            listen_addr,
            request_timeout,
            loader_delay,
        })
    }
}

/// Whether verbose error pages are enabled
pub fn is_development_mode() -> bool {
    env::var("DEVELOPMENT_MODE")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn parse_var<T>(name: &str, default: T) -> color_eyre::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .wrap_err_with(|| format!("Invalid value for {name}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
