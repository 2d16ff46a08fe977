use std::{net::SocketAddr, time::Duration};

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub swapi_base_url: String,
    pub swapi_resource: String,
    pub swapi_rps: u32,
    pub request_timeout: Option<Duration>,
    pub load_on_start: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let swapi_base_url = std::env::var("SWAPI_BASE_URL")
            .unwrap_or_else(|_| "https://swapi.dev/api/".to_string());
        let swapi_resource =
            std::env::var("SWAPI_RESOURCE").unwrap_or_else(|_| "films".to_string());

        let swapi_rps: u32 =
            std::env::var("SWAPI_RPS").ok().and_then(|s| s.parse().ok()).unwrap_or(10);

        let request_timeout = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .map(|s| s.parse::<u64>().context("HTTP_TIMEOUT_SECS"))
            .transpose()?
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);

        let load_on_start =
            std::env::var("LOAD_ON_START").ok().and_then(|s| parse_flag(&s)).unwrap_or(true);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            swapi_base_url,
            swapi_resource,
            swapi_rps,
            request_timeout,
            load_on_start,
        })
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
