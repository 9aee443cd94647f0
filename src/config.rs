//! Runtime configuration read from the environment.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::geocoder::{DEFAULT_GEOCODER_URL, NominatimGeocoder, build_http_client};
use crate::location::Coordinate;
use crate::platform::LocationSource;
use crate::provider::LocationProvider;
use crate::sources::{
    DEFAULT_IP_LOOKUP_URL, DisabledLocationSource, FixedLocationSource, IpLocationSource,
};

const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_PORT: u16 = 3000;

#[cfg(target_os = "macos")]
const DEFAULT_CLIPBOARD_CMD: &str = "pbcopy";
#[cfg(not(target_os = "macos"))]
const DEFAULT_CLIPBOARD_CMD: &str = "wl-copy";

/// Where location fixes come from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationMode {
    Ip,
    Fixed(Coordinate),
    Off,
}

impl LocationMode {
    /// Parse `ip`, `off` or `<lat>,<lon>`
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "ip" | "auto" => Some(Self::Ip),
            "off" | "none" | "disabled" => Some(Self::Off),
            other => Coordinate::parse(other).map(Self::Fixed),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConverterConfig {
    pub location: LocationMode,
    pub geocoder_url: String,
    pub ip_lookup_url: String,
    /// Clipboard command and its arguments
    pub clipboard_cmd: Vec<String>,
    pub http_timeout: Duration,
    pub port: u16,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            location: LocationMode::Ip,
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            ip_lookup_url: DEFAULT_IP_LOOKUP_URL.to_string(),
            clipboard_cmd: vec![DEFAULT_CLIPBOARD_CMD.to_string()],
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            port: DEFAULT_PORT,
        }
    }
}

impl ConverterConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset or invalid values keep their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("RESULTS_CONVERTER_LOCATION") {
            match LocationMode::parse(&raw) {
                Some(mode) => config.location = mode,
                None => tracing::warn!(
                    "Invalid RESULTS_CONVERTER_LOCATION '{}', using IP lookup",
                    raw
                ),
            }
        }

        if let Some(url) = lookup("RESULTS_CONVERTER_GEOCODER_URL").filter(|s| !s.is_empty()) {
            config.geocoder_url = url;
        }

        if let Some(url) = lookup("RESULTS_CONVERTER_IP_LOOKUP_URL").filter(|s| !s.is_empty()) {
            config.ip_lookup_url = url;
        }

        if let Some(raw) = lookup("RESULTS_CONVERTER_CLIPBOARD_CMD") {
            let cmd: Vec<String> = raw.split_whitespace().map(str::to_string).collect();
            if cmd.is_empty() {
                tracing::warn!("Empty RESULTS_CONVERTER_CLIPBOARD_CMD, using default");
            } else {
                config.clipboard_cmd = cmd;
            }
        }

        if let Some(raw) = lookup("RESULTS_CONVERTER_HTTP_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.http_timeout = Duration::from_secs(secs),
                _ => tracing::warn!("Invalid RESULTS_CONVERTER_HTTP_TIMEOUT_SECS '{}'", raw),
            }
        }

        if let Some(raw) = lookup("PORT") {
            match raw.trim().parse() {
                Ok(port) => config.port = port,
                Err(_) => tracing::warn!("Invalid PORT '{}', using {}", raw, DEFAULT_PORT),
            }
        }

        config
    }

    /// Wire the configured location source and geocoder into a provider
    pub fn build_provider(&self) -> Result<LocationProvider> {
        let http_client = build_http_client(self.http_timeout)?;

        let source: Arc<dyn LocationSource> = match self.location {
            LocationMode::Ip => Arc::new(IpLocationSource::new(
                http_client.clone(),
                self.ip_lookup_url.clone(),
            )),
            LocationMode::Fixed(coordinate) => Arc::new(FixedLocationSource::new(coordinate)),
            LocationMode::Off => Arc::new(DisabledLocationSource),
        };
        let geocoder = Arc::new(NominatimGeocoder::new(
            http_client,
            self.geocoder_url.clone(),
        ));

        Ok(LocationProvider::new(source, geocoder))
    }
}
