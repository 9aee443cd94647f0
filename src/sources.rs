//! Location sources available without an OS location service.

use anyhow::{Context, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use wreq::Client;

use crate::location::Coordinate;
use crate::platform::{Authorization, LocationSource};

pub const DEFAULT_IP_LOOKUP_URL: &str = "http://ip-api.com/json/";

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Parse an ip-api style body into a coordinate
fn parse_ip_lookup(body: &str) -> Result<Coordinate> {
    let response: IpLookupResponse =
        serde_json::from_str(body).context("Failed to parse IP lookup response")?;

    if response.status != "success" {
        anyhow::bail!(
            "IP lookup failed: {}",
            response.message.as_deref().unwrap_or("unknown error")
        );
    }

    match (response.lat, response.lon) {
        (Some(lat), Some(lon)) => Ok(Coordinate::new(lat, lon)),
        _ => anyhow::bail!("IP lookup response has no coordinates"),
    }
}

/// Approximate location from the public IP address
pub struct IpLocationSource {
    http_client: Client,
    lookup_url: String,
}

impl IpLocationSource {
    pub fn new(http_client: Client, lookup_url: impl Into<String>) -> Self {
        Self {
            http_client,
            lookup_url: lookup_url.into(),
        }
    }

    /// Lookup URL with the `fields` filter, keeping any configured query (API keys)
    fn request_url(&self) -> String {
        let base = self.lookup_url.trim_end_matches(['?', '&']);
        let separator = if base.contains('?') { '&' } else { '?' };
        format!("{}{}fields=status,message,lat,lon", base, separator)
    }

    async fn lookup(&self) -> Result<Coordinate> {
        let url = self.request_url();
        tracing::debug!(%url, "Looking up location by IP");

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .context("IP lookup request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read IP lookup response")?;

        if !status.is_success() {
            anyhow::bail!("IP lookup returned {}", status);
        }

        parse_ip_lookup(&body)
    }
}

impl LocationSource for IpLocationSource {
    fn services_enabled(&self) -> bool {
        true
    }

    // No OS prompt: the lookup only reveals what the network already sees.
    fn request_authorization(&self) -> BoxFuture<'_, Authorization> {
        futures::future::ready(Authorization::Granted).boxed()
    }

    fn start_single_location_update(&self) -> BoxFuture<'_, Result<Coordinate>> {
        self.lookup().boxed()
    }
}

/// A configured coordinate
pub struct FixedLocationSource {
    coordinate: Coordinate,
}

impl FixedLocationSource {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl LocationSource for FixedLocationSource {
    fn services_enabled(&self) -> bool {
        true
    }

    fn request_authorization(&self) -> BoxFuture<'_, Authorization> {
        futures::future::ready(Authorization::Granted).boxed()
    }

    fn start_single_location_update(&self) -> BoxFuture<'_, Result<Coordinate>> {
        futures::future::ready(Ok(self.coordinate)).boxed()
    }
}

/// Location turned off by configuration
pub struct DisabledLocationSource;

impl LocationSource for DisabledLocationSource {
    fn services_enabled(&self) -> bool {
        false
    }

    fn request_authorization(&self) -> BoxFuture<'_, Authorization> {
        futures::future::ready(Authorization::Denied).boxed()
    }

    fn start_single_location_update(&self) -> BoxFuture<'_, Result<Coordinate>> {
        futures::future::ready(Err(anyhow::anyhow!("Location services are disabled"))).boxed()
    }
}
