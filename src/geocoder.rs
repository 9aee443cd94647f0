//! Reverse geocoding against an OpenStreetMap Nominatim endpoint.

use std::time::Duration;

use anyhow::{Context, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Deserialize;
use wreq::{Client, header};

use crate::location::{Coordinate, PostalAddress};
use crate::platform::Geocoder;
use crate::zipcode::fill_from_zipcode;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

const USER_AGENT: &str = concat!("results-converter/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client shared by the network-backed collaborators
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    let client = Client::builder()
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .zstd(true)
        .build()?;
    Ok(client)
}

/// Nominatim `/reverse` response; only the fields we read
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    error: Option<String>,
    address: Option<NominatimAddress>,
}

#[derive(Debug, Default, Deserialize)]
struct NominatimAddress {
    house_number: Option<String>,
    road: Option<String>,
    // Nominatim picks one of these depending on settlement size
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    hamlet: Option<String>,
    state: Option<String>,
    postcode: Option<String>,
    country: Option<String>,
    country_code: Option<String>,
}

impl NominatimAddress {
    fn into_postal_address(self) -> PostalAddress {
        let mut address = PostalAddress {
            sub_thoroughfare: self.house_number,
            thoroughfare: self.road,
            locality: self.city.or(self.town).or(self.village).or(self.hamlet),
            administrative_area: self.state,
            postal_code: self.postcode,
            country: self.country,
        };
        fill_from_zipcode(&mut address, self.country_code.as_deref());
        address
    }
}

/// Parse a `/reverse?format=jsonv2` body into address components
fn parse_reverse_response(body: &str) -> Result<PostalAddress> {
    let response: ReverseResponse =
        serde_json::from_str(body).context("Failed to parse geocoder response")?;

    if let Some(error) = response.error {
        anyhow::bail!("{}", error);
    }

    let address = response
        .address
        .ok_or_else(|| anyhow::anyhow!("No address found for this location"))?;
    Ok(address.into_postal_address())
}

pub struct NominatimGeocoder {
    http_client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(http_client: Client, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn reverse_url(&self, coordinate: Coordinate) -> String {
        format!(
            "{}/reverse?format=jsonv2&addressdetails=1&lat={}&lon={}",
            self.base_url, coordinate.latitude, coordinate.longitude
        )
    }

    async fn lookup(&self, coordinate: Coordinate) -> Result<PostalAddress> {
        let url = self.reverse_url(coordinate);
        tracing::debug!(%url, "Reverse geocoding");

        let response = self
            .http_client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .context("Geocoder request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read geocoder response")?;

        if !status.is_success() {
            anyhow::bail!("Geocoder returned {}", status);
        }

        parse_reverse_response(&body)
    }
}

impl Geocoder for NominatimGeocoder {
    fn reverse_geocode(&self, coordinate: Coordinate) -> BoxFuture<'_, Result<PostalAddress>> {
        self.lookup(coordinate).boxed()
    }
}
