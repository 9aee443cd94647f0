//! Platform collaborators the core consumes but does not implement.
//!
//! Location acquisition, reverse geocoding and the clipboard are injected
//! through these traits so the provider and session run without an OS
//! environment (and with fakes in tests).

use anyhow::Result;
use futures::future::BoxFuture;

use crate::location::{Coordinate, PostalAddress};

/// Outcome of asking the user for location access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Granted,
    Denied,
}

/// Source of coordinate fixes (OS location service, IP lookup, fixed value).
pub trait LocationSource: Send + Sync {
    /// Whether location services are enabled at the platform level
    fn services_enabled(&self) -> bool;

    /// Ask for permission to read the location
    fn request_authorization(&self) -> BoxFuture<'_, Authorization>;

    /// Acquire one coordinate fix
    fn start_single_location_update(&self) -> BoxFuture<'_, Result<Coordinate>>;

    /// Stop any further updates after a successful fix
    fn stop_updates(&self) {}
}

/// Converts a coordinate pair into postal address components
pub trait Geocoder: Send + Sync {
    fn reverse_geocode(&self, coordinate: Coordinate) -> BoxFuture<'_, Result<PostalAddress>>;
}

/// Plain-text sink for the formatted markdown
pub trait Clipboard: Send + Sync {
    fn set_text<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<()>>;
}
