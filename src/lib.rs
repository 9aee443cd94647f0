pub mod api;
pub mod clipboard;
pub mod config;
pub mod formatter;
pub mod geocoder;
pub mod location;
pub mod markers;
pub mod platform;
pub mod provider;
pub mod session;
pub mod sources;
pub mod zipcode;

pub use clipboard::CommandClipboard;
pub use config::{ConverterConfig, LocationMode};
pub use formatter::format_markdown;
pub use geocoder::NominatimGeocoder;
pub use location::{Coordinate, LocationError, LocationResult, PostalAddress};
pub use platform::{Authorization, Clipboard, Geocoder, LocationSource};
pub use provider::LocationProvider;
pub use session::Session;
pub use sources::{DisabledLocationSource, FixedLocationSource, IpLocationSource};
