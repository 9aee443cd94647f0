use std::fmt;

/// Published state of a location request
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LocationResult {
    #[default]
    Unset,
    Pending,
    Available(String),
    Unavailable(String),
}

impl LocationResult {
    /// Whether a request cycle has finished, successfully or not
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Available(_) | Self::Unavailable(_))
    }

    /// Location block text, only present once geocoding succeeded
    pub fn available_text(&self) -> Option<&str> {
        match self {
            Self::Available(text) => Some(text),
            _ => None,
        }
    }

    /// Location text or failure reason, whichever the result carries
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Available(text) | Self::Unavailable(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for LocationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => write!(f, "UNSET"),
            Self::Pending => write!(f, "PENDING"),
            Self::Available(_) => write!(f, "AVAILABLE"),
            Self::Unavailable(_) => write!(f, "UNAVAILABLE"),
        }
    }
}

impl From<LocationError> for LocationResult {
    fn from(err: LocationError) -> Self {
        Self::Unavailable(err.to_string())
    }
}

/// A single latitude/longitude fix in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse "lat,lon" as used in configuration
    pub fn parse(raw: &str) -> Option<Self> {
        let (lat, lon) = raw.split_once(',')?;
        let latitude: f64 = lat.trim().parse().ok()?;
        let longitude: f64 = lon.trim().parse().ok()?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }
        Some(Self::new(latitude, longitude))
    }
}

/// Address components returned by reverse geocoding
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostalAddress {
    /// House number
    pub sub_thoroughfare: Option<String>,
    /// Street name
    pub thoroughfare: Option<String>,
    /// City
    pub locality: Option<String>,
    /// State or region
    pub administrative_area: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl PostalAddress {
    /// Single-line address, e.g. `1 Main St, City, ST 00000, Country`.
    ///
    /// Absent components are skipped together with their separator.
    pub fn formatted(&self) -> String {
        let mut address = String::new();
        let parts = [
            (&self.sub_thoroughfare, " "),
            (&self.thoroughfare, ", "),
            (&self.locality, ", "),
            (&self.administrative_area, " "),
            (&self.postal_code, ", "),
            (&self.country, ""),
        ];
        for (part, separator) in parts {
            if let Some(value) = part {
                address.push_str(value);
                address.push_str(separator);
            }
        }
        address
    }
}

/// Render the location block that gets appended under `## Location`
pub fn location_text(coordinate: Coordinate, address: &PostalAddress) -> String {
    format!(
        "Latitude: {:?}\nLongitude: {:?}\nAddress: {}",
        coordinate.latitude,
        coordinate.longitude,
        address.formatted()
    )
}

/// Why a location request ended without a location
#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    PermissionDenied,
    ServiceDisabled,
    AcquisitionFailed(String),
    GeocodeFailed(String),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "Location access was denied."),
            Self::ServiceDisabled => write!(f, "Location services are not enabled."),
            Self::AcquisitionFailed(detail) => {
                write!(f, "Failed to retrieve location: {}", detail)
            }
            Self::GeocodeFailed(detail) => write!(f, "Error retrieving location: {}", detail),
        }
    }
}

impl std::error::Error for LocationError {}
