pub mod area;

pub use area::{estimate_area_sq_ft, reference_point};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for GeoPoint {
    /// Site files store vertices as `[lat, lng]`.
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

/// A point in a local plane: meters for the tangent-plane projection,
/// pixels for the preview viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Closed polygon boundary. The last vertex connects back to the first;
/// the closing vertex is never repeated.
pub type Ring = Vec<GeoPoint>;
