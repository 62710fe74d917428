//! Geographic coordinate type and spatial conversions.
//!
//! Coordinates are WGS-84 degrees in `f64`.  All distances are metres over a
//! 6 371 000 m sphere; all durations are seconds.  Edge weights elsewhere in
//! the engine are treated as opaque nonnegative costs, but on the OSM path
//! they are always the output of [`time_seconds`].

/// Mean Earth radius in metres.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Maximum effective road speed in m/s (≈ 100 km/h, the motorway default).
///
/// Divides the straight-line distance in the A* heuristic; because no edge
/// is ever faster than this, the heuristic stays an admissible lower bound
/// on remaining travel time.
pub const MAX_SPEED_MPS: f64 = 27.8;

/// Two assignments closer together than this count as a near-tie.
pub const NEAR_TIE_METRES: f64 = 20.0;

/// Snap distances beyond this are reported as suspicious in diagnostics.
pub const LARGE_SNAP_METRES: f64 = 100.0;

/// A WGS-84 geographic coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Travel time in seconds to cover `metres` at `kmh`.
#[inline]
pub fn time_seconds(metres: f64, kmh: f64) -> f64 {
    metres / (kmh * 1000.0 / 3600.0)
}

/// The near-tie window expressed in travel seconds: 20 m at the 30 km/h
/// fallback road speed.  Distance tables store seconds, so comparisons
/// against [`NEAR_TIE_METRES`] go through this conversion.
#[inline]
pub fn near_tie_window_secs() -> f64 {
    time_seconds(NEAR_TIE_METRES, 30.0)
}

/// A latitude/longitude axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self { min_lat, min_lon, max_lat, max_lon }
    }

    /// `true` when both axes have positive extent and all corners are finite.
    pub fn is_well_formed(&self) -> bool {
        self.min_lat.is_finite()
            && self.min_lon.is_finite()
            && self.max_lat.is_finite()
            && self.max_lon.is_finite()
            && self.min_lat < self.max_lat
            && self.min_lon < self.max_lon
    }
}
