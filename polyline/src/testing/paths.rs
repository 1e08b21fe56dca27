//! Helper functions for generating coordinate paths
//!

use rand::Rng;

use crate::codec;
use crate::codec::Coordinate;
use crate::geometry::Geometry;

/// Largest per-step movement, in degrees, of a generated path.
const MAX_STEP_DEGREES: f64 = 0.05;

/// Round a coordinate onto the `10^-precision` grid, so that it survives an
/// encode/decode round trip unchanged.
pub fn snap(coord: Coordinate, precision: u32) -> Coordinate {
    let factor = codec::scale_factor(precision);
    Coordinate {
        lat: (coord.lat * factor).round() / factor,
        lng: (coord.lng * factor).round() / factor,
    }
}

/// A random walk of `len` points already snapped to `precision`, the way
/// a GPS track looks: one random start and small steps after that.
pub fn random_path<R: Rng + ?Sized>(rng: &mut R, len: usize, precision: u32) -> Vec<Coordinate> {
    let mut current = Coordinate::new(rng.gen_range(-80.0..80.0), rng.gen_range(-170.0..170.0));

    (0..len)
        .map(|_| {
            current.lat += rng.gen_range(-MAX_STEP_DEGREES..=MAX_STEP_DEGREES);
            current.lng += rng.gen_range(-MAX_STEP_DEGREES..=MAX_STEP_DEGREES);
            snap(current, precision)
        })
        .collect()
}

/// A random line string geometry of `len` positions snapped to `precision`.
pub fn random_line_string<R: Rng + ?Sized>(rng: &mut R, len: usize, precision: u32) -> Geometry {
    Geometry::LineString {
        coordinates: random_path(rng, len, precision)
            .into_iter()
            .map(Coordinate::to_position)
            .collect(),
    }
}

/// A random open polygon ring of `len` positions snapped to `precision`.
/// The ring is left open, decoding closes it.
pub fn random_polygon<R: Rng + ?Sized>(rng: &mut R, len: usize, precision: u32) -> Geometry {
    let ring = random_path(rng, len, precision)
        .into_iter()
        .map(Coordinate::to_position)
        .collect();
    Geometry::Polygon { coordinates: vec![ring] }
}
