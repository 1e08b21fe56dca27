//! # Coordinate Codec
//!
//! Lossy conversion between a sequence of `(latitude, longitude)` pairs and
//! an encoded polyline string at a chosen decimal precision.
//!
//! Each coordinate is scaled by `10^precision` and rounded to an integer.
//! The encoder then writes the difference from the previous scaled
//! coordinate, latitude first, as two VarCode runs. Decoding reverses this
//! by keeping running latitude/longitude totals.
//!
//! The encoded string carries no precision marker. Decoding with a
//! precision other than the one used to encode yields coordinates that are
//! off by a power of ten, and nothing in the format can detect that.

use std::io::Cursor;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::geometry;
use crate::geometry::Geometry;
use crate::geometry::GeometryKind;
use crate::varcode::ReadVarCode as _;
use crate::varcode::VarCode;

/// Precision used when none is given: five decimal digits, roughly one
/// metre at the equator.
pub const DEFAULT_PRECISION: u32 = 5;

/// Rough number of characters a single delta occupies. Only used to size
/// output buffers up front.
const TYPICAL_DELTA_CHARS: usize = 4;

/// A point in the codec's native `(latitude, longitude)` order.
///
/// No range validation is done, any `f64` is accepted. Serializes as a
/// two-element `[lat, lng]` array.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// The same point as a `[lng, lat]` position, the axis order used by
    /// geometry objects.
    pub fn to_position(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// Build a coordinate from a `[lng, lat]` position.
    pub fn from_position([lng, lat]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lat, coord.lng]
    }
}

impl From<Coordinate> for (f64, f64) {
    fn from(coord: Coordinate) -> Self {
        (coord.lat, coord.lng)
    }
}

/// The scale factor `10^precision`.
pub(crate) fn scale_factor(precision: u32) -> f64 {
    10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX))
}

/// Scale a component and round half away from zero. Non-finite and
/// out-of-range values saturate.
///
/// JavaScript encoders built on `Math.round` round halves toward positive
/// infinity instead, so an exact negative half unit differs: `-0.000005`
/// at precision 5 scales to `-1` here and to `0` there.
fn scale(value: f64, factor: f64) -> i64 {
    (value * factor).round() as i64
}

/// Encodes a sequence of coordinates into a polyline string.
///
/// An empty sequence encodes to the empty string.
///
/// ```
/// use polyline::Coordinate;
///
/// let path = [
///     Coordinate::new(38.5, -120.2),
///     Coordinate::new(40.7, -120.95),
///     Coordinate::new(43.252, -126.453),
/// ];
/// assert_eq!(polyline::encode(&path, 5), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
/// ```
pub fn encode(coordinates: &[Coordinate], precision: u32) -> String {
    let factor = scale_factor(precision);
    let mut encoded = String::with_capacity(coordinates.len() * 2 * TYPICAL_DELTA_CHARS);

    let mut prev_lat: i64 = 0;
    let mut prev_lng: i64 = 0;

    for coord in coordinates {
        let lat = scale(coord.lat, factor);
        let lng = scale(coord.lng, factor);

        // Deltas wrap to 32-bit two's complement before zig-zag.
        VarCode::encode_into(lat.wrapping_sub(prev_lat) as i32, &mut encoded);
        VarCode::encode_into(lng.wrapping_sub(prev_lng) as i32, &mut encoded);

        prev_lat = lat;
        prev_lng = lng;
    }

    tracing::trace!(
        points = coordinates.len(),
        bytes = encoded.len(),
        precision,
        "encoded polyline"
    );
    encoded
}

/// Decodes a polyline string into a sequence of coordinates.
///
/// Each returned coordinate is the encoded one rounded to `10^-precision`
/// degrees, not the original value.
///
/// ## Errors
/// * [`Error::MalformedEncoding`] - a VarCode run is truncated, too long, or
///   contains a byte outside `'?'..='~'`.
/// * [`Error::UnpairedDelta`] - the string ends after a latitude delta.
pub fn decode(polyline: &str, precision: u32) -> Result<Vec<Coordinate>, Error> {
    decode_bytes(polyline.as_bytes(), precision).inspect_err(|error| {
        tracing::debug!(%error, bytes = polyline.len(), precision, "failed to decode polyline");
    })
}

fn decode_bytes(bytes: &[u8], precision: u32) -> Result<Vec<Coordinate>, Error> {
    let factor = scale_factor(precision);
    let mut coordinates = Vec::with_capacity(bytes.len() / (2 * TYPICAL_DELTA_CHARS));
    let mut cursor = Cursor::new(bytes);

    let mut lat: i64 = 0;
    let mut lng: i64 = 0;
    let end = bytes.len() as u64;

    while cursor.position() < end {
        lat += i64::from(read_delta(&mut cursor)?);

        if cursor.position() >= end {
            return Err(Error::UnpairedDelta {
                position: cursor.position() as usize,
            });
        }
        lng += i64::from(read_delta(&mut cursor)?);

        coordinates.push(Coordinate {
            lat: lat as f64 / factor,
            lng: lng as f64 / factor,
        });
    }

    tracing::trace!(points = coordinates.len(), bytes = bytes.len(), precision, "decoded polyline");
    Ok(coordinates)
}

/// Read one delta, tagging failures with the offset of the run.
fn read_delta(cursor: &mut Cursor<&[u8]>) -> Result<i32, Error> {
    let position = cursor.position() as usize;
    cursor
        .read_varcode()
        .map_err(|source| Error::MalformedEncoding { position, source })
}

/// Decodes the VarCode run starting at `index` in `polyline`.
///
/// ## Returns
/// * `Ok((value, next_index))` - The decoded value and the index just past
///   the consumed characters
/// * `Err(Error::MalformedEncoding)` - If the run is truncated or invalid
pub fn decode_signed(polyline: &str, index: usize) -> Result<(i32, usize), Error> {
    let mut cursor = Cursor::new(polyline.as_bytes());
    cursor.set_position(index as u64);
    let value = read_delta(&mut cursor)?;
    Ok((value, cursor.position() as usize))
}

/// A codec bound to one precision, so encode and decode calls cannot
/// disagree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolylineCodec {
    precision: u32,
}

impl Default for PolylineCodec {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl PolylineCodec {
    /// Create a codec for the given precision.
    pub const fn new(precision: u32) -> Self {
        Self { precision }
    }

    /// The number of decimal digits preserved.
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// See [`encode`].
    pub fn encode(&self, coordinates: &[Coordinate]) -> String {
        encode(coordinates, self.precision)
    }

    /// See [`decode`].
    pub fn decode(&self, polyline: &str) -> Result<Vec<Coordinate>, Error> {
        decode(polyline, self.precision)
    }

    /// See [`geometry::encode_geometry`].
    pub fn encode_geometry(&self, geometry: &Geometry) -> Result<String, Error> {
        geometry::encode_geometry(geometry, self.precision)
    }

    /// See [`geometry::decode_geometry`].
    pub fn decode_geometry(&self, polyline: &str, kind: GeometryKind) -> Result<Geometry, Error> {
        geometry::decode_geometry(polyline, self.precision, kind)
    }
}
