//! # Geometry Adapter
//!
//! Bridges the codec's `(lat, lng)` sequences and geometry interchange
//! objects, which list positions as `[lng, lat]` and tag them as either a
//! `LineString` or a `Polygon`.
//!
//! Only the outer ring of a polygon is encoded, holes are dropped. Rings
//! are not closed on the way in, so a polygon whose ring already repeats
//! its first point encodes that point twice. On the way out polygon rings
//! are always closed.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

use crate::codec;
use crate::codec::Coordinate;
use crate::error::Error;

/// A `[lng, lat]` position.
pub type Position = [f64; 2];

/// A position as read from interchange input: two or more numbers, of
/// which only longitude and latitude are kept. Altitude and anything
/// after it is ignored.
struct LenientPosition(Position);

impl<'de> Deserialize<'de> for LenientPosition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        match values.as_slice() {
            [lng, lat, ..] => Ok(Self([*lng, *lat])),
            _ => Err(D::Error::invalid_length(values.len(), &"at least 2 numbers")),
        }
    }
}

fn deserialize_path<'de, D>(deserializer: D) -> Result<Vec<Position>, D::Error>
where
    D: Deserializer<'de>,
{
    let path = Vec::<LenientPosition>::deserialize(deserializer)?;
    Ok(path.into_iter().map(|position| position.0).collect())
}

fn deserialize_rings<'de, D>(deserializer: D) -> Result<Vec<Vec<Position>>, D::Error>
where
    D: Deserializer<'de>,
{
    let rings = Vec::<Vec<LenientPosition>>::deserialize(deserializer)?;
    Ok(rings
        .into_iter()
        .map(|ring| ring.into_iter().map(|position| position.0).collect())
        .collect())
}

/// A geometry object in interchange form.
///
/// Serializes as `{"type": "LineString", "coordinates": [[lng, lat], ...]}`
/// or `{"type": "Polygon", "coordinates": [[[lng, lat], ...]]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    /// An open path.
    LineString {
        /// The path's positions in order
        #[serde(deserialize_with = "deserialize_path")]
        coordinates: Vec<Position>,
    },
    /// An area bounded by its first ring. Any further rings are holes,
    /// which the codec ignores.
    Polygon {
        /// The rings, outer ring first
        #[serde(deserialize_with = "deserialize_rings")]
        coordinates: Vec<Vec<Position>>,
    },
}

impl Geometry {
    /// The kind tag of this geometry.
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::LineString { .. } => GeometryKind::LineString,
            Geometry::Polygon { .. } => GeometryKind::Polygon,
        }
    }

    /// The ring that gets encoded: the path of a line string, or the outer
    /// ring of a polygon.
    pub fn ring(&self) -> Option<&[Position]> {
        match self {
            Geometry::LineString { coordinates } => Some(coordinates.as_slice()),
            Geometry::Polygon { coordinates } => coordinates.first().map(Vec::as_slice),
        }
    }
}

/// The geometry types the adapter can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GeometryKind {
    /// See [`Geometry::LineString`]
    #[default]
    LineString,
    /// See [`Geometry::Polygon`]
    Polygon,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LineString => write!(f, "LineString"),
            Self::Polygon => write!(f, "Polygon"),
        }
    }
}

impl FromStr for GeometryKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LineString" => Ok(Self::LineString),
            "Polygon" => Ok(Self::Polygon),
            _ => Err(Error::InvalidGeometry(format!(
                "unsupported geometry type: {s}. Available: LineString, Polygon"
            ))),
        }
    }
}

/// Encodes the ring of a geometry into a polyline string.
///
/// ## Errors
/// * [`Error::InvalidGeometry`] - a polygon without any ring.
pub fn encode_geometry(geometry: &Geometry, precision: u32) -> Result<String, Error> {
    let ring = geometry
        .ring()
        .ok_or_else(|| Error::InvalidGeometry("polygon has no outer ring".to_string()))?;

    if let Geometry::Polygon { coordinates } = geometry {
        if coordinates.len() > 1 {
            tracing::debug!(holes = coordinates.len() - 1, "ignoring polygon holes");
        }
    }

    let coordinates: Vec<Coordinate> = ring.iter().copied().map(Coordinate::from_position).collect();
    Ok(codec::encode(&coordinates, precision))
}

/// Decodes a polyline string into a geometry of the requested kind.
///
/// A decoded polygon ring is closed by repeating its first position when
/// the last one differs. An empty ring stays empty.
pub fn decode_geometry(
    polyline: &str,
    precision: u32,
    kind: GeometryKind,
) -> Result<Geometry, Error> {
    let mut ring: Vec<Position> = codec::decode(polyline, precision)?
        .into_iter()
        .map(Coordinate::to_position)
        .collect();

    let geometry = match kind {
        GeometryKind::LineString => Geometry::LineString { coordinates: ring },
        GeometryKind::Polygon => {
            close_ring(&mut ring);
            Geometry::Polygon { coordinates: vec![ring] }
        }
    };
    Ok(geometry)
}

/// Append the first position if the ring does not end where it starts.
fn close_ring(ring: &mut Vec<Position>) {
    if let (Some(first), Some(last)) = (ring.first().copied(), ring.last().copied()) {
        if first != last {
            ring.push(first);
        }
    }
}

/// Encodes a geometry given as JSON text.
///
/// ## Errors
/// * [`Error::InvalidGeometry`] - the text is not a LineString or Polygon
///   object, including a missing or unknown `type`.
pub fn encode_geojson(json: &str, precision: u32) -> Result<String, Error> {
    let geometry: Geometry =
        serde_json::from_str(json).map_err(|err| Error::InvalidGeometry(err.to_string()))?;
    encode_geometry(&geometry, precision)
}

/// Decodes a polyline string into a geometry of the named kind, returned as
/// JSON text.
pub fn decode_geojson(polyline: &str, precision: u32, kind: &str) -> Result<String, Error> {
    let geometry = decode_geometry(polyline, precision, kind.parse()?)?;
    serde_json::to_string(&geometry).map_err(|err| Error::InvalidGeometry(err.to_string()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn position() -> impl Strategy<Value = Position> {
        (-180.0..=180.0f64, -90.0..=90.0f64).prop_map(|(lng, lat)| [lng, lat])
    }

    proptest! {
        #[test]
        fn test_decoded_polygon_is_always_closed(
            ring in proptest::collection::vec(position(), 1..100),
            precision in 0u32..=6,
        ) {
            let polygon = Geometry::Polygon { coordinates: vec![ring] };
            let encoded = encode_geometry(&polygon, precision).unwrap();

            let decoded = decode_geometry(&encoded, precision, GeometryKind::Polygon).unwrap();
            let Geometry::Polygon { coordinates } = decoded else {
                panic!("expected a polygon");
            };
            prop_assert_eq!(coordinates.len(), 1);
            prop_assert_eq!(coordinates[0].first(), coordinates[0].last());
        }

        #[test]
        fn test_line_string_matches_swapped_codec_output(
            ring in proptest::collection::vec(position(), 0..100),
        ) {
            let swapped: Vec<Coordinate> =
                ring.iter().map(|&[lng, lat]| Coordinate::new(lat, lng)).collect();
            let line = Geometry::LineString { coordinates: ring };
            prop_assert_eq!(encode_geometry(&line, 5).unwrap(), codec::encode(&swapped, 5));
        }
    }
}
