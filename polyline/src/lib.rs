#![deny(missing_docs)]

//! # Encoded Polyline
//!
//! This library encodes sequences of geographic coordinates into compact
//! printable-ASCII strings and back, using the Encoded Polyline format.
//!
//! ## Usage Example
//!
//! ```
//! use polyline::Coordinate;
//!
//! let path = vec![
//!     Coordinate::new(38.5, -120.2),
//!     Coordinate::new(40.7, -120.95),
//!     Coordinate::new(43.252, -126.453),
//! ];
//!
//! let encoded = polyline::encode(&path, 5);
//! assert_eq!(encoded, "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
//!
//! let decoded = polyline::decode(&encoded, 5).unwrap();
//! assert_eq!(decoded, path);
//! ```
//!
//! ## Architecture
//!
//! * **VarCode**: a single signed integer as a run of 5-bit characters
//! * **Codec**: coordinate sequences as deltas between scaled integers
//! * **Geometry**: LineString and Polygon objects in `[lng, lat]` order

pub mod codec;
pub mod config;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod varcode;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use codec::decode;
pub use codec::decode_signed;
pub use codec::encode;
pub use codec::Coordinate;
pub use codec::PolylineCodec;
pub use codec::DEFAULT_PRECISION;

pub use geometry::decode_geojson;
pub use geometry::decode_geometry;
pub use geometry::encode_geojson;
pub use geometry::encode_geometry;
pub use geometry::Geometry;
pub use geometry::GeometryKind;

pub use varcode::encode_signed;

pub use error::Error;
