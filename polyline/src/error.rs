//! Top-level error type for the polyline library
//!

use crate::varcode;

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The geometry object was missing its type tag, carried a type other
    /// than LineString or Polygon, or could not be read at all.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A VarCode run inside the encoded string could not be decoded.
    #[error("malformed polyline at offset {position}: {source}")]
    MalformedEncoding {
        /// Byte offset of the run that failed to decode
        position: usize,
        /// The underlying VarCode error
        #[source]
        source: varcode::Error,
    },
    /// The encoded string ended after a latitude delta, before the matching
    /// longitude delta.
    #[error("malformed polyline: latitude delta at offset {position} has no longitude delta")]
    UnpairedDelta {
        /// Byte offset where the longitude delta was expected
        position: usize,
    },
    /// The settings could not be loaded or failed validation.
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    /// Whether this error came from decoding a malformed encoded string.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Error::MalformedEncoding { .. } | Error::UnpairedDelta { .. }
        )
    }
}
