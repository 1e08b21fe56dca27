//! Configuration management for the codec defaults
use std::path::Path;

use config::Config;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::codec::PolylineCodec;
use crate::codec::DEFAULT_PRECISION;
use crate::error::Error;
use crate::geometry::GeometryKind;

/// The largest precision accepted from configuration. Past this `10^P`
/// times a degree value no longer lands on distinct `f64` integers.
pub const MAX_PRECISION: u32 = 15;

/// Trait for validating configuration values.
trait Validatable {
    /// Validate the configuration values.
    fn validate(&self) -> Result<(), ConfigError>;
}

/// Top-level configuration
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Settings {
    /// Codec specific config
    #[serde(default)]
    pub codec: CodecConfig,
}

/// Codec specific config
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecConfig {
    /// Number of decimal digits preserved when encoding
    #[serde(default = "default_precision")]
    pub precision: u32,
    /// The geometry type produced when decoding to a geometry
    #[serde(default)]
    pub geometry: GeometryKind,
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            geometry: GeometryKind::default(),
        }
    }
}

impl Validatable for CodecConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.precision > MAX_PRECISION {
            return Err(ConfigError::Message(format!(
                "[codec] Precision must be at most {MAX_PRECISION}, got {}",
                self.precision
            )));
        }

        Ok(())
    }
}

impl From<&CodecConfig> for PolylineCodec {
    fn from(config: &CodecConfig) -> Self {
        PolylineCodec::new(config.precision)
    }
}

impl Settings {
    /// Load settings from an optional config file, overridden by
    /// environment variables.
    ///
    /// The environment variables are prefixed with `POLYLINE_` and the
    /// nested fields are separated with double underscores. For example,
    /// the path `codec.precision` is set with:
    ///
    /// ```text
    /// POLYLINE_CODEC__PRECISION
    /// ^^^^^^^^ ^^^^^  ^^^^^^^^^
    ///    │    ^  │  ^^    └ The `precision` field of the `codec` object
    ///    │    │  │  └ separator("__")
    ///    │    │  └ The `codec` field of the root object (`Settings`)
    ///    │    └ prefix_separator("_")
    ///    └ with_prefix("POLYLINE")
    /// ```
    pub fn new(config_path: Option<impl AsRef<Path>>) -> Result<Self, Error> {
        let env = Environment::with_prefix("POLYLINE")
            .separator("__")
            .try_parsing(true)
            .prefix_separator("_");

        let mut cfg_builder = Config::builder();
        if let Some(path) = config_path {
            cfg_builder = cfg_builder.add_source(File::from(path.as_ref()));
        }
        cfg_builder = cfg_builder.add_source(env);

        let settings: Settings = cfg_builder.build()?.try_deserialize()?;

        settings.validate()?;
        tracing::debug!(
            precision = settings.codec.precision,
            geometry = %settings.codec.geometry,
            "loaded polyline settings"
        );

        Ok(settings)
    }

    /// Perform validation on the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        self.codec.validate()?;

        Ok(())
    }

    /// A codec using the configured precision.
    pub fn codec(&self) -> PolylineCodec {
        PolylineCodec::from(&self.codec)
    }
}
