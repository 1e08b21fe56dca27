//! Opt-in log output for programs embedding the codec
//!

use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Directives used when `RUST_LOG` is not set.
const DEFAULT_DIRECTIVES: &str = "info,polyline=debug";

/// Install a global subscriber. JSON lines by default, human readable when
/// `pretty` is set. Does nothing if a subscriber is already installed.
pub fn setup_logging(pretty: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    let result = if pretty {
        let main_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_timer(UtcTime::rfc_3339());

        tracing_subscriber::registry()
            .with(filter)
            .with(main_layer)
            .try_init()
    } else {
        let main_layer = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(false)
            .with_current_span(true)
            .with_span_list(true)
            .with_line_number(true)
            .with_file(true)
            .with_timer(UtcTime::rfc_3339());

        tracing_subscriber::registry()
            .with(filter)
            .with(main_layer)
            .try_init()
    };

    if let Err(error) = result {
        tracing::debug!(%error, "global subscriber already installed");
    }
}
