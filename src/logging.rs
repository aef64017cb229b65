//! Log subscriber setup.
//!
//! Everything is written to stderr; stdout belongs to the MCP transport when
//! the binary runs as a server.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_DIRECTIVES: &str = "resource_discovery=info,rmcp=warn";

static INIT: Once = Once::new();

/// Install the global subscriber. Later calls are no-ops.
///
/// `json` switches from compact human-readable lines to one JSON object per
/// event, for log shippers.
pub fn init(json: bool) {
    INIT.call_once(|| {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_ansi(false)
            .with_target(true)
            .with_writer(std::io::stderr);

        let installed = if json {
            builder.json().finish().try_init()
        } else {
            builder.compact().finish().try_init()
        };

        if let Err(e) = installed {
            eprintln!("Failed to initialize logging: {}", e);
        }
    });
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES))
}
