//! Tracing subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "bugtrack_api=debug,bugtrack_db=info,tower_http=debug";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter. `LOG_FORMAT=json` switches to
/// one JSON object per event for log shippers; anything else gives the
/// human-readable format.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
