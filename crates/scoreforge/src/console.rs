//! Console output for scoring sessions.
//!
//! Installs a `tracing` subscriber printing the events of the scoring
//! crates: session and inliner construction at DEBUG, one line per
//! propagation pass at TRACE, unknown weight overrides at WARN.
//!
//! The `RUST_LOG` environment variable overrides the default filter.

use std::sync::OnceLock;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Default filter directive when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "scoreforge_scoring=info";

/// Initializes console logging.
///
/// Safe to call multiple times - only the first call has effect. Leaves an
/// already installed global subscriber in place.
pub fn init() {
    INIT.get_or_init(|| {
        let _ = tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init();
    });
}

fn filter() -> EnvFilter {
    let builder = EnvFilter::builder();
    match DEFAULT_DIRECTIVE.parse::<Directive>() {
        Ok(directive) => builder.with_default_directive(directive).from_env_lossy(),
        Err(_) => builder.from_env_lossy(),
    }
}
