/// Logging setup
///
/// Everything logs through `tracing`. Set `RUST_LOG` to override the default
/// filter, e.g. `RUST_LOG=image_scroller=debug`.
use tracing_subscriber::EnvFilter;

/// Default filter: our own events at info, dependencies (wgpu, iced) at warn
const DEFAULT_FILTER: &str = "warn,image_scroller=info";

/// Install the global subscriber. Safe to call more than once.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
