use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when RUST_LOG is unset
const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,ambari=debug,cli=debug,config=debug";

/// Initialize tracing on stderr so stdout only carries command output
pub fn init_tracing() {
    init_tracing_with(DEFAULT_FILTER);
}

/// Debug output for the client and the CLI, unless RUST_LOG says otherwise
pub fn init_verbose_tracing() {
    init_tracing_with(VERBOSE_FILTER);
}

/// Like [`init_tracing`], with an explicit fallback filter (e.g. "ambari=debug")
fn init_tracing_with(default_filter: &str) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .compact();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // A second init (tests, embedding applications) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();

    tracing::debug!(target: "system", "Tracing initialized");
}

/// Log an outgoing Ambari call
#[macro_export]
macro_rules! trace_request {
    ($method:expr, $path:expr) => {
        $crate::tracing::debug!(target: "ambari", "{} {}", $method, $path);
    };
}
