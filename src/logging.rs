use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

const LOG_MODULES: &[&str] = &["syndicate"];

fn default_directives() -> String {
    LOG_MODULES
        .iter()
        .map(|module| format!("{module}=info"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `RUST_LOG` wins over the built-in directives when set.
pub(crate) fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives()))
}

pub fn init_logging() -> Result<(), TryInitError> {
    let registry = tracing_subscriber::registry().with(env_filter());
    if std::env::var("LOG_JSON").is_ok() {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    }
}
