use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Install the global subscriber, filtered by `RUST_LOG`, safe to call more than once
pub fn init() {
    INIT.call_once(|| {
        let subscriber = fmt().with_env_filter(EnvFilter::from_default_env()).finish();

        if tracing::subscriber::set_global_default(subscriber).is_err() {
            debug!("global subscriber already set by the host");
        }

        // forward `log` records from dependencies
        if let Err(error) = tracing_log::LogTracer::init() {
            debug!("log forwarding not installed: {error}");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        init();
        init();

        assert!(INIT.is_completed());
        tracing::debug!("still logging after repeated init");
    }
}
