//! Logging setup
//!
//! `RUST_LOG` wins when set; otherwise this crate logs at the configured
//! level and dependencies at `info`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive for a log level
pub fn default_directive(level: &str) -> String {
    format!("crafter_cms={},info", level)
}

/// Install the global subscriber, plain text or JSON lines
pub fn init(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_parses() {
        let directive = default_directive("debug");
        assert_eq!(directive, "crafter_cms=debug,info");
        assert!(EnvFilter::try_new(directive).is_ok());
    }
}
