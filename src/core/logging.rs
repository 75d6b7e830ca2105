use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. `RUST_LOG` wins over
/// `default_directives` when it is set.
pub fn init(default_directives: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives.into());

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    // Only one global subscriber per process, later calls keep the first
    if let Err(e) = result {
        tracing::debug!("Tracing subscriber already installed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_keeps_first_subscriber() {
        init("relaychat=debug");
        init("relaychat=warn");
        assert!(tracing::dispatcher::has_been_set());
    }
}
