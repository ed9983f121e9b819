use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Pick the filter directive for the requested verbosity.
///
/// `quiet` wins over `verbose` when both are set.
pub fn log_directive(quiet: bool, verbose: bool) -> &'static str {
    if quiet {
        "confres=error"
    } else if verbose {
        "confres=debug"
    } else {
        "confres=info"
    }
}

/// Initialize JSON logging to stderr.
///
/// When `quiet` is true, only error-level events are emitted.
/// When `verbose` is true, debug-level events (candidate matching) are emitted.
/// Otherwise info-level and above events are emitted (default).
pub fn init_logging(quiet: bool, verbose: bool) {
    let filter = match log_directive(quiet, verbose).parse() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::from_default_env(),
    };

    // try_init: a subscriber may already be installed by an embedding application
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(filter)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directive() {
        assert_eq!(log_directive(false, false), "confres=info");
        assert_eq!(log_directive(true, false), "confres=error");
        assert_eq!(log_directive(false, true), "confres=debug");
        assert_eq!(log_directive(true, true), "confres=error");
    }

    #[test]
    fn test_init_logging_twice_does_not_panic() {
        init_logging(true, false);
        init_logging(false, true);
    }
}
