use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset. Failures are logged at `debug`, so
/// without `--verbose` the only stderr output is the `Error:` line from main.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "hvac_valuation=debug"
    } else {
        "hvac_valuation=warn"
    }
}

/// Installs the stderr subscriber. `RUST_LOG` takes precedence over the
/// verbosity flag.
pub fn init_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;
    use tracing::level_filters::LevelFilter;

    fn enabled(directive: &str, level: Level) -> bool {
        let filter: LevelFilter = directive
            .rsplit('=')
            .next()
            .and_then(|lvl| lvl.parse().ok())
            .expect("directive carries a level");
        level <= filter
    }

    #[test]
    fn quiet_mode_hides_debug_failure_events() {
        assert!(!enabled(default_directive(false), Level::DEBUG));
        assert!(enabled(default_directive(false), Level::WARN));
    }

    #[test]
    fn verbose_mode_shows_debug_events() {
        assert!(enabled(default_directive(true), Level::DEBUG));
        assert!(!enabled(default_directive(true), Level::TRACE));
    }

    #[test]
    fn directives_target_this_crate() {
        for verbose in [false, true] {
            assert!(default_directive(verbose).starts_with("hvac_valuation="));
        }
    }
}
