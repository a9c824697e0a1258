//! Setup and initialization functions for CLI
//!
//! Logging and thread pool configuration, done once at startup.

use tracing_subscriber::EnvFilter;

/// Default log level for a `-v` count. `RUST_LOG` overrides it.
pub fn log_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the stderr log subscriber.
pub fn init_tracing(verbosity: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbosity)));

    // Fails only if a subscriber is already installed, e.g. under tests
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Configure rayon global thread pool once at startup
pub fn configure_thread_pool(jobs: usize) {
    let mut builder = rayon::ThreadPoolBuilder::new();

    if jobs > 0 {
        builder = builder.num_threads(jobs);
    }

    if let Err(e) = builder.build_global() {
        tracing::debug!("Thread pool already configured: {}", e);
    }
}

/// Get the number of worker threads to use
pub fn get_worker_count(jobs: usize) -> usize {
    if jobs == 0 {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    } else {
        jobs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_worker_count_explicit() {
        assert_eq!(get_worker_count(4), 4);
        assert_eq!(get_worker_count(8), 8);
    }

    #[test]
    fn test_get_worker_count_auto() {
        assert!(get_worker_count(0) > 0);
    }

    #[test]
    fn test_log_level_by_verbosity() {
        assert_eq!(log_level(0), "warn");
        assert_eq!(log_level(1), "info");
        assert_eq!(log_level(2), "debug");
        assert_eq!(log_level(7), "trace");
    }
}
