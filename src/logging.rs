//! Logging setup.

use tracing_subscriber::EnvFilter;

/// Load `.env`, then install the global `tracing` subscriber.
///
/// `RUST_LOG` (from the environment or `.env`) overrides the default `info` level.
pub fn init_logging() {
    dotenv::dotenv().ok();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(EnvFilter::DEFAULT_ENV))
        .with_target(false)
        .try_init();
}

fn env_filter(var: &str) -> EnvFilter {
    EnvFilter::try_from_env(var).unwrap_or_else(|_| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tracing_subscriber::filter::LevelFilter;

    #[test]
    fn filter_defaults_to_info() {
        let filter = env_filter("STREAMGAGE_HEALTH_UNSET_LOG");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn filter_reads_level_loaded_from_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "STREAMGAGE_HEALTH_TEST_LOG=debug\n").unwrap();

        dotenv::from_path(&path).unwrap();

        let filter = env_filter("STREAMGAGE_HEALTH_TEST_LOG");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }
}
