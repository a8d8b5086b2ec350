//! Unified test logging initialization.

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceCell<()> = OnceCell::new();

const TEST_LOG_VAR: &str = "TEST_LOG";
const DEFAULT_FILTER: &str = "warn";

/// Initialize logging for tests.
///
/// Idempotent and race-safe; later calls are no-ops. The filter is taken from
/// `TEST_LOG`, then `RUST_LOG`, then defaults to `"warn"`.
///
/// ```bash
/// TEST_LOG=seigae=debug cargo test -p seigae
/// ```
pub fn init() {
    INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_env(TEST_LOG_VAR)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        // Store tests run writers on several threads. A subscriber installed
        // by another harness is kept.
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_thread_names(true)
            .with_target(false)
            .without_time()
            .try_init();
    });
}
