use std::env;

use proptest::prelude::ProptestConfig;

/// Shared proptest config. Raise locally with `PROPTEST_CASES=256`.
pub fn proptest_config() -> ProptestConfig {
    let cases = env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);

    ProptestConfig {
        cases,
        ..ProptestConfig::default()
    }
}
