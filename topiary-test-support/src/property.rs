//! Environment-driven proptest case counts shared by the property suites.

use std::env;

/// Environment variable overriding the number of proptest cases.
pub const PROPTEST_CASES_ENV_KEY: &str = "TOPIARY_PROPTEST_CASES";

/// Returns the number of cases a property should run.
///
/// Falls back to `default_cases` when the override is unset or invalid.
///
/// # Examples
/// ```
/// use topiary_test_support::property::proptest_cases;
///
/// assert!(proptest_cases(64) > 0);
/// ```
#[must_use]
pub fn proptest_cases(default_cases: u32) -> u32 {
    let Ok(raw) = env::var(PROPTEST_CASES_ENV_KEY) else {
        return default_cases;
    };
    match parse_cases(&raw) {
        Ok(cases) => cases,
        Err(reason) => {
            tracing::warn!(
                env = PROPTEST_CASES_ENV_KEY,
                raw = %raw,
                reason = %reason,
                "invalid proptest case override; using default",
            );
            default_cases
        }
    }
}

fn parse_cases(raw: &str) -> Result<u32, String> {
    let parsed = raw
        .trim()
        .parse::<u32>()
        .map_err(|error| format!("parse error: {error}"))?;
    if parsed == 0 {
        return Err("cases must be > 0".to_owned());
    }
    Ok(parsed)
}
