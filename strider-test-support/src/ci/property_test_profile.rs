//! Property-test run profile parsing for CI and local overrides.
//!
//! Every strider property suite takes its case count and fork mode from here,
//! so one pair of environment variables scales them all.

use std::env;

use proptest::test_runner::Config as ProptestConfig;

/// Environment variable controlling proptest case counts.
pub const PROGTEST_CASES_ENV_KEY: &str = "PROGTEST_CASES";
/// Environment variable controlling proptest process forking.
pub const STRIDER_PBT_FORK_ENV_KEY: &str = "STRIDER_PBT_FORK";

/// Runtime profile for property-test execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProptestRunProfile {
    cases: u32,
    fork: bool,
}

impl ProptestRunProfile {
    /// Loads a profile, letting the environment override the suite defaults.
    ///
    /// Unparseable overrides are logged at `warn` and ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use strider_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let profile = ProptestRunProfile::load(64, false);
    /// assert!(profile.cases() > 0);
    /// ```
    #[must_use]
    pub fn load(default_cases: u32, default_fork: bool) -> Self {
        Self {
            cases: override_or(PROGTEST_CASES_ENV_KEY, default_cases, parse_cases),
            fork: override_or(STRIDER_PBT_FORK_ENV_KEY, default_fork, parse_switch),
        }
    }

    /// Number of cases to run per property.
    #[must_use]
    pub const fn cases(&self) -> u32 {
        self.cases
    }

    /// Whether to run proptest cases in forked subprocesses.
    #[must_use]
    pub const fn fork(&self) -> bool {
        self.fork
    }

    /// Proptest configuration carrying this profile.
    ///
    /// # Examples
    ///
    /// ```
    /// use strider_test_support::ci::property_test_profile::ProptestRunProfile;
    ///
    /// let config = ProptestRunProfile::load(32, false).config();
    /// assert!(config.cases > 0);
    /// ```
    #[must_use]
    pub fn config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            fork: self.fork,
            ..ProptestConfig::default()
        }
    }
}

fn override_or<T>(key: &'static str, default: T, parse: fn(&str) -> Option<T>) -> T {
    let Ok(raw) = env::var(key) else {
        return default;
    };
    parse(raw.trim()).unwrap_or_else(|| {
        tracing::warn!(env = key, raw = %raw, "ignoring invalid property-test override");
        default
    })
}

fn parse_cases(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|&cases| cases > 0)
}

fn parse_switch(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    /// Restores a variable on drop; callers hold `ENV_LOCK`.
    struct EnvGuard {
        key: &'static str,
        original: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: Option<&str>) -> Self {
            let original = env::var(key).ok();
            apply(key, value);
            Self { key, original }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            apply(self.key, self.original.as_deref());
        }
    }

    fn apply(key: &str, value: Option<&str>) {
        // SAFETY: tests serialize access with ENV_LOCK.
        unsafe {
            match value {
                Some(value) => env::set_var(key, value),
                None => env::remove_var(key),
            }
        }
    }

    fn load_with(cases: Option<&str>, fork: Option<&str>, default_fork: bool) -> ProptestRunProfile {
        let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let _cases = EnvGuard::set(PROGTEST_CASES_ENV_KEY, cases);
        let _fork = EnvGuard::set(STRIDER_PBT_FORK_ENV_KEY, fork);
        ProptestRunProfile::load(64, default_fork)
    }

    #[test]
    fn defaults_apply_without_overrides() {
        let profile = load_with(None, None, false);
        assert_eq!(profile.cases(), 64);
        assert!(!profile.fork());
        assert_eq!(profile.config().cases, 64);
    }

    #[rstest]
    #[case::one("1", 1)]
    #[case::padded(" 250 ", 250)]
    #[case::large("25000", 25_000)]
    #[case::zero("0", 64)]
    #[case::negative("-1", 64)]
    #[case::garbage("abc", 64)]
    fn case_overrides(#[case] raw: &str, #[case] expected: u32) {
        assert_eq!(load_with(Some(raw), None, false).cases(), expected);
    }

    #[rstest]
    #[case::word("true", false, true)]
    #[case::shouting("TRUE", false, true)]
    #[case::digit("1", false, true)]
    #[case::yes("yes", false, true)]
    #[case::on("on", false, true)]
    #[case::off("off", true, false)]
    #[case::zero("0", true, false)]
    #[case::empty("", true, true)]
    #[case::maybe("maybe", true, true)]
    #[case::two("2", false, false)]
    fn fork_overrides(#[case] raw: &str, #[case] default_fork: bool, #[case] expected: bool) {
        let profile = load_with(None, Some(raw), default_fork);
        assert_eq!(profile.fork(), expected);
        assert_eq!(profile.config().fork, expected);
    }
}
