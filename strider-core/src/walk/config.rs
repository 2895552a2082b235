//! Walk configuration and its builder.

use std::num::NonZeroU64;

use rand::{SeedableRng, rngs::SmallRng};

use crate::{Result, error::StriderError};

use super::SelectionMode;

/// Interval, in steps, between progress events when reporting is enabled
/// without an explicit interval.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;

/// Maximum number of steps a single run may take before it is abandoned.
pub const DEFAULT_STEP_LIMIT: u64 = 100_000_000;

/// SplitMix64 increment (the 64-bit golden ratio) used for per-run seed
/// derivation.
const RUN_SEED_SPACING: u64 = 0x9E37_79B9_7F4A_7C15;
const SPLITMIX_MULT_A: u64 = 0xBF58_476D_1CE4_E5B9;
const SPLITMIX_MULT_B: u64 = 0x94D0_49BB_1331_11EB;

/// Immutable settings shared by every run of a walk.
///
/// # Examples
/// ```
/// use strider_core::{SelectionMode, WalkConfig};
///
/// let config = WalkConfig::builder()
///     .with_mode(SelectionMode::OutDegree)
///     .with_discover(true)
///     .with_seed(42)
///     .build()
///     .expect("configuration is valid");
/// assert_eq!(config.mode(), SelectionMode::OutDegree);
/// assert!(config.discover());
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WalkConfig {
    mode: SelectionMode,
    discover: bool,
    seed: Option<u64>,
    progress_interval: Option<NonZeroU64>,
    step_limit: NonZeroU64,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Classic,
            discover: false,
            seed: None,
            progress_interval: None,
            step_limit: NonZeroU64::MIN.saturating_add(DEFAULT_STEP_LIMIT - 1),
        }
    }
}

impl WalkConfig {
    /// Starts a builder populated with defaults.
    #[must_use]
    pub fn builder() -> WalkConfigBuilder {
        WalkConfigBuilder::default()
    }

    /// Neighbour selection rule.
    #[rustfmt::skip]
    #[must_use]
    pub const fn mode(&self) -> SelectionMode { self.mode }

    /// Whether visiting a vertex also discovers its neighbours.
    #[rustfmt::skip]
    #[must_use]
    pub const fn discover(&self) -> bool { self.discover }

    /// Base seed, or `None` when every run draws from OS entropy.
    #[rustfmt::skip]
    #[must_use]
    pub const fn seed(&self) -> Option<u64> { self.seed }

    /// Steps between progress events, when reporting is enabled.
    #[rustfmt::skip]
    #[must_use]
    pub const fn progress_interval(&self) -> Option<NonZeroU64> { self.progress_interval }

    /// Maximum number of steps per run.
    #[rustfmt::skip]
    #[must_use]
    pub const fn step_limit(&self) -> NonZeroU64 { self.step_limit }

    /// Random source for the run with index `run_index`.
    ///
    /// Seeded configurations derive a distinct, reproducible seed per run;
    /// unseeded ones draw fresh entropy every time.
    pub(crate) fn run_rng(&self, run_index: usize) -> SmallRng {
        match self.seed {
            Some(base) => SmallRng::seed_from_u64(mix_run_seed(base, run_index)),
            None => SmallRng::from_entropy(),
        }
    }
}

/// Builder for [`WalkConfig`].
#[derive(Clone, Debug)]
pub struct WalkConfigBuilder {
    mode: SelectionMode,
    discover: bool,
    seed: Option<u64>,
    progress_interval: Option<u64>,
    step_limit: u64,
}

impl Default for WalkConfigBuilder {
    fn default() -> Self {
        Self {
            mode: SelectionMode::Classic,
            discover: false,
            seed: None,
            progress_interval: None,
            step_limit: DEFAULT_STEP_LIMIT,
        }
    }
}

impl WalkConfigBuilder {
    /// Sets the neighbour selection rule.
    #[must_use]
    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables or disables neighbour discovery.
    #[must_use]
    pub fn with_discover(mut self, discover: bool) -> Self {
        self.discover = discover;
        self
    }

    /// Makes every run reproducible from `seed`.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the base seed.
    #[must_use]
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Emits a progress event every `interval` steps.
    #[must_use]
    pub fn with_progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = Some(interval);
        self
    }

    /// Emits progress events at [`DEFAULT_PROGRESS_INTERVAL`].
    #[must_use]
    pub fn with_progress(self) -> Self {
        self.with_progress_interval(DEFAULT_PROGRESS_INTERVAL)
    }

    /// Caps the number of steps a single run may take.
    #[must_use]
    pub fn with_step_limit(mut self, limit: u64) -> Self {
        self.step_limit = limit;
        self
    }

    /// Validates the settings.
    ///
    /// # Errors
    /// Returns [`StriderError::InvalidParameter`] when the step limit or the
    /// progress interval is zero.
    pub fn build(self) -> Result<WalkConfig> {
        let step_limit = NonZeroU64::new(self.step_limit).ok_or_else(|| {
            StriderError::invalid_parameter("step_limit", "must be greater than zero")
        })?;
        let progress_interval = self
            .progress_interval
            .map(|interval| {
                NonZeroU64::new(interval).ok_or_else(|| {
                    StriderError::invalid_parameter(
                        "progress_interval",
                        "must be greater than zero",
                    )
                })
            })
            .transpose()?;
        Ok(WalkConfig {
            mode: self.mode,
            discover: self.discover,
            seed: self.seed,
            progress_interval,
            step_limit,
        })
    }
}

#[inline]
fn mix_run_seed(base_seed: u64, run_index: usize) -> u64 {
    splitmix64(base_seed ^ ((run_index as u64 + 1).wrapping_mul(RUN_SEED_SPACING)))
}

#[inline]
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(RUN_SEED_SPACING);
    state = (state ^ (state >> 30)).wrapping_mul(SPLITMIX_MULT_A);
    state = (state ^ (state >> 27)).wrapping_mul(SPLITMIX_MULT_B);
    state ^ (state >> 31)
}
