//! Benchmark setup error type.
//!
//! Setup functions propagate fixture failures with `?` and the benchmark
//! entry points turn them into a single panic message.

use strider_core::StriderError;
use strider_providers_text::TextFormatError;

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Graph generation, reachability or a walk session failed.
    #[error("graph operation failed: {0}")]
    Core(#[from] StriderError),
    /// A generated text fixture failed to parse.
    #[error("text fixture failed to parse: {0}")]
    Text(#[from] TextFormatError),
}
