//! Support library for the strider CLI binary.
//!
//! Re-exports the command pipeline and logging bootstrap so doctests and
//! integration tests can drive every subcommand without forking a subprocess.

pub mod cli;
pub mod logging;
