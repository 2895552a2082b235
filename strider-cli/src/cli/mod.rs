//! Command-line interface orchestration for strider.
//!
//! Every subcommand loads or builds a graph, runs the matching core
//! operation and writes its files next to a template path. The returned
//! [`ExecutionSummary`] is what the binary prints to `stdout`.

mod commands;
mod report;

pub use commands::{
    AnalyzeArgs, Cli, CliError, Command, ConvertArgs, CoverArgs, ExecutionSummary, GenerateArgs,
    ModeArg, PathArgs, WalkArgs, WalkSummary, render_summary, run_cli,
};
pub use report::{ReportConfig, ResultExporter};

#[cfg(test)]
mod test_helpers;
#[cfg(test)]
mod tests;
