//! Small helpers shared across CLI tests.
//!
//! The CLI unit tests write graph files into temporary directories and read
//! the reports back. These helpers keep the test cases concise.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::{Cli, CliError, Command, CoverArgs, ModeArg, PathArgs, WalkArgs, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_graph_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

/// Parses a `key    value` report file.
pub(super) fn read_rows(path: &Path) -> io::Result<Vec<(u64, u64)>> {
    let text = fs::read_to_string(path)?;
    let rows = text
        .lines()
        .map(|line| {
            let (key, value) = line
                .split_once("    ")
                .unwrap_or_else(|| panic!("row `{line}` in {} lacks the gap", path.display()));
            match (key.parse(), value.parse()) {
                (Ok(key), Ok(value)) => (key, value),
                _ => panic!("row `{line}` in {} is not numeric", path.display()),
            }
        })
        .collect();
    Ok(rows)
}

pub(super) fn walk_args(input: PathBuf) -> WalkArgs {
    WalkArgs {
        input,
        start: "0".into(),
        runs: 3,
        mode: ModeArg::Classic,
        discover: false,
        seed: Some(11),
        gml: false,
        template: None,
        progress: None,
    }
}

pub(super) fn cover(walk: WalkArgs, coverage: u32) -> Cli {
    Cli {
        command: Command::Cover(CoverArgs { walk, coverage }),
    }
}

pub(super) fn path(walk: WalkArgs, target: &str) -> Cli {
    Cli {
        command: Command::Path(PathArgs {
            walk,
            target: target.into(),
        }),
    }
}

pub(super) fn run_cli_expecting_error(cli: Cli, panic_msg: &str) -> CliError {
    match run_cli(cli) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
