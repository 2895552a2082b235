//! Errors raised while reading or writing the text graph format.

use std::fmt;

use strider_core::{ErrorCategory, StriderError};
use thiserror::Error;

/// Why a single line was rejected.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum MalformedLine {
    /// A character that no rule of the grammar accepts at this position.
    #[error("unexpected `{found}` at column {column}")]
    UnexpectedCharacter {
        /// 1-based character column.
        column: usize,
        /// The offending character.
        found: char,
    },
    /// The line ended inside a vertex name or an edge.
    #[error("line ends before the vertex or edge is complete")]
    UnexpectedEnd,
    /// A vertex was written as `[]`.
    #[error("vertex names must not be empty")]
    EmptyVertexName,
    /// The edge operator was `<>`.
    #[error("`<>` is not an edge operator; use `--`, `->` or `<-`")]
    InvalidOperator,
    /// The trailing weight token is not an integer.
    #[error("weight `{token}` is not an integer")]
    InvalidWeight {
        /// The rejected token.
        token: String,
    },
    /// The edge operator disagrees with the orientation fixed by the first edge.
    #[error("edge orientation conflicts with the graph (directed: {graph_directed})")]
    DirectednessConflict {
        /// Orientation fixed by the first edge of the file.
        graph_directed: bool,
    },
    /// The edge weighting disagrees with the weighting fixed by the first edge.
    #[error("edge weighting conflicts with the graph (weighted: {graph_weighted})")]
    WeightednessConflict {
        /// Weighting fixed by the first edge of the file.
        graph_weighted: bool,
    },
}

/// Error type produced by the text provider.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum TextFormatError {
    /// A line violated the grammar or the structure fixed by earlier lines.
    #[error("line {line}: {reason}")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: MalformedLine,
    },
    /// Reading or writing the underlying stream failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// The graph builder rejected a parsed edge.
    #[error(transparent)]
    Graph(#[from] StriderError),
}

/// Stable codes describing [`TextFormatError`] variants.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum TextFormatErrorCode {
    /// A line was rejected.
    Malformed,
    /// The stream failed.
    Io,
    /// The graph builder failed.
    Graph,
}

impl TextFormatErrorCode {
    /// Return the stable machine-readable representation of this error code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Malformed => "TEXT_FORMAT_MALFORMED_LINE",
            Self::Io => "TEXT_FORMAT_IO",
            Self::Graph => "TEXT_FORMAT_GRAPH",
        }
    }
}

impl fmt::Display for TextFormatErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TextFormatError {
    /// Retrieve the stable [`TextFormatErrorCode`] for this error.
    #[must_use]
    pub const fn code(&self) -> TextFormatErrorCode {
        match self {
            Self::Malformed { .. } => TextFormatErrorCode::Malformed,
            Self::Io(_) => TextFormatErrorCode::Io,
            Self::Graph(_) => TextFormatErrorCode::Graph,
        }
    }

    /// Line-level failures are malformed input; wrapped graph errors keep
    /// their own category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Malformed { .. } | Self::Io(_) => ErrorCategory::MalformedInput,
            Self::Graph(inner) => inner.category(),
        }
    }

    /// The 1-based line number, for line-level failures.
    #[must_use]
    pub const fn line(&self) -> Option<usize> {
        match self {
            Self::Malformed { line, .. } => Some(*line),
            _ => None,
        }
    }
}
