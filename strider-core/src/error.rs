//! Error types for the strider core library.
//!
//! Defines the error enum exposed by the public API, stable machine-readable
//! codes, the coarse error taxonomy used by callers to decide how to report a
//! failure, and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::walk::SelectionMode;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// Coarse classification of failures.
///
/// Callers use the category to decide whether a failure is a caller bug
/// ([`ErrorCategory::InvalidConfiguration`], [`ErrorCategory::PreconditionViolation`])
/// or a condition worth reporting to the operator.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub enum ErrorCategory {
    /// A referenced vertex name is absent from the graph.
    NotFound,
    /// Serialized input could not be decoded.
    MalformedInput,
    /// The requested run cannot be satisfied by the graph or configuration.
    InvalidConfiguration,
    /// A numeric or structural argument was out of range.
    PreconditionViolation,
    /// A walk stopped making progress before its termination condition.
    Stalled,
}

impl ErrorCategory {
    /// Returns a lowercase label suitable for structured logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::MalformedInput => "malformed_input",
            Self::InvalidConfiguration => "invalid_configuration",
            Self::PreconditionViolation => "precondition_violation",
            Self::Stalled => "stalled",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error type produced by graph construction, traversal and aggregation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum StriderError {
    /// A vertex name was not present in the graph.
    #[error("no vertex `{name}` found")]
    VertexNotFound {
        /// The name that failed to resolve.
        name: Arc<str>,
    },
    /// A weighted edge was added to an unweighted graph or vice versa.
    #[error("edge `{from}` -> `{to}` does not match the graph weighting (weighted graph: {weighted})")]
    EdgeWeightMismatch {
        /// Source endpoint of the rejected edge.
        from: Arc<str>,
        /// Target endpoint of the rejected edge.
        to: Arc<str>,
        /// Whether the graph under construction is weighted.
        weighted: bool,
    },
    /// The selection mode needs in-degree information that undirected graphs lack.
    #[error("selection mode `{mode}` requires a directed graph")]
    ModeRequiresDirected {
        /// The rejected selection mode.
        mode: SelectionMode,
    },
    /// Requested coverage percentage lies outside `0..=100`.
    #[error("coverage must be within 0..=100 (got {requested})")]
    CoverageOutOfRange {
        /// The rejected percentage.
        requested: u32,
    },
    /// Requested coverage exceeds what BFS can reach from the start vertex.
    #[error(
        "coverage {requested}% is unattainable from `{start}`; at most {achievable}% of vertices are reachable"
    )]
    CoverageUnattainable {
        /// Start vertex of the rejected run.
        start: Arc<str>,
        /// Coverage requested by the caller.
        requested: u8,
        /// Coverage measured by the reachability check.
        achievable: u8,
    },
    /// The target vertex is not reachable from the start vertex.
    #[error("target `{target}` is unreachable from `{start}`")]
    TargetUnreachable {
        /// Start vertex of the rejected run.
        start: Arc<str>,
        /// Target vertex of the rejected run.
        target: Arc<str>,
    },
    /// Averaging was requested over an empty set of run results.
    #[error("cannot average an empty set of walk results")]
    EmptyResultSet,
    /// A numeric or structural parameter was out of range.
    #[error("invalid parameter `{parameter}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Human-readable explanation.
        reason: Arc<str>,
    },
    /// The walk reached a vertex without outgoing edges before terminating.
    #[error("walk stalled at `{vertex}` after {time} steps: vertex has no outgoing edges")]
    WalkStalled {
        /// The dead-end vertex.
        vertex: Arc<str>,
        /// Simulation time at which the walk stalled.
        time: u64,
    },
    /// The walk exceeded the configured step limit before terminating.
    #[error("walk exceeded the step limit of {limit} without terminating")]
    StepLimitExceeded {
        /// Configured step limit.
        limit: u64,
    },
}

define_error_codes! {
    /// Stable codes describing [`StriderError`] variants.
    enum StriderErrorCode for StriderError {
        /// A vertex name was not present in the graph.
        VertexNotFound => VertexNotFound { .. } => "STRIDER_VERTEX_NOT_FOUND",
        /// A weighted edge was mixed with unweighted edges.
        EdgeWeightMismatch => EdgeWeightMismatch { .. } => "STRIDER_EDGE_WEIGHT_MISMATCH",
        /// The selection mode requires a directed graph.
        ModeRequiresDirected => ModeRequiresDirected { .. } => "STRIDER_MODE_REQUIRES_DIRECTED",
        /// Requested coverage percentage lies outside `0..=100`.
        CoverageOutOfRange => CoverageOutOfRange { .. } => "STRIDER_COVERAGE_OUT_OF_RANGE",
        /// Requested coverage exceeds BFS reachability.
        CoverageUnattainable => CoverageUnattainable { .. } => "STRIDER_COVERAGE_UNATTAINABLE",
        /// The target vertex is unreachable.
        TargetUnreachable => TargetUnreachable { .. } => "STRIDER_TARGET_UNREACHABLE",
        /// Averaging received no results.
        EmptyResultSet => EmptyResultSet => "STRIDER_EMPTY_RESULT_SET",
        /// A parameter was out of range.
        InvalidParameter => InvalidParameter { .. } => "STRIDER_INVALID_PARAMETER",
        /// The walk hit a dead end.
        WalkStalled => WalkStalled { .. } => "STRIDER_WALK_STALLED",
        /// The walk exceeded its step limit.
        StepLimitExceeded => StepLimitExceeded { .. } => "STRIDER_STEP_LIMIT_EXCEEDED",
    }
}

impl StriderError {
    /// Classifies the error into the coarse [`ErrorCategory`] taxonomy.
    ///
    /// # Examples
    /// ```
    /// use strider_core::{ErrorCategory, StriderError};
    ///
    /// let err = StriderError::EmptyResultSet;
    /// assert_eq!(err.category(), ErrorCategory::InvalidConfiguration);
    /// ```
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::VertexNotFound { .. } => ErrorCategory::NotFound,
            Self::ModeRequiresDirected { .. }
            | Self::CoverageOutOfRange { .. }
            | Self::CoverageUnattainable { .. }
            | Self::TargetUnreachable { .. }
            | Self::EmptyResultSet => ErrorCategory::InvalidConfiguration,
            Self::EdgeWeightMismatch { .. } | Self::InvalidParameter { .. } => {
                ErrorCategory::PreconditionViolation
            }
            Self::WalkStalled { .. } | Self::StepLimitExceeded { .. } => ErrorCategory::Stalled,
        }
    }

    pub(crate) fn vertex_not_found(name: &str) -> Self {
        Self::VertexNotFound { name: name.into() }
    }

    pub(crate) fn invalid_parameter(parameter: &'static str, reason: impl Into<Arc<str>>) -> Self {
        Self::InvalidParameter {
            parameter,
            reason: reason.into(),
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, StriderError>;

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case::not_found(StriderError::vertex_not_found("x"), "STRIDER_VERTEX_NOT_FOUND", ErrorCategory::NotFound)]
    #[case::empty(StriderError::EmptyResultSet, "STRIDER_EMPTY_RESULT_SET", ErrorCategory::InvalidConfiguration)]
    #[case::mode(
        StriderError::ModeRequiresDirected { mode: SelectionMode::InDegree },
        "STRIDER_MODE_REQUIRES_DIRECTED",
        ErrorCategory::InvalidConfiguration,
    )]
    #[case::parameter(
        StriderError::invalid_parameter("arity", "must be positive"),
        "STRIDER_INVALID_PARAMETER",
        ErrorCategory::PreconditionViolation,
    )]
    #[case::stalled(
        StriderError::StepLimitExceeded { limit: 3 },
        "STRIDER_STEP_LIMIT_EXCEEDED",
        ErrorCategory::Stalled,
    )]
    fn codes_and_categories_are_stable(
        #[case] err: StriderError,
        #[case] code: &str,
        #[case] category: ErrorCategory,
    ) {
        assert_eq!(err.code().as_str(), code);
        assert_eq!(err.category(), category);
    }

    #[test]
    fn vertex_not_found_names_the_vertex() {
        let err = StriderError::vertex_not_found("hub");
        assert_eq!(err.to_string(), "no vertex `hub` found");
    }
}
