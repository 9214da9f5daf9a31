//! Error types for the resolution pass.

use thiserror::Error;

use crate::plan::expr::Literal;
use crate::types::class::TypeClass;
use crate::types::source::SqlType;

/// Errors that can occur while resolving types and overloads.
///
/// A failed resolution aborts compilation of the statement; the partially
/// annotated tree must be discarded by the caller.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("aggregate function {name} is not supported during type resolution")]
    UnsupportedAggregate { name: String },

    #[error("subquery value expressions are not supported during type resolution")]
    UnsupportedSubqueryValue,

    #[error("source type {0:?} has no runtime counterpart")]
    UnsupportedSourceType(SqlType),

    #[error("literal {0:?} has no runtime representation")]
    UnrepresentableLiteral(Literal),

    #[error("no overload of {name} accepts operand types ({operands})")]
    NoOverload { name: String, operands: String },

    #[error("call to {name} with operand types ({operands}) is ambiguous")]
    AmbiguousOverload { name: String, operands: String },

    #[error("no common type for {left:?} and {right:?}")]
    NoCommonType { left: TypeClass, right: TypeClass },

    #[error("could not determine a type for a conditional branch")]
    UntypedBranch,

    #[error("registry misconfiguration: {0}")]
    Configuration(String),
}

/// Broad classification of a resolution failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The statement uses a construct this pass does not handle.
    Unsupported,
    /// The statement cannot be typed; reported to the client as a rejected
    /// statement.
    TypeResolution,
    /// A defect in overload or type-class registration, not a user error.
    Configuration,
}

impl ResolveError {
    /// Which part of the error taxonomy this error belongs to, so callers
    /// can tell a bad query from an engine defect.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ResolveError::UnsupportedAggregate { .. }
            | ResolveError::UnsupportedSubqueryValue
            | ResolveError::UnsupportedSourceType(_)
            | ResolveError::UnrepresentableLiteral(_) => ErrorKind::Unsupported,

            ResolveError::NoOverload { .. }
            | ResolveError::AmbiguousOverload { .. }
            | ResolveError::NoCommonType { .. }
            | ResolveError::UntypedBranch => ErrorKind::TypeResolution,

            ResolveError::Configuration(_) => ErrorKind::Configuration,
        }
    }
}

/// Result type for resolution operations.
pub type ResolveResult<T> = Result<T, ResolveError>;
