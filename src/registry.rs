//! Overload and common-type lookup facade.
//!
//! The registry is an external collaborator: it owns the catalog of scalar
//! overloads and the rules for picking one per call site. This crate only
//! defines the shape the resolving visitor consumes. One registry instance
//! is shared read-only across all concurrently compiling statements, hence
//! the `Send + Sync` bound.

pub mod overload;

use crate::error::ResolveResult;
use crate::types::class::TypeClass;

pub use overload::{OverloadResolution, ResolveContext, ResultStrategy, ScalarOverload};

/// Outcome of common-type unification between two type classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommonType {
    /// Exactly one class both inputs can be cast to without loss.
    Specific(TypeClass),
    /// Any class would do; there is no single best choice.
    Any,
    /// The classes cannot be unified.
    None,
}

/// Shared, read-only lookup of scalar overloads and type unification.
pub trait ScalarRegistry: Send + Sync {
    /// Pick the single overload of `name` applicable to the operand classes.
    /// Fails when no overload matches or more than one does. An operand with
    /// an undetermined type (e.g. a bare parameter) appears as `None`.
    fn resolve_overload(
        &self,
        name: &str,
        operand_classes: &[Option<TypeClass>],
    ) -> ResolveResult<OverloadResolution>;

    /// The least type class both inputs can be cast to without loss.
    fn common_type(&self, left: TypeClass, right: TypeClass) -> CommonType;
}
