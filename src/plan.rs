//! Bound logical plan representation consumed by the resolution pass.
//!
//! Parsing and binding produce this tree with source-level type descriptors
//! attached; the resolving visitor annotates every expression node in place.

pub mod expr;
pub mod node;

pub use expr::{BooleanOperator, ColumnRef, ComparisonOp, Expression, Literal};
pub use node::{JoinType, PlanNode, SortKey};
