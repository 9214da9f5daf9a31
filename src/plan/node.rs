//! Control-flow plan nodes.
//!
//! The resolution pass treats these as opaque containers: it walks them to
//! reach the expression trees they hold, but never changes their shape.

use crate::plan::expr::Expression;

/// Join types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

/// Sort key: an expression plus its direction.
#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub expr: Expression,
    pub ascending: bool,
}

/// Bound logical plan node.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanNode {
    /// Scan a table.
    TableScan { table: String },

    /// Filter rows by a predicate.
    Filter {
        input: Box<PlanNode>,
        predicate: Expression,
    },

    /// Project expressions over the input rows.
    Project {
        input: Box<PlanNode>,
        expressions: Vec<Expression>,
    },

    /// Join two relations.
    Join {
        left: Box<PlanNode>,
        right: Box<PlanNode>,
        join_type: JoinType,
        condition: Option<Expression>,
    },

    /// Sort rows by the given keys.
    Sort {
        input: Box<PlanNode>,
        keys: Vec<SortKey>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::expr::ColumnRef;
    use crate::types::instance::TypeInstance;

    #[test]
    fn test_plan_construction() {
        // SELECT name FROM users WHERE age > 18
        let plan = PlanNode::Project {
            input: Box::new(PlanNode::Filter {
                input: Box::new(PlanNode::TableScan {
                    table: "users".to_string(),
                }),
                predicate: Expression::gt(
                    Expression::column(ColumnRef::new("age", TypeInstance::int32())),
                    Expression::constant(
                        crate::plan::expr::Literal::Integer(18),
                        crate::types::source::SqlType::Int,
                    ),
                ),
            }),
            expressions: vec![Expression::column(ColumnRef::new(
                "name",
                crate::types::class::TypeClass::Varchar.default_instance(),
            ))],
        };

        match plan {
            PlanNode::Project { input, .. } => {
                assert!(matches!(*input, PlanNode::Filter { .. }));
            }
            _ => panic!("expected Project node"),
        }
    }

    #[test]
    fn test_join_node() {
        let join = PlanNode::Join {
            left: Box::new(PlanNode::TableScan {
                table: "users".to_string(),
            }),
            right: Box::new(PlanNode::TableScan {
                table: "orders".to_string(),
            }),
            join_type: JoinType::Inner,
            condition: Some(Expression::eq(
                Expression::column(ColumnRef::with_table("u", "id", TypeInstance::int64())),
                Expression::column(ColumnRef::with_table("o", "user_id", TypeInstance::int64())),
            )),
        };

        assert!(matches!(
            join,
            PlanNode::Join {
                join_type: JoinType::Inner,
                ..
            }
        ));
    }
}
