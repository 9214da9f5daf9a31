//! Type and overload resolution over a bound logical plan.
//!
//! The resolving visitor walks the plan tree and, for every expression
//! reachable from it:
//! - determines a concrete runtime type (class + parametrization),
//! - resolves which overload applies to each call site,
//! - inserts casts where an operand does not match what the overload needs,
//! - computes each node's result type bottom-up,
//! - and hands the node to the constant folder before installing it back
//!   into its parent slot.
//!
//! Plan nodes are visited pre-order; expression nodes children-first, so a
//! parent handler can always read its operands' annotations.

pub mod folder;

use std::mem;

use log::debug;

use crate::error::{ResolveError, ResolveResult};
use crate::plan::expr::{Expression, Literal};
use crate::plan::node::PlanNode;
use crate::registry::{CommonType, ResolveContext, ResultStrategy, ScalarRegistry};
use crate::types::class::TypeClass;
use crate::types::instance::TypeInstance;
use crate::types::value::{PreptimeValue, Value};

pub use folder::{Folder, IdentityFolder};

/// Tree-rewrite engine assigning a [`PreptimeValue`] to every expression.
///
/// One visitor is created per query compilation and never reused; it holds
/// only a reference to the shared read-only registry and the per-call
/// folding hook.
pub struct ResolvingVisitor<'a> {
    registry: &'a dyn ScalarRegistry,
    folder: Box<dyn Folder + 'a>,
}

impl<'a> ResolvingVisitor<'a> {
    /// Create a visitor that does no constant folding.
    pub fn new(registry: &'a dyn ScalarRegistry) -> Self {
        Self {
            registry,
            folder: Box::new(IdentityFolder),
        }
    }

    /// Create a visitor with a folding hook.
    pub fn with_folder(registry: &'a dyn ScalarRegistry, folder: Box<dyn Folder + 'a>) -> Self {
        Self { registry, folder }
    }

    /// Resolve every expression reachable from `plan`, in place.
    ///
    /// On error the walk stops immediately; the partially annotated tree
    /// must be discarded by the caller.
    pub fn resolve(&mut self, plan: &mut PlanNode) -> ResolveResult<()> {
        match plan {
            PlanNode::TableScan { .. } => Ok(()),
            PlanNode::Filter { input, predicate } => {
                self.resolve_slot(predicate)?;
                self.resolve(input)
            }
            PlanNode::Project { input, expressions } => {
                for slot in expressions.iter_mut() {
                    self.resolve_slot(slot)?;
                }
                self.resolve(input)
            }
            PlanNode::Join {
                left,
                right,
                condition,
                ..
            } => {
                if let Some(slot) = condition {
                    self.resolve_slot(slot)?;
                }
                self.resolve(left)?;
                self.resolve(right)
            }
            PlanNode::Sort { input, keys } => {
                for key in keys.iter_mut() {
                    self.resolve_slot(&mut key.expr)?;
                }
                self.resolve(input)
            }
        }
    }

    /// Resolve one expression tree, returning the node to install in the
    /// parent slot (the original, a cast wrapper, a chosen conditional
    /// branch, or a folded constant).
    pub fn resolve_expression(&mut self, expr: Expression) -> ResolveResult<Expression> {
        let expr = self.resolve_operands(expr)?;
        let expr = self.annotate(expr)?;
        Ok(self.folder.fold(expr))
    }

    fn resolve_slot(&mut self, slot: &mut Expression) -> ResolveResult<()> {
        let expr = mem::take(slot);
        *slot = self.resolve_expression(expr)?;
        Ok(())
    }

    /// Children-first step: rebuild the node with every child resolved.
    fn resolve_operands(&mut self, expr: Expression) -> ResolveResult<Expression> {
        match expr {
            Expression::Function {
                name,
                operands,
                output,
            } => Ok(Expression::Function {
                name,
                operands: self.resolve_all(operands)?,
                output,
            }),
            Expression::Cast {
                operand,
                target,
                output,
            } => Ok(Expression::Cast {
                operand: self.resolve_boxed(operand)?,
                target,
                output,
            }),
            Expression::IfElse {
                condition,
                then_expr,
                else_expr,
                output,
            } => Ok(Expression::IfElse {
                condition: self.resolve_boxed(condition)?,
                then_expr: self.resolve_boxed(then_expr)?,
                else_expr: self.resolve_boxed(else_expr)?,
                output,
            }),
            Expression::Comparison {
                op,
                left,
                right,
                output,
            } => Ok(Expression::Comparison {
                op,
                left: self.resolve_boxed(left)?,
                right: self.resolve_boxed(right)?,
                output,
            }),
            Expression::BooleanOp {
                op,
                left,
                right,
                output,
            } => Ok(Expression::BooleanOp {
                op,
                left: self.resolve_boxed(left)?,
                right: self.resolve_boxed(right)?,
                output,
            }),
            Expression::InList {
                operand,
                list,
                output,
            } => Ok(Expression::InList {
                operand: self.resolve_boxed(operand)?,
                list: self.resolve_all(list)?,
                output,
            }),
            Expression::Exists {
                mut subquery,
                output,
            } => {
                self.resolve(&mut subquery)?;
                Ok(Expression::Exists { subquery, output })
            }
            Expression::Any {
                mut subquery,
                output,
            } => {
                self.resolve(&mut subquery)?;
                Ok(Expression::Any { subquery, output })
            }
            Expression::SubqueryValue {
                mut subquery,
                output,
            } => {
                self.resolve(&mut subquery)?;
                Ok(Expression::SubqueryValue { subquery, output })
            }
            Expression::SubqueryResultSet {
                mut subquery,
                output,
            } => {
                self.resolve(&mut subquery)?;
                Ok(Expression::SubqueryResultSet { subquery, output })
            }
            Expression::Aggregate {
                function,
                operand,
                distinct,
                output,
            } => {
                let operand = match operand {
                    Some(operand) => Some(self.resolve_boxed(operand)?),
                    None => None,
                };
                Ok(Expression::Aggregate {
                    function,
                    operand,
                    distinct,
                    output,
                })
            }
            leaf @ (Expression::BooleanLiteral { .. }
            | Expression::Column { .. }
            | Expression::Parameter { .. }
            | Expression::ParameterCondition { .. }
            | Expression::Constant { .. }) => Ok(leaf),
        }
    }

    fn resolve_boxed(&mut self, expr: Box<Expression>) -> ResolveResult<Box<Expression>> {
        Ok(Box::new(self.resolve_expression(*expr)?))
    }

    fn resolve_all(&mut self, exprs: Vec<Expression>) -> ResolveResult<Vec<Expression>> {
        exprs
            .into_iter()
            .map(|expr| self.resolve_expression(expr))
            .collect()
    }

    /// Per-variant handler, run after all children carry annotations.
    fn annotate(&mut self, expr: Expression) -> ResolveResult<Expression> {
        match expr {
            Expression::Function { name, operands, .. } => {
                self.resolve_function(name, operands)
            }
            // An explicit cast already knows its target type; it only needs
            // its own annotation.
            Expression::Cast {
                operand,
                target,
                output,
            } => Ok(Expression::Cast {
                operand,
                target,
                output: output.or(Some(PreptimeValue::typed(target))),
            }),
            Expression::IfElse {
                condition,
                then_expr,
                else_expr,
                ..
            } => self.resolve_if_else(condition, then_expr, else_expr),
            Expression::Aggregate { function, .. } => {
                Err(ResolveError::UnsupportedAggregate { name: function })
            }
            Expression::SubqueryValue { .. } => Err(ResolveError::UnsupportedSubqueryValue),
            expr @ (Expression::Comparison { .. }
            | Expression::BooleanOp { .. }
            | Expression::InList { .. }
            | Expression::Exists { .. }
            | Expression::Any { .. }
            | Expression::SubqueryResultSet { .. }
            | Expression::ParameterCondition { .. }) => Ok(bool_expr(expr)),
            Expression::BooleanLiteral { value, .. } => {
                let constant = match value {
                    Some(b) => Value::Boolean(b),
                    None => Value::Null,
                };
                Ok(Expression::BooleanLiteral {
                    value,
                    output: Some(PreptimeValue::constant(TypeInstance::boolean(), constant)),
                })
            }
            Expression::Column { column, .. } => {
                let output = Some(PreptimeValue::typed(column.instance));
                Ok(Expression::Column { column, output })
            }
            // Parameter types come from caller-supplied metadata elsewhere.
            expr @ Expression::Parameter { .. } => Ok(expr),
            Expression::Constant {
                literal,
                source_type,
                output,
            } => Self::resolve_constant(literal, source_type, output),
        }
    }

    fn resolve_function(
        &mut self,
        name: String,
        operands: Vec<Expression>,
    ) -> ResolveResult<Expression> {
        let operand_classes: Vec<Option<TypeClass>> =
            operands.iter().map(Expression::type_class).collect();
        let resolution = self.registry.resolve_overload(&name, &operand_classes)?;
        if resolution.operand_targets.len() < operands.len() {
            return Err(ResolveError::Configuration(format!(
                "overload resolution for {} produced {} operand targets for {} operands",
                name,
                resolution.operand_targets.len(),
                operands.len()
            )));
        }

        let operands: Vec<Expression> = operands
            .into_iter()
            .zip(resolution.operand_targets.iter())
            .map(|(operand, target)| cast_to(operand, *target))
            .collect();

        let operand_values: Vec<PreptimeValue> = operands
            .iter()
            .map(|operand| {
                operand
                    .preptime_value()
                    .cloned()
                    .unwrap_or_else(PreptimeValue::unknown)
            })
            .collect();
        let operand_types: Vec<Option<TypeInstance>> = operand_values
            .iter()
            .map(|value| value.instance())
            .collect();

        let mut ctx = ResolveContext::new(operand_types);
        let result_instance = match resolution.overload.result_strategy() {
            ResultStrategy::Fixed(instance) => instance,
            ResultStrategy::Picking => resolution.picking_type.ok_or_else(|| {
                ResolveError::Configuration(format!(
                    "overload of {} declares a picking result but resolution picked no type",
                    name
                ))
            })?,
            ResultStrategy::Custom => resolution
                .overload
                .custom_result(&operand_values, &mut ctx)?,
        };
        // The overload may need its own output type to finish resolution.
        ctx.set_output_type(result_instance);
        resolution.overload.finish_resolution(&mut ctx)?;

        if let Some(value) = resolution.overload.evaluate_constant(&ctx, &operand_values)? {
            if !matches!(value, Value::Null) {
                debug!("call to {} evaluated to a constant at resolution time", name);
                return Ok(Expression::Constant {
                    literal: Literal::from_value(&value),
                    source_type: None,
                    output: Some(PreptimeValue::constant(result_instance, value)),
                });
            }
        }

        debug!("resolved call to {} as {:?}", name, result_instance);
        Ok(Expression::Function {
            name,
            operands,
            output: Some(PreptimeValue::typed(result_instance)),
        })
    }

    fn resolve_if_else(
        &mut self,
        condition: Box<Expression>,
        then_expr: Box<Expression>,
        else_expr: Box<Expression>,
    ) -> ResolveResult<Expression> {
        // A constant test picks its branch right here; the branch replaces
        // the whole conditional.
        if let Some(Value::Boolean(met)) = condition.constant_value() {
            let met = *met;
            debug!(
                "conditional test is constant, keeping the {} branch",
                if met { "then" } else { "else" }
            );
            return Ok(if met { *then_expr } else { *else_expr });
        }

        let then_class = then_expr.type_class().ok_or(ResolveError::UntypedBranch)?;
        let else_class = else_expr.type_class().ok_or(ResolveError::UntypedBranch)?;
        let common = match self.registry.common_type(then_class, else_class) {
            CommonType::Specific(class) => class,
            CommonType::Any | CommonType::None => {
                return Err(ResolveError::NoCommonType {
                    left: then_class,
                    right: else_class,
                });
            }
        };

        let then_expr = cast_to(*then_expr, common);
        let else_expr = cast_to(*else_expr, common);
        let result_instance = match (then_expr.instance(), else_expr.instance()) {
            (Some(a), Some(b)) => common.combine(&a, &b),
            _ => common.default_instance(),
        };

        Ok(Expression::IfElse {
            condition,
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
            output: Some(PreptimeValue::typed(result_instance)),
        })
    }

    fn resolve_constant(
        literal: Literal,
        source_type: Option<crate::types::source::SqlType>,
        output: Option<PreptimeValue>,
    ) -> ResolveResult<Expression> {
        // Constants the pass materialized itself arrive already annotated.
        if output.is_some() {
            return Ok(Expression::Constant {
                literal,
                source_type,
                output,
            });
        }

        let instance = match &source_type {
            Some(sql_type) => TypeInstance::from_sql_type(sql_type)?,
            None => literal.natural_instance()?,
        };
        let value = literal.to_value()?;
        Ok(Expression::Constant {
            literal,
            source_type,
            output: Some(PreptimeValue::constant(instance, value)),
        })
    }
}

/// Annotate a condition-bearing node: its type is always boolean, whatever
/// its operands are.
fn bool_expr(mut expr: Expression) -> Expression {
    expr.set_preptime_value(PreptimeValue::typed(TypeInstance::boolean()));
    expr
}

/// Wrap `expr` in a cast to `target`'s default instance, unless its type
/// class already matches; identity casts are never inserted.
pub fn cast_to(expr: Expression, target: TypeClass) -> Expression {
    if expr.type_class() == Some(target) {
        return expr;
    }
    debug!("inserting cast to {:?}", target);
    let instance = target.default_instance();
    Expression::Cast {
        operand: Box::new(expr),
        target: instance,
        output: Some(PreptimeValue::typed(instance)),
    }
}
