//! Expression node definitions for the bound logical plan.

use crate::error::{ResolveError, ResolveResult};
use crate::plan::node::PlanNode;
use crate::types::class::TypeClass;
use crate::types::instance::TypeInstance;
use crate::types::source::SqlType;
use crate::types::value::{PreptimeValue, Value};

/// Column reference in an expression.
///
/// Binding has already looked the column up in the schema, so the reference
/// carries the column's resolved type instance with it.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    /// Optional table (or alias) qualifier.
    pub table: Option<String>,
    /// Column name for debugging/display.
    pub name: String,
    /// Type instance recorded on the schema for this column.
    pub instance: TypeInstance,
}

impl ColumnRef {
    pub fn new(name: impl Into<String>, instance: TypeInstance) -> Self {
        Self {
            table: None,
            name: name.into(),
            instance,
        }
    }

    pub fn with_table(
        table: impl Into<String>,
        name: impl Into<String>,
        instance: TypeInstance,
    ) -> Self {
        Self {
            table: Some(table.into()),
            name: name.into(),
            instance,
        }
    }
}

/// Source-level literal as produced by the parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f32),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
}

impl Literal {
    /// Materialize the runtime value for this literal. Fails for literal
    /// kinds with no runtime representation.
    pub fn to_value(&self) -> ResolveResult<Value> {
        match self {
            Literal::Null => Ok(Value::Null),
            Literal::Boolean(b) => Ok(Value::Boolean(*b)),
            Literal::Integer(i) => Ok(Value::Int64(*i)),
            Literal::Float(f) => Ok(Value::Float(*f)),
            Literal::Double(d) => Ok(Value::Double(*d)),
            Literal::String(s) => Ok(Value::String(s.clone())),
            Literal::Bytes(_) => Err(ResolveError::UnrepresentableLiteral(self.clone())),
        }
    }

    /// Literal form of a runtime value, used when resolution materializes a
    /// constant node of its own.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => Literal::Null,
            Value::Boolean(b) => Literal::Boolean(*b),
            Value::Int64(i) => Literal::Integer(*i),
            Value::Float(f) => Literal::Float(*f),
            Value::Double(d) => Literal::Double(*d),
            Value::String(s) => Literal::String(s.clone()),
        }
    }

    /// Type instance a literal takes when it carries no source descriptor.
    /// A bare NULL (or a bytes literal) has no natural type.
    pub fn natural_instance(&self) -> ResolveResult<TypeInstance> {
        match self {
            Literal::Boolean(_) => Ok(TypeInstance::boolean()),
            Literal::Integer(_) => Ok(TypeInstance::int64()),
            Literal::Float(_) => Ok(TypeInstance::float32()),
            Literal::Double(_) => Ok(TypeInstance::double()),
            Literal::String(_) => Ok(TypeClass::Varchar.default_instance()),
            Literal::Null | Literal::Bytes(_) => {
                Err(ResolveError::UnrepresentableLiteral(self.clone()))
            }
        }
    }
}

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Ne => "<>",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
        }
    }
}

/// Boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BooleanOperator {
    And,
    Or,
}

impl BooleanOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            BooleanOperator::And => "AND",
            BooleanOperator::Or => "OR",
        }
    }
}

/// Expression tree node.
///
/// Every variant owns its children and carries an `output` slot that the
/// resolution pass fills in. The pass is the sole writer of `output` and the
/// sole inserter of `Cast` nodes; parents own their children exclusively, so
/// replacing a child is a plain ownership transfer.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Named function or operator call.
    Function {
        name: String,
        operands: Vec<Expression>,
        output: Option<PreptimeValue>,
    },

    /// Explicit or resolver-inserted cast.
    Cast {
        operand: Box<Expression>,
        target: TypeInstance,
        output: Option<PreptimeValue>,
    },

    /// Two-armed conditional.
    IfElse {
        condition: Box<Expression>,
        then_expr: Box<Expression>,
        else_expr: Box<Expression>,
        output: Option<PreptimeValue>,
    },

    /// Comparison condition.
    Comparison {
        op: ComparisonOp,
        left: Box<Expression>,
        right: Box<Expression>,
        output: Option<PreptimeValue>,
    },

    /// Boolean connective over two conditions.
    BooleanOp {
        op: BooleanOperator,
        left: Box<Expression>,
        right: Box<Expression>,
        output: Option<PreptimeValue>,
    },

    /// TRUE, FALSE, or UNKNOWN.
    BooleanLiteral {
        value: Option<bool>,
        output: Option<PreptimeValue>,
    },

    /// Membership test against an explicit list.
    InList {
        operand: Box<Expression>,
        list: Vec<Expression>,
        output: Option<PreptimeValue>,
    },

    /// EXISTS over a subquery.
    Exists {
        subquery: Box<PlanNode>,
        output: Option<PreptimeValue>,
    },

    /// Existential comparison test (= ANY, > SOME, ...) over a subquery.
    Any {
        subquery: Box<PlanNode>,
        output: Option<PreptimeValue>,
    },

    /// Scalar value produced by a subquery.
    SubqueryValue {
        subquery: Box<PlanNode>,
        output: Option<PreptimeValue>,
    },

    /// Subquery used for its result set.
    SubqueryResultSet {
        subquery: Box<PlanNode>,
        output: Option<PreptimeValue>,
    },

    /// Aggregate function call.
    Aggregate {
        function: String,
        operand: Option<Box<Expression>>,
        distinct: bool,
        output: Option<PreptimeValue>,
    },

    /// Bound column reference.
    Column {
        column: ColumnRef,
        output: Option<PreptimeValue>,
    },

    /// Bound statement placeholder.
    Parameter {
        index: u32,
        output: Option<PreptimeValue>,
    },

    /// Placeholder used directly as a condition.
    ParameterCondition {
        index: u32,
        output: Option<PreptimeValue>,
    },

    /// Typed literal constant.
    Constant {
        literal: Literal,
        /// Descriptor from the source statement; constants materialized by
        /// the pass itself have none.
        source_type: Option<SqlType>,
        output: Option<PreptimeValue>,
    },
}

impl Expression {
    /// Create a function call expression.
    pub fn function(name: impl Into<String>, operands: Vec<Expression>) -> Self {
        Expression::Function {
            name: name.into(),
            operands,
            output: None,
        }
    }

    /// Create an explicit cast expression.
    pub fn cast(operand: Expression, target: TypeInstance) -> Self {
        Expression::Cast {
            operand: Box::new(operand),
            target,
            output: None,
        }
    }

    /// Create a conditional expression.
    pub fn if_else(condition: Expression, then_expr: Expression, else_expr: Expression) -> Self {
        Expression::IfElse {
            condition: Box::new(condition),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
            output: None,
        }
    }

    /// Create a comparison condition.
    pub fn comparison(op: ComparisonOp, left: Expression, right: Expression) -> Self {
        Expression::Comparison {
            op,
            left: Box::new(left),
            right: Box::new(right),
            output: None,
        }
    }

    /// Create an equality comparison.
    pub fn eq(left: Expression, right: Expression) -> Self {
        Self::comparison(ComparisonOp::Eq, left, right)
    }

    /// Create a greater-than comparison.
    pub fn gt(left: Expression, right: Expression) -> Self {
        Self::comparison(ComparisonOp::Gt, left, right)
    }

    /// Create an AND condition.
    pub fn and(left: Expression, right: Expression) -> Self {
        Expression::BooleanOp {
            op: BooleanOperator::And,
            left: Box::new(left),
            right: Box::new(right),
            output: None,
        }
    }

    /// Create an OR condition.
    pub fn or(left: Expression, right: Expression) -> Self {
        Expression::BooleanOp {
            op: BooleanOperator::Or,
            left: Box::new(left),
            right: Box::new(right),
            output: None,
        }
    }

    /// Create a boolean literal.
    pub fn boolean(value: bool) -> Self {
        Expression::BooleanLiteral {
            value: Some(value),
            output: None,
        }
    }

    /// Create an IN-list condition.
    pub fn in_list(operand: Expression, list: Vec<Expression>) -> Self {
        Expression::InList {
            operand: Box::new(operand),
            list,
            output: None,
        }
    }

    /// Create an EXISTS condition.
    pub fn exists(subquery: PlanNode) -> Self {
        Expression::Exists {
            subquery: Box::new(subquery),
            output: None,
        }
    }

    /// Create an existential comparison condition.
    pub fn any(subquery: PlanNode) -> Self {
        Expression::Any {
            subquery: Box::new(subquery),
            output: None,
        }
    }

    /// Create a scalar subquery expression.
    pub fn subquery_value(subquery: PlanNode) -> Self {
        Expression::SubqueryValue {
            subquery: Box::new(subquery),
            output: None,
        }
    }

    /// Create a result-set subquery expression.
    pub fn subquery_result_set(subquery: PlanNode) -> Self {
        Expression::SubqueryResultSet {
            subquery: Box::new(subquery),
            output: None,
        }
    }

    /// Create an aggregate call expression.
    pub fn aggregate(
        function: impl Into<String>,
        operand: Option<Expression>,
        distinct: bool,
    ) -> Self {
        Expression::Aggregate {
            function: function.into(),
            operand: operand.map(Box::new),
            distinct,
            output: None,
        }
    }

    /// Create a column reference expression.
    pub fn column(column: ColumnRef) -> Self {
        Expression::Column {
            column,
            output: None,
        }
    }

    /// Create a parameter placeholder expression.
    pub fn parameter(index: u32) -> Self {
        Expression::Parameter {
            index,
            output: None,
        }
    }

    /// Create a parameter used as a condition.
    pub fn parameter_condition(index: u32) -> Self {
        Expression::ParameterCondition {
            index,
            output: None,
        }
    }

    /// Create a typed constant expression.
    pub fn constant(literal: Literal, source_type: SqlType) -> Self {
        Expression::Constant {
            literal,
            source_type: Some(source_type),
            output: None,
        }
    }

    /// The resolution annotation, if this node has been resolved.
    pub fn preptime_value(&self) -> Option<&PreptimeValue> {
        match self {
            Expression::Function { output, .. }
            | Expression::Cast { output, .. }
            | Expression::IfElse { output, .. }
            | Expression::Comparison { output, .. }
            | Expression::BooleanOp { output, .. }
            | Expression::BooleanLiteral { output, .. }
            | Expression::InList { output, .. }
            | Expression::Exists { output, .. }
            | Expression::Any { output, .. }
            | Expression::SubqueryValue { output, .. }
            | Expression::SubqueryResultSet { output, .. }
            | Expression::Aggregate { output, .. }
            | Expression::Column { output, .. }
            | Expression::Parameter { output, .. }
            | Expression::ParameterCondition { output, .. }
            | Expression::Constant { output, .. } => output.as_ref(),
        }
    }

    /// Attach a resolution annotation.
    pub(crate) fn set_preptime_value(&mut self, value: PreptimeValue) {
        match self {
            Expression::Function { output, .. }
            | Expression::Cast { output, .. }
            | Expression::IfElse { output, .. }
            | Expression::Comparison { output, .. }
            | Expression::BooleanOp { output, .. }
            | Expression::BooleanLiteral { output, .. }
            | Expression::InList { output, .. }
            | Expression::Exists { output, .. }
            | Expression::Any { output, .. }
            | Expression::SubqueryValue { output, .. }
            | Expression::SubqueryResultSet { output, .. }
            | Expression::Aggregate { output, .. }
            | Expression::Column { output, .. }
            | Expression::Parameter { output, .. }
            | Expression::ParameterCondition { output, .. }
            | Expression::Constant { output, .. } => *output = Some(value),
        }
    }

    /// The resolved type instance of this node, if known.
    pub fn instance(&self) -> Option<TypeInstance> {
        self.preptime_value().and_then(|pv| pv.instance())
    }

    /// The resolved type class of this node, if known.
    pub fn type_class(&self) -> Option<TypeClass> {
        self.instance().map(|instance| instance.class())
    }

    /// The resolution-time constant value of this node, if known.
    pub fn constant_value(&self) -> Option<&Value> {
        self.preptime_value().and_then(|pv| pv.value())
    }
}

impl Default for Expression {
    /// A fresh UNKNOWN literal; used to briefly vacate a slot while its
    /// owned expression is rewritten in place.
    fn default() -> Self {
        Expression::BooleanLiteral {
            value: None,
            output: None,
        }
    }
}
