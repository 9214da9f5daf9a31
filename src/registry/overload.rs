//! Overload descriptors consumed by the resolving visitor.

use std::sync::Arc;

use crate::error::{ResolveError, ResolveResult};
use crate::types::class::TypeClass;
use crate::types::instance::TypeInstance;
use crate::types::value::{PreptimeValue, Value};

/// How an overload's result instance is computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultStrategy {
    /// A constant instance declared on the overload, independent of operands.
    Fixed(TypeInstance),
    /// The instance overload resolution already decided while picking the
    /// overload.
    Picking,
    /// Computed by the overload's own rule from the operand values.
    Custom,
}

/// Context threaded through an overload's resolution hooks.
#[derive(Debug, Clone)]
pub struct ResolveContext {
    operand_types: Vec<Option<TypeInstance>>,
    output_type: Option<TypeInstance>,
}

impl ResolveContext {
    pub fn new(operand_types: Vec<Option<TypeInstance>>) -> Self {
        Self {
            operand_types,
            output_type: None,
        }
    }

    pub fn operand_types(&self) -> &[Option<TypeInstance>] {
        &self.operand_types
    }

    /// The computed output type. Set by the visitor before
    /// [`ScalarOverload::finish_resolution`] runs.
    pub fn output_type(&self) -> Option<TypeInstance> {
        self.output_type
    }

    pub fn set_output_type(&mut self, instance: TypeInstance) {
        self.output_type = Some(instance);
    }
}

/// One candidate implementation of a named function or operator.
pub trait ScalarOverload: Send + Sync {
    /// The result-type computation strategy this overload declares.
    fn result_strategy(&self) -> ResultStrategy;

    /// Result rule for [`ResultStrategy::Custom`] overloads. Declaring
    /// `Custom` without overriding this is a registration defect.
    fn custom_result(
        &self,
        operands: &[PreptimeValue],
        ctx: &mut ResolveContext,
    ) -> ResolveResult<TypeInstance> {
        let _ = (operands, ctx);
        Err(ResolveError::Configuration(
            "custom result strategy declared without a result rule".to_string(),
        ))
    }

    /// Called once the output type is known. Overloads that validate or
    /// adjust internal state against their own output type hook in here.
    fn finish_resolution(&self, ctx: &mut ResolveContext) -> ResolveResult<()> {
        let _ = ctx;
        Ok(())
    }

    /// Evaluate the call over constant operands, if this overload supports
    /// it. `None` means the call cannot be evaluated at resolution time.
    fn evaluate_constant(
        &self,
        ctx: &ResolveContext,
        operands: &[PreptimeValue],
    ) -> ResolveResult<Option<Value>> {
        let _ = (ctx, operands);
        Ok(None)
    }
}

/// Outcome of overload resolution for one call site.
#[derive(Clone)]
pub struct OverloadResolution {
    /// The overload picked for the call.
    pub overload: Arc<dyn ScalarOverload>,
    /// Target type class per operand; the visitor casts mismatching
    /// operands. Never shorter than the call's operand list.
    pub operand_targets: Vec<TypeClass>,
    /// Result type decided during resolution, for picking overloads.
    pub picking_type: Option<TypeInstance>,
}
