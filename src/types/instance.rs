//! Concrete type instances.

use crate::types::class::{Charset, TypeClass};

/// Family-specific parameters of a type instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeAttributes {
    None,
    String { width: u32, charset: Charset },
    Decimal { precision: u32, scale: u32 },
}

/// A concrete runtime type: a type class plus its parameters.
///
/// Instances are immutable and only built through the factory methods below,
/// so the class and its attributes always agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInstance {
    class: TypeClass,
    attrs: TypeAttributes,
}

impl TypeInstance {
    pub fn boolean() -> Self {
        Self {
            class: TypeClass::Boolean,
            attrs: TypeAttributes::None,
        }
    }

    pub fn smallint() -> Self {
        Self {
            class: TypeClass::SmallInt,
            attrs: TypeAttributes::None,
        }
    }

    pub fn int32() -> Self {
        Self {
            class: TypeClass::Int32,
            attrs: TypeAttributes::None,
        }
    }

    pub fn int64() -> Self {
        Self {
            class: TypeClass::Int64,
            attrs: TypeAttributes::None,
        }
    }

    pub fn float32() -> Self {
        Self {
            class: TypeClass::Float32,
            attrs: TypeAttributes::None,
        }
    }

    pub fn double() -> Self {
        Self {
            class: TypeClass::Double,
            attrs: TypeAttributes::None,
        }
    }

    pub fn varchar(width: u32, charset: Charset) -> Self {
        Self {
            class: TypeClass::Varchar,
            attrs: TypeAttributes::String { width, charset },
        }
    }

    pub fn decimal(precision: u32, scale: u32) -> Self {
        Self {
            class: TypeClass::Decimal,
            attrs: TypeAttributes::Decimal { precision, scale },
        }
    }

    /// The family this instance belongs to.
    pub fn class(&self) -> TypeClass {
        self.class
    }

    /// The family-specific parameters.
    pub fn attrs(&self) -> TypeAttributes {
        self.attrs
    }
}
