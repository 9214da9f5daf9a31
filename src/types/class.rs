//! Runtime type families.

use crate::types::instance::{TypeAttributes, TypeInstance};

/// Character set of a string type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charset {
    Utf8,
    Latin1,
}

/// Family of runtime types, independent of parametrization.
///
/// A type class identifies how values are represented and compared; the
/// concrete width/precision/charset parameters live on [`TypeInstance`].
/// Overload selection looks only at classes, never at attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClass {
    Boolean,
    SmallInt,
    Int32,
    Int64,
    Float32,
    Double,
    Decimal,
    Varchar,
}

impl TypeClass {
    pub const DEFAULT_VARCHAR_WIDTH: u32 = 255;
    pub const DEFAULT_DECIMAL_PRECISION: u32 = 10;
    pub const DEFAULT_DECIMAL_SCALE: u32 = 0;

    /// Produce the instance of this family with default attributes.
    pub fn default_instance(&self) -> TypeInstance {
        match self {
            TypeClass::Boolean => TypeInstance::boolean(),
            TypeClass::SmallInt => TypeInstance::smallint(),
            TypeClass::Int32 => TypeInstance::int32(),
            TypeClass::Int64 => TypeInstance::int64(),
            TypeClass::Float32 => TypeInstance::float32(),
            TypeClass::Double => TypeInstance::double(),
            TypeClass::Decimal => TypeInstance::decimal(
                Self::DEFAULT_DECIMAL_PRECISION,
                Self::DEFAULT_DECIMAL_SCALE,
            ),
            TypeClass::Varchar => {
                TypeInstance::varchar(Self::DEFAULT_VARCHAR_WIDTH, Charset::Utf8)
            }
        }
    }

    /// Combine two instances of this family into the instance wide enough to
    /// hold a value of either. Both instances must already belong to this
    /// class; conditional-branch unification casts them first.
    pub fn combine(&self, a: &TypeInstance, b: &TypeInstance) -> TypeInstance {
        debug_assert_eq!(a.class(), *self);
        debug_assert_eq!(b.class(), *self);

        match (self, a.attrs(), b.attrs()) {
            (
                TypeClass::Varchar,
                TypeAttributes::String {
                    width: wa,
                    charset: ca,
                },
                TypeAttributes::String {
                    width: wb,
                    charset: cb,
                },
            ) => {
                let charset = if ca == cb { ca } else { Charset::Utf8 };
                TypeInstance::varchar(wa.max(wb), charset)
            }
            (
                TypeClass::Decimal,
                TypeAttributes::Decimal {
                    precision: pa,
                    scale: sa,
                },
                TypeAttributes::Decimal {
                    precision: pb,
                    scale: sb,
                },
            ) => {
                // Keep the larger scale and enough integral digits for both.
                let scale = sa.max(sb);
                let integral = (pa - sa).max(pb - sb);
                TypeInstance::decimal(integral + scale, scale)
            }
            _ => self.default_instance(),
        }
    }
}
