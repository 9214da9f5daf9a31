//! Source-level type descriptors attached by the parser/binder.

use crate::error::{ResolveError, ResolveResult};
use crate::types::class::Charset;
use crate::types::instance::TypeInstance;

/// Type descriptor as written in the source statement.
///
/// The binder attaches one of these to every typed literal; resolution maps
/// it to a runtime [`TypeInstance`]. Several source types are recognized by
/// the grammar but have no runtime counterpart yet and are rejected here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlType {
    Boolean,
    Char { width: u32, charset: Charset },
    Varchar { width: u32, charset: Charset },
    Decimal { precision: u32, scale: u32 },
    Numeric { precision: u32, scale: u32 },
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Double,

    // Recognized in source, no runtime representation yet.
    Real,
    Bit,
    Date,
    Time,
    Timestamp,
    Blob,
    Clob,
    Xml,
    Interval,
}

impl TypeInstance {
    /// Map a source-level descriptor to its runtime instance.
    pub fn from_sql_type(sql_type: &SqlType) -> ResolveResult<TypeInstance> {
        match sql_type {
            SqlType::Boolean => Ok(TypeInstance::boolean()),
            SqlType::Char { width, charset } | SqlType::Varchar { width, charset } => {
                Ok(TypeInstance::varchar(*width, *charset))
            }
            SqlType::Decimal { precision, scale } | SqlType::Numeric { precision, scale } => {
                Ok(TypeInstance::decimal(*precision, *scale))
            }
            SqlType::TinyInt | SqlType::SmallInt => Ok(TypeInstance::smallint()),
            SqlType::Int => Ok(TypeInstance::int32()),
            SqlType::BigInt => Ok(TypeInstance::int64()),
            SqlType::Double => Ok(TypeInstance::double()),
            other => Err(ResolveError::UnsupportedSourceType(other.clone())),
        }
    }
}
