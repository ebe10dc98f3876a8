//! Runtime values read from and written to mapped entity properties.
//!
//! A [`Value`] is what a property reader hands to the command builder and
//! what ends up bound as a command parameter. It also implements
//! [`ToSql`] so a rendered command can be executed by `tokio-postgres`.

use crate::error::{CommandError, CommandResult};
use bytes::BytesMut;
use chrono::{DateTime, NaiveDate, Utc};
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type};
use uuid::Uuid;

/// A single property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL NULL
    Null,
    Bool(bool),
    I16(i16),
    I32(i32),
    I64(i64),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
    String(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Date(NaiveDate),
    Json(serde_json::Value),
}

impl Value {
    /// Build a JSON value from any serializable type.
    pub fn json<T: serde::Serialize>(value: &T) -> CommandResult<Self> {
        serde_json::to_value(value)
            .map(Value::Json)
            .map_err(|e| CommandError::conversion("JSON-serializable value", e.to_string()))
    }

    /// Whether this is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether this value numerically equals zero.
    ///
    /// Only integer and decimal values can be zero. Floats, strings, UUIDs and
    /// everything else never are, so they are never treated as "unset" keys.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::I16(v) => *v == 0,
            Value::I32(v) => *v == 0,
            Value::I64(v) => *v == 0,
            Value::U32(v) => *v == 0,
            Value::U64(v) => *v == 0,
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(v) => v.is_zero(),
            _ => false,
        }
    }

    /// Short name of the variant, used in conversion errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(_) => "decimal",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::Uuid(_) => "uuid",
            Value::Timestamp(_) => "timestamp",
            Value::Date(_) => "date",
            Value::Json(_) => "json",
        }
    }

    /// Widen any integer variant to `i64`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I16(v) => Some(i64::from(*v)),
            Value::I32(v) => Some(i64::from(*v)),
            Value::I64(v) => Some(*v),
            Value::U32(v) => Some(i64::from(*v)),
            Value::U64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Borrow the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    String => String,
    Vec<u8> => Bytes,
    Uuid => Uuid,
    DateTime<Utc> => Timestamp,
    NaiveDate => Date,
    serde_json::Value => Json,
}

#[cfg(feature = "rust_decimal")]
impl From<rust_decimal::Decimal> for Value {
    fn from(v: rust_decimal::Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

macro_rules! impl_try_from_integer {
    ($($ty:ty),* $(,)?) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = CommandError;

                fn try_from(value: Value) -> CommandResult<Self> {
                    value
                        .as_i64()
                        .and_then(|v| <$ty>::try_from(v).ok())
                        .ok_or_else(|| {
                            CommandError::conversion(stringify!($ty), value.type_name())
                        })
                }
            }
        )*
    };
}

impl_try_from_integer!(i16, i32, i64, u32, u64);

impl TryFrom<Value> for String {
    type Error = CommandError;

    fn try_from(value: Value) -> CommandResult<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(CommandError::conversion("string", other.type_name())),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = CommandError;

    fn try_from(value: Value) -> CommandResult<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(CommandError::conversion("bool", other.type_name())),
        }
    }
}

impl TryFrom<Value> for Uuid {
    type Error = CommandError;

    fn try_from(value: Value) -> CommandResult<Self> {
        match value {
            Value::Uuid(u) => Ok(u),
            Value::String(s) => {
                Uuid::parse_str(&s).map_err(|_| CommandError::conversion("uuid", "string"))
            }
            other => Err(CommandError::conversion("uuid", other.type_name())),
        }
    }
}

impl ToSql for Value {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => v.to_sql_checked(ty, out),
            Value::I16(v) => encode_integer(i64::from(*v), ty, out),
            Value::I32(v) => encode_integer(i64::from(*v), ty, out),
            Value::I64(v) => encode_integer(*v, ty, out),
            Value::U32(v) => encode_integer(i64::from(*v), ty, out),
            Value::U64(v) => encode_integer(i64::try_from(*v)?, ty, out),
            Value::F32(v) if *ty == Type::FLOAT8 => f64::from(*v).to_sql_checked(ty, out),
            Value::F32(v) => v.to_sql_checked(ty, out),
            Value::F64(v) => v.to_sql_checked(ty, out),
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(v) => v.to_sql_checked(ty, out),
            Value::String(v) => v.to_sql_checked(ty, out),
            Value::Bytes(v) => v.to_sql_checked(ty, out),
            Value::Uuid(v) => v.to_sql_checked(ty, out),
            Value::Timestamp(v) => v.to_sql_checked(ty, out),
            Value::Date(v) => v.to_sql_checked(ty, out),
            Value::Json(v) => v.to_sql_checked(ty, out),
        }
    }

    // Every variant runs its own type check in `to_sql`, so a value bound to
    // a column of another type fails instead of being sent in the wrong format.
    fn accepts(_ty: &Type) -> bool {
        true
    }

    tokio_postgres::types::to_sql_checked!();
}

fn encode_integer(
    v: i64,
    ty: &Type,
    out: &mut BytesMut,
) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
    match *ty {
        Type::INT2 => i16::try_from(v)?.to_sql_checked(ty, out),
        Type::INT4 => i32::try_from(v)?.to_sql_checked(ty, out),
        _ => v.to_sql_checked(ty, out),
    }
}
