// Author: Dustin Pilgrim
// License: MIT

use crate::{KonfigError, Value};

fn type_error(expected: &str, value: &Value, hint: &str, code: u32) -> KonfigError {
    KonfigError::TypeError {
        message: format!("Expected {}, got {:?}", expected, value),
        hint: Some(hint.into()),
        code: Some(code),
    }
}

impl TryFrom<Value> for String {
    type Error = KonfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(type_error("string", &value, "Quote the value to read it as text", 402)),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = KonfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(type_error("boolean", &value, "Use true or false", 403)),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = KonfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(n) => Ok(n),
            _ => Err(type_error("integer", &value, "Use a whole number", 404)),
        }
    }
}

macro_rules! impl_int_conversion {
    ($($t:ty),*) => {
        $(
            impl TryFrom<Value> for $t {
                type Error = KonfigError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    let n = i64::try_from(value)?;
                    <$t>::try_from(n).map_err(|_| KonfigError::TypeError {
                        message: format!("Number {} out of range for {}", n, stringify!($t)),
                        hint: Some(format!(
                            "Use a number between {} and {}",
                            <$t>::MIN,
                            <$t>::MAX
                        )),
                        code: Some(405),
                    })
                }
            }
        )*
    };
}

impl_int_conversion!(i32, u16, u32, u64, usize);

/// Lists convert element by element; a scalar becomes a one-element vector.
impl<T> TryFrom<Value> for Vec<T>
where
    T: TryFrom<Value, Error = KonfigError>,
{
    type Error = KonfigError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.into_list().into_iter().map(T::try_from).collect()
    }
}
