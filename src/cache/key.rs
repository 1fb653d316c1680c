//! Cache Key Module
//!
//! Derives cache keys from a logical prefix and a set of scalar query
//! parameters. Rendered parameters are sorted before joining, so two
//! logically identical queries always produce the same key.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{CacheError, Result};

/// Separator placed between rendered `name:value` parameter pairs.
pub const PARAM_SEPARATOR: &str = "|";

// == Param Value ==
/// A scalar query parameter with a stable string rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    String(String),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::UInt(n) => write!(f, "{n}"),
            ParamValue::Float(n) => write!(f, "{n}"),
            ParamValue::String(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::UInt(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<&ParamValue> for ParamValue {
    fn from(value: &ParamValue) -> Self {
        value.clone()
    }
}

impl TryFrom<&Value> for ParamValue {
    type Error = CacheError;

    /// Accepts JSON scalars only; null, arrays and objects have no stable
    /// rendering and are rejected.
    fn try_from(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(ParamValue::Bool(*b)),
            Value::String(s) => Ok(ParamValue::String(s.clone())),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(ParamValue::Int(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(ParamValue::UInt(u))
                } else {
                    n.as_f64()
                        .map(ParamValue::Float)
                        .ok_or_else(|| CacheError::UnsupportedParam(n.to_string()))
                }
            }
            other => Err(CacheError::UnsupportedParam(other.to_string())),
        }
    }
}

// == Generate Key ==
/// Builds `prefix:name1:value1|name2:value2...` with parameters sorted by name.
///
/// The result does not depend on the order in which `params` are yielded.
/// A name given more than once keeps every value, ordered by its rendering.
/// With no parameters the key is just `prefix:`.
///
/// # Example
/// ```
/// use query_cache::cache::generate_key;
///
/// let a = generate_key("tx", [("b", 2), ("a", 1)]);
/// let b = generate_key("tx", [("a", 1), ("b", 2)]);
/// assert_eq!(a, b);
/// assert_eq!(a, "tx:a:1|b:2");
/// ```
pub fn generate_key<I, K, P>(prefix: &str, params: I) -> String
where
    I: IntoIterator<Item = (K, P)>,
    K: AsRef<str>,
    P: Into<ParamValue>,
{
    let mut pairs: Vec<(String, String)> = params
        .into_iter()
        .map(|(name, value)| (name.as_ref().to_string(), value.into().to_string()))
        .collect();

    pairs.sort();

    let rendered: Vec<String> = pairs
        .iter()
        .map(|(name, value)| format!("{name}:{value}"))
        .collect();

    format!("{prefix}:{}", rendered.join(PARAM_SEPARATOR))
}
