//! Dynamic option values and the coercion rules that produce them.

use crate::error::{Error, Result};
use crate::registry::{ElementType, TypeSpec};

/// A coerced option value.
///
/// Scalars come out of auto-detection or an explicit type declaration,
/// lists out of accumulation, and `Json` out of the structured type spec.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Boolean, from a switch or a "true"/"false" literal.
    Bool(bool),

    /// Integer.
    Int(i64),

    /// Floating point.
    Float(f64),

    /// Plain string, the fall-through of every coercion.
    Str(String),

    /// Accumulated list values, in encounter order.
    List(Vec<Value>),

    /// Decoded structured literal.
    Json(serde_json::Value),
}

impl Value {
    /// Return the boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(inner) => Some(*inner),
            _ => None,
        }
    }

    /// Return the integer payload, if this is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(inner) => Some(*inner),
            _ => None,
        }
    }

    /// Return the float payload, if this is a float.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(inner) => Some(*inner),
            _ => None,
        }
    }

    /// Return the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(inner) => Some(inner),
            _ => None,
        }
    }

    /// Return the list items, if this is a list.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Return the decoded structured payload, if this is one.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Value::Json(inner) => Some(inner),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(inner: bool) -> Self {
        Value::Bool(inner)
    }
}

impl From<i64> for Value {
    fn from(inner: i64) -> Self {
        Value::Int(inner)
    }
}

impl From<f64> for Value {
    fn from(inner: f64) -> Self {
        Value::Float(inner)
    }
}

impl From<&str> for Value {
    fn from(inner: &str) -> Self {
        Value::Str(inner.to_owned())
    }
}

impl From<String> for Value {
    fn from(inner: String) -> Self {
        Value::Str(inner)
    }
}

/// Detect the type of an undeclared value: boolean literals first, then
/// integers, then floats, then the unchanged string. `"5"` always comes
/// out as an integer. With auto-parse off the string passes through.
pub(crate) fn auto(raw: &str, auto_parse: bool) -> Value {
    if !auto_parse {
        return Value::Str(raw.to_owned());
    }

    if raw.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }

    if raw.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if let Ok(number) = raw.parse::<i64>() {
        return Value::Int(number);
    }

    if let Ok(number) = raw.parse::<f64>() {
        return Value::Float(number);
    }

    Value::Str(raw.to_owned())
}

/// Coerce a raw value under a declared type spec. List specs wrap the
/// element into a one-element list; the scan extends it per item.
pub(crate) fn coerce(name: &str, raw: &str, spec: TypeSpec, auto_parse: bool) -> Result<Value> {
    match spec {
        TypeSpec::Bool => Ok(Value::Bool(raw.eq_ignore_ascii_case("true"))),
        TypeSpec::Int => parse_int(name, raw),
        TypeSpec::Float => parse_float(name, raw),
        TypeSpec::Str => Ok(Value::Str(raw.to_owned())),
        TypeSpec::Json => decode_json(name, raw),
        TypeSpec::List => Ok(Value::List(vec![auto(raw, auto_parse)])),
        TypeSpec::TypedList(element) => Ok(Value::List(vec![coerce_element(name, raw, element)?])),
        TypeSpec::Custom(convert) => convert(raw).map_err(|_| Error::Coercion {
            name: name.to_owned(),
            value: raw.to_owned(),
            ty: "custom".to_owned(),
        }),
    }
}

fn coerce_element(name: &str, raw: &str, element: ElementType) -> Result<Value> {
    match element {
        ElementType::Bool => Ok(Value::Bool(raw.eq_ignore_ascii_case("true"))),
        ElementType::Int => parse_int(name, raw),
        ElementType::Float => parse_float(name, raw),
        ElementType::Str => Ok(Value::Str(raw.to_owned())),
        ElementType::Json => decode_json(name, raw),
        ElementType::Custom(convert) => convert(raw).map_err(|_| Error::Coercion {
            name: name.to_owned(),
            value: raw.to_owned(),
            ty: "custom".to_owned(),
        }),
    }
}

fn parse_int(name: &str, raw: &str) -> Result<Value> {
    raw.parse::<i64>().map(Value::Int).map_err(|_| Error::Coercion {
        name: name.to_owned(),
        value: raw.to_owned(),
        ty: "int".to_owned(),
    })
}

fn parse_float(name: &str, raw: &str) -> Result<Value> {
    raw.parse::<f64>().map(Value::Float).map_err(|_| Error::Coercion {
        name: name.to_owned(),
        value: raw.to_owned(),
        ty: "float".to_owned(),
    })
}

fn decode_json(name: &str, raw: &str) -> Result<Value> {
    serde_json::from_str(raw).map(Value::Json).map_err(|err| Error::Decode {
        name: name.to_owned(),
        value: raw.to_owned(),
        message: err.to_string(),
    })
}
