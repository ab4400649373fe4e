//! Value types exchanged with the host object model

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Opaque reference to a live host object (e.g. the subject of a terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display(fmt = "#{}", _0)]
pub struct HostHandle(pub u64);

/// Declared type of a host member or method parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Bool,
    Int,
    Str,
    List,
    Handle,
    Unit,
}

/// A value read from or passed to the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Value>),
    Handle(HostHandle),
}

impl Value {
    /// Runtime type of this value. `Null` has none.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(ValueType::Bool),
            Value::Int(_) => Some(ValueType::Int),
            Value::Str(_) => Some(ValueType::Str),
            Value::List(_) => Some(ValueType::List),
            Value::Handle(_) => Some(ValueType::Handle),
        }
    }

    /// Whether this value may be stored in a slot declared as `ty`.
    /// `Null` fits any reference-like slot.
    pub fn fits(&self, ty: ValueType) -> bool {
        match self.value_type() {
            Some(actual) => actual == ty,
            None => matches!(ty, ValueType::Str | ValueType::List | ValueType::Handle | ValueType::Unit),
        }
    }

    /// Default value for a freshly declared slot of type `ty`
    pub fn zero(ty: ValueType) -> Self {
        match ty {
            ValueType::Bool => Value::Bool(false),
            ValueType::Int => Value::Int(0),
            ValueType::Str | ValueType::Handle | ValueType::Unit => Value::Null,
            ValueType::List => Value::List(Vec::new()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<HostHandle> for Value {
    fn from(v: HostHandle) -> Self {
        Value::Handle(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::List(v.into_iter().map(Value::Str).collect())
    }
}

/// Checked conversion out of a host [`Value`]
///
/// `Err` carries the runtime type that was actually found so callers can
/// report a type mismatch.
pub trait FromValue: Sized {
    const EXPECTED: ValueType;

    fn from_value(value: Value) -> Result<Self, Option<ValueType>>;
}

impl FromValue for bool {
    const EXPECTED: ValueType = ValueType::Bool;

    fn from_value(value: Value) -> Result<Self, Option<ValueType>> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other.value_type()),
        }
    }
}

impl FromValue for i64 {
    const EXPECTED: ValueType = ValueType::Int;

    fn from_value(value: Value) -> Result<Self, Option<ValueType>> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(other.value_type()),
        }
    }
}

impl FromValue for String {
    const EXPECTED: ValueType = ValueType::Str;

    fn from_value(value: Value) -> Result<Self, Option<ValueType>> {
        match value {
            Value::Str(s) => Ok(s),
            other => Err(other.value_type()),
        }
    }
}

impl FromValue for Option<HostHandle> {
    const EXPECTED: ValueType = ValueType::Handle;

    fn from_value(value: Value) -> Result<Self, Option<ValueType>> {
        match value {
            Value::Handle(h) => Ok(Some(h)),
            Value::Null => Ok(None),
            other => Err(other.value_type()),
        }
    }
}

/// A null list reads as absent; a list with a non-string element is a mismatch.
impl FromValue for Option<Vec<String>> {
    const EXPECTED: ValueType = ValueType::List;

    fn from_value(value: Value) -> Result<Self, Option<ValueType>> {
        match value {
            Value::Null => Ok(None),
            Value::List(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::Str(s) => Ok(s),
                    other => Err(other.value_type()),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            other => Err(other.value_type()),
        }
    }
}

impl FromValue for () {
    const EXPECTED: ValueType = ValueType::Unit;

    fn from_value(_value: Value) -> Result<Self, Option<ValueType>> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_fits_reference_slots_only() {
        assert!(Value::Null.fits(ValueType::Handle));
        assert!(Value::Null.fits(ValueType::Str));
        assert!(!Value::Null.fits(ValueType::Int));
        assert!(!Value::Null.fits(ValueType::Bool));
    }

    #[test]
    fn test_checked_casts() {
        assert_eq!(bool::from_value(Value::Bool(true)), Ok(true));
        assert_eq!(i64::from_value(Value::Bool(true)), Err(Some(ValueType::Bool)));
        assert_eq!(<Option<HostHandle>>::from_value(Value::Null), Ok(None));
    }

    #[test]
    fn test_string_list_rejects_mixed_elements() {
        let mixed = Value::List(vec![Value::from("A"), Value::Int(2)]);
        assert_eq!(
            <Option<Vec<String>>>::from_value(mixed),
            Err(Some(ValueType::Int))
        );
        let strings = Value::from(vec!["A".to_string(), "B".to_string()]);
        assert_eq!(
            <Option<Vec<String>>>::from_value(strings),
            Ok(Some(vec!["A".to_string(), "B".to_string()]))
        );
    }
}
