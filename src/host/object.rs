//! Live host objects
//!
//! [`HostObject`] is the seam to the external object graph: the adapter only
//! ever reads, writes and invokes members by name through it.
//! [`DynamicObject`] is a table-driven implementation used to stand in for
//! the host in tests and in the demo binary.

use std::sync::Arc;

use ahash::{AHashMap, AHashSet};
use thiserror::Error;

use crate::core::types::{Value, ValueType};
use crate::host::shape::{HostType, SlotKind};

/// Failure raised by the host while touching a member
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostFault {
    #[error("no {kind:?} named {name}")]
    NoSuchMember { kind: SlotKind, name: String },

    #[error("no overload {name}({params:?})")]
    NoSuchMethod { name: String, params: Vec<ValueType> },

    #[error("{name} is read-only")]
    ReadOnly { name: String },

    #[error("{name} expects {expected:?}")]
    WrongValue { name: String, expected: ValueType },

    #[error("{member} threw: {message}")]
    Threw { member: String, message: String },
}

pub trait HostObject {
    fn host_type(&self) -> &HostType;

    fn read(&self, kind: SlotKind, name: &str) -> Result<Value, HostFault>;

    fn write(&mut self, kind: SlotKind, name: &str, value: Value) -> Result<(), HostFault>;

    /// Invoke the overload of `name` declared with exactly `params`
    fn call(&mut self, name: &str, params: &[ValueType], args: Vec<Value>)
        -> Result<Value, HostFault>;
}

/// A recorded method invocation on a [`DynamicObject`]
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub name: String,
    pub params: Vec<ValueType>,
    pub args: Vec<Value>,
}

type MethodKey = (String, Vec<ValueType>);

/// Host object backed by lookup tables
///
/// Every declared slot starts at its type's zero value. Methods return
/// whatever was registered with [`DynamicObject::set_return`] (or the zero
/// of their return type) and record each call.
#[derive(Debug, Clone)]
pub struct DynamicObject {
    ty: Arc<HostType>,
    slots: AHashMap<(SlotKind, String), Value>,
    returns: AHashMap<MethodKey, Value>,
    faults: AHashSet<String>,
    calls: Vec<MethodCall>,
}

impl DynamicObject {
    pub fn new(ty: Arc<HostType>) -> Self {
        let mut slots = AHashMap::new();
        for f in &ty.fields {
            slots.insert((SlotKind::Field, f.name.clone()), Value::zero(f.ty));
        }
        for p in &ty.properties {
            slots.insert((SlotKind::Property, p.name.clone()), Value::zero(p.ty));
        }

        Self {
            ty,
            slots,
            returns: AHashMap::new(),
            faults: AHashSet::new(),
            calls: Vec::new(),
        }
    }

    /// Seed a slot, bypassing writability (host-side initialisation)
    pub fn with_slot(mut self, kind: SlotKind, name: &str, value: impl Into<Value>) -> Self {
        self.slots.insert((kind, name.to_string()), value.into());
        self
    }

    pub fn set_return(&mut self, name: &str, params: &[ValueType], value: impl Into<Value>) {
        self.returns
            .insert((name.to_string(), params.to_vec()), value.into());
    }

    /// Make every overload of `name` throw when called
    pub fn fail_method(&mut self, name: &str) {
        self.faults.insert(name.to_string());
    }

    pub fn calls(&self) -> &[MethodCall] {
        &self.calls
    }

    pub fn slot_value(&self, kind: SlotKind, name: &str) -> Option<&Value> {
        self.slots.get(&(kind, name.to_string()))
    }
}

impl HostObject for DynamicObject {
    fn host_type(&self) -> &HostType {
        &self.ty
    }

    fn read(&self, kind: SlotKind, name: &str) -> Result<Value, HostFault> {
        self.slots
            .get(&(kind, name.to_string()))
            .cloned()
            .ok_or_else(|| HostFault::NoSuchMember {
                kind,
                name: name.to_string(),
            })
    }

    fn write(&mut self, kind: SlotKind, name: &str, value: Value) -> Result<(), HostFault> {
        let decl = self.ty.slot(kind, name).ok_or_else(|| HostFault::NoSuchMember {
            kind,
            name: name.to_string(),
        })?;
        if !decl.writable {
            return Err(HostFault::ReadOnly {
                name: name.to_string(),
            });
        }
        if !value.fits(decl.ty) {
            return Err(HostFault::WrongValue {
                name: name.to_string(),
                expected: decl.ty,
            });
        }
        self.slots.insert((kind, name.to_string()), value);
        Ok(())
    }

    fn call(
        &mut self,
        name: &str,
        params: &[ValueType],
        args: Vec<Value>,
    ) -> Result<Value, HostFault> {
        let decl = self
            .ty
            .method(name, params)
            .ok_or_else(|| HostFault::NoSuchMethod {
                name: name.to_string(),
                params: params.to_vec(),
            })?;

        if args.len() != decl.params.len() {
            return Err(HostFault::Threw {
                member: name.to_string(),
                message: format!("expected {} arguments, got {}", decl.params.len(), args.len()),
            });
        }
        for (arg, ty) in args.iter().zip(&decl.params) {
            if !arg.fits(*ty) {
                return Err(HostFault::WrongValue {
                    name: name.to_string(),
                    expected: *ty,
                });
            }
        }
        let returns = decl.returns;

        self.calls.push(MethodCall {
            name: name.to_string(),
            params: params.to_vec(),
            args,
        });

        if self.faults.contains(name) {
            return Err(HostFault::Threw {
                member: name.to_string(),
                message: "host exception".to_string(),
            });
        }

        Ok(self
            .returns
            .get(&(name.to_string(), params.to_vec()))
            .cloned()
            .unwrap_or_else(|| Value::zero(returns)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal_type() -> Arc<HostType> {
        Arc::new(
            HostType::new("CyberneticsTerminal", "2.0.204")
                .with_field("nCredits", ValueType::Int)
                .with_readonly_property("Subject", ValueType::Handle),
        )
    }

    #[test]
    fn test_slots_start_at_zero() {
        let obj = DynamicObject::new(terminal_type());
        assert_eq!(obj.read(SlotKind::Field, "nCredits"), Ok(Value::Int(0)));
        assert_eq!(obj.read(SlotKind::Property, "Subject"), Ok(Value::Null));
    }

    #[test]
    fn test_write_is_type_checked() {
        let mut obj = DynamicObject::new(terminal_type());
        assert!(obj.write(SlotKind::Field, "nCredits", Value::Int(7)).is_ok());
        assert_eq!(
            obj.write(SlotKind::Field, "nCredits", Value::from("seven")),
            Err(HostFault::WrongValue {
                name: "nCredits".to_string(),
                expected: ValueType::Int
            })
        );
        assert!(matches!(
            obj.write(SlotKind::Property, "Subject", Value::Null),
            Err(HostFault::ReadOnly { .. })
        ));
        assert!(matches!(
            obj.write(SlotKind::Property, "nCredits", Value::Int(1)),
            Err(HostFault::NoSuchMember { .. })
        ));
    }

    #[test]
    fn test_calls_are_recorded_and_can_fault() {
        let ty = Arc::new(
            HostType::new("BaseMutation", "2.0.206")
                .with_method("SetVariant", &[ValueType::Str], ValueType::Unit),
        );
        let mut obj = DynamicObject::new(ty);
        assert!(obj.call("SetVariant", &[ValueType::Str], vec![Value::from("B")]).is_ok());
        assert!(obj.call("SetVariant", &[ValueType::Int], vec![Value::Int(1)]).is_err());
        assert_eq!(obj.calls().len(), 1);

        obj.fail_method("SetVariant");
        assert!(matches!(
            obj.call("SetVariant", &[ValueType::Str], vec![Value::from("C")]),
            Err(HostFault::Threw { .. })
        ));
    }
}
