//! Typed access to a resolved member

use crate::compat::resolver::{Binding, MemberKind};
use crate::core::error::{CompatError, Result};
use crate::core::types::{FromValue, Value, ValueType};
use crate::host::object::{HostFault, HostObject};

/// Get/set/invoke on one [`Binding`]
///
/// The accessor never holds the host object; callers pass it in for each
/// operation.
#[derive(Debug, Clone, Copy)]
pub struct TypedAccessor {
    operation: &'static str,
    binding: Binding,
}

impl TypedAccessor {
    pub fn new(operation: &'static str, binding: Binding) -> Self {
        Self { operation, binding }
    }

    pub fn binding(&self) -> &Binding {
        &self.binding
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Read a field or property as `T`
    pub fn get<T: FromValue>(&self, host: &dyn HostObject) -> Result<T> {
        let slot = self.binding.kind.slot_kind().ok_or_else(|| self.not_a_slot(host))?;
        if self.binding.value_type != T::EXPECTED {
            return Err(self.mismatch(host, T::EXPECTED, self.binding.value_type));
        }

        let value = host
            .read(slot, self.binding.name)
            .map_err(|fault| self.failure(host, fault))?;
        T::from_value(value)
            .map_err(|found| self.mismatch(host, T::EXPECTED, found.unwrap_or(self.binding.value_type)))
    }

    /// Write a field or property
    pub fn set(&self, host: &mut dyn HostObject, value: Value) -> Result<()> {
        let slot = self.binding.kind.slot_kind().ok_or_else(|| self.not_a_slot(host))?;
        if !value.fits(self.binding.value_type) {
            let found = value.value_type().unwrap_or(ValueType::Unit);
            return Err(self.mismatch(host, self.binding.value_type, found));
        }

        host.write(slot, self.binding.name, value)
            .map_err(|fault| self.failure(host, fault))
    }

    /// Call the resolved overload. `args` must already be shaped for its
    /// signature; see [`selector_argument`].
    pub fn invoke<T: FromValue>(&self, host: &mut dyn HostObject, args: Vec<Value>) -> Result<T> {
        let MemberKind::MethodOverload(signature) = self.binding.kind else {
            return Err(CompatError::InvocationFailure {
                operation: self.operation,
                host_type: host.host_type().id.clone(),
                member: self.binding.name.to_string(),
                candidate: self.binding.describe(),
                reason: "bound member is not a method".to_string(),
            });
        };

        if args.len() != signature.params.len() {
            return Err(CompatError::InvocationFailure {
                operation: self.operation,
                host_type: host.host_type().id.clone(),
                member: self.binding.name.to_string(),
                candidate: self.binding.describe(),
                reason: format!(
                    "expected {} arguments, got {}",
                    signature.params.len(),
                    args.len()
                ),
            });
        }
        for (arg, expected) in args.iter().zip(signature.params) {
            if !arg.fits(*expected) {
                let found = arg.value_type().unwrap_or(ValueType::Unit);
                return Err(self.mismatch(host, *expected, found));
            }
        }
        if T::EXPECTED != ValueType::Unit && signature.returns != T::EXPECTED {
            return Err(self.mismatch(host, T::EXPECTED, signature.returns));
        }

        let value = host
            .call(self.binding.name, signature.params, args)
            .map_err(|fault| self.failure(host, fault))?;
        T::from_value(value).map_err(|found| self.mismatch(host, T::EXPECTED, found.unwrap_or(signature.returns)))
    }

    fn mismatch(&self, host: &dyn HostObject, expected: ValueType, found: ValueType) -> CompatError {
        CompatError::TypeMismatch {
            host_type: host.host_type().id.clone(),
            member: self.binding.name.to_string(),
            expected,
            found,
        }
    }

    fn failure(&self, host: &dyn HostObject, fault: HostFault) -> CompatError {
        CompatError::InvocationFailure {
            operation: self.operation,
            host_type: host.host_type().id.clone(),
            member: self.binding.name.to_string(),
            candidate: self.binding.describe(),
            reason: fault.to_string(),
        }
    }

    fn not_a_slot(&self, host: &dyn HostObject) -> CompatError {
        CompatError::InvocationFailure {
            operation: self.operation,
            host_type: host.host_type().id.clone(),
            member: self.binding.name.to_string(),
            candidate: self.binding.describe(),
            reason: "bound member is a method, not a field or property".to_string(),
        }
    }
}

/// Shape a selection for a one-parameter overload: the string id for a
/// string-typed overload, the index for an integer-typed one.
pub fn selector_argument(binding: &Binding, index: usize, id: &str) -> Option<Value> {
    let MemberKind::MethodOverload(signature) = binding.kind else {
        return None;
    };
    match signature.params {
        [ValueType::Str] => Some(Value::Str(id.to_string())),
        [ValueType::Int] => i64::try_from(index).ok().map(Value::Int),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::candidates::{PREFERRED_PRIMARY, SET_VARIANT, TERMINAL_CREDITS};
    use crate::compat::resolver::resolve;
    use crate::host::object::DynamicObject;
    use crate::host::shape::{HostType, SlotKind};
    use std::sync::Arc;

    fn accessor(ty: &HostType, list: &crate::compat::candidates::CandidateList) -> TypedAccessor {
        TypedAccessor::new("test", resolve(ty, list).binding().unwrap())
    }

    #[test]
    fn test_get_and_set_slot() {
        let ty = Arc::new(HostType::new("Terminal", "2.0.204").with_field("nCredits", ValueType::Int));
        let mut obj = DynamicObject::new(ty.clone()).with_slot(SlotKind::Field, "nCredits", 3i64);
        let credits = accessor(&ty, &TERMINAL_CREDITS);

        assert_eq!(credits.get::<i64>(&obj).unwrap(), 3);
        credits.set(&mut obj, Value::Int(8)).unwrap();
        assert_eq!(credits.get::<i64>(&obj).unwrap(), 8);
    }

    #[test]
    fn test_get_with_wrong_type_is_mismatch() {
        let ty = Arc::new(HostType::new("BodyPart", "weird").with_property("PreferredPrimary", ValueType::Int));
        let obj = DynamicObject::new(ty.clone());
        let flag = accessor(&ty, &PREFERRED_PRIMARY);

        match flag.get::<bool>(&obj) {
            Err(CompatError::TypeMismatch { expected, found, .. }) => {
                assert_eq!(expected, ValueType::Bool);
                assert_eq!(found, ValueType::Int);
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_set_on_readonly_property_fails() {
        let ty = Arc::new(HostType::new("Terminal", "x").with_readonly_property("Credits", ValueType::Int));
        let mut obj = DynamicObject::new(ty.clone());
        let credits = accessor(&ty, &TERMINAL_CREDITS);

        assert!(matches!(
            credits.set(&mut obj, Value::Int(1)),
            Err(CompatError::InvocationFailure { .. })
        ));
    }

    #[test]
    fn test_invoke_checks_argument_shape() {
        let ty = Arc::new(
            HostType::new("BaseMutation", "2.0.206").with_method("SetVariant", &[ValueType::Str], ValueType::Unit),
        );
        let mut obj = DynamicObject::new(ty.clone());
        let set_variant = accessor(&ty, &SET_VARIANT);

        assert!(matches!(
            set_variant.invoke::<()>(&mut obj, vec![Value::Int(1)]),
            Err(CompatError::TypeMismatch { .. })
        ));
        assert!(obj.calls().is_empty());

        set_variant.invoke::<()>(&mut obj, vec![Value::from("B")]).unwrap();
        assert_eq!(obj.calls()[0].args, vec![Value::from("B")]);
    }

    #[test]
    fn test_invoke_rejects_wrong_argument_count() {
        let ty = Arc::new(
            HostType::new("BaseMutation", "2.0.206").with_method("SetVariant", &[ValueType::Str], ValueType::Unit),
        );
        let mut obj = DynamicObject::new(ty.clone());
        let set_variant = accessor(&ty, &SET_VARIANT);

        for args in [vec![], vec![Value::from("B"), Value::Int(9)]] {
            let given = args.len();
            match set_variant.invoke::<()>(&mut obj, args) {
                Err(CompatError::InvocationFailure { reason, .. }) => {
                    assert_eq!(reason, format!("expected 1 arguments, got {}", given));
                }
                other => panic!("expected InvocationFailure, got {:?}", other),
            }
        }
        assert!(obj.calls().is_empty());
    }

    #[test]
    fn test_invoke_fault_is_invocation_failure() {
        let ty = Arc::new(
            HostType::new("BaseMutation", "2.0.206").with_method("SetVariant", &[ValueType::Str], ValueType::Unit),
        );
        let mut obj = DynamicObject::new(ty.clone());
        obj.fail_method("SetVariant");
        let set_variant = accessor(&ty, &SET_VARIANT);

        match set_variant.invoke::<()>(&mut obj, vec![Value::from("A")]) {
            Err(CompatError::InvocationFailure { operation, member, candidate, .. }) => {
                assert_eq!(operation, "test");
                assert_eq!(member, "SetVariant");
                assert_eq!(candidate, "#0 SetVariant(Str)");
            }
            other => panic!("expected InvocationFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_selector_argument_follows_overload() {
        let new = HostType::new("BaseMutation", "2.0.206").with_method("SetVariant", &[ValueType::Str], ValueType::Unit);
        let old = HostType::new("BaseMutation", "2.0.205").with_method("SetVariant", &[ValueType::Int], ValueType::Unit);

        let new_binding = resolve(&new, &SET_VARIANT).binding().unwrap();
        let old_binding = resolve(&old, &SET_VARIANT).binding().unwrap();

        assert_eq!(selector_argument(&new_binding, 1, "B"), Some(Value::from("B")));
        assert_eq!(selector_argument(&old_binding, 1, "B"), Some(Value::Int(1)));
    }
}
