//! Host type descriptors
//!
//! A [`HostType`] is the declared shape of one concrete host type in one host
//! release: its fields, properties and method overloads. Member names and
//! kinds drift between releases, so two releases of the "same" type are two
//! different descriptors with different [`HostTypeId`]s.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::ValueType;

/// Identity of a concrete host type in a specific host release
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display(fmt = "{}@{}", name, version)]
pub struct HostTypeId {
    pub name: String,
    pub version: String,
}

impl HostTypeId {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Storage kind of a data member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    Field,
    Property,
}

/// A declared field or property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDecl {
    pub name: String,
    pub ty: ValueType,
    #[serde(default = "writable_by_default")]
    pub writable: bool,
}

fn writable_by_default() -> bool {
    true
}

/// A declared method overload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    #[serde(default)]
    pub params: Vec<ValueType>,
    #[serde(default = "unit_return")]
    pub returns: ValueType,
}

fn unit_return() -> ValueType {
    ValueType::Unit
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostType {
    pub id: HostTypeId,
    #[serde(default)]
    pub fields: Vec<SlotDecl>,
    #[serde(default)]
    pub properties: Vec<SlotDecl>,
    #[serde(default)]
    pub methods: Vec<MethodDecl>,
}

impl HostType {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: HostTypeId::new(name, version),
            fields: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
        }
    }

    /// Load a descriptor from its JSON form
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn with_field(mut self, name: impl Into<String>, ty: ValueType) -> Self {
        self.fields.push(SlotDecl {
            name: name.into(),
            ty,
            writable: true,
        });
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, ty: ValueType) -> Self {
        self.properties.push(SlotDecl {
            name: name.into(),
            ty,
            writable: true,
        });
        self
    }

    /// Property with a getter only
    pub fn with_readonly_property(mut self, name: impl Into<String>, ty: ValueType) -> Self {
        self.properties.push(SlotDecl {
            name: name.into(),
            ty,
            writable: false,
        });
        self
    }

    pub fn with_method(
        mut self,
        name: impl Into<String>,
        params: &[ValueType],
        returns: ValueType,
    ) -> Self {
        self.methods.push(MethodDecl {
            name: name.into(),
            params: params.to_vec(),
            returns,
        });
        self
    }

    pub fn field(&self, name: &str) -> Option<&SlotDecl> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn property(&self, name: &str) -> Option<&SlotDecl> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn slot(&self, kind: SlotKind, name: &str) -> Option<&SlotDecl> {
        match kind {
            SlotKind::Field => self.field(name),
            SlotKind::Property => self.property(name),
        }
    }

    /// Overload of `name` whose parameter types are exactly `params`
    pub fn method(&self, name: &str, params: &[ValueType]) -> Option<&MethodDecl> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.params.as_slice() == params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overload_lookup_matches_exact_signature() {
        let ty = HostType::new("BaseMutation", "2.0.206")
            .with_method("SetVariant", &[ValueType::Str], ValueType::Unit)
            .with_method("SetVariant", &[ValueType::Int, ValueType::Int], ValueType::Unit);

        assert!(ty.method("SetVariant", &[ValueType::Str]).is_some());
        assert!(ty.method("SetVariant", &[ValueType::Int]).is_none());
        assert!(ty.method("SetVariant", &[]).is_none());
    }

    #[test]
    fn test_fields_and_properties_are_separate() {
        let ty = HostType::new("BodyPart", "2.0.204").with_field("PreferedPrimary", ValueType::Bool);
        assert!(ty.slot(SlotKind::Field, "PreferedPrimary").is_some());
        assert!(ty.slot(SlotKind::Property, "PreferedPrimary").is_none());
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "id": { "name": "BodyPart", "version": "2.0.206" },
            "properties": [ { "name": "PreferredPrimary", "ty": "Bool", "writable": false } ],
            "methods": [ { "name": "GetVariants", "returns": "List" } ]
        }"#;
        let ty = HostType::from_json(json).unwrap();
        assert_eq!(ty.id.to_string(), "BodyPart@2.0.206");
        assert!(!ty.property("PreferredPrimary").unwrap().writable);
        assert_eq!(ty.method("GetVariants", &[]).unwrap().returns, ValueType::List);
        assert!(ty.fields.is_empty());
    }
}
