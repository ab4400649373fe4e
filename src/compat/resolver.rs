//! Member resolution: find which candidate name a host type actually declares

use crate::compat::candidates::{Candidate, CandidateList, Probe};
use crate::core::types::ValueType;
use crate::host::shape::{HostType, SlotDecl, SlotKind};

/// Parameter and return types of a resolved method overload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    pub params: &'static [ValueType],
    pub returns: ValueType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Property,
    MethodOverload(Signature),
}

impl Binding {
    /// e.g. `#1 SetVariant(Int)` or `#0 property PreferredPrimary`
    pub fn describe(&self) -> String {
        match self.kind {
            MemberKind::Field => format!("#{} field {}", self.rank, self.name),
            MemberKind::Property => format!("#{} property {}", self.rank, self.name),
            MemberKind::MethodOverload(signature) => {
                let params: Vec<String> = signature.params.iter().map(|p| format!("{:?}", p)).collect();
                format!("#{} {}({})", self.rank, self.name, params.join(", "))
            }
        }
    }
}

impl MemberKind {
    pub fn slot_kind(&self) -> Option<SlotKind> {
        match self {
            MemberKind::Field => Some(SlotKind::Field),
            MemberKind::Property => Some(SlotKind::Property),
            MemberKind::MethodOverload(_) => None,
        }
    }
}

/// A candidate that exists on the probed type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub name: &'static str,
    pub kind: MemberKind,
    /// Declared slot type, or the method's return type
    pub value_type: ValueType,
    pub writable: bool,
    /// Position of the winning candidate in its list
    pub rank: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedMember {
    Resolved(Binding),
    Unresolved,
}

impl ResolvedMember {
    pub fn binding(&self) -> Option<Binding> {
        match self {
            ResolvedMember::Resolved(b) => Some(*b),
            ResolvedMember::Unresolved => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolvedMember::Resolved(_))
    }
}

/// Walk `list` in order and bind the first candidate `ty` declares.
///
/// For [`Probe::Slot`] the field and the property of the same name are both
/// tried before moving to the next candidate. Never fails: a type with none
/// of the candidates yields [`ResolvedMember::Unresolved`].
pub fn resolve(ty: &HostType, list: &CandidateList) -> ResolvedMember {
    for (rank, candidate) in list.candidates().iter().enumerate() {
        if let Some(binding) = probe(ty, candidate, rank) {
            tracing::debug!(
                "{}: resolved {} as {:?} on {}",
                list.id(),
                binding.name,
                binding.kind,
                ty.id
            );
            return ResolvedMember::Resolved(binding);
        }
    }

    tracing::debug!("{}: no candidate resolved on {}", list.id(), ty.id);
    ResolvedMember::Unresolved
}

fn probe(ty: &HostType, candidate: &Candidate, rank: usize) -> Option<Binding> {
    let slot = |kind: MemberKind, decl: &SlotDecl| Binding {
        name: candidate.name,
        kind,
        value_type: decl.ty,
        writable: decl.writable,
        rank,
    };

    match candidate.probe {
        Probe::Field => ty.field(candidate.name).map(|d| slot(MemberKind::Field, d)),
        Probe::Property => ty
            .property(candidate.name)
            .map(|d| slot(MemberKind::Property, d)),
        Probe::Slot => ty
            .field(candidate.name)
            .map(|d| slot(MemberKind::Field, d))
            .or_else(|| {
                ty.property(candidate.name)
                    .map(|d| slot(MemberKind::Property, d))
            }),
        Probe::Method { params } => ty.method(candidate.name, params).map(|m| Binding {
            name: candidate.name,
            kind: MemberKind::MethodOverload(Signature {
                params,
                returns: m.returns,
            }),
            value_type: m.returns,
            writable: false,
            rank,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::candidates::{PREFERRED_PRIMARY, SET_VARIANT};

    #[test]
    fn test_first_candidate_wins() {
        let ty = HostType::new("BodyPart", "both")
            .with_property("PreferredPrimary", ValueType::Bool)
            .with_field("PreferedPrimary", ValueType::Bool);

        let binding = resolve(&ty, &PREFERRED_PRIMARY).binding().unwrap();
        assert_eq!(binding.name, "PreferredPrimary");
        assert_eq!(binding.kind, MemberKind::Property);
        assert_eq!(binding.rank, 0);
    }

    #[test]
    fn test_falls_through_to_older_name() {
        let ty = HostType::new("BodyPart", "2.0.204").with_field("PreferedPrimary", ValueType::Bool);

        let binding = resolve(&ty, &PREFERRED_PRIMARY).binding().unwrap();
        assert_eq!(binding.name, "PreferedPrimary");
        assert_eq!(binding.kind, MemberKind::Field);
        assert_eq!(binding.rank, 1);
    }

    const FLAG_NAMES: &[Candidate] = &[Candidate::slot("Flag")];
    const FLAG_SLOT: CandidateList = CandidateList::new("Test.Flag", FLAG_NAMES);

    #[test]
    fn test_slot_probe_prefers_field_over_property_of_same_name() {
        let ty = HostType::new("Part", "odd")
            .with_property("Flag", ValueType::Bool)
            .with_field("Flag", ValueType::Int);

        let binding = resolve(&ty, &FLAG_SLOT).binding().unwrap();
        assert_eq!(binding.kind, MemberKind::Field);
        assert_eq!(binding.value_type, ValueType::Int);
    }

    #[test]
    fn test_slot_probe_binds_property_when_no_field() {
        let ty = HostType::new("Part", "new").with_property("Flag", ValueType::Bool);
        assert_eq!(resolve(&ty, &FLAG_SLOT).binding().unwrap().kind, MemberKind::Property);
    }

    #[test]
    fn test_field_probe_ignores_property_of_same_name() {
        // The typo'd name only ever existed as a field
        let ty = HostType::new("BodyPart", "odd").with_property("PreferedPrimary", ValueType::Bool);
        assert_eq!(resolve(&ty, &PREFERRED_PRIMARY), ResolvedMember::Unresolved);
    }

    #[test]
    fn test_property_probe_ignores_field_of_same_name() {
        let ty = HostType::new("BodyPart", "odd")
            .with_field("PreferredPrimary", ValueType::Bool)
            .with_field("PreferedPrimary", ValueType::Bool);

        let binding = resolve(&ty, &PREFERRED_PRIMARY).binding().unwrap();
        assert_eq!(binding.name, "PreferedPrimary");
        assert_eq!(binding.rank, 1);
    }

    #[test]
    fn test_describe_names_the_overload() {
        let old = HostType::new("BaseMutation", "2.0.205")
            .with_method("SetVariant", &[ValueType::Int], ValueType::Unit);
        let binding = resolve(&old, &SET_VARIANT).binding().unwrap();
        assert_eq!(binding.describe(), "#1 SetVariant(Int)");
    }

    #[test]
    fn test_overload_chosen_by_declared_signature() {
        let old = HostType::new("BaseMutation", "2.0.205")
            .with_method("SetVariant", &[ValueType::Int], ValueType::Unit);
        let binding = resolve(&old, &SET_VARIANT).binding().unwrap();
        assert_eq!(
            binding.kind,
            MemberKind::MethodOverload(Signature {
                params: &[ValueType::Int],
                returns: ValueType::Unit
            })
        );
        assert_eq!(binding.rank, 1);
    }

    #[test]
    fn test_unrelated_overload_does_not_resolve() {
        let ty = HostType::new("BaseMutation", "future")
            .with_method("SetVariant", &[ValueType::Str, ValueType::Bool], ValueType::Unit);
        assert_eq!(resolve(&ty, &SET_VARIANT), ResolvedMember::Unresolved);
    }
}
