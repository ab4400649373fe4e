//! Candidate member names for each adapted operation, newest host release first

use derive_more::Display;

use crate::core::types::ValueType;

/// Identity of a candidate list, used as half of the cache key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub struct CandidateListId(pub &'static str);

/// Which member kinds to look for under a candidate name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// A field, then a property, with the same name
    Slot,
    Field,
    Property,
    /// A method overload with exactly these parameter types
    Method { params: &'static [ValueType] },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub name: &'static str,
    pub probe: Probe,
}

impl Candidate {
    pub const fn slot(name: &'static str) -> Self {
        Self {
            name,
            probe: Probe::Slot,
        }
    }

    pub const fn field(name: &'static str) -> Self {
        Self {
            name,
            probe: Probe::Field,
        }
    }

    pub const fn property(name: &'static str) -> Self {
        Self {
            name,
            probe: Probe::Property,
        }
    }

    pub const fn method(name: &'static str, params: &'static [ValueType]) -> Self {
        Self {
            name,
            probe: Probe::Method { params },
        }
    }
}

/// Ordered, non-empty candidate names; the first one present wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateList {
    id: CandidateListId,
    candidates: &'static [Candidate],
}

impl CandidateList {
    pub const fn new(id: &'static str, candidates: &'static [Candidate]) -> Self {
        assert!(!candidates.is_empty(), "candidate list must not be empty");
        Self {
            id: CandidateListId(id),
            candidates,
        }
    }

    pub fn id(&self) -> CandidateListId {
        self.id
    }

    pub fn candidates(&self) -> &'static [Candidate] {
        self.candidates
    }
}

/// 2.0.204.65 fixed the `PreferedPrimary` typo and turned the field into a
/// property.
const PREFERRED_PRIMARY_NAMES: &[Candidate] = &[
    Candidate::property("PreferredPrimary"),
    Candidate::field("PreferedPrimary"),
];

const MUTATION_VARIANTS_NAMES: &[Candidate] = &[Candidate::method("GetVariants", &[])];

/// 2.0.206.8 changed `SetVariant` from an integer index to a string id.
const SET_VARIANT_NAMES: &[Candidate] = &[
    Candidate::method("SetVariant", &[ValueType::Str]),
    Candidate::method("SetVariant", &[ValueType::Int]),
];

const TERMINAL_SUBJECT_NAMES: &[Candidate] = &[Candidate::slot("Subject"), Candidate::slot("obj")];

const TERMINAL_CREDITS_NAMES: &[Candidate] = &[Candidate::slot("Credits"), Candidate::slot("nCredits")];

const TERMINAL_SELECTED_NAMES: &[Candidate] = &[Candidate::slot("Selected"), Candidate::slot("nSelected")];

pub const PREFERRED_PRIMARY: CandidateList =
    CandidateList::new("BodyPart.PreferredPrimary", PREFERRED_PRIMARY_NAMES);

pub const MUTATION_VARIANTS: CandidateList =
    CandidateList::new("BaseMutation.GetVariants", MUTATION_VARIANTS_NAMES);

pub const SET_VARIANT: CandidateList = CandidateList::new("BaseMutation.SetVariant", SET_VARIANT_NAMES);

pub const TERMINAL_SUBJECT: CandidateList = CandidateList::new("Terminal.Subject", TERMINAL_SUBJECT_NAMES);

pub const TERMINAL_CREDITS: CandidateList = CandidateList::new("Terminal.Credits", TERMINAL_CREDITS_NAMES);

pub const TERMINAL_SELECTED: CandidateList =
    CandidateList::new("Terminal.Selected", TERMINAL_SELECTED_NAMES);
