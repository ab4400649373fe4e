//! Resolution cache
//!
//! Lifecycle: created empty alongside the facade, filled lazily on the first
//! call per (host type, candidate list), read-only per key afterwards, dropped
//! with its owner. Entries are never evicted: the key carries the concrete
//! host type, so a differently shaped type gets its own entry.
//!
//! The key is the [`HostTypeId`] (type name + release), not the declared
//! shape. Two shapes published under the same id share the first binding;
//! the second then fails soft at access time instead of re-resolving.

use ahash::AHashMap;

use crate::compat::candidates::{CandidateList, CandidateListId};
use crate::compat::resolver::ResolvedMember;
use crate::host::shape::{HostType, HostTypeId};

#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: AHashMap<HostTypeId, AHashMap<CandidateListId, ResolvedMember>>,
    resolutions: u64,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached resolution of `list` on `ty`, running `resolver` on a miss.
    ///
    /// Unresolved results are cached too.
    pub fn get_or_resolve<F>(&mut self, ty: &HostType, list: &CandidateList, resolver: F) -> ResolvedMember
    where
        F: FnOnce(&HostType, &CandidateList) -> ResolvedMember,
    {
        if let Some(found) = self.lookup(&ty.id, list.id()) {
            return found;
        }

        let resolved = resolver(ty, list);
        self.resolutions += 1;
        self.entries
            .entry(ty.id.clone())
            .or_default()
            .insert(list.id(), resolved);
        resolved
    }

    pub fn lookup(&self, ty: &HostTypeId, list: CandidateListId) -> Option<ResolvedMember> {
        self.entries.get(ty).and_then(|per_type| per_type.get(&list)).copied()
    }

    /// Number of resolver runs so far
    pub fn resolutions(&self) -> u64 {
        self.resolutions
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(|per_type| per_type.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
