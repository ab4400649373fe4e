//! The named compatibility operations used by feature code
//!
//! Every operation is fail-soft. A missing member, a wrongly typed member or
//! a host exception is logged and turned into the operation's documented
//! default; nothing propagates into the host's UI or turn loop.
//!
//! Per host type, each operation starts unresolved, resolves on its first
//! call, and from then on reuses the cached outcome (bound or unresolved).

use crate::compat::accessor::{selector_argument, TypedAccessor};
use crate::compat::cache::ResolutionCache;
use crate::compat::candidates::{
    CandidateList, MUTATION_VARIANTS, PREFERRED_PRIMARY, SET_VARIANT, TERMINAL_CREDITS,
    TERMINAL_SELECTED, TERMINAL_SUBJECT,
};
use crate::compat::diagnostics::{DiagnosticSink, TracingSink};
use crate::compat::resolver::{resolve, ResolvedMember};
use crate::core::config::CompatConfig;
use crate::core::error::CompatError;
use crate::core::random::SeededRandom;
use crate::core::types::{HostHandle, Value};
use crate::host::object::HostObject;

/// Journal collaborator that records player accomplishments
pub trait Journal {
    fn add_accomplishment(&mut self, text: &str, mural_text: &str);
}

pub struct CompatibilityFacade<S: DiagnosticSink = TracingSink> {
    config: CompatConfig,
    cache: ResolutionCache,
    sink: S,
}

impl CompatibilityFacade<TracingSink> {
    pub fn new(config: CompatConfig) -> Self {
        Self::with_sink(config, TracingSink)
    }
}

impl Default for CompatibilityFacade<TracingSink> {
    fn default() -> Self {
        Self::new(CompatConfig::default())
    }
}

impl<S: DiagnosticSink> CompatibilityFacade<S> {
    pub fn with_sink(config: CompatConfig, sink: S) -> Self {
        Self {
            config,
            cache: ResolutionCache::new(),
            sink,
        }
    }

    pub fn config(&self) -> &CompatConfig {
        &self.config
    }

    /// Host option hook for `OptionCleverGirlDebug`
    pub fn apply_debug_option(&mut self, value: &str) -> bool {
        self.config.apply_option(value)
    }

    pub fn cache(&self) -> &ResolutionCache {
        &self.cache
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Emit a diagnostic if debug logging is on
    pub fn maybe_log(&mut self, message: &str) {
        if self.config.debug {
            self.sink.emit(message);
        }
    }

    /// Type mismatches and invocation failures are always warned about
    fn report(&mut self, err: &CompatError) {
        tracing::warn!("{}", err);
        self.maybe_log(&err.to_string());
    }

    fn bind(&mut self, host: &dyn HostObject, list: &CandidateList) -> Result<TypedAccessor, CompatError> {
        match self.cache.get_or_resolve(host.host_type(), list, resolve) {
            ResolvedMember::Resolved(binding) => Ok(TypedAccessor::new(list.id().0, binding)),
            ResolvedMember::Unresolved => Err(CompatError::UnresolvedMember {
                host_type: host.host_type().id.clone(),
                candidates: list.id().0,
            }),
        }
    }

    /// Log an unresolved member together with the default being used
    fn unresolved(&mut self, err: CompatError, fallback: &str) {
        self.maybe_log(&format!("{} {}", err, fallback));
    }

    /// Whether `part` is its body's preferred primary limb.
    ///
    /// Unknown reads as `false`, which may cost the player a turn. The host's
    /// own semantics for an unknown limb are not known; treat this default as
    /// an approximation.
    pub fn preferred_primary_flag(&mut self, part: &dyn HostObject) -> bool {
        let accessor = match self.bind(part, &PREFERRED_PRIMARY) {
            Ok(accessor) => accessor,
            Err(err) => {
                self.unresolved(err, "Will assume this is not the primary body part.");
                return false;
            }
        };

        match accessor.get::<bool>(part) {
            Ok(flag) => flag,
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }

    /// Put `mutation` into one of its variants chosen uniformly by `rng`.
    ///
    /// Returns the variant applied; `None` means nothing was changed.
    pub fn randomize_mutation_variant(
        &mut self,
        mutation: &mut dyn HostObject,
        rng: &mut dyn SeededRandom,
    ) -> Option<String> {
        let variants = self.mutation_variants(mutation)?;
        if variants.is_empty() {
            return None;
        }

        let index = rng.next_index(variants.len());
        let variant = variants.into_iter().nth(index)?;
        self.maybe_log(&format!(
            "BaseMutation.SetVariant(...): '{}' (index: {})",
            variant, index
        ));

        let set_variant = match self.bind(mutation, &SET_VARIANT) {
            Ok(accessor) => accessor,
            Err(err) => {
                self.unresolved(err, "Leaving the mutation variant unchanged.");
                return None;
            }
        };
        let Some(arg) = selector_argument(set_variant.binding(), index, &variant) else {
            self.maybe_log("SetVariant resolved to an overload with an unsupported signature.");
            return None;
        };

        match set_variant.invoke::<()>(mutation, vec![arg]) {
            Ok(()) => Some(variant),
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    fn mutation_variants(&mut self, mutation: &mut dyn HostObject) -> Option<Vec<String>> {
        let accessor = match self.bind(mutation, &MUTATION_VARIANTS) {
            Ok(accessor) => accessor,
            Err(err) => {
                self.unresolved(err, "Treating the mutation as having no variants.");
                return None;
            }
        };
        match accessor.invoke::<Option<Vec<String>>>(mutation, Vec::new()) {
            Ok(variants) => variants,
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    /// Object a terminal is operating on; `None` when absent or unknown
    pub fn terminal_subject(&mut self, terminal: Option<&dyn HostObject>) -> Option<HostHandle> {
        let terminal = terminal?;
        let accessor = match self.bind(terminal, &TERMINAL_SUBJECT) {
            Ok(accessor) => accessor,
            Err(err) => {
                self.unresolved(err, "Assuming no subject.");
                return None;
            }
        };
        match accessor.get::<Option<HostHandle>>(terminal) {
            Ok(subject) => subject,
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    /// Add `amount` to the terminal's credits, returning the new balance.
    ///
    /// `None` means the credits were left untouched.
    pub fn add_credits(&mut self, terminal: &mut dyn HostObject, amount: i64) -> Option<i64> {
        let accessor = match self.bind(terminal, &TERMINAL_CREDITS) {
            Ok(accessor) => accessor,
            Err(err) => {
                self.unresolved(err, "No credits added.");
                return None;
            }
        };

        let result = accessor.get::<i64>(terminal).and_then(|current| {
            let total = current.saturating_add(amount);
            accessor.set(terminal, Value::Int(total)).map(|()| total)
        });
        match result {
            Ok(total) => Some(total),
            Err(err) => {
                self.report(&err);
                None
            }
        }
    }

    /// Currently selected option of a terminal, 0 when unknown
    pub fn terminal_selected(&mut self, terminal: &dyn HostObject) -> i64 {
        let accessor = match self.bind(terminal, &TERMINAL_SELECTED) {
            Ok(accessor) => accessor,
            Err(err) => {
                self.unresolved(err, "Assuming nothing is selected.");
                return 0;
            }
        };
        match accessor.get::<i64>(terminal) {
            Ok(selected) => selected,
            Err(err) => {
                self.report(&err);
                0
            }
        }
    }

    /// Record that the companion invented a dish.
    ///
    /// The mural category and weight parameters are left to the journal's
    /// defaults until the host's enum location settles.
    pub fn add_inspired_dish_accomplishment(
        &mut self,
        journal: &mut dyn Journal,
        text: &str,
        mural_text: &str,
    ) {
        journal.add_accomplishment(text, mural_text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::diagnostics::MemorySink;
    use crate::core::types::ValueType;
    use crate::host::object::DynamicObject;
    use crate::host::shape::{HostType, SlotKind};
    use std::sync::Arc;

    fn debug_facade() -> CompatibilityFacade<MemorySink> {
        let config = CompatConfig {
            debug: true,
            ..CompatConfig::default()
        };
        CompatibilityFacade::with_sink(config, MemorySink::new())
    }

    #[test]
    fn test_quiet_facade_emits_nothing() {
        let mut facade = CompatibilityFacade::with_sink(CompatConfig::default(), MemorySink::new());
        let part = DynamicObject::new(Arc::new(HostType::new("BodyPart", "none")));

        assert!(!facade.preferred_primary_flag(&part));
        assert!(facade.sink().entries().is_empty());
    }

    #[test]
    fn test_wrongly_typed_flag_degrades_to_false() {
        let mut facade = debug_facade();
        let ty = Arc::new(HostType::new("BodyPart", "odd").with_property("PreferredPrimary", ValueType::Int));
        let part = DynamicObject::new(ty).with_slot(SlotKind::Property, "PreferredPrimary", 1i64);

        assert!(!facade.preferred_primary_flag(&part));
        assert_eq!(facade.sink().entries().len(), 1);
        assert!(facade.sink().entries()[0].contains("PreferredPrimary"));
    }

    #[test]
    fn test_selected_defaults_to_zero() {
        let mut facade = debug_facade();
        let terminal = DynamicObject::new(Arc::new(HostType::new("Terminal", "none")));
        assert_eq!(facade.terminal_selected(&terminal), 0);

        let ty = Arc::new(HostType::new("Terminal", "2.0.204").with_field("nSelected", ValueType::Int));
        let terminal = DynamicObject::new(ty).with_slot(SlotKind::Field, "nSelected", 2i64);
        assert_eq!(facade.terminal_selected(&terminal), 2);
    }

    #[test]
    fn test_subject_of_missing_terminal_is_none() {
        let mut facade = debug_facade();
        assert_eq!(facade.terminal_subject(None), None);
        assert!(facade.cache().is_empty());
    }

    #[test]
    fn test_readonly_credits_are_left_alone() {
        let mut facade = debug_facade();
        let ty = Arc::new(HostType::new("Terminal", "locked").with_readonly_property("Credits", ValueType::Int));
        let mut terminal = DynamicObject::new(ty).with_slot(SlotKind::Property, "Credits", 4i64);

        assert_eq!(facade.add_credits(&mut terminal, 5), None);
        assert_eq!(terminal.slot_value(SlotKind::Property, "Credits"), Some(&Value::Int(4)));
    }

    #[test]
    fn test_debug_option_toggles_logging() {
        let mut facade = CompatibilityFacade::with_sink(CompatConfig::default(), MemorySink::new());
        let part = DynamicObject::new(Arc::new(HostType::new("BodyPart", "none")));

        facade.preferred_primary_flag(&part);
        assert!(facade.apply_debug_option("Yes"));
        facade.preferred_primary_flag(&part);

        assert_eq!(facade.sink().entries().len(), 1);
    }
}
