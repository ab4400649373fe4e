//! Version-compatibility adapter over the host object model
//!
//! Host member names drift between releases. Each adapted operation names
//! its candidates newest first; the resolver binds whichever one the live
//! object's type declares, the cache remembers that per type, and the facade
//! degrades to a documented default when nothing fits.

pub mod accessor;
pub mod cache;
pub mod candidates;
pub mod diagnostics;
pub mod facade;
pub mod resolver;

pub use accessor::{selector_argument, TypedAccessor};
pub use cache::ResolutionCache;
pub use candidates::{Candidate, CandidateList, CandidateListId, Probe};
pub use diagnostics::{DiagnosticSink, MemorySink, TracingSink};
pub use facade::{CompatibilityFacade, Journal};
pub use resolver::{resolve, Binding, MemberKind, ResolvedMember, Signature};
