//! Host object model: type descriptors and live objects

pub mod object;
pub mod shape;

pub use object::{DynamicObject, HostFault, HostObject, MethodCall};
pub use shape::{HostType, HostTypeId, MethodDecl, SlotDecl, SlotKind};
