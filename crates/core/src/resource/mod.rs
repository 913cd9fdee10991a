//! Resource storage and templates.

/// Named prototypes new resources are derived from.
pub mod prototype;
/// In-memory resource registry.
pub mod registry;

pub use prototype::PrototypeKind;
pub use registry::Registry;
