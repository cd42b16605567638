//! Core engine: type registry, searchable catalog, and dependency matcher.

pub mod catalog;
pub mod matcher;
pub mod providers;
pub mod registry;
pub mod snapshot;

pub use catalog::{TypeCatalog, split_label};
pub use matcher::{
    AssetMatch, DEFAULT_SCRIPT_EXTENSION, MatchError, ResolvedTarget, Scanner, resolve_label,
};
pub use providers::{
    AssetGraphProvider, AssetLoader, DocumentHandle, DocumentKind, InstanceRef, PROGRESS_CADENCE,
    ProgressGuard, ProgressReporter,
};
pub use registry::{
    EnumerationError, ModuleTypes, TypeDescriptor, TypeEntry, TypeId, TypeRegistry,
};
pub use snapshot::{ProjectSnapshot, SnapshotError, SnapshotView};
