//! Dependency matcher: from a picked label to the assets that use the type.
//!
//! One scan resolves the label to a live type handle, walks the corpus in
//! provider order, and matches each asset's dependency list against the
//! defining script of the target type. Loading a script to check its compiled
//! class is assumed expensive, so the defining-script path is resolved at most
//! once per scan and every later dependency is matched by plain path equality.

use std::path::Path;

use thiserror::Error;

use crate::core::catalog::split_label;
use crate::core::providers::{
    AssetGraphProvider, AssetLoader, DocumentKind, InstanceRef, ProgressGuard, ProgressReporter,
};
use crate::core::registry::{TypeDescriptor, TypeId, TypeRegistry};

/// Extension a dependency must carry to be considered a source script.
pub const DEFAULT_SCRIPT_EXTENSION: &str = ".cs";

#[derive(Debug, Error)]
pub enum MatchError {
    /// The label matched no catalog candidate. User-correctable; no scan runs.
    #[error("no component type matches '{label}'")]
    TypeNotFound { label: String },

    /// The descriptor resolved from the catalog no longer maps to a live
    /// type. Fatal for this scan; indicates a stale catalog.
    #[error("type '{descriptor}' is not present in the loaded modules (stale catalog?)")]
    RuntimeResolution { descriptor: TypeDescriptor },
}

/// Resolve a display label against the catalog candidates.
///
/// The label splits on its last dot into namespace and name; the first
/// candidate matching both exactly wins.
pub fn resolve_label<'a>(
    label: &str,
    candidates: &'a [TypeDescriptor],
) -> Result<&'a TypeDescriptor, MatchError> {
    let (namespace, name) = split_label(label);
    candidates
        .iter()
        .find(|candidate| candidate.name == name && candidate.namespace == namespace)
        .ok_or_else(|| MatchError::TypeNotFound {
            label: label.to_string(),
        })
}

/// The scan target and its lazily-resolved defining script.
///
/// `defining_script_path` is filled in at most once per scan, by the first
/// dependency whose filename matches the bare type name and whose compiled
/// class equals the target handle. Once set it is authoritative: later
/// dependencies are matched by path equality alone.
pub struct ResolvedTarget {
    pub descriptor: TypeDescriptor,
    pub defining_script_path: Option<String>,
}

impl ResolvedTarget {
    pub fn new(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            defining_script_path: None,
        }
    }

    /// Whether `dependency` is the defining script of the target type.
    pub fn matches_dependency(
        &mut self,
        dependency: &str,
        handle: TypeId,
        loader: &dyn AssetLoader,
    ) -> bool {
        if let Some(cached) = &self.defining_script_path {
            return cached == dependency;
        }

        if file_stem(dependency) != self.descriptor.name {
            return false;
        }
        if loader.compiled_class_of(dependency) == Some(handle) {
            self.defining_script_path = Some(dependency.to_string());
            return true;
        }
        false
    }
}

fn file_stem(path: &str) -> &str {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("")
}

/// One matching asset and the target-type instances attached inside it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMatch {
    pub asset_path: String,
    pub instances: Vec<InstanceRef>,
}

/// Scans the asset corpus for users of one component type.
pub struct Scanner<'a> {
    registry: &'a TypeRegistry,
    graph: &'a dyn AssetGraphProvider,
    loader: &'a dyn AssetLoader,
    script_extension: String,
}

impl<'a> Scanner<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        graph: &'a dyn AssetGraphProvider,
        loader: &'a dyn AssetLoader,
    ) -> Self {
        Self {
            registry,
            graph,
            loader,
            script_extension: DEFAULT_SCRIPT_EXTENSION.to_string(),
        }
    }

    pub fn with_script_extension(mut self, extension: &str) -> Self {
        self.script_extension = extension.to_string();
        self
    }

    /// Run one full-corpus scan for `descriptor`.
    ///
    /// Synchronous and run-to-completion; every failure is terminal for this
    /// invocation and returns no partial results. The progress reporter is
    /// cleared on every exit path.
    pub fn scan(
        &self,
        descriptor: &TypeDescriptor,
        corpus: &[String],
        reporter: &mut dyn ProgressReporter,
    ) -> Result<Vec<AssetMatch>, MatchError> {
        let mut progress = ProgressGuard::new(reporter);

        let handle =
            self.registry
                .resolve(descriptor)
                .ok_or_else(|| MatchError::RuntimeResolution {
                    descriptor: descriptor.clone(),
                })?;

        let label = descriptor.display_label();
        let mut target = ResolvedTarget::new(descriptor.clone());
        let mut matches = Vec::new();

        for (index, asset_path) in corpus.iter().enumerate() {
            progress.tick(index, corpus.len(), &label);

            for dependency in self.graph.dependencies_of(asset_path) {
                if !dependency.ends_with(&self.script_extension) {
                    continue;
                }
                if !target.matches_dependency(&dependency, handle, self.loader) {
                    continue;
                }
                matches.push(self.collect_match(asset_path, handle));
                break;
            }
        }

        matches.sort_by(|a, b| a.asset_path.cmp(&b.asset_path));
        Ok(matches)
    }

    fn collect_match(&self, asset_path: &str, handle: TypeId) -> AssetMatch {
        let instances = match self.loader.load_document(asset_path) {
            Some(document) if document.kind() == DocumentKind::Composite => {
                self.loader.introspect_components(&document, handle)
            }
            // Scene documents count as matches but are not introspected.
            _ => Vec::new(),
        };
        AssetMatch {
            asset_path: asset_path.to_string(),
            instances,
        }
    }
}
