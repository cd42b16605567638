//! External collaborators consumed by the matcher.
//!
//! The asset graph, the script/document loader, and the progress reporter are
//! all injected as traits so the core never touches storage or UI directly.
//! All three are assumed side-effect-free and authoritative for one scan.

use crate::core::registry::TypeId;

/// Read-only view over the asset dependency graph.
pub trait AssetGraphProvider {
    /// Guids of every asset of one of the given kinds under the given roots,
    /// in provider order.
    fn find_assets_by_kind(&self, kinds: &[String], roots: &[String]) -> Vec<String>;

    /// Map a guid back to an asset path.
    fn resolve_path(&self, guid: &str) -> Option<String>;

    /// Ordered transitive dependency paths of an asset.
    fn dependencies_of(&self, path: &str) -> Vec<String>;
}

/// How a matched document may be introspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Reusable object template; supports component introspection.
    Composite,
    /// Whole scene graph; matchable but not introspected.
    Scene,
}

/// Opaque handle to a loaded asset document.
#[derive(Debug, Clone)]
pub struct DocumentHandle {
    path: String,
    kind: DocumentKind,
}

impl DocumentHandle {
    pub fn new(path: impl Into<String>, kind: DocumentKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }
}

/// Reference to a component instance attached inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRef {
    /// Slash-separated object path inside the document, e.g. `Root/Arm/Gun`.
    pub node_path: String,
}

impl std::fmt::Display for InstanceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.node_path)
    }
}

/// Loads script assets and asset documents on behalf of the matcher.
pub trait AssetLoader {
    /// The compiled class of a script asset, if it compiles to exactly one
    /// registered type.
    fn compiled_class_of(&self, script_path: &str) -> Option<TypeId>;

    /// Load an asset document for introspection.
    fn load_document(&self, path: &str) -> Option<DocumentHandle>;

    /// Instances of `class` attached anywhere inside the document. Only
    /// meaningful for [`DocumentKind::Composite`] documents.
    fn introspect_components(&self, document: &DocumentHandle, class: TypeId) -> Vec<InstanceRef>;
}

/// Best-effort, purely observational scan progress sink.
pub trait ProgressReporter {
    fn report(&mut self, current: usize, total: usize, label: &str);

    /// Tear down any visible progress indication. Called exactly once per
    /// scan, on every exit path.
    fn clear(&mut self);
}

/// Assets processed between two progress reports.
pub const PROGRESS_CADENCE: usize = 25;

/// Scoped wrapper guaranteeing `clear()` on every exit path.
///
/// Dropping the guard clears the reporter, so early returns and panics tear
/// the progress indication down just like a completed scan.
pub struct ProgressGuard<'a> {
    reporter: &'a mut dyn ProgressReporter,
}

impl<'a> ProgressGuard<'a> {
    pub fn new(reporter: &'a mut dyn ProgressReporter) -> Self {
        Self { reporter }
    }

    /// Report progress at the fixed cadence. `index` is zero-based.
    pub fn tick(&mut self, index: usize, total: usize, label: &str) {
        if index % PROGRESS_CADENCE == 0 {
            self.reporter.report(index, total, label);
        }
    }
}

impl Drop for ProgressGuard<'_> {
    fn drop(&mut self) {
        self.reporter.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recording {
        reports: Vec<usize>,
        clears: usize,
    }

    impl ProgressReporter for Recording {
        fn report(&mut self, current: usize, _total: usize, _label: &str) {
            self.reports.push(current);
        }

        fn clear(&mut self) {
            self.clears += 1;
        }
    }

    #[test]
    fn test_tick_reports_at_cadence() {
        let mut recording = Recording::default();
        {
            let mut guard = ProgressGuard::new(&mut recording);
            for index in 0..60 {
                guard.tick(index, 60, "Game.EnemyHealth");
            }
        }

        assert_eq!(recording.reports, vec![0, 25, 50]);
        assert_eq!(recording.clears, 1);
    }

    #[test]
    fn test_guard_clears_without_ticks() {
        let mut recording = Recording::default();
        {
            let _guard = ProgressGuard::new(&mut recording);
        }

        assert!(recording.reports.is_empty());
        assert_eq!(recording.clears, 1);
    }

    #[test]
    fn test_guard_clears_on_unwind() {
        let mut recording = Recording::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let mut guard = ProgressGuard::new(&mut recording);
            guard.tick(0, 10, "Game.EnemyHealth");
            panic!("scan torn down");
        }));

        assert!(result.is_err());
        assert_eq!(recording.clears, 1);
    }
}
