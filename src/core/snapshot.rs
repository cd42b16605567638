//! Project snapshot loading and the providers backed by it.
//!
//! A snapshot is a JSON dump produced by an in-engine exporter: the module
//! list with exported types, every asset with its kind and dependency
//! closure, the attached components of composite documents, and the
//! script-path to compiled-class table. The scan treats it as the read-only
//! view of asset storage; nothing here mutates or re-indexes anything.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::core::providers::{
    AssetGraphProvider, AssetLoader, DocumentHandle, DocumentKind, InstanceRef,
};
use crate::core::registry::{EnumerationError, ModuleTypes, TypeEntry, TypeId, TypeRegistry};

/// Asset kind string for introspectable composite documents.
pub const COMPOSITE_KIND: &str = "prefab";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    /// Full name of the engine's attachable-behaviour base class.
    #[serde(default = "default_behaviour_base")]
    pub behaviour_base: String,
    #[serde(default)]
    pub modules: Vec<ModuleRecord>,
    #[serde(default)]
    pub assets: Vec<AssetRecord>,
    #[serde(default)]
    pub scripts: Vec<ScriptRecord>,
}

fn default_behaviour_base() -> String {
    "UnityEngine.MonoBehaviour".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRecord {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeRecord>,
    /// Set by the exporter when the module's type list could not be read.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRecord {
    #[serde(default)]
    pub namespace: String,
    pub name: String,
    /// Full name of the direct base type.
    #[serde(default)]
    pub base: Option<String>,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub guid: String,
    pub path: String,
    /// Document kind, e.g. `prefab` or `scene`.
    pub kind: String,
    /// Transitive dependency paths, in asset-database order.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Attached components, recorded for composite documents only.
    #[serde(default)]
    pub components: Vec<ComponentRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    /// Full name of the attached component's compiled class.
    pub class: String,
    /// Slash-separated object path inside the document.
    pub node_path: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptRecord {
    pub path: String,
    /// Full name of the class this script compiles to.
    pub class: String,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse snapshot {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ProjectSnapshot {
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| SnapshotError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Build the session type registry from the snapshot's module list.
    ///
    /// Fails if any module carries an exporter enumeration error, so an
    /// incomplete type universe is never presented for search.
    pub fn type_registry(&self) -> Result<TypeRegistry, EnumerationError> {
        for module in &self.modules {
            if let Some(reason) = &module.error {
                return Err(EnumerationError {
                    module: module.name.clone(),
                    reason: reason.clone(),
                });
            }
        }

        let modules = self
            .modules
            .iter()
            .map(|module| ModuleTypes {
                name: module.name.clone(),
                types: module
                    .types
                    .iter()
                    .map(|record| TypeEntry {
                        namespace: record.namespace.clone(),
                        name: record.name.clone(),
                        base: record.base.clone(),
                        is_abstract: record.is_abstract,
                    })
                    .collect(),
            })
            .collect();

        Ok(TypeRegistry::from_modules(&self.behaviour_base, modules))
    }
}

/// Provider view over a loaded snapshot.
///
/// Indexes the snapshot once and serves both the asset-graph and loader
/// traits for the duration of one scan.
pub struct SnapshotView<'a> {
    registry: &'a TypeRegistry,
    by_guid: HashMap<&'a str, &'a AssetRecord>,
    by_path: HashMap<&'a str, &'a AssetRecord>,
    assets: &'a [AssetRecord],
    script_classes: HashMap<&'a str, &'a str>,
}

impl<'a> SnapshotView<'a> {
    pub fn new(snapshot: &'a ProjectSnapshot, registry: &'a TypeRegistry) -> Self {
        let by_guid = snapshot
            .assets
            .iter()
            .map(|asset| (asset.guid.as_str(), asset))
            .collect();
        let by_path = snapshot
            .assets
            .iter()
            .map(|asset| (asset.path.as_str(), asset))
            .collect();
        let script_classes = snapshot
            .scripts
            .iter()
            .map(|script| (script.path.as_str(), script.class.as_str()))
            .collect();
        Self {
            registry,
            by_guid,
            by_path,
            assets: &snapshot.assets,
            script_classes,
        }
    }
}

fn kind_of(kind: &str) -> DocumentKind {
    if kind == COMPOSITE_KIND {
        DocumentKind::Composite
    } else {
        DocumentKind::Scene
    }
}

fn under_root(path: &str, root: &str) -> bool {
    path == root || path.starts_with(&format!("{root}/"))
}

impl AssetGraphProvider for SnapshotView<'_> {
    fn find_assets_by_kind(&self, kinds: &[String], roots: &[String]) -> Vec<String> {
        self.assets
            .iter()
            .filter(|asset| kinds.iter().any(|kind| kind == &asset.kind))
            .filter(|asset| roots.iter().any(|root| under_root(&asset.path, root)))
            .map(|asset| asset.guid.clone())
            .collect()
    }

    fn resolve_path(&self, guid: &str) -> Option<String> {
        self.by_guid.get(guid).map(|asset| asset.path.clone())
    }

    fn dependencies_of(&self, path: &str) -> Vec<String> {
        self.by_path
            .get(path)
            .map(|asset| asset.dependencies.clone())
            .unwrap_or_default()
    }
}

impl AssetLoader for SnapshotView<'_> {
    fn compiled_class_of(&self, script_path: &str) -> Option<TypeId> {
        self.script_classes
            .get(script_path)
            .and_then(|class| self.registry.lookup(class))
    }

    fn load_document(&self, path: &str) -> Option<DocumentHandle> {
        self.by_path
            .get(path)
            .map(|asset| DocumentHandle::new(asset.path.clone(), kind_of(&asset.kind)))
    }

    fn introspect_components(&self, document: &DocumentHandle, class: TypeId) -> Vec<InstanceRef> {
        let Some(asset) = self.by_path.get(document.path()) else {
            return Vec::new();
        };
        asset
            .components
            .iter()
            .filter(|component| self.registry.lookup(&component.class) == Some(class))
            .map(|component| InstanceRef {
                node_path: component.node_path.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_snapshot() -> ProjectSnapshot {
        serde_json::from_str(
            r#"{
              "behaviourBase": "Engine.Behaviour",
              "modules": [
                {
                  "name": "Game.dll",
                  "types": [
                    { "namespace": "Game", "name": "EnemyHealth", "base": "Engine.Behaviour" }
                  ]
                }
              ],
              "assets": [
                {
                  "guid": "aaa",
                  "path": "Assets/Prefabs/Enemy.prefab",
                  "kind": "prefab",
                  "dependencies": ["Assets/Scripts/EnemyHealth.cs"],
                  "components": [
                    { "class": "Game.EnemyHealth", "nodePath": "Root/Enemy" }
                  ]
                },
                {
                  "guid": "bbb",
                  "path": "Assets/Scenes/Arena.scene",
                  "kind": "scene",
                  "dependencies": []
                },
                {
                  "guid": "ccc",
                  "path": "Packages/Shared/Bullet.prefab",
                  "kind": "prefab",
                  "dependencies": []
                }
              ],
              "scripts": [
                { "path": "Assets/Scripts/EnemyHealth.cs", "class": "Game.EnemyHealth" }
              ]
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_find_assets_filters_kind_and_root() {
        let snapshot = sample_snapshot();
        let registry = snapshot.type_registry().unwrap();
        let view = SnapshotView::new(&snapshot, &registry);

        let guids = view.find_assets_by_kind(
            &["prefab".to_string(), "scene".to_string()],
            &["Assets".to_string()],
        );
        assert_eq!(guids, vec!["aaa", "bbb"]);

        let prefabs_only =
            view.find_assets_by_kind(&["prefab".to_string()], &["Assets".to_string()]);
        assert_eq!(prefabs_only, vec!["aaa"]);
    }

    #[test]
    fn test_resolve_path_and_dependencies() {
        let snapshot = sample_snapshot();
        let registry = snapshot.type_registry().unwrap();
        let view = SnapshotView::new(&snapshot, &registry);

        assert_eq!(
            view.resolve_path("aaa").as_deref(),
            Some("Assets/Prefabs/Enemy.prefab")
        );
        assert!(view.resolve_path("zzz").is_none());
        assert_eq!(
            view.dependencies_of("Assets/Prefabs/Enemy.prefab"),
            vec!["Assets/Scripts/EnemyHealth.cs"]
        );
        assert!(view.dependencies_of("Assets/Missing.prefab").is_empty());
    }

    #[test]
    fn test_compiled_class_lookup() {
        let snapshot = sample_snapshot();
        let registry = snapshot.type_registry().unwrap();
        let view = SnapshotView::new(&snapshot, &registry);

        let handle = registry.lookup("Game.EnemyHealth").unwrap();
        assert_eq!(
            view.compiled_class_of("Assets/Scripts/EnemyHealth.cs"),
            Some(handle)
        );
        assert!(view.compiled_class_of("Assets/Scripts/Unknown.cs").is_none());
    }

    #[test]
    fn test_document_kinds() {
        let snapshot = sample_snapshot();
        let registry = snapshot.type_registry().unwrap();
        let view = SnapshotView::new(&snapshot, &registry);

        let prefab = view.load_document("Assets/Prefabs/Enemy.prefab").unwrap();
        assert_eq!(prefab.kind(), DocumentKind::Composite);

        let scene = view.load_document("Assets/Scenes/Arena.scene").unwrap();
        assert_eq!(scene.kind(), DocumentKind::Scene);
    }

    #[test]
    fn test_introspect_components() {
        let snapshot = sample_snapshot();
        let registry = snapshot.type_registry().unwrap();
        let view = SnapshotView::new(&snapshot, &registry);

        let handle = registry.lookup("Game.EnemyHealth").unwrap();
        let document = view.load_document("Assets/Prefabs/Enemy.prefab").unwrap();
        let instances = view.introspect_components(&document, handle);
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].node_path, "Root/Enemy");
    }

    #[test]
    fn test_enumeration_error_aborts_registry_build() {
        let snapshot: ProjectSnapshot = serde_json::from_str(
            r#"{
              "modules": [
                { "name": "Game.dll", "types": [] },
                { "name": "Broken.dll", "error": "type export failed" }
              ]
            }"#,
        )
        .unwrap();

        let err = snapshot.type_registry().unwrap_err();
        assert_eq!(err.module, "Broken.dll");
        assert!(err.to_string().contains("type export failed"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProjectSnapshot::load(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(matches!(err, SnapshotError::Io { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ProjectSnapshot::load(&path).unwrap_err();
        assert!(matches!(err, SnapshotError::Parse { .. }));
    }
}
