//! Type registry: the closed universe of compiled types.
//!
//! The registry replaces ambient "reflect over every loaded assembly" lookups
//! with an explicit structure built once per session from an enumerable module
//! list. Both the catalog and the matcher take it as an injected dependency.

use std::collections::HashMap;

use thiserror::Error;

/// Identifies a compiled type within the registry.
///
/// The (assembly, namespace, name) triple is the key; the bare name alone is
/// not unique. Namespaces may contain dots, names never do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub assembly: String,
    pub namespace: String,
    pub name: String,
}

impl TypeDescriptor {
    /// User-facing label: `namespace.name`, or the bare name when the type
    /// lives in the global namespace.
    pub fn display_label(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.namespace, self.name)
        }
    }
}

impl std::fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_label())
    }
}

/// Opaque handle to a registered type. Valid only against the registry that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(usize);

/// One exported type as recorded by a module.
#[derive(Debug, Clone)]
pub struct TypeEntry {
    pub namespace: String,
    pub name: String,
    /// Full name (`namespace.name`) of the direct base type, if any.
    pub base: Option<String>,
    pub is_abstract: bool,
}

/// A named module (assembly) and the types it exports.
#[derive(Debug, Clone)]
pub struct ModuleTypes {
    pub name: String,
    pub types: Vec<TypeEntry>,
}

/// A module's type list could not be read.
///
/// Policy: this aborts the whole registry/catalog build rather than silently
/// truncating the search universe.
#[derive(Debug, Error)]
#[error("module '{module}' could not be enumerated: {reason}")]
pub struct EnumerationError {
    pub module: String,
    pub reason: String,
}

#[derive(Debug)]
struct RegisteredType {
    descriptor: TypeDescriptor,
    base: Option<String>,
    is_abstract: bool,
}

/// The type universe for one session, in module discovery order.
#[derive(Debug)]
pub struct TypeRegistry {
    behaviour_base: String,
    entries: Vec<RegisteredType>,
    by_full_name: HashMap<String, TypeId>,
}

impl TypeRegistry {
    /// Build a registry from an already-enumerated module list.
    ///
    /// `behaviour_base` is the full name of the engine's attachable-behaviour
    /// base class; only its concrete subtypes are eligible for search.
    pub fn from_modules(behaviour_base: &str, modules: Vec<ModuleTypes>) -> Self {
        let mut entries = Vec::new();
        let mut by_full_name = HashMap::new();

        for module in modules {
            for entry in module.types {
                let descriptor = TypeDescriptor {
                    assembly: module.name.clone(),
                    namespace: entry.namespace,
                    name: entry.name,
                };
                let id = TypeId(entries.len());
                // First registration wins when full names collide across
                // assemblies; base-chain lookups follow the same rule.
                by_full_name
                    .entry(descriptor.display_label())
                    .or_insert(id);
                entries.push(RegisteredType {
                    descriptor,
                    base: entry.base,
                    is_abstract: entry.is_abstract,
                });
            }
        }

        Self {
            behaviour_base: behaviour_base.to_string(),
            entries,
            by_full_name,
        }
    }

    /// All registered types in discovery order.
    pub fn ids(&self) -> impl Iterator<Item = TypeId> + '_ {
        (0..self.entries.len()).map(TypeId)
    }

    pub fn descriptor(&self, id: TypeId) -> &TypeDescriptor {
        &self.entries[id.0].descriptor
    }

    /// Map a descriptor back to a live handle.
    ///
    /// Mirrors the session-start catalog build: modules are filtered by
    /// assembly name first, then matched on name and namespace. `None` means
    /// the catalog is stale relative to the loaded modules.
    pub fn resolve(&self, descriptor: &TypeDescriptor) -> Option<TypeId> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.descriptor.assembly == descriptor.assembly)
            .find(|(_, entry)| {
                entry.descriptor.name == descriptor.name
                    && entry.descriptor.namespace == descriptor.namespace
            })
            .map(|(index, _)| TypeId(index))
    }

    /// Look up a type by its full name (`namespace.name`).
    pub fn lookup(&self, full_name: &str) -> Option<TypeId> {
        self.by_full_name.get(full_name).copied()
    }

    /// Whether the type is a non-abstract subtype (direct or transitive) of
    /// the behaviour base class.
    pub fn is_concrete_behaviour(&self, id: TypeId) -> bool {
        if self.entries[id.0].is_abstract {
            return false;
        }
        // Walk the base chain; cap the depth so a malformed cyclic snapshot
        // cannot hang the build.
        let mut current = self.entries[id.0].base.as_deref();
        let mut remaining = self.entries.len() + 1;
        while let Some(base) = current {
            if base == self.behaviour_base {
                return true;
            }
            if remaining == 0 {
                return false;
            }
            remaining -= 1;
            current = self
                .lookup(base)
                .and_then(|base_id| self.entries[base_id.0].base.as_deref());
        }
        false
    }
}
