//! Searchable catalog of component types.
//!
//! Built once per session from the registry, re-filtered on every query
//! change. Filtering is stateless: nothing is retained beyond the current
//! query string the caller holds.

use crate::core::registry::{TypeDescriptor, TypeRegistry};

/// Display-ordered list of every searchable component type.
pub struct TypeCatalog {
    descriptors: Vec<TypeDescriptor>,
}

impl TypeCatalog {
    /// Collect every concrete behaviour subtype, ordered by namespace.
    ///
    /// The sort is stable, so types sharing a namespace keep their module
    /// discovery order.
    pub fn build(registry: &TypeRegistry) -> Self {
        let mut descriptors: Vec<TypeDescriptor> = registry
            .ids()
            .filter(|id| registry.is_concrete_behaviour(*id))
            .map(|id| registry.descriptor(id).clone())
            .collect();
        descriptors.sort_by(|a, b| a.namespace.cmp(&b.namespace));
        Self { descriptors }
    }

    pub fn descriptors(&self) -> &[TypeDescriptor] {
        &self.descriptors
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Labels whose bare type name contains `query` as a case-sensitive
    /// substring, in catalog order. An empty query returns every label.
    pub fn filter(&self, query: &str) -> Vec<String> {
        self.descriptors
            .iter()
            .filter(|descriptor| query.is_empty() || descriptor.name.contains(query))
            .map(TypeDescriptor::display_label)
            .collect()
    }
}

/// Split a display label back into (namespace, name) on the LAST dot.
///
/// Namespaces may contain dots, names never do, so `"A.B.Widget"` yields
/// `("A.B", "Widget")` and a dotless label has an empty namespace.
pub fn split_label(label: &str) -> (&str, &str) {
    match label.rfind('.') {
        Some(index) => (&label[..index], &label[index + 1..]),
        None => ("", label),
    }
}
