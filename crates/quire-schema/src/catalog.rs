//! Catalog construction.

use std::collections::HashMap;

use crate::document::{SchemaDocument, TypeDescriptor};
use crate::kind::CatalogKind;
use crate::routes::{type_path, QUERIES_PATH};

/// Name of the root operation type documented on the queries page.
pub const ROOT_QUERY_NAME: &str = "Query";

/// Introspection meta types (`__Type`, `__Schema`, ...) start with this.
const META_PREFIX: &str = "__";

/// The five sorted catalogs of a schema plus its root query type.
///
/// Entries borrow from the [`SchemaDocument`]; nothing is copied or altered.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogs<'a> {
    entries: [Vec<&'a TypeDescriptor>; 5],
    root_query: Option<&'a TypeDescriptor>,
}

impl<'a> Catalogs<'a> {
    /// Project a schema document into its catalogs.
    ///
    /// Descriptors without a name, or whose kind is missing or outside the
    /// five catalog kinds, are skipped. The root `Query` object and every
    /// `__`-prefixed type are left out. Each catalog is sorted by name in
    /// code-point order.
    pub fn build(document: &'a SchemaDocument) -> Self {
        let entries = CatalogKind::ALL.map(|kind| collect(document, kind));

        let root_query = document
            .types()
            .iter()
            .find(|t| t.name() == Some(ROOT_QUERY_NAME));

        if root_query.is_none() {
            tracing::warn!("Schema has no {} type", ROOT_QUERY_NAME);
        }

        Self {
            entries,
            root_query,
        }
    }

    pub fn get(&self, kind: CatalogKind) -> &[&'a TypeDescriptor] {
        &self.entries[kind.index()]
    }

    pub fn objects(&self) -> &[&'a TypeDescriptor] {
        self.get(CatalogKind::Objects)
    }

    pub fn interfaces(&self) -> &[&'a TypeDescriptor] {
        self.get(CatalogKind::Interfaces)
    }

    pub fn scalars(&self) -> &[&'a TypeDescriptor] {
        self.get(CatalogKind::Scalars)
    }

    pub fn enums(&self) -> &[&'a TypeDescriptor] {
        self.get(CatalogKind::Enums)
    }

    pub fn unions(&self) -> &[&'a TypeDescriptor] {
        self.get(CatalogKind::Unions)
    }

    /// The type named `Query`, if the schema has one.
    pub fn root_query(&self) -> Option<&'a TypeDescriptor> {
        self.root_query
    }

    /// Every catalog entry, catalog by catalog.
    pub fn iter(&self) -> impl Iterator<Item = (CatalogKind, &'a TypeDescriptor)> + '_ {
        CatalogKind::ALL
            .into_iter()
            .flat_map(move |kind| self.get(kind).iter().map(move |t| (kind, *t)))
    }

    /// Total number of entries across all catalogs.
    pub fn len(&self) -> usize {
        self.entries.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find the catalog holding a type name.
    pub fn lookup(&self, name: &str) -> Option<(CatalogKind, &'a TypeDescriptor)> {
        CatalogKind::ALL.into_iter().find_map(|kind| {
            let catalog = self.get(kind);
            catalog
                .binary_search_by(|t| t.name().unwrap_or_default().cmp(name))
                .ok()
                .map(|i| (kind, catalog[i]))
        })
    }

    /// Page path for every type that has a page, keyed by type name.
    pub fn links(&self) -> TypeLinks {
        let mut paths: HashMap<String, String> = self
            .iter()
            .filter_map(|(kind, t)| t.name().map(|name| (name.to_string(), type_path(kind, name))))
            .collect();

        // A catalogued type named `Query` keeps its own page link.
        if self.root_query.is_some() {
            paths
                .entry(ROOT_QUERY_NAME.to_string())
                .or_insert_with(|| QUERIES_PATH.to_string());
        }

        TypeLinks { paths }
    }
}

/// Owned name-to-path table used when rendering cross-references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeLinks {
    paths: HashMap<String, String>,
}

impl TypeLinks {
    /// Site-absolute page path for a type, if it has a page.
    pub fn href(&self, name: &str) -> Option<&str> {
        self.paths.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn collect(document: &SchemaDocument, kind: CatalogKind) -> Vec<&TypeDescriptor> {
    let mut entries: Vec<&TypeDescriptor> = document
        .types()
        .iter()
        .filter(|t| t.kind() == Some(kind.type_kind()))
        .filter(|t| match t.name() {
            Some(name) => {
                !name.starts_with(META_PREFIX)
                    && !(kind == CatalogKind::Objects && name == ROOT_QUERY_NAME)
            }
            None => false,
        })
        .collect();

    // Stable, so the first of any duplicate names stays first.
    entries.sort_by(|a, b| a.name().cmp(&b.name()));

    entries.dedup_by(|later, earlier| {
        let duplicate = later.name() == earlier.name();
        if duplicate {
            tracing::warn!(
                "Duplicate {} type {:?}; keeping the first definition",
                kind.type_kind().as_str(),
                later.name().unwrap_or_default()
            );
        }
        duplicate
    });

    entries
}
