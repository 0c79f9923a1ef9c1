//! GraphQL introspection schema loading and page catalogs.
//!
//! This crate reads a GraphQL introspection document and projects its types
//! into the sorted catalogs (objects, interfaces, scalars, enums, unions) that
//! drive the schema reference pages, along with the page routes for each entry.

pub mod catalog;
pub mod document;
pub mod kind;
pub mod routes;
pub mod slug;
pub mod typeref;

pub use catalog::{Catalogs, TypeLinks, ROOT_QUERY_NAME};
pub use document::{RootTypes, SchemaDocument, SchemaError, TypeDescriptor};
pub use kind::{CatalogKind, TypeKind};
pub use routes::{
    catalog_path, type_path, PageRoute, RouteData, CATALOG_TEMPLATE, QUERIES_PATH, QUERIES_TEMPLATE,
};
pub use slug::slug;
pub use typeref::TypeRef;
