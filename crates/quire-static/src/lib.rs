//! Static site generator for quire documentation.
//!
//! Builds a static site from markdown guides plus a reference section
//! generated from a GraphQL introspection schema.

pub mod assets;
pub mod builder;
pub mod router;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
pub use router::{GuidePage, PageData, Registration, SiteRouter, SCHEMA_SECTION};
pub use templates::{Context, NavItem, TemplateEngine};
