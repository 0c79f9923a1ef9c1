//! Page routes for the schema reference.
//!
//! The catalogs do not render anything themselves. They describe the pages
//! they need as [`PageRoute`] records, and the site builder registers them.

use serde::Serialize;

use crate::catalog::Catalogs;
use crate::document::TypeDescriptor;
use crate::kind::CatalogKind;
use crate::slug::slug;

/// Path of the root query reference page.
pub const QUERIES_PATH: &str = "/graphql/queries.html";

/// Template for a catalog listing page.
pub const CATALOG_TEMPLATE: &str = "graphql/catalog.html";

/// Template for the root query reference page.
pub const QUERIES_TEMPLATE: &str = "graphql/queries.html";

/// Site-absolute path of a type's page: `/graphql/<plural>/<slug>.html`.
pub fn type_path(kind: CatalogKind, name: &str) -> String {
    format!("/graphql/{}/{}.html", kind.plural(), slug(name))
}

/// Site-absolute path of a catalog listing page: `/graphql/<plural>.html`.
pub fn catalog_path(kind: CatalogKind) -> String {
    format!("/graphql/{}.html", kind.plural())
}

/// What a page renders.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum RouteData<'a> {
    /// One catalog entry.
    Type(&'a TypeDescriptor),
    /// The listing of a whole catalog.
    Catalog(#[serde(serialize_with = "serialize_catalog")] CatalogKind),
    /// The root query type.
    RootQuery(&'a TypeDescriptor),
}

fn serialize_catalog<S: serde::Serializer>(kind: &CatalogKind, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(kind.plural())
}

/// A page registration: where it goes, which template draws it, and its data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRoute<'a> {
    /// Site-absolute output path
    pub path: String,

    /// Template id
    pub template: &'static str,

    /// Template data
    pub data: RouteData<'a>,

    /// Leave this page out of navigation, the sitemap and the search index
    pub ignore_in_nav: bool,
}

impl<'a> Catalogs<'a> {
    /// One route per catalog entry, catalog by catalog, in name order.
    pub fn routes(&self) -> Vec<PageRoute<'a>> {
        self.iter()
            .filter_map(|(kind, descriptor)| {
                let name = descriptor.name()?;
                Some(PageRoute {
                    path: type_path(kind, name),
                    template: kind.template(),
                    data: RouteData::Type(descriptor),
                    ignore_in_nav: true,
                })
            })
            .collect()
    }

    /// One listing page per catalog, including empty ones.
    pub fn index_routes(&self) -> Vec<PageRoute<'a>> {
        CatalogKind::ALL
            .into_iter()
            .map(|kind| PageRoute {
                path: catalog_path(kind),
                template: CATALOG_TEMPLATE,
                data: RouteData::Catalog(kind),
                ignore_in_nav: false,
            })
            .collect()
    }

    /// The root query page, when the schema has a root query type.
    pub fn query_route(&self) -> Option<PageRoute<'a>> {
        self.root_query().map(|query| PageRoute {
            path: QUERIES_PATH.to_string(),
            template: QUERIES_TEMPLATE,
            data: RouteData::RootQuery(query),
            ignore_in_nav: false,
        })
    }

    /// Every schema page: the queries page, the listings, then each type.
    pub fn site_routes(&self) -> Vec<PageRoute<'a>> {
        let mut routes: Vec<PageRoute<'a>> = self.query_route().into_iter().collect();
        routes.extend(self.index_routes());
        routes.extend(self.routes());
        routes
    }
}
