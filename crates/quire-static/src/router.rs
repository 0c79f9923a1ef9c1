//! Page registration.
//!
//! Every output page, whether a markdown guide or a schema page, is registered
//! here under its site path before anything is rendered. Registering a path
//! twice keeps the later page.

use std::collections::HashMap;
use std::path::PathBuf;

use quire_markdown::Guide;
use quire_schema::{PageRoute, RouteData};

/// A markdown guide discovered in the docs directory.
#[derive(Debug)]
pub struct GuidePage {
    /// Source file path
    pub source_path: PathBuf,

    /// Relative path from docs dir
    pub relative_path: PathBuf,

    /// Site-absolute output path
    pub path: String,

    /// Parsed guide
    pub guide: Guide,
}

impl GuidePage {
    /// Display title: frontmatter title, first heading, or file stem.
    pub fn title(&self) -> String {
        self.guide
            .title()
            .map(str::to_string)
            .unwrap_or_else(|| {
                self.relative_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("Untitled")
                    .to_string()
            })
    }

    /// Navigation section, from the guide's parent directory.
    fn section(&self) -> Option<String> {
        self.relative_path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
            .map(capitalize)
    }

    fn hidden(&self) -> bool {
        self.guide.frontmatter.as_ref().is_some_and(|f| !f.nav)
    }
}

/// What a registered page renders.
#[derive(Debug, Clone, Copy)]
pub enum PageData<'a> {
    Guide(&'a GuidePage),
    Schema(RouteData<'a>),
}

/// A page registered under a site path.
#[derive(Debug, Clone)]
pub struct Registration<'a> {
    /// Site-absolute output path
    pub path: String,

    /// Template id
    pub template: &'static str,

    /// Template data
    pub data: PageData<'a>,

    /// Display title
    pub title: String,

    /// Navigation section, `None` for top-level pages
    pub section: Option<String>,

    /// Leave out of navigation, the sitemap and the search index
    pub ignore_in_nav: bool,
}

impl<'a> Registration<'a> {
    pub fn guide(page: &'a GuidePage) -> Self {
        Self {
            path: page.path.clone(),
            template: "doc.html",
            data: PageData::Guide(page),
            title: page.title(),
            section: page.section(),
            ignore_in_nav: page.hidden(),
        }
    }

    pub fn schema(route: PageRoute<'a>) -> Self {
        let title = match route.data {
            RouteData::Type(t) => t.name().unwrap_or("Untitled").to_string(),
            RouteData::Catalog(kind) => kind.title().to_string(),
            RouteData::RootQuery(_) => "Queries".to_string(),
        };

        Self {
            path: route.path,
            template: route.template,
            data: PageData::Schema(route.data),
            title,
            section: Some(SCHEMA_SECTION.to_string()),
            ignore_in_nav: route.ignore_in_nav,
        }
    }

    pub fn is_guide(&self) -> bool {
        matches!(self.data, PageData::Guide(_))
    }
}

/// Navigation section holding the schema reference.
pub const SCHEMA_SECTION: &str = "GraphQL";

/// Registered pages, in first-registration order.
#[derive(Debug, Default)]
pub struct SiteRouter<'a> {
    pages: Vec<Registration<'a>>,
    by_path: HashMap<String, usize>,
}

impl<'a> SiteRouter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page. If the path is already taken the new page replaces
    /// the old one, which is returned.
    pub fn register(&mut self, page: Registration<'a>) -> Option<Registration<'a>> {
        match self.by_path.get(&page.path) {
            Some(&index) => {
                tracing::warn!(
                    "Page {} registered twice; '{}' replaces '{}'",
                    page.path,
                    page.title,
                    self.pages[index].title
                );
                Some(std::mem::replace(&mut self.pages[index], page))
            }
            None => {
                self.by_path.insert(page.path.clone(), self.pages.len());
                self.pages.push(page);
                None
            }
        }
    }

    /// Register every schema route.
    pub fn register_schema(&mut self, routes: Vec<PageRoute<'a>>) {
        for route in routes {
            self.register(Registration::schema(route));
        }
    }

    pub fn pages(&self) -> &[Registration<'a>] {
        &self.pages
    }

    pub fn get(&self, path: &str) -> Option<&Registration<'a>> {
        self.by_path.get(path).map(|&i| &self.pages[i])
    }

    /// Pages that appear in navigation, the sitemap and the search index.
    pub fn listed(&self) -> impl Iterator<Item = &Registration<'a>> {
        self.pages.iter().filter(|p| !p.ignore_in_nav)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Capitalize first letter of a string.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_markdown::parse_guide;
    use quire_schema::{Catalogs, SchemaDocument, TypeDescriptor};

    fn guide(relative: &str, path: &str, source: &str) -> GuidePage {
        GuidePage {
            source_path: PathBuf::from("docs").join(relative),
            relative_path: PathBuf::from(relative),
            path: path.to_string(),
            guide: parse_guide(source).unwrap(),
        }
    }

    #[test]
    fn registers_guides_with_sections() {
        let intro = guide("index.md", "/index.html", "---\ntitle: Home\n---\n");
        let auth = guide("guides/auth.md", "/guides/auth/index.html", "# Auth");

        let mut router = SiteRouter::new();
        router.register(Registration::guide(&intro));
        router.register(Registration::guide(&auth));

        assert_eq!(router.len(), 2);
        assert_eq!(router.pages()[0].title, "Home");
        assert_eq!(router.pages()[0].section, None);
        assert_eq!(router.pages()[1].title, "Auth");
        assert_eq!(router.pages()[1].section.as_deref(), Some("Guides"));
    }

    #[test]
    fn hidden_guides_are_not_listed() {
        let hidden = guide("draft.md", "/draft/index.html", "---\ntitle: Draft\nnav: false\n---\n");

        let mut router = SiteRouter::new();
        router.register(Registration::guide(&hidden));

        assert_eq!(router.len(), 1);
        assert_eq!(router.listed().count(), 0);
    }

    #[test]
    fn later_registration_wins() {
        let doc = SchemaDocument::new(vec![
            TypeDescriptor::new("Color", "ENUM"),
            TypeDescriptor::new("color", "ENUM"),
        ]);
        let catalogs = Catalogs::build(&doc);

        let mut router = SiteRouter::new();
        router.register_schema(catalogs.routes());

        assert_eq!(router.len(), 1);
        let page = router.get("/graphql/enums/color.html").unwrap();
        assert_eq!(page.title, "color");
    }

    #[test]
    fn register_returns_replaced_page() {
        let first = guide("a.md", "/a/index.html", "# First");
        let second = guide("a.mdx", "/a/index.html", "# Second");

        let mut router = SiteRouter::new();
        assert!(router.register(Registration::guide(&first)).is_none());
        let replaced = router.register(Registration::guide(&second)).unwrap();

        assert_eq!(replaced.title, "First");
        assert_eq!(router.pages()[0].title, "Second");
    }

    #[test]
    fn schema_pages_use_schema_section() {
        let doc = SchemaDocument::new(vec![
            TypeDescriptor::new("Query", "OBJECT"),
            TypeDescriptor::new("User", "OBJECT"),
        ]);
        let catalogs = Catalogs::build(&doc);

        let mut router = SiteRouter::new();
        router.register_schema(catalogs.site_routes());

        let listed: Vec<&str> = router.listed().map(|p| p.title.as_str()).collect();
        assert_eq!(
            listed,
            vec!["Queries", "Objects", "Interfaces", "Scalars", "Enums", "Unions"]
        );
        assert!(router
            .pages()
            .iter()
            .all(|p| p.section.as_deref() == Some(SCHEMA_SECTION)));
        assert!(router.get("/graphql/objects/user.html").unwrap().ignore_in_nav);
    }
}
