//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;
use walkdir::WalkDir;

use quire_markdown::{parse_guide, Frontmatter};
use quire_schema::{type_path, CatalogKind, Catalogs, RouteData, SchemaDocument, SchemaError};

use crate::assets::AssetPipeline;
use crate::router::{GuidePage, PageData, Registration, SiteRouter};
use crate::templates::{site_url, CatalogEntry, CatalogListing, Context, NavItem, TemplateEngine};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Source docs directory
    pub docs_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// GraphQL introspection JSON to document, if any
    pub schema_path: Option<PathBuf>,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            docs_dir: PathBuf::from("docs"),
            output_dir: PathBuf::from("dist"),
            schema_path: None,
            minify: true,
            base_url: "/".to_string(),
            title: "Documentation".to_string(),
            styles: vec![],
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of guide pages generated
    pub guides: usize,

    /// Number of schema reference pages generated
    pub schema_pages: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Failed to read docs: {0}")]
    ReadError(String),

    #[error("Failed to parse guide: {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Failed to load schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(mut config: BuildConfig) -> Self {
        config.base_url = normalize_base_url(&config.base_url);
        Self { config }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let guides = self.discover_guides()?;

        // The schema is a build precondition: a configured but unreadable
        // schema aborts the build.
        let schema = match &self.config.schema_path {
            Some(path) => Some(SchemaDocument::load(path)?),
            None => None,
        };
        let catalogs = schema.as_ref().map(Catalogs::build);

        let mut router = SiteRouter::new();
        for guide in &guides {
            router.register(Registration::guide(guide));
        }
        if let Some(catalogs) = &catalogs {
            tracing::info!(
                "Schema catalogs: {} objects, {} interfaces, {} scalars, {} enums, {} unions",
                catalogs.objects().len(),
                catalogs.interfaces().len(),
                catalogs.scalars().len(),
                catalogs.enums().len(),
                catalogs.unions().len()
            );
            router.register_schema(catalogs.site_routes());
        }

        let templates = TemplateEngine::new(
            catalogs.as_ref().map(Catalogs::links).unwrap_or_default(),
            &self.config.base_url,
        );

        let nav = self.build_navigation(&router);

        let results: Vec<Result<(), BuildError>> = router
            .pages()
            .par_iter()
            .map(|page| self.build_page(page, &nav, &templates, catalogs.as_ref()))
            .collect();

        for result in results {
            result?;
        }

        self.generate_assets()?;
        self.generate_search_index(&router)?;
        self.generate_sitemap(&router)?;

        let guide_count = router.pages().iter().filter(|p| p.is_guide()).count();

        Ok(BuildResult {
            guides: guide_count,
            schema_pages: router.len() - guide_count,
            duration_ms: start.elapsed().as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Discover all markdown guides in the docs directory.
    fn discover_guides(&self) -> Result<Vec<GuidePage>, BuildError> {
        let mut guides = Vec::new();

        if !self.config.docs_dir.exists() {
            // A schema-only site needs no guides.
            if self.config.schema_path.is_some() {
                tracing::warn!(
                    "Docs directory not found: {}; building schema reference only",
                    self.config.docs_dir.display()
                );
                return Ok(guides);
            }
            return Err(BuildError::ReadError(format!(
                "Docs directory not found: {}",
                self.config.docs_dir.display()
            )));
        }

        for entry in WalkDir::new(&self.config.docs_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if ext != "md" && ext != "mdx" {
                continue;
            }

            let content = fs::read_to_string(path)
                .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;

            let guide = parse_guide(&content).map_err(|e| BuildError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

            let relative_path = path
                .strip_prefix(&self.config.docs_dir)
                .unwrap_or(path)
                .to_path_buf();

            let site_path = guide_path(&relative_path, guide.frontmatter.as_ref());

            tracing::debug!("Found guide {} -> {}", relative_path.display(), site_path);

            guides.push(GuidePage {
                source_path: path.to_path_buf(),
                relative_path,
                path: site_path,
                guide,
            });
        }

        // Frontmatter order first, then path so the result is stable across
        // filesystems.
        guides.sort_by(|a, b| {
            let order = |g: &GuidePage| {
                g.guide
                    .frontmatter
                    .as_ref()
                    .and_then(|f| f.order)
                    .unwrap_or(999)
            };
            order(a)
                .cmp(&order(b))
                .then_with(|| a.relative_path.cmp(&b.relative_path))
        });

        Ok(guides)
    }

    /// Build navigation from the listed pages.
    ///
    /// Top-level guides come first, then one entry per section in the order
    /// sections were first seen. Schema pages form the last section.
    fn build_navigation(&self, router: &SiteRouter<'_>) -> Vec<NavItem> {
        let mut nav = Vec::new();
        let mut sections: Vec<(String, Vec<NavItem>)> = Vec::new();

        for page in router.listed() {
            let item = NavItem {
                title: page.title.clone(),
                path: self.page_url(&page.path),
                children: Vec::new(),
                active: false,
            };

            match &page.section {
                None => nav.push(item),
                Some(section) => match sections.iter_mut().find(|(name, _)| name == section) {
                    Some((_, items)) => items.push(item),
                    None => sections.push((section.clone(), vec![item])),
                },
            }
        }

        for (title, children) in sections {
            let path = children
                .first()
                .map(|c| c.path.clone())
                .unwrap_or_else(|| self.config.base_url.clone());

            nav.push(NavItem {
                title,
                path,
                children,
                active: false,
            });
        }

        nav
    }

    /// Public URL for a site path. `.../index.html` maps to its directory.
    fn page_url(&self, path: &str) -> String {
        let trimmed = path.strip_suffix("index.html").unwrap_or(path);
        site_url(&self.config.base_url, trimmed)
    }

    fn output_path(&self, path: &str) -> PathBuf {
        self.config.output_dir.join(path.trim_start_matches('/'))
    }

    fn style_urls(&self) -> Vec<String> {
        self.config
            .styles
            .iter()
            .map(|s| {
                let filename = Path::new(s)
                    .file_name()
                    .and_then(|f| f.to_str())
                    .unwrap_or("style.css");
                format!("{}assets/{}", self.config.base_url, filename)
            })
            .collect()
    }

    /// Render and write a single page.
    fn build_page(
        &self,
        page: &Registration<'_>,
        nav: &[NavItem],
        templates: &TemplateEngine,
        catalogs: Option<&Catalogs<'_>>,
    ) -> Result<(), BuildError> {
        let url = self.page_url(&page.path);

        let mut context = Context {
            title: page.title.clone(),
            site_title: self.config.title.clone(),
            description: None,
            content: String::new(),
            nav: mark_active(nav, &url),
            toc: Vec::new(),
            base_url: self.config.base_url.clone(),
            styles: self.style_urls(),
            type_data: None,
            catalog: None,
        };

        match page.data {
            PageData::Guide(guide) => {
                context.content = guide.guide.render_html();
                context.toc = guide.guide.toc.clone();
                context.description = guide
                    .guide
                    .frontmatter
                    .as_ref()
                    .and_then(|f| f.description.clone());
            }
            PageData::Schema(RouteData::Type(descriptor))
            | PageData::Schema(RouteData::RootQuery(descriptor)) => {
                context.description = descriptor.description().map(str::to_string);
                context.type_data = Some(minijinja::Value::from_serialize(descriptor));
            }
            PageData::Schema(RouteData::Catalog(kind)) => {
                context.catalog = catalogs.map(|c| self.catalog_listing(c, kind));
            }
        }

        let html = templates
            .render_page(page.template, &context)
            .map_err(|e| BuildError::TemplateError(format!("{}: {}", page.path, e)))?;

        let output_path = self.output_path(&page.path);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn catalog_listing(&self, catalogs: &Catalogs<'_>, kind: CatalogKind) -> CatalogListing {
        let entries = catalogs
            .get(kind)
            .iter()
            .filter_map(|t| {
                let name = t.name()?;
                Some(CatalogEntry {
                    name: name.to_string(),
                    href: site_url(&self.config.base_url, &type_path(kind, name)),
                    description: t.description().map(str::to_string),
                })
            })
            .collect();

        CatalogListing {
            title: kind.title().to_string(),
            plural: kind.plural().to_string(),
            entries,
        }
    }

    /// Write CSS, JS and configured stylesheets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            match AssetPipeline::minify_css(&css) {
                Ok(minified) => minified,
                Err(e) => {
                    tracing::warn!("{}; writing unminified CSS", e);
                    css
                }
            }
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("main.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        for style_path in &self.config.styles {
            let source_path = PathBuf::from(style_path);
            if !source_path.exists() {
                tracing::warn!("Stylesheet not found: {}", style_path);
                continue;
            }

            let filename = source_path
                .file_name()
                .and_then(|f| f.to_str())
                .unwrap_or("style.css");
            let content = fs::read_to_string(&source_path).map_err(|e| {
                BuildError::ReadError(format!("Failed to read stylesheet: {}", e))
            })?;
            fs::write(assets_dir.join(filename), content)
                .map_err(|e| BuildError::WriteError(e.to_string()))?;
            tracing::info!("Copied stylesheet from {}", style_path);
        }

        Ok(())
    }

    /// Write `search-index.json` for the listed pages.
    fn generate_search_index(&self, router: &SiteRouter<'_>) -> Result<(), BuildError> {
        let index: Vec<serde_json::Value> = router
            .listed()
            .map(|page| {
                let (description, content): (String, String) = match page.data {
                    PageData::Guide(guide) => (
                        guide
                            .guide
                            .frontmatter
                            .as_ref()
                            .and_then(|f: &Frontmatter| f.description.clone())
                            .unwrap_or_default(),
                        guide.guide.plain_text().chars().take(500).collect(),
                    ),
                    PageData::Schema(RouteData::RootQuery(query)) => (
                        query.description().unwrap_or_default().to_string(),
                        String::new(),
                    ),
                    PageData::Schema(_) => (String::new(), String::new()),
                };

                serde_json::json!({
                    "title": page.title,
                    "description": description,
                    "url": self.page_url(&page.path),
                    "content": content,
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(self.config.output_dir.join("search-index.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Write `sitemap.xml` and `robots.txt` for the listed pages.
    fn generate_sitemap(&self, router: &SiteRouter<'_>) -> Result<(), BuildError> {
        let urls: Vec<String> = router
            .listed()
            .map(|page| format!("  <url>\n    <loc>{}</loc>\n  </url>", self.page_url(&page.path)))
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.base_url
        );
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }
}

/// Site path for a guide.
///
/// `index.md` -> `/index.html`, `auth.md` -> `/auth/index.html`,
/// `guides/index.md` -> `/guides/index.html`. A frontmatter slug replaces the
/// derived directory.
fn guide_path(relative: &Path, frontmatter: Option<&Frontmatter>) -> String {
    if let Some(slug) = frontmatter.and_then(|f| f.slug.as_deref()) {
        let slug = slug.trim_matches('/');
        return if slug.is_empty() {
            "/index.html".to_string()
        } else {
            format!("/{}/index.html", slug)
        };
    }

    let mut segments: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(|p| p.components())
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();

    let stem = relative
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");
    if stem != "index" {
        segments.push(stem.to_string());
    }

    if segments.is_empty() {
        "/index.html".to_string()
    } else {
        format!("/{}/index.html", segments.join("/"))
    }
}

/// Base URL with exactly one trailing slash; asset and sitemap URLs are
/// appended to it directly.
fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}

/// Copy of the navigation with the item for `url` marked active.
fn mark_active(nav: &[NavItem], url: &str) -> Vec<NavItem> {
    nav.iter()
        .map(|item| {
            let children = mark_active(&item.children, url);
            NavItem {
                title: item.title.clone(),
                path: item.path.clone(),
                active: item.path == url && children.iter().all(|c| !c.active),
                children,
            }
        })
        .collect()
}
