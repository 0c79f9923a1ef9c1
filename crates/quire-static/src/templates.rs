//! Template engine for rendering guides and schema reference pages.

use std::sync::Arc;

use minijinja::{Environment, Error, ErrorKind, Value};

use quire_markdown::TocEntry;
use quire_schema::{slug, TypeLinks, TypeRef};

/// A navigation item.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Child items
    pub children: Vec<NavItem>,
    /// Whether this is the active page
    pub active: bool,
}

/// One row of a catalog listing page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub href: String,
    pub description: Option<String>,
}

/// Data for a catalog listing page.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CatalogListing {
    /// Heading ("Objects", "Enums", ...)
    pub title: String,
    /// Path segment ("objects", "enums", ...)
    pub plural: String,
    pub entries: Vec<CatalogEntry>,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Meta description
    pub description: Option<String>,
    /// Rendered guide HTML
    pub content: String,
    /// Navigation items
    pub nav: Vec<NavItem>,
    /// Table of contents
    pub toc: Vec<TocEntry>,
    /// Base URL
    pub base_url: String,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
    /// Schema type descriptor, for type and query pages
    #[serde(rename = "type")]
    pub type_data: Option<Value>,
    /// Catalog listing, for catalog pages
    pub catalog: Option<CatalogListing>,
}

/// Template engine using minijinja.
///
/// Besides the page templates it registers:
/// - `slug` filter: type name to page slug
/// - `type_ref` filter: introspection type reference to linked GraphQL notation
/// - `type_href(name)`: URL of a type's page, or none
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a template engine that links type names through `links`.
    pub fn new(links: TypeLinks, base_url: &str) -> Self {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .expect("built-in templates are valid");
        }

        let links = Arc::new(links);
        let base_url = Arc::<str>::from(base_url);

        env.add_filter("slug", |name: String| slug(&name));

        {
            let links = Arc::clone(&links);
            let base_url = Arc::clone(&base_url);
            env.add_filter("type_ref", move |value: Value| -> Result<Value, Error> {
                let json = serde_json::to_value(&value)
                    .map_err(|e| Error::new(ErrorKind::InvalidOperation, e.to_string()))?;

                let Some(type_ref) = TypeRef::from_value(&json) else {
                    return Ok(Value::from(""));
                };

                let html = type_ref.render(&|name: &str| type_link(&links, &base_url, name));
                Ok(Value::from_safe_string(html))
            });
        }

        env.add_function("type_href", move |name: String| -> Option<String> {
            links.href(&name).map(|path| site_url(&base_url, path))
        });

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(&self, template: &str, context: &Context) -> Result<String, Error> {
        let tmpl = self.env.get_template(template)?;
        tmpl.render(context)
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new(TypeLinks::default(), "/")
    }
}

/// Join a site-absolute path onto the base URL.
pub fn site_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn type_link(links: &TypeLinks, base_url: &str, name: &str) -> String {
    match links.href(name) {
        Some(path) => format!(
            r#"<a href="{}" class="type-link">{}</a>"#,
            escape_html(&site_url(base_url, path)),
            escape_html(name)
        ),
        None => format!(r#"<span class="type-name">{}</span>"#, escape_html(name)),
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

const TEMPLATES: [(&str, &str); 11] = [
    ("base.html", BASE_TEMPLATE),
    ("nav.html", NAV_TEMPLATE),
    ("doc.html", DOC_TEMPLATE),
    ("graphql/fields.html", FIELDS_PARTIAL),
    ("graphql/object.html", OBJECT_TEMPLATE),
    ("graphql/interface.html", INTERFACE_TEMPLATE),
    ("graphql/scalar.html", SCALAR_TEMPLATE),
    ("graphql/enum.html", ENUM_TEMPLATE),
    ("graphql/union.html", UNION_TEMPLATE),
    ("graphql/catalog.html", CATALOG_TEMPLATE),
    ("graphql/queries.html", QUERIES_TEMPLATE),
];

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  {% if description %}<meta name="description" content="{{ description }}">
  {% endif %}{% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}<link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body data-base-url="{{ base_url }}">
  <button class="menu-btn" type="button" aria-label="Menu">&#9776;</button>
  <div class="layout">
    <nav class="sidebar">
      {% include "nav.html" %}
    </nav>
    <main class="main">
      {% block content %}{% endblock %}
    </main>
  </div>
  <script src="{{ base_url }}assets/main.js"></script>
</body>
</html>"##;

const NAV_TEMPLATE: &str = r##"<div class="nav-header">
  <a href="{{ base_url }}" class="nav-logo">{{ site_title }}</a>
</div>
<input type="search" class="nav-search" placeholder="Search" aria-label="Search">
<ul class="search-results"></ul>
<ul class="nav-list">
{% for item in nav %}
  <li class="nav-item{% if item.active %} active{% endif %}">
    <a href="{{ item.path }}">{{ item.title }}</a>
    {% if item.children %}
    <ul class="nav-children">
      {% for child in item.children %}
      <li class="nav-item{% if child.active %} active{% endif %}">
        <a href="{{ child.path }}">{{ child.title }}</a>
      </li>
      {% endfor %}
    </ul>
    {% endif %}
  </li>
{% endfor %}
</ul>"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc">
  <div class="content">
    {{ content | safe }}
  </div>
</article>

{% if toc %}
<aside class="toc">
  <h2>On this page</h2>
  <ul>
  {% for entry in toc %}
    <li class="toc-level-{{ entry.level }}">
      <a href="#{{ entry.id }}">{{ entry.title }}</a>
    </li>
  {% endfor %}
  </ul>
</aside>
{% endif %}
{% endblock %}"##;

const FIELDS_PARTIAL: &str = r##"{% if type.fields %}
<h2 id="fields">Fields</h2>
<table class="fields">
  <thead><tr><th>Name</th><th>Type</th><th>Description</th></tr></thead>
  <tbody>
  {% for field in type.fields %}
    <tr id="{{ field.name }}"{% if field.isDeprecated %} class="deprecated"{% endif %}>
      <td>
        <code>{{ field.name }}</code>
        {% if field.args %}
        <ul class="args">
          {% for arg in field.args %}
          <li><code>{{ arg.name }}</code>: {{ arg.type | type_ref }}{% if arg.defaultValue %} = <code>{{ arg.defaultValue }}</code>{% endif %}{% if arg.description %}<p>{{ arg.description }}</p>{% endif %}</li>
          {% endfor %}
        </ul>
        {% endif %}
      </td>
      <td>{{ field.type | type_ref }}</td>
      <td>
        {% if field.description %}{{ field.description }}{% endif %}
        {% if field.isDeprecated %}<p class="deprecation">Deprecated{% if field.deprecationReason %}: {{ field.deprecationReason }}{% endif %}</p>{% endif %}
      </td>
    </tr>
  {% endfor %}
  </tbody>
</table>
{% endif %}"##;

const OBJECT_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc schema-type">
  <div class="content">
    <h1>{{ type.name }} <span class="kind">object</span></h1>
    {% if type.description %}<p class="description">{{ type.description }}</p>{% endif %}
    {% if type.interfaces %}
    <h2 id="implements">Implements</h2>
    <ul class="type-list">
      {% for interface in type.interfaces %}<li>{{ interface | type_ref }}</li>{% endfor %}
    </ul>
    {% endif %}
    {% include "graphql/fields.html" %}
  </div>
</article>
{% endblock %}"##;

const INTERFACE_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc schema-type">
  <div class="content">
    <h1>{{ type.name }} <span class="kind">interface</span></h1>
    {% if type.description %}<p class="description">{{ type.description }}</p>{% endif %}
    {% if type.interfaces %}
    <h2 id="implements">Implements</h2>
    <ul class="type-list">
      {% for interface in type.interfaces %}<li>{{ interface | type_ref }}</li>{% endfor %}
    </ul>
    {% endif %}
    {% if type.possibleTypes %}
    <h2 id="implemented-by">Implemented by</h2>
    <ul class="type-list">
      {% for possible in type.possibleTypes %}<li>{{ possible | type_ref }}</li>{% endfor %}
    </ul>
    {% endif %}
    {% include "graphql/fields.html" %}
  </div>
</article>
{% endblock %}"##;

const SCALAR_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc schema-type">
  <div class="content">
    <h1>{{ type.name }} <span class="kind">scalar</span></h1>
    {% if type.description %}<p class="description">{{ type.description }}</p>{% endif %}
    {% if type.specifiedByURL %}<p>Specified by <a href="{{ type.specifiedByURL }}">{{ type.specifiedByURL }}</a></p>{% endif %}
  </div>
</article>
{% endblock %}"##;

const ENUM_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc schema-type">
  <div class="content">
    <h1>{{ type.name }} <span class="kind">enum</span></h1>
    {% if type.description %}<p class="description">{{ type.description }}</p>{% endif %}
    {% if type.enumValues %}
    <h2 id="values">Values</h2>
    <table class="fields">
      <thead><tr><th>Value</th><th>Description</th></tr></thead>
      <tbody>
      {% for value in type.enumValues %}
        <tr id="{{ value.name }}"{% if value.isDeprecated %} class="deprecated"{% endif %}>
          <td><code>{{ value.name }}</code></td>
          <td>
            {% if value.description %}{{ value.description }}{% endif %}
            {% if value.isDeprecated %}<p class="deprecation">Deprecated{% if value.deprecationReason %}: {{ value.deprecationReason }}{% endif %}</p>{% endif %}
          </td>
        </tr>
      {% endfor %}
      </tbody>
    </table>
    {% endif %}
  </div>
</article>
{% endblock %}"##;

const UNION_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc schema-type">
  <div class="content">
    <h1>{{ type.name }} <span class="kind">union</span></h1>
    {% if type.description %}<p class="description">{{ type.description }}</p>{% endif %}
    {% if type.possibleTypes %}
    <h2 id="possible-types">Possible types</h2>
    <ul class="type-list">
      {% for possible in type.possibleTypes %}<li>{{ possible | type_ref }}</li>{% endfor %}
    </ul>
    {% endif %}
  </div>
</article>
{% endblock %}"##;

const CATALOG_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc catalog">
  <div class="content">
    <h1>{{ catalog.title }}</h1>
    {% if catalog.entries %}
    <dl class="catalog-list">
      {% for entry in catalog.entries %}
      <dt id="{{ entry.name | slug }}"><a href="{{ entry.href }}">{{ entry.name }}</a></dt>
      <dd>{% if entry.description %}{{ entry.description }}{% endif %}</dd>
      {% endfor %}
    </dl>
    {% else %}
    <p class="empty">This schema defines no {{ catalog.plural }}.</p>
    {% endif %}
  </div>
</article>
{% endblock %}"##;

const QUERIES_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc schema-type">
  <div class="content">
    <h1>Queries</h1>
    {% if type.description %}<p class="description">{{ type.description }}</p>{% endif %}
    {% include "graphql/fields.html" %}
  </div>
</article>
{% endblock %}"##;

#[cfg(test)]
mod tests {
    use super::*;
    use quire_schema::{Catalogs, SchemaDocument};

    fn context(title: &str) -> Context {
        Context {
            title: title.to_string(),
            site_title: "API Docs".to_string(),
            description: None,
            content: String::new(),
            nav: vec![],
            toc: vec![],
            base_url: "/".to_string(),
            styles: vec![],
            type_data: None,
            catalog: None,
        }
    }

    const SCHEMA: &str = r#"{"data": {"__schema": {"types": [
        {"kind": "OBJECT", "name": "Query", "fields": [
            {"name": "viewer", "args": [], "isDeprecated": false,
             "type": {"kind": "NON_NULL", "name": null, "ofType": {"kind": "OBJECT", "name": "User", "ofType": null}}}
        ]},
        {"kind": "OBJECT", "name": "User", "description": "A person", "interfaces": [
            {"kind": "INTERFACE", "name": "Node", "ofType": null}
        ], "fields": [
            {"name": "id", "description": "Global ID", "args": [], "isDeprecated": false,
             "type": {"kind": "NON_NULL", "name": null, "ofType": {"kind": "SCALAR", "name": "ID", "ofType": null}}},
            {"name": "login", "args": [], "isDeprecated": true, "deprecationReason": "Use handle",
             "type": {"kind": "SCALAR", "name": "String", "ofType": null}},
            {"name": "repos", "isDeprecated": false,
             "args": [{"name": "first", "defaultValue": "10",
                       "type": {"kind": "SCALAR", "name": "Int", "ofType": null}}],
             "type": {"kind": "LIST", "name": null, "ofType": {"kind": "INPUT_OBJECT", "name": "Filter", "ofType": null}}}
        ]},
        {"kind": "INTERFACE", "name": "Node"},
        {"kind": "SCALAR", "name": "ID"},
        {"kind": "ENUM", "name": "Role", "enumValues": [
            {"name": "ADMIN", "description": "Full access", "isDeprecated": false}
        ]}
    ]}}}"#;

    #[test]
    fn renders_basic_page() {
        let engine = TemplateEngine::default();

        let mut ctx = context("Introduction");
        ctx.content = "<p>Hello world</p>".to_string();

        let html = engine.render_page("doc.html", &ctx).unwrap();

        assert!(html.contains("<title>Introduction - API Docs</title>"));
        assert!(html.contains("<p>Hello world</p>"));
    }

    #[test]
    fn renders_navigation() {
        let engine = TemplateEngine::default();

        let mut ctx = context("Home");
        ctx.nav = vec![
            NavItem {
                title: "Home".to_string(),
                path: "/".to_string(),
                children: vec![],
                active: true,
            },
            NavItem {
                title: "GraphQL".to_string(),
                path: "/graphql/objects.html".to_string(),
                children: vec![NavItem {
                    title: "Objects".to_string(),
                    path: "/graphql/objects.html".to_string(),
                    children: vec![],
                    active: false,
                }],
                active: false,
            },
        ];

        let html = engine.render_page("doc.html", &ctx).unwrap();

        assert!(html.contains(r#"<li class="nav-item active">"#));
        assert!(html.contains("GraphQL"));
        assert!(html.contains("Objects"));
    }

    #[test]
    fn renders_object_with_linked_types() {
        let doc = SchemaDocument::from_json(SCHEMA).unwrap();
        let catalogs = Catalogs::build(&doc);
        let engine = TemplateEngine::new(catalogs.links(), "/docs/");

        let mut ctx = context("User");
        ctx.type_data = Some(Value::from_serialize(catalogs.objects()[0]));

        let html = engine.render_page("graphql/object.html", &ctx).unwrap();

        assert!(html.contains("A person"));
        assert!(html.contains(
            r#"<a href="/docs/graphql/scalars/id.html" class="type-link">ID</a>!"#
        ));
        assert!(html.contains(
            r#"<a href="/docs/graphql/interfaces/node.html" class="type-link">Node</a>"#
        ));
        // Built-in scalars and input objects have no page.
        assert!(html.contains(r#"<span class="type-name">String</span>"#));
        assert!(html.contains(r#"[<span class="type-name">Filter</span>]"#));
        assert!(html.contains("Deprecated: Use handle"));
        assert!(html.contains("<code>10</code>"));
    }

    #[test]
    fn renders_enum_values() {
        let doc = SchemaDocument::from_json(SCHEMA).unwrap();
        let catalogs = Catalogs::build(&doc);
        let engine = TemplateEngine::new(catalogs.links(), "/");

        let mut ctx = context("Role");
        ctx.type_data = Some(Value::from_serialize(catalogs.enums()[0]));

        let html = engine.render_page("graphql/enum.html", &ctx).unwrap();

        assert!(html.contains("<code>ADMIN</code>"));
        assert!(html.contains("Full access"));
    }

    #[test]
    fn renders_interface_relations() {
        let doc = SchemaDocument::from_json(
            r#"{"__schema": {"types": [
                {"kind": "INTERFACE", "name": "Node"},
                {"kind": "INTERFACE", "name": "Actor",
                 "interfaces": [{"kind": "INTERFACE", "name": "Node", "ofType": null}],
                 "possibleTypes": [{"kind": "OBJECT", "name": "Bot", "ofType": null}]},
                {"kind": "OBJECT", "name": "Bot"}
            ]}}"#,
        )
        .unwrap();
        let catalogs = Catalogs::build(&doc);
        let engine = TemplateEngine::new(catalogs.links(), "/");

        let mut ctx = context("Actor");
        ctx.type_data = Some(Value::from_serialize(catalogs.interfaces()[0]));

        let html = engine.render_page("graphql/interface.html", &ctx).unwrap();

        assert!(html.contains(r#"<h2 id="implements">Implements</h2>"#));
        assert!(html.contains(
            r#"<a href="/graphql/interfaces/node.html" class="type-link">Node</a>"#
        ));
        assert!(html.contains(r#"<h2 id="implemented-by">Implemented by</h2>"#));
        assert!(html.contains(r#"<a href="/graphql/objects/bot.html" class="type-link">Bot</a>"#));
    }

    #[test]
    fn renders_queries_page() {
        let doc = SchemaDocument::from_json(SCHEMA).unwrap();
        let catalogs = Catalogs::build(&doc);
        let engine = TemplateEngine::new(catalogs.links(), "/");

        let mut ctx = context("Queries");
        ctx.type_data = catalogs.root_query().map(Value::from_serialize);

        let html = engine.render_page("graphql/queries.html", &ctx).unwrap();

        assert!(html.contains("<code>viewer</code>"));
        assert!(html.contains(r#"<a href="/graphql/objects/user.html" class="type-link">User</a>!"#));
    }

    #[test]
    fn renders_empty_catalog() {
        let engine = TemplateEngine::default();

        let mut ctx = context("Unions");
        ctx.catalog = Some(CatalogListing {
            title: "Unions".to_string(),
            plural: "unions".to_string(),
            entries: vec![],
        });

        let html = engine.render_page("graphql/catalog.html", &ctx).unwrap();

        assert!(html.contains("This schema defines no unions."));
    }

    #[test]
    fn renders_catalog_entries() {
        let engine = TemplateEngine::default();

        let mut ctx = context("Objects");
        ctx.catalog = Some(CatalogListing {
            title: "Objects".to_string(),
            plural: "objects".to_string(),
            entries: vec![CatalogEntry {
                name: "AppVersion".to_string(),
                href: "/graphql/objects/app_version.html".to_string(),
                description: Some("A release".to_string()),
            }],
        });

        let html = engine.render_page("graphql/catalog.html", &ctx).unwrap();

        assert!(html.contains(r#"<dt id="app_version">"#));
        assert!(html.contains(">AppVersion</a>"));
        assert!(html.contains("A release"));
    }

    #[test]
    fn type_href_function_resolves_links() {
        let doc = SchemaDocument::from_json(SCHEMA).unwrap();
        let catalogs = Catalogs::build(&doc);
        let mut engine = TemplateEngine::new(catalogs.links(), "/");
        engine
            .env
            .add_template(
                "href.txt",
                "{{ type_href('Role') }}|{% if type_href('Nope') is none %}missing{% endif %}",
            )
            .unwrap();

        let text = engine.render_page("href.txt", &context("Links")).unwrap();

        assert_eq!(text, "/graphql/enums/role.html|missing");
    }

    #[test]
    fn joins_site_urls() {
        assert_eq!(site_url("/", "/graphql/objects.html"), "/graphql/objects.html");
        assert_eq!(site_url("/docs/", "/graphql/objects.html"), "/docs/graphql/objects.html");
        assert_eq!(site_url("https://x.dev", "/a.html"), "https://x.dev/a.html");
    }
}
