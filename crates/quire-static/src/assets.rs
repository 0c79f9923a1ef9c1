//! Stylesheet and script for the generated site.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

/// Errors from asset processing.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("CSS parse error: {0}")]
    Parse(String),

    #[error("CSS minify error: {0}")]
    Print(String),
}

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// The site stylesheet.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// The site script: mobile menu, copy buttons and search.
    pub fn generate_js() -> String {
        DEFAULT_JS.to_string()
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, AssetError> {
        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| AssetError::Parse(e.to_string()))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| AssetError::Print(e.to_string()))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* quire default theme. Override any token from a configured stylesheet. */

:root {
  --background: #ffffff;
  --foreground: #1c1f24;
  --muted: #f4f5f7;
  --muted-foreground: #5b6270;
  --border: #e2e4e9;
  --primary: #2f5bd3;
  --primary-foreground: #ffffff;
  --accent: #e8edfb;
  --warning: #9a5b00;
  --radius: 0.375rem;
  --sidebar-width: 280px;
  --toc-width: 200px;
  --content-max-width: 860px;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: var(--font-sans, system-ui, -apple-system, sans-serif);
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

.layout {
  display: grid;
  grid-template-columns: var(--sidebar-width) 1fr;
  min-height: 100vh;
}

.sidebar {
  background: var(--muted);
  border-right: 1px solid var(--border);
  padding: 1.5rem;
  position: sticky;
  top: 0;
  height: 100vh;
  overflow-y: auto;
}

.nav-header {
  margin-bottom: 1rem;
}

.nav-logo {
  font-weight: 700;
  font-size: 1.25rem;
  color: var(--foreground);
  text-decoration: none;
}

.nav-search {
  width: 100%;
  padding: 0.4rem 0.6rem;
  margin-bottom: 0.5rem;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  font: inherit;
}

.search-results {
  list-style: none;
  margin-bottom: 1rem;
}

.search-results a {
  display: block;
  padding: 0.25rem 0.5rem;
  color: var(--primary);
  text-decoration: none;
}

.nav-list,
.nav-children {
  list-style: none;
}

.nav-children {
  margin-left: 1rem;
  margin-top: 0.25rem;
}

.nav-item a {
  display: block;
  padding: 0.4rem 0.75rem;
  color: var(--muted-foreground);
  text-decoration: none;
  border-radius: var(--radius);
}

.nav-item a:hover {
  background: var(--accent);
  color: var(--foreground);
}

.nav-item.active > a {
  background: var(--primary);
  color: var(--primary-foreground);
}

.main {
  display: grid;
  grid-template-columns: 1fr var(--toc-width);
  gap: 2rem;
  padding: 2rem;
  max-width: calc(var(--content-max-width) + var(--toc-width) + 4rem);
}

.doc {
  max-width: var(--content-max-width);
}

.content h1 {
  font-size: 2.25rem;
  margin-bottom: 1.25rem;
}

.content h2 {
  font-size: 1.5rem;
  margin: 2rem 0 1rem;
  padding-bottom: 0.5rem;
  border-bottom: 1px solid var(--border);
}

.content h3 {
  font-size: 1.2rem;
  margin: 1.5rem 0 0.75rem;
}

.content p,
.content ul,
.content ol {
  margin-bottom: 1rem;
}

.content ul,
.content ol {
  padding-left: 1.5rem;
}

.content a {
  color: var(--primary);
  text-underline-offset: 4px;
}

.content pre {
  background: var(--muted);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 1rem;
  overflow-x: auto;
  margin-bottom: 1rem;
  position: relative;
}

.content code {
  font-family: var(--font-mono, ui-monospace, monospace);
  font-size: 0.875em;
}

.copy-btn {
  position: absolute;
  top: 0.5rem;
  right: 0.5rem;
  padding: 0.2rem 0.6rem;
  font-size: 0.75rem;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  background: var(--background);
  cursor: pointer;
}

/* Schema reference */
.kind {
  font-size: 0.8rem;
  font-weight: 500;
  text-transform: uppercase;
  letter-spacing: 0.05em;
  vertical-align: middle;
  padding: 0.1rem 0.5rem;
  border-radius: var(--radius);
  background: var(--accent);
  color: var(--primary);
}

.description {
  font-size: 1.05rem;
  color: var(--muted-foreground);
}

.fields {
  width: 100%;
  border-collapse: collapse;
  margin-bottom: 1.5rem;
}

.fields th,
.fields td {
  text-align: left;
  vertical-align: top;
  padding: 0.6rem 0.75rem;
  border-bottom: 1px solid var(--border);
}

.fields th {
  font-size: 0.8rem;
  text-transform: uppercase;
  color: var(--muted-foreground);
}

.fields .args {
  list-style: none;
  padding-left: 0.75rem;
  margin: 0.5rem 0 0;
  font-size: 0.875rem;
}

.deprecated code {
  text-decoration: line-through;
}

.deprecation {
  color: var(--warning);
  font-size: 0.875rem;
}

.type-link {
  font-family: var(--font-mono, ui-monospace, monospace);
}

.type-name {
  font-family: var(--font-mono, ui-monospace, monospace);
  color: var(--muted-foreground);
}

.catalog-list dt {
  font-family: var(--font-mono, ui-monospace, monospace);
  margin-top: 0.75rem;
}

.catalog-list dd {
  color: var(--muted-foreground);
  margin-left: 1rem;
}

.toc {
  position: sticky;
  top: 2rem;
  align-self: start;
}

.toc h2 {
  font-size: 0.75rem;
  text-transform: uppercase;
  letter-spacing: 0.05em;
  color: var(--muted-foreground);
  margin-bottom: 0.75rem;
}

.toc ul {
  list-style: none;
}

.toc a {
  font-size: 0.875rem;
  color: var(--muted-foreground);
  text-decoration: none;
}

.toc-level-3 {
  padding-left: 1rem;
}

.toc-level-4 {
  padding-left: 2rem;
}

.menu-btn {
  display: none;
  position: fixed;
  top: 1rem;
  left: 1rem;
  z-index: 100;
  padding: 0.5rem;
  background: var(--primary);
  color: var(--primary-foreground);
  border: none;
  border-radius: var(--radius);
  cursor: pointer;
}

@media (max-width: 1024px) {
  .layout,
  .main {
    grid-template-columns: 1fr;
  }

  .sidebar {
    position: fixed;
    left: -100%;
    z-index: 50;
    transition: left 0.3s;
    width: var(--sidebar-width);
  }

  .sidebar.open {
    left: 0;
  }

  .toc {
    display: none;
  }

  .menu-btn {
    display: block;
  }
}
"#;

const DEFAULT_JS: &str = r#"(function() {
  'use strict';

  const baseUrl = document.body.dataset.baseUrl || '/';

  const menuBtn = document.querySelector('.menu-btn');
  const sidebar = document.querySelector('.sidebar');
  if (menuBtn && sidebar) {
    menuBtn.addEventListener('click', () => sidebar.classList.toggle('open'));
  }

  document.querySelectorAll('.content pre').forEach(pre => {
    const btn = document.createElement('button');
    btn.className = 'copy-btn';
    btn.type = 'button';
    btn.textContent = 'Copy';
    btn.addEventListener('click', async () => {
      const code = pre.querySelector('code');
      try {
        await navigator.clipboard.writeText((code || pre).textContent || '');
        btn.textContent = 'Copied!';
      } catch (err) {
        btn.textContent = 'Error';
      }
      setTimeout(() => { btn.textContent = 'Copy'; }, 2000);
    });
    pre.appendChild(btn);
  });

  const input = document.querySelector('.nav-search');
  const results = document.querySelector('.search-results');
  if (!input || !results) return;

  let index = null;
  const load = () => index
    ? Promise.resolve(index)
    : fetch(baseUrl + 'search-index.json').then(r => r.json()).then(data => (index = data));

  input.addEventListener('input', () => {
    const query = input.value.trim().toLowerCase();
    if (!query) {
      results.replaceChildren();
      return;
    }
    load().then(entries => {
      const hits = entries
        .filter(e => (e.title + ' ' + e.description + ' ' + e.content).toLowerCase().includes(query))
        .slice(0, 10);
      results.replaceChildren(...hits.map(hit => {
        const li = document.createElement('li');
        const a = document.createElement('a');
        a.href = hit.url;
        a.textContent = hit.title;
        li.appendChild(a);
        return li;
      }));
    });
  });
})();
"#;
