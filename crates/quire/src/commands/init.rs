//! Initialize documentation in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing quire...");
    scaffold(Path::new("."), yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'quire build' to generate the site.");

    Ok(())
}

/// Write the starter config and guides under `root`. Existing files are
/// only replaced when `overwrite` is set.
fn scaffold(root: &Path, overwrite: bool) -> Result<()> {
    let docs_dir = root.join("docs");

    if docs_dir.exists() {
        if !overwrite {
            tracing::warn!("docs/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(&docs_dir).context("Failed to create docs directory")?;
    }

    let files = [
        (root.join("docs.toml"), DEFAULT_CONFIG),
        (docs_dir.join("index.md"), DEFAULT_INDEX),
        (docs_dir.join("getting-started.md"), DEFAULT_GETTING_STARTED),
    ];

    for (path, content) in files {
        if path.exists() && !overwrite {
            continue;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# quire configuration

[docs]
# Source directory for guides
dir = "docs"

# Output directory for built site
output = "dist"

# Site title
title = "API Documentation"

# Base URL (for deployment)
base_url = "/"

[graphql]
# Introspection result to document. Produce one with any GraphQL client's
# introspection query and save the JSON response here.
# schema = "schema.json"

[build]
# Enable minification
minify = true
"#;

const DEFAULT_INDEX: &str = r#"---
title: Welcome
order: 1
---

# Welcome to Your API Documentation

These pages are built by **quire** from markdown guides and your GraphQL schema.

## Getting Started

Read the [Getting Started](/getting-started/) guide to set up your project.

## Reference

Once a schema is configured, the [queries](/graphql/queries.html) and every
type in the schema get a page of their own.
"#;

const DEFAULT_GETTING_STARTED: &str = r#"---
title: Getting Started
order: 2
---

# Getting Started

## Installation

```bash
cargo install quire
```

## Project Structure

```
your-project/
├── docs/                 # Guides
│   ├── index.md         # Home page
│   └── getting-started.md
├── schema.json           # Introspection result
└── docs.toml             # Configuration
```

## Writing Guides

Create `.md` files in the `docs/` directory. Frontmatter is optional:

```markdown
---
title: Page Title
order: 3
---

# Your Content Here
```

## Adding the Schema Reference

Save an introspection result and point `docs.toml` at it:

```toml
[graphql]
schema = "schema.json"
```

Then check what will be generated:

```bash
quire catalog
```

## Building

```bash
quire build
quire serve
```
"#;
