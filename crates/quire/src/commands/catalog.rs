//! Schema catalog inspection command.

use std::fmt::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quire_schema::{type_path, CatalogKind, Catalogs, SchemaDocument};

use super::build::load_config;

/// Run the catalog command.
pub fn run(config_path: &Path, schema: Option<PathBuf>) -> Result<()> {
    let file_config = load_config(config_path)?;

    let Some(schema_path) = schema.or_else(|| file_config.graphql.schema.map(PathBuf::from))
    else {
        anyhow::bail!("No schema configured. Pass --schema or set [graphql] schema in docs.toml.");
    };

    let document = SchemaDocument::load(&schema_path)
        .with_context(|| format!("Failed to load {}", schema_path.display()))?;
    let catalogs = Catalogs::build(&document);

    print!("{}", report(&catalogs)?);

    Ok(())
}

/// Catalog listing with the page each entry renders to.
fn report(catalogs: &Catalogs<'_>) -> Result<String, fmt::Error> {
    let mut out = String::new();

    match catalogs.query_route() {
        Some(route) => writeln!(out, "Query -> {}", route.path)?,
        None => writeln!(out, "Query -> (not found)")?,
    }

    for kind in CatalogKind::ALL {
        let entries = catalogs.get(kind);
        writeln!(out, "\n{} ({})", kind.title(), entries.len())?;

        for descriptor in entries {
            let Some(name) = descriptor.name() else {
                continue;
            };
            writeln!(out, "  {} -> {}", name, type_path(kind, name))?;
        }
    }

    Ok(out)
}
