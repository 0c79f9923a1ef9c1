//! Static site build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use quire_static::{BuildConfig, StaticBuilder};
use serde::Deserialize;

/// Configuration file structure (docs.toml).
#[derive(Debug, Deserialize, Default)]
pub(crate) struct ConfigFile {
    #[serde(default)]
    pub docs: DocsConfig,
    #[serde(default)]
    pub graphql: GraphqlConfig,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocsConfig {
    #[serde(default = "default_docs_dir")]
    pub dir: String,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Paths to CSS stylesheets to include
    pub styles: Option<Vec<String>>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            dir: default_docs_dir(),
            output: default_output(),
            title: default_title(),
            base_url: default_base_url(),
            styles: None,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct GraphqlConfig {
    /// Introspection JSON file
    pub schema: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BuildSettings {
    #[serde(default = "default_minify")]
    pub minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

fn default_docs_dir() -> String {
    "docs".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_title() -> String {
    "Documentation".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_minify() -> bool {
    true
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub(crate) fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    tracing::debug!("No config at {}, using defaults", path.display());
    Ok(ConfigFile::default())
}

fn build_config(
    file_config: ConfigFile,
    output: Option<PathBuf>,
    minify: Option<bool>,
    schema: Option<PathBuf>,
) -> BuildConfig {
    BuildConfig {
        docs_dir: PathBuf::from(&file_config.docs.dir),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file_config.docs.output)),
        schema_path: schema.or_else(|| file_config.graphql.schema.map(PathBuf::from)),
        minify: minify.unwrap_or(file_config.build.minify),
        base_url: file_config.docs.base_url,
        title: file_config.docs.title,
        styles: file_config.docs.styles.unwrap_or_default(),
    }
}

/// Run the build command.
pub async fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    minify: Option<bool>,
    schema: Option<PathBuf>,
) -> Result<()> {
    tracing::info!("Building static site...");

    let file_config = load_config(config_path)?;
    let config = build_config(file_config, output, minify, schema);

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} guides and {} schema pages in {}ms",
        result.guides,
        result.schema_pages,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
