//! Page slugs for type names.
//!
//! Every page path and every cross-reference link is derived through [`slug`],
//! so a type's page and the links pointing at it always agree.

use std::sync::LazyLock;

use regex::Regex;

// "HTTPStatus" -> "HTTP_Status"
static ACRONYM_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z\d]+)([A-Z][a-z])").unwrap());

// "AppVersion" -> "App_Version", "Field2Type" -> "Field2_Type"
static WORD_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z])").unwrap());

/// Convert a type name to its underscore slug.
///
/// Word boundaries are split with `_`, hyphens become `_`, and the result is
/// lowercased: `AppVersion` -> `app_version`, `HTTPStatus` -> `http_status`,
/// `Field2Type` -> `field2_type`.
pub fn slug(name: &str) -> String {
    let split = ACRONYM_BOUNDARY.replace_all(name, "${1}_${2}");
    let split = WORD_BOUNDARY.replace_all(&split, "${1}_${2}");

    split.replace('-', "_").to_lowercase()
}
