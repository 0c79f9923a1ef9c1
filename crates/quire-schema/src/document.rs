//! Introspection document loading.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::kind::TypeKind;

/// One named type from the introspection `types` list.
///
/// `name` and `kind` are typed; every other key is carried verbatim in
/// `payload` so templates see the descriptor exactly as the schema wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<String>,

    #[serde(flatten)]
    payload: Map<String, Value>,
}

impl TypeDescriptor {
    /// Create a descriptor with no payload beyond its name and kind.
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            kind: Some(kind.into()),
            payload: Map::new(),
        }
    }

    /// Type name, if the descriptor has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Parsed kind. `None` when the kind is absent or not a GraphQL kind.
    pub fn kind(&self) -> Option<TypeKind> {
        self.kind.as_deref().and_then(TypeKind::parse)
    }

    /// The kind string exactly as it appeared in the document.
    pub fn raw_kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.payload.get("description").and_then(Value::as_str)
    }

    /// Look up any other key of the descriptor (`fields`, `enumValues`, ...).
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
}

/// Names of the schema's root operation types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RootTypes {
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

/// A loaded introspection schema. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDocument {
    roots: RootTypes,
    types: Vec<TypeDescriptor>,
}

/// Errors that can occur when loading a schema document.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Failed to read schema {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid schema JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Schema document has no __schema object")]
    MissingSchema,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    data: Option<DataEnvelope>,

    #[serde(default, rename = "__schema")]
    schema: Option<RawSchema>,
}

#[derive(Deserialize)]
struct DataEnvelope {
    #[serde(default, rename = "__schema")]
    schema: Option<RawSchema>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    #[serde(default)]
    query_type: Option<NamedRef>,
    #[serde(default)]
    mutation_type: Option<NamedRef>,
    #[serde(default)]
    subscription_type: Option<NamedRef>,
    types: Vec<TypeDescriptor>,
}

#[derive(Deserialize)]
struct NamedRef {
    name: Option<String>,
}

impl SchemaDocument {
    /// Build a document directly from descriptors.
    pub fn new(types: Vec<TypeDescriptor>) -> Self {
        Self {
            roots: RootTypes::default(),
            types,
        }
    }

    /// Parse an introspection response.
    ///
    /// Accepts both the full `{"data": {"__schema": ...}}` response and a bare
    /// `{"__schema": ...}` object.
    pub fn from_json(source: &str) -> Result<Self, SchemaError> {
        let envelope: Envelope = serde_json::from_str(source)?;

        let raw = envelope
            .data
            .and_then(|d| d.schema)
            .or(envelope.schema)
            .ok_or(SchemaError::MissingSchema)?;

        let roots = RootTypes {
            query: raw.query_type.and_then(|r| r.name),
            mutation: raw.mutation_type.and_then(|r| r.name),
            subscription: raw.subscription_type.and_then(|r| r.name),
        };

        Ok(Self {
            roots,
            types: raw.types,
        })
    }

    /// Read and parse a schema file.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let document = Self::from_json(&content)?;
        tracing::debug!(
            "Loaded {} types from {}",
            document.types.len(),
            path.display()
        );

        Ok(document)
    }

    pub fn types(&self) -> &[TypeDescriptor] {
        &self.types
    }

    pub fn roots(&self) -> &RootTypes {
        &self.roots
    }
}

impl From<Vec<TypeDescriptor>> for SchemaDocument {
    fn from(types: Vec<TypeDescriptor>) -> Self {
        Self::new(types)
    }
}
