//! Introspection type references (`{kind, name, ofType}` chains).

use std::fmt;

use serde_json::Value;

use crate::kind::TypeKind;

/// A field, argument or input type as introspection reports it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// Parse an introspection type reference. Returns `None` for a malformed
    /// chain (missing `ofType` or a named leaf without a name).
    pub fn from_value(value: &Value) -> Option<Self> {
        let kind = value.get("kind").and_then(Value::as_str).and_then(TypeKind::parse);
        let of_type = || value.get("ofType").and_then(Self::from_value).map(Box::new);

        match kind {
            Some(TypeKind::NonNull) => of_type().map(Self::NonNull),
            Some(TypeKind::List) => of_type().map(Self::List),
            _ => value
                .get("name")
                .and_then(Value::as_str)
                .map(|name| Self::Named(name.to_string())),
        }
    }

    /// The named type at the bottom of the chain.
    pub fn leaf(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.leaf(),
        }
    }

    /// Render in GraphQL notation, drawing the named leaf with `leaf`.
    ///
    /// `leaf` lets callers wrap the type name in a link while the list and
    /// non-null markers stay as plain text.
    pub fn render<F>(&self, leaf: &F) -> String
    where
        F: Fn(&str) -> String,
    {
        match self {
            Self::Named(name) => leaf(name),
            Self::List(inner) => format!("[{}]", inner.render(leaf)),
            Self::NonNull(inner) => format!("{}!", inner.render(leaf)),
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&|name: &str| name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_nested_chain() {
        let value = json!({
            "kind": "NON_NULL",
            "name": null,
            "ofType": {
                "kind": "LIST",
                "name": null,
                "ofType": {
                    "kind": "NON_NULL",
                    "name": null,
                    "ofType": { "kind": "OBJECT", "name": "User", "ofType": null }
                }
            }
        });

        let type_ref = TypeRef::from_value(&value).unwrap();

        assert_eq!(type_ref.to_string(), "[User!]!");
        assert_eq!(type_ref.leaf(), "User");
    }

    #[test]
    fn parses_named_type() {
        let type_ref = TypeRef::from_value(&json!({"kind": "SCALAR", "name": "String"})).unwrap();

        assert_eq!(type_ref, TypeRef::Named("String".to_string()));
    }

    #[test]
    fn rejects_broken_chain() {
        assert!(TypeRef::from_value(&json!({"kind": "LIST", "ofType": null})).is_none());
        assert!(TypeRef::from_value(&json!({"kind": "OBJECT"})).is_none());
    }

    #[test]
    fn renders_leaf_with_callback() {
        let type_ref = TypeRef::NonNull(Box::new(TypeRef::Named("ID".to_string())));

        let html = type_ref.render(&|name: &str| format!("<a>{}</a>", name));

        assert_eq!(html, "<a>ID</a>!");
    }
}
