//! GraphQL type kinds and the catalogs built from them.

/// A GraphQL `__TypeKind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

impl TypeKind {
    /// Parse an introspection kind string. Matching is case-sensitive.
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "SCALAR" => Some(Self::Scalar),
            "OBJECT" => Some(Self::Object),
            "INTERFACE" => Some(Self::Interface),
            "UNION" => Some(Self::Union),
            "ENUM" => Some(Self::Enum),
            "INPUT_OBJECT" => Some(Self::InputObject),
            "LIST" => Some(Self::List),
            "NON_NULL" => Some(Self::NonNull),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
            Self::List => "LIST",
            Self::NonNull => "NON_NULL",
        }
    }
}

/// One of the five catalogs that get a page per entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CatalogKind {
    Objects,
    Interfaces,
    Scalars,
    Enums,
    Unions,
}

impl CatalogKind {
    /// All catalogs, in page registration order.
    pub const ALL: [CatalogKind; 5] = [
        Self::Objects,
        Self::Interfaces,
        Self::Scalars,
        Self::Enums,
        Self::Unions,
    ];

    /// The type kind collected into this catalog.
    pub fn type_kind(&self) -> TypeKind {
        match self {
            Self::Objects => TypeKind::Object,
            Self::Interfaces => TypeKind::Interface,
            Self::Scalars => TypeKind::Scalar,
            Self::Enums => TypeKind::Enum,
            Self::Unions => TypeKind::Union,
        }
    }

    pub fn from_type_kind(kind: TypeKind) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.type_kind() == kind)
    }

    /// Path segment used in page URLs (`objects`, `enums`, ...).
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Objects => "objects",
            Self::Interfaces => "interfaces",
            Self::Scalars => "scalars",
            Self::Enums => "enums",
            Self::Unions => "unions",
        }
    }

    /// Heading for the catalog listing page.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Objects => "Objects",
            Self::Interfaces => "Interfaces",
            Self::Scalars => "Scalars",
            Self::Enums => "Enums",
            Self::Unions => "Unions",
        }
    }

    /// Template that renders a single entry of this catalog.
    pub fn template(&self) -> &'static str {
        match self {
            Self::Objects => "graphql/object.html",
            Self::Interfaces => "graphql/interface.html",
            Self::Scalars => "graphql/scalar.html",
            Self::Enums => "graphql/enum.html",
            Self::Unions => "graphql/union.html",
        }
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_kinds() {
        assert_eq!(TypeKind::parse("OBJECT"), Some(TypeKind::Object));
        assert_eq!(TypeKind::parse("INPUT_OBJECT"), Some(TypeKind::InputObject));
        assert_eq!(TypeKind::parse("NON_NULL"), Some(TypeKind::NonNull));
    }

    #[test]
    fn rejects_unknown_and_lowercase_kinds() {
        assert_eq!(TypeKind::parse("object"), None);
        assert_eq!(TypeKind::parse("QUERY"), None);
        assert_eq!(TypeKind::parse(""), None);
    }

    #[test]
    fn catalogs_map_to_kinds() {
        for catalog in CatalogKind::ALL {
            assert_eq!(CatalogKind::from_type_kind(catalog.type_kind()), Some(catalog));
        }
        assert_eq!(CatalogKind::from_type_kind(TypeKind::InputObject), None);
    }

    #[test]
    fn index_matches_registration_order() {
        for (i, catalog) in CatalogKind::ALL.iter().enumerate() {
            assert_eq!(catalog.index(), i);
        }
    }
}
