use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Names starting with this prefix belong to the introspection system itself.
pub const INTROSPECTION_PREFIX: &str = "__";

/// Kind of a named GraphQL type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

impl TypeKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::Enum => "ENUM",
            Self::InputObject => "INPUT_OBJECT",
        }
    }
}

impl FromStr for TypeKind {
    type Err = SchemaError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "SCALAR" => Ok(Self::Scalar),
            "OBJECT" => Ok(Self::Object),
            "INTERFACE" => Ok(Self::Interface),
            "UNION" => Ok(Self::Union),
            "ENUM" => Ok(Self::Enum),
            "INPUT_OBJECT" => Ok(Self::InputObject),
            _ => Err(SchemaError::UnknownKind(raw.to_string())),
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a type as seen from a field or argument.
///
/// Wrappers (`NON_NULL`, `LIST`) always carry an inner reference and only the innermost level
/// carries a name, so the "name xor ofType" rule of the introspection format holds by
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeReference {
    NonNull { of_type: Box<TypeReference> },
    List { of_type: Box<TypeReference> },
    Named { type_kind: TypeKind, name: String },
}

impl TypeReference {
    #[must_use]
    pub fn named(type_kind: TypeKind, name: impl Into<String>) -> Self {
        Self::Named {
            type_kind,
            name: name.into(),
        }
    }

    #[must_use]
    pub fn non_null(inner: Self) -> Self {
        Self::NonNull {
            of_type: Box::new(inner),
        }
    }

    #[must_use]
    pub fn list(inner: Self) -> Self {
        Self::List {
            of_type: Box::new(inner),
        }
    }

    /// Name of the innermost named type, unwrapping every `NON_NULL`/`LIST` level
    #[must_use]
    pub fn named_type(&self) -> &str {
        let mut current = self;
        loop {
            match current {
                Self::NonNull { of_type } | Self::List { of_type } => current = of_type,
                Self::Named { name, .. } => return name,
            }
        }
    }

    /// Kind of the innermost named type
    #[must_use]
    pub fn named_kind(&self) -> TypeKind {
        let mut current = self;
        loop {
            match current {
                Self::NonNull { of_type } | Self::List { of_type } => current = of_type,
                Self::Named { type_kind, .. } => return *type_kind,
            }
        }
    }

    #[must_use]
    pub const fn is_non_null(&self) -> bool {
        matches!(self, Self::NonNull { .. })
    }

    /// True if any wrapper level is a list
    #[must_use]
    pub fn is_list(&self) -> bool {
        let mut current = self;
        loop {
            match current {
                Self::List { .. } => return true,
                Self::NonNull { of_type } => current = of_type,
                Self::Named { .. } => return false,
            }
        }
    }

    /// Number of wrapper levels around the named type
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Self::NonNull { of_type } | Self::List { of_type } = current {
            depth += 1;
            current = of_type;
        }
        depth
    }
}

/// Renders SDL notation, e.g. `[Entity_Tanzu_TAS_Space_Type!]!`
impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonNull { of_type } => write!(f, "{of_type}!"),
            Self::List { of_type } => write!(f, "[{of_type}]"),
            Self::Named { name, .. } => f.write_str(name),
        }
    }
}

/// Argument of a field, or a field of an input object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeReference,
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub description: Option<String>,
    pub ty: TypeReference,
    pub args: Vec<InputValue>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: TypeKind,
    pub description: Option<String>,
    pub fields: Vec<FieldDefinition>,
    pub input_fields: Vec<InputValue>,
    pub interfaces: Vec<String>,
    pub enum_values: Vec<EnumValue>,
    pub possible_types: Vec<String>,
}

impl TypeDefinition {
    /// Bare definition without members, mostly useful for building fixtures
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            fields: Vec::new(),
            input_fields: Vec::new(),
            interfaces: Vec::new(),
            enum_values: Vec::new(),
            possible_types: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, ty: TypeReference) -> Self {
        self.fields.push(FieldDefinition {
            name: name.into(),
            description: None,
            ty,
            args: Vec::new(),
            is_deprecated: false,
            deprecation_reason: None,
        });
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    #[must_use]
    pub fn is_introspection_type(&self) -> bool {
        self.name.starts_with(INTROSPECTION_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entity_list() -> TypeReference {
        TypeReference::non_null(TypeReference::list(TypeReference::non_null(
            TypeReference::named(TypeKind::Object, "Entity_Tanzu_TAS_Space_Type"),
        )))
    }

    #[test]
    fn test_named_type_unwraps_all_wrappers() {
        let ty = entity_list();
        assert_eq!(ty.named_type(), "Entity_Tanzu_TAS_Space_Type");
        assert_eq!(ty.named_kind(), TypeKind::Object);
        assert_eq!(ty.depth(), 3);
    }

    #[test]
    fn test_sdl_rendering() {
        assert_eq!(entity_list().to_string(), "[Entity_Tanzu_TAS_Space_Type!]!");
        assert_eq!(
            TypeReference::named(TypeKind::Scalar, "String").to_string(),
            "String"
        );
    }

    #[test]
    fn test_list_and_non_null_flags() {
        let ty = entity_list();
        assert!(ty.is_non_null());
        assert!(ty.is_list());

        let plain = TypeReference::named(TypeKind::Scalar, "ID");
        assert!(!plain.is_non_null());
        assert!(!plain.is_list());
    }

    #[test]
    fn test_kind_parsing_is_case_insensitive() {
        assert_eq!(
            "input_object".parse::<TypeKind>().ok(),
            Some(TypeKind::InputObject)
        );
        assert!("NOT_A_KIND".parse::<TypeKind>().is_err());
    }
}
