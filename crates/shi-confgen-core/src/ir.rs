//! Declaration model produced by parser adapters.
//!
//! The generator never looks at source text. Everything it needs about a type
//! comes through this model:
//!
//! - [`TypeDefinition`]: a named type, its namespace, direct bases and fields
//! - [`FieldDefinition`]: one data member with its declared spelling and shape
//! - [`TypeShape`]: a structured tag describing how the declared type is built
//!
//! # Examples
//!
//! ```
//! use shi_confgen_core::{FieldDefinition, ScalarKind, TypeDefinition, Visibility};
//!
//! let sensor = TypeDefinition::new("SensorGroupConfiguration", "SHI")
//!     .with_base("Configuration")
//!     .with_field(
//!         Visibility::Public,
//!         FieldDefinition::scalar("name", ScalarKind::String).with_default("\"default\""),
//!     );
//!
//! assert_eq!(sensor.qualified_name(), "SHI::SensorGroupConfiguration");
//! assert_eq!(sensor.fields_with(Visibility::Public).len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Access level a field was declared under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::Public => write!(f, "public"),
            Visibility::Protected => write!(f, "protected"),
            Visibility::Private => write!(f, "private"),
        }
    }
}

/// Scalar types the document format represents directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarKind {
    Bool,
    Int,
    String,
    Float,
    Double,
}

impl ScalarKind {
    /// All passthrough scalars, in a fixed order.
    pub const ALL: [ScalarKind; 5] = [
        ScalarKind::Bool,
        ScalarKind::Int,
        ScalarKind::String,
        ScalarKind::Float,
        ScalarKind::Double,
    ];

    /// The C++ spelling of this scalar.
    pub fn spelling(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::String => "std::string",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
        }
    }

    /// Look up a scalar by its exact C++ spelling.
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.spelling() == spelling)
    }
}

/// Structured description of a declared field type.
///
/// Parser adapters compute this from the declaration itself so the
/// generator can dispatch on it without re-parsing type spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeShape {
    /// One of the directly representable scalars.
    Scalar(ScalarKind),

    /// Dynamically sized ordered container of `element`.
    Sequence {
        /// Container spelling without arguments, e.g. `std::vector`.
        container: String,
        /// Element type spelling, e.g. `std::string`.
        element: String,
    },

    /// Any other named type (enumerations and scalar-like custom types).
    Named,
}

/// One data member of a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Member name, unique within its type.
    pub name: String,

    /// Declared type, emitted verbatim into generated code.
    pub type_name: String,

    /// Structured shape of `type_name`.
    pub shape: TypeShape,

    /// Declared `const`/`constexpr`.
    #[serde(default)]
    pub immutable: bool,

    /// Default initializer as written in the declaration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl FieldDefinition {
    /// Create a mutable field with no default.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>, shape: TypeShape) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            shape,
            immutable: false,
            default_value: None,
        }
    }

    /// Field of a passthrough scalar type.
    pub fn scalar(name: impl Into<String>, kind: ScalarKind) -> Self {
        Self::new(name, kind.spelling(), TypeShape::Scalar(kind))
    }

    /// Field of a sequence container type, spelled `container<element>`.
    pub fn sequence(
        name: impl Into<String>,
        container: impl Into<String>,
        element: impl Into<String>,
    ) -> Self {
        let container = container.into();
        let element = element.into();
        let type_name = format!("{container}<{element}>");
        Self::new(name, type_name, TypeShape::Sequence { container, element })
    }

    /// Field of any other named type.
    pub fn named(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(name, type_name, TypeShape::Named)
    }

    /// Set the default initializer.
    pub fn with_default(mut self, default_value: impl Into<String>) -> Self {
        self.default_value = Some(default_value.into());
        self
    }

    /// Mark the field as `const`.
    pub fn mark_immutable(mut self) -> Self {
        self.immutable = true;
        self
    }
}

/// A parsed type with its direct bases and fields grouped by visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    /// Unqualified type name.
    pub name: String,

    /// Enclosing namespace, `::`-separated, empty for the global namespace.
    #[serde(default)]
    pub namespace: String,

    /// Direct base types as spelled in the declaration.
    #[serde(default)]
    pub bases: Vec<String>,

    /// Fields per visibility, each list in declaration order.
    #[serde(default)]
    pub fields: BTreeMap<Visibility, Vec<FieldDefinition>>,
}

impl TypeDefinition {
    /// Create a type with no bases and no fields.
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            bases: Vec::new(),
            fields: BTreeMap::new(),
        }
    }

    /// Add a direct base.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.bases.push(base.into());
        self
    }

    /// Append a field under `visibility`.
    pub fn with_field(mut self, visibility: Visibility, field: FieldDefinition) -> Self {
        self.push_field(visibility, field);
        self
    }

    /// Append a field under `visibility`, keeping declaration order.
    pub fn push_field(&mut self, visibility: Visibility, field: FieldDefinition) {
        self.fields.entry(visibility).or_default().push(field);
    }

    /// `namespace::name`, or just `name` in the global namespace.
    pub fn qualified_name(&self) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.namespace, self.name)
        }
    }

    /// Fields declared under `visibility`, in declaration order.
    pub fn fields_with(&self, visibility: Visibility) -> &[FieldDefinition] {
        self.fields
            .get(&visibility)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
