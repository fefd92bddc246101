//! Field classification.
//!
//! Every public field of a configuration class is serialized with one of
//! three strategies, chosen from the field's [`TypeShape`]:
//!
//! | Shape | Strategy | Read | Write |
//! |---|---|---|---|
//! | `Sequence` | [`Strategy::Sequence`] | `fFromArray(obj["f"].as<JsonArray>())` | `fToArray(f)` |
//! | `Scalar` | [`Strategy::Passthrough`] | `obj["f"].as<T>()` or `obj["f"] \| D` | `f` |
//! | `Named` | [`Strategy::Enumerated`] | `static_cast<T>(obj["f"].as<int>())` | `f` |
//!
//! Immutable fields cannot be assigned from a document and are rejected.

use crate::error::UnsupportedFieldError;
use serde::Serialize;
use shi_confgen_core::{FieldDefinition, ScalarKind, TypeShape};
use std::fmt;

/// How a field moves between the class and the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "strategy")]
pub enum Strategy {
    /// Ordered container converted through a pair of array helpers.
    Sequence { element: String },

    /// Scalar the document reads and writes directly.
    Passthrough { kind: ScalarKind },

    /// Scalar-like named type read as an integer and cast.
    Enumerated,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::Sequence { element } => write!(f, "sequence<{element}>"),
            Strategy::Passthrough { kind } => write!(f, "passthrough({})", kind.spelling()),
            Strategy::Enumerated => write!(f, "enumerated"),
        }
    }
}

/// A free function generated into the output file's anonymous namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Helper {
    pub name: String,
    pub text: String,
}

/// The code fragments generated for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub strategy: Strategy,
    /// Member initializer, e.g. `count(obj["count"].as<int>())`.
    pub initializer: String,
    /// Statement writing the field into `doc`, without indentation.
    pub write: String,
    /// Array conversion helpers; empty unless the strategy is `Sequence`.
    pub helpers: Vec<Helper>,
}

/// Pick the strategy for a field without generating any code.
pub fn strategy_for(field: &FieldDefinition) -> Strategy {
    match &field.shape {
        TypeShape::Sequence { element, .. } => Strategy::Sequence {
            element: element.clone(),
        },
        TypeShape::Scalar(kind) => Strategy::Passthrough { kind: *kind },
        TypeShape::Named => Strategy::Enumerated,
    }
}

/// Classify `field` of the type named `owner` and generate its fragments.
pub fn classify(owner: &str, field: &FieldDefinition) -> Result<Classification, UnsupportedFieldError> {
    if field.immutable {
        return Err(UnsupportedFieldError::new(owner, &field.name));
    }

    let name = &field.name;
    let ty = &field.type_name;
    let strategy = strategy_for(field);

    let classification = match &strategy {
        Strategy::Sequence { element } => {
            if field.default_value.is_some() {
                tracing::debug!(
                    "Ignoring default of sequence field {}::{}, arrays are read as sent",
                    owner,
                    name
                );
            }
            Classification {
                initializer: format!("{name}({}(obj[\"{name}\"].as<JsonArray>()))", from_array_name(name)),
                write: format!("doc[\"{name}\"] = {}({name});", to_array_name(name)),
                helpers: sequence_helpers(name, ty, element),
                strategy,
            }
        }
        Strategy::Passthrough { .. } => Classification {
            initializer: match &field.default_value {
                Some(default) => format!("{name}(obj[\"{name}\"] | {default})"),
                None => format!("{name}(obj[\"{name}\"].as<{ty}>())"),
            },
            write: format!("doc[\"{name}\"] = {name};"),
            helpers: Vec::new(),
            strategy,
        },
        Strategy::Enumerated => Classification {
            initializer: match &field.default_value {
                Some(default) => format!(
                    "{name}(static_cast<{ty}>(obj[\"{name}\"] | static_cast<int>({default})))"
                ),
                None => format!("{name}(static_cast<{ty}>(obj[\"{name}\"].as<int>()))"),
            },
            write: format!("doc[\"{name}\"] = {name};"),
            helpers: Vec::new(),
            strategy,
        },
    };
    Ok(classification)
}

pub(crate) fn from_array_name(field: &str) -> String {
    format!("{field}FromArray")
}

pub(crate) fn to_array_name(field: &str) -> String {
    format!("{field}ToArray")
}

fn sequence_helpers(field: &str, ty: &str, element: &str) -> Vec<Helper> {
    let from_name = from_array_name(field);
    let mut from = String::new();
    from.push_str(&format!("{ty} {from_name}(JsonArray array) {{\n"));
    from.push_str(&format!("  {ty} result;\n"));
    from.push_str("  for (JsonVariant elem : array) {\n");
    from.push_str(&format!("    result.push_back(elem.as<{element}>());\n"));
    from.push_str("  }\n");
    from.push_str("  return result;\n");
    from.push_str("}\n");

    let to_name = to_array_name(field);
    let mut to = String::new();
    to.push_str(&format!("JsonArray {to_name}(const {ty} &values) {{\n"));
    to.push_str("  JsonArray result;\n");
    to.push_str("  for (const auto &value : values) {\n");
    to.push_str("    result.add(value);\n");
    to.push_str("  }\n");
    to.push_str("  return result;\n");
    to.push_str("}\n");

    vec![
        Helper {
            name: from_name,
            text: from,
        },
        Helper {
            name: to_name,
            text: to,
        },
    ]
}
