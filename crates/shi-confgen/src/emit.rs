//! Per-class code generation.

use crate::classify::classify;
use crate::error::UnsupportedFieldError;
use shi_confgen_core::{TypeDefinition, Visibility};

/// Generated code for one configuration class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassBlock {
    pub qualified_name: String,
    /// Key slots reported by `getExpectedCapacity`, one per public field.
    pub capacity: usize,
    /// Names of the helpers in the block's anonymous namespace.
    pub helper_names: Vec<String>,
    pub text: String,
}

/// Emits the constructor, `fillData` and `getExpectedCapacity` of
/// configuration classes declared in one header.
#[derive(Debug, Clone)]
pub struct ClassEmitter {
    header: String,
}

impl ClassEmitter {
    /// `header` is the include spelling of the declaring header, usually its
    /// file name.
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }

    /// Generate the block for `ty` from its public fields.
    ///
    /// Fails on the first immutable public field.
    pub fn emit(&self, ty: &TypeDefinition) -> Result<ClassBlock, UnsupportedFieldError> {
        let qualified_name = ty.qualified_name();
        let fields = ty.fields_with(Visibility::Public);

        let mut initializers = Vec::with_capacity(fields.len());
        let mut writes = Vec::with_capacity(fields.len());
        let mut helpers = Vec::new();
        for field in fields {
            let classification = classify(&qualified_name, field)?;
            tracing::debug!(
                "  {}: {} as {}",
                field.name,
                field.type_name,
                classification.strategy
            );
            initializers.push(classification.initializer);
            writes.push(classification.write);
            helpers.extend(classification.helpers);
        }

        let skipped = ty.fields.values().map(Vec::len).sum::<usize>() - fields.len();
        if skipped > 0 {
            tracing::debug!("  Skipping {} non-public member(s)", skipped);
        }

        let mut code = String::new();

        code.push_str(&format!("# include \"{}\"\n", self.header));
        code.push_str(&format!(
            "// Configuration implementation for class {qualified_name}\n\n"
        ));

        code.push_str("namespace {\n");
        for (i, helper) in helpers.iter().enumerate() {
            if i > 0 {
                code.push('\n');
            }
            code.push_str(&helper.text);
        }
        code.push_str("}  // namespace\n\n");

        // Constructor
        code.push_str(&format!(
            "{qualified_name}::{}(const JsonObject &obj)",
            ty.name
        ));
        if !initializers.is_empty() {
            code.push_str(":\n");
            let list: Vec<String> = initializers
                .iter()
                .map(|init| format!("      {init}"))
                .collect();
            code.push_str(&list.join(",\n"));
        }
        code.push_str("\n  {}\n\n");

        // Document filler
        code.push_str(&format!(
            "void {qualified_name}::fillData(JsonObject &doc) const {{\n"
        ));
        for write in &writes {
            code.push_str(&format!("  {write}\n"));
        }
        code.push_str("}\n\n");

        // Capacity estimator
        code.push_str(&format!(
            "int {qualified_name}::getExpectedCapacity() const {{\n"
        ));
        code.push_str(&format!("  return JSON_OBJECT_SIZE({});\n", fields.len()));
        code.push_str("}\n");

        Ok(ClassBlock {
            qualified_name,
            capacity: fields.len(),
            helper_names: helpers.into_iter().map(|h| h.name).collect(),
            text: code,
        })
    }
}
