//! shi-confgen-cpp - C++ header adapter for shi-confgen
//!
//! [`HeaderParser`] implements [`DeclarationParser`] for C++ headers. It is a
//! declaration scanner rather than a compiler front end: it tracks
//! namespaces and class bodies, and reports every class or struct
//! definition with its direct bases and data members.
//!
//! # Examples
//!
//! ```
//! use shi_confgen_cpp::parse_header_source;
//! use shi_confgen_core::{TypeShape, Visibility};
//!
//! let types = parse_header_source(
//!     r#"
//!     namespace SHI {
//!     class SensorGroupConfiguration : public Configuration {
//!      public:
//!       explicit SensorGroupConfiguration(const JsonObject &obj);
//!       std::string name = "default";
//!       std::vector<int> pins;
//!     };
//!     }  // namespace SHI
//!     "#,
//! )
//! .unwrap();
//!
//! let sensor = &types[0];
//! assert_eq!(sensor.qualified_name(), "SHI::SensorGroupConfiguration");
//! assert_eq!(sensor.bases, vec!["Configuration"]);
//!
//! let fields = sensor.fields_with(Visibility::Public);
//! assert_eq!(fields[0].default_value.as_deref(), Some("\"default\""));
//! assert!(matches!(fields[1].shape, TypeShape::Sequence { .. }));
//! ```

mod error;
mod lexer;
mod scanner;
mod types;

pub use error::SyntaxError;

use shi_confgen_core::{DeclarationParser, ParseFailure, TypeDefinition};
use std::fs;
use std::path::Path;

/// Parse C++ header text into type definitions, in source order.
pub fn parse_header_source(source: &str) -> Result<Vec<TypeDefinition>, SyntaxError> {
    let tokens = lexer::tokenize(source)?;
    scanner::scan(&tokens)
}

/// [`DeclarationParser`] for C++ header files.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderParser;

impl HeaderParser {
    pub fn new() -> Self {
        Self
    }
}

impl DeclarationParser for HeaderParser {
    fn parse_file(&self, path: &Path) -> Result<Vec<TypeDefinition>, ParseFailure> {
        let source = fs::read_to_string(path)
            .map_err(|e| ParseFailure::new(path, format!("cannot read file: {e}")))?;

        let types = parse_header_source(&source)
            .map_err(|e| ParseFailure::new(path, e.message).at_line(e.line))?;

        tracing::debug!("Parsed {} type(s) from {}", types.len(), path.display());
        Ok(types)
    }
}
