//! shi-confgen-core - Declaration model shared by parser adapters and the generator
//!
//! This crate provides the narrow interface between a source parser and the
//! configuration code generator:
//! - [`TypeDefinition`] and [`FieldDefinition`] describe parsed declarations
//! - [`TypeShape`] tags how a field's declared type is built
//! - [`DeclarationParser`] is the trait a concrete parser implements
//! - [`ParseFailure`] reports a file that could not be parsed

mod error;
mod ir;
mod parser;

pub use error::ParseFailure;
pub use ir::{FieldDefinition, ScalarKind, TypeDefinition, TypeShape, Visibility};
pub use parser::DeclarationParser;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        DeclarationParser, FieldDefinition, ParseFailure, ScalarKind, TypeDefinition, TypeShape,
        Visibility,
    };
}
