//! Parser adapter trait

use crate::{ParseFailure, TypeDefinition};
use std::path::Path;

/// Turns one declaration file into the type definitions it contains.
///
/// Implementations must return types in the order they appear in the source;
/// generated output is ordered by it.
pub trait DeclarationParser {
    /// Parse `path` and return every type definition found in it.
    fn parse_file(&self, path: &Path) -> Result<Vec<TypeDefinition>, ParseFailure>;
}

impl<P: DeclarationParser + ?Sized> DeclarationParser for &P {
    fn parse_file(&self, path: &Path) -> Result<Vec<TypeDefinition>, ParseFailure> {
        (**self).parse_file(path)
    }
}

impl<P: DeclarationParser + ?Sized> DeclarationParser for Box<P> {
    fn parse_file(&self, path: &Path) -> Result<Vec<TypeDefinition>, ParseFailure> {
        (**self).parse_file(path)
    }
}
