//! Generation target selection.

use shi_confgen_core::TypeDefinition;
use std::fmt;

/// Marker base a configuration class derives from.
pub const DEFAULT_MARKER: &str = "SHI::Configuration";

/// Why a type is not a generation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IneligibleReason {
    /// The type has no direct bases at all.
    NoBaseTypes,
    /// None of the direct bases is the marker.
    MarkerNotInherited,
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IneligibleReason::NoBaseTypes => write!(f, "it has no base types"),
            IneligibleReason::MarkerNotInherited => write!(f, "it does not derive directly from the marker"),
        }
    }
}

/// Selects types deriving directly from a marker base.
///
/// A base spelled without a namespace is looked up in the deriving type's
/// namespace; a qualified base is taken as written. Only direct bases are
/// inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerFilter {
    marker: String,
    accept_legacy_spelling: bool,
}

impl Default for MarkerFilter {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl MarkerFilter {
    pub fn new(marker: impl Into<String>) -> Self {
        let marker = marker.into();
        Self {
            marker: marker.trim_start_matches("::").to_string(),
            accept_legacy_spelling: false,
        }
    }

    /// Also accept the doubly prefixed spelling (`SHI::SHI::Configuration`)
    /// produced by prepending the namespace to an already qualified base.
    pub fn with_legacy_spelling(mut self, accept: bool) -> Self {
        self.accept_legacy_spelling = accept;
        self
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Decide whether `ty` is a generation target.
    pub fn check(&self, ty: &TypeDefinition) -> Result<(), IneligibleReason> {
        if ty.bases.is_empty() {
            return Err(IneligibleReason::NoBaseTypes);
        }
        if ty.bases.iter().any(|base| self.matches(&ty.namespace, base)) {
            Ok(())
        } else {
            Err(IneligibleReason::MarkerNotInherited)
        }
    }

    /// Like [`check`](Self::check), logging rejected types.
    pub fn is_target(&self, ty: &TypeDefinition) -> bool {
        match self.check(ty) {
            Ok(()) => true,
            Err(reason) => {
                tracing::info!(
                    "Ignoring {} as it is not a subclass of {}: {}",
                    ty.qualified_name(),
                    self.marker,
                    reason
                );
                false
            }
        }
    }

    fn matches(&self, namespace: &str, base: &str) -> bool {
        if qualify(namespace, base) == self.marker {
            return true;
        }
        if !self.accept_legacy_spelling {
            return false;
        }

        let Some((first, _)) = self.marker.split_once("::") else {
            return false;
        };
        let spelled = if namespace.is_empty() {
            base.to_string()
        } else {
            format!("{namespace}::{base}")
        };
        spelled == format!("{first}::{}", self.marker)
    }
}

/// Qualify `base` with `namespace` unless it already names a namespace.
pub fn qualify(namespace: &str, base: &str) -> String {
    if let Some(rooted) = base.strip_prefix("::") {
        return rooted.to_string();
    }
    let path = base.split('<').next().unwrap_or(base);
    if path.contains("::") || namespace.is_empty() {
        base.to_string()
    } else {
        format!("{namespace}::{base}")
    }
}
