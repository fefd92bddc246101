//! shi-confgen - ArduinoJson code generator for SHI configuration classes
//!
//! Configuration classes are C++ classes deriving directly from
//! `SHI::Configuration`. For each one this crate generates:
//! - a constructor reading every public field from a `JsonObject`
//! - `fillData`, writing every public field into a `JsonObject`
//! - `getExpectedCapacity`, returning `JSON_OBJECT_SIZE(<public field count>)`
//!
//! One `<stem>_config.cpp` is written per header that declares at least one
//! configuration class.
//!
//! # Architecture
//!
//! ```text
//! header ─→ [DeclarationParser] ─→ TypeDefinition
//!                                      ↓
//!                                [MarkerFilter]
//!                                      ↓
//!                 [ClassEmitter] ─→ [classify] per public field
//!                                      ↓
//!                 GeneratedUnit ─→ OutputLayout::output_path
//! ```
//!
//! # Example
//!
//! ```
//! use shi_confgen::{ClassEmitter, MarkerFilter};
//! use shi_confgen_core::{FieldDefinition, ScalarKind, TypeDefinition, Visibility};
//!
//! let ty = TypeDefinition::new("SensorGroupConfiguration", "SHI")
//!     .with_base("Configuration")
//!     .with_field(
//!         Visibility::Public,
//!         FieldDefinition::scalar("name", ScalarKind::String).with_default("\"default\""),
//!     );
//!
//! assert!(MarkerFilter::default().is_target(&ty));
//!
//! let block = ClassEmitter::new("SHISensor.h").emit(&ty).unwrap();
//! assert_eq!(block.capacity, 1);
//! assert!(block.text.contains(r#"name(obj["name"] | "default")"#));
//! ```

mod classify;
mod config;
mod driver;
mod eligibility;
mod emit;
mod error;
mod layout;
mod unit;

pub use classify::{Classification, Helper, Strategy, classify, strategy_for};
pub use config::{FailurePolicy, GeneratorConfig};
pub use driver::{GeneratedFile, GenerationReport, Generator, collect_inputs};
pub use eligibility::{DEFAULT_MARKER, IneligibleReason, MarkerFilter, qualify};
pub use emit::{ClassBlock, ClassEmitter};
pub use error::{GenerateError, GenerateResult, UnsupportedFieldError};
pub use layout::OutputLayout;
pub use unit::{DEFAULT_COPYRIGHT, GeneratedUnit};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ClassEmitter, FailurePolicy, GenerateError, GeneratedUnit, Generator, GeneratorConfig,
        MarkerFilter, OutputLayout, UnsupportedFieldError,
    };
}
