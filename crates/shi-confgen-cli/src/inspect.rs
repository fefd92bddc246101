//! Inspect command implementation

use anyhow::{Context, Result};
use serde::Serialize;
use shi_confgen::{GeneratorConfig, MarkerFilter, Strategy, strategy_for};
use shi_confgen_core::{DeclarationParser, TypeDefinition, Visibility};
use shi_confgen_cpp::HeaderParser;
use std::path::Path;

/// One parsed type with what generation would do with it.
#[derive(Debug, Serialize)]
pub struct TypeReport<'a> {
    pub qualified_name: String,
    pub eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ineligible_reason: Option<String>,
    /// Strategies of the public fields, in declaration order.
    pub strategies: Vec<FieldReport<'a>>,
    pub definition: &'a TypeDefinition,
}

#[derive(Debug, Serialize)]
pub struct FieldReport<'a> {
    pub field: &'a str,
    #[serde(flatten)]
    pub strategy: Strategy,
    /// Generation fails on this field.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub immutable: bool,
}

/// Describe every type in `types` against `filter`.
pub fn build_reports<'a>(types: &'a [TypeDefinition], filter: &MarkerFilter) -> Vec<TypeReport<'a>> {
    types
        .iter()
        .map(|ty| {
            let verdict = filter.check(ty);
            TypeReport {
                qualified_name: ty.qualified_name(),
                eligible: verdict.is_ok(),
                ineligible_reason: verdict.err().map(|reason| reason.to_string()),
                strategies: ty
                    .fields_with(Visibility::Public)
                    .iter()
                    .map(|field| FieldReport {
                        field: &field.name,
                        strategy: strategy_for(field),
                        immutable: field.immutable,
                    })
                    .collect(),
                definition: ty,
            }
        })
        .collect()
}

pub fn run(header: &str, marker: Option<String>) -> Result<()> {
    let mut config = GeneratorConfig::default();
    if let Some(marker) = marker {
        config.marker_base = marker;
    }
    config.validate()?;

    let types = HeaderParser::new().parse_file(Path::new(header))?;
    let reports = build_reports(&types, &config.marker_filter());

    let json = serde_json::to_string_pretty(&reports).context("Failed to serialize report")?;
    println!("{json}");

    Ok(())
}
