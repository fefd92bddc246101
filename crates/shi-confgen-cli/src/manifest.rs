//! Manifest parsing and validation

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shi_confgen::GeneratorConfig;
use std::path::Path;

/// Default manifest file name
pub const MANIFEST_FILE: &str = "shi-confgen.toml";

/// shi-confgen.toml manifest structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Header files, directories or glob patterns, relative to the manifest
    #[serde(default)]
    pub inputs: Vec<String>,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl Manifest {
    /// Load manifest from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read manifest: {:?}", path.as_ref()))?;

        Self::from_str(&content)
    }

    /// Parse manifest from string
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse manifest")
    }

    /// Validate the manifest
    pub fn validate(&self) -> Result<()> {
        for input in &self.inputs {
            if input.trim().is_empty() {
                anyhow::bail!("Input entries cannot be empty");
            }
        }

        self.generator
            .validate()
            .context("Invalid [generator] section")?;

        Ok(())
    }

    /// Inputs with relative entries anchored at `base`, the manifest's directory.
    pub fn resolve_inputs(&self, base: &Path) -> Vec<String> {
        self.inputs
            .iter()
            .map(|input| {
                if Path::new(input).is_absolute() || base.as_os_str().is_empty() {
                    input.clone()
                } else {
                    base.join(input).to_string_lossy().into_owned()
                }
            })
            .collect()
    }
}

/// Check command implementation
pub fn check(manifest_path: Option<String>) -> Result<()> {
    let path = manifest_path.unwrap_or_else(|| MANIFEST_FILE.to_string());

    println!("Checking manifest: {}", path);

    let manifest = Manifest::from_file(&path)?;
    manifest.validate()?;

    let generator = &manifest.generator;
    println!("✓ Inputs: {}", manifest.inputs.len());
    println!("✓ Marker: {}", generator.marker_base);
    println!(
        "✓ Layout: {}/ -> {}/ (*{})",
        generator.layout.source_segment, generator.layout.generated_segment, generator.layout.suffix
    );
    println!("\nManifest is valid!");

    Ok(())
}
