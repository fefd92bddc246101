//! Generate command implementation

use crate::manifest::{MANIFEST_FILE, Manifest};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use shi_confgen::{FailurePolicy, GenerationReport, Generator, GeneratorConfig, collect_inputs};
use shi_confgen_cpp::HeaderParser;
use std::path::Path;

/// Options of the `generate` command.
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub inputs: Vec<String>,
    pub manifest: Option<String>,
    pub marker: Option<String>,
    pub legacy_marker: bool,
    pub date: Option<NaiveDate>,
    pub keep_going: bool,
    pub dry_run: bool,
}

pub fn run(options: GenerateOptions) -> Result<()> {
    let manifest = load_manifest(options.manifest.as_deref())?;
    let (config, inputs) = resolve(&options, manifest)?;

    let headers = collect_inputs(&inputs, &config.layout).context("Failed to collect inputs")?;
    if headers.is_empty() {
        anyhow::bail!("No header files matched {}", inputs.join(", "));
    }

    let date = options
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let dry_run = config.dry_run;
    let generator = Generator::new(HeaderParser::new(), config, date);

    let report = generator.generate(&headers)?;
    print_summary(&report, dry_run);
    report.into_result()?;

    Ok(())
}

/// Load the manifest at `path`, or `shi-confgen.toml` in the current
/// directory when it exists.
fn load_manifest(path: Option<&str>) -> Result<Option<(Manifest, String)>> {
    let path = match path {
        Some(path) => path.to_string(),
        None if Path::new(MANIFEST_FILE).is_file() => MANIFEST_FILE.to_string(),
        None => return Ok(None),
    };

    tracing::debug!("Using manifest {}", path);
    let manifest = Manifest::from_file(&path)?;
    manifest.validate()?;
    Ok(Some((manifest, path)))
}

/// Merge command line options over the manifest.
fn resolve(
    options: &GenerateOptions,
    manifest: Option<(Manifest, String)>,
) -> Result<(GeneratorConfig, Vec<String>)> {
    let (mut config, manifest_inputs) = match manifest {
        Some((manifest, path)) => {
            let base = Path::new(&path).parent().unwrap_or(Path::new(""));
            let inputs = manifest.resolve_inputs(base);
            (manifest.generator, inputs)
        }
        None => (GeneratorConfig::default(), Vec::new()),
    };

    if let Some(marker) = &options.marker {
        config.marker_base = marker.clone();
    }
    if options.legacy_marker {
        config.accept_legacy_marker = true;
    }
    if options.keep_going {
        config.failure_policy = FailurePolicy::PerFile;
    }
    config.dry_run = options.dry_run;
    config.validate()?;

    let inputs = if options.inputs.is_empty() {
        manifest_inputs
    } else {
        options.inputs.clone()
    };
    if inputs.is_empty() {
        anyhow::bail!("No inputs given and no manifest inputs found");
    }

    Ok((config, inputs))
}

fn print_summary(report: &GenerationReport, dry_run: bool) {
    let verb = if dry_run { "Would write" } else { "Wrote" };
    for file in &report.generated {
        println!(
            "✓ {} {} ({})",
            verb,
            file.output.display(),
            file.classes.join(", ")
        );
    }
    for failure in &report.parse_failures {
        println!("✗ Skipped {}", failure);
    }
    for violation in &report.violations {
        println!("✗ {}", violation);
    }
    println!(
        "\n{} generated, {} without configuration classes, {} failed to parse",
        report.generated.len(),
        report.without_targets.len(),
        report.parse_failures.len()
    );
}
