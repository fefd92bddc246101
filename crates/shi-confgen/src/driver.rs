//! Generation driver
//!
//! Runs parser, eligibility filter and emitter over input headers in order
//! and writes one source file per header that declares at least one
//! configuration class.

use crate::config::{FailurePolicy, GeneratorConfig};
use crate::eligibility::MarkerFilter;
use crate::emit::ClassEmitter;
use crate::error::{GenerateError, GenerateResult, UnsupportedFieldError};
use crate::layout::OutputLayout;
use crate::unit::GeneratedUnit;
use chrono::NaiveDate;
use shi_confgen_core::{DeclarationParser, ParseFailure, TypeDefinition};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub header: PathBuf,
    pub output: PathBuf,
    /// Qualified names of the classes in the file, in discovery order.
    pub classes: Vec<String>,
}

/// Outcome of a run that was not aborted.
#[derive(Debug, Default)]
pub struct GenerationReport {
    /// Files written, or that would have been written on a dry run.
    pub generated: Vec<GeneratedFile>,
    /// Inputs the parser rejected.
    pub parse_failures: Vec<ParseFailure>,
    /// Inputs without any configuration class.
    pub without_targets: Vec<PathBuf>,
    /// Violations collected under [`FailurePolicy::PerFile`].
    pub violations: Vec<UnsupportedFieldError>,
}

impl GenerationReport {
    /// Turn collected violations into an error.
    pub fn into_result(self) -> GenerateResult<Self> {
        if self.violations.is_empty() {
            Ok(self)
        } else {
            Err(GenerateError::Violations(self.violations))
        }
    }
}

/// What happened to a single input.
enum FileOutcome {
    Generated(GeneratedFile),
    NoTargets,
    Skipped(ParseFailure),
    Rejected(UnsupportedFieldError),
}

/// Generates configuration sources for headers parsed by `P`.
pub struct Generator<P> {
    parser: P,
    config: GeneratorConfig,
    filter: MarkerFilter,
    date: NaiveDate,
}

impl<P: DeclarationParser> Generator<P> {
    /// `date` is stamped into every generated banner.
    pub fn new(parser: P, config: GeneratorConfig, date: NaiveDate) -> Self {
        let filter = config.marker_filter();
        Self {
            parser,
            config,
            filter,
            date,
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Process `inputs` in order and fail if any violation was collected.
    pub fn run(&self, inputs: &[PathBuf]) -> GenerateResult<GenerationReport> {
        self.generate(inputs)?.into_result()
    }

    /// Process `inputs` in order.
    ///
    /// Under [`FailurePolicy::FailFast`] the first immutable public field
    /// ends the run with an error. Under [`FailurePolicy::PerFile`] the
    /// offending file is not written and the violation is recorded in the
    /// report.
    pub fn generate(&self, inputs: &[PathBuf]) -> GenerateResult<GenerationReport> {
        self.config.validate()?;

        let mut report = GenerationReport::default();
        for header in inputs {
            match self.process(header)? {
                FileOutcome::Generated(file) => report.generated.push(file),
                FileOutcome::NoTargets => report.without_targets.push(header.clone()),
                FileOutcome::Skipped(failure) => report.parse_failures.push(failure),
                FileOutcome::Rejected(violation) => match self.config.failure_policy {
                    FailurePolicy::FailFast => return Err(violation.into()),
                    FailurePolicy::PerFile => {
                        tracing::warn!(
                            "Not writing output for {}: {}",
                            header.display(),
                            violation
                        );
                        report.violations.push(violation);
                    }
                },
            }
        }

        tracing::info!(
            "Generated {} file(s) from {} input(s)",
            report.generated.len(),
            inputs.len()
        );
        Ok(report)
    }

    fn process(&self, header: &Path) -> GenerateResult<FileOutcome> {
        tracing::info!("Processing {}", header.display());

        let types = match self.parser.parse_file(header) {
            Ok(types) => types,
            Err(failure) => {
                tracing::warn!("Ignored {} because it failed to parse: {}", header.display(), failure);
                return Ok(FileOutcome::Skipped(failure));
            }
        };

        let unit = match self.render_unit(header, &types) {
            Ok(unit) => unit,
            Err(violation) => return Ok(FileOutcome::Rejected(violation)),
        };
        if unit.is_empty() {
            tracing::debug!("No configuration classes in {}", header.display());
            return Ok(FileOutcome::NoTargets);
        }

        let output = self.config.layout.output_path(header);
        let text = unit.render(&self.config.copyright, self.date);
        if self.config.dry_run {
            tracing::info!("Would write output to {}", output.display());
        } else {
            tracing::info!("Writing output to {}", output.display());
            write_output(&output, &text)?;
        }

        Ok(FileOutcome::Generated(GeneratedFile {
            header: header.to_path_buf(),
            output,
            classes: unit.blocks.into_iter().map(|b| b.qualified_name).collect(),
        }))
    }

    /// Emit a block for every configuration class in `types`.
    fn render_unit(
        &self,
        header: &Path,
        types: &[TypeDefinition],
    ) -> Result<GeneratedUnit, UnsupportedFieldError> {
        let include = header
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let emitter = ClassEmitter::new(include);

        let mut blocks = Vec::new();
        for ty in types {
            if !self.filter.is_target(ty) {
                continue;
            }
            tracing::info!("Generating {}", ty.qualified_name());
            blocks.push(emitter.emit(ty)?);
        }

        let unit = GeneratedUnit::new(blocks);
        for name in unit.helper_collisions() {
            tracing::warn!(
                "Helper {} is generated by more than one class in {}",
                name,
                header.display()
            );
        }
        Ok(unit)
    }
}

fn write_output(path: &Path, text: &str) -> GenerateResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| GenerateError::io(parent, e))?;
    }
    fs::write(path, text).map_err(|e| GenerateError::io(path, e))
}

fn has_glob_chars(s: &str) -> bool {
    s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
}

/// Expand command line inputs into the ordered list of headers to process.
///
/// Glob patterns are expanded in sorted order, directories are walked
/// recursively for files with the layout's header extension, and anything
/// else is taken as a file path. The first occurrence of a path wins.
pub fn collect_inputs<I>(inputs: I, layout: &OutputLayout) -> GenerateResult<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    let mut push = |path: PathBuf| {
        if seen.insert(path.clone()) {
            out.push(path);
        }
    };

    for raw in inputs {
        let input = raw.as_ref();

        if has_glob_chars(input) {
            let entries = glob::glob(input).map_err(|source| GenerateError::Pattern {
                pattern: input.to_string(),
                source,
            })?;
            let mut matched = Vec::new();
            for entry in entries {
                let path = entry.map_err(|e| {
                    let path = e.path().to_path_buf();
                    GenerateError::io(path, e.into_error())
                })?;
                if path.is_file() {
                    matched.push(path);
                }
            }
            if matched.is_empty() {
                tracing::warn!("Pattern {} matched no files", input);
            }
            matched.sort();
            matched.into_iter().for_each(&mut push);
            continue;
        }

        let path = PathBuf::from(input);
        if path.is_dir() {
            for entry in WalkDir::new(&path).sort_by_file_name() {
                let entry = entry.map_err(|source| GenerateError::Walk {
                    path: path.clone(),
                    source,
                })?;
                if entry.file_type().is_file() && layout.is_header(entry.path()) {
                    push(entry.into_path());
                }
            }
        } else {
            push(path);
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "driver/driver_tests.rs"]
mod driver_tests;
