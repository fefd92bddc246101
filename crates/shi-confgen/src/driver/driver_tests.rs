#![allow(non_snake_case)]

use super::*;
use shi_confgen_core::{FieldDefinition, ScalarKind, Visibility};
use std::collections::HashMap;
use std::sync::Mutex;
use tempfile::TempDir;

/// Parser returning canned declarations and recording every call.
#[derive(Default)]
struct FakeParser {
    files: HashMap<PathBuf, Result<Vec<TypeDefinition>, String>>,
    calls: Mutex<Vec<PathBuf>>,
}

impl FakeParser {
    fn with(mut self, path: &Path, types: Vec<TypeDefinition>) -> Self {
        self.files.insert(path.to_path_buf(), Ok(types));
        self
    }

    fn failing(mut self, path: &Path, message: &str) -> Self {
        self.files.insert(path.to_path_buf(), Err(message.to_string()));
        self
    }

    fn calls(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().clone()
    }
}

impl DeclarationParser for FakeParser {
    fn parse_file(&self, path: &Path) -> Result<Vec<TypeDefinition>, ParseFailure> {
        self.calls.lock().unwrap().push(path.to_path_buf());
        match self.files.get(path) {
            Some(Ok(types)) => Ok(types.clone()),
            Some(Err(message)) => Err(ParseFailure::new(path, message.clone())),
            None => Err(ParseFailure::new(path, "unknown file")),
        }
    }
}

fn config_type(name: &str) -> TypeDefinition {
    TypeDefinition::new(name, "SHI")
        .with_base("Configuration")
        .with_field(Visibility::Public, FieldDefinition::scalar("name", ScalarKind::String))
}

fn plain_type(name: &str) -> TypeDefinition {
    TypeDefinition::new(name, "SHI")
        .with_field(Visibility::Public, FieldDefinition::scalar("name", ScalarKind::String))
}

fn broken_type(name: &str) -> TypeDefinition {
    config_type(name).with_field(
        Visibility::Public,
        FieldDefinition::scalar("port", ScalarKind::Int).mark_immutable(),
    )
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()
}

fn header(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join("lib").join("include").join(name)
}

fn output(dir: &TempDir, stem: &str) -> PathBuf {
    dir.path()
        .join("lib")
        .join("src")
        .join(format!("{stem}_config.cpp"))
}

fn per_file() -> GeneratorConfig {
    GeneratorConfig {
        failure_policy: FailurePolicy::PerFile,
        ..GeneratorConfig::default()
    }
}

// =============================================================================
// Generator
// =============================================================================

#[test]
fn Generator___eligible_type___writes_output_and_creates_directory() {
    let dir = TempDir::new().unwrap();
    let input = header(&dir, "A.h");
    let parser = FakeParser::default().with(&input, vec![config_type("A")]);

    let report = Generator::new(parser, GeneratorConfig::default(), date())
        .run(&[input.clone()])
        .unwrap();

    let written = fs::read_to_string(output(&dir, "A")).unwrap();
    assert!(written.contains("// Last update 2020-03-01\n"));
    assert!(written.contains("# include \"A.h\"\n"));
    assert_eq!(
        report.generated,
        vec![GeneratedFile {
            header: input,
            output: output(&dir, "A"),
            classes: vec!["SHI::A".to_string()],
        }]
    );
}

#[test]
fn Generator___no_eligible_type___writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = header(&dir, "Plain.h");
    let parser = FakeParser::default().with(&input, vec![plain_type("Plain")]);

    let report = Generator::new(parser, GeneratorConfig::default(), date())
        .run(&[input.clone()])
        .unwrap();

    assert!(!output(&dir, "Plain").exists());
    assert!(!dir.path().join("lib").join("src").exists());
    assert_eq!(report.without_targets, vec![input]);
    assert!(report.generated.is_empty());
}

#[test]
fn Generator___only_eligible_types___get_blocks() {
    let dir = TempDir::new().unwrap();
    let input = header(&dir, "Mixed.h");
    let parser = FakeParser::default().with(
        &input,
        vec![plain_type("Sensor"), config_type("SensorConfig"), config_type("OtherConfig")],
    );

    let report = Generator::new(parser, GeneratorConfig::default(), date())
        .run(&[input])
        .unwrap();

    let written = fs::read_to_string(output(&dir, "Mixed")).unwrap();
    assert!(!written.contains("SHI::Sensor::Sensor"));
    let first = written.find("SHI::SensorConfig::SensorConfig").unwrap();
    let second = written.find("SHI::OtherConfig::OtherConfig").unwrap();
    assert!(first < second);
    assert_eq!(
        report.generated[0].classes,
        vec!["SHI::SensorConfig", "SHI::OtherConfig"]
    );
}

#[test]
fn Generator___shared_sequence_field_names___still_write_every_block() {
    let dir = TempDir::new().unwrap();
    let input = header(&dir, "Pins.h");
    let with_pins = |name: &str| {
        config_type(name).with_field(
            Visibility::Public,
            FieldDefinition::sequence("pins", "std::vector", "int"),
        )
    };
    let parser = FakeParser::default().with(&input, vec![with_pins("AConfig"), with_pins("BConfig")]);

    let report = Generator::new(parser, GeneratorConfig::default(), date())
        .run(&[input])
        .unwrap();

    let written = fs::read_to_string(output(&dir, "Pins")).unwrap();
    assert_eq!(written.matches("std::vector<int> pinsFromArray(").count(), 2);
    assert_eq!(report.generated[0].classes, vec!["SHI::AConfig", "SHI::BConfig"]);
}

#[test]
fn Generator___parse_failure___is_skipped_and_run_continues() {
    let dir = TempDir::new().unwrap();
    let bad = header(&dir, "Bad.h");
    let good = header(&dir, "Good.h");
    let parser = FakeParser::default()
        .failing(&bad, "unexpected end of input")
        .with(&good, vec![config_type("Good")]);

    let report = Generator::new(parser, GeneratorConfig::default(), date())
        .run(&[bad.clone(), good])
        .unwrap();

    assert_eq!(report.parse_failures.len(), 1);
    assert_eq!(report.parse_failures[0].path, bad);
    assert!(output(&dir, "Good").exists());
}

#[test]
fn Generator___existing_output___is_overwritten() {
    let dir = TempDir::new().unwrap();
    let input = header(&dir, "A.h");
    fs::create_dir_all(output(&dir, "A").parent().unwrap()).unwrap();
    fs::write(output(&dir, "A"), "stale content").unwrap();
    let parser = FakeParser::default().with(&input, vec![config_type("A")]);

    Generator::new(parser, GeneratorConfig::default(), date())
        .run(&[input])
        .unwrap();

    let written = fs::read_to_string(output(&dir, "A")).unwrap();
    assert!(!written.contains("stale content"));
    assert!(written.starts_with("/*\n"));
}

#[test]
fn Generator___fail_fast___stops_at_first_violation() {
    let dir = TempDir::new().unwrap();
    let first = header(&dir, "First.h");
    let broken = header(&dir, "Broken.h");
    let last = header(&dir, "Last.h");
    let parser = FakeParser::default()
        .with(&first, vec![config_type("First")])
        .with(&broken, vec![config_type("Fine"), broken_type("Broken")])
        .with(&last, vec![config_type("Last")]);
    let generator = Generator::new(parser, GeneratorConfig::default(), date());

    let err = generator
        .run(&[first.clone(), broken.clone(), last])
        .unwrap_err();

    match err {
        GenerateError::UnsupportedField(violation) => {
            assert_eq!(violation, UnsupportedFieldError::new("SHI::Broken", "port"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(output(&dir, "First").exists());
    assert!(!output(&dir, "Broken").exists());
    assert!(!output(&dir, "Last").exists());
    assert_eq!(generator.parser.calls(), vec![first, broken]);
}

#[test]
fn Generator___per_file___isolates_violations() {
    let dir = TempDir::new().unwrap();
    let broken = header(&dir, "Broken.h");
    let good = header(&dir, "Good.h");
    let other = header(&dir, "Other.h");
    let parser = FakeParser::default()
        .with(&broken, vec![broken_type("Broken")])
        .with(&good, vec![config_type("Good")])
        .with(&other, vec![broken_type("Other")]);
    let generator = Generator::new(parser, per_file(), date());

    let report = generator.generate(&[broken, good, other]).unwrap();

    assert!(output(&dir, "Good").exists());
    assert!(!output(&dir, "Broken").exists());
    assert!(!output(&dir, "Other").exists());
    assert_eq!(
        report.violations,
        vec![
            UnsupportedFieldError::new("SHI::Broken", "port"),
            UnsupportedFieldError::new("SHI::Other", "port"),
        ]
    );
}

#[test]
fn Generator___per_file_run___fails_at_end_with_all_violations() {
    let dir = TempDir::new().unwrap();
    let broken = header(&dir, "Broken.h");
    let good = header(&dir, "Good.h");
    let parser = FakeParser::default()
        .with(&broken, vec![broken_type("Broken")])
        .with(&good, vec![config_type("Good")]);

    let err = Generator::new(parser, per_file(), date())
        .run(&[broken, good])
        .unwrap_err();

    assert!(matches!(err, GenerateError::Violations(ref v) if v.len() == 1));
    assert!(output(&dir, "Good").exists());
}

#[test]
fn Generator___dry_run___writes_nothing_but_reports() {
    let dir = TempDir::new().unwrap();
    let input = header(&dir, "A.h");
    let parser = FakeParser::default().with(&input, vec![config_type("A")]);
    let config = GeneratorConfig {
        dry_run: true,
        ..GeneratorConfig::default()
    };

    let report = Generator::new(parser, config, date()).run(&[input]).unwrap();

    assert_eq!(report.generated.len(), 1);
    assert!(!output(&dir, "A").exists());
}

#[test]
fn Generator___invalid_config___fails_before_parsing() {
    let parser = FakeParser::default();
    let config = GeneratorConfig {
        marker_base: String::new(),
        ..GeneratorConfig::default()
    };
    let generator = Generator::new(parser, config, date());

    let err = generator.run(&[PathBuf::from("include/A.h")]).unwrap_err();

    assert!(matches!(err, GenerateError::Config(_)));
    assert!(generator.parser.calls().is_empty());
}

#[test]
fn Generator___same_input_and_date___is_byte_identical() {
    let dir = TempDir::new().unwrap();
    let input = header(&dir, "A.h");
    let types = vec![config_type("A"), config_type("B")];

    let parser = FakeParser::default().with(&input, types.clone());
    Generator::new(parser, GeneratorConfig::default(), date())
        .run(&[input.clone()])
        .unwrap();
    let first = fs::read(output(&dir, "A")).unwrap();

    let parser = FakeParser::default().with(&input, types);
    Generator::new(parser, GeneratorConfig::default(), date())
        .run(&[input])
        .unwrap();
    let second = fs::read(output(&dir, "A")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn GenerationReport___into_result___passes_clean_report() {
    let report = GenerationReport::default();

    assert!(report.into_result().is_ok());
}

// =============================================================================
// collect_inputs
// =============================================================================

fn touch(dir: &TempDir, relative: &str) -> PathBuf {
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "").unwrap();
    path
}

#[test]
fn collect_inputs___directory___walks_headers_sorted() {
    let dir = TempDir::new().unwrap();
    let b = touch(&dir, "lib/B/include/B.h");
    let a = touch(&dir, "lib/A/include/A.h");
    touch(&dir, "lib/A/src/A.cpp");
    touch(&dir, "lib/A/include/A.hpp");

    let inputs = collect_inputs([dir.path().to_str().unwrap()], &OutputLayout::default()).unwrap();

    assert_eq!(inputs, vec![a, b]);
}

#[test]
fn collect_inputs___glob___expands_sorted_files() {
    let dir = TempDir::new().unwrap();
    let b = touch(&dir, "lib/b/include/B.h");
    let a = touch(&dir, "lib/a/include/A.h");
    let pattern = format!("{}/lib/*/include/*.h", dir.path().display());

    let inputs = collect_inputs([pattern], &OutputLayout::default()).unwrap();

    assert_eq!(inputs, vec![a, b]);
}

#[test]
fn collect_inputs___explicit_files___keep_order_and_extension() {
    let inputs = collect_inputs(["z/Last.h", "a/First.hpp"], &OutputLayout::default()).unwrap();

    assert_eq!(
        inputs,
        vec![PathBuf::from("z/Last.h"), PathBuf::from("a/First.hpp")]
    );
}

#[test]
fn collect_inputs___duplicates___keep_first_occurrence() {
    let dir = TempDir::new().unwrap();
    let a = touch(&dir, "include/A.h");
    let b = touch(&dir, "include/B.h");
    let b_str = b.to_str().unwrap().to_string();
    let all = dir.path().join("include").to_str().unwrap().to_string();

    let inputs = collect_inputs([b_str, all], &OutputLayout::default()).unwrap();

    assert_eq!(inputs, vec![b, a]);
}

#[test]
fn collect_inputs___bad_pattern___is_error() {
    let err = collect_inputs(["include/[.h"], &OutputLayout::default()).unwrap_err();

    assert!(matches!(err, GenerateError::Pattern { .. }));
}

#[test]
fn collect_inputs___unmatched_pattern___yields_nothing() {
    let dir = TempDir::new().unwrap();
    let pattern = format!("{}/*.h", dir.path().display());

    let inputs = collect_inputs([pattern], &OutputLayout::default()).unwrap();

    assert!(inputs.is_empty());
}
