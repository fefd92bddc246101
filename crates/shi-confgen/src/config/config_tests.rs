#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test]
fn GeneratorConfig___default___has_expected_values() {
    let config = GeneratorConfig::default();

    assert_eq!(config.marker_base, "SHI::Configuration");
    assert!(!config.accept_legacy_marker);
    assert_eq!(config.layout, OutputLayout::default());
    assert_eq!(config.copyright.len(), 3);
    assert_eq!(config.failure_policy, FailurePolicy::FailFast);
    assert!(!config.dry_run);
}

#[test]
fn GeneratorConfig___default___is_valid() {
    assert!(GeneratorConfig::new().validate().is_ok());
}

#[test]
fn GeneratorConfig___from_toml___fills_missing_fields() {
    let config: GeneratorConfig = toml::from_str(
        r#"
        failure_policy = "per-file"

        [layout]
        generated_segment = "gen"
        "#,
    )
    .unwrap();

    assert_eq!(config.failure_policy, FailurePolicy::PerFile);
    assert_eq!(config.layout.generated_segment, "gen");
    assert_eq!(config.layout.source_segment, "include");
    assert_eq!(config.marker_base, "SHI::Configuration");
}

#[test]
fn GeneratorConfig___dry_run___is_not_read_from_files() {
    let result = serde_json::from_str::<GeneratorConfig>(r#"{"dry_run": true}"#);

    assert!(result.is_err());
    assert!(!GeneratorConfig::default().dry_run);
}

#[test]
fn GeneratorConfig___unknown_key___is_rejected() {
    let result = toml::from_str::<GeneratorConfig>(r#"marker = "Other::Base""#);

    let message = result.unwrap_err().to_string();
    assert!(message.contains("unknown field `marker`"), "{message}");
}

#[test]
fn GeneratorConfig___unknown_layout_key___is_rejected() {
    let result = toml::from_str::<GeneratorConfig>("[layout]\nsufix = \"_cfg.cpp\"\n");

    let message = result.unwrap_err().to_string();
    assert!(message.contains("unknown field `sufix`"), "{message}");
}

#[test_case("fail-fast", FailurePolicy::FailFast)]
#[test_case("per-file", FailurePolicy::PerFile)]
fn FailurePolicy___kebab_case___parses(text: &str, expected: FailurePolicy) {
    let json = format!("\"{text}\"");

    let policy: FailurePolicy = serde_json::from_str(&json).unwrap();

    assert_eq!(policy, expected);
}

#[test]
fn GeneratorConfig___marker_filter___uses_settings() {
    let config = GeneratorConfig {
        marker_base: "App::Settings".to_string(),
        accept_legacy_marker: true,
        ..GeneratorConfig::default()
    };

    let filter = config.marker_filter();

    assert_eq!(filter.marker(), "App::Settings");
    assert_eq!(filter, MarkerFilter::new("App::Settings").with_legacy_spelling(true));
}

#[test_case(|c: &mut GeneratorConfig| c.marker_base = String::new(), "marker base cannot be empty")]
#[test_case(|c: &mut GeneratorConfig| c.marker_base = "::".into(), "marker base cannot be empty")]
#[test_case(|c: &mut GeneratorConfig| c.marker_base = "SHI::".into(), "empty namespace segment")]
#[test_case(|c: &mut GeneratorConfig| c.layout.source_segment = String::new(), "segments cannot be empty")]
#[test_case(|c: &mut GeneratorConfig| c.layout.generated_segment = String::new(), "segments cannot be empty")]
#[test_case(|c: &mut GeneratorConfig| c.layout.generated_segment = "a/b".into(), "single directory names")]
#[test_case(|c: &mut GeneratorConfig| c.layout.suffix = "_config".into(), "has no file extension")]
#[test_case(|c: &mut GeneratorConfig| c.layout.header_extension = ".h".into(), "without a leading dot")]
fn GeneratorConfig___validate___rejects_invalid_settings(
    change: fn(&mut GeneratorConfig),
    expected: &str,
) {
    let mut config = GeneratorConfig::default();
    change(&mut config);

    let err = config.validate().unwrap_err();

    assert!(matches!(err, GenerateError::Config(_)));
    assert!(
        err.to_string().contains(expected),
        "`{err}` does not mention `{expected}`"
    );
}
