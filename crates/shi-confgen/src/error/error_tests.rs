#![allow(non_snake_case)]

use super::*;
use std::io;

#[test]
fn UnsupportedFieldError___display___names_type_and_field() {
    let err = UnsupportedFieldError::new("SHI::MQTTConfig", "port");

    assert_eq!(
        err.to_string(),
        "configuration class `SHI::MQTTConfig` has immutable public field `port`"
    );
}

#[test]
fn GenerateError___unsupported_field___is_transparent() {
    let err: GenerateError = UnsupportedFieldError::new("Foo", "bar").into();

    assert!(matches!(err, GenerateError::UnsupportedField(_)));
    assert_eq!(
        err.to_string(),
        "configuration class `Foo` has immutable public field `bar`"
    );
}

#[test]
fn GenerateError___violations___lists_every_field() {
    let err = GenerateError::Violations(vec![
        UnsupportedFieldError::new("A", "x"),
        UnsupportedFieldError::new("NS::B", "y"),
    ]);

    assert_eq!(
        err.to_string(),
        "2 configuration class(es) have immutable public fields: A::x, NS::B::y"
    );
}

#[test]
fn GenerateError___io___includes_path() {
    let err = GenerateError::io(
        "lib/src/Foo_config.cpp",
        io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    );

    let message = err.to_string();
    assert!(message.contains("lib/src/Foo_config.cpp"));
    assert!(message.contains("denied"));
}

#[test]
fn GenerateError___pattern___includes_pattern() {
    let source = glob::Pattern::new("[").unwrap_err();
    let err = GenerateError::Pattern {
        pattern: "[".to_string(),
        source,
    };

    assert!(err.to_string().starts_with("invalid input pattern `[`"));
}
