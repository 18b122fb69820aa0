//! Tests for error collection and rendering.

use std::collections::BTreeSet;

use super::*;
use crate::value::{Params, Value, ValueKind};
use anyhow::{Result, ensure};
use rstest::rstest;

fn sample_errors() -> InputErrors {
    let mut errors = InputErrors::new();
    errors.set("name", Some(FieldError::Required));
    errors.set("age", None);
    errors
}

#[rstest]
fn tracks_visited_and_failed_fields() -> Result<()> {
    let errors = sample_errors();
    ensure!(errors.has_errors());
    ensure!(errors.len() == 2);
    ensure!(errors.contains("age"), "clean fields are still visited");
    ensure!(errors.get("age").is_none());
    ensure!(matches!(errors.get("name"), Some(FieldError::Required)));
    let pruned = errors.errors();
    ensure!(pruned.len() == 1 && !pruned.contains("age"));
    Ok(())
}

#[rstest]
fn merge_prefers_newer_entries() -> Result<()> {
    let mut newer = InputErrors::new();
    newer.set("name", None);
    newer.set("email", Some(FieldError::Immutable));
    let merged = sample_errors().merge(newer);
    ensure!(merged.get("name").is_none(), "newer clean entry wins");
    ensure!(matches!(merged.get("email"), Some(FieldError::Immutable)));
    Ok(())
}

#[rstest]
fn absorb_keeps_existing_entries() -> Result<()> {
    let mut outer = InputErrors::new();
    outer.set("name", None);
    let mut nested = InputErrors::new();
    nested.set("name", Some(FieldError::Required));
    nested.set("city", Some(FieldError::Required));
    outer.absorb(nested);
    ensure!(outer.get("name").is_none(), "outer field takes precedence");
    ensure!(outer.get("city").is_some());
    Ok(())
}

#[rstest]
fn renders_error_list() {
    let rendered = sample_errors().to_string();
    assert_eq!(
        rendered,
        "input errors:\n\n * name: required field has no value\n"
    );
}

#[rstest]
fn into_iter_skips_clean_fields() {
    let names: Vec<String> = sample_errors().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, ["name"]);
}

#[rstest]
fn unused_fields_report_sorted_keys() -> Result<()> {
    let params = Params::from([
        ("zeta".to_owned(), Value::Null),
        ("alpha".to_owned(), Value::Null),
        ("name".to_owned(), Value::Null),
    ]);
    let matched = BTreeSet::from(["name".to_owned()]);
    let unused = UnusedFields::from_params(&params, &matched);
    ensure!(unused.has_missing());
    ensure!(unused.num_missing() == 2);
    ensure!(unused.fields() == ["alpha", "zeta"]);
    ensure!(
        unused.to_string() == "request fields found with no matching struct fields: alpha, zeta"
    );
    Ok(())
}

#[rstest]
fn bind_error_accessors() -> Result<()> {
    let unused = BindError::from(UnusedFields::new(vec!["x".to_owned()]));
    ensure!(unused.is_unused_only());
    ensure!(unused.unused_fields().is_some());
    ensure!(unused.input_errors().is_none());

    let input = BindError::from(sample_errors());
    ensure!(!input.is_unused_only());
    ensure!(input.input_errors().is_some_and(InputErrors::has_errors));
    Ok(())
}

#[rstest]
#[case::mismatch(
    FieldError::mismatch(ValueKind::String, "u8"),
    "cannot convert value of type string to type u8"
)]
#[case::unknown_option(
    FieldError::UnknownOption { name: "trim".to_owned() },
    "could not find a registered option function for option \"trim\""
)]
#[case::not_nilable(
    FieldError::NotNilable { type_name: "u8" },
    "nil value found, but type u8 cannot be nil"
)]
#[case::custom(FieldError::custom("too short"), "too short")]
fn field_errors_render(#[case] error: FieldError, #[case] expected: &str) {
    assert_eq!(error.to_string(), expected);
}

#[rstest]
fn codec_errors_classify_unsupported_types() {
    let unsupported = CodecError::UnsupportedContentType {
        content_type: "text/csv".to_owned(),
    };
    assert!(unsupported.is_unsupported());
    let decode = CodecError::decode("application/json", "eof");
    assert!(!decode.is_unsupported());
}
