//! Tests for value conversions and decoding.

use super::*;
use crate::error::FieldError;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

#[rstest]
#[case::int_to_float(Value::Int(3), ValueKind::Float, Value::Float(3.0))]
#[case::float_truncates(Value::Float(2.9), ValueKind::Int, Value::Int(2))]
#[case::negative_float_truncates(Value::Float(-2.9), ValueKind::Int, Value::Int(-2))]
#[case::string_to_int(Value::from("42"), ValueKind::Int, Value::Int(42))]
#[case::string_to_uint(Value::from("7"), ValueKind::Uint, Value::Uint(7))]
#[case::string_to_bool(Value::from("true"), ValueKind::Bool, Value::Bool(true))]
#[case::string_to_float(Value::from("1.5"), ValueKind::Float, Value::Float(1.5))]
#[case::same_kind(Value::from("x"), ValueKind::String, Value::from("x"))]
#[case::negative_wraps(Value::Int(-1), ValueKind::Uint, Value::Uint(u64::MAX))]
fn converts_between_kinds(
    #[case] input: Value,
    #[case] kind: ValueKind,
    #[case] expected: Value,
) -> Result<()> {
    let converted = input.convert_to(kind)?;
    ensure!(converted == expected, "got {converted:?}, expected {expected:?}");
    Ok(())
}

#[rstest]
#[case::bool_to_int(Value::Bool(true), ValueKind::Int)]
#[case::int_to_string(Value::Int(1), ValueKind::String)]
#[case::string_to_map(Value::from("a"), ValueKind::Map)]
#[case::seq_to_string(Value::Seq(vec![]), ValueKind::String)]
fn rejects_impossible_conversions(#[case] input: Value, #[case] kind: ValueKind) -> Result<()> {
    let from = input.kind();
    match input.convert_to(kind) {
        Err(FieldError::Mismatch { from: got, to }) => {
            ensure!(got == from, "reported kind {got}");
            ensure!(to == kind.as_str(), "reported target {to}");
            Ok(())
        }
        other => Err(anyhow!("expected mismatch, got {other:?}")),
    }
}

#[rstest]
fn unparsable_strings_report_their_input() -> Result<()> {
    match Value::from("forty").convert_to(ValueKind::Int) {
        Err(FieldError::ParseInt { input, .. }) => {
            ensure!(input == "forty");
            Ok(())
        }
        other => Err(anyhow!("expected parse error, got {other:?}")),
    }
}

#[rstest]
#[case::small(5_u64, Value::Int(5))]
#[case::large(u64::MAX, Value::Uint(u64::MAX))]
fn unsigned_values_prefer_int(#[case] input: u64, #[case] expected: Value) -> Result<()> {
    ensure!(Value::from(input) == expected);
    Ok(())
}

#[rstest]
fn option_and_vec_conversions() -> Result<()> {
    ensure!(Value::from(None::<i32>) == Value::Null);
    ensure!(Value::from(Some("a")) == Value::from("a"));
    ensure!(Value::from(vec![1_i32, 2]) == Value::Seq(vec![Value::Int(1), Value::Int(2)]));
    Ok(())
}

#[rstest]
fn kind_names_render() {
    assert_eq!(ValueKind::Seq.to_string(), "sequence");
    assert_eq!(Value::Map(Params::new()).kind().as_str(), "map");
}

#[rstest]
fn deserializes_nested_documents() -> Result<()> {
    let value: Value = serde_json::from_str(r#"{"a": [1, -2, 2.5, "s", null, true], "b": {}}"#)?;
    let map = value.as_map().ok_or_else(|| anyhow!("expected a map"))?;
    let items = map
        .get("a")
        .and_then(Value::as_seq)
        .ok_or_else(|| anyhow!("expected a sequence"))?;
    ensure!(
        items
            == [
                Value::Int(1),
                Value::Int(-2),
                Value::Float(2.5),
                Value::from("s"),
                Value::Null,
                Value::Bool(true),
            ],
        "unexpected items: {items:?}"
    );
    ensure!(map.get("b") == Some(&Value::Map(Params::new())));
    Ok(())
}

#[cfg(feature = "serde_json")]
#[rstest]
fn converts_from_json_values() -> Result<()> {
    let json = serde_json::json!({"n": 18_446_744_073_709_551_615_u64, "s": "x"});
    let value = Value::from(json);
    let map = value.as_map().ok_or_else(|| anyhow!("expected a map"))?;
    ensure!(map.get("n") == Some(&Value::Uint(u64::MAX)));
    ensure!(map.get("s").and_then(Value::as_str) == Some("x"));
    Ok(())
}

#[rstest]
fn file_attachments_carry_content_type() {
    let file = FileAttachment::new("a.txt", b"hi".to_vec()).with_content_type("text/plain");
    assert_eq!(file.content_type.as_deref(), Some("text/plain"));
    assert_eq!(Value::from(file).kind(), ValueKind::File);
}
