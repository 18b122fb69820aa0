//! Tests for value assignment onto typed fields.

use std::collections::BTreeMap;

use super::*;
use crate::binder::{Binder, Mode};
use crate::error::BoxError;
use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};

#[fixture]
fn binder() -> Binder {
    Binder::new()
}

fn input(binder: &Binder) -> BindContext<'_> {
    BindContext::new(binder, Mode::Merge).with_from_input(true)
}

/// Records every number it receives.
#[derive(Debug, Default, Clone, PartialEq)]
struct Tracked {
    seen: Vec<i64>,
    hooks: Vec<&'static str>,
}

impl Receive for Tracked {
    fn receive(&mut self, value: Value) -> Result<(), BoxError> {
        self.hooks.push("receive");
        match value {
            Value::Int(n) => {
                self.seen.push(n);
                Ok(())
            }
            other => Err(format!("unexpected {}", other.kind()).into()),
        }
    }

    fn receive_type(&self) -> Option<ValueKind> {
        Some(ValueKind::Int)
    }

    fn pre_receive(&mut self) -> Result<(), BoxError> {
        self.hooks.push("pre");
        Ok(())
    }

    fn post_receive(&mut self) -> Result<(), BoxError> {
        self.hooks.push("post");
        Ok(())
    }
}

impl Bindable for Tracked {
    fn is_zero(&self) -> bool {
        self.seen.is_empty()
    }

    fn receiver(&mut self) -> Option<Receiver<'_>> {
        Some(Receiver::Plain(self))
    }
}

/// Normalised e-mail address that reports whether a receive changed it.
#[derive(Debug, Default, Clone, PartialEq)]
struct Email(String);

impl ChangeReceive for Email {
    fn receive(&mut self, value: Value) -> Result<bool, BoxError> {
        let address = value.as_str().ok_or("expected a string")?.to_lowercase();
        let changed = address != self.0;
        self.0 = address;
        Ok(changed)
    }
}

impl Bindable for Email {
    fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    fn receiver(&mut self) -> Option<Receiver<'_>> {
        Some(Receiver::Change(self))
    }
}

/// Temperature parsed from strings like `"21C"`.
#[derive(Debug, Default, Clone, PartialEq)]
struct Celsius(i32);

impl Scan for Celsius {
    fn scan(&mut self, value: Value) -> Result<(), BoxError> {
        let text = value.as_str().ok_or("expected a string")?;
        let degrees = text.strip_suffix('C').ok_or("missing unit")?;
        self.0 = degrees.parse()?;
        Ok(())
    }
}

impl Bindable for Celsius {
    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn scanner(&mut self) -> Option<&mut dyn Scan> {
        Some(self)
    }
}

#[rstest]
fn receive_hooks_run_in_order_with_typed_values(binder: Binder) -> Result<()> {
    let mut tracked = Tracked::default();
    assign(&mut tracked, Value::from("42"), input(&binder))?;
    ensure!(tracked.seen == [42], "value converted before receive");
    ensure!(tracked.hooks == ["pre", "receive", "post"]);
    Ok(())
}

#[rstest]
fn receive_hooks_are_skipped_for_non_input_values(binder: Binder) -> Result<()> {
    let mut tracked = Tracked::default();
    let outcome = assign(&mut tracked, Value::from("x"), BindContext::new(&binder, Mode::Merge));
    ensure!(matches!(outcome, Err(FieldError::Mismatch { .. })), "got {outcome:?}");
    ensure!(tracked.hooks.is_empty());
    Ok(())
}

#[rstest]
fn scan_hooks_convert_values(binder: Binder) -> Result<()> {
    let mut temperature = Celsius::default();
    assign(&mut temperature, Value::from("21C"), input(&binder))?;
    ensure!(temperature == Celsius(21));
    let outcome = assign(&mut temperature, Value::from("21F"), input(&binder));
    ensure!(matches!(outcome, Err(FieldError::Scan(_))), "got {outcome:?}");
    Ok(())
}

#[rstest]
#[case::string_to_int(Value::from("12"), 12)]
#[case::float_truncates(Value::Float(12.7), 12)]
#[case::uint(Value::Uint(9), 9)]
fn numbers_coerce(binder: Binder, #[case] value: Value, #[case] expected: i32) -> Result<()> {
    let mut target = 0_i32;
    assign(&mut target, value, input(&binder))?;
    ensure!(target == expected);
    Ok(())
}

#[rstest]
fn narrowing_wraps_like_a_cast(binder: Binder) -> Result<()> {
    let mut target = 0_u8;
    assign(&mut target, Value::Int(300), input(&binder))?;
    ensure!(target == 44);
    Ok(())
}

#[rstest]
fn null_is_rejected_by_plain_types(binder: Binder) -> Result<()> {
    let mut target = 5_u16;
    match assign(&mut target, Value::Null, input(&binder)) {
        Err(FieldError::NotNilable { type_name }) => {
            ensure!(type_name == "u16");
            ensure!(target == 5);
            Ok(())
        }
        other => Err(anyhow!("expected NotNilable, got {other:?}")),
    }
}

#[rstest]
fn null_clears_options(binder: Binder) -> Result<()> {
    let mut target = Some(String::from("x"));
    assign(&mut target, Value::Null, input(&binder))?;
    ensure!(target.is_none());
    assign(&mut target, Value::from("y"), input(&binder))?;
    ensure!(target.as_deref() == Some("y"));
    Ok(())
}

#[rstest]
fn vectors_replace_their_contents(binder: Binder) -> Result<()> {
    let mut target = vec![1_u8, 2, 3];
    assign(&mut target, Value::from(vec!["4", "5"]), input(&binder))?;
    ensure!(target == [4, 5]);
    let outcome = assign(&mut target, Value::from("6"), input(&binder));
    ensure!(matches!(outcome, Err(FieldError::Mismatch { .. })), "scalars are not sequences");
    ensure!(target == [4, 5]);
    Ok(())
}

#[rstest]
fn maps_bind_by_key(binder: Binder) -> Result<()> {
    let mut target: BTreeMap<String, bool> = BTreeMap::new();
    let body = Value::Map(
        [("a".to_owned(), Value::Bool(true)), ("b".to_owned(), Value::from("false"))]
            .into_iter()
            .collect(),
    );
    assign(&mut target, body, input(&binder))?;
    ensure!(target.get("a") == Some(&true) && target.get("b") == Some(&false));
    Ok(())
}

#[rstest]
fn write_reports_whether_the_field_changed(binder: Binder) -> Result<()> {
    let cx = input(&binder);
    let mut target = 3_u8;
    ensure!(!write(&mut target, Candidate::Current, cx)?);
    ensure!(write(&mut target, Candidate::Zero, cx)?);
    ensure!(target == 0);
    ensure!(!write(&mut target, Candidate::Zero, cx)?, "already zero");
    ensure!(write(&mut target, Candidate::Value(Value::Int(8)), cx)?);
    ensure!(target == 8);
    Ok(())
}

#[rstest]
fn field_views_probe_change_hooks_on_a_copy() -> Result<()> {
    let email = Email("ada@example.com".to_owned());
    let view = Original(&email);
    ensure!(view.receive_kind() == Some(ReceiveKind::Change));
    ensure!(!view.probe_change(&Value::from("ADA@example.com"))?);
    ensure!(view.probe_change(&Value::from("bob@example.com"))?);
    ensure!(email.0 == "ada@example.com", "original untouched");
    Ok(())
}

#[rstest]
fn field_views_report_plain_receivers() {
    let tracked = Tracked::default();
    assert_eq!(Original(&tracked).receive_kind(), Some(ReceiveKind::Plain));
    assert_eq!(Original(&0_u8).receive_kind(), None);
}

#[rstest]
fn receive_kind_does_not_depend_on_the_value() {
    let empty: Option<Tracked> = None;
    assert_eq!(Original(&empty).receive_kind(), Some(ReceiveKind::Plain));
    assert_eq!(<Box<Email>>::receive_kind(), Some(ReceiveKind::Change));
    assert_eq!(<Option<Box<u8>>>::receive_kind(), None);
}
