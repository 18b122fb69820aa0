//! Tests for binder configuration and the record and sequence targets.

use super::*;
use crate::bindable::Bindable;
use crate::error::{BindError, FieldError};
use crate::options::{Candidate, FieldView, OptionArg};
use crate::record::{FieldPass, RecordSlot};
use crate::tags::FieldMeta;
use anyhow::{Result, anyhow, ensure};
use rstest::rstest;

const LABEL: FieldMeta = FieldMeta::new("label", ",required", &[("db", "tag_label")]);
const WEIGHT: FieldMeta = FieldMeta::new("weight", "", &[]);

#[derive(Debug, Default, Clone, PartialEq)]
struct Label {
    label: String,
    weight: u32,
}

impl Bindable for Label {
    fn is_zero(&self) -> bool {
        self.label.is_empty() && self.weight == 0
    }
}

impl crate::Record for Label {
    const FIELDS: &'static [FieldMeta] = &[LABEL, WEIGHT];

    fn bind_fields(&mut self, pass: &mut FieldPass<'_>) {
        pass.field(&LABEL, &mut self.label);
        pass.field(&WEIGHT, &mut self.weight);
    }
}

impl RecordSlot for Label {
    type Record = Self;

    fn from_record(record: Self) -> Self {
        record
    }

    fn record_mut(&mut self) -> Option<&mut Self> {
        Some(self)
    }
}

impl Target for Label {
    fn bind_target(&mut self, binder: &Binder, body: Body<'_>, mode: Mode) -> BindResult<()> {
        bind_record(binder, self, body, mode)
    }
}

fn map(entries: &[(&str, Value)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(key, value)| ((*key).to_owned(), value.clone()))
            .collect(),
    )
}

#[rstest]
fn binders_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Binder>();
}

#[rstest]
fn fallback_tags_are_deduplicated() {
    let mut binder = Binder::new();
    binder.add_fallback_tag("db").add_fallback_tag("db").add_fallback_tag("response");
    assert_eq!(binder.fallback_tags(), ["db", "response"]);
}

#[rstest]
fn custom_options_cannot_shadow_builtins() -> Result<()> {
    let mut binder = Binder::new();
    let noop = |_: &dyn FieldView, candidate: Candidate, _: OptionArg<'_>| -> Result<Candidate, FieldError> {
        Ok(candidate)
    };
    ensure!(binder.register_option("immutable", noop).is_err());
    binder.register_option("noop", noop)?;
    ensure!(binder.options().contains("noop"));
    Ok(())
}

#[rstest]
fn describe_resolves_names_with_fallbacks() -> Result<()> {
    let mut binder = Binder::new();
    binder.add_fallback_tag("db");
    let names: Vec<String> = binder
        .describe::<Label>()
        .into_iter()
        .map(|descriptor| descriptor.name)
        .collect();
    ensure!(names == ["tag_label", "weight"], "got {names:?}");
    Ok(())
}

#[rstest]
fn records_reject_non_map_bodies() -> Result<()> {
    let mut label = Label::default();
    match Binder::new().bind(&mut label, &Value::from("nope")) {
        Err(BindError::NotAMap { found }) => {
            ensure!(found == crate::ValueKind::String);
            Ok(())
        }
        other => Err(anyhow!("expected NotAMap, got {other:?}")),
    }
}

#[rstest]
fn unused_keys_are_reported_after_binding() -> Result<()> {
    let mut label = Label::default();
    let body = map(&[("label", Value::from("red")), ("colour", Value::from("#f00"))]);
    let error = Binder::new()
        .bind(&mut label, &body)
        .err()
        .ok_or_else(|| anyhow!("expected unused keys"))?;
    ensure!(error.is_unused_only());
    ensure!(label.label == "red", "fields bound before the unused check");
    Ok(())
}

#[rstest]
fn sequences_bind_every_element() -> Result<()> {
    let body = Value::Seq(vec![
        map(&[("label", Value::from("a")), ("weight", Value::Int(1))]),
        map(&[("label", Value::from("b"))]),
    ]);
    let mut labels: Vec<Label> = Vec::new();
    Binder::new().bind(&mut labels, &body)?;
    ensure!(labels.len() == 2);
    ensure!(labels.iter().map(|l| l.label.as_str()).eq(["a", "b"]));
    Ok(())
}

#[rstest]
#[case::element_error(Value::Seq(vec![map(&[("weight", Value::Int(1))])]))]
#[case::element_not_map(Value::Seq(vec![Value::Int(1)]))]
#[case::not_a_sequence(map(&[("label", Value::from("a"))]))]
fn failed_sequences_leave_the_target_untouched(#[case] body: Value) -> Result<()> {
    let original = vec![Label {
        label: "kept".to_owned(),
        weight: 7,
    }];
    let mut labels = original.clone();
    ensure!(Binder::new().bind(&mut labels, &body).is_err());
    ensure!(labels == original);
    Ok(())
}

#[rstest]
fn undecodable_bytes_surface_codec_errors() -> Result<()> {
    let mut label = Label::default();
    let outcome = Binder::new().bind_bytes(&mut label, "text/csv", b"a,b", Mode::Merge);
    match outcome {
        Err(BindError::Codec(error)) => {
            ensure!(error.is_unsupported());
            Ok(())
        }
        other => Err(anyhow!("expected a codec error, got {other:?}")),
    }
}
