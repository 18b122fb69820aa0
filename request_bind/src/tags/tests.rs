//! Tests for tag name and option resolution.

use super::*;
use anyhow::{Result, ensure};
use rstest::{fixture, rstest};

const FOO: FieldMeta = FieldMeta::new("Foo", "foo", &[("db", "dbfoo"), ("response", "resfoo")]);
const BAR: FieldMeta = FieldMeta::new("Bar", "", &[("db", "dbbar"), ("response", "resbar")]);
const BAZ: FieldMeta = FieldMeta::new("Baz", "", &[("response", "resbaz")]);
const QUX: FieldMeta = FieldMeta::new("Qux", "", &[]);
const OPTIONS_ONLY: FieldMeta = FieldMeta::new("Opt", ",required", &[("db", "dbopt")]);

#[fixture]
fn resolver() -> TagResolver {
    let mut resolver = TagResolver::default();
    resolver.add_fallback_tag("db");
    resolver.add_fallback_tag("response");
    resolver
}

#[rstest]
#[case::primary(FOO, "foo")]
#[case::first_fallback(BAR, "dbbar")]
#[case::second_fallback(BAZ, "resbaz")]
#[case::lowercase_ident(QUX, "qux")]
#[case::options_without_name(OPTIONS_ONLY, "dbopt")]
fn resolves_names_across_channels(
    resolver: TagResolver,
    #[case] meta: FieldMeta,
    #[case] expected: &str,
) -> Result<()> {
    let name = resolver.name(&meta);
    ensure!(name == expected, "expected {expected}, got {name}");
    Ok(())
}

#[rstest]
fn fallback_order_follows_registration() -> Result<()> {
    let mut resolver = TagResolver::default();
    resolver.add_fallback_tag("response");
    resolver.add_fallback_tag("db");
    let name = resolver.name(&BAR);
    ensure!(name == "resbar", "expected resbar, got {name}");
    Ok(())
}

#[rstest]
fn fallback_registration_is_deduplicated(mut resolver: TagResolver) -> Result<()> {
    resolver.add_fallback_tag("db");
    resolver.add_fallback_tag(PRIMARY_CHANNEL);
    ensure!(
        resolver.fallback_tags() == ["db", "response"],
        "unexpected channels: {:?}",
        resolver.fallback_tags()
    );
    Ok(())
}

#[rstest]
#[case::bare("name,required", vec![TagOption::new("required", "true")])]
#[case::valued("name,default=7", vec![TagOption::new("default", "7")])]
#[case::empty_value("name,required=", vec![TagOption::new("required", "true")])]
#[case::empty_tokens("name,,required,", vec![TagOption::new("required", "true")])]
#[case::ordered(
    ",required,default=x",
    vec![TagOption::new("required", "true"), TagOption::new("default", "x")]
)]
#[case::no_options("name", vec![])]
fn parses_primary_options(#[case] tag: &str, #[case] expected: Vec<TagOption>) -> Result<()> {
    let options = parse_options(tag);
    ensure!(options == expected, "expected {expected:?}, got {options:?}");
    Ok(())
}

#[rstest]
fn option_defaults_fill_missing_options() -> Result<()> {
    let mut resolver = TagResolver::default();
    resolver.set_option_default("immutable", "true");
    resolver.set_option_default("required", "true");
    resolver.set_option_default("immutable", "false");
    let meta = FieldMeta::new("Name", "name,required=false", &[]);
    let options = resolver.options(&meta);
    let expected = vec![
        TagOption::new("required", "false"),
        TagOption::new("immutable", "false"),
    ];
    ensure!(options == expected, "expected {expected:?}, got {options:?}");
    Ok(())
}

#[rstest]
fn options_ignore_fallback_channels(resolver: TagResolver) -> Result<()> {
    let meta = FieldMeta::new("Name", "", &[("db", "name,required")]);
    let descriptor = resolver.describe(&meta);
    ensure!(descriptor.name == "name", "unexpected name {}", descriptor.name);
    ensure!(
        descriptor.options.is_empty(),
        "fallback options leaked: {:?}",
        descriptor.options
    );
    Ok(())
}

#[rstest]
fn dash_marks_field_skipped(resolver: TagResolver) -> Result<()> {
    let meta = FieldMeta::new("Secret", "-", &[("db", "secret")]);
    ensure!(resolver.describe(&meta).is_skipped(), "field should be skipped");
    Ok(())
}
