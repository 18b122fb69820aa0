//! Trybuild fixture verifying `#[record(crate = "...")]` works with a
//! dependency rename via `use ... as`.

use request_bind as binding;
use binding::{Binder, Value};

/// Generated code must reference types through `binding::` rather than
/// `request_bind::`.
#[derive(Debug, Default, Clone, binding::Record)]
#[record(crate = "binding")]
struct AliasedRecord {
    #[request("name,required")]
    value: String,
    #[tag(db = "total")]
    count: u32,
}

fn main() {
    let body = Value::Map(
        [("name".to_owned(), Value::from("hello"))]
            .into_iter()
            .collect(),
    );
    let mut record = AliasedRecord::default();
    let result: binding::BindResult<()> = Binder::new().bind(&mut record, &body);
    let _ = (result, record.value, record.count);
}
