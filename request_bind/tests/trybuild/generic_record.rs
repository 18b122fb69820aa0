//! Trybuild fixture verifying that generic records derive cleanly.

use request_bind::{Bindable, Binder, Params, Record, Value};

#[derive(Debug, Default, Clone, Record)]
struct Envelope<T: Bindable> {
    #[request(",required")]
    id: u64,
    payload: T,
    #[record(flatten)]
    meta: Meta,
}

#[derive(Debug, Default, Clone, Record)]
struct Meta {
    trace: Option<String>,
}

fn main() {
    let mut params = Params::new();
    params.insert("id".to_owned(), Value::from(7_u64));
    params.insert("payload".to_owned(), Value::from("text"));
    let mut envelope: Envelope<String> = Envelope::default();
    let result = Binder::new().bind_params(&mut envelope, &params);
    let mut batch: Vec<Envelope<u8>> = Vec::new();
    let batch_result = Binder::new().bind(&mut batch, &Value::Seq(Vec::new()));
    let _ = (result, batch_result, envelope.id, envelope.payload, envelope.meta.trace);
}
