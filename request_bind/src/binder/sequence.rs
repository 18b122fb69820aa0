//! Binding a sequence body onto a vector of records.

use super::{Binder, Body, Mode, Target, bind_record};
use crate::error::{BindError, BindResult};
use crate::record::RecordSlot;
use crate::value::{Value, ValueKind};

impl<S: RecordSlot> Target for Vec<S> {
    /// Binds each element of a sequence body onto a fresh record.
    ///
    /// The vector is replaced only when every element binds; on error it is
    /// left untouched.
    fn bind_target(&mut self, binder: &Binder, body: Body<'_>, mode: Mode) -> BindResult<()> {
        let items = match body {
            Body::Value(Value::Seq(items)) => items,
            Body::Value(other) => return Err(BindError::NotASequence { found: other.kind() }),
            Body::Params(_) => {
                return Err(BindError::NotASequence {
                    found: ValueKind::Map,
                });
            }
            Body::Undecoded { error, .. } => return Err(BindError::Codec(error)),
        };

        let mut built = Self::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let Some(params) = item.as_map() else {
                return Err(BindError::ElementNotAMap {
                    index,
                    found: item.kind(),
                });
            };
            let mut record = S::Record::default();
            bind_record(binder, &mut record, Body::Params(params), mode)?;
            built.push(S::from_record(record));
        }
        *self = built;
        Ok(())
    }
}
