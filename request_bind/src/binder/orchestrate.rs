//! Top-level record binding: hooks, field pass, error and unused checks.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::warn;

use super::{BindContext, Binder, Body, Mode};
use crate::error::{BindError, BindResult, UnusedFields};
use crate::hooks::{Payload, Unmarshal};
use crate::record::{Record, bind_fields};
use crate::value::Params;

/// Binds `body` onto a single record.
///
/// Steps, in order: the pre-bind hook; either the record's own
/// [`Unmarshal`] hook or a pass over its fields; the post-bind hook, only if
/// nothing failed; and finally the unused-key check. Field errors are
/// collected across all fields before being returned together.
///
/// # Errors
///
/// Returns the first failing step's [`BindError`]. [`BindError::Unused`]
/// is only returned once every field is populated.
pub fn bind_record<R: Record>(
    binder: &Binder,
    target: &mut R,
    body: Body<'_>,
    mode: Mode,
) -> BindResult<()> {
    target.pre_bind_hook().map_err(BindError::PreBind)?;

    if let Some(hook) = target.unmarshaller() {
        unmarshal(hook, body)?;
        return target.post_bind_hook().map_err(BindError::PostBind);
    }

    let params = params_of(body)?;
    let (matched, outcomes) = bind_fields(target, params, BindContext::new(binder, mode));
    let errors = outcomes.errors();
    if errors.has_errors() {
        return Err(BindError::Input(errors));
    }

    target.post_bind_hook().map_err(BindError::PostBind)?;

    let unused = UnusedFields::from_params(params, &matched);
    if unused.has_missing() {
        return Err(BindError::Unused(unused));
    }
    Ok(())
}

fn params_of(body: Body<'_>) -> BindResult<&Params> {
    match body {
        Body::Params(params) => Ok(params),
        Body::Value(value) => value.as_map().ok_or_else(|| BindError::NotAMap {
            found: value.kind(),
        }),
        Body::Undecoded { error, .. } => Err(BindError::Codec(error)),
    }
}

fn unmarshal(hook: &mut dyn Unmarshal, body: Body<'_>) -> BindResult<()> {
    let (payload, fallback) = match body {
        Body::Params(params) => (Payload::Params(params), None),
        Body::Value(value) => match value.as_map() {
            Some(params) => (Payload::Params(params), None),
            None => return Err(BindError::NotAMap { found: value.kind() }),
        },
        Body::Undecoded { error, raw } if error.is_unsupported() => {
            (Payload::Raw(raw), Some(error))
        }
        Body::Undecoded { error, .. } => return Err(BindError::Codec(error)),
    };

    match catch_unwind(AssertUnwindSafe(|| hook.unmarshal(payload))) {
        Ok(outcome) => outcome.map_err(BindError::Unmarshal),
        Err(panic) => {
            let message = panic_message(&*panic);
            warn!(%message, "record unmarshal panicked");
            Err(fallback.map_or(BindError::UnmarshalPanicked { message }, BindError::Codec))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|message| (*message).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_owned())
}
