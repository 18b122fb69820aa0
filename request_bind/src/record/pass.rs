//! Per-record field loop driven by generated code.

use std::collections::BTreeSet;

use tracing::debug;

use super::RecordSlot;
use crate::binder::{BindContext, Mode};
use crate::bindable::{Bindable, Original, write};
use crate::error::{FieldError, InputErrors};
use crate::options::Candidate;
use crate::record::Record;
use crate::tags::{FieldDescriptor, FieldMeta};
use crate::value::Params;

/// State of one pass over a record's fields.
///
/// Tracks which body keys were consumed and the outcome for every visited
/// field. Generated [`Record::bind_fields`] implementations call
/// [`FieldPass::field`] for plain fields, [`FieldPass::flatten`] for
/// flattened records, and [`FieldPass::describe`] followed by
/// [`FieldPass::detached`] for fields behind accessors.
pub struct FieldPass<'a> {
    params: &'a Params,
    cx: BindContext<'a>,
    matched: BTreeSet<String>,
    errors: InputErrors,
}

impl<'a> FieldPass<'a> {
    pub(crate) const fn new(params: &'a Params, cx: BindContext<'a>) -> Self {
        Self {
            params,
            cx,
            matched: BTreeSet::new(),
            errors: InputErrors::new(),
        }
    }

    /// Resolves a field's name and options, or `None` when it is skipped.
    #[must_use]
    pub fn describe(&self, meta: &FieldMeta) -> Option<FieldDescriptor> {
        let descriptor = self.cx.binder().tags().describe(meta);
        if descriptor.is_skipped() {
            debug!(field = meta.ident(), "skipping field");
            return None;
        }
        Some(descriptor)
    }

    /// Binds a field the record exposes directly.
    pub fn field<T: Bindable>(&mut self, meta: &FieldMeta, target: &mut T) {
        let Some(descriptor) = self.describe(meta) else {
            return;
        };
        let outcome = self.bind_one(&descriptor, target);
        self.errors.set(descriptor.name, outcome.err());
    }

    /// Binds a field reached through accessor methods.
    ///
    /// `current` is the getter's result. Returns the value to pass to the
    /// setter, or `None` when the field must not be written.
    pub fn detached<T: Bindable>(&mut self, descriptor: FieldDescriptor, current: T) -> Option<T> {
        let mut value = current;
        let outcome = self.bind_one(&descriptor, &mut value);
        match outcome {
            Ok(written) => {
                self.errors.set(descriptor.name, None);
                written.then_some(value)
            }
            Err(error) => {
                self.errors.set(descriptor.name, Some(error));
                None
            }
        }
    }

    /// Promotes the fields of a flattened record into this pass.
    ///
    /// Fields declared directly on the outer record take precedence over
    /// flattened fields with the same name. An empty slot is skipped.
    pub fn flatten<S: RecordSlot>(&mut self, meta: &FieldMeta, slot: &mut S) {
        let Some(record) = slot.record_mut() else {
            debug!(field = meta.ident(), "skipping empty flattened field");
            return;
        };
        debug!(field = meta.ident(), "binding flattened field");
        let mut nested = FieldPass::new(self.params, self.cx);
        record.bind_fields(&mut nested);
        let (matched, errors) = nested.finish();
        self.matched.extend(matched);
        self.errors.absorb(errors);
    }

    pub(crate) fn finish(self) -> (BTreeSet<String>, InputErrors) {
        (self.matched, self.errors)
    }

    fn bind_one<T: Bindable>(
        &mut self,
        descriptor: &FieldDescriptor,
        target: &mut T,
    ) -> Result<bool, FieldError> {
        let from_input = self.params.contains_key(&descriptor.name);
        let candidate = match self.params.get(&descriptor.name) {
            Some(value) => {
                self.matched.insert(descriptor.name.clone());
                Candidate::from_input(value.clone())
            }
            None => absent_candidate(target, self.cx.mode()),
        };
        let resolved = self.cx.binder().options().apply(
            &descriptor.options,
            &Original(&*target),
            candidate,
            from_input,
        )?;
        write(target, resolved, self.cx.with_from_input(from_input))
    }
}

fn absent_candidate<T: Bindable>(target: &T, mode: Mode) -> Candidate {
    let candidate = match mode {
        Mode::Merge => Candidate::Current,
        Mode::Replace => Candidate::Zero,
    };
    if !candidate.resolves_to_zero(&Original(target)) {
        return candidate;
    }
    target
        .default_value()
        .map_or(candidate, Candidate::Value)
}
