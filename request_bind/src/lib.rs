//! Bind decoded request bodies onto typed records.
//!
//! A record is a struct deriving [`Record`]. Each field is looked up in the
//! decoded body under a name taken from its tag metadata, run through the
//! tag's options (`required`, `default`, `immutable`, or custom ones), then
//! coerced into the field's type. Errors for every field are collected and
//! returned together as [`InputErrors`]; body keys no field consumed are
//! reported as [`UnusedFields`].
//!
//! ```rust
//! use request_bind::{Binder, Record, Request};
//!
//! #[derive(Debug, Default, Clone, Record)]
//! struct NewUser {
//!     #[request(",required")]
//!     name: String,
//!     #[request("years,default=18")]
//!     age: u8,
//!     nickname: Option<String>,
//! }
//!
//! let binder = Binder::new();
//! let request = Request::new("application/json", r#"{"name": "ada", "nickname": null}"#);
//! let mut user = NewUser::default();
//! request.bind(&binder, &mut user)?;
//! assert_eq!(user.name, "ada");
//! assert_eq!(user.age, 18);
//! assert_eq!(user.nickname, None);
//! # Ok::<(), request_bind::BindError>(())
//! ```
//!
//! The derive macro lives in the companion `request_bind_macros` crate and is
//! re-exported here.

pub use request_bind_macros::Record;

mod bindable;
pub mod binder;
pub mod codec;
mod error;
mod hooks;
pub mod options;
mod record;
mod request;
pub mod tags;
mod value;

pub use bindable::{Bindable, Receiver, assign, assign_present};
pub use binder::{BindContext, Binder, Body, Mode, Target, bind_record};
pub use codec::{Codec, CodecService, FormData};
pub use error::{
    BindError, BindResult, BoxError, CodecError, FieldError, InputErrors, RegistryError,
    UnusedFields,
};
pub use hooks::{ChangeReceive, Payload, PostBind, PreBind, Receive, Scan, Unmarshal};
pub use options::{Candidate, FieldView, OptionArg, OptionFunc, ReceiveKind};
pub use record::{FieldPass, Record, RecordSlot, coerce_record};
pub use request::Request;
pub use tags::{FieldDescriptor, FieldMeta, TagOption};
pub use value::{FileAttachment, Params, Value, ValueKind};
