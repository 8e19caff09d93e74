//! Structural binder.
//!
//! For each child element the binder asks the policy whether to skip it,
//! resolves the destination mutator by field name, then either coerces leaf
//! text, assembles a container from repeated children, or constructs and
//! recurses into a nested composite value. The finished value is offered to
//! the policy's save hook before falling back to the mutator.

mod coerce;
mod engine;
mod entry;

pub use coerce::coerce_builtin;
pub use engine::Binder;
pub use entry::{bind_bytes_with, bind_document_with, bind_reader_with, bind_str, bind_str_with};

pub(crate) use engine::build_composite;
