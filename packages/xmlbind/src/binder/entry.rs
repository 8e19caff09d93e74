//! Convenience entry points for one-shot binds.

use std::io::Read;

use roxmltree::Document;

use super::engine::Binder;
use crate::error::Result;
use crate::policy::{BindingPolicy, DefaultPolicy};
use crate::schema::Bindable;
use crate::xml::{bytes_to_str, parse_document};

/// Parse `xml` and bind it into a new `T` with the default policy.
///
/// # Returns
/// `Ok(None)` when `T` cannot be instantiated.
///
/// # Errors
/// Returns `XmlParse` on malformed input, or the first traversal failure.
pub fn bind_str<T: Bindable>(xml: &str) -> Result<Option<T>> {
    bind_str_with(xml, &mut DefaultPolicy)
}

/// Parse `xml` and bind it into a new `T` using `policy`.
///
/// # Errors
/// Returns `XmlParse` on malformed input, or the first traversal failure.
pub fn bind_str_with<T: Bindable>(
    xml: &str,
    policy: &mut dyn BindingPolicy,
) -> Result<Option<T>> {
    let doc = parse_document(xml)?;
    bind_document_with(&doc, policy)
}

/// Bind UTF-8 encoded XML bytes into a new `T` using `policy`.
///
/// # Errors
/// Returns `Encoding` for non-UTF-8 input, `XmlParse` on malformed input,
/// or the first traversal failure.
pub fn bind_bytes_with<T: Bindable>(
    bytes: &[u8],
    policy: &mut dyn BindingPolicy,
) -> Result<Option<T>> {
    bind_str_with(bytes_to_str(bytes)?, policy)
}

/// Read a whole XML stream and bind it into a new `T` using `policy`.
///
/// # Errors
/// Returns `Io` when reading fails, otherwise as [`bind_bytes_with`].
pub fn bind_reader_with<T: Bindable, R: Read>(
    mut reader: R,
    policy: &mut dyn BindingPolicy,
) -> Result<Option<T>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    bind_bytes_with(&bytes, policy)
}

/// Bind an already parsed document into a new `T` using `policy`.
///
/// # Errors
/// Returns the first traversal failure.
pub fn bind_document_with<T: Bindable>(
    doc: &Document<'_>,
    policy: &mut dyn BindingPolicy,
) -> Result<Option<T>> {
    Binder::new(policy).bind_document(doc)
}
