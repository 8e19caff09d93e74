//! xmlbind - Bind parsed XML element trees onto typed Rust objects.
//!
//! Target types describe their settable fields once through [`Bindable`];
//! the binder walks the element tree, resolves each child element to a
//! mutator by name, coerces leaf text, collects repeated children into
//! sequences or sets and recurses into nested composites. A
//! [`BindingPolicy`] can skip elements, rename fields, override types,
//! parse custom leaves and intercept assignments.
//!
//! # Example
//!
//! ```
//! use xmlbind::{bind_str, Bindable, SchemaBuilder};
//!
//! #[derive(Default)]
//! struct Zone {
//!     tzid: String,
//!     offset: i32,
//! }
//!
//! impl Bindable for Zone {
//!     fn describe(schema: &mut SchemaBuilder<Self>) {
//!         schema
//!             .text("tzid", |z, v| z.tzid = v)
//!             .int("offset", |z, v| z.offset = v);
//!     }
//! }
//!
//! let zone: Zone = bind_str("<zone><tzid>UTC</tzid><offset>0</offset></zone>")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(zone.tzid, "UTC");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Binder limits and naming constants
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Element tree helpers over `roxmltree`
//! - [`schema`]: Type descriptors, values and per-type mutator tables
//! - [`policy`]: Binding policy hooks and the table-driven registry
//! - [`binder`]: Tree traversal and built-in coercions
//! - [`model`]: Timezone list documents
//! - [`output`]: YAML/JSON rendering
//! - [`cli`]: Command-line interface

pub mod binder;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod policy;
pub mod schema;
pub mod xml;

// Re-export main functions
pub use binder::{
    bind_bytes_with, bind_document_with, bind_reader_with, bind_str, bind_str_with, Binder,
};

// Re-export commonly used items
pub use config::BinderConfig;
pub use error::{BindError, Result};
pub use policy::{Assignment, BindingPolicy, DefaultPolicy, PolicyRegistry};
pub use schema::{BindValue, Bindable, FieldShape, SchemaBuilder, Value, ValueType};
