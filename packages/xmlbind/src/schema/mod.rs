//! Type descriptors for bindable types.
//!
//! Each target type registers, once per bind call, a table of single-argument
//! mutators keyed by conventional name (`set` + capitalised field name). The
//! table carries each field's declared shape, so container item types are
//! known statically instead of being discovered per element.

mod core;
mod traits;
mod types;

pub use self::core::{Mutator, Schema, SchemaBuilder};
pub use traits::{BindValue, Bindable};
pub use types::{CompositeType, ContainerFamily, FieldShape, Value, ValueType};
