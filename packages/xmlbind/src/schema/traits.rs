//! Traits implemented by bindable types and mutator parameters.

use super::core::SchemaBuilder;
use super::types::{CompositeType, Value, ValueType};

/// A composite type the binder can populate from child elements.
///
/// Implementors register one mutator per field in [`Bindable::describe`].
///
/// # Examples
/// ```
/// use xmlbind::schema::{Bindable, SchemaBuilder};
///
/// #[derive(Debug, Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Bindable for Point {
///     fn describe(schema: &mut SchemaBuilder<Self>) {
///         schema.int("x", |p, v| p.x = v).int("y", |p, v| p.y = v);
///     }
/// }
///
/// let point: Point = xmlbind::bind_str("<point><x>1</x><y>2</y></point>")
///     .unwrap()
///     .unwrap();
/// assert_eq!((point.x, point.y), (1, 2));
/// ```
pub trait Bindable: Default + 'static {
    /// Name used in diagnostics.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Create an empty instance, or `None` if the type cannot be built.
    fn instantiate() -> Option<Self> {
        Some(Self::default())
    }

    /// Register the mutators of this type.
    fn describe(schema: &mut SchemaBuilder<Self>);
}

/// A type a mutator can accept.
///
/// Implemented for the built-in leaf types, for every [`Bindable`] type, and
/// by callers for custom leaf types produced by their policy.
pub trait BindValue: Sized + 'static {
    /// Destination type the binder resolves for this parameter.
    fn value_type() -> ValueType;

    /// Convert a computed value.
    ///
    /// # Errors
    /// Gives the value back when it does not have the expected type.
    fn from_value(value: Value) -> Result<Self, Value>;
}

impl BindValue for String {
    fn value_type() -> ValueType {
        ValueType::Text
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Text(text) => Ok(text),
            other => Err(other),
        }
    }
}

impl BindValue for i32 {
    fn value_type() -> ValueType {
        ValueType::Int
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Int(n) => Ok(n),
            other => Err(other),
        }
    }
}

impl BindValue for i64 {
    fn value_type() -> ValueType {
        ValueType::Long
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Long(n) => Ok(n),
            other => Err(other),
        }
    }
}

impl BindValue for bool {
    fn value_type() -> ValueType {
        ValueType::Bool
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(other),
        }
    }
}

impl<T: Bindable> BindValue for T {
    fn value_type() -> ValueType {
        ValueType::Composite(CompositeType::of::<T>())
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        value.downcast::<T>()
    }
}
