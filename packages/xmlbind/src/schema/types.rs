//! Value model and type descriptors.

use std::any::{Any, TypeId};
use std::fmt;

use roxmltree::Node;

use crate::binder::{build_composite, Binder};
use crate::error::Result;

use super::traits::Bindable;

/// Function that constructs and populates one composite value.
pub(crate) type BuildFn = fn(&mut Binder<'_>, Node<'_, '_>, usize) -> Result<Value>;

/// A value computed from an element, on its way to a mutator.
///
/// Composite objects, custom leaf values and assembled containers all travel
/// as [`Value::Object`].
#[derive(Debug)]
pub enum Value {
    /// Text content.
    Text(String),
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// Boolean.
    Bool(bool),
    /// Any other value.
    Object(Box<dyn Any>),
}

impl Value {
    /// Wrap an arbitrary value.
    #[must_use]
    pub fn object<T: Any>(value: T) -> Self {
        Self::Object(Box::new(value))
    }

    /// Short label for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Bool(_) => "boolean",
            Self::Object(_) => "object",
        }
    }

    /// Take the wrapped object out if it has type `T`.
    ///
    /// # Errors
    /// Gives the value back unchanged when it is not an object of type `T`.
    pub fn downcast<T: Any>(self) -> std::result::Result<T, Self> {
        match self {
            Self::Object(boxed) => boxed.downcast::<T>().map(|v| *v).map_err(Self::Object),
            other => Err(other),
        }
    }

    /// Borrow the text content, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

/// Descriptor of a composite (`Bindable`) type.
#[derive(Clone, Copy)]
pub struct CompositeType {
    name: &'static str,
    type_id: TypeId,
    build: BuildFn,
}

impl CompositeType {
    /// Descriptor for `T`.
    #[must_use]
    pub fn of<T: Bindable>() -> Self {
        Self {
            name: T::type_name(),
            type_id: TypeId::of::<T>(),
            build: build_composite::<T>,
        }
    }

    /// Type name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn build(&self) -> BuildFn {
        self.build
    }
}

impl PartialEq for CompositeType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for CompositeType {}

impl fmt::Debug for CompositeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompositeType").field(&self.name).finish()
    }
}

/// Destination type of a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    /// Text, taken verbatim.
    Text,
    /// 32-bit integer.
    Int,
    /// 64-bit integer.
    Long,
    /// Boolean (`true` / `false`).
    Bool,
    /// Caller-defined leaf type, parsed by the policy.
    Custom(&'static str),
    /// Nested object populated from child elements.
    Composite(CompositeType),
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("text"),
            Self::Int => f.write_str("int"),
            Self::Long => f.write_str("long"),
            Self::Bool => f.write_str("boolean"),
            Self::Custom(name) => f.write_str(name),
            Self::Composite(composite) => f.write_str(composite.name()),
        }
    }
}

/// Container kinds a field can accumulate repeated children into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFamily {
    /// Insertion-ordered, duplicates kept.
    OrderedSequence,
    /// Sorted, duplicates coalesced by the item ordering.
    UniqueSet,
}

impl ContainerFamily {
    /// Name used in diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OrderedSequence => "sequence",
            Self::UniqueSet => "set",
        }
    }
}

/// Shape of a field: a single value or a container of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    Scalar(ValueType),
    OrderedSequence(ValueType),
    UniqueSet(ValueType),
}

impl FieldShape {
    /// Container family, or `None` for scalars.
    #[must_use]
    pub fn container_family(&self) -> Option<ContainerFamily> {
        match self {
            Self::Scalar(_) => None,
            Self::OrderedSequence(_) => Some(ContainerFamily::OrderedSequence),
            Self::UniqueSet(_) => Some(ContainerFamily::UniqueSet),
        }
    }
}

impl fmt::Display for FieldShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(ty) => write!(f, "{ty}"),
            Self::OrderedSequence(ty) | Self::UniqueSet(ty) => {
                let family = self.container_family().map_or("", |family| family.as_str());
                write!(f, "{family}<{ty}>")
            }
        }
    }
}
