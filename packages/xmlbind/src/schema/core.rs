//! Per-type mutator tables.

use std::collections::{BTreeSet, HashMap};

use super::traits::{BindValue, Bindable};
use super::types::{FieldShape, Value, ValueType};
use crate::config::mutator_name;

type AssignFn<T> = Box<dyn Fn(&mut T, Value) -> Result<(), Value>>;
type CollectFn = Box<dyn Fn(Vec<Value>) -> Result<Value, Value>>;

/// One registered single-argument setter.
pub struct Mutator<T> {
    field: String,
    name: String,
    shape: FieldShape,
    assign: AssignFn<T>,
    collect: Option<CollectFn>,
}

impl<T> Mutator<T> {
    /// Field name the mutator was registered under.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Conventional mutator name (`setField`).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter shape.
    #[must_use]
    pub fn shape(&self) -> FieldShape {
        self.shape
    }

    /// Invoke the mutator.
    ///
    /// Gives the value back when it does not fit the parameter.
    pub(crate) fn apply(&self, target: &mut T, value: Value) -> Result<(), Value> {
        (self.assign)(target, value)
    }

    /// Turn accumulated items into the parameter's container.
    ///
    /// Gives back the first item that does not fit the item type.
    pub(crate) fn collect(&self, items: Vec<Value>) -> Result<Value, Value> {
        match &self.collect {
            Some(collect) => collect(items),
            None => Ok(Value::object(items)),
        }
    }
}

/// Registration surface handed to [`Bindable::describe`].
pub struct SchemaBuilder<T> {
    mutators: Vec<Mutator<T>>,
}

impl<T: Bindable> SchemaBuilder<T> {
    fn new() -> Self {
        Self {
            mutators: Vec::new(),
        }
    }

    /// Register a text field.
    pub fn text(
        &mut self,
        field: impl Into<String>,
        setter: impl Fn(&mut T, String) + 'static,
    ) -> &mut Self {
        self.field(field, setter)
    }

    /// Register a 32-bit integer field.
    pub fn int(&mut self, field: impl Into<String>, setter: impl Fn(&mut T, i32) + 'static) -> &mut Self {
        self.field(field, setter)
    }

    /// Register a 64-bit integer field.
    pub fn long(&mut self, field: impl Into<String>, setter: impl Fn(&mut T, i64) + 'static) -> &mut Self {
        self.field(field, setter)
    }

    /// Register a boolean field.
    pub fn boolean(
        &mut self,
        field: impl Into<String>,
        setter: impl Fn(&mut T, bool) + 'static,
    ) -> &mut Self {
        self.field(field, setter)
    }

    /// Register a single-valued field of any [`BindValue`] type.
    pub fn field<V: BindValue>(
        &mut self,
        field: impl Into<String>,
        setter: impl Fn(&mut T, V) + 'static,
    ) -> &mut Self {
        self.push(
            field.into(),
            FieldShape::Scalar(V::value_type()),
            Box::new(move |target: &mut T, value: Value| -> Result<(), Value> {
                setter(target, V::from_value(value)?);
                Ok(())
            }),
            None,
        )
    }

    /// Register a field whose mutator takes the computed [`Value`] as is.
    ///
    /// `value_type` is the declared type; a policy override may deliver a
    /// different one.
    pub fn value(
        &mut self,
        field: impl Into<String>,
        value_type: ValueType,
        setter: impl Fn(&mut T, Value) + 'static,
    ) -> &mut Self {
        self.push(
            field.into(),
            FieldShape::Scalar(value_type),
            Box::new(move |target: &mut T, value: Value| -> Result<(), Value> {
                setter(target, value);
                Ok(())
            }),
            None,
        )
    }

    /// Register an ordered-sequence field. Items keep document order.
    pub fn sequence<V: BindValue>(
        &mut self,
        field: impl Into<String>,
        setter: impl Fn(&mut T, Vec<V>) + 'static,
    ) -> &mut Self {
        self.push(
            field.into(),
            FieldShape::OrderedSequence(V::value_type()),
            Box::new(move |target: &mut T, value: Value| -> Result<(), Value> {
                setter(target, value.downcast::<Vec<V>>()?);
                Ok(())
            }),
            Some(Box::new(|items: Vec<Value>| {
                items
                    .into_iter()
                    .map(V::from_value)
                    .collect::<Result<Vec<V>, Value>>()
                    .map(Value::object)
            })),
        )
    }

    /// Register a unique-set field. Duplicates are coalesced by `Ord`.
    pub fn set<V: BindValue + Ord>(
        &mut self,
        field: impl Into<String>,
        setter: impl Fn(&mut T, BTreeSet<V>) + 'static,
    ) -> &mut Self {
        self.push(
            field.into(),
            FieldShape::UniqueSet(V::value_type()),
            Box::new(move |target: &mut T, value: Value| -> Result<(), Value> {
                setter(target, value.downcast::<BTreeSet<V>>()?);
                Ok(())
            }),
            Some(Box::new(|items: Vec<Value>| {
                items
                    .into_iter()
                    .map(V::from_value)
                    .collect::<Result<BTreeSet<V>, Value>>()
                    .map(Value::object)
            })),
        )
    }

    fn push(
        &mut self,
        field: String,
        shape: FieldShape,
        assign: AssignFn<T>,
        collect: Option<CollectFn>,
    ) -> &mut Self {
        self.mutators.push(Mutator {
            name: mutator_name(&field),
            field,
            shape,
            assign,
            collect,
        });
        self
    }
}

/// Mutator table of one bindable type, indexed by mutator name.
pub struct Schema<T> {
    type_name: &'static str,
    mutators: Vec<Mutator<T>>,
    index: HashMap<String, usize>,
}

impl<T: Bindable> Schema<T> {
    /// Build the table for `T`.
    ///
    /// # Errors
    /// Returns the mutator name registered more than once.
    pub(crate) fn describe() -> Result<Self, String> {
        let mut builder = SchemaBuilder::new();
        T::describe(&mut builder);

        let mut index = HashMap::with_capacity(builder.mutators.len());
        for (position, mutator) in builder.mutators.iter().enumerate() {
            if index.insert(mutator.name.clone(), position).is_some() {
                return Err(mutator.name.clone());
            }
        }

        Ok(Self {
            type_name: T::type_name(),
            mutators: builder.mutators,
            index,
        })
    }

    /// Name of the described type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Find the mutator with the given conventional name.
    #[must_use]
    pub fn resolve(&self, mutator_name: &str) -> Option<&Mutator<T>> {
        self.index
            .get(mutator_name)
            .and_then(|&position| self.mutators.get(position))
    }
}
