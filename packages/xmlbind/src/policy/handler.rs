//! Binding policy trait definition.

use std::any::Any;

use roxmltree::Node;

use crate::error::Result;
use crate::schema::{FieldShape, Value, ValueType};

/// Outcome of offering a value to [`BindingPolicy::save`].
#[derive(Debug)]
pub enum Assignment {
    /// The policy stored the value itself; the mutator is not invoked.
    Handled,
    /// The policy declined; the value goes to the default mutator.
    Declined(Value),
}

/// Caller-supplied hooks consulted during traversal.
///
/// Every method defaults to declining, so a policy only overrides the
/// decisions it cares about. One policy is borrowed for the duration of a
/// bind call and never retained afterwards.
pub trait BindingPolicy {
    /// Return `true` to discard the element and its whole subtree.
    fn skip(&self, _element: Node<'_, '_>) -> bool {
        false
    }

    /// Field name to use instead of the element's local name.
    fn field_name(&self, _element: Node<'_, '_>) -> Option<String> {
        None
    }

    /// Destination shape to use instead of the declared one.
    ///
    /// In a field context the override must keep the mutator's container
    /// family. Inside a container it must be a scalar shape.
    fn element_type(&self, _element: Node<'_, '_>) -> Option<FieldShape> {
        None
    }

    /// Parse leaf text for a type without a built-in coercion.
    ///
    /// # Errors
    /// Implementations report unparseable text as an error.
    fn parse_leaf(
        &self,
        _element: Node<'_, '_>,
        _value_type: &ValueType,
        _text: &str,
    ) -> Result<Option<Value>> {
        Ok(None)
    }

    /// Store a value on `target` in place of the default mutator.
    ///
    /// Not consulted for items appended to a container.
    ///
    /// Values are complete when offered: a nested composite arrives after
    /// all of its own children were bound and saved, so for one subtree the
    /// calls come innermost first and the parent's call comes last.
    ///
    /// # Errors
    /// Implementations may fail the bind.
    fn save(
        &mut self,
        _element: Node<'_, '_>,
        _target: &mut dyn Any,
        value: Value,
    ) -> Result<Assignment> {
        Ok(Assignment::Declined(value))
    }
}

/// Policy that declines every decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPolicy;

impl BindingPolicy for DefaultPolicy {}
