//! Table-driven binding policy.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use roxmltree::Node;

use super::handler::BindingPolicy;
use crate::error::{BindError, Result};
use crate::schema::{FieldShape, Value, ValueType};
use crate::xml::{get_attribute, local_name, qualified_name};

type LeafParser = Box<dyn Fn(&str) -> std::result::Result<Value, String>>;

/// Policy configured from tables keyed by element local name.
///
/// Covers the common customisations without a hand-written
/// [`BindingPolicy`]: skip lists, field renames, type overrides and parsers
/// for custom leaf types. Saving always goes to the default mutator.
///
/// # Examples
/// ```
/// use xmlbind::policy::PolicyRegistry;
///
/// let mut policy = PolicyRegistry::new();
/// policy.skip_elements(["meta"]).rename("zone-id", "tzid");
/// assert!(policy.should_skip("meta"));
/// ```
#[derive(Default)]
pub struct PolicyRegistry {
    skip_tags: HashSet<String>,
    skip_attributes: Vec<(String, String)>,
    renames: HashMap<String, String>,
    type_overrides: HashMap<String, FieldShape>,
    leaf_parsers: HashMap<String, LeafParser>,
}

impl PolicyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip elements with these local names, subtree included.
    pub fn skip_elements(&mut self, tag_names: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        for tag in tag_names {
            self.skip_tags.insert(tag.into());
        }
        self
    }

    /// Skip elements carrying `name="value"`.
    pub fn skip_when_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> &mut Self {
        self.skip_attributes.push((name.into(), value.into()));
        self
    }

    /// Bind elements named `tag_name` to field `field`.
    pub fn rename(&mut self, tag_name: impl Into<String>, field: impl Into<String>) -> &mut Self {
        self.renames.insert(tag_name.into(), field.into());
        self
    }

    /// Force the destination shape of elements named `tag_name`.
    pub fn override_type(&mut self, tag_name: impl Into<String>, shape: FieldShape) -> &mut Self {
        self.type_overrides.insert(tag_name.into(), shape);
        self
    }

    /// Register the parser for a custom leaf type.
    pub fn leaf_parser<E: Display>(
        &mut self,
        type_name: impl Into<String>,
        parser: impl Fn(&str) -> std::result::Result<Value, E> + 'static,
    ) -> &mut Self {
        self.leaf_parsers.insert(
            type_name.into(),
            Box::new(move |text: &str| parser(text).map_err(|e| e.to_string())),
        );
        self
    }

    /// Check if a tag is on the skip list.
    #[must_use]
    pub fn should_skip(&self, tag_name: &str) -> bool {
        self.skip_tags.contains(tag_name)
    }

    /// Return set of all skipped tag names.
    #[must_use]
    pub fn skipped_tags(&self) -> HashSet<&str> {
        self.skip_tags.iter().map(|s| s.as_str()).collect()
    }
}

impl BindingPolicy for PolicyRegistry {
    fn skip(&self, element: Node<'_, '_>) -> bool {
        self.should_skip(local_name(element))
            || self
                .skip_attributes
                .iter()
                .any(|(name, value)| get_attribute(element, name) == Some(value.as_str()))
    }

    fn field_name(&self, element: Node<'_, '_>) -> Option<String> {
        self.renames.get(local_name(element)).cloned()
    }

    fn element_type(&self, element: Node<'_, '_>) -> Option<FieldShape> {
        self.type_overrides.get(local_name(element)).copied()
    }

    fn parse_leaf(
        &self,
        element: Node<'_, '_>,
        value_type: &ValueType,
        text: &str,
    ) -> Result<Option<Value>> {
        let ValueType::Custom(type_name) = value_type else {
            return Ok(None);
        };
        let Some(parser) = self.leaf_parsers.get(*type_name) else {
            return Ok(None);
        };

        parser(text)
            .map(Some)
            .map_err(|reason| BindError::InvalidLeafValue {
                element: qualified_name(element),
                type_name: (*type_name).to_string(),
                text: text.to_string(),
                reason,
            })
    }
}
