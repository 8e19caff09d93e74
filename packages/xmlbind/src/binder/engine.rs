//! Structural binder that walks the element tree and the object graph in
//! lock-step.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt::Display;
use std::rc::Rc;

use roxmltree::{Document, Node};

use super::coerce::coerce_builtin;
use crate::config::{mutator_name, BinderConfig};
use crate::error::{BindError, Result};
use crate::policy::{Assignment, BindingPolicy};
use crate::schema::{Bindable, FieldShape, Mutator, Schema, Value, ValueType};
use crate::xml::{element_children, has_element_children, leaf_text, local_name, qualified_name};

/// Binder for one bind call.
///
/// Borrows the policy for its whole lifetime and caches each target type's
/// mutator table on first use. Not meant to be shared between threads.
pub struct Binder<'p> {
    policy: &'p mut dyn BindingPolicy,
    config: BinderConfig,
    schemas: HashMap<TypeId, Rc<dyn Any>>,
}

impl<'p> Binder<'p> {
    /// Create a binder with the default configuration.
    #[must_use]
    pub fn new(policy: &'p mut dyn BindingPolicy) -> Self {
        Self::with_config(policy, BinderConfig::default())
    }

    /// Create a binder with an explicit configuration.
    #[must_use]
    pub fn with_config(policy: &'p mut dyn BindingPolicy, config: BinderConfig) -> Self {
        Self {
            policy,
            config,
            schemas: HashMap::new(),
        }
    }

    /// Bind a parsed document into a new `T`.
    ///
    /// # Errors
    /// See [`Binder::bind_root`].
    pub fn bind_document<T: Bindable>(&mut self, doc: &Document<'_>) -> Result<Option<T>> {
        self.bind_root(doc.root_element())
    }

    /// Instantiate `T` and bind every child of `root` into it.
    ///
    /// The root element itself is not matched to a field.
    ///
    /// # Returns
    /// `Ok(None)` when `T` cannot be instantiated.
    ///
    /// # Errors
    /// Returns the first traversal failure; the partially built object is
    /// dropped.
    pub fn bind_root<T: Bindable>(&mut self, root: Node<'_, '_>) -> Result<Option<T>> {
        self.config.validate()?;

        let Some(mut target) = T::instantiate() else {
            tracing::warn!(
                type_name = T::type_name(),
                root = %qualified_name(root),
                "Target type cannot be instantiated"
            );
            return Ok(None);
        };

        tracing::debug!(
            type_name = T::type_name(),
            root = %qualified_name(root),
            "Binding document"
        );

        for child in element_children(root) {
            self.populate(child, &mut target, 1)?;
        }

        tracing::debug!(type_name = T::type_name(), "Bound document");
        Ok(Some(target))
    }

    /// Bind one element into a field of `target`, recursing into its children.
    ///
    /// # Errors
    /// Returns the first traversal failure.
    pub fn bind_element<T: Bindable>(&mut self, element: Node<'_, '_>, target: &mut T) -> Result<()> {
        self.config.validate()?;
        self.populate(element, target, 1)
    }

    /// Resolve the field for `element` on `target`, compute its value and
    /// assign it.
    fn populate<T: Bindable>(
        &mut self,
        element: Node<'_, '_>,
        target: &mut T,
        depth: usize,
    ) -> Result<()> {
        if self.policy.skip(element) {
            tracing::trace!(element = %qualified_name(element), "Skipping element");
            return Ok(());
        }

        self.check_depth(element, depth)?;

        let schema = self.schema::<T>(element)?;
        let field = self
            .policy
            .field_name(element)
            .unwrap_or_else(|| local_name(element).to_string());
        let name = mutator_name(&field);

        let Some(mutator) = schema.resolve(&name) else {
            if self.config.ignore_unknown_fields {
                tracing::warn!(
                    element = %qualified_name(element),
                    mutator = %name,
                    type_name = schema.type_name(),
                    "No mutator for element, skipping"
                );
                return Ok(());
            }
            return Err(BindError::NoSuchField {
                element: qualified_name(element),
                field,
                mutator: name,
                type_name: schema.type_name().to_string(),
            });
        };

        let shape = self.field_shape(element, mutator.shape())?;
        let value = match shape {
            FieldShape::Scalar(value_type) => self.scalar_value(element, &value_type, depth)?,
            FieldShape::OrderedSequence(item_type) | FieldShape::UniqueSet(item_type) => {
                if !has_element_children(element) {
                    return Err(BindError::UnsupportedLeafType {
                        element: qualified_name(element),
                        type_name: shape.to_string(),
                    });
                }
                let items = self.container_items(element, &item_type, depth)?;
                mutator
                    .collect(items)
                    .map_err(|item| type_mismatch(element, item_type, &item))?
            }
        };

        self.assign(element, target, mutator, value)
    }

    /// Destination shape of a field, after the policy override.
    fn field_shape(&self, element: Node<'_, '_>, declared: FieldShape) -> Result<FieldShape> {
        match self.policy.element_type(element) {
            None => Ok(declared),
            Some(requested) if requested.container_family() == declared.container_family() => {
                Ok(requested)
            }
            Some(requested) => Err(BindError::UnsupportedContainerType {
                element: qualified_name(element),
                declared: declared.to_string(),
                requested: requested.to_string(),
            }),
        }
    }

    /// Compute every item of a container from the children of `element`.
    ///
    /// Items bypass field resolution and the policy's save hook.
    fn container_items(
        &mut self,
        element: Node<'_, '_>,
        item_type: &ValueType,
        depth: usize,
    ) -> Result<Vec<Value>> {
        let item_depth = depth + 1;
        let mut items = Vec::new();

        for child in element_children(element) {
            if self.policy.skip(child) {
                tracing::trace!(element = %qualified_name(child), "Skipping container item");
                continue;
            }

            self.check_depth(child, item_depth)?;

            let value_type = match self.policy.element_type(child) {
                None => *item_type,
                Some(FieldShape::Scalar(value_type)) => value_type,
                Some(shape) => {
                    return Err(BindError::UnsupportedGenericShape {
                        element: qualified_name(child),
                        shape: shape.to_string(),
                    })
                }
            };

            items.push(self.scalar_value(child, &value_type, item_depth)?);
        }

        Ok(items)
    }

    /// Compute a single value: a leaf from text, a composite from children.
    fn scalar_value(
        &mut self,
        element: Node<'_, '_>,
        value_type: &ValueType,
        depth: usize,
    ) -> Result<Value> {
        if !has_element_children(element) {
            return self.leaf_value(element, value_type);
        }

        match value_type {
            ValueType::Composite(composite) => (composite.build())(self, element, depth),
            other => Err(BindError::UnsupportedComplexType {
                element: qualified_name(element),
                type_name: other.to_string(),
            }),
        }
    }

    /// Coerce leaf text, falling back to the policy for non-built-in types.
    fn leaf_value(&self, element: Node<'_, '_>, value_type: &ValueType) -> Result<Value> {
        let text = leaf_text(element);

        match coerce_builtin(value_type, &text) {
            Some(Ok(value)) => Ok(value),
            Some(Err(reason)) => Err(BindError::InvalidLeafValue {
                element: qualified_name(element),
                type_name: value_type.to_string(),
                text,
                reason,
            }),
            None => self
                .policy
                .parse_leaf(element, value_type, &text)?
                .ok_or_else(|| BindError::UnsupportedLeafType {
                    element: qualified_name(element),
                    type_name: value_type.to_string(),
                }),
        }
    }

    /// Offer the value to the policy, then to the mutator.
    fn assign<T: Bindable>(
        &mut self,
        element: Node<'_, '_>,
        target: &mut T,
        mutator: &Mutator<T>,
        value: Value,
    ) -> Result<()> {
        match self.policy.save(element, &mut *target, value)? {
            Assignment::Handled => {
                tracing::trace!(element = %qualified_name(element), "Value stored by policy");
                Ok(())
            }
            Assignment::Declined(value) => {
                tracing::trace!(
                    element = %qualified_name(element),
                    field = mutator.field(),
                    mutator = mutator.name(),
                    "Invoking mutator"
                );
                mutator
                    .apply(target, value)
                    .map_err(|rejected| type_mismatch(element, mutator.shape(), &rejected))
            }
        }
    }

    fn check_depth(&self, element: Node<'_, '_>, depth: usize) -> Result<()> {
        if depth > self.config.max_depth {
            return Err(BindError::DepthExceeded {
                element: qualified_name(element),
                limit: self.config.max_depth,
            });
        }
        Ok(())
    }

    /// Mutator table for `T`, built on first use.
    fn schema<T: Bindable>(&mut self, element: Node<'_, '_>) -> Result<Rc<Schema<T>>> {
        let key = TypeId::of::<T>();
        if let Some(cached) = self.schemas.get(&key) {
            if let Ok(schema) = Rc::clone(cached).downcast::<Schema<T>>() {
                return Ok(schema);
            }
        }

        let schema = Schema::<T>::describe().map_err(|mutator| BindError::AmbiguousMutator {
            element: qualified_name(element),
            mutator,
            type_name: T::type_name().to_string(),
        })?;
        let schema = Rc::new(schema);
        self.schemas.insert(key, Rc::clone(&schema) as Rc<dyn Any>);
        Ok(schema)
    }
}

/// Construct a `T` and populate it from the children of `element`.
pub(crate) fn build_composite<T: Bindable>(
    binder: &mut Binder<'_>,
    element: Node<'_, '_>,
    depth: usize,
) -> Result<Value> {
    let mut target = T::instantiate().ok_or_else(|| BindError::Construction {
        element: qualified_name(element),
        type_name: T::type_name().to_string(),
    })?;

    for child in element_children(element) {
        binder.populate(child, &mut target, depth + 1)?;
    }

    Ok(Value::object(target))
}

fn type_mismatch(element: Node<'_, '_>, expected: impl Display, found: &Value) -> BindError {
    BindError::TypeMismatch {
        element: qualified_name(element),
        expected: expected.to_string(),
        found: found.kind().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{DefaultPolicy, PolicyRegistry};
    use crate::schema::SchemaBuilder;
    use crate::xml::parse_document;
    use std::collections::BTreeSet;

    #[derive(Debug, Default, PartialEq)]
    struct Inner {
        count: i32,
    }

    impl Bindable for Inner {
        fn type_name() -> &'static str {
            "Inner"
        }

        fn describe(schema: &mut SchemaBuilder<Self>) {
            schema.int("count", |inner, v| inner.count = v);
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Outer {
        name: String,
        flag: bool,
        inner: Option<Inner>,
        items: Vec<i64>,
        tags: BTreeSet<String>,
    }

    impl Bindable for Outer {
        fn type_name() -> &'static str {
            "Outer"
        }

        fn describe(schema: &mut SchemaBuilder<Self>) {
            schema
                .text("name", |o, v| o.name = v)
                .boolean("flag", |o, v| o.flag = v)
                .field("inner", |o: &mut Self, v: Inner| o.inner = Some(v))
                .sequence("items", |o: &mut Self, v: Vec<i64>| o.items = v)
                .set("tags", |o: &mut Self, v: BTreeSet<String>| o.tags = v);
        }
    }

    #[derive(Debug, Default)]
    struct TreeNode {
        label: String,
        node: Option<Box<TreeNode>>,
    }

    impl Bindable for TreeNode {
        fn type_name() -> &'static str {
            "TreeNode"
        }

        fn describe(schema: &mut SchemaBuilder<Self>) {
            schema
                .text("label", |n, v| n.label = v)
                .field("node", |n: &mut Self, v: TreeNode| n.node = Some(Box::new(v)));
        }
    }

    #[derive(Debug, Default)]
    struct Abstract;

    impl Bindable for Abstract {
        fn instantiate() -> Option<Self> {
            None
        }

        fn describe(_schema: &mut SchemaBuilder<Self>) {}
    }

    #[derive(Debug, Default)]
    struct Holder {
        part: Option<Abstract>,
    }

    impl Bindable for Holder {
        fn type_name() -> &'static str {
            "Holder"
        }

        fn describe(schema: &mut SchemaBuilder<Self>) {
            schema.field("part", |h: &mut Self, v: Abstract| h.part = Some(v));
        }
    }

    #[derive(Debug, Default)]
    struct Overloaded {
        text: String,
        number: i32,
    }

    impl Bindable for Overloaded {
        fn type_name() -> &'static str {
            "Overloaded"
        }

        fn describe(schema: &mut SchemaBuilder<Self>) {
            schema
                .text("value", |o, v| o.text = v)
                .int("value", |o, v| o.number = v);
        }
    }

    fn bind<T: Bindable>(xml: &str, policy: &mut dyn BindingPolicy) -> Result<Option<T>> {
        let doc = parse_document(xml).unwrap();
        Binder::new(policy).bind_document(&doc)
    }

    fn bind_default<T: Bindable>(xml: &str) -> Result<Option<T>> {
        bind(xml, &mut DefaultPolicy)
    }

    #[test]
    fn test_bind_nested_document() {
        let outer: Outer = bind_default(
            "<outer>
                <name> first </name>
                <flag>true</flag>
                <inner><count>7</count></inner>
                <items><i>3</i><i>1</i><i>2</i></items>
                <tags><t>b</t><t>a</t><t>b</t></tags>
            </outer>",
        )
        .unwrap()
        .unwrap();

        assert_eq!(outer.name, "first");
        assert!(outer.flag);
        assert_eq!(outer.inner, Some(Inner { count: 7 }));
        assert_eq!(outer.items, vec![3, 1, 2]);
        assert_eq!(
            outer.tags.iter().map(String::as_str).collect::<Vec<_>>(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_root_element_is_not_matched() {
        let outer: Outer = bind_default("<anything><name>x</name></anything>")
            .unwrap()
            .unwrap();
        assert_eq!(outer.name, "x");
    }

    #[test]
    fn test_later_element_overwrites_scalar() {
        let outer: Outer = bind_default("<o><name>a</name><name>b</name></o>")
            .unwrap()
            .unwrap();
        assert_eq!(outer.name, "b");
    }

    #[test]
    fn test_no_such_field() {
        let err = bind_default::<Outer>("<o><colour>red</colour></o>").unwrap_err();
        match err {
            BindError::NoSuchField {
                element,
                field,
                mutator,
                type_name,
            } => {
                assert_eq!(element, "colour");
                assert_eq!(field, "colour");
                assert_eq!(mutator, "setColour");
                assert_eq!(type_name, "Outer");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_ignore_unknown_fields() {
        let doc = parse_document("<o><colour>red</colour><name>x</name></o>").unwrap();
        let mut policy = DefaultPolicy;
        let outer: Outer = Binder::with_config(
            &mut policy,
            BinderConfig::default().with_ignore_unknown_fields(true),
        )
        .bind_document(&doc)
        .unwrap()
        .unwrap();
        assert_eq!(outer.name, "x");
    }

    #[test]
    fn test_depth_exceeded() {
        let xml = "<root><node><node><node><label>deep</label></node></node></node></root>";
        let doc = parse_document(xml).unwrap();
        let mut policy = DefaultPolicy;

        let err = Binder::with_config(&mut policy, BinderConfig::new().with_max_depth(3))
            .bind_document::<TreeNode>(&doc)
            .unwrap_err();
        match err {
            BindError::DepthExceeded { element, limit } => {
                assert_eq!(element, "label");
                assert_eq!(limit, 3);
            }
            other => panic!("unexpected error {other}"),
        }

        let tree: TreeNode = Binder::with_config(&mut policy, BinderConfig::new().with_max_depth(4))
            .bind_document(&doc)
            .unwrap()
            .unwrap();
        let leaf = tree.node.unwrap().node.unwrap().node.unwrap();
        assert_eq!(leaf.label, "deep");
    }

    #[test]
    fn test_skipped_element_below_depth_limit() {
        let doc = parse_document("<o><inner><count>1</count><junk/></inner></o>").unwrap();
        let mut policy = PolicyRegistry::new();
        policy.skip_elements(["count", "junk"]);

        let outer: Outer = Binder::with_config(&mut policy, BinderConfig::new().with_max_depth(1))
            .bind_document(&doc)
            .unwrap()
            .unwrap();
        assert_eq!(outer.inner, Some(Inner { count: 0 }));
    }

    #[test]
    fn test_skipped_container_item_below_depth_limit() {
        let doc = parse_document("<o><tags><t>kept</t></tags></o>").unwrap();
        let mut policy = PolicyRegistry::new();
        policy.skip_elements(["t"]);

        let outer: Outer = Binder::with_config(&mut policy, BinderConfig::new().with_max_depth(1))
            .bind_document(&doc)
            .unwrap()
            .unwrap();
        assert!(outer.tags.is_empty());
    }

    #[test]
    fn test_ambiguous_mutator() {
        let err = bind_default::<Overloaded>("<o><value>1</value></o>").unwrap_err();
        match err {
            BindError::AmbiguousMutator {
                mutator, type_name, ..
            } => {
                assert_eq!(mutator, "setValue");
                assert_eq!(type_name, "Overloaded");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_uninstantiable_root_is_absent() {
        let result = bind_default::<Abstract>("<a/>").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_uninstantiable_nested_type_fails() {
        let err = bind_default::<Holder>("<h><part><x/></part></h>").unwrap_err();
        match err {
            BindError::Construction { element, .. } => assert_eq!(element, "part"),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_children_on_leaf_type() {
        let err = bind_default::<Outer>("<o><name><first>a</first></name></o>").unwrap_err();
        match err {
            BindError::UnsupportedComplexType { element, type_name } => {
                assert_eq!(element, "name");
                assert_eq!(type_name, "text");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_leaf_text_for_container() {
        let err = bind_default::<Outer>("<o><items>5</items></o>").unwrap_err();
        assert!(matches!(err, BindError::UnsupportedLeafType { .. }));
    }

    #[test]
    fn test_invalid_leaf_text() {
        let err = bind_default::<Outer>("<o><inner><count>many</count></inner></o>").unwrap_err();
        match err {
            BindError::InvalidLeafValue {
                element,
                type_name,
                text,
                ..
            } => {
                assert_eq!(element, "count");
                assert_eq!(type_name, "int");
                assert_eq!(text, "many");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_override_changing_container_family() {
        let mut policy = PolicyRegistry::new();
        policy.override_type("items", FieldShape::UniqueSet(ValueType::Long));

        let err = bind::<Outer>("<o><items><i>1</i></items></o>", &mut policy).unwrap_err();
        match err {
            BindError::UnsupportedContainerType {
                element,
                declared,
                requested,
            } => {
                assert_eq!(element, "items");
                assert_eq!(declared, "sequence<long>");
                assert_eq!(requested, "set<long>");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_override_container_item_with_container() {
        let mut policy = PolicyRegistry::new();
        policy.override_type("i", FieldShape::OrderedSequence(ValueType::Long));

        let err = bind::<Outer>("<o><items><i>1</i></items></o>", &mut policy).unwrap_err();
        assert!(matches!(err, BindError::UnsupportedGenericShape { .. }));
    }

    #[test]
    fn test_override_value_rejected_by_mutator() {
        let mut policy = PolicyRegistry::new();
        policy.override_type("name", FieldShape::Scalar(ValueType::Long));

        let err = bind::<Outer>("<o><name>42</name></o>", &mut policy).unwrap_err();
        match err {
            BindError::TypeMismatch {
                element,
                expected,
                found,
            } => {
                assert_eq!(element, "name");
                assert_eq!(expected, "text");
                assert_eq!(found, "long");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_policy_rename_and_skip() {
        let mut policy = PolicyRegistry::new();
        policy.rename("title", "name").skip_elements(["flag"]);

        let outer: Outer = bind("<o><title>x</title><flag>maybe</flag></o>", &mut policy)
            .unwrap()
            .unwrap();
        assert_eq!(outer.name, "x");
        assert!(!outer.flag);
    }

    struct UpperCaseNames {
        saved: usize,
    }

    impl BindingPolicy for UpperCaseNames {
        fn save(
            &mut self,
            element: Node<'_, '_>,
            target: &mut dyn Any,
            value: Value,
        ) -> Result<Assignment> {
            if local_name(element) != "name" {
                return Ok(Assignment::Declined(value));
            }
            match (target.downcast_mut::<Outer>(), value) {
                (Some(outer), Value::Text(text)) => {
                    outer.name = text.to_uppercase();
                    self.saved += 1;
                    Ok(Assignment::Handled)
                }
                (_, value) => Ok(Assignment::Declined(value)),
            }
        }
    }

    #[test]
    fn test_policy_save_replaces_mutator() {
        let mut policy = UpperCaseNames { saved: 0 };
        let outer: Outer = bind("<o><name>amsterdam</name><flag>true</flag></o>", &mut policy)
            .unwrap()
            .unwrap();

        assert_eq!(outer.name, "AMSTERDAM");
        assert!(outer.flag);
        assert_eq!(policy.saved, 1);
    }

    #[derive(Default)]
    struct SaveLog {
        elements: Vec<String>,
    }

    impl BindingPolicy for SaveLog {
        fn save(
            &mut self,
            element: Node<'_, '_>,
            _target: &mut dyn Any,
            value: Value,
        ) -> Result<Assignment> {
            self.elements.push(local_name(element).to_string());
            Ok(Assignment::Declined(value))
        }
    }

    #[test]
    fn test_save_sees_children_before_parent() {
        let mut policy = SaveLog::default();
        let outer: Outer = bind(
            "<o><name>a</name><inner><count>1</count></inner><items><i>1</i></items></o>",
            &mut policy,
        )
        .unwrap()
        .unwrap();

        assert_eq!(outer.inner, Some(Inner { count: 1 }));
        assert_eq!(policy.elements, vec!["name", "count", "inner", "items"]);
    }

    #[test]
    fn test_bind_element_into_existing_target() {
        let doc = parse_document("<name>x</name>").unwrap();
        let mut policy = DefaultPolicy;
        let mut outer = Outer {
            flag: true,
            ..Outer::default()
        };

        Binder::new(&mut policy)
            .bind_element(doc.root_element(), &mut outer)
            .unwrap();
        assert_eq!(outer.name, "x");
        assert!(outer.flag);
    }

    #[test]
    fn test_zero_depth_config_is_rejected() {
        let doc = parse_document("<o/>").unwrap();
        let mut policy = DefaultPolicy;
        let err = Binder::with_config(&mut policy, BinderConfig::new().with_max_depth(0))
            .bind_document::<Outer>(&doc)
            .unwrap_err();
        assert!(matches!(err, BindError::InvalidConfig(_)));
    }
}
