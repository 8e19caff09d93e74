//! Helpers over `roxmltree` nodes used by the binder.

use roxmltree::{Document, Node};

use crate::error::Result;

/// Get the tag name without namespace.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmlbind::xml::local_name;
///
/// let doc = Document::parse(r#"<tz:list xmlns:tz="urn:tz"/>"#).unwrap();
/// assert_eq!(local_name(doc.root_element()), "list");
/// ```
pub fn local_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get the namespace-qualified tag name used in diagnostics.
///
/// Namespaced elements render as `{uri}local`, others as `local`.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmlbind::xml::qualified_name;
///
/// let doc = Document::parse(r#"<tz:list xmlns:tz="urn:tz"><plain/></tz:list>"#).unwrap();
/// let root = doc.root_element();
/// assert_eq!(qualified_name(root), "{urn:tz}list");
/// assert_eq!(qualified_name(root.first_element_child().unwrap()), "plain");
/// ```
pub fn qualified_name(node: Node<'_, '_>) -> String {
    let tag = node.tag_name();
    match tag.namespace() {
        Some(ns) => format!("{{{ns}}}{}", tag.name()),
        None => tag.name().to_string(),
    }
}

/// Get all element children of a node, in document order.
///
/// Text nodes, comments and processing instructions are excluded.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Check whether a node has at least one element child.
///
/// Elements without element children are leaves and carry their value as text.
pub fn has_element_children(node: Node<'_, '_>) -> bool {
    node.children().any(|child| child.is_element())
}

/// Get the text content of a leaf element, trimmed.
///
/// All direct text children are concatenated, so text split by a comment
/// or CDATA section is read as one value.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmlbind::xml::leaf_text;
///
/// let doc = Document::parse("<n> 4<!-- x -->2 </n>").unwrap();
/// assert_eq!(leaf_text(doc.root_element()), "42");
/// ```
pub fn leaf_text(node: Node<'_, '_>) -> String {
    let text: String = node
        .children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect();
    text.trim().to_string()
}

/// Get an attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Parse an XML document from a string.
///
/// # Errors
/// Returns `XmlParse` on malformed input.
pub fn parse_document(xml: &str) -> Result<Document<'_>> {
    Ok(Document::parse(xml)?)
}

/// Interpret raw input bytes as UTF-8 text.
///
/// A leading byte order mark is stripped.
///
/// # Errors
/// Returns `Encoding` when the bytes are not valid UTF-8.
pub fn bytes_to_str(bytes: &[u8]) -> Result<&str> {
    let text = std::str::from_utf8(bytes)?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}
