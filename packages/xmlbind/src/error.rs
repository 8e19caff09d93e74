//! Error types for the binder.
//!
//! Every traversal failure is a structural mismatch between the input
//! document and the target type. Variants carry the qualified name of the
//! offending element and, where one exists, the destination type name.

use thiserror::Error;

/// Main error type for the binder library.
#[derive(Debug, Error)]
pub enum BindError {
    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// Input bytes are not valid UTF-8.
    #[error("Input is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// IO error while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A nested composite value could not be instantiated.
    #[error("Cannot construct {type_name} for element <{element}>")]
    Construction { element: String, type_name: String },

    /// An element with child elements targets a type that cannot hold them.
    #[error("Element <{element}> has child elements but {type_name} is not a composite type")]
    UnsupportedComplexType { element: String, type_name: String },

    /// No mutator matches the element's field name.
    #[error("No mutator {mutator} for field '{field}' (element <{element}>) on {type_name}")]
    NoSuchField {
        element: String,
        field: String,
        mutator: String,
        type_name: String,
    },

    /// More than one mutator is registered under the same name.
    #[error("Multiple mutators named {mutator} on {type_name} (element <{element}>)")]
    AmbiguousMutator {
        element: String,
        mutator: String,
        type_name: String,
    },

    /// Neither the built-in coercions nor the policy can produce a leaf value.
    #[error("Unsupported leaf type {type_name} for element <{element}>")]
    UnsupportedLeafType { element: String, type_name: String },

    /// Leaf text could not be parsed as the destination type.
    #[error("Invalid {type_name} value '{text}' for element <{element}>: {reason}")]
    InvalidLeafValue {
        element: String,
        type_name: String,
        text: String,
        reason: String,
    },

    /// The policy requested a container shape the mutator cannot accept.
    #[error("Element <{element}> requests {requested} but its mutator accepts {declared}")]
    UnsupportedContainerType {
        element: String,
        declared: String,
        requested: String,
    },

    /// A container item resolved to something other than a single value type.
    #[error("Unsupported container item shape {shape} for element <{element}>")]
    UnsupportedGenericShape { element: String, shape: String },

    /// The computed value does not fit the mutator's parameter.
    #[error("Mutator for element <{element}> expects {expected}, got {found}")]
    TypeMismatch {
        element: String,
        expected: String,
        found: String,
    },

    /// Recursion guard tripped.
    #[error("Maximum binding depth {limit} exceeded at element <{element}>")]
    DepthExceeded { element: String, limit: usize },

    /// Invalid binder configuration.
    #[error("Invalid binder configuration: {0}")]
    InvalidConfig(String),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

/// Result type alias for binder operations.
pub type Result<T> = std::result::Result<T, BindError>;
