//! Configuration constants and binder settings.

use crate::error::{BindError, Result};

/// Default recursion limit for a single bind call.
///
/// Documents are trees, so real inputs stay far below this. The guard exists
/// for policies that keep resolving an element to a type that contains itself.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Prefix of the conventional mutator name.
pub const MUTATOR_PREFIX: &str = "set";

/// Settings for one [`Binder`](crate::binder::Binder).
///
/// # Examples
/// ```
/// use xmlbind::config::BinderConfig;
///
/// let config = BinderConfig::default().with_max_depth(16);
/// assert!(config.validate().is_ok());
/// assert!(BinderConfig::default().with_max_depth(0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinderConfig {
    /// Deepest element nesting (root children are depth 1) before failing
    /// with `DepthExceeded`.
    pub max_depth: usize,

    /// Skip elements that have no matching mutator instead of failing with
    /// `NoSuchField`. Each skipped element is logged at `warn`.
    pub ignore_unknown_fields: bool,
}

impl BinderConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            ignore_unknown_fields: false,
        }
    }

    /// Set the recursion limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable lenient handling of unknown fields.
    #[must_use]
    pub fn with_ignore_unknown_fields(mut self, ignore: bool) -> Self {
        self.ignore_unknown_fields = ignore;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    /// Returns `InvalidConfig` when `max_depth` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(BindError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the conventional mutator name for a field.
///
/// # Examples
/// ```
/// use xmlbind::config::mutator_name;
///
/// assert_eq!(mutator_name("tzid"), "setTzid");
/// assert_eq!(mutator_name("lastModified"), "setLastModified");
/// ```
#[must_use]
pub fn mutator_name(field: &str) -> String {
    let mut chars = field.chars();
    let mut name = String::with_capacity(MUTATOR_PREFIX.len() + field.len());
    name.push_str(MUTATOR_PREFIX);
    if let Some(first) = chars.next() {
        name.extend(first.to_uppercase());
        name.push_str(chars.as_str());
    }
    name
}
