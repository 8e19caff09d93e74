//! Timezone service list documents.
//!
//! A timezone list carries a generation stamp and one entry per timezone:
//!
//! ```xml
//! <timezoneList>
//!   <dtstamp>2025-01-01T00:00:00Z</dtstamp>
//!   <timezones>
//!     <timezone>
//!       <tzid>Europe/Amsterdam</tzid>
//!       <lastModified>2024-10-01T12:00:00Z</lastModified>
//!       <aliases><alias>Europe/Brussels</alias></aliases>
//!     </timezone>
//!   </timezones>
//! </timezoneList>
//! ```

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::policy::PolicyRegistry;
use crate::schema::{BindValue, Bindable, SchemaBuilder, Value, ValueType};

/// Custom leaf type name for RFC 3339 timestamps.
pub const DATETIME_TYPE: &str = "datetime";

impl BindValue for DateTime<Utc> {
    fn value_type() -> ValueType {
        ValueType::Custom(DATETIME_TYPE)
    }

    fn from_value(value: Value) -> Result<Self, Value> {
        value.downcast::<Self>()
    }
}

/// Result of a timezone list request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TimezoneList {
    /// When the list was generated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtstamp: Option<DateTime<Utc>>,

    /// Timezone entries, in document order.
    pub timezones: Vec<Timezone>,
}

impl Bindable for TimezoneList {
    fn type_name() -> &'static str {
        "TimezoneList"
    }

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .field("dtstamp", |list: &mut Self, v| list.dtstamp = Some(v))
            .sequence("timezones", |list: &mut Self, v| list.timezones = v);
    }
}

/// One timezone entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Timezone {
    pub tzid: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub etag: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,

    /// Localised display names, sorted and deduplicated.
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub local_names: BTreeSet<String>,
}

impl Bindable for Timezone {
    fn type_name() -> &'static str {
        "Timezone"
    }

    fn describe(schema: &mut SchemaBuilder<Self>) {
        schema
            .text("tzid", |tz, v| tz.tzid = v)
            .field("lastModified", |tz: &mut Self, v| tz.last_modified = Some(v))
            .text("etag", |tz, v| tz.etag = Some(v))
            .sequence("aliases", |tz: &mut Self, v| tz.aliases = v)
            .set("localNames", |tz: &mut Self, v| tz.local_names = v);
    }
}

/// Create the policy used to bind timezone lists.
///
/// Registers the RFC 3339 parser for [`DATETIME_TYPE`] leaves.
#[must_use]
pub fn timezone_policy() -> PolicyRegistry {
    let mut registry = PolicyRegistry::new();
    registry.leaf_parser(DATETIME_TYPE, |text: &str| {
        DateTime::parse_from_rfc3339(text).map(|dt| Value::object(dt.with_timezone(&Utc)))
    });
    registry
}
