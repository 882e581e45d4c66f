//! Serialization policy.
//!
//! A [`Convention`] tells the [`Serializer`](crate::Serializer) how to render
//! date/time values, whether to prefer an object's string form over expanding
//! its fields, whether `null` entries are dropped, and which keys carry
//! secrets.
//!
//! ## Examples
//!
//! ```rust
//! use dto_serializer::{Convention, Serializer};
//!
//! let convention = Convention::new()
//!     .with_date_time_format("%d.%m.%Y")
//!     .with_elide_nulls(true)
//!     .with_sensitive_key("token");
//!
//! let serializer = Serializer::new(convention);
//! assert!(serializer.convention().elide_nulls());
//! ```
//!
//! A convention can also be loaded from configuration; every field is optional:
//!
//! ```rust
//! use dto_serializer::Convention;
//!
//! let convention: Convention = serde_json::from_str(r#"{ "elideNulls": true }"#).unwrap();
//! assert!(convention.elide_nulls());
//! assert_eq!(convention.date_time_format(), "%Y-%m-%d %H:%M:%S");
//! ```

use serde::{Deserialize, Deserializer, Serialize};

/// Default strftime format for date/time values (`YYYY-MM-DD HH:MM:SS`, 24h).
pub const DEFAULT_DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Keys whose string values are hidden by default.
pub const DEFAULT_SENSITIVE_KEYS: [&str; 8] = [
    "password",
    "passwd",
    "pass",
    "pwd",
    "creditcard",
    "credit card",
    "cc",
    "pin",
];

/// Immutable serialization policy.
///
/// Built once and handed to [`Serializer::new`](crate::Serializer::new); the
/// serializer never mutates it.
///
/// # Examples
///
/// ```rust
/// use dto_serializer::Convention;
///
/// let convention = Convention::default();
/// assert!(convention.prefer_string_conversion());
/// assert!(!convention.elide_nulls());
/// assert!(convention.sensitive_keys().iter().any(|k| k == "password"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Convention {
    date_time_format: String,
    prefer_string_conversion: bool,
    /// If a value is `null`, its entry is removed from the output.
    elide_nulls: bool,
    #[serde(deserialize_with = "deserialize_sensitive_keys")]
    sensitive_keys: Vec<String>,
}

/// Loads the sensitive key list with the same de-duplication as the builder.
fn deserialize_sensitive_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let keys = Vec::<String>::deserialize(deserializer)?;
    Ok(Convention::new().with_sensitive_keys(keys).sensitive_keys)
}

impl Default for Convention {
    fn default() -> Self {
        Convention {
            date_time_format: DEFAULT_DATE_TIME_FORMAT.to_string(),
            prefer_string_conversion: true,
            elide_nulls: false,
            sensitive_keys: DEFAULT_SENSITIVE_KEYS
                .iter()
                .map(|key| key.to_string())
                .collect(),
        }
    }
}

impl Convention {
    /// Creates the default convention.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the chrono strftime format used for date/time values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dto_serializer::Convention;
    ///
    /// let convention = Convention::new().with_date_time_format("%Y-%m-%dT%H:%M:%S%:z");
    /// assert_eq!(convention.date_time_format(), "%Y-%m-%dT%H:%M:%S%:z");
    /// ```
    #[must_use]
    pub fn with_date_time_format(mut self, format: impl Into<String>) -> Self {
        self.date_time_format = format.into();
        self
    }

    /// Enables or disables rendering objects through their string form.
    #[must_use]
    pub fn with_prefer_string_conversion(mut self, prefer: bool) -> Self {
        self.prefer_string_conversion = prefer;
        self
    }

    /// Enables or disables dropping `null` entries.
    #[must_use]
    pub fn with_elide_nulls(mut self, elide: bool) -> Self {
        self.elide_nulls = elide;
        self
    }

    /// Replaces the sensitive key list. Duplicates are dropped, first
    /// occurrence wins.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dto_serializer::Convention;
    ///
    /// let convention = Convention::new().with_sensitive_keys(["secret", "pin", "secret"]);
    /// assert_eq!(convention.sensitive_keys(), ["secret", "pin"]);
    /// ```
    #[must_use]
    pub fn with_sensitive_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sensitive_keys.clear();
        for key in keys {
            self.push_sensitive_key(key.into());
        }
        self
    }

    /// Appends one key to the sensitive key list.
    #[must_use]
    pub fn with_sensitive_key(mut self, key: impl Into<String>) -> Self {
        self.push_sensitive_key(key.into());
        self
    }

    fn push_sensitive_key(&mut self, key: String) {
        if !self.sensitive_keys.contains(&key) {
            self.sensitive_keys.push(key);
        }
    }

    #[must_use]
    pub fn date_time_format(&self) -> &str {
        &self.date_time_format
    }

    #[must_use]
    pub const fn prefer_string_conversion(&self) -> bool {
        self.prefer_string_conversion
    }

    #[must_use]
    pub const fn elide_nulls(&self) -> bool {
        self.elide_nulls
    }

    /// Sensitive keys in the order they were configured.
    #[must_use]
    pub fn sensitive_keys(&self) -> &[String] {
        &self.sensitive_keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let convention = Convention::new();
        assert_eq!(convention.date_time_format(), "%Y-%m-%d %H:%M:%S");
        assert!(convention.prefer_string_conversion());
        assert!(!convention.elide_nulls());
        assert_eq!(
            convention.sensitive_keys(),
            [
                "password",
                "passwd",
                "pass",
                "pwd",
                "creditcard",
                "credit card",
                "cc",
                "pin"
            ]
        );
    }

    #[test]
    fn test_builder_overrides() {
        let convention = Convention::new()
            .with_prefer_string_conversion(false)
            .with_elide_nulls(true)
            .with_sensitive_key("token")
            .with_sensitive_key("pin");

        assert!(!convention.prefer_string_conversion());
        assert!(convention.elide_nulls());
        assert_eq!(convention.sensitive_keys().len(), 9);
        assert_eq!(convention.sensitive_keys().last().map(String::as_str), Some("token"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let convention: Convention =
            serde_json::from_str(r#"{ "sensitiveKeys": ["apiKey"], "preferStringConversion": false }"#)
                .unwrap();
        assert_eq!(convention.sensitive_keys(), ["apiKey"]);
        assert!(!convention.prefer_string_conversion());
        assert_eq!(convention.date_time_format(), DEFAULT_DATE_TIME_FORMAT);
    }

    #[test]
    fn test_loaded_sensitive_keys_are_deduplicated() {
        let convention: Convention =
            serde_json::from_str(r#"{ "sensitiveKeys": ["token", "pin", "token", "pin"] }"#)
                .unwrap();
        assert_eq!(convention.sensitive_keys(), ["token", "pin"]);
        assert_eq!(
            convention,
            Convention::new().with_sensitive_keys(["token", "pin"])
        );
    }
}
