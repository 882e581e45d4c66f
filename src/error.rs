//! Error types for DTO serialization.
//!
//! Every error is fatal to the `serialize` call that produced it: no partial
//! output is ever returned.
//!
//! ## Error Categories
//!
//! - **Structural**: the input nests too deeply ([`Error::DepthExceeded`]) or an
//!   object is reached twice along one path ([`Error::CycleDetected`])
//! - **Convention**: an item list or paginator sits under the wrong key
//! - **Unsupported**: a value kind with no conversion (handles, closures)
//! - **Configuration**: the date/time format cannot be rendered
//!
//! ## Examples
//!
//! ```rust
//! use dto_serializer::{Data, Error, Serializer};
//!
//! let result = Serializer::default().serialize(&Data::opaque::<std::fs::File>());
//! assert!(matches!(result, Err(Error::UnsupportedType(_))));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while serializing a value tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Object nesting reached the hard ceiling
    #[error("Structure is too deep: nesting level {depth} reached the limit of {limit}")]
    DepthExceeded { depth: usize, limit: usize },

    /// The same object instance was reached twice along one path
    #[error("Attention: Recursion has been stopped! An infinite recursion was detected at an instance of \"{type_name}\".\n\nTo resolve this issue: Never pass entire recursive entities to the API. If you can, pass the processed field without recursion.")]
    CycleDetected { type_name: String },

    /// An item list or paginator was placed under a non-reserved key
    #[error("Convention error: {kind} must be in key \"{expected}\", but \"{key}\" given.")]
    ConventionViolation {
        kind: &'static str,
        expected: &'static str,
        key: String,
    },

    /// Unsupported value kind
    #[error("Value type \"{0}\" can not be serialized.")]
    UnsupportedType(String),

    /// The configured date/time format contains an invalid specifier
    #[error("Invalid date/time format: \"{0}\"")]
    InvalidDateFormat(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a depth error for the given nesting level.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dto_serializer::Error;
    ///
    /// let err = Error::depth_exceeded(32, 32);
    /// assert!(err.to_string().contains("too deep"));
    /// ```
    pub fn depth_exceeded(depth: usize, limit: usize) -> Self {
        Error::DepthExceeded { depth, limit }
    }

    /// Creates a cycle error naming the type of the repeated instance.
    pub fn cycle_detected(type_name: &str) -> Self {
        Error::CycleDetected {
            type_name: type_name.to_string(),
        }
    }

    /// Creates a convention error for a value found under the wrong key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dto_serializer::Error;
    ///
    /// let err = Error::convention_violation("Item list", "items", "data");
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Convention error: Item list must be in key \"items\", but \"data\" given."
    /// );
    /// ```
    pub fn convention_violation(kind: &'static str, expected: &'static str, key: &str) -> Self {
        Error::ConventionViolation {
            kind,
            expected,
            key: key.to_string(),
        }
    }

    /// Creates an unsupported type error naming the runtime type.
    pub fn unsupported_type(type_name: &str) -> Self {
        Error::UnsupportedType(type_name.to_string())
    }

    /// Creates an error for a date/time format that cannot be rendered.
    pub fn invalid_date_format(format: &str) -> Self {
        Error::InvalidDateFormat(format.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    #[must_use]
    pub const fn is_depth_exceeded(&self) -> bool {
        matches!(self, Error::DepthExceeded { .. })
    }

    #[must_use]
    pub const fn is_cycle(&self) -> bool {
        matches!(self, Error::CycleDetected { .. })
    }

    #[must_use]
    pub const fn is_convention_violation(&self) -> bool {
        matches!(self, Error::ConventionViolation { .. })
    }

    #[must_use]
    pub const fn is_unsupported_type(&self) -> bool {
        matches!(self, Error::UnsupportedType(_))
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
