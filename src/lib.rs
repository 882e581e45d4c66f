//! # dto_serializer
//!
//! Turns typed in-memory values (DTOs, enums, money, pagination state, dates)
//! into plain data trees suitable for transport, e.g. as an API response body.
//!
//! ## Key Features
//!
//! - **Capability dispatch**: translated text, date/time, paginators, status
//!   counters, item lists, enumerations and prices each get a fixed projection
//! - **Safe by default**: values under sensitive keys (`password`, `pin`, ...)
//!   are masked, underscore-prefixed fields are never exported
//! - **Guarded recursion**: object cycles and excessive nesting are rejected
//!   instead of overflowing the stack
//! - **Response conventions**: item lists live under `items`, paginators under
//!   `paginator`
//! - **Serde bridge**: any `T: Serialize` can be converted with [`to_value`]
//!
//! ## Quick Start
//!
//! ```rust
//! use dto_serializer::to_value;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u32,
//!     name: String,
//!     password: String,
//! }
//!
//! let user = User { id: 1, name: "Alice".to_string(), password: "hunter2".to_string() };
//! let value = to_value(&user).unwrap();
//!
//! assert_eq!(
//!     serde_json::to_string(&value).unwrap(),
//!     r#"{"id":1,"name":"Alice","password":"hunter2"}"#
//! );
//! ```
//!
//! Fields of an object are only masked when they are reached through a
//! mapping key; put the DTO into a response map to get the full treatment:
//!
//! ```rust
//! use dto_serializer::{data, Serializer};
//!
//! let response = data!({ "password": "hunter2", "items": [] });
//! let value = Serializer::default().serialize(&response).unwrap();
//! assert_eq!(value.get("password").and_then(|v| v.as_str()), Some("*****"));
//! ```
//!
//! ## Typed Objects
//!
//! Implement [`Object`] to control how a type is exported:
//!
//! ```rust
//! use std::sync::Arc;
//! use dto_serializer::{Data, Object, Serializer, Value};
//!
//! struct Slug(String);
//!
//! impl Object for Slug {
//!     fn to_plain_string(&self) -> Option<String> {
//!         Some(self.0.clone())
//!     }
//! }
//!
//! let value = Serializer::default()
//!     .serialize(&Data::from(Arc::new(Slug("hello-world".into()))))
//!     .unwrap();
//! assert_eq!(value, Value::from("hello-world"));
//! ```
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - No panics in the public API
//! - A [`Serializer`] is immutable and `Send + Sync`; concurrent calls share no
//!   traversal state

pub mod capability;
pub mod convention;
pub mod data;
pub mod error;
pub mod macros;
pub mod map;
pub mod pagination;
pub mod ser;
pub mod serializer;
pub mod value;

pub use capability::{
    Backing, Currency, Enumeration, ItemList, Items, LocalizedString, Paginator, Price,
    StatusCount, StatusCounter, UnitVariant,
};
pub use convention::{Convention, DEFAULT_DATE_TIME_FORMAT, DEFAULT_SENSITIVE_KEYS};
pub use data::{Data, DataMap, Identity, Object, Record};
pub use error::{Error, Result};
pub use map::Map;
pub use pagination::Pagination;
pub use ser::{to_data, DataSerializer};
pub use serializer::{Serializer, HIDDEN_VALUE, MAX_DEPTH};
pub use value::{Number, Value};

use serde::Serialize;

/// Converts any `T: Serialize` to a plain [`Value`] with the default
/// [`Convention`].
///
/// # Examples
///
/// ```rust
/// use dto_serializer::{to_value, Value};
///
/// let value = to_value(&vec![1, 2, 3]).unwrap();
/// assert_eq!(value, Value::Array(vec![Value::from(1), Value::from(2), Value::from(3)]));
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted or breaks one of the
/// serializer's guards.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    to_value_with_convention(value, Convention::default())
}

/// Converts any `T: Serialize` to a plain [`Value`] with a custom
/// [`Convention`].
///
/// # Examples
///
/// ```rust
/// use dto_serializer::{to_value_with_convention, Convention};
/// use std::collections::BTreeMap;
///
/// let mut map = BTreeMap::new();
/// map.insert("a", None);
/// map.insert("b", Some(1));
///
/// let value = to_value_with_convention(&map, Convention::new().with_elide_nulls(true)).unwrap();
/// assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"b":1}"#);
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be converted or breaks one of the
/// serializer's guards.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value_with_convention<T>(value: &T, convention: Convention) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    Serializer::new(convention).serialize_value(value)
}
