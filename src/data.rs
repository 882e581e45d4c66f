//! Typed input values.
//!
//! [`Data`] is the tree the serializer walks. Scalars, sequences and mappings
//! are held inline; everything with behaviour is an [`Object`] behind an
//! [`Arc`], which gives every object instance a stable [`Identity`] for cycle
//! detection.
//!
//! ## Objects and capabilities
//!
//! An [`Object`] exposes its own fields through [`Object::fields`] and may
//! advertise capabilities (translated text, date/time, pagination, money, ...)
//! through the `as_*` accessors. The serializer checks capabilities in a fixed
//! priority order, so a type that is both an enumeration and string-convertible
//! is always rendered as an enumeration.
//!
//! ```rust
//! use std::sync::Arc;
//! use dto_serializer::{data, Data, Object, Serializer};
//!
//! struct User {
//!     id: i64,
//!     name: String,
//!     password_hash: String,
//! }
//!
//! impl Object for User {
//!     fn fields(&self) -> Vec<(String, Data)> {
//!         vec![
//!             ("id".to_string(), Data::from(self.id)),
//!             ("name".to_string(), Data::from(self.name.as_str())),
//!             ("_passwordHash".to_string(), Data::from(self.password_hash.as_str())),
//!         ]
//!     }
//! }
//!
//! let user = Arc::new(User { id: 1, name: "Alice".into(), password_hash: "x".into() });
//! let value = Serializer::default().serialize(&data!({ "user": (Data::from(user)) })).unwrap();
//!
//! assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"user":{"id":1,"name":"Alice"}}"#);
//! ```

use crate::capability::{
    Enumeration, ItemList, LocalizedString, Paginator, Price, StatusCount,
};
use crate::Number;
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::sync::Arc;

/// An insertion-ordered, string-keyed mapping of input values.
pub type DataMap = IndexMap<String, Data>;

/// A typed value to be serialized.
#[derive(Clone, Default)]
pub enum Data {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// A sequence; its entries are keyed by position.
    List(Vec<Data>),
    /// A mapping; its entries keep insertion order.
    Map(DataMap),
    Object(Arc<dyn Object>),
    /// A value with no conversion (file handle, closure, socket, ...),
    /// carrying its type name.
    Opaque(&'static str),
}

impl Data {
    /// Creates an opaque placeholder for a value of type `T`.
    ///
    /// Serializing it always fails with [`Error::UnsupportedType`](crate::Error::UnsupportedType).
    #[must_use]
    pub fn opaque<T: ?Sized>() -> Self {
        Data::Opaque(std::any::type_name::<T>())
    }

    /// Wraps an object.
    pub fn object<T: Object + 'static>(object: T) -> Self {
        Data::Object(Arc::new(object))
    }

    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Data::Null)
    }

    /// Returns `true` for null, booleans, numbers and strings.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Data::Null | Data::Bool(_) | Data::Number(_) | Data::String(_)
        )
    }

    /// Returns `true` for sequences and mappings.
    #[inline]
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Data::List(_) | Data::Map(_))
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&Arc<dyn Object>> {
        match self {
            Data::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns `true` if the value is an object with the item-list capability.
    #[must_use]
    pub fn is_item_list(&self) -> bool {
        self.as_object()
            .map_or(false, |object| object.as_item_list().is_some())
    }

    /// Returns `true` if the value is an object with the paginator capability.
    #[must_use]
    pub fn is_paginator(&self) -> bool {
        self.as_object()
            .map_or(false, |object| object.as_paginator().is_some())
    }

    /// The string form of a string-like value: strings themselves, translated
    /// text and objects with a string conversion.
    #[must_use]
    pub fn string_form(&self) -> Option<Cow<'_, str>> {
        match self {
            Data::String(s) => Some(Cow::Borrowed(s)),
            Data::Object(object) => object
                .as_localized()
                .map(|text| text.translate())
                .or_else(|| object.to_plain_string())
                .map(Cow::Owned),
            _ => None,
        }
    }

    /// Short description of the value kind, used in diagnostics.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Data::Null => "null",
            Data::Bool(_) => "bool",
            Data::Number(_) => "number",
            Data::String(_) => "string",
            Data::List(_) => "list",
            Data::Map(_) => "map",
            Data::Object(object) => object.type_name(),
            Data::Opaque(type_name) => type_name,
        }
    }
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Data::Null => write!(f, "Null"),
            Data::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Data::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Data::String(s) => f.debug_tuple("String").field(s).finish(),
            Data::List(list) => f.debug_tuple("List").field(list).finish(),
            Data::Map(map) => f.debug_tuple("Map").field(map).finish(),
            Data::Object(object) => write!(f, "Object({})", object.type_name()),
            Data::Opaque(type_name) => write!(f, "Opaque({})", type_name),
        }
    }
}

/// A typed value with capabilities.
///
/// Every method has a default, so an implementor only overrides what applies:
/// a plain DTO overrides [`fields`](Object::fields), a money type overrides
/// [`as_price`](Object::as_price), and so on.
pub trait Object: Send + Sync {
    /// Name used in diagnostics.
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Own fields in declaration order. Fields whose name starts with `_` are
    /// internal and never serialized.
    fn fields(&self) -> Vec<(String, Data)> {
        Vec::new()
    }

    fn as_localized(&self) -> Option<&dyn LocalizedString> {
        None
    }

    fn as_date_time(&self) -> Option<DateTime<FixedOffset>> {
        None
    }

    fn as_paginator(&self) -> Option<&dyn Paginator> {
        None
    }

    fn as_status_count(&self) -> Option<&dyn StatusCount> {
        None
    }

    fn as_item_list(&self) -> Option<&dyn ItemList> {
        None
    }

    fn as_enumeration(&self) -> Option<&dyn Enumeration> {
        None
    }

    fn as_price(&self) -> Option<&dyn Price> {
        None
    }

    /// String conversion, used instead of field expansion when the convention
    /// prefers it.
    fn to_plain_string(&self) -> Option<String> {
        None
    }

    /// Key/value entries for objects that behave like a lazy mapping. Only
    /// consulted when the object is the root of a `serialize` call.
    fn entries(&self) -> Option<Vec<(String, Data)>> {
        None
    }
}

/// Identity of one object instance, derived from its allocation address.
///
/// Two [`Data::Object`] values have the same identity exactly when they share
/// one `Arc` allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identity(usize);

impl Identity {
    #[must_use]
    pub fn of(object: &Arc<dyn Object>) -> Self {
        Identity(Arc::as_ptr(object) as *const () as usize)
    }
}

/// A plain data object: a named, ordered set of fields.
///
/// Structs converted through [`to_data`](crate::to_data) become records.
///
/// ```rust
/// use dto_serializer::{Data, Record, Serializer};
///
/// let record = Record::new("Point").with_field("x", 1).with_field("y", 2);
/// let value = Serializer::default().serialize(&Data::object(record)).unwrap();
/// assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"x":1,"y":2}"#);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Record {
    name: Cow<'static, str>,
    fields: DataMap,
}

impl Record {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Record {
            name: name.into(),
            fields: DataMap::new(),
        }
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Data>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Data>) {
        self.fields.insert(name.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Data> {
        self.fields.get(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Object for Record {
    fn type_name(&self) -> &str {
        &self.name
    }

    fn fields(&self) -> Vec<(String, Data)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }
}

impl<Tz> Object for DateTime<Tz>
where
    Tz: TimeZone + 'static,
    Tz::Offset: Send + Sync,
{
    fn as_date_time(&self) -> Option<DateTime<FixedOffset>> {
        Some(self.with_timezone(&self.offset().fix()))
    }
}

impl Object for NaiveDateTime {
    fn as_date_time(&self) -> Option<DateTime<FixedOffset>> {
        Some(Utc.from_utc_datetime(self).with_timezone(&Utc.fix()))
    }
}

impl From<bool> for Data {
    fn from(value: bool) -> Self {
        Data::Bool(value)
    }
}

macro_rules! data_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Data {
                fn from(value: $ty) -> Self {
                    Data::Number(Number::from(value))
                }
            }
        )*
    };
}

data_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<Number> for Data {
    fn from(value: Number) -> Self {
        Data::Number(value)
    }
}

impl From<String> for Data {
    fn from(value: String) -> Self {
        Data::String(value)
    }
}

impl From<&str> for Data {
    fn from(value: &str) -> Self {
        Data::String(value.to_string())
    }
}

impl From<Vec<Data>> for Data {
    fn from(value: Vec<Data>) -> Self {
        Data::List(value)
    }
}

impl From<DataMap> for Data {
    fn from(value: DataMap) -> Self {
        Data::Map(value)
    }
}

impl<T: Into<Data>> From<Option<T>> for Data {
    fn from(value: Option<T>) -> Self {
        value.map_or(Data::Null, Into::into)
    }
}

impl<T: Object + 'static> From<Arc<T>> for Data {
    fn from(value: Arc<T>) -> Self {
        Data::Object(value)
    }
}

impl From<Arc<dyn Object>> for Data {
    fn from(value: Arc<dyn Object>) -> Self {
        Data::Object(value)
    }
}

impl<Tz> From<DateTime<Tz>> for Data
where
    Tz: TimeZone + 'static,
    Tz::Offset: Send + Sync,
{
    fn from(value: DateTime<Tz>) -> Self {
        Data::object(value)
    }
}

impl From<NaiveDateTime> for Data {
    fn from(value: NaiveDateTime) -> Self {
        Data::object(value)
    }
}
