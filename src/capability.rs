//! Collaborator capabilities.
//!
//! These traits describe the domain types the serializer knows how to project.
//! An [`Object`](crate::Object) advertises a capability by returning itself from
//! the matching `as_*` accessor; the serializer then emits the fixed shape
//! documented on each trait.

use crate::data::DataMap;
use crate::Value;

/// Translated text. Serialized as the translated string.
pub trait LocalizedString {
    fn translate(&self) -> String;
}

/// Pagination state. Serialized under the reserved key `paginator` as
///
/// ```text
/// { page, pageCount, itemCount, itemsPerPage, firstPage, lastPage, isFirstPage, isLastPage }
/// ```
///
/// Counts that are unknown (no item count set) are reported as `None` and
/// serialized as `0`.
pub trait Paginator {
    fn page(&self) -> i64;
    fn page_count(&self) -> Option<i64>;
    fn item_count(&self) -> Option<i64>;
    fn items_per_page(&self) -> i64;
    fn first_page(&self) -> i64;
    fn last_page(&self) -> Option<i64>;
    fn is_first(&self) -> bool;
    fn is_last(&self) -> bool;
}

/// A labelled counter, e.g. the number of orders in one status.
/// Serialized as `{ key, label, count }`.
pub trait StatusCount {
    fn key(&self) -> String;
    fn label(&self) -> String;
    fn count(&self) -> i64;
}

/// A list of rows. Serialized under the reserved key `items` as the list of
/// its rows.
pub trait ItemList {
    fn data(&self) -> Vec<DataMap>;
}

/// The scalar an enumeration case is backed by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Backing {
    Int(i64),
    String(String),
}

impl From<Backing> for Value {
    fn from(backing: Backing) -> Self {
        match backing {
            Backing::Int(i) => Value::from(i),
            Backing::String(s) => Value::String(s),
        }
    }
}

/// A named constant. Serialized as its backing value when it has one,
/// otherwise as its name.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use dto_serializer::{Backing, Data, Enumeration, Object, Serializer, Value};
///
/// #[derive(Debug)]
/// enum Status { Active, Archived }
///
/// impl Enumeration for Status {
///     fn name(&self) -> &str {
///         match self { Status::Active => "ACTIVE", Status::Archived => "ARCHIVED" }
///     }
///     fn backing_value(&self) -> Option<Backing> {
///         match self { Status::Active => None, Status::Archived => Some(Backing::Int(2)) }
///     }
/// }
///
/// impl Object for Status {
///     fn as_enumeration(&self) -> Option<&dyn Enumeration> { Some(self) }
/// }
///
/// let serializer = Serializer::default();
/// assert_eq!(serializer.serialize(&Data::from(Arc::new(Status::Active))).unwrap(), Value::from("ACTIVE"));
/// assert_eq!(serializer.serialize(&Data::from(Arc::new(Status::Archived))).unwrap(), Value::from(2));
/// ```
pub trait Enumeration {
    fn name(&self) -> &str;

    fn backing_value(&self) -> Option<Backing> {
        None
    }
}

/// A currency, rendered through its symbol.
pub trait Currency {
    fn symbol(&self) -> String;
}

/// A monetary amount. Serialized as `{ value, currency, html, isFree }` where
/// `currency` is the currency symbol and `html` is the humanized rendering.
pub trait Price {
    fn value(&self) -> String;
    fn currency(&self) -> &dyn Currency;
    fn render(&self, humanized: bool) -> String;
    fn is_free(&self) -> bool;
}

/// A plain key/label/count triple.
///
/// # Examples
///
/// ```rust
/// use dto_serializer::{StatusCount, StatusCounter};
///
/// let counter = StatusCounter::new("new", "New orders", 12);
/// assert_eq!(counter.count(), 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusCounter {
    key: String,
    label: String,
    count: i64,
}

impl StatusCounter {
    pub fn new(key: impl Into<String>, label: impl Into<String>, count: i64) -> Self {
        StatusCounter {
            key: key.into(),
            label: label.into(),
            count,
        }
    }
}

impl StatusCount for StatusCounter {
    fn key(&self) -> String {
        self.key.clone()
    }

    fn label(&self) -> String {
        self.label.clone()
    }

    fn count(&self) -> i64 {
        self.count
    }
}

impl crate::Object for StatusCounter {
    fn as_status_count(&self) -> Option<&dyn StatusCount> {
        Some(self)
    }
}

/// A ready-made item list over owned rows.
#[derive(Clone, Debug, Default)]
pub struct Items {
    rows: Vec<DataMap>,
}

impl Items {
    pub fn new(rows: Vec<DataMap>) -> Self {
        Items { rows }
    }

    pub fn push(&mut self, row: DataMap) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl ItemList for Items {
    fn data(&self) -> Vec<DataMap> {
        self.rows.clone()
    }
}

impl crate::Object for Items {
    fn as_item_list(&self) -> Option<&dyn ItemList> {
        Some(self)
    }
}

/// The enumeration produced for a Rust unit enum variant by [`to_data`](crate::to_data).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitVariant {
    enum_name: &'static str,
    variant: &'static str,
}

impl UnitVariant {
    pub const fn new(enum_name: &'static str, variant: &'static str) -> Self {
        UnitVariant { enum_name, variant }
    }

    #[must_use]
    pub const fn enum_name(&self) -> &'static str {
        self.enum_name
    }
}

impl Enumeration for UnitVariant {
    fn name(&self) -> &str {
        self.variant
    }
}

impl crate::Object for UnitVariant {
    fn type_name(&self) -> &str {
        self.enum_name
    }

    fn as_enumeration(&self) -> Option<&dyn Enumeration> {
        Some(self)
    }
}
