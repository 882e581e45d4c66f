//! The recursive serialization engine.
//!
//! [`Serializer`] walks a [`Data`] tree and produces a plain [`Value`] tree.
//! Per value it picks exactly one rule:
//!
//! 1. scalars are copied,
//! 2. sequences and mappings are processed entry by entry,
//! 3. objects are matched against their capabilities in a fixed order
//!    (translated text, date/time, paginator, status count, item list,
//!    enumeration, price, string conversion) and otherwise expanded field by
//!    field,
//! 4. anything else is rejected.
//!
//! ## Guards
//!
//! - Object nesting is capped at [`MAX_DEPTH`] levels. Collections do not
//!   count as a level; an object descending into a non-scalar field does.
//! - An object instance reached twice along one path is rejected as a cycle.
//! - Item lists must sit under the key `items` and paginators under the key
//!   `paginator`.
//! - String values under sensitive keys are replaced with [`HIDDEN_VALUE`],
//!   except bcrypt hashes which are already irreversible.
//!
//! ## Examples
//!
//! ```rust
//! use dto_serializer::{data, Convention, Serializer};
//!
//! let serializer = Serializer::new(Convention::new().with_elide_nulls(true));
//! let value = serializer
//!     .serialize(&data!({ "login": "alice", "password": "hunter2", "avatar": null }))
//!     .unwrap();
//!
//! assert_eq!(
//!     serde_json::to_string(&value).unwrap(),
//!     r#"{"login":"alice","password":"*****"}"#
//! );
//! ```

use crate::capability::{Paginator, Price, StatusCount};
use crate::data::{Data, DataMap, Identity, Object};
use crate::{to_data, Convention, Error, Map, Result, Value};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt::Write;
use std::sync::Arc;
use tracing::{trace, warn};

/// Hard ceiling for object nesting.
pub const MAX_DEPTH: usize = 32;

/// Placeholder emitted instead of a hidden value.
pub const HIDDEN_VALUE: &str = "*****";

lazy_static! {
    static ref BCRYPT_HASH: Regex = Regex::new(r"^\$2[ayb]\$.{56}$").unwrap();
}

/// How an object was entered along the current path.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum Visit {
    /// Reached as a field of an expanded object.
    Field(Identity),
    /// Expanded as an item list.
    Rows(Identity),
}

/// Objects seen along the current path.
type Visited = HashSet<Visit>;

/// Key of one collection entry.
#[derive(Clone, Copy)]
enum EntryKey<'a> {
    Index(usize),
    Name(&'a str),
}

impl EntryKey<'_> {
    fn is(&self, reserved: &str) -> bool {
        matches!(self, EntryKey::Name(name) if *name == reserved)
    }

    fn to_key_string(self) -> String {
        match self {
            EntryKey::Index(index) => index.to_string(),
            EntryKey::Name(name) => name.to_string(),
        }
    }
}

/// Converts typed values into plain data.
///
/// A serializer is immutable after construction and can be shared between
/// threads; every call to [`serialize`](Serializer::serialize) keeps its own
/// traversal state.
#[derive(Clone, Debug)]
pub struct Serializer {
    convention: Convention,
    sensitive_keys: HashSet<String>,
}

impl Default for Serializer {
    fn default() -> Self {
        Serializer::new(Convention::default())
    }
}

impl Serializer {
    pub fn new(convention: Convention) -> Self {
        let sensitive_keys = convention.sensitive_keys().iter().cloned().collect();
        Serializer {
            convention,
            sensitive_keys,
        }
    }

    #[must_use]
    pub fn convention(&self) -> &Convention {
        &self.convention
    }

    /// Serializes a root value.
    ///
    /// Sequences and mappings are processed as collections, a root object
    /// exposing [`entries`](Object::entries) is processed through
    /// [`serialize_entries`](Serializer::serialize_entries), and any other
    /// value is processed on its own and returned as is.
    ///
    /// # Errors
    ///
    /// Fails on the first nested value that breaks a guard: see [`Error`].
    pub fn serialize(&self, root: &Data) -> Result<Value> {
        trace!(kind = root.kind(), "serializing root value");
        match root {
            Data::List(list) => self.process_list(list, 0, &Visited::new()),
            Data::Map(map) => self.process_map(map, 0, &Visited::new()),
            Data::Object(object) => match object.entries() {
                Some(entries) => self.serialize_entries(entries),
                None => self.process(root, 0, &Visited::new()),
            },
            _ => self.process(root, 0, &Visited::new()),
        }
    }

    /// Serializes key/value entries of a lazily iterated mapping.
    ///
    /// Only the sensitive-key rule applies here: `null` values are kept even
    /// when the convention elides them, and item lists or paginators are not
    /// checked against their reserved keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dto_serializer::{Data, Serializer};
    ///
    /// let entries = vec![("pin", Data::from("1234")), ("note", Data::Null)];
    /// let value = Serializer::default().serialize_entries(entries).unwrap();
    /// assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"pin":"*****","note":null}"#);
    /// ```
    ///
    /// # Errors
    ///
    /// Fails when a value breaks a guard while being processed.
    pub fn serialize_entries<I, K>(&self, entries: I) -> Result<Value>
    where
        I: IntoIterator<Item = (K, Data)>,
        K: Into<String>,
    {
        let mut output = Map::new();
        for (key, value) in entries {
            let key = key.into();
            let processed = if self.hide_key(&key, &value) {
                Value::String(HIDDEN_VALUE.to_string())
            } else {
                self.process(&value, 0, &Visited::new())?
            };
            output.insert(key, processed);
        }
        Ok(Value::Object(output))
    }

    /// Converts `value` through the serde bridge and serializes the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be converted or breaks one of the
    /// serializer's guards.
    pub fn serialize_value<T>(&self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        self.serialize(&to_data(value)?)
    }

    fn process(&self, value: &Data, depth: usize, visited: &Visited) -> Result<Value> {
        if depth >= MAX_DEPTH {
            return Err(Error::depth_exceeded(depth, MAX_DEPTH));
        }
        match value {
            Data::Null => Ok(Value::Null),
            Data::Bool(b) => Ok(Value::Bool(*b)),
            Data::Number(n) => Ok(Value::Number(*n)),
            Data::String(s) => Ok(Value::String(s.clone())),
            Data::List(list) => self.process_list(list, depth, visited),
            Data::Map(map) => self.process_map(map, depth, visited),
            Data::Object(object) => self.dispatch_object(object, depth, visited),
            Data::Opaque(type_name) => Err(Error::unsupported_type(type_name)),
        }
    }

    fn dispatch_object(
        &self,
        object: &Arc<dyn Object>,
        depth: usize,
        visited: &Visited,
    ) -> Result<Value> {
        if let Some(text) = object.as_localized() {
            return Ok(Value::String(text.translate()));
        }
        if let Some(instant) = object.as_date_time() {
            return self.format_date_time(&instant);
        }
        if let Some(paginator) = object.as_paginator() {
            return Ok(project_paginator(paginator));
        }
        if let Some(status) = object.as_status_count() {
            return Ok(project_status_count(status));
        }
        if let Some(items) = object.as_item_list() {
            let mut visited = visited.clone();
            if !visited.insert(Visit::Rows(Identity::of(object))) {
                return Err(Error::cycle_detected(object.type_name()));
            }
            let rows: Vec<Data> = items.data().into_iter().map(Data::Map).collect();
            return self.process_list(&rows, depth, &visited);
        }
        if let Some(case) = object.as_enumeration() {
            return Ok(match case.backing_value() {
                Some(backing) => Value::from(backing),
                None => Value::String(case.name().to_string()),
            });
        }
        if let Some(price) = object.as_price() {
            return Ok(project_price(price));
        }
        if self.convention.prefer_string_conversion() {
            if let Some(text) = object.to_plain_string() {
                return Ok(Value::String(text));
            }
        }
        self.process_object(&**object, depth, visited)
    }

    fn process_object(&self, object: &dyn Object, depth: usize, visited: &Visited) -> Result<Value> {
        let fields = object.fields();
        let mut visited = visited.clone();
        let mut output = Map::with_capacity(fields.len());

        for (name, value) in fields {
            if name.starts_with('_') {
                continue;
            }
            if value.is_null() && self.convention.elide_nulls() {
                continue;
            }
            if let Data::Object(child) = &value {
                if !visited.insert(Visit::Field(Identity::of(child))) {
                    return Err(Error::cycle_detected(child.type_name()));
                }
            }
            let child_depth = if value.is_scalar() { depth } else { depth + 1 };
            let processed = self.process(&value, child_depth, &visited)?;
            output.insert(name, processed);
        }

        Ok(Value::Object(output))
    }

    fn process_list(&self, list: &[Data], depth: usize, visited: &Visited) -> Result<Value> {
        let mut output = Vec::with_capacity(list.len());
        for (index, value) in list.iter().enumerate() {
            if let Some(processed) = self.process_entry(EntryKey::Index(index), value, depth, visited)? {
                output.push(processed);
            }
        }
        Ok(Value::Array(output))
    }

    fn process_map(&self, map: &DataMap, depth: usize, visited: &Visited) -> Result<Value> {
        let mut output = Map::with_capacity(map.len());
        for (key, value) in map {
            if let Some(processed) = self.process_entry(EntryKey::Name(key), value, depth, visited)? {
                output.insert(key.clone(), processed);
            }
        }
        Ok(Value::Object(output))
    }

    /// Applies the collection entry rules. `None` means the entry is dropped.
    fn process_entry(
        &self,
        key: EntryKey<'_>,
        value: &Data,
        depth: usize,
        visited: &Visited,
    ) -> Result<Option<Value>> {
        if value.is_null() && self.convention.elide_nulls() {
            return Ok(None);
        }
        if value.is_item_list() && !key.is("items") {
            return Err(Error::convention_violation(
                "Item list",
                "items",
                &key.to_key_string(),
            ));
        }
        if value.is_paginator() && !key.is("paginator") {
            return Err(Error::convention_violation(
                "Paginator",
                "paginator",
                &key.to_key_string(),
            ));
        }
        let hidden = match key {
            EntryKey::Name(name) => self.hide_key(name, value),
            EntryKey::Index(index) => self.hide_key(&index.to_string(), value),
        };
        if hidden {
            return Ok(Some(Value::String(HIDDEN_VALUE.to_string())));
        }
        self.process(value, depth, visited).map(Some)
    }

    /// Returns `true` if the value under `key` must be replaced by the hidden
    /// marker: the key is sensitive and the value is a string that is not a
    /// bcrypt hash.
    fn hide_key(&self, key: &str, value: &Data) -> bool {
        if !self.sensitive_keys.contains(key) {
            return false;
        }
        let Some(text) = value.string_form() else {
            return false;
        };
        if BCRYPT_HASH.is_match(&text) {
            return false;
        }
        warn!(
            key,
            "Security warning: User password may have been compromised! Key \"{}\" given. \
             The serializer prevented passwords being passed through the API in a readable form.",
            key
        );
        true
    }

    fn format_date_time(&self, instant: &DateTime<FixedOffset>) -> Result<Value> {
        let format = self.convention.date_time_format();
        let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(Error::invalid_date_format(format));
        }
        let mut rendered = String::new();
        write!(rendered, "{}", instant.format_with_items(items.into_iter()))
            .map_err(|_| Error::invalid_date_format(format))?;
        Ok(Value::String(rendered))
    }
}

fn project_paginator(paginator: &dyn Paginator) -> Value {
    let mut output = Map::with_capacity(8);
    output.insert("page".to_string(), Value::from(paginator.page()));
    output.insert(
        "pageCount".to_string(),
        Value::from(paginator.page_count().unwrap_or(0)),
    );
    output.insert(
        "itemCount".to_string(),
        Value::from(paginator.item_count().unwrap_or(0)),
    );
    output.insert(
        "itemsPerPage".to_string(),
        Value::from(paginator.items_per_page()),
    );
    output.insert("firstPage".to_string(), Value::from(paginator.first_page()));
    output.insert(
        "lastPage".to_string(),
        Value::from(paginator.last_page().unwrap_or(0)),
    );
    output.insert("isFirstPage".to_string(), Value::from(paginator.is_first()));
    output.insert("isLastPage".to_string(), Value::from(paginator.is_last()));
    Value::Object(output)
}

fn project_status_count(status: &dyn StatusCount) -> Value {
    let mut output = Map::with_capacity(3);
    output.insert("key".to_string(), Value::from(status.key()));
    output.insert("label".to_string(), Value::from(status.label()));
    output.insert("count".to_string(), Value::from(status.count()));
    Value::Object(output)
}

fn project_price(price: &dyn Price) -> Value {
    let mut output = Map::with_capacity(4);
    output.insert("value".to_string(), Value::from(price.value()));
    output.insert(
        "currency".to_string(),
        Value::from(price.currency().symbol()),
    );
    output.insert("html".to_string(), Value::from(price.render(true)));
    output.insert("isFree".to_string(), Value::from(price.is_free()));
    Value::Object(output)
}
