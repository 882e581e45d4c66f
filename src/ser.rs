//! Serde bridge.
//!
//! [`DataSerializer`] turns any `T: Serialize` into a [`Data`] tree so that
//! ordinary Rust types can be fed to the [`Serializer`](crate::Serializer)
//! without hand-written [`Object`](crate::Object) impls.
//!
//! | Rust shape | Data |
//! |------------|------|
//! | `bool`, integers, floats, `char`, `&str` | scalars |
//! | `None`, `()`, unit struct | `Null` |
//! | `Vec`, slices, tuples, tuple structs | `List` |
//! | maps | `Map` (integer and boolean keys are stringified) |
//! | structs | [`Record`] objects |
//! | unit variants | [`UnitVariant`] enumerations |
//! | newtype / tuple / struct variants | single-key `Map` `{variant: payload}` |
//!
//! Structs become objects rather than maps, so their underscore-prefixed
//! fields are dropped and their nesting counts towards the depth limit.
//!
//! ```rust
//! use dto_serializer::{to_data, Serializer};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! enum Role { Admin }
//!
//! #[derive(Serialize)]
//! struct User { id: u32, role: Role, _session: String }
//!
//! let data = to_data(&User { id: 7, role: Role::Admin, _session: "s".into() }).unwrap();
//! let value = Serializer::default().serialize(&data).unwrap();
//! assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"id":7,"role":"Admin"}"#);
//! ```

use crate::capability::UnitVariant;
use crate::data::{Data, DataMap, Record};
use crate::{Error, Number, Result};
use serde::{ser, Serialize};

/// Serializer producing [`Data`] from any serde-serializable value.
pub struct DataSerializer;

pub struct SerializeVec {
    vec: Vec<Data>,
    variant: Option<&'static str>,
}

pub struct SerializeMap {
    map: DataMap,
    current_key: Option<String>,
}

pub struct SerializeRecord {
    record: Record,
    variant: Option<&'static str>,
}

impl ser::Serializer for DataSerializer {
    type Ok = Data;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeRecord;
    type SerializeStructVariant = SerializeRecord;

    fn serialize_bool(self, v: bool) -> Result<Data> {
        Ok(Data::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Data> {
        Ok(Data::Number(Number::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Data> {
        Ok(Data::Number(Number::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Data> {
        Ok(Data::Number(Number::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Data> {
        Ok(Data::Number(Number::Integer(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Data> {
        Ok(Data::Number(Number::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Data> {
        Ok(Data::Number(Number::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Data> {
        Ok(Data::Number(Number::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Data> {
        Ok(Data::Number(Number::from(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Data> {
        Ok(Data::Number(Number::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Data> {
        Ok(Data::Number(Number::Float(v)))
    }

    fn serialize_char(self, v: char) -> Result<Data> {
        Ok(Data::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Data> {
        Ok(Data::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Data> {
        let vec = v.iter().map(|&b| Data::from(b)).collect();
        Ok(Data::List(vec))
    }

    fn serialize_none(self) -> Result<Data> {
        Ok(Data::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Data>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Data> {
        Ok(Data::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Data> {
        Ok(Data::Null)
    }

    fn serialize_unit_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Data> {
        Ok(Data::object(UnitVariant::new(name, variant)))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Data>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Data>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, to_data(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<SerializeRecord> {
        Ok(SerializeRecord::new(name, None))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeRecord> {
        Ok(SerializeRecord::new(name, Some(variant)))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.vec.push(to_data(value)?);
        Ok(())
    }

    fn finish(self) -> Data {
        let list = Data::List(self.vec);
        match self.variant {
            Some(variant) => tagged(variant, list),
            None => list,
        }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: DataMap::new(),
            current_key: None,
        }
    }
}

impl SerializeRecord {
    fn new(name: &'static str, variant: Option<&'static str>) -> Self {
        SerializeRecord {
            record: Record::new(variant.unwrap_or(name)),
            variant,
        }
    }

    fn finish(self) -> Data {
        let record = Data::object(self.record);
        match self.variant {
            Some(variant) => tagged(variant, record),
            None => record,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Data;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Data> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Data;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Data> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Data;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Data> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Data;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.push(value)
    }

    fn end(self) -> Result<Data> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Data;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match to_data(key)? {
            Data::String(s) => s,
            Data::Number(n) => n.to_string(),
            Data::Bool(b) => b.to_string(),
            Data::Object(object) => match object.as_enumeration() {
                Some(case) => case.name().to_string(),
                None => return Err(Error::custom("Map keys must be strings")),
            },
            _ => return Err(Error::custom("Map keys must be strings")),
        };
        self.current_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_data(value)?);
        Ok(())
    }

    fn end(self) -> Result<Data> {
        Ok(Data::Map(self.map))
    }
}

impl ser::SerializeStruct for SerializeRecord {
    type Ok = Data;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.record.insert(key, to_data(value)?);
        Ok(())
    }

    fn end(self) -> Result<Data> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeRecord {
    type Ok = Data;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.record.insert(key, to_data(value)?);
        Ok(())
    }

    fn end(self) -> Result<Data> {
        Ok(self.finish())
    }
}

fn tagged(variant: &'static str, payload: Data) -> Data {
    let mut map = DataMap::with_capacity(1);
    map.insert(variant.to_string(), payload);
    Data::Map(map)
}

/// Converts any `T: Serialize` into a [`Data`] tree.
///
/// # Errors
///
/// Returns an error if the value's `Serialize` impl fails or a map key is
/// not a string, number, boolean or unit variant.
pub fn to_data<T>(value: &T) -> Result<Data>
where
    T: ?Sized + Serialize,
{
    value.serialize(DataSerializer)
}
