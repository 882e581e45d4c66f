mod common;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use common::{to_json, Email, Money, OrderStatus, Translation};
use dto_serializer::{
    data, to_data, to_value, Convention, Data, DataMap, Enumeration, Error, ItemList, Items,
    LocalizedString, Object, Pagination, Paginator, Price, Record, Serializer, StatusCount,
    StatusCounter, Value,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Serialize)]
struct Address {
    street: String,
    city: String,
}

#[derive(Serialize)]
enum Role {
    Admin,
    Editor,
}

#[derive(Serialize)]
struct User {
    id: u32,
    name: String,
    role: Role,
    address: Option<Address>,
    tags: Vec<String>,
    _internal_note: String,
}

fn alice() -> User {
    User {
        id: 123,
        name: "Alice".to_string(),
        role: Role::Admin,
        address: Some(Address {
            street: "Main 1".to_string(),
            city: "Prague".to_string(),
        }),
        tags: vec!["admin".to_string(), "developer".to_string()],
        _internal_note: "do not export".to_string(),
    }
}

#[test]
fn test_simple_struct() {
    let value = to_value(&alice()).unwrap();

    assert_eq!(
        to_json(&value),
        json!({
            "id": 123,
            "name": "Alice",
            "role": "Admin",
            "address": { "street": "Main 1", "city": "Prague" },
            "tags": ["admin", "developer"]
        })
    );
}

#[test]
fn test_struct_field_order_is_kept() {
    let value = to_value(&alice()).unwrap();
    let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
    assert_eq!(keys, ["id", "name", "role", "address", "tags"]);
}

#[test]
fn test_response_envelope() {
    let mut rows = Vec::new();
    for id in 1..=2 {
        let mut row = dto_serializer::DataMap::new();
        row.insert("id".to_string(), Data::from(id));
        row.insert(
            "status".to_string(),
            Data::object(if id == 1 {
                OrderStatus::Active
            } else {
                OrderStatus::Shipped
            }),
        );
        row.insert(
            "price".to_string(),
            Data::object(Money {
                amount: format!("{}00.00", id),
            }),
        );
        rows.push(row);
    }

    let response = data!({
        "items": (Data::object(Items::new(rows))),
        "paginator": (Data::object(Pagination::new(2).with_item_count(5))),
        "statusCounts": [
            (Data::object(StatusCounter::new("active", "Active", 1))),
            (Data::object(StatusCounter::new("shipped", "Shipped", 1)))
        ],
        "title": (Data::object(Translation { text: "Objednávky".to_string() }))
    });

    let value = Serializer::default().serialize(&response).unwrap();

    assert_eq!(
        to_json(&value),
        json!({
            "items": [
                {
                    "id": 1,
                    "status": "ACTIVE",
                    "price": { "value": "100.00", "currency": "Kč", "html": "100.00&nbsp;Kč", "isFree": false }
                },
                {
                    "id": 2,
                    "status": 2,
                    "price": { "value": "200.00", "currency": "Kč", "html": "200.00&nbsp;Kč", "isFree": false }
                }
            ],
            "paginator": {
                "page": 1,
                "pageCount": 3,
                "itemCount": 5,
                "itemsPerPage": 2,
                "firstPage": 1,
                "lastPage": 3,
                "isFirstPage": true,
                "isLastPage": false
            },
            "statusCounts": [
                { "key": "active", "label": "Active", "count": 1 },
                { "key": "shipped", "label": "Shipped", "count": 1 }
            ],
            "title": "Objednávky"
        })
    );
}

#[test]
fn test_scalar_root_is_returned_directly() {
    let serializer = Serializer::default();
    assert_eq!(serializer.serialize(&Data::from(5)).unwrap(), Value::from(5));
    assert_eq!(
        serializer.serialize(&Data::from("plain")).unwrap(),
        Value::from("plain")
    );
    assert_eq!(serializer.serialize(&Data::Null).unwrap(), Value::Null);
}

#[test]
fn test_object_root_uses_dispatch() {
    let serializer = Serializer::default();
    let value = serializer
        .serialize(&Data::object(OrderStatus::Cancelled))
        .unwrap();
    assert_eq!(value, Value::from("cancelled"));
}

#[test]
fn test_enumeration_shapes() {
    let serializer = Serializer::default();
    assert_eq!(
        serializer.serialize(&Data::object(OrderStatus::Shipped)).unwrap(),
        Value::from(2)
    );
    assert_eq!(
        serializer.serialize(&Data::object(OrderStatus::Active)).unwrap(),
        Value::from("ACTIVE")
    );
    assert_eq!(to_value(&Role::Editor).unwrap(), Value::from("Editor"));
}

#[test]
fn test_capability_priority() {
    let serializer = Serializer::default();

    // enumeration beats string conversion
    let value = serializer.serialize(&Data::object(OrderStatus::Active)).unwrap();
    assert_eq!(value, Value::from("ACTIVE"));

    // price beats string conversion
    let value = serializer
        .serialize(&Data::object(Money {
            amount: "0.00".to_string(),
        }))
        .unwrap();
    assert_eq!(value.get("isFree"), Some(&Value::from(true)));

    // translated text beats field expansion
    let value = serializer
        .serialize(&Data::object(Translation {
            text: "Ahoj".to_string(),
        }))
        .unwrap();
    assert_eq!(value, Value::from("Ahoj"));
}

/// Carries every capability; those ranked before `from` are switched off.
struct Layered {
    from: usize,
    label: Translation,
    instant: DateTime<FixedOffset>,
    pagination: Pagination,
    counter: StatusCounter,
    items: Items,
    status: OrderStatus,
    price: Money,
}

impl Layered {
    fn from_rank(from: usize) -> Data {
        let mut row = DataMap::new();
        row.insert("id".to_string(), Data::from(1));
        Data::object(Layered {
            from,
            label: Translation {
                text: "translated".to_string(),
            },
            instant: DateTime::parse_from_rfc3339("2024-01-15T10:30:00+00:00")
                .expect("valid timestamp"),
            pagination: Pagination::new(10).with_item_count(25),
            counter: StatusCounter::new("new", "New", 4),
            items: Items::new(vec![row]),
            status: OrderStatus::Active,
            price: Money {
                amount: "0.00".to_string(),
            },
        })
    }

    fn enabled(&self, rank: usize) -> bool {
        rank >= self.from
    }
}

impl Object for Layered {
    fn fields(&self) -> Vec<(String, Data)> {
        vec![("kind".to_string(), Data::from("layered"))]
    }

    fn as_localized(&self) -> Option<&dyn LocalizedString> {
        self.enabled(0).then_some(&self.label as &dyn LocalizedString)
    }

    fn as_date_time(&self) -> Option<DateTime<FixedOffset>> {
        self.enabled(1).then_some(self.instant)
    }

    fn as_paginator(&self) -> Option<&dyn Paginator> {
        self.enabled(2).then_some(&self.pagination as &dyn Paginator)
    }

    fn as_status_count(&self) -> Option<&dyn StatusCount> {
        self.enabled(3).then_some(&self.counter as &dyn StatusCount)
    }

    fn as_item_list(&self) -> Option<&dyn ItemList> {
        self.enabled(4).then_some(&self.items as &dyn ItemList)
    }

    fn as_enumeration(&self) -> Option<&dyn Enumeration> {
        self.enabled(5).then_some(&self.status as &dyn Enumeration)
    }

    fn as_price(&self) -> Option<&dyn Price> {
        self.enabled(6).then_some(&self.price as &dyn Price)
    }

    fn to_plain_string(&self) -> Option<String> {
        self.enabled(7).then(|| "as string".to_string())
    }
}

#[test]
fn test_full_capability_order() {
    let serializer = Serializer::default();
    let winner = |from: usize| to_json(&serializer.serialize(&Layered::from_rank(from)).unwrap());

    assert_eq!(winner(0), json!("translated"));
    assert_eq!(winner(1), json!("2024-01-15 10:30:00"));
    assert_eq!(
        winner(2),
        json!({
            "page": 1,
            "pageCount": 3,
            "itemCount": 25,
            "itemsPerPage": 10,
            "firstPage": 1,
            "lastPage": 3,
            "isFirstPage": true,
            "isLastPage": false
        })
    );
    assert_eq!(winner(3), json!({ "key": "new", "label": "New", "count": 4 }));
    assert_eq!(winner(4), json!([{ "id": 1 }]));
    assert_eq!(winner(5), json!("ACTIVE"));
    assert_eq!(
        winner(6),
        json!({ "value": "0.00", "currency": "Kč", "html": "0.00&nbsp;Kč", "isFree": true })
    );
    assert_eq!(winner(7), json!("as string"));
    assert_eq!(winner(8), json!({ "kind": "layered" }));
}

#[test]
fn test_fields_win_when_string_conversion_is_off() {
    let serializer = Serializer::new(Convention::new().with_prefer_string_conversion(false));

    let value = serializer.serialize(&Layered::from_rank(7)).unwrap();
    assert_eq!(to_json(&value), json!({ "kind": "layered" }));

    let value = serializer.serialize(&Layered::from_rank(6)).unwrap();
    assert_eq!(value.get("isFree"), Some(&Value::from(true)));
}

#[test]
fn test_string_conversion_preference() {
    let email = Arc::new(Email {
        address: "alice@example.com".to_string(),
    });

    let preferred = Serializer::default()
        .serialize(&Data::from(Arc::clone(&email)))
        .unwrap();
    assert_eq!(preferred, Value::from("alice@example.com"));

    let expanded = Serializer::new(Convention::new().with_prefer_string_conversion(false))
        .serialize(&Data::from(email))
        .unwrap();
    assert_eq!(to_json(&expanded), json!({ "address": "alice@example.com" }));
}

#[test]
fn test_date_time_values() {
    let instant = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    let naive = NaiveDate::from_ymd_opt(2023, 12, 31)
        .unwrap()
        .and_hms_opt(23, 59, 59)
        .unwrap();

    let value = Serializer::default()
        .serialize(&data!({ "createdAt": instant, "deletedAt": naive }))
        .unwrap();

    assert_eq!(
        to_json(&value),
        json!({ "createdAt": "2024-01-15 10:30:00", "deletedAt": "2023-12-31 23:59:59" })
    );
}

#[test]
fn test_date_time_with_offset_and_custom_format() {
    let instant = chrono::DateTime::parse_from_rfc3339("2024-06-01T08:00:00+02:00").unwrap();
    let serializer =
        Serializer::new(Convention::new().with_date_time_format("%d.%m.%Y %H:%M %:z"));

    assert_eq!(
        serializer.serialize(&Data::from(instant)).unwrap(),
        Value::from("01.06.2024 08:00 +02:00")
    );
}

#[test]
fn test_record_objects() {
    let record = Record::new("Invoice")
        .with_field("number", "2024-001")
        .with_field("total", 1250.5)
        .with_field("note", None::<String>);

    let value = Serializer::default().serialize(&Data::object(record)).unwrap();
    assert_eq!(
        to_json(&value),
        json!({ "number": "2024-001", "total": 1250.5, "note": null })
    );
}

#[test]
fn test_unsupported_values_fail_the_whole_call() {
    let response = data!({
        "ok": 1,
        "nested": { "file": (Data::opaque::<std::fs::File>()) }
    });

    let err = Serializer::default().serialize(&response).unwrap_err();
    assert!(err.is_unsupported_type());
    assert!(err.to_string().contains("std::fs::File"));
}

#[test]
fn test_entries_root_object() {
    struct Headers;

    impl Object for Headers {
        fn entries(&self) -> Option<Vec<(String, Data)>> {
            Some(vec![
                ("content-type".to_string(), Data::from("application/json")),
                ("pwd".to_string(), Data::from("/home/alice")),
            ])
        }
    }

    let value = Serializer::default().serialize(&Data::object(Headers)).unwrap();
    assert_eq!(
        to_json(&value),
        json!({ "content-type": "application/json", "pwd": "*****" })
    );
}

#[test]
fn test_bridge_keeps_objects_typed() {
    let data = to_data(&alice()).unwrap();
    let object = data.as_object().unwrap();
    assert_eq!(object.type_name(), "User");
}

#[test]
fn test_serialize_value_uses_convention() {
    #[derive(Serialize)]
    struct Profile {
        nickname: Option<String>,
        bio: Option<String>,
    }

    let profile = Profile {
        nickname: Some("ally".to_string()),
        bio: None,
    };
    let value = Serializer::new(Convention::new().with_elide_nulls(true))
        .serialize_value(&profile)
        .unwrap();
    assert_eq!(to_json(&value), json!({ "nickname": "ally" }));
}

#[test]
fn test_json_encoding_keeps_order() {
    let value = Serializer::default()
        .serialize(&data!({ "z": 1, "a": [true, null], "m": { "y": "x" } }))
        .unwrap();
    assert_eq!(
        serde_json::to_string(&value).unwrap(),
        r#"{"z":1,"a":[true,null],"m":{"y":"x"}}"#
    );
}

#[test]
fn test_errors_are_comparable() {
    let err = Serializer::default()
        .serialize(&data!({ "list": (Data::object(Items::default())) }))
        .unwrap_err();
    assert_eq!(err, Error::convention_violation("Item list", "items", "list"));
}
