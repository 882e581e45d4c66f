//! Typed objects with capabilities: money, enumerations, translated text,
//! dates and a paginated response.
//!
//! Run with: cargo run --example domain_types

use chrono::{TimeZone, Utc};
use dto_serializer::{
    data, Backing, Currency, Data, DataMap, Enumeration, Items, LocalizedString, Object,
    Pagination, Price, Serializer,
};
use std::error::Error;

struct Euro;

impl Currency for Euro {
    fn symbol(&self) -> String {
        "€".to_string()
    }
}

struct Amount(u32);

impl Price for Amount {
    fn value(&self) -> String {
        format!("{}.{:02}", self.0 / 100, self.0 % 100)
    }

    fn currency(&self) -> &dyn Currency {
        &Euro
    }

    fn render(&self, humanized: bool) -> String {
        if humanized {
            format!("{}&nbsp;€", self.value())
        } else {
            format!("{} EUR", self.value())
        }
    }

    fn is_free(&self) -> bool {
        self.0 == 0
    }
}

impl Object for Amount {
    fn as_price(&self) -> Option<&dyn Price> {
        Some(self)
    }
}

enum Availability {
    InStock,
    SoldOut,
}

impl Enumeration for Availability {
    fn name(&self) -> &str {
        match self {
            Availability::InStock => "IN_STOCK",
            Availability::SoldOut => "SOLD_OUT",
        }
    }

    fn backing_value(&self) -> Option<Backing> {
        match self {
            Availability::InStock => Some(Backing::String("in-stock".to_string())),
            Availability::SoldOut => None,
        }
    }
}

impl Object for Availability {
    fn as_enumeration(&self) -> Option<&dyn Enumeration> {
        Some(self)
    }
}

struct Label(&'static str);

impl LocalizedString for Label {
    fn translate(&self) -> String {
        match self.0 {
            "catalog.title" => "Product catalog".to_string(),
            other => other.to_string(),
        }
    }
}

impl Object for Label {
    fn as_localized(&self) -> Option<&dyn LocalizedString> {
        Some(self)
    }
}

fn product(name: &str, cents: u32, availability: Availability) -> DataMap {
    let mut row = DataMap::new();
    row.insert("name".to_string(), Data::from(name));
    row.insert("price".to_string(), Data::object(Amount(cents)));
    row.insert("availability".to_string(), Data::object(availability));
    row
}

fn main() -> Result<(), Box<dyn Error>> {
    let items = Items::new(vec![
        product("Keyboard", 4999, Availability::InStock),
        product("Sticker", 0, Availability::SoldOut),
    ]);

    let generated_at = Utc
        .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
        .single()
        .ok_or("invalid date")?;

    let response = data!({
        "title": (Data::object(Label("catalog.title"))),
        "generatedAt": generated_at,
        "items": (Data::object(items)),
        "paginator": (Data::object(Pagination::new(2).with_item_count(2)))
    });

    let value = Serializer::default().serialize(&response)?;
    println!("{}", serde_json::to_string_pretty(&value)?);

    // an item list anywhere but under "items" is rejected
    let misplaced = data!({ "products": (Data::object(Items::default())) });
    match Serializer::default().serialize(&misplaced) {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("\n✓ Rejected: {}", err),
    }

    Ok(())
}
