//! Basic conversion of a serde type into plain data.
//!
//! Run with: cargo run --example simple

use dto_serializer::to_value;
use serde::Serialize;
use std::error::Error;

#[derive(Debug, Serialize)]
struct User {
    id: u32,
    name: String,
    email: String,
    #[serde(rename = "_sessionId")]
    session_id: String,
}

fn main() -> Result<(), Box<dyn Error>> {
    let users = vec![
        User {
            id: 42,
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            session_id: "f1d2".to_string(),
        },
        User {
            id: 43,
            name: "Bob Smith".to_string(),
            email: "bob@example.com".to_string(),
            session_id: "9ab7".to_string(),
        },
    ];

    let value = to_value(&users)?;
    println!("Plain data:\n{}\n", serde_json::to_string_pretty(&value)?);

    // underscore-prefixed fields never leave the process
    assert!(value.as_array().unwrap_or(&Vec::new()).iter().all(|user| user.get("_sessionId").is_none()));
    println!("✓ Internal fields skipped");

    Ok(())
}
