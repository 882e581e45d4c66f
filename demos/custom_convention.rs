//! Customizing output with a Convention, with warnings printed to stderr.
//!
//! Run with: RUST_LOG=warn cargo run --example custom_convention

use chrono::NaiveDate;
use dto_serializer::{data, Convention, Serializer};
use std::error::Error;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let created = NaiveDate::from_ymd_opt(2024, 5, 17)
        .and_then(|date| date.and_hms_opt(9, 15, 0))
        .ok_or("invalid date")?;

    let response = data!({
        "login": "alice",
        "password": "hunter2",
        "apiToken": "tok_51H8",
        "createdAt": created,
        "avatar": null
    });

    // Default convention
    println!("Default:");
    let value = Serializer::default().serialize(&response)?;
    println!("{}\n", serde_json::to_string_pretty(&value)?);

    // ISO dates, no nulls, tokens treated as secrets
    println!("Custom:");
    let convention = Convention::new()
        .with_date_time_format("%Y-%m-%dT%H:%M:%S")
        .with_elide_nulls(true)
        .with_sensitive_key("apiToken");
    let value = Serializer::new(convention).serialize(&response)?;
    println!("{}\n", serde_json::to_string_pretty(&value)?);

    // Conventions can be loaded from configuration files
    println!("From JSON:");
    let convention: Convention =
        serde_json::from_str(r#"{ "dateTimeFormat": "%d.%m.%Y", "sensitiveKeys": ["login"] }"#)?;
    let value = Serializer::new(convention).serialize(&response)?;
    println!("{}", serde_json::to_string_pretty(&value)?);

    Ok(())
}
