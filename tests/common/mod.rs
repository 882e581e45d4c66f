//! Shared fixtures for the integration suites.
#![allow(dead_code)]

use dto_serializer::{
    Backing, Currency, Data, Enumeration, LocalizedString, Object, Price, Record,
};
use std::io;
use std::sync::{Arc, Mutex, OnceLock};
use tracing_subscriber::fmt::MakeWriter;

/// A linked node whose successor is set after construction, so tests can
/// build chains and cycles.
pub struct Node {
    name: String,
    next: OnceLock<Data>,
}

impl Node {
    pub fn new(name: &str) -> Arc<Self> {
        Arc::new(Node {
            name: name.to_string(),
            next: OnceLock::new(),
        })
    }

    pub fn link(&self, next: Data) {
        let _ = self.next.set(next);
    }
}

impl Object for Node {
    fn fields(&self) -> Vec<(String, Data)> {
        vec![
            ("name".to_string(), Data::from(self.name.as_str())),
            (
                "next".to_string(),
                self.next.get().cloned().unwrap_or(Data::Null),
            ),
        ]
    }
}

/// Builds `levels` nested nodes linked through their `next` field.
pub fn node_chain(levels: usize) -> Data {
    let mut current = Data::Null;
    for level in (0..levels).rev() {
        let node = Node::new(&format!("level-{}", level));
        node.link(current);
        current = Data::from(node);
    }
    current
}

/// Builds `levels` nested records linked through a `children` list.
pub fn branch_chain(levels: usize) -> Data {
    let mut current: Option<Data> = None;
    for level in (0..levels).rev() {
        let children = current.take().map(|child| vec![child]).unwrap_or_default();
        let record = Record::new("Branch")
            .with_field("level", level)
            .with_field("children", Data::List(children));
        current = Some(Data::object(record));
    }
    current.unwrap_or(Data::Null)
}

pub struct Translation {
    pub text: String,
}

impl LocalizedString for Translation {
    fn translate(&self) -> String {
        self.text.clone()
    }
}

impl Object for Translation {
    fn fields(&self) -> Vec<(String, Data)> {
        vec![("text".to_string(), Data::from(self.text.as_str()))]
    }

    fn as_localized(&self) -> Option<&dyn LocalizedString> {
        Some(self)
    }
}

pub struct Czk;

impl Currency for Czk {
    fn symbol(&self) -> String {
        "Kč".to_string()
    }
}

pub struct Money {
    pub amount: String,
}

impl Price for Money {
    fn value(&self) -> String {
        self.amount.clone()
    }

    fn currency(&self) -> &dyn Currency {
        &Czk
    }

    fn render(&self, humanized: bool) -> String {
        if humanized {
            format!("{}&nbsp;Kč", self.amount)
        } else {
            format!("{} CZK", self.amount)
        }
    }

    fn is_free(&self) -> bool {
        self.amount.trim_start_matches(['0', '.']).is_empty()
    }
}

impl Object for Money {
    fn as_price(&self) -> Option<&dyn Price> {
        Some(self)
    }

    fn to_plain_string(&self) -> Option<String> {
        Some(self.render(false))
    }
}

#[derive(Clone, Copy)]
pub enum OrderStatus {
    Active,
    Shipped,
    Cancelled,
}

impl Enumeration for OrderStatus {
    fn name(&self) -> &str {
        match self {
            OrderStatus::Active => "ACTIVE",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    fn backing_value(&self) -> Option<Backing> {
        match self {
            OrderStatus::Active => None,
            OrderStatus::Shipped => Some(Backing::Int(2)),
            OrderStatus::Cancelled => Some(Backing::String("cancelled".to_string())),
        }
    }
}

impl Object for OrderStatus {
    fn as_enumeration(&self) -> Option<&dyn Enumeration> {
        Some(self)
    }

    fn to_plain_string(&self) -> Option<String> {
        Some(format!("status:{}", self.name()))
    }
}

/// An object that only has a string form and one public field.
pub struct Email {
    pub address: String,
}

impl Object for Email {
    fn fields(&self) -> Vec<(String, Data)> {
        vec![("address".to_string(), Data::from(self.address.as_str()))]
    }

    fn to_plain_string(&self) -> Option<String> {
        Some(self.address.clone())
    }
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        let buffer = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut buffer) = self.0.lock() {
            buffer.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with a subscriber that writes WARN and above into `capture`.
pub fn with_captured_logs<T>(capture: &LogCapture, f: impl FnOnce() -> T) -> T {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, f)
}

pub fn to_json(value: &dto_serializer::Value) -> serde_json::Value {
    serde_json::to_value(value).expect("plain values always encode")
}
