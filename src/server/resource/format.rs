//! Resource format detection and parsing.
//!
//! Providers publish either JSON or XML. Both are parsed into the same generic
//! `serde_json::Value` tree so the adapter only ever deals with one shape.
//!
//! XML is converted element by element:
//! - the document becomes `{ root_name: root_value }`
//! - attributes and child elements become keys of a mapping, by local name
//! - children repeated under the same name become a sequence, in document order
//! - an element holding only text becomes a string, an empty element becomes `null`
//! - text mixed with children is kept under `#text`

use std::fmt;

use quick_xml::{events::Event, Reader};
use serde_json::{Map, Value};

use crate::server::error::sync::SyncError;

/// Key used for text content of an element that also has attributes or children.
pub static XML_TEXT_KEY: &str = "#text";

/// Serialization format of a provider resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceFormat {
    /// JSON document.
    Json,
    /// XML document.
    Xml,
}

impl ResourceFormat {
    /// Value stored in the `provider_resource.format` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for ResourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of format detection, carrying the parsed tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Detected {
    /// Parsed JSON tree.
    Json(Value),
    /// XML document converted to a JSON-like tree.
    Xml(Value),
    /// Neither parser accepted the payload.
    Unrecognized,
}

/// Detects the format of `bytes` and parses them.
///
/// JSON is tried first, so a payload that happens to be valid in both formats is treated as
/// JSON. Empty and whitespace-only payloads are unrecognized.
pub fn detect(bytes: &[u8]) -> Detected {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Detected::Unrecognized;
    }

    if let Ok(tree) = serde_json::from_slice::<Value>(bytes) {
        return Detected::Json(tree);
    }

    let Ok(text) = std::str::from_utf8(bytes) else {
        return Detected::Unrecognized;
    };

    match xml_to_tree(text) {
        Some(tree) => Detected::Xml(tree),
        None => Detected::Unrecognized,
    }
}

/// Parses `bytes` into a tree, reporting which format was detected.
///
/// # Returns
/// - `Ok((Value, ResourceFormat))` - Parsed tree and its source format
/// - `Err(SyncError::UnrecognizedFormat)` - The payload is neither JSON nor well-formed XML
pub fn parse(bytes: &[u8]) -> Result<(Value, ResourceFormat), SyncError> {
    match detect(bytes) {
        Detected::Json(tree) => Ok((tree, ResourceFormat::Json)),
        Detected::Xml(tree) => Ok((tree, ResourceFormat::Xml)),
        Detected::Unrecognized => Err(SyncError::UnrecognizedFormat),
    }
}

struct Element {
    name: String,
    children: Map<String, Value>,
    text: String,
}

impl Element {
    fn into_value(self) -> Value {
        let text = self.text.trim();

        if self.children.is_empty() {
            if text.is_empty() {
                return Value::Null;
            }
            return Value::String(text.to_string());
        }

        let mut children = self.children;
        if !text.is_empty() {
            children.insert(XML_TEXT_KEY.to_string(), Value::String(text.to_string()));
        }
        Value::Object(children)
    }
}

/// Inserts a child value, turning repeated keys into a sequence.
fn insert_child(map: &mut Map<String, Value>, key: String, value: Value) {
    match map.get_mut(&key) {
        Some(Value::Array(items)) => items.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            map.insert(key, value);
        }
    }
}

fn open_element(start: &quick_xml::events::BytesStart<'_>) -> Option<Element> {
    let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut children = Map::new();

    for attr in start.attributes() {
        let attr = attr.ok()?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr.unescape_value().ok()?.into_owned();
        insert_child(&mut children, key, Value::String(value));
    }

    Some(Element {
        name,
        children,
        text: String::new(),
    })
}

/// Converts an XML document into a tree.
///
/// Returns `None` unless the document is well formed with exactly one root element.
pub fn xml_to_tree(xml: &str) -> Option<Value> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Value> = None;

    loop {
        let closed = match reader.read_event().ok()? {
            Event::Start(e) => {
                if stack.is_empty() && root.is_some() {
                    return None;
                }
                stack.push(open_element(&e)?);
                None
            }
            Event::Empty(e) => {
                if stack.is_empty() && root.is_some() {
                    return None;
                }
                Some(open_element(&e)?)
            }
            Event::End(_) => Some(stack.pop()?),
            Event::Text(e) => {
                let text = e.unescape().ok()?;
                match stack.last_mut() {
                    Some(element) => element.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return None,
                }
                None
            }
            Event::CData(e) => {
                let element = stack.last_mut()?;
                element.text.push_str(&String::from_utf8_lossy(&e));
                None
            }
            Event::Eof => break,
            _ => None,
        };

        if let Some(element) = closed {
            let name = element.name.clone();
            let value = element.into_value();

            match stack.last_mut() {
                Some(parent) => insert_child(&mut parent.children, name, value),
                None => {
                    let mut document = Map::new();
                    document.insert(name, value);
                    root = Some(Value::Object(document));
                }
            }
        }
    }

    if !stack.is_empty() {
        return None;
    }

    root
}
