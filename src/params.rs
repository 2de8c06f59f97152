//! Address parameters.
//!
//! An [`Address`](crate::Address) carries a flat bag of named values. Values
//! decoded from a URL query are always text; programmatic addresses may also
//! carry integers, floats, booleans, or an opaque [`Payload`] for structured
//! data such as an alert descriptor.
//!
//! # Example
//!
//! ```
//! use surface_navigator::{Parameters, ParamValue};
//!
//! let params = Parameters::from_query("page=1&sort=name&page=2");
//! assert_eq!(params.get_as::<u32>("page"), Some(2)); // last write wins
//! assert_eq!(params.get_str("sort"), Some("name"));
//!
//! let params = Parameters::new().with("index", 3_i64).with("expanded", true);
//! assert_eq!(params.get("expanded"), Some(&ParamValue::Bool(true)));
//! ```

use crate::trace_log;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Escaped in query names and values. `+` is escaped so it reads back literally.
const QUERY_ESCAPES: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'&')
    .add(b'+')
    .add(b'<')
    .add(b'=')
    .add(b'>')
    .add(b'`');

fn decode_component(component: &str) -> String {
    percent_decode_str(component).decode_utf8_lossy().into_owned()
}

/// Opaque structured value carried alongside scalar parameters.
///
/// Payloads compare by identity: two clones of the same payload are equal,
/// two payloads built from equal values are not.
#[derive(Clone)]
pub struct Payload(Rc<dyn Any>);

impl Payload {
    /// Wrap any value.
    pub fn new<T: Any>(value: T) -> Self {
        Self(Rc::new(value))
    }

    /// Borrow the wrapped value if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Payload(..)")
    }
}

impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A single parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Free text; every query-decoded value uses this variant.
    Text(String),
    /// Signed integer.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// Boolean flag.
    Bool(bool),
    /// Opaque structured value, never serialised into a URL.
    Payload(Payload),
}

impl ParamValue {
    /// Borrow the text if this is a [`Text`](Self::Text) value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Return `true` for [`Payload`](Self::Payload) values.
    pub fn is_payload(&self) -> bool {
        matches!(self, Self::Payload(_))
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{}", value),
            Self::Float(value) => write!(f, "{}", value),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Payload(_) => f.write_str("<payload>"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<usize> for ParamValue {
    fn from(value: usize) -> Self {
        // Indices beyond i64::MAX cannot be addressed anyway; keep them as text.
        i64::try_from(value).map_or_else(|_| Self::Text(value.to_string()), Self::Integer)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Payload> for ParamValue {
    fn from(value: Payload) -> Self {
        Self::Payload(value)
    }
}

/// Flat key → value bag attached to an [`Address`](crate::Address).
///
/// Inserting an existing key overwrites the previous value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: HashMap<String, ParamValue>,
}

impl Parameters {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a URL query string (without the leading `?`).
    ///
    /// Items without a `=` carry no value and are dropped. When a name
    /// repeats, the item furthest to the right wins. Names and values are
    /// percent-decoded; `+` is an ordinary character, not a space.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::new();

        for item in query.split('&').filter(|item| !item.is_empty()) {
            let Some((name, value)) = item.split_once('=') else {
                trace_log!("Dropping query item '{}' without a value", item);
                continue;
            };
            params.insert(
                decode_component(name),
                ParamValue::Text(decode_component(value)),
            );
        }

        params
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.values.get(key)
    }

    /// Get a text value by key.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key)?.as_str()
    }

    /// Get a scalar value and parse it as `T`.
    ///
    /// Works across variants: `Integer(2)` parses as `u8`, `Text("2")` too.
    /// Payloads never parse.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: std::str::FromStr,
    {
        let value = self.values.get(key)?;
        if value.is_payload() {
            return None;
        }
        value.to_string().parse().ok()
    }

    /// Borrow a payload value of type `T`.
    pub fn payload<T: Any>(&self, key: &str) -> Option<&T> {
        match self.values.get(key)? {
            ParamValue::Payload(payload) => payload.downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Insert or overwrite a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Return `true` if the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Iterate over all `(key, value)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamValue)> {
        self.values.iter()
    }

    /// Return `true` if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Return the number of parameters.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Serialise scalar values into a query string, keys sorted.
    ///
    /// Payloads are skipped.
    pub fn to_query_string(&self) -> String {
        let mut keys: Vec<&String> = self
            .values
            .iter()
            .filter(|(_, value)| !value.is_payload())
            .map(|(key, _)| key)
            .collect();
        keys.sort();

        keys.into_iter()
            .map(|key| {
                format!(
                    "{}={}",
                    utf8_percent_encode(key, QUERY_ESCAPES),
                    utf8_percent_encode(&self.values[key].to_string(), QUERY_ESCAPES)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}
