//! Immutable key/value context for structured logging
//!
//! This module provides:
//! - `FieldValue`: a single scalar field value
//! - `FieldSet`: an immutable, cheaply clonable set of named fields
//!
//! A `FieldSet` is never changed in place. `with` and `union` return a new
//! set and leave the receiver untouched, so a set handed to one logger can be
//! shared with any number of copies.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::UInt(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value
    ///
    /// Returns `None` for values JSON has no representation for
    /// (NaN and the infinities).
    #[must_use]
    pub fn to_json_value(&self) -> Option<serde_json::Value> {
        let value = match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::UInt(u) => serde_json::Value::Number((*u).into()),
            FieldValue::Float(f) => serde_json::Value::Number(serde_json::Number::from_f64(*f)?),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
        };
        Some(value)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<char> for FieldValue {
    fn from(c: char) -> Self {
        FieldValue::String(c.to_string())
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(i: $ty) -> Self {
                    FieldValue::Int(i64::from(i))
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for FieldValue {
                fn from(u: $ty) -> Self {
                    FieldValue::UInt(u64::from(u))
                }
            }
        )*
    };
}

// Bytes render as their numeric value, matching how they are stored.
impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<usize> for FieldValue {
    fn from(u: usize) -> Self {
        FieldValue::UInt(u as u64)
    }
}

impl From<isize> for FieldValue {
    fn from(i: isize) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Immutable set of named fields attached to a logger
///
/// Cloning is an `Arc` bump. Deriving a new set copies the map, so sets that
/// are already handed out never change.
///
/// # Example
///
/// ```
/// use fieldlog::FieldSet;
///
/// let base = FieldSet::new().with("service", "api");
/// let request = base.with("request_id", 42);
///
/// assert_eq!(base.len(), 1);
/// assert_eq!(request.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    fields: Arc<BTreeMap<String, FieldValue>>,
}

impl FieldSet {
    /// Create an empty field set
    pub fn new() -> Self {
        Self::default()
    }

    /// Alias of [`FieldSet::new`]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Return a new set that also holds `key`; an existing value for `key` is replaced
    #[must_use]
    pub fn with<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut next = self.clone();
        Arc::make_mut(&mut next.fields).insert(key.into(), value.into());
        next
    }

    /// Return the union of both sets; on key collision the value from `other` wins
    #[must_use]
    pub fn union(&self, other: &FieldSet) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }

        let mut next = self.clone();
        let map = Arc::make_mut(&mut next.fields);
        for (key, value) in other.iter() {
            map.insert(key.to_string(), value.clone());
        }
        next
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(key, value)` pairs in ascending key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether both sets share the same storage
    pub fn ptr_eq(&self, other: &FieldSet) -> bool {
        Arc::ptr_eq(&self.fields, &other.fields)
    }

    /// Format fields as space separated key=value pairs
    pub fn format_fields(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for FieldSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_fields())
    }
}

impl<K, V> FromIterator<(K, V)> for FieldSet
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let fields = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect::<BTreeMap<_, _>>();
        Self {
            fields: Arc::new(fields),
        }
    }
}
