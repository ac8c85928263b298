//! Typed key/value fields attached to an [`Entry`](super::entry::Entry)
//!
//! This module provides:
//! - `FieldValue`: the closed set of value kinds a field can carry
//! - `Field`: a keyed value tagged as explicit or implicit
//! - `ImplicitArg`: one element of the flat sequence accepted by `Logger::with`

use serde::{Serialize, Serializer};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Value type for structured logging fields
#[derive(Debug, Clone)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Error(Arc<dyn StdError + Send + Sync>),
    Opaque(Arc<dyn fmt::Debug + Send + Sync>),
}

impl FieldValue {
    /// Wrap an error so its message is carried as a field value
    pub fn error<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        FieldValue::Error(Arc::new(err))
    }

    /// Wrap any debuggable value that has no dedicated variant
    pub fn opaque<T>(value: T) -> Self
    where
        T: fmt::Debug + Send + Sync + 'static,
    {
        FieldValue::Opaque(Arc::new(value))
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Error(e) => write!(f, "{}", e),
            FieldValue::Opaque(v) => write!(f, "{:?}", v),
        }
    }
}

// Errors and opaque values compare by their rendered form.
impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FieldValue::String(a), FieldValue::String(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Error(a), FieldValue::Error(b)) => a.to_string() == b.to_string(),
            (FieldValue::Opaque(a), FieldValue::Opaque(b)) => {
                format!("{:?}", a) == format!("{:?}", b)
            }
            _ => false,
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::String(s) => serializer.serialize_str(s),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Float(f) => serializer.serialize_f64(*f),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Error(e) => serializer.collect_str(e),
            FieldValue::Opaque(v) => serializer.serialize_str(&format!("{:?}", v)),
        }
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

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i64::from(i))
    }
}

// Values past i64::MAX keep their exact digits as a string.
impl From<u64> for FieldValue {
    fn from(i: u64) -> Self {
        i64::try_from(i).map_or_else(|_| FieldValue::String(i.to_string()), FieldValue::Int)
    }
}

impl From<usize> for FieldValue {
    fn from(i: usize) -> Self {
        i64::try_from(i).map_or_else(|_| FieldValue::String(i.to_string()), FieldValue::Int)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f64::from(f))
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// How a field entered the entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Built by the caller as a typed `Field`
    Explicit,
    /// Inferred from the flat sequence passed to `Logger::with`
    Implicit,
}

/// A single keyed value in an entry's field sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub key: String,
    pub kind: FieldKind,
    pub value: FieldValue,
}

impl Field {
    /// Create an explicit field
    pub fn new<K, V>(key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self {
            key: key.into(),
            kind: FieldKind::Explicit,
            value: value.into(),
        }
    }

    pub(crate) fn implicit(key: String, value: FieldValue) -> Self {
        Self {
            key,
            kind: FieldKind::Implicit,
            value,
        }
    }

    /// Key used for an unnamed implicit value at `index` in the field sequence
    pub fn auto_key(index: usize) -> String {
        format!("_{}", index)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// One element of the flat, positional sequence accepted by `Logger::with`.
///
/// A plain string followed by another plain value forms a named pair; any
/// other plain value becomes an auto-keyed field. `Pair` carries a key and
/// value together and is dropped when the key is not a plain string.
#[derive(Debug, Clone, PartialEq)]
pub enum ImplicitArg {
    Value(FieldValue),
    Field(Field),
    Pair(FieldValue, FieldValue),
}

impl From<FieldValue> for ImplicitArg {
    fn from(value: FieldValue) -> Self {
        ImplicitArg::Value(value)
    }
}

impl From<Field> for ImplicitArg {
    fn from(field: Field) -> Self {
        ImplicitArg::Field(field)
    }
}

impl<K, V> From<(K, V)> for ImplicitArg
where
    K: Into<FieldValue>,
    V: Into<FieldValue>,
{
    fn from((key, value): (K, V)) -> Self {
        ImplicitArg::Pair(key.into(), value.into())
    }
}

macro_rules! implicit_from_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ImplicitArg {
                fn from(value: $ty) -> Self {
                    ImplicitArg::Value(value.into())
                }
            }
        )*
    };
}

implicit_from_value!(String, &str, i64, i32, u32, u64, usize, f64, f32, bool);

/// Resolve a flat implicit sequence into fields.
///
/// `offset` is the length of the sequence the fields will be appended to, so
/// auto keys reflect final positions. Malformed pairs are skipped.
pub(crate) fn resolve_implicit(args: Vec<ImplicitArg>, offset: usize) -> Vec<Field> {
    let mut resolved = Vec::with_capacity(args.len());
    let mut args = args.into_iter().peekable();

    while let Some(arg) = args.next() {
        match arg {
            ImplicitArg::Value(FieldValue::String(key))
                if matches!(args.peek(), Some(ImplicitArg::Value(_))) =>
            {
                if let Some(ImplicitArg::Value(value)) = args.next() {
                    resolved.push(Field::implicit(key, value));
                }
            }
            ImplicitArg::Value(value) => {
                let key = Field::auto_key(offset + resolved.len());
                resolved.push(Field::implicit(key, value));
            }
            ImplicitArg::Field(field) => resolved.push(field),
            ImplicitArg::Pair(FieldValue::String(key), value) => {
                resolved.push(Field::implicit(key, value));
            }
            ImplicitArg::Pair(_, _) => {}
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: Vec<ImplicitArg>) -> Vec<Field> {
        resolve_implicit(items, 0)
    }

    #[test]
    fn test_string_led_pair_becomes_named_field() {
        let fields = args(vec!["user".into(), "alice".into()]);
        assert_eq!(fields, vec![Field::implicit("user".into(), "alice".into())]);
    }

    #[test]
    fn test_trailing_value_is_auto_keyed() {
        let fields = args(vec!["user".into(), "alice".into(), 42.into()]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].key, "_1");
        assert_eq!(fields[1].value, FieldValue::Int(42));
        assert_eq!(fields[1].kind, FieldKind::Implicit);
    }

    #[test]
    fn test_unpaired_string_is_auto_keyed() {
        let fields = args(vec![7.into(), "dangling".into()]);
        assert_eq!(fields[0].key, "_0");
        assert_eq!(fields[1].key, "_1");
        assert_eq!(fields[1].value.as_str(), Some("dangling"));
    }

    #[test]
    fn test_auto_keys_account_for_offset() {
        let fields = resolve_implicit(vec![true.into()], 3);
        assert_eq!(fields[0].key, "_3");
    }

    #[test]
    fn test_non_string_pair_key_is_dropped() {
        let fields = args(vec![(42, "x").into(), ("ok", 1).into(), 2.5.into()]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].key, "ok");
        assert_eq!(fields[1].key, "_1");
    }

    #[test]
    fn test_explicit_field_kept_verbatim() {
        let explicit = Field::new("request_id", "abc-123");
        let fields = args(vec!["k".into(), explicit.clone().into(), 1.into()]);
        assert_eq!(fields[0].key, "_0");
        assert_eq!(fields[1], explicit);
        assert_eq!(fields[1].kind, FieldKind::Explicit);
    }

    #[test]
    fn test_error_and_opaque_values_render() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = FieldValue::error(io);
        assert_eq!(err.to_string(), "no such file");
        assert_eq!(serde_json::to_value(&err).unwrap(), serde_json::json!("no such file"));

        let opaque = FieldValue::opaque(vec![1, 2]);
        assert_eq!(opaque.to_string(), "[1, 2]");
    }

    #[test]
    fn test_unsigned_values_past_i64_keep_exact_digits() {
        assert_eq!(FieldValue::from(i64::MAX as u64), FieldValue::Int(i64::MAX));
        assert_eq!(
            FieldValue::from(i64::MAX as u64 + 1),
            FieldValue::from("9223372036854775808")
        );
        assert_eq!(FieldValue::from(u64::MAX), FieldValue::from(u64::MAX.to_string()));
        assert_eq!(FieldValue::from(7usize), FieldValue::Int(7));
    }

    #[test]
    fn test_field_display() {
        assert_eq!(Field::new("latency_ms", 42.5).to_string(), "latency_ms=42.5");
    }
}
