//! Ordered field records used for bulk attribute assignment.

use indexmap::IndexMap;

use crate::Value;
#[cfg(feature = "serde")]
use crate::{Error, Result};

/// An ordered mapping of field name to scalar.
///
/// Passed to [`Node::invoke_with`](crate::Node::invoke_with), every field
/// becomes an attribute of the new child, in field order.
///
/// ```
/// use pliant::{Node, Record};
///
/// let mut model = Node::new("model")?;
/// let class = model.invoke_with("class", Record::new().field("name", "Class1"))?;
/// assert_eq!(class.attr("name"), Some("Class1"));
/// # Ok::<(), pliant::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: IndexMap<String, Value>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing the value of an existing field with the same name
    /// without moving it.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a field in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Iterate fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn into_iter_fields(self) -> impl Iterator<Item = (String, Value)> {
        self.fields.into_iter()
    }

    /// Build a record from any serializable struct or map.
    ///
    /// Field order follows the serialized order. Scalar fields (strings,
    /// numbers, booleans) become values; `null` fields are skipped; anything
    /// else is rejected.
    #[cfg(feature = "serde")]
    pub fn from_serialize<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        use serde_json::Value as Json;

        let object = match serde_json::to_value(value).map_err(|e| Error::Record(e.to_string()))? {
            Json::Object(object) => object,
            other => {
                return Err(Error::Record(format!(
                    "expected a struct or map, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut record = Record::new();
        for (field, value) in object {
            match value {
                Json::Null => {}
                Json::Bool(b) => record.insert(field, b),
                Json::Number(n) => record.insert(field, n.to_string()),
                Json::String(s) => record.insert(field, s),
                Json::Array(_) | Json::Object(_) => return Err(Error::NonScalarField { field }),
            }
        }
        Ok(record)
    }
}

#[cfg(feature = "serde")]
fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (k, v) in iter {
            record.insert(k, v);
        }
        record
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Record {
    fn from(fields: [(K, V); N]) -> Self {
        fields.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
