use std::collections::BTreeMap;

/// String-keyed mapping as found in property list dictionaries.
pub type Dictionary = BTreeMap<String, DocumentValue>;

/// A decoded property list value.
///
/// Dates decode to [`DocumentValue::Real`] (seconds since 2001-01-01) and
/// keyed-archiver UIDs to [`DocumentValue::Integer`]; sets decode to arrays.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentValue {
    Dictionary(Dictionary),
    Array(Vec<DocumentValue>),
    Integer(i64),
    Real(f64),
    String(String),
    Boolean(bool),
    Data(Vec<u8>),
    Null,
}

impl DocumentValue {
    /// Short name of the variant, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            DocumentValue::Dictionary(_) => "dictionary",
            DocumentValue::Array(_) => "array",
            DocumentValue::Integer(_) => "integer",
            DocumentValue::Real(_) => "real",
            DocumentValue::String(_) => "string",
            DocumentValue::Boolean(_) => "boolean",
            DocumentValue::Data(_) => "data",
            DocumentValue::Null => "null",
        }
    }

    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            DocumentValue::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[DocumentValue]> {
        match self {
            DocumentValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&[u8]> {
        match self {
            DocumentValue::Data(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            DocumentValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DocumentValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            DocumentValue::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            DocumentValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DocumentValue::Null)
    }

    /// Looks up `key` if this value is a dictionary.
    pub fn get(&self, key: &str) -> Option<&DocumentValue> {
        self.as_dictionary().and_then(|map| map.get(key))
    }
}

impl From<Dictionary> for DocumentValue {
    fn from(map: Dictionary) -> Self {
        DocumentValue::Dictionary(map)
    }
}

impl From<Vec<DocumentValue>> for DocumentValue {
    fn from(items: Vec<DocumentValue>) -> Self {
        DocumentValue::Array(items)
    }
}

impl From<Vec<u8>> for DocumentValue {
    fn from(bytes: Vec<u8>) -> Self {
        DocumentValue::Data(bytes)
    }
}

impl From<&str> for DocumentValue {
    fn from(s: &str) -> Self {
        DocumentValue::String(s.to_string())
    }
}

impl From<String> for DocumentValue {
    fn from(s: String) -> Self {
        DocumentValue::String(s)
    }
}

impl From<i64> for DocumentValue {
    fn from(i: i64) -> Self {
        DocumentValue::Integer(i)
    }
}

impl From<f64> for DocumentValue {
    fn from(r: f64) -> Self {
        DocumentValue::Real(r)
    }
}

impl From<bool> for DocumentValue {
    fn from(b: bool) -> Self {
        DocumentValue::Boolean(b)
    }
}
