use super::{JsonCodec, SchemaError, Shape};
use serde_json::Value;

/// A tri-state optional field value.
///
/// Keeps "not sent" apart from "sent as `null`", which a plain `Option` cannot do:
///
/// | value          | encoded as        | decoded from      |
/// |----------------|-------------------|-------------------|
/// | `Absent`       | key omitted       | key missing       |
/// | `Null`         | `null`            | `null`            |
/// | `Present(v)`   | encoding of `v`   | any other value   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Maybe<T> {
    Absent,
    Null,
    Present(T),
}

impl<T> Default for Maybe<T> {
    fn default() -> Self {
        Maybe::Absent
    }
}

impl<T> Maybe<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Maybe::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Maybe::Null)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Maybe::Present(_))
    }

    /// Returns the held value, if any.
    pub fn get(&self) -> Option<&T> {
        match self {
            Maybe::Present(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> Maybe<&T> {
        match self {
            Maybe::Absent => Maybe::Absent,
            Maybe::Null => Maybe::Null,
            Maybe::Present(value) => Maybe::Present(value),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Maybe<U> {
        match self {
            Maybe::Absent => Maybe::Absent,
            Maybe::Null => Maybe::Null,
            Maybe::Present(value) => Maybe::Present(f(value)),
        }
    }

    /// `None` becomes `Absent`.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(value) => Maybe::Present(value),
            None => Maybe::Absent,
        }
    }

    /// Collapses `Absent` and `Null` into `None`.
    pub fn into_option(self) -> Option<T> {
        match self {
            Maybe::Present(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<T> for Maybe<T> {
    fn from(value: T) -> Self {
        Maybe::Present(value)
    }
}

impl<T: JsonCodec> JsonCodec for Maybe<T> {
    const SHAPE: Shape = T::SHAPE;
    const OPTIONAL: bool = true;
    const ACCEPTS_OBJECT: bool = T::ACCEPTS_OBJECT;

    fn is_absent(&self) -> bool {
        Maybe::is_absent(self)
    }

    fn encode(&self) -> Value {
        match self {
            Maybe::Present(value) => value.encode(),
            // An absent value only reaches here outside of a record field.
            Maybe::Absent | Maybe::Null => Value::Null,
        }
    }

    fn decode(value: &Value) -> Result<Self, SchemaError> {
        match value {
            Value::Null => Ok(Maybe::Null),
            other => T::decode(other).map(Maybe::Present),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_is_kept_apart_from_absence() {
        assert_eq!(Maybe::<i64>::decode(&Value::Null), Ok(Maybe::Null));
        assert_eq!(Maybe::<i64>::decode(&json!(0)), Ok(Maybe::Present(0)));
        assert!(JsonCodec::is_absent(&Maybe::<i64>::Absent));
        assert!(!JsonCodec::is_absent(&Maybe::<i64>::Null));
    }

    #[test]
    fn conversions() {
        assert_eq!(Maybe::from_option(Some(3)), Maybe::Present(3));
        assert_eq!(Maybe::<i32>::from_option(None), Maybe::Absent);
        assert_eq!(Maybe::Present(2).map(|v| v * 2).into_option(), Some(4));
        assert_eq!(Maybe::<i32>::Null.into_option(), None);
    }
}
