//! # JSON Codec
//!
//! This module implements the bidirectional mapping between typed values and
//! [`serde_json::Value`], the interchange type used at every API boundary.
//!
//! ## How it works
//!
//! Every type that crosses the wire implements [`JsonCodec`]. Scalars, sequences and the
//! optional containers are covered here; structured types are declared through three macros
//! which generate the implementation from a single declaration:
//!
//! * **[`record!`](crate::record)**: a struct with a static table of [`FieldDescriptor`]s
//!   (field name, wire name, presence, encode and decode functions). Encoding and decoding
//!   walk that table, so there is no per-type JSON plumbing.
//! * **[`one_of!`](crate::one_of)**: a wire-transparent tagged union. The held candidate is
//!   encoded directly; decoding dispatches on the shape of the incoming JSON.
//! * **[`string_enum!`](crate::string_enum)**: a closed set of members with exact wire strings.
//!
//! ## Optional fields
//!
//! Optionality is a property of the field's type. [`Maybe<T>`] distinguishes a field that is
//! absent from one explicitly sent as `null`, so `decode(encode(x)) == x` holds for every value.
//! `Option<T>` is accepted as the two-state form, where `null` and absence collapse into `None`.
//!
//! ## Example
//!
//! ```rust
//! use botwire_core::{codec, record, codec::Maybe};
//!
//! record! {
//!     pub struct Greeting {
//!         pub text: String,
//!         pub lang: Maybe<String> => "language_code",
//!     }
//! }
//!
//! let greeting = Greeting { text: "hi".into(), lang: Maybe::Absent };
//! assert_eq!(codec::to_string(&greeting), r#"{"text":"hi"}"#);
//!
//! let decoded: Greeting = codec::from_str(r#"{"text":"hi","language_code":"en"}"#).unwrap();
//! assert_eq!(decoded.lang, Maybe::Present("en".to_string()));
//! ```
mod error;
mod maybe;
pub mod one_of;
pub mod record;
pub mod string_enum;

pub use error::SchemaError;
pub use maybe::Maybe;
pub use record::{FieldDescriptor, Presence, Record};

use serde_json::Value;
use std::fmt;

/// The JSON shape a type encodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Object,
    /// Accepts any JSON value (e.g. a raw [`Value`]).
    Any,
}

impl Shape {
    /// Returns the shape of a concrete JSON value. Never returns [`Shape::Any`].
    pub fn of(value: &Value) -> Shape {
        match value {
            Value::Null => Shape::Null,
            Value::Bool(_) => Shape::Boolean,
            Value::Number(_) => Shape::Number,
            Value::String(_) => Shape::String,
            Value::Array(_) => Shape::Array,
            Value::Object(_) => Shape::Object,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Null => "null",
            Shape::Boolean => "boolean",
            Shape::Number => "number",
            Shape::String => "string",
            Shape::Array => "array",
            Shape::Object => "object",
            Shape::Any => "any value",
        };
        f.write_str(name)
    }
}

/// A type with a JSON wire representation.
pub trait JsonCodec: Sized {
    /// The JSON shape produced by [`JsonCodec::encode`].
    const SHAPE: Shape;

    /// Whether a record field of this type may be missing from the wire object.
    const OPTIONAL: bool = false;

    /// Whether [`JsonCodec::decode`] can accept a JSON object. Unions use it to detect
    /// candidates competing for the same object.
    const ACCEPTS_OBJECT: bool = matches!(Self::SHAPE, Shape::Object | Shape::Any);

    /// Returns `true` when the value is the type's absent sentinel and must not be emitted.
    fn is_absent(&self) -> bool {
        false
    }

    fn encode(&self) -> Value;

    fn decode(value: &Value) -> Result<Self, SchemaError>;
}

/// Encodes a value into a JSON document.
pub fn to_value<T: JsonCodec>(value: &T) -> Value {
    value.encode()
}

/// Decodes a JSON document into a typed value.
pub fn from_value<T: JsonCodec>(value: &Value) -> Result<T, SchemaError> {
    T::decode(value)
}

/// Encodes a value into its compact JSON text.
pub fn to_string<T: JsonCodec>(value: &T) -> String {
    value.encode().to_string()
}

/// Parses JSON text and decodes it into a typed value.
pub fn from_str<T: JsonCodec>(text: &str) -> Result<T, SchemaError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| SchemaError::Syntax(e.to_string()))?;
    T::decode(&value)
}

fn expect_shape(expected: Shape, value: &Value) -> Result<(), SchemaError> {
    let found = Shape::of(value);
    if found == expected {
        Ok(())
    } else {
        Err(SchemaError::TypeMismatch { expected, found })
    }
}

impl JsonCodec for Value {
    const SHAPE: Shape = Shape::Any;

    fn encode(&self) -> Value {
        self.clone()
    }

    fn decode(value: &Value) -> Result<Self, SchemaError> {
        Ok(value.clone())
    }
}

impl JsonCodec for bool {
    const SHAPE: Shape = Shape::Boolean;

    fn encode(&self) -> Value {
        Value::Bool(*self)
    }

    fn decode(value: &Value) -> Result<Self, SchemaError> {
        value.as_bool().ok_or(SchemaError::TypeMismatch {
            expected: Shape::Boolean,
            found: Shape::of(value),
        })
    }
}

impl JsonCodec for String {
    const SHAPE: Shape = Shape::String;

    fn encode(&self) -> Value {
        Value::String(self.clone())
    }

    fn decode(value: &Value) -> Result<Self, SchemaError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(SchemaError::TypeMismatch {
                expected: Shape::String,
                found: Shape::of(other),
            }),
        }
    }
}

/// JSON has no representation for NaN and the infinities: they encode to `null`, which does not
/// decode back into an `f64`.
impl JsonCodec for f64 {
    const SHAPE: Shape = Shape::Number;

    fn encode(&self) -> Value {
        Value::from(*self)
    }

    fn decode(value: &Value) -> Result<Self, SchemaError> {
        expect_shape(Shape::Number, value)?;
        value.as_f64().ok_or_else(|| SchemaError::OutOfRange {
            value: value.to_string(),
            target: "f64",
        })
    }
}

macro_rules! integer_codec {
    ($($int:ty),* $(,)?) => {
        $(
            impl JsonCodec for $int {
                const SHAPE: Shape = Shape::Number;

                fn encode(&self) -> Value {
                    Value::from(*self)
                }

                fn decode(value: &Value) -> Result<Self, SchemaError> {
                    expect_shape(Shape::Number, value)?;

                    let out_of_range = || SchemaError::OutOfRange {
                        value: value.to_string(),
                        target: stringify!($int),
                    };

                    if let Some(n) = value.as_i64() {
                        <$int>::try_from(n).map_err(|_| out_of_range())
                    } else if let Some(n) = value.as_u64() {
                        <$int>::try_from(n).map_err(|_| out_of_range())
                    } else {
                        // Fractional numbers never fit an integer field.
                        Err(out_of_range())
                    }
                }
            }
        )*
    };
}

integer_codec!(i32, i64, u8, u32, u64);

impl<T: JsonCodec> JsonCodec for Vec<T> {
    const SHAPE: Shape = Shape::Array;

    fn encode(&self) -> Value {
        Value::Array(self.iter().map(JsonCodec::encode).collect())
    }

    fn decode(value: &Value) -> Result<Self, SchemaError> {
        let Value::Array(items) = value else {
            return Err(SchemaError::TypeMismatch {
                expected: Shape::Array,
                found: Shape::of(value),
            });
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                T::decode(item).map_err(|source| SchemaError::AtIndex {
                    index,
                    source: Box::new(source),
                })
            })
            .collect()
    }
}

impl<T: JsonCodec> JsonCodec for Box<T> {
    const SHAPE: Shape = T::SHAPE;
    const OPTIONAL: bool = T::OPTIONAL;
    const ACCEPTS_OBJECT: bool = T::ACCEPTS_OBJECT;

    fn is_absent(&self) -> bool {
        (**self).is_absent()
    }

    fn encode(&self) -> Value {
        (**self).encode()
    }

    fn decode(value: &Value) -> Result<Self, SchemaError> {
        T::decode(value).map(Box::new)
    }
}

/// Two-state optional: `None` is never emitted, and both a missing key and `null` decode to `None`.
impl<T: JsonCodec> JsonCodec for Option<T> {
    const SHAPE: Shape = T::SHAPE;
    const OPTIONAL: bool = true;
    const ACCEPTS_OBJECT: bool = T::ACCEPTS_OBJECT;

    fn is_absent(&self) -> bool {
        self.is_none()
    }

    fn encode(&self) -> Value {
        match self {
            Some(value) => value.encode(),
            None => Value::Null,
        }
    }

    fn decode(value: &Value) -> Result<Self, SchemaError> {
        match value {
            Value::Null => Ok(None),
            other => T::decode(other).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integers_reject_fractions_and_overflow() {
        assert_eq!(i64::decode(&json!(42)), Ok(42));
        assert!(matches!(
            i64::decode(&json!(1.5)),
            Err(SchemaError::OutOfRange { target: "i64", .. })
        ));
        assert!(matches!(
            u8::decode(&json!(300)),
            Err(SchemaError::OutOfRange { target: "u8", .. })
        ));
        assert_eq!(
            i32::decode(&json!("7")),
            Err(SchemaError::TypeMismatch {
                expected: Shape::Number,
                found: Shape::String
            })
        );
    }

    #[test]
    fn sequences_report_the_failing_index() {
        let err = Vec::<String>::decode(&json!(["a", "b", 3])).unwrap_err();
        assert_eq!(err.path(), "[2]");
        assert!(matches!(
            err.root_cause(),
            SchemaError::TypeMismatch {
                expected: Shape::String,
                found: Shape::Number
            }
        ));
    }

    #[test]
    fn option_collapses_null_and_absence() {
        assert_eq!(Option::<bool>::decode(&Value::Null), Ok(None));
        assert_eq!(Option::<bool>::decode(&json!(true)), Ok(Some(true)));
        assert!(Option::<bool>::None.is_absent());
    }

    #[test]
    fn non_finite_floats_do_not_survive_encoding() {
        let encoded = f64::NAN.encode();
        assert_eq!(encoded, Value::Null);
        assert!(f64::decode(&encoded).is_err());
    }

    #[test]
    fn malformed_text_is_a_syntax_error() {
        assert!(matches!(
            from_str::<String>("{not json"),
            Err(SchemaError::Syntax(_))
        ));
    }
}
