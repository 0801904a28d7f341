//! # Records
//!
//! A record is a struct with a fixed set of fields known at definition time. Instead of
//! runtime reflection, each record carries a static table of [`FieldDescriptor`]s generated
//! once by the [`record!`](crate::record) macro. [`encode_record`] and [`decode_record`]
//! walk that table.
//!
//! ## Field syntax
//!
//! ```text
//! name: Type                  // wire name "name"
//! name: Type => "wire_name"   // renamed on the wire
//! name: Type => _             // opaque: kept in memory, never encoded or decoded
//! ```
//!
//! Fields whose type is optional ([`Maybe`](super::Maybe), `Option`) may be missing from the
//! wire object; every other field is required.
use super::{JsonCodec, SchemaError, Shape};
use serde_json::{Map, Value};

/// How a field takes part in encoding and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Must be present on the wire.
    Required,
    /// May be missing; omitted on encode while it holds the absent sentinel.
    Optional,
    /// Never encoded nor decoded.
    Opaque,
}

impl Presence {
    /// Derives the presence of a field from its type.
    pub const fn of<T: JsonCodec>() -> Presence {
        if T::OPTIONAL {
            Presence::Optional
        } else {
            Presence::Required
        }
    }
}

/// One entry of a record's field table.
pub struct FieldDescriptor<R> {
    /// The declared (Rust) field name.
    pub name: &'static str,
    /// The key used in the JSON object.
    pub wire_name: &'static str,
    pub presence: Presence,
    /// Returns `None` when the field must be omitted.
    pub encode: fn(&R) -> Option<Value>,
    /// Decodes the wire value into the field of an existing record.
    pub decode: fn(&mut R, &Value) -> Result<(), SchemaError>,
}

impl<R> std::fmt::Debug for FieldDescriptor<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("wire_name", &self.wire_name)
            .field("presence", &self.presence)
            .finish()
    }
}

/// A struct whose wire form is described by a static field table.
///
/// Implemented by the [`record!`](crate::record) macro; decoding starts from
/// `Default::default()` so that opaque and missing optional fields keep their sentinel.
pub trait Record: Default + 'static {
    /// The record's type name, used in error messages.
    const NAME: &'static str;

    fn fields() -> &'static [FieldDescriptor<Self>];
}

/// Encodes a record into a JSON object, following declaration order.
pub fn encode_record<R: Record>(record: &R) -> Value {
    let mut object = Map::new();

    for field in R::fields() {
        if field.presence == Presence::Opaque {
            continue;
        }

        if let Some(value) = (field.encode)(record) {
            object.insert(field.wire_name.to_string(), value);
        }
    }

    Value::Object(object)
}

/// Decodes a JSON object into a record. Unknown keys are ignored.
pub fn decode_record<R: Record>(value: &Value) -> Result<R, SchemaError> {
    let Value::Object(object) = value else {
        return Err(SchemaError::TypeMismatch {
            expected: Shape::Object,
            found: Shape::of(value),
        });
    };

    let mut record = R::default();

    for field in R::fields() {
        match (field.presence, object.get(field.wire_name)) {
            (Presence::Opaque, _) | (Presence::Optional, None) => {}
            (Presence::Required, None) => {
                return Err(SchemaError::MissingRequiredField {
                    record: R::NAME,
                    field: field.wire_name,
                });
            }
            (_, Some(wire_value)) => {
                (field.decode)(&mut record, wire_value).map_err(|source| {
                    SchemaError::InField {
                        record: R::NAME,
                        field: field.wire_name,
                        source: Box::new(source),
                    }
                })?;
            }
        }
    }

    Ok(record)
}

/// Encodes a field value, or `None` when it holds its type's absent sentinel.
#[doc(hidden)]
pub fn encode_field<T: JsonCodec>(value: &T) -> Option<Value> {
    if value.is_absent() {
        None
    } else {
        Some(value.encode())
    }
}

/// Declares a record type together with its field table and [`JsonCodec`](crate::codec::JsonCodec)
/// implementation.
///
/// The generated struct derives `Debug`, `Clone`, `Default` and `PartialEq`, so every field type
/// must implement them.
///
/// ```rust
/// use botwire_core::{codec::{self, Maybe}, record};
///
/// record! {
///     /// A point on a map.
///     pub struct Location {
///         pub longitude: f64,
///         pub latitude: f64,
///         pub accuracy: Maybe<f64> => "horizontal_accuracy",
///         pub cached_label: String => _,
///     }
/// }
///
/// let location = Location { longitude: 1.5, latitude: 2.5, ..Default::default() };
/// assert_eq!(codec::to_string(&location), r#"{"longitude":1.5,"latitude":2.5}"#);
/// ```
#[macro_export]
macro_rules! record {
    (@wire $field:ident) => { stringify!($field) };
    (@wire $field:ident _) => { stringify!($field) };
    (@wire $field:ident $wire:literal) => { $wire };

    (@presence $ty:ty, _) => { $crate::codec::Presence::Opaque };
    (@presence $ty:ty $(, $wire:literal)?) => { $crate::codec::Presence::of::<$ty>() };

    (@encode $name:ident, $field:ident, $ty:ty, _) => {
        |_: &$name| None
    };
    (@encode $name:ident, $field:ident, $ty:ty $(, $wire:literal)?) => {
        |record: &$name| $crate::codec::record::encode_field::<$ty>(&record.$field)
    };

    (@decode $name:ident, $field:ident, $ty:ty, _) => {
        |_: &mut $name, _: &$crate::__private::Value| Ok(())
    };
    (@decode $name:ident, $field:ident, $ty:ty $(, $wire:literal)?) => {
        |record: &mut $name, value: &$crate::__private::Value| {
            record.$field = <$ty as $crate::codec::JsonCodec>::decode(value)?;
            Ok(())
        }
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $wire:tt)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::codec::Record for $name {
            const NAME: &'static str = stringify!($name);

            fn fields() -> &'static [$crate::codec::FieldDescriptor<Self>] {
                static FIELDS: &[$crate::codec::FieldDescriptor<$name>] = &[
                    $(
                        $crate::codec::FieldDescriptor {
                            name: stringify!($field),
                            wire_name: $crate::record!(@wire $field $($wire)?),
                            presence: $crate::record!(@presence $ty $(, $wire)?),
                            encode: $crate::record!(@encode $name, $field, $ty $(, $wire)?),
                            decode: $crate::record!(@decode $name, $field, $ty $(, $wire)?),
                        },
                    )*
                ];
                FIELDS
            }
        }

        impl $crate::codec::JsonCodec for $name {
            const SHAPE: $crate::codec::Shape = $crate::codec::Shape::Object;

            fn encode(&self) -> $crate::__private::Value {
                $crate::codec::record::encode_record(self)
            }

            fn decode(
                value: &$crate::__private::Value,
            ) -> ::std::result::Result<Self, $crate::codec::SchemaError> {
                $crate::codec::record::decode_record(value)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::codec::{self, Maybe, Presence, Record, SchemaError, Shape};
    use serde_json::json;

    crate::record! {
        struct Sample {
            id: i64,
            note: Maybe<String> => "sample_note",
            scratch: u32 => _,
        }
    }

    #[test]
    fn descriptor_table_follows_declaration() {
        let fields = Sample::fields();
        let summary: Vec<_> = fields
            .iter()
            .map(|f| (f.name, f.wire_name, f.presence))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("id", "id", Presence::Required),
                ("note", "sample_note", Presence::Optional),
                ("scratch", "scratch", Presence::Opaque),
            ]
        );
    }

    #[test]
    fn opaque_fields_are_neither_encoded_nor_decoded() {
        let sample = Sample {
            id: 1,
            note: Maybe::Absent,
            scratch: 99,
        };
        assert_eq!(codec::to_value(&sample), json!({ "id": 1 }));

        let decoded: Sample = codec::from_value(&json!({ "id": 1, "scratch": 5 })).unwrap();
        assert_eq!(decoded.scratch, 0);
    }

    #[test]
    fn non_object_input_is_rejected() {
        assert_eq!(
            codec::from_value::<Sample>(&json!([1, 2])),
            Err(SchemaError::TypeMismatch {
                expected: Shape::Object,
                found: Shape::Array
            })
        );
    }
}
