//! # Tagged unions
//!
//! A union holds exactly one of N candidate types, or nothing. It is wire-transparent: the held
//! candidate is encoded exactly as if it had been encoded directly, and no wrapper or tag is
//! ever emitted. An empty union encodes to `{}`.
//!
//! ## Decoding
//!
//! Without a tag, the decoder can only dispatch on the shape of the incoming JSON:
//!
//! * `null` decodes to the empty union.
//! * An object decodes to the single candidate able to accept an object: a record, a raw
//!   [`Value`], or a nested union with such a candidate. When two or more candidates accept
//!   objects the union cannot be resolved from the JSON alone, and decoding fails with
//!   [`SchemaError::AmbiguousUnion`] instead of guessing.
//! * Any other value decodes to the first candidate with the same shape, falling back to the
//!   first candidate of [`Shape::Any`].
//! * A value matching no candidate decodes to the empty union.
use super::{SchemaError, Shape};
use serde_json::{Map, Value};

/// A union member as seen by [`dispatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub name: &'static str,
    pub shape: Shape,
    pub accepts_object: bool,
}

/// Resolves which candidate of a union should decode `value`.
///
/// Returns the index of the chosen candidate, or `None` for the empty union.
#[doc(hidden)]
pub fn dispatch(
    union: &'static str,
    candidates: &[Candidate],
    value: &Value,
) -> Result<Option<usize>, SchemaError> {
    let found = Shape::of(value);

    match found {
        Shape::Null => Ok(None),
        Shape::Object => {
            let objects: Vec<usize> = candidates
                .iter()
                .enumerate()
                .filter(|(_, candidate)| candidate.accepts_object)
                .map(|(index, _)| index)
                .collect();

            if objects.len() > 1 {
                return Err(SchemaError::AmbiguousUnion {
                    union,
                    candidates: objects.iter().map(|&i| candidates[i].name).collect(),
                });
            }

            Ok(objects.first().copied())
        }
        _ => Ok(candidates
            .iter()
            .position(|candidate| candidate.shape == found)
            .or_else(|| {
                candidates
                    .iter()
                    .position(|candidate| candidate.shape == Shape::Any)
            })),
    }
}

#[doc(hidden)]
pub fn encode_empty() -> Value {
    Value::Object(Map::new())
}

/// Declares a wire-transparent tagged union.
///
/// The generated enum has one variant per candidate plus `Empty`, its default. A `From`
/// conversion is generated for each candidate type, so candidate types must be distinct.
///
/// ```rust
/// use botwire_core::{codec, one_of};
///
/// one_of! {
///     /// A chat reference: numeric id or `@username`.
///     pub enum Target {
///         Id(i64),
///         Username(String),
///     }
/// }
///
/// assert_eq!(codec::to_string(&Target::from(42_i64)), "42");
/// assert_eq!(codec::from_str::<Target>(r#""@news""#).unwrap(), Target::Username("@news".into()));
/// assert_eq!(codec::from_str::<Target>("true").unwrap(), Target::Empty);
/// ```
#[macro_export]
macro_rules! one_of {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident($ty:ty)
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq)]
        $vis enum $name {
            /// No candidate is held.
            #[default]
            Empty,
            $(
                $(#[$variant_meta])*
                $variant($ty),
            )+
        }

        impl $name {
            /// The candidates in declaration order.
            pub const CANDIDATES: &'static [$crate::codec::one_of::Candidate] = &[
                $(
                    $crate::codec::one_of::Candidate {
                        name: stringify!($variant),
                        shape: <$ty as $crate::codec::JsonCodec>::SHAPE,
                        accepts_object: <$ty as $crate::codec::JsonCodec>::ACCEPTS_OBJECT,
                    },
                )+
            ];

            pub fn is_empty(&self) -> bool {
                matches!(self, $name::Empty)
            }
        }

        $(
            impl ::std::convert::From<$ty> for $name {
                fn from(value: $ty) -> Self {
                    $name::$variant(value)
                }
            }
        )+

        impl $crate::codec::JsonCodec for $name {
            const SHAPE: $crate::codec::Shape = $crate::codec::Shape::Any;
            const ACCEPTS_OBJECT: bool =
                false $(|| <$ty as $crate::codec::JsonCodec>::ACCEPTS_OBJECT)+;

            fn encode(&self) -> $crate::__private::Value {
                match self {
                    $name::Empty => $crate::codec::one_of::encode_empty(),
                    $(
                        $name::$variant(inner) => $crate::codec::JsonCodec::encode(inner),
                    )+
                }
            }

            fn decode(
                value: &$crate::__private::Value,
            ) -> ::std::result::Result<Self, $crate::codec::SchemaError> {
                let decoders: &[fn(
                    &$crate::__private::Value,
                ) -> ::std::result::Result<$name, $crate::codec::SchemaError>] = &[
                    $(
                        |value: &$crate::__private::Value| {
                            <$ty as $crate::codec::JsonCodec>::decode(value).map($name::$variant)
                        },
                    )+
                ];

                match $crate::codec::one_of::dispatch(stringify!($name), Self::CANDIDATES, value)? {
                    Some(index) => decoders[index](value),
                    None => Ok($name::Empty),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const fn candidate(name: &'static str, shape: Shape) -> Candidate {
        Candidate {
            name,
            shape,
            accepts_object: matches!(shape, Shape::Object | Shape::Any),
        }
    }

    const MIXED: &[Candidate] = &[
        candidate("Text", Shape::String),
        candidate("Flag", Shape::Boolean),
        candidate("Body", Shape::Object),
    ];

    #[test]
    fn dispatches_on_shape() {
        assert_eq!(dispatch("Mixed", MIXED, &json!("hi")), Ok(Some(0)));
        assert_eq!(dispatch("Mixed", MIXED, &json!(false)), Ok(Some(1)));
        assert_eq!(dispatch("Mixed", MIXED, &json!({ "a": 1 })), Ok(Some(2)));
        assert_eq!(dispatch("Mixed", MIXED, &json!(3)), Ok(None));
        assert_eq!(dispatch("Mixed", MIXED, &Value::Null), Ok(None));
    }

    #[test]
    fn two_object_candidates_are_ambiguous() {
        let candidates = &[
            candidate("Left", Shape::Object),
            candidate("Right", Shape::Object),
        ];

        assert_eq!(
            dispatch("Pair", candidates, &json!({})),
            Err(SchemaError::AmbiguousUnion {
                union: "Pair",
                candidates: vec!["Left", "Right"],
            })
        );
        // Primitives never reach the ambiguous candidates.
        assert_eq!(dispatch("Pair", candidates, &json!(1)), Ok(None));
    }

    #[test]
    fn raw_values_compete_for_objects() {
        let candidates = &[
            candidate("Body", Shape::Object),
            candidate("Raw", Shape::Any),
        ];

        assert!(matches!(
            dispatch("Loose", candidates, &json!({ "a": 1 })),
            Err(SchemaError::AmbiguousUnion { .. })
        ));
    }

    #[test]
    fn any_candidate_is_the_fallback() {
        let candidates = &[
            candidate("Count", Shape::Number),
            candidate("Raw", Shape::Any),
        ];

        assert_eq!(dispatch("Loose", candidates, &json!(1)), Ok(Some(0)));
        assert_eq!(dispatch("Loose", candidates, &json!([1])), Ok(Some(1)));
        assert_eq!(dispatch("Loose", candidates, &json!({})), Ok(Some(1)));
    }
}
