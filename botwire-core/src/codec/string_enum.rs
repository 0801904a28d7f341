//! # String enums
//!
//! A closed set of named members, each mapped to an exact wire string. Decoding a string that
//! matches no member fails with [`SchemaError::UnknownEnumValue`](super::SchemaError).

/// Declares a string-valued enum.
///
/// The first member is the `Default`. Besides the [`JsonCodec`](crate::codec::JsonCodec)
/// implementation the macro generates `as_str`, `ALL`, `Display` and `FromStr`.
///
/// ```rust
/// use botwire_core::{codec, string_enum};
///
/// string_enum! {
///     pub enum Mode {
///         Plain = "",
///         Markdown = "Markdown",
///         Html = "HTML",
///     }
/// }
///
/// assert_eq!(codec::from_str::<Mode>(r#""HTML""#).unwrap(), Mode::Html);
/// assert_eq!("Markdown".parse::<Mode>().unwrap(), Mode::Markdown);
/// assert!(codec::from_str::<Mode>(r#""html""#).is_err());
/// ```
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident = $first_wire:literal
            $(
                ,
                $(#[$variant_meta:meta])*
                $variant:ident = $wire:literal
            )* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(#[$first_meta])*
            #[default]
            $first,
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$name::$first $(, $name::$variant)*];

            /// The exact wire string of this member.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $name::$first => $first_wire,
                    $(
                        $name::$variant => $wire,
                    )*
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::codec::SchemaError;

            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                $name::ALL
                    .iter()
                    .copied()
                    .find(|member| member.as_str() == value)
                    .ok_or_else(|| $crate::codec::SchemaError::UnknownEnumValue {
                        enum_name: stringify!($name),
                        value: value.to_string(),
                    })
            }
        }

        impl $crate::codec::JsonCodec for $name {
            const SHAPE: $crate::codec::Shape = $crate::codec::Shape::String;

            fn encode(&self) -> $crate::__private::Value {
                $crate::__private::Value::String(self.as_str().to_string())
            }

            fn decode(
                value: &$crate::__private::Value,
            ) -> ::std::result::Result<Self, $crate::codec::SchemaError> {
                match value {
                    $crate::__private::Value::String(wire) => wire.parse(),
                    other => Err($crate::codec::SchemaError::TypeMismatch {
                        expected: $crate::codec::Shape::String,
                        found: $crate::codec::Shape::of(other),
                    }),
                }
            }
        }
    };
}
