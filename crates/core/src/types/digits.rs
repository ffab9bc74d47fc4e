//! Digit-string types for identification and phone numbers.
//!
//! Use the `define_digits!` macro to create validated wrappers around
//! numeric strings. These values are identifiers, not quantities: leading
//! zeros are significant, so they are stored as text, never as integers.

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a digit-string type.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DigitStringError {
    /// The input is shorter than the minimum length.
    #[error("must have at least {min} digits")]
    TooShort {
        /// Minimum allowed length.
        min: usize,
    },
    /// The input is longer than the maximum length.
    #[error("must have at most {max} digits")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a non-digit character.
    #[error("may only contain digits")]
    NonDigit,
}

/// Macro to define a validated digit-string wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - a `parse()` constructor enforcing digits-only content and a length range
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Display`, `FromStr`, `AsRef<str>` implementations
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use botica_core::define_digits;
/// define_digits!(OrderNumber, 4, 12);
///
/// assert!(OrderNumber::parse("00123456").is_ok());
/// assert!(OrderNumber::parse("123").is_err());      // too short
/// assert!(OrderNumber::parse("12a4").is_err());     // non-digit
/// ```
#[macro_export]
macro_rules! define_digits {
    ($name:ident, $min:expr, $max:expr) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Minimum number of digits.
            pub const MIN_LENGTH: usize = $min;
            /// Maximum number of digits.
            pub const MAX_LENGTH: usize = $max;

            /// Parse the value from a string.
            ///
            /// # Errors
            ///
            /// Returns [`DigitStringError`] if the input contains a
            /// non-digit character or falls outside the length range.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::types::digits::DigitStringError> {
                if !s.chars().all(|c| c.is_ascii_digit()) {
                    return Err($crate::types::digits::DigitStringError::NonDigit);
                }
                if s.len() < Self::MIN_LENGTH {
                    return Err($crate::types::digits::DigitStringError::TooShort {
                        min: Self::MIN_LENGTH,
                    });
                }
                if s.len() > Self::MAX_LENGTH {
                    return Err($crate::types::digits::DigitStringError::TooLong {
                        max: Self::MAX_LENGTH,
                    });
                }
                Ok(Self(s.to_owned()))
            }

            /// Returns the value as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the value and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::types::digits::DigitStringError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <String as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <String as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let s = <String as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                // Database values are assumed valid
                Ok(Self(s))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <String as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

// National identification numbers vary between 7 and 20 digits.
define_digits!(IdentificationNumber, 7, 20);
// Mobile numbers including country prefixes.
define_digits!(PhoneNumber, 10, 20);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_identification_number_valid() {
        assert!(IdentificationNumber::parse("1234567").is_ok());
        assert!(IdentificationNumber::parse("00999888777").is_ok());
        assert!(IdentificationNumber::parse(&"9".repeat(20)).is_ok());
    }

    #[test]
    fn test_identification_number_too_short() {
        assert!(matches!(
            IdentificationNumber::parse("123456"),
            Err(DigitStringError::TooShort { min: 7 })
        ));
    }

    #[test]
    fn test_identification_number_too_long() {
        assert!(matches!(
            IdentificationNumber::parse(&"9".repeat(21)),
            Err(DigitStringError::TooLong { max: 20 })
        ));
    }

    #[test]
    fn test_identification_number_non_digit() {
        assert!(matches!(
            IdentificationNumber::parse("12345a7"),
            Err(DigitStringError::NonDigit)
        ));
        assert!(matches!(
            IdentificationNumber::parse("1234 567"),
            Err(DigitStringError::NonDigit)
        ));
    }

    #[test]
    fn test_phone_number_lengths() {
        assert!(PhoneNumber::parse("3001234567").is_ok());
        assert!(matches!(
            PhoneNumber::parse("300123456"),
            Err(DigitStringError::TooShort { min: 10 })
        ));
        assert!(matches!(
            PhoneNumber::parse(&"3".repeat(21)),
            Err(DigitStringError::TooLong { max: 20 })
        ));
    }

    #[test]
    fn test_leading_zeros_preserved() {
        let id = IdentificationNumber::parse("0012345").unwrap();
        assert_eq!(id.as_str(), "0012345");
    }

    #[test]
    fn test_serde_roundtrip() {
        let phone = PhoneNumber::parse("3001234567").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"3001234567\"");

        let parsed: PhoneNumber = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, phone);
    }
}
