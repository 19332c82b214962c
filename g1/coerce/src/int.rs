use std::any::{self, Any};
use std::borrow::Cow;
use std::fmt;
use std::num::ParseIntError;

use snafu::prelude::*;

use crate::error::{Error, NumberSnafu, ParseIntSnafu, UnsupportedSnafu};
use crate::value::{Shape, Value};

/// A signed integer type that values can be converted to.
///
/// Conversions are `as` casts: integers are truncated to the low bits of the target type, and
/// floats are rounded toward zero and saturated at the bounds of the target type.
pub trait Signed: Copy + fmt::Debug + fmt::Display + Any + private::Sealed {
    fn from_i128(value: i128) -> Self;

    fn from_f64(value: f64) -> Self;
}

mod private {
    pub trait Sealed {}
}

macro_rules! impl_signed {
    ($($type:ty),* $(,)?) => {
        $(
            impl private::Sealed for $type {}

            impl Signed for $type {
                fn from_i128(value: i128) -> Self {
                    value as Self
                }

                fn from_f64(value: f64) -> Self {
                    value as Self
                }
            }
        )*
    };
}

impl_signed!(i8, i16, i32, i64, i128, isize);

/// Converts a value of unknown type to `T`.
///
/// Pointer types (`Box`, `Rc`, `Arc`, `&'static`, and `Option`) are stripped away first.  Then:
///
/// * Integers and floats are cast to `T`, without range checks.
/// * Strings are parsed by [`parse`].
/// * `serde_json::Number` is parsed from its string form.
/// * `true` and `false` are converted to 1 and 0.
/// * `()` and `None` are converted to 0.
///
/// Anything else is an error.
pub fn int<T>(value: &dyn Value) -> Result<T, Error>
where
    T: Signed,
{
    match Shape::of(value) {
        Shape::Int(v) => Ok(T::from_i128(v as i128)),
        Shape::Signed(v) => Ok(T::from_i128(v)),
        Shape::Unsigned(v) => Ok(T::from_i128(v as i128)),
        Shape::F32(v) => Ok(T::from_f64(v.into())),
        Shape::F64(v) => Ok(T::from_f64(v)),
        Shape::Str(v, type_name) => parse_as(v, type_name),
        Shape::Number(v) => {
            parse_as(&v.to_string(), any::type_name::<serde_json::Number>()).context(NumberSnafu {
                number: v.to_string(),
            })
        }
        Shape::Bool(v) => Ok(T::from_i128(v.into())),
        Shape::Nil => Ok(T::from_i128(0)),
        Shape::Other(v) => {
            tracing::debug!(type_name = v.type_name(), "unsupported value");
            UnsupportedSnafu {
                value: format!("{v:?}"),
                type_name: v.type_name(),
                target: any::type_name::<T>(),
            }
            .fail()
        }
    }
}

/// Parses an integer literal and converts it to `T`.
///
/// The base is inferred from the prefix (`0x` for hex, `0o` or a leading `0` for octal, `0b` for
/// binary, and decimal otherwise), and `_` may separate digits.  The literal must fit in `i64`;
/// the result is then truncated to `T`.
pub fn parse<T>(value: &str) -> Result<T, Error>
where
    T: Signed,
{
    parse_as(value, any::type_name::<&str>())
}

fn parse_as<T>(value: &str, type_name: &'static str) -> Result<T, Error>
where
    T: Signed,
{
    parse_i64(value)
        .map(|v| T::from_i128(v.into()))
        .context(ParseIntSnafu {
            value: format!("{value:?}"),
            type_name,
            target: any::type_name::<T>(),
        })
}

fn parse_i64(value: &str) -> Result<i64, ParseIntError> {
    if value.is_empty() {
        return value.parse();
    }

    let (sign, unsigned) = match value.as_bytes()[0] {
        b'-' => ("-", &value[1..]),
        b'+' => ("+", &value[1..]),
        _ => ("+", value),
    };

    let prefix = unsigned.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits, has_prefix) = match prefix.as_deref() {
        Some("0x") => (16, &unsigned[2..], true),
        Some("0o") => (8, &unsigned[2..], true),
        Some("0b") => (2, &unsigned[2..], true),
        _ if unsigned.len() > 1 && unsigned.starts_with('0') => (8, unsigned, false),
        _ => (10, unsigned, false),
    };

    // Malformed underscores are left in place for `from_str_radix` to reject.
    let digits = if digits.contains('_') && is_underscore_ok(digits, has_prefix) {
        Cow::Owned(digits.replace('_', ""))
    } else {
        Cow::Borrowed(digits)
    };

    // We always spell out the sign so that a sign in `digits` (as in "0x-1") is rejected.
    i64::from_str_radix(&format!("{sign}{digits}"), radix)
}

/// Checks that every underscore is preceded by a digit (or the base prefix) and followed by one.
fn is_underscore_ok(digits: &str, has_prefix: bool) -> bool {
    let mut after_digit = has_prefix;
    for c in digits.chars() {
        if c == '_' {
            if !after_digit {
                return false;
            }
            after_digit = false;
        } else {
            after_digit = true;
        }
    }
    after_digit
}
