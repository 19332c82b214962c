//! `deserialize_with` helpers that coerce scalars into signed integers.
//!
//! ```
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Config {
//!     #[serde(deserialize_with = "g1_coerce::de::int")]
//!     mask: i32,
//! }
//!
//! let config: Config = serde_json::from_str(r#"{"mask": "0xff"}"#).unwrap();
//! assert_eq!(config.mask, 255);
//! ```

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserializer, Visitor};

use crate::error::Error;
use crate::int::{self as to_int, Signed};
use crate::value::Value;

pub fn int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Signed,
{
    deserializer.deserialize_any(IntVisitor(PhantomData))
}

/// Same as [`int`], except that absent values are `None` rather than 0.
pub fn opt_int<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Signed,
{
    deserializer.deserialize_option(OptIntVisitor(PhantomData))
}

struct IntVisitor<T>(PhantomData<T>);

struct OptIntVisitor<T>(PhantomData<T>);

fn convert<T, E>(value: &dyn Value) -> Result<T, E>
where
    T: Signed,
    E: de::Error,
{
    to_int::int(value).map_err(custom)
}

fn custom<E>(error: Error) -> E
where
    E: de::Error,
{
    E::custom(error)
}

macro_rules! visit {
    ($($func:ident($type:ty)),* $(,)?) => {
        $(
            fn $func<E>(self, value: $type) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                convert(&value)
            }
        )*
    };
}

impl<'de, T> Visitor<'de> for IntVisitor<T>
where
    T: Signed,
{
    type Value = T;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an integer, a float, an integer string, a boolean, or null")
    }

    visit!(
        visit_bool(bool),
        visit_i8(i8),
        visit_i16(i16),
        visit_i32(i32),
        visit_i64(i64),
        visit_i128(i128),
        visit_u8(u8),
        visit_u16(u16),
        visit_u32(u32),
        visit_u64(u64),
        visit_u128(u128),
        visit_f32(f32),
        visit_f64(f64),
    );

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        to_int::parse(value).map_err(custom)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        convert(&())
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        self.visit_unit()
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de, T> Visitor<'de> for OptIntVisitor<T>
where
    T: Signed,
{
    type Value = Option<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an optional integer")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_none<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        int(deserializer).map(Some)
    }
}
