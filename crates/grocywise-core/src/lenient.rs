//! Tolerant `deserialize_with` helpers for model-generated JSON.
//!
//! The generation service is asked for a fixed structure but may drift on
//! field types: a price given as a number, a note given as `null`, a list
//! that is an object. These helpers coerce scalars to strings and drop
//! list entries that are not objects, so one malformed entry never discards
//! the whole report.

use std::fmt;
use std::marker::PhantomData;

use serde::de::value::MapAccessDeserializer;
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Other(IgnoredAny),
}

/// A record that only decodes from a JSON object. The derived struct
/// visitor also accepts a positional array, which would turn `[]` into an
/// all-default record.
struct Record<T>(T);

impl<'de, T> Deserialize<'de> for Record<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ObjectVisitor<T>(PhantomData<T>);

        impl<'de, T> Visitor<'de> for ObjectVisitor<T>
        where
            T: Deserialize<'de>,
        {
            type Value = T;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A>(self, map: A) -> Result<T, A::Error>
            where
                A: MapAccess<'de>,
            {
                T::deserialize(MapAccessDeserializer::new(map))
            }
        }

        deserializer
            .deserialize_map(ObjectVisitor(PhantomData))
            .map(Record)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeRecord<T> {
    Record(Record<T>),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeSeq<T> {
    Seq(Vec<MaybeRecord<T>>),
    Other(IgnoredAny),
}

impl<T> MaybeSeq<T> {
    fn into_records(self) -> Option<Vec<T>> {
        match self {
            MaybeSeq::Seq(items) => Some(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        MaybeRecord::Record(Record(value)) => Some(value),
                        MaybeRecord::Other(_) => None,
                    })
                    .collect(),
            ),
            MaybeSeq::Other(_) => None,
        }
    }
}

/// Strings pass through; numbers and booleans are stringified; anything
/// else (including `null`) becomes an empty string.
///
/// # Errors
///
/// Only propagates errors from the underlying deserializer.
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Str(s) => s,
        Scalar::Int(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Other(_) => String::new(),
    })
}

/// Booleans pass through; `"true"`/`"false"` strings are accepted; anything
/// else is `false`.
///
/// # Errors
///
/// Only propagates errors from the underlying deserializer.
pub fn bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Bool(b) => b,
        Scalar::Str(s) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    })
}

/// A list of records. Elements that are not JSON objects (scalars, `null`,
/// nested arrays) are dropped. A non-sequence value yields an empty vector.
///
/// # Errors
///
/// Only propagates errors from the underlying deserializer.
pub fn records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(MaybeSeq::<T>::deserialize(deserializer)?
        .into_records()
        .unwrap_or_default())
}

/// Like [`records`], but `null` or a non-sequence value yields `None`.
///
/// # Errors
///
/// Only propagates errors from the underlying deserializer.
pub fn opt_records<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(MaybeSeq::<T>::deserialize(deserializer)?.into_records())
}
