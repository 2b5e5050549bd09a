//! # Robot state float representation
//!
//! Serde helpers for the `f64` fields of [`super::RobotState`]. Finite values are written as
//! numbers. NaN and the infinities are written as the strings `"NaN"`, `"inf"` and `"-inf"`,
//! the same tokens used by the text representation, so they survive formats such as JSON which
//! have no non-finite numbers.
//!
//! Use `#[serde(with = "float_repr")]` for scalars and `#[serde(with = "float_repr::array")]`
//! for fixed-size arrays.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{
    de::{self, Visitor},
    Deserializer, Serializer,
};
use std::fmt;

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

const NAN_TOKEN: &str = "NaN";
const INF_TOKEN: &str = "inf";
const NEG_INF_TOKEN: &str = "-inf";

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match non_finite_token(*value) {
        Some(token) => serializer.serialize_str(token),
        None => serializer.serialize_f64(*value),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(FloatVisitor)
}

// ------------------------------------------------------------------------------------------------
// ARRAYS
// ------------------------------------------------------------------------------------------------

/// Helpers for `[f64; N]` fields.
pub mod array {
    use super::*;
    use serde::{
        de::SeqAccess,
        ser::SerializeTuple,
        Deserialize, Serialize,
    };
    use std::marker::PhantomData;

    /// Wrapper so each element goes through the scalar representation.
    struct Element(f64);

    impl Serialize for Element {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            super::serialize(&self.0, serializer)
        }
    }

    impl<'de> Deserialize<'de> for Element {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            super::deserialize(deserializer).map(Element)
        }
    }

    pub fn serialize<S, const N: usize>(values: &[f64; N], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut tuple = serializer.serialize_tuple(N)?;
        for v in values.iter() {
            tuple.serialize_element(&Element(*v))?;
        }
        tuple.end()
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[f64; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_tuple(N, ArrayVisitor::<N>(PhantomData))
    }

    struct ArrayVisitor<const N: usize>(PhantomData<[f64; N]>);

    impl<'de, const N: usize> Visitor<'de> for ArrayVisitor<N> {
        type Value = [f64; N];

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "an array of {} numbers", N)
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut values = [0.0; N];

            for (i, v) in values.iter_mut().enumerate() {
                *v = match seq.next_element::<Element>()? {
                    Some(e) => e.0,
                    None => return Err(de::Error::invalid_length(i, &self)),
                };
            }

            // Reject arrays which are too long
            if seq.next_element::<de::IgnoredAny>()?.is_some() {
                return Err(de::Error::invalid_length(N + 1, &self));
            }

            Ok(values)
        }
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE
// ------------------------------------------------------------------------------------------------

fn non_finite_token(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some(NAN_TOKEN)
    } else if value == std::f64::INFINITY {
        Some(INF_TOKEN)
    } else if value == std::f64::NEG_INFINITY {
        Some(NEG_INF_TOKEN)
    } else {
        None
    }
}

struct FloatVisitor;

impl<'de> Visitor<'de> for FloatVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "a number or one of \"NaN\", \"inf\", \"-inf\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        match v {
            NAN_TOKEN => Ok(std::f64::NAN),
            INF_TOKEN => Ok(std::f64::INFINITY),
            NEG_INF_TOKEN => Ok(std::f64::NEG_INFINITY),
            _ => Err(de::Error::invalid_value(de::Unexpected::Str(v), &self)),
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, Debug)]
    struct Sample {
        #[serde(with = "crate::robot_state::float_repr")]
        scalar: f64,

        #[serde(with = "crate::robot_state::float_repr::array")]
        values: [f64; 4],
    }

    #[test]
    fn test_non_finite_tokens() {
        let sample = Sample {
            scalar: std::f64::NAN,
            values: [1.5, std::f64::INFINITY, std::f64::NEG_INFINITY, 0.25],
        };

        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(json, r#"{"scalar":"NaN","values":[1.5,"inf","-inf",0.25]}"#);

        let back: Sample = serde_json::from_str(&json).unwrap();
        assert!(back.scalar.is_nan());
        assert_eq!(back.values[0], 1.5);
        assert_eq!(back.values[1], std::f64::INFINITY);
        assert_eq!(back.values[2], std::f64::NEG_INFINITY);
        assert_eq!(back.values[3], 0.25);
    }

    #[test]
    fn test_integers_accepted() {
        let back: Sample = serde_json::from_str(r#"{"scalar":3,"values":[0,-1,2,4]}"#).unwrap();

        assert_eq!(back.scalar, 3.0);
        assert_eq!(back.values, [0.0, -1.0, 2.0, 4.0]);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(serde_json::from_str::<Sample>(r#"{"scalar":"nan","values":[0,0,0,0]}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"scalar":null,"values":[0,0,0,0]}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"scalar":0,"values":[0,0,0]}"#).is_err());
        assert!(serde_json::from_str::<Sample>(r#"{"scalar":0,"values":[0,0,0,0,0]}"#).is_err());
    }
}
