//! Scalar attribute values.

use std::fmt;
use std::str::FromStr;

/// A scalar stored in an attribute or used as text content.
///
/// Values keep their canonical string form, so a tree built from numbers and
/// booleans compares equal to the same tree parsed back from XML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Value(String);

impl Value {
    /// The value as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value is the empty string.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse the value into another type, as [`str::parse`] does.
    pub fn parse<T: FromStr>(&self) -> std::result::Result<T, T::Err> {
        self.0.parse()
    }

    /// Consume the value, returning the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Value {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value(value.clone())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value(value.to_owned())
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value(value.to_string())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value(if value { "true" } else { "false" }.to_owned())
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value(value.to_string())
                }
            }
        )*
    };
}

impl_from_display!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
