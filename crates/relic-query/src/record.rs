//! Traits for exposing records to the query engine.
//!
//! [`Record`] is the one seam between caller data and the engine: given a
//! field name it returns the field's [`Value`]. It is implemented here for
//! JSON documents and smart pointers, and can be derived with
//! `#[derive(Record)]` for plain structs.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use crate::value::{Number, Timestamp, Value};

/// Trait for types that can be filtered, sorted and paginated.
///
/// # Derive Usage
///
/// ```
/// use relic_query::Record;
///
/// #[derive(Record)]
/// struct Listing {
///     name: String,
///     price: u32,
///     #[record(skip)]
///     internal_id: u64,
/// }
///
/// let listing = Listing { name: "Forma".into(), price: 12, internal_id: 7 };
/// assert_eq!(listing.field(Listing::NAME).as_str(), Some("Forma"));
/// assert!(listing.field("internal_id").is_undefined());
/// ```
///
/// # Manual Implementation
///
/// ```
/// use relic_query::{Record, Value};
///
/// struct Listing {
///     name: String,
///     price: u32,
/// }
///
/// impl Record for Listing {
///     fn field(&self, name: &str) -> Value<'_> {
///         match name {
///             "name" => Value::from(self.name.as_str()),
///             "price" => Value::from(self.price),
///             _ => Value::Undefined,
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Returns the value of a top-level field, or [`Value::Undefined`] if the
    /// record has no such field.
    fn field(&self, name: &str) -> Value<'_>;
}

impl Record for serde_json::Value {
    fn field(&self, name: &str) -> Value<'_> {
        match self {
            serde_json::Value::Object(map) => map.field(name),
            _ => Value::Undefined,
        }
    }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn field(&self, name: &str) -> Value<'_> {
        self.get(name).map(Value::from).unwrap_or(Value::Undefined)
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn field(&self, name: &str) -> Value<'_> {
        (**self).field(name)
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn field(&self, name: &str) -> Value<'_> {
        (**self).field(name)
    }
}

impl<T: Record + ?Sized> Record for Rc<T> {
    fn field(&self, name: &str) -> Value<'_> {
        (**self).field(name)
    }
}

impl<T: Record + ?Sized> Record for Arc<T> {
    fn field(&self, name: &str) -> Value<'_> {
        (**self).field(name)
    }
}

/// Wraps a nested record so dotted paths can descend into it.
pub fn nested<R: Record>(record: &R) -> Value<'_> {
    Value::Record(record)
}

/// Wraps a collection of nested records as an array; dotted paths fan out
/// over its items.
pub fn nested_list<'a, R, I>(records: I) -> Value<'a>
where
    R: Record + 'a,
    I: IntoIterator<Item = &'a R>,
{
    Value::Array(
        records
            .into_iter()
            .map(|record| Value::Record(record))
            .collect(),
    )
}

/// Conversion from a struct field to a [`Value`].
///
/// Used by `#[derive(Record)]` for every field that is not marked `nested`.
pub trait ToValue {
    /// Returns this field's value, borrowing where possible.
    fn to_value(&self) -> Value<'_>;
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::String(Cow::Borrowed(self))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::String(Cow::Borrowed(self.as_str()))
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl ToValue for Number {
    fn to_value(&self) -> Value<'_> {
        Value::Number(*self)
    }
}

impl ToValue for Timestamp {
    fn to_value(&self) -> Value<'_> {
        Value::Date(Some(*self))
    }
}

impl<Tz: chrono::TimeZone> ToValue for chrono::DateTime<Tz> {
    fn to_value(&self) -> Value<'_> {
        Value::Date(Some(Timestamp(self.timestamp_millis())))
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value<'_> {
        Value::from(self)
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

macro_rules! to_value_number {
    ($($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

to_value_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);
