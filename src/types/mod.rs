use serde::{Deserialize, Deserializer};

pub mod author;
pub mod book;
pub mod comment;
pub mod genre;
pub mod id;
pub mod timestamp;

/// Deserializes `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
