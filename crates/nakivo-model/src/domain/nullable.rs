use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default value.
///
/// The Director omits or nulls counters for jobs that never ran.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
