//! Helpers shared by the partial-update ("patch") types.

use serde::{Deserialize, Deserializer};

/// Marks a field that appeared in the input, even as `null`.
///
/// Used with `#[serde(default, deserialize_with = "present")]` on
/// `Option<Option<T>>` fields: absent stays `None`, `null` becomes
/// `Some(None)`.
pub(crate) fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The patched value if present, the current one otherwise.
pub(crate) fn pick<T: Clone>(patch: &Option<T>, current: &T) -> T {
    patch.as_ref().unwrap_or(current).clone()
}
