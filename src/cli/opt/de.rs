use serde::{Deserialize, Deserializer};

/// Read an optional field from its bare value, so a config file can say
/// `delim: " "` instead of `delim: Some(" ")`.
pub(super) fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
