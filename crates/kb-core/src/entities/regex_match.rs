use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// One datapoint accepted by the backend's regex run.
///
/// `groups` maps capture-group names to captured text. The backend also
/// reports the full match under `_`. Optional groups that did not participate
/// in the match arrive as `null` and are dropped on decode.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RegexMatch {
    pub datapoint: String,
    #[serde(
        default,
        deserialize_with = "deserialize_groups",
        skip_serializing_if = "Option::is_none"
    )]
    pub groups: Option<BTreeMap<String, String>>,
}

impl RegexMatch {
    /// Captured text for a group name, if any.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&str> {
        self.groups.as_ref()?.get(name).map(String::as_str)
    }
}

fn deserialize_groups<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, Option<String>>> = Option::deserialize(deserializer)?;
    Ok(raw.map(|groups| {
        groups
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name, v)))
            .collect()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_groups_are_dropped() {
        let m: RegexMatch = serde_json::from_str(
            r#"{"datapoint":"temp_01","groups":{"unit":null,"num":"01","_":"temp_01"}}"#,
        )
        .unwrap();
        assert_eq!(m.group("num"), Some("01"));
        assert_eq!(m.group("unit"), None);
        assert_eq!(m.groups.as_ref().map(BTreeMap::len), Some(2));
    }

    #[test]
    fn groups_are_optional() {
        let m: RegexMatch = serde_json::from_str(r#"{"datapoint":"x"}"#).unwrap();
        assert!(m.groups.is_none());
        assert_eq!(serde_json::to_string(&m).unwrap(), r#"{"datapoint":"x"}"#);
    }
}
