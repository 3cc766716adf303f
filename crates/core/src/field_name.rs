use regex::Regex;

use crate::error::CoreError;
use crate::ids::GroupIndex;

const INDEX_GROUP: &str = "index";
const KEY_GROUP: &str = "key";

/// A grouped input name split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldName {
    pub index: GroupIndex,
    pub key: String,
}

/// Decides which submitted names belong to a record type and splits them
/// into `(index, key)`.
#[derive(Debug, Clone)]
pub struct NamePattern {
    regex: Regex,
}

impl NamePattern {
    /// The `<index>-<record_type>-<key>` convention.
    pub fn for_record_type(record_type: &str) -> Result<Self, CoreError> {
        let source = format!(
            r"^(?P<{INDEX_GROUP}>[0-9]+)-{}-(?P<{KEY_GROUP}>.+)$",
            regex::escape(record_type)
        );
        let regex = Regex::new(&source).map_err(|e| CoreError::InvalidPattern(e.to_string()))?;
        Ok(Self { regex })
    }

    /// Use a custom pattern. It must define the named captures `index` and `key`.
    pub fn from_regex(regex: Regex) -> Result<Self, CoreError> {
        for required in [INDEX_GROUP, KEY_GROUP] {
            if !regex.capture_names().flatten().any(|n| n == required) {
                return Err(CoreError::InvalidPattern(format!(
                    "{} is missing capture group `{required}`",
                    regex.as_str()
                )));
            }
        }
        Ok(Self { regex })
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }

    /// `Ok(None)` when the name is not grouped under this pattern.
    pub fn decompose(&self, name: &str) -> Result<Option<FieldName>, CoreError> {
        let Some(caps) = self.regex.captures(name) else {
            return Ok(None);
        };
        let (Some(index), Some(key)) = (caps.name(INDEX_GROUP), caps.name(KEY_GROUP)) else {
            return Ok(None);
        };
        let index = index
            .as_str()
            .parse::<GroupIndex>()
            .map_err(|_| CoreError::InvalidGroupIndex(name.to_string()))?;
        Ok(Some(FieldName {
            index,
            key: key.as_str().to_string(),
        }))
    }
}

pub fn format_field_name(index: GroupIndex, record_type: &str, key: &str) -> String {
    format!("{index}-{record_type}-{key}")
}
