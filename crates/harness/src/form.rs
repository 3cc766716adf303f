use fieldset_core::{FlatParameters, GroupIndex, format_field_name};

/// Builds submissions the way the browser side produces them: each cloned
/// fieldset takes the next value of a counter that never goes backwards, so
/// removing a fieldset leaves a gap rather than renumbering.
#[derive(Debug, Clone)]
pub struct FormBuilder {
    record_type: String,
    next_index: u32,
    fields: Vec<(String, String)>,
}

impl FormBuilder {
    pub fn new(record_type: impl Into<String>) -> Self {
        Self {
            record_type: record_type.into(),
            next_index: 0,
            fields: Vec::new(),
        }
    }

    pub fn add_fieldset(&mut self) -> GroupIndex {
        let index = GroupIndex::new(self.next_index);
        self.next_index += 1;
        index
    }

    /// Drop every input of the fieldset at `index`.
    pub fn remove_fieldset(&mut self, index: GroupIndex) {
        let prefix = format!("{index}-{}-", self.record_type);
        self.fields.retain(|(name, _)| !name.starts_with(&prefix));
    }

    /// Set a grouped input, replacing any earlier value under the same name.
    pub fn set(&mut self, index: GroupIndex, key: &str, value: impl Into<String>) -> &mut Self {
        let name = format_field_name(index, &self.record_type, key);
        self.fields.retain(|(n, _)| *n != name);
        self.fields.push((name, value.into()));
        self
    }

    /// Add another value under a grouped name, as a duplicated input would.
    pub fn push(&mut self, index: GroupIndex, key: &str, value: impl Into<String>) -> &mut Self {
        let name = format_field_name(index, &self.record_type, key);
        self.fields.push((name, value.into()));
        self
    }

    pub fn top_level(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.fields.retain(|(n, _)| n != name);
        self.fields.push((name.to_string(), value.into()));
        self
    }

    pub fn build(&self) -> FlatParameters {
        FlatParameters::from_pairs(self.fields.iter().cloned())
    }
}
