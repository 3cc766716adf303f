use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use fieldset_core::{CoreError, FieldKind, FieldValue, NamePattern};

type FieldSetter<R> = Box<dyn Fn(&mut R, &str) -> Result<(), String> + Send + Sync>;

/// Maps each field key of a record type to the setter that applies it.
///
/// Setters are registered up front and the set is fixed once the template is
/// handed to a collector, so dispatch never depends on runtime name lookup
/// into the record itself.
pub struct RecordTemplate<R> {
    record_type: String,
    pattern: NamePattern,
    setters: BTreeMap<String, FieldSetter<R>>,
}

impl<R: 'static> RecordTemplate<R> {
    /// A template matching names of the form `<index>-<record_type>-<key>`.
    pub fn new(record_type: impl Into<String>) -> Result<Self, CoreError> {
        let record_type = record_type.into();
        let pattern = NamePattern::for_record_type(&record_type)?;
        Ok(Self {
            record_type,
            pattern,
            setters: BTreeMap::new(),
        })
    }

    /// Replace the naming convention.
    pub fn with_pattern(mut self, pattern: NamePattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Register a fallible setter. A later registration for the same key replaces the earlier one.
    pub fn with_setter<F>(mut self, key: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&mut R, &str) -> Result<(), String> + Send + Sync + 'static,
    {
        self.setters.insert(key.into(), Box::new(setter));
        self
    }

    /// Store the raw submitted text.
    pub fn text<F>(self, key: impl Into<String>, setter: F) -> Self
    where
        F: Fn(&mut R, String) + Send + Sync + 'static,
    {
        self.with_setter(key, move |record, raw| {
            setter(record, raw.to_string());
            Ok(())
        })
    }

    /// Parse the submitted text with `FromStr` before storing it.
    pub fn parsed<T, F>(self, key: impl Into<String>, setter: F) -> Self
    where
        T: FromStr + 'static,
        T::Err: fmt::Display,
        F: Fn(&mut R, T) + Send + Sync + 'static,
    {
        self.with_setter(key, move |record, raw| {
            let value = raw.trim().parse::<T>().map_err(|e| e.to_string())?;
            setter(record, value);
            Ok(())
        })
    }

    /// Parse the submitted text as a `FieldValue` of `kind`.
    pub fn value<F>(self, key: impl Into<String>, kind: FieldKind, setter: F) -> Self
    where
        F: Fn(&mut R, FieldValue) + Send + Sync + 'static,
    {
        self.with_setter(key, move |record, raw| {
            let value = FieldValue::parse(kind, raw).map_err(|e| e.to_string())?;
            setter(record, value);
            Ok(())
        })
    }
}

impl<R> RecordTemplate<R> {
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn pattern(&self) -> &NamePattern {
        &self.pattern
    }

    pub fn knows(&self, key: &str) -> bool {
        self.setters.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.setters.keys().map(String::as_str)
    }

    /// `None` when no setter is registered for `key`.
    pub fn apply(&self, record: &mut R, key: &str, value: &str) -> Option<Result<(), String>> {
        self.setters.get(key).map(|setter| setter(record, value))
    }
}

impl<R> fmt::Debug for RecordTemplate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordTemplate")
            .field("record_type", &self.record_type)
            .field("pattern", &self.pattern.as_str())
            .field("keys", &self.setters.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// A record whose fields are declared in configuration rather than code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicRecord {
    pub fields: BTreeMap<String, FieldValue>,
}

impl DynamicRecord {
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateSpec {
    pub record_type: String,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldKind>,
}

impl TemplateSpec {
    pub fn build(&self) -> Result<RecordTemplate<DynamicRecord>, CoreError> {
        let mut template = RecordTemplate::new(self.record_type.clone())?;
        for (key, kind) in &self.fields {
            let field = key.clone();
            template = template.value(key.clone(), *kind, move |record: &mut DynamicRecord, v| {
                record.fields.insert(field.clone(), v);
            });
        }
        Ok(template)
    }
}
