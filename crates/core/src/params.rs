use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A form submission: each name carries one or more text values.
///
/// Names are kept sorted. Nothing downstream may rely on the order in which
/// the browser sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatParameters {
    values: BTreeMap<String, Vec<String>>,
}

impl FlatParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw `(name, value)` pairs. A repeated name accumulates its
    /// values in the order given.
    pub fn from_pairs<N, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let mut params = Self::new();
        for (name, value) in pairs {
            params.push(name, value);
        }
        params
    }

    /// Build from an already-grouped map. Names with no values are dropped.
    pub fn from_map(map: BTreeMap<String, Vec<String>>) -> Self {
        let values = map.into_iter().filter(|(_, v)| !v.is_empty()).collect();
        Self { values }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.entry(name.into()).or_default().push(value.into());
    }

    pub fn first(&self, name: &str) -> Option<&str> {
        self.values.get(name).and_then(|v| v.first()).map(String::as_str)
    }

    pub fn values(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}
