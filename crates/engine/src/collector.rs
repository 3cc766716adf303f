use std::collections::{BTreeMap, BTreeSet};

use fieldset_core::{FlatParameters, GroupIndex};
use tracing::{debug, warn};

use crate::config::{CollectorConfig, InputPolicy, RecordErrorMode};
use crate::error::{CollectError, EngineError};
use crate::template::RecordTemplate;

#[derive(Debug, Clone, PartialEq)]
pub struct GroupedRecord<R> {
    pub index: GroupIndex,
    pub record: R,
}

/// Everything one pass over a submission produced.
#[derive(Debug)]
pub struct Collection<R> {
    /// One entry per distinct group index, ascending.
    pub records: Vec<GroupedRecord<R>>,
    pub errors: Vec<CollectError>,
    /// Names the pattern did not claim, left for top-level fields.
    pub unmatched: Vec<String>,
}

impl<R> Collection<R> {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn record(&self, index: GroupIndex) -> Option<&R> {
        self.records
            .iter()
            .find(|g| g.index == index)
            .map(|g| &g.record)
    }

    pub fn into_records(self) -> Vec<GroupedRecord<R>> {
        self.records
    }

    /// All records, or every error if there was any.
    pub fn into_strict(self) -> Result<Vec<R>, EngineError> {
        if !self.errors.is_empty() {
            return Err(EngineError::Rejected {
                errors: self.errors,
            });
        }
        Ok(self.records.into_iter().map(|g| g.record).collect())
    }

    /// Records untouched by any error. Errors without a group index drop nothing.
    pub fn into_lenient(self) -> Vec<R> {
        let failed: BTreeSet<GroupIndex> =
            self.errors.iter().filter_map(CollectError::group_index).collect();
        self.records
            .into_iter()
            .filter(|g| !failed.contains(&g.index))
            .map(|g| g.record)
            .collect()
    }

    pub fn resolve(self, mode: RecordErrorMode) -> Result<Vec<R>, EngineError> {
        match mode {
            RecordErrorMode::FailSubmission => self.into_strict(),
            RecordErrorMode::DropRecord => {
                for error in &self.errors {
                    warn!(%error, "dropping record");
                }
                Ok(self.into_lenient())
            }
        }
    }
}

/// Rebuilds the records of one record type from a flat submission.
pub struct Collector<'t, R> {
    template: &'t RecordTemplate<R>,
    config: CollectorConfig,
}

impl<'t, R: Default> Collector<'t, R> {
    pub fn new(template: &'t RecordTemplate<R>, config: CollectorConfig) -> Self {
        Self { template, config }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Single pass over `params`. Records are keyed by the index in each name,
    /// never by the order names arrive in, and are created on the first name
    /// that mentions their index.
    pub fn collect(&self, params: &FlatParameters) -> Collection<R> {
        let record_type = self.template.record_type();
        let mut records: BTreeMap<GroupIndex, R> = BTreeMap::new();
        let mut errors = Vec::new();
        let mut unmatched = Vec::new();

        for (name, values) in params.iter() {
            let field = match self.template.pattern().decompose(name) {
                Ok(Some(field)) => field,
                Ok(None) => {
                    unmatched.push(name.to_string());
                    continue;
                }
                Err(_) => {
                    errors.push(CollectError::InvalidGroupIndex {
                        name: name.to_string(),
                    });
                    continue;
                }
            };

            let record = records.entry(field.index).or_default();

            let Some(value) = values.first() else {
                continue;
            };

            if !self.template.knows(&field.key) {
                self.on_policy(
                    self.config.unknown_fields,
                    CollectError::UnknownField {
                        index: field.index,
                        key: field.key,
                    },
                    &mut errors,
                );
                continue;
            }

            if values.len() > 1 {
                self.on_policy(
                    self.config.duplicate_values,
                    CollectError::DuplicateValues {
                        index: field.index,
                        key: field.key.clone(),
                        count: values.len(),
                    },
                    &mut errors,
                );
            }

            if self.config.skip_blank_values && value.trim().is_empty() {
                debug!(record_type, index = %field.index, key = %field.key, "skipping blank value");
                continue;
            }

            if let Some(Err(reason)) = self.template.apply(record, &field.key, value) {
                errors.push(CollectError::InvalidValue {
                    index: field.index,
                    key: field.key,
                    value: value.clone(),
                    reason,
                });
            }
        }

        for error in &errors {
            warn!(record_type, %error, "collect error");
        }
        debug!(
            record_type,
            records = records.len(),
            errors = errors.len(),
            unmatched = unmatched.len(),
            "collected grouped records"
        );

        Collection {
            records: records
                .into_iter()
                .map(|(index, record)| GroupedRecord { index, record })
                .collect(),
            errors,
            unmatched,
        }
    }

    fn on_policy(&self, policy: InputPolicy, issue: CollectError, errors: &mut Vec<CollectError>) {
        let record_type = self.template.record_type();
        match policy {
            InputPolicy::Ignore => debug!(record_type, %issue, "ignored"),
            InputPolicy::Warn => warn!(record_type, %issue, "ignored"),
            InputPolicy::Reject => errors.push(issue),
        }
    }
}
