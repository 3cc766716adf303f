use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use fieldset_core::{CoreError, FlatParameters, ProgramId, SubmissionId};

use crate::collector::Collector;
use crate::config::CollectorConfig;
use crate::error::EngineError;
use crate::sink::ProgramSink;
use crate::template::RecordTemplate;

pub const EXERCISE_RECORD_TYPE: &str = "exercise";

const NAME_FIELD: &str = "name";
const DESCRIPTION_FIELD: &str = "description";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: Option<String>,
    pub sets: Option<u32>,
    pub reps: Option<u32>,
    pub weight: Option<f64>,
    pub notes: Option<String>,
}

/// A training program assembled from one form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: ProgramId,
    pub name: String,
    pub description: Option<String>,
    pub exercises: Vec<Exercise>,
}

impl Program {
    pub fn to_msgpack(&self) -> Result<Vec<u8>, CoreError> {
        rmp_serde::to_vec(self).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self, CoreError> {
        rmp_serde::from_slice(bytes).map_err(|e| CoreError::Serialization(e.to_string()))
    }
}

pub fn exercise_template() -> Result<RecordTemplate<Exercise>, CoreError> {
    Ok(RecordTemplate::new(EXERCISE_RECORD_TYPE)?
        .text("name", |e: &mut Exercise, v| e.name = Some(v))
        .parsed("sets", |e: &mut Exercise, v: u32| e.sets = Some(v))
        .parsed("reps", |e: &mut Exercise, v: u32| e.reps = Some(v))
        .parsed("weight", |e: &mut Exercise, v: f64| e.weight = Some(v))
        .text("notes", |e: &mut Exercise, v| e.notes = Some(v)))
}

/// Turns a program form submission (two top-level fields plus any number of
/// cloned exercise fieldsets) into a [`Program`].
pub struct ProgramForm {
    template: RecordTemplate<Exercise>,
    config: CollectorConfig,
}

impl ProgramForm {
    pub fn new(config: CollectorConfig) -> Result<Self, EngineError> {
        Ok(Self {
            template: exercise_template()?,
            config,
        })
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub fn parse(&self, params: &FlatParameters) -> Result<Program, EngineError> {
        let submission = SubmissionId::new();
        let name = params
            .first(NAME_FIELD)
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| EngineError::MissingField(NAME_FIELD.to_string()))?
            .to_string();
        let description = params
            .first(DESCRIPTION_FIELD)
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let collection = Collector::new(&self.template, self.config.clone()).collect(params);
        debug!(
            %submission,
            unmatched = ?collection.unmatched,
            "exercise fieldsets collected"
        );
        let exercises = collection.resolve(self.config.on_error)?;

        Ok(Program {
            id: ProgramId::new(),
            name,
            description,
            exercises,
        })
    }

    /// Parse and hand the program to `sink`. Nothing reaches the sink if parsing fails.
    pub fn submit<S: ProgramSink>(
        &self,
        params: &FlatParameters,
        sink: &mut S,
    ) -> Result<ProgramId, EngineError> {
        let program = self.parse(params)?;
        sink.save_program(&program)
            .map_err(|e| EngineError::Sink(Box::new(e)))?;
        info!(
            program = %program.id,
            exercises = program.exercises.len(),
            "program saved"
        );
        Ok(program.id)
    }
}
