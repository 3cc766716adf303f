use std::collections::BTreeMap;

use fieldset_core::{CoreError, ProgramId};
use fieldset_engine::{Program, ProgramSink};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemorySinkError {
    #[error("simulated sink failure")]
    Simulated,

    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Keeps saved programs as MessagePack blobs keyed by id.
#[derive(Debug, Default)]
pub struct MemorySink {
    programs: BTreeMap<ProgramId, Vec<u8>>,
    fail_next: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `save_program` call fail.
    pub fn fail_next(&mut self) {
        self.fail_next = true;
    }

    pub fn load(&self, id: ProgramId) -> Result<Option<Program>, CoreError> {
        self.programs
            .get(&id)
            .map(|bytes| Program::from_msgpack(bytes))
            .transpose()
    }

    pub fn ids(&self) -> impl Iterator<Item = ProgramId> + '_ {
        self.programs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }
}

impl ProgramSink for MemorySink {
    type Error = MemorySinkError;

    fn save_program(&mut self, program: &Program) -> Result<(), Self::Error> {
        if std::mem::take(&mut self.fail_next) {
            return Err(MemorySinkError::Simulated);
        }
        let bytes = program.to_msgpack()?;
        self.programs.insert(program.id, bytes);
        Ok(())
    }
}
