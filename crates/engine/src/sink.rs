use crate::program::Program;

/// Where an assembled program goes once a submission has been accepted.
pub trait ProgramSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn save_program(&mut self, program: &Program) -> Result<(), Self::Error>;
}
