pub mod collector;
pub mod config;
pub mod error;
pub mod program;
pub mod sink;
pub mod template;

pub use collector::{Collection, Collector, GroupedRecord};
pub use config::{CollectorConfig, FormConfig, InputPolicy, RecordErrorMode};
pub use error::{CollectError, EngineError};
pub use program::{EXERCISE_RECORD_TYPE, Exercise, Program, ProgramForm, exercise_template};
pub use sink::ProgramSink;
pub use template::{DynamicRecord, RecordTemplate, TemplateSpec};
