pub mod error;
pub mod field_name;
pub mod field_value;
pub mod ids;
pub mod params;

pub use error::CoreError;
pub use field_name::{FieldName, NamePattern, format_field_name};
pub use field_value::{FieldKind, FieldValue};
pub use ids::*;
pub use params::FlatParameters;
