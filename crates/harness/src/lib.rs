pub mod form;
pub mod sink;

pub use form::FormBuilder;
pub use sink::{MemorySink, MemorySinkError};

/// Route `tracing` output through the test writer. Filtered by `RUST_LOG`.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
