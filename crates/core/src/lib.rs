pub mod config;
pub mod discovery;
pub mod error;
pub mod loader;
pub mod logging;

pub use error::{CoreError, Result};
pub use loader::{load_directory, load_symbol_graphs};

pub use symgraph_api as api;
pub use symgraph_ingest as ingest;
