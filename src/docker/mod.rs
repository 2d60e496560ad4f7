// Docker client — typed thin wrapper over the `docker` CLI.

pub mod engine;
pub mod types;

pub use engine::{CliRuntime, ensure_available};
pub use types::{ContainerRuntime, RunSpec};
