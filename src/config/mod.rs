// Configuration — value object, defaults, key=value file loading.

pub mod loader;
pub mod types;

pub use types::Config;
