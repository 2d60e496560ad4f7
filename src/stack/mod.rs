// Stack management — container specs and start/stop/pull sequencing.

pub mod commands;
pub mod orchestrator;

pub use commands::{APP_CONTAINER, CONTAINERS, DB_CONTAINER, DNS_CONTAINER, NODE_CONTAINER};
pub use orchestrator::{pull, start, stop};
