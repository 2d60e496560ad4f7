pub mod cli;
pub mod config;
pub mod docker;
pub mod install;
pub mod report;
pub mod secrets;
pub mod stack;
