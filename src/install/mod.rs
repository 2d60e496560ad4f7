// Install bootstrap — repo provisioning, service restart, journal verification.

pub mod installer;
pub mod journal;

pub use installer::run;
pub use journal::{APACHE_READY_SENTINEL, INSTALL_DONE_SENTINEL, WaitError};
