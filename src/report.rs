//! Terminal reporting — colored, prefixed, single-line messages.
//!
//! Info and warnings go to stdout, errors to stderr, so output stays
//! usable when piped.

use std::fmt::Display;

use owo_colors::OwoColorize;

pub fn info(msg: impl Display) {
    println!("{} {}", "[INFO]".green(), msg);
}

pub fn warn(msg: impl Display) {
    println!("{} {}", "[WARN]".yellow(), msg);
}

pub fn error(msg: impl Display) {
    eprintln!("{} {}", "[ERROR]".red(), msg);
}
