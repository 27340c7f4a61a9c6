//! Script execution domain logic.
//!
//! Maps a caller-supplied logical name onto a file inside a fixed scripts
//! directory and runs it through an interpreter in a child process. All
//! subprocess management lives here so it can be tested without HTTP.

pub mod executor;
pub mod interpreter;
pub mod name;
pub mod runner;
pub mod subprocess;
