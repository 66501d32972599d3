//! Domain types and pure logic shared by the Stillwater crates.
//!
//! Nothing in this crate performs I/O.

pub mod date_key;
pub mod error;
pub mod habit;
pub mod mood;
pub mod progress;
pub mod types;
