//! Lookup engine for a static table of laboratory test codes (LOINC).
//!
//! The [`data`] module is the whole engine: load a reference table once,
//! then run stable filters over it.  The desktop viewer in `main.rs` is a
//! thin presentation layer on top.

pub mod config;
pub mod data;
