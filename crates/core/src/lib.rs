//! pescope-core
//!
//! Core library for PE (Portable Executable) inspection.
//!
//! This crate defines the image model, the goblin-backed loader that
//! materializes it, and the inspection services: optional-header resolution,
//! section catalog, symbol extraction, and linear-sweep disassembly.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, scripting bindings, etc.). Every
//! service is a pure function over an already-parsed [`image::PeImage`]; the
//! core performs no I/O and no output formatting of its own.

pub mod image;
pub mod model;
pub mod services;

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
