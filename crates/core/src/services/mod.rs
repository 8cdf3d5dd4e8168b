//! Inspection services over a parsed [`crate::image::PeImage`].
//!
//! Each submodule is one independently-invocable operation; no service
//! depends on another service's output, and a failure in one never affects
//! the others.

pub mod disasm;
pub mod header;
pub mod sections;
pub mod symbols;

use thiserror::Error;

/// Terminal failures of the inspection services.
///
/// Each variant is terminal only for the single operation that produced it;
/// callers can continue invoking the other services on the same image.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InspectError {
    #[error("unsupported optional header variant (magic 0x{magic:04X})")]
    UnsupportedHeaderVariant { magic: u16 },
    #[error("section not found: {0}")]
    SectionNotFound(String),
    #[error("image has no import directory")]
    ImportTableUnavailable,
}
