//! sd_pdf — paginated PDF report composer.
//!
//! The crate splits the work the way the rest of the engine does: build a
//! pure, inspectable model first (`section`, `table`), then paint it
//! (`compose`). Tests exercise section ordering, column contracts, and
//! striping without touching a PDF backend; only the composer knows about
//! pages, cursors, and fonts.
//!
//! Failure taxonomy:
//! - chart rendering problems are absorbed here (fallback block, see
//!   `compose`), never surfaced to the caller;
//! - font registration and document serialization problems are fatal for
//!   the whole request and return [`DocError`]. No partial bytes.

#![forbid(unsafe_code)]

use thiserror::Error;

pub mod compose;
pub mod section;
pub mod style;
pub mod table;

pub use compose::{generate_report, DocumentComposer};
pub use section::{sections_for, Section};
pub use table::{TableBlock, TableKind};

/// Fatal, whole-request failures of the document layer.
#[derive(Debug, Error)]
pub enum DocError {
    #[error("font registration failed: {0}")]
    Font(String),

    #[error("image embedding failed: {0}")]
    Image(String),

    #[error("document serialization failed: {0}")]
    Write(String),
}
