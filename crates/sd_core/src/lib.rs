//! sd_core — Core report model, palette, and numeric helpers.
//!
//! This crate is **I/O-free**. It defines the stable types shared across the
//! engine (`sd_charts`, `sd_pdf`, `sd_cli`):
//!
//! - `ReportRequest` and the detail-row column contract
//! - Distribution entries and their count parsing
//! - The fixed chart palette and deterministic palette-cycling assignment
//! - Integer-first percentage helpers (tenths of a percent, no float
//!   accumulation)
//! - Display-label truncation
//!
//! Everything here is deterministic: same input order, same output, across
//! runs and platforms.

#![forbid(unsafe_code)]

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain parsing.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub enum CoreError {
        /// Not one of the known report variants.
        UnknownVariant,
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::UnknownVariant => write!(f, "unknown report variant"),
            }
        }
    }

    impl std::error::Error for CoreError {}
}

pub mod palette;
pub mod percent;
pub mod request;
pub mod text;

pub use palette::{color_at, PaletteCycle, Rgb, PALETTE};
pub use percent::{format_percent_tenths, percent_tenths, visual_proxy_tenths};
pub use request::{DetailRow, DetailTable, DistributionEntry, ReportRequest, ReportVariant};
pub use text::truncate_label;
