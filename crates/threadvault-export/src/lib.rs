//! # threadvault Export
//!
//! Static site generation for hosting the bundled dataset without a server,
//! plus the display formatters the pages share.
//!
//! ```no_run
//! use threadvault_core::Dataset;
//! use threadvault_export::StaticSiteGenerator;
//!
//! # fn example() -> threadvault_core::Result<()> {
//! let dataset = Dataset::load("documents.json".as_ref())?;
//! let summary = StaticSiteGenerator::new(&dataset, "public").generate()?;
//! println!("{} files written", summary.files_written);
//! # Ok(())
//! # }
//! ```

pub mod formatters;
pub mod generator;
pub mod pages;

pub use formatters::{INVALID_DATE, format_date, format_display_name, format_text};
pub use generator::{ExportSummary, StaticSiteGenerator};
pub use pages::{render_document, render_index, render_tweet};
