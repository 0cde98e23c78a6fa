//! Input and presentation helpers for the `itax` command-line tool:
//! profile files (CSV / TOML), Form 16 text extraction, report rendering
//! and logging setup.

pub mod form16;
pub mod logging;
pub mod profile_loader;
pub mod report;

pub use form16::{parse_form16_text, parse_form16_text_for_year};
pub use profile_loader::{ProfileLoadError, ProfileLoader};
