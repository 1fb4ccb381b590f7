//! Terminal output.
//!
//! - [`summary`] - provisioned resources after a run
//! - [`terminal`] - field formatting

mod summary;
mod terminal;

pub use summary::{print_summary, summary_rows};
pub use terminal::format_field;
