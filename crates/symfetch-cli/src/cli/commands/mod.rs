//! CLI command handlers. Each command is in its own file.

mod checksum;
mod fetch;
mod status;

pub use checksum::run_checksum;
pub use fetch::{apply_overrides, format_report, run_fetch, Overrides};
pub use status::{local_size, run_status, status_line};
