//! CLI command handlers, one per file.

mod config;
mod inspect;
mod output;
mod parse;

pub use config::run_config;
pub use inspect::run_inspect;
pub use parse::run_parse;
