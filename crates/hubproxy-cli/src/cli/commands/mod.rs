//! CLI command handlers, one file per command.

mod check_src;
mod rewrite;
mod serve;

pub use check_src::run_check_src;
pub use rewrite::run_rewrite;
pub use serve::run_serve;
