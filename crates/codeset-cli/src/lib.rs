//! Library side of the `codeset` command-line tool.

pub mod config;
pub mod logging;
pub mod pipeline;
