//! Library side of the `ipl-insight` command-line tool.

pub mod commands;
pub mod logging;
