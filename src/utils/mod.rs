//! Shared helpers.
//!
//! - [`date`]: `PostDate`, parsing long-form post dates and feed formatting
//! - [`exec`]: `Cmd` builder for external processes
//! - [`git`]: last-commit dates for docs pages
//! - [`path`]: path normalization and `/`-separated names
//! - [`plural`]: count formatting for log lines

pub mod date;
pub mod exec;
pub mod git;
pub mod path;
pub mod plural;
