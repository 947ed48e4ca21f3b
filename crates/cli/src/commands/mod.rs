//! CLI subcommands.

pub mod catalog;
pub mod handoff;
pub mod migrate;
