//! CLI support for the `termine` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod corpus;
pub mod logging;
pub mod output;
