//! Command-line interface for the `dejavu` binary.

pub mod commands;
