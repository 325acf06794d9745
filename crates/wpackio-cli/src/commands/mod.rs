//! Command implementations. Each command exposes an `execute` function that
//! takes its parsed arguments and returns a [`Result`](crate::error::Result).

pub mod build;
pub(crate) mod utils;

pub use build::execute as build_execute;
