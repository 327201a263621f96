//! Command-line interface module.

mod args;
pub mod build;
mod common;
pub mod frame;
pub mod query;
pub mod render;

pub use args::{Cli, Commands, FrameArgs, QueryTarget};
