//! CLI commands

pub mod index;
pub mod new;
pub mod render;
