//! Command implementations for the ffbtest CLI

pub mod console;
pub mod env;
pub mod ffb;
pub mod probe;
