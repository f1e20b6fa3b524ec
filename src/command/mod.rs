//! Pieces of the command-line flow that sit around the resolution engine.

pub mod explain;
pub mod input;
