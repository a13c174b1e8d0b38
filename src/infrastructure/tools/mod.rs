//! # Tools Module
//!
//! Local effects: the filesystem adapter and the child-process runner.

pub mod fs;
pub mod shell;
