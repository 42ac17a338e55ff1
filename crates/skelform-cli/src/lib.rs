//! Skelform CLI library.
//!
//! Provides the command implementations behind the `skelform` binary:
//! spec validation, rig assembly with report output, and rig inspection.

pub mod commands;
pub mod input;
