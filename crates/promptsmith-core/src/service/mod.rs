//! Services that orchestrate port traits.

pub mod secret;
