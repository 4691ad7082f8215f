//! # Tamagocchi Test Utilities
//!
//! Shared testing utilities for all crates:
//! - World fixtures built with a fluent builder
//! - A navigator stub that records every request
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod navigator;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
