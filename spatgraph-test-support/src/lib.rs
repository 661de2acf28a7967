//! Shared test utilities used across spatgraph crates.

pub mod proptest_profile;
pub mod tracing;
