//! Integration test crate for QCut.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It depends on the timeline and effects crates to verify they work together.

#[cfg(test)]
mod timeline;

#[cfg(test)]
mod effects;
