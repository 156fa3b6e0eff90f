//! Unit test suite for the tokviz library API
//!
//! These tests exercise the public library surface without spawning the
//! binary.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod backends;
mod cache;
mod registry;
mod render;
