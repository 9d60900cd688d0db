//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `eval.rs` - Hand-checked term values on small positions
//! - `edge_cases.rs` - Board edges, crowded and sparse positions
//! - `proptest.rs` - Property-based tests
