//! Integration test target.

mod sync;
