//! formlogic common - shared types for the form visibility and validation engine
//!
//! This crate holds the plain data the engine consumes and produces:
//! - Field definitions and their constraints
//! - Answer sets collected while a form is being filled
//! - Conditional rules (legacy per-field dependency and the rule list)
//! - Visibility maps and validation results
//! - Error handling
//!
//! Everything here is behavior-free apart from small accessors. The rule
//! evaluation, dependency resolution and validation live in
//! `formlogic-engine`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod answer;
pub mod error;
pub mod field;
pub mod outcome;
pub mod rule;
pub mod schema;
pub mod visibility;

pub use answer::*;
pub use error::*;
pub use field::*;
pub use outcome::*;
pub use rule::*;
pub use schema::*;
pub use visibility::*;

use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free counter for engine statistics
#[derive(Debug, Default)]
pub struct AtomicCounter(AtomicU64);

impl AtomicCounter {
    /// Create new counter
    pub const fn new(value: u64) -> Self {
        Self(AtomicU64::new(value))
    }

    /// Increment and return previous value
    #[inline(always)]
    pub fn inc(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }

    /// Get current value
    #[inline(always)]
    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_counter() {
        let counter = AtomicCounter::new(0);
        assert_eq!(counter.inc(), 0);
        assert_eq!(counter.inc(), 1);
        assert_eq!(counter.get(), 2);
    }
}
