//! Plan computation for Pacer.
//!
//! Two pure, deterministic building blocks: calendar day-range generation
//! and the weighted daily-quantity allocator. Neither reads a clock or any
//! other ambient state; calling either twice with equal inputs yields equal
//! output.

#![warn(missing_docs)]

pub mod allocator;
pub mod calendar;

pub use allocator::allocate;
pub use calendar::days;
