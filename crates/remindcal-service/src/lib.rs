//! Daily schedule and reminder selection built on parsed calendar feeds.
//!
//! Everything here is pure: callers supply the documents and the clock, and
//! take care of storage and delivery.

pub mod error;
pub mod reminder;
pub mod schedule;
