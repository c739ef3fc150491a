//! Occurrence expansion.
//!
//! Turns parsed events into the concrete occurrences that fall inside a
//! [`Window`]. Recurrence rules are evaluated by the `rrule` crate; this module
//! handles anchoring, exclusion, windowing and duration.

mod error;
mod expander;
mod occurrence;
mod recurrence;
mod window;

pub use error::{ExpandError, ExpandResult};
pub use expander::{between, between_in};
pub use occurrence::{Expansion, Occurrence};
pub use recurrence::{MAX_INSTANCES, normalize_rule};
pub use window::Window;
