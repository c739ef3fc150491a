//! Event models produced by the parser.
//!
//! Fields are plain typed options populated directly during parsing; the set
//! of interpreted properties is fixed.

mod datetime;
mod event;
mod property;

pub use datetime::{DateTimeForm, Timestamp};
pub use event::Event;
pub use property::{ContentLine, Parameter};
