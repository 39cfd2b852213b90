//! Safety checking
//!
//! "Whenever the precondition holds at an event, the postcondition holds at
//! every event in its causal future."

mod checker;
mod property;

pub use checker::{CheckMode, SafetyReport, SafetyVerdict, Violation};
pub use property::{property_fn, send_at, CausalFutureProperty, FnProperty, SafetyProperty};
