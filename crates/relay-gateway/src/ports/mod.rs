//! Ports for the signal relay.

pub mod outbound;

pub use outbound::{Publisher, SystemTimeSource, TimeSource};
