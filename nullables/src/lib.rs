//! Nullable infrastructure for deterministic testing.
//!
//! The chain runtime reads block time through the [`Clock`] trait. Production
//! code uses [`SystemClock`]; tests and scripted simulations swap in a
//! [`NullClock`] whose time only moves when told to.

pub mod clock;

pub use clock::{Clock, NullClock, SystemClock};
