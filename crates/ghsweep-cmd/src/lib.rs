//! Command implementations for the ghsweep account cleaner.
//!
//! A run is preflight checks, an identity probe, the execution guard, and
//! then one handler per resource kind.

pub mod factory;
pub mod guard;
pub mod report;
pub mod sweep;

#[cfg(test)]
pub mod test_helpers;
