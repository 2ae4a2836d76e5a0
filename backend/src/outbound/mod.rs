//! Outbound adapters implementing the driven ports.

pub mod identity;
pub mod persistence;
