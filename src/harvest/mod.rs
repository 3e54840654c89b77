//! The resumable harvesting pipeline.
//!
//! This module provides:
//! - `HarvestController`: the checkpointed roster × catalogs iteration
//! - `SignoffResolver`: the per-(student, assignment) eligibility decision
//! - `PointsLedger`: the per-student point tally the run accumulates
//!
//! All remote access goes through the `GradingService` trait, so the whole
//! pipeline runs against an in-memory service in tests.

pub mod controller;
pub mod ledger;
pub mod resolver;

#[cfg(test)]
pub(crate) mod fixtures;

pub use controller::HarvestController;
pub use ledger::{LedgerEntry, PointsLedger};
pub use resolver::{Decision, SignoffResolver};
