//! Candidate propensity and dropout-risk scoring for youth mobilisation programmes.
//!
//! The [`scoring`] module holds the pure scoring engine. [`candidates`] is the case-management
//! layer that caches scores on candidate records and aggregates them for cohort views.

pub mod candidates;
pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
