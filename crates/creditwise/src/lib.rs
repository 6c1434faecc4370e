//! CreditWise loan eligibility engine.
//!
//! Combines a pre-trained classifier with an auditable rule overlay and remediation advice.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod telemetry;
