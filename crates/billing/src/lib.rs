//! Billing for a session: per-participant totals, the readiness gate, and
//! the bill request text.
//!
//! Pure domain logic only: inputs are plain records loaded by the caller,
//! outputs are plain records. Nothing here performs IO.

pub mod bill;
pub mod config;
pub mod cost_entry;
pub mod request_text;
pub mod status;

pub use bill::{BillLine, BillableExpense, ParticipantBill, calculate_bills};
pub use config::BillingConfig;
pub use cost_entry::{CostEntry, CostMatch, MatchedCost, match_costs};
pub use request_text::{generate_request_text, total_people};
pub use status::{
    BillingStatus, MissingCostExpense, ReadinessIssue, billing_status, readiness_issues,
};
