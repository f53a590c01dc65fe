//! Readiness gate and the billing summary handed to the presentation layer.
//!
//! A bill may only be issued as final once every expense has a cost, every
//! expense has at least one assignment, and the session has participants.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use sharetab_core::{ExpenseId, Quantity};
use sharetab_sharing::SessionParticipant;

use crate::{BillableExpense, ParticipantBill, calculate_bills};

/// Reason a session is not ready to be billed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReadinessIssue {
    MissingCost { count: usize },
    MissingAssignments { count: usize },
    NoParticipants,
}

impl fmt::Display for ReadinessIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCost { count } => write!(f, "{count} expense(s) missing cost"),
            Self::MissingAssignments { count } => {
                write!(f, "{count} expense(s) have no assignments")
            }
            Self::NoParticipants => f.write_str("No participants in session"),
        }
    }
}

/// An expense still waiting for a price, listed for manual entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingCostExpense {
    pub id: ExpenseId,
    pub name: String,
    pub item_count: Quantity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingStatus {
    pub ready: bool,
    pub issues: Vec<ReadinessIssue>,
    /// Empty unless `ready`.
    pub bills: Vec<ParticipantBill>,
    /// Sum of rounded bill totals.
    pub grand_total: Decimal,
    /// Sum of raw expense costs (unpriced expenses count as zero).
    pub expense_total: Decimal,
    /// `grand_total - expense_total`: rounding slack pooled across everyone.
    pub balance: Decimal,
    pub missing_cost: Vec<MissingCostExpense>,
}

pub fn readiness_issues(
    participants: &[SessionParticipant],
    expenses: &[BillableExpense],
) -> Vec<ReadinessIssue> {
    let mut issues = Vec::new();

    let missing_cost = expenses.iter().filter(|e| e.total_cost.is_none()).count();
    if missing_cost > 0 {
        issues.push(ReadinessIssue::MissingCost {
            count: missing_cost,
        });
    }

    let unassigned = expenses.iter().filter(|e| e.assignments.is_empty()).count();
    if unassigned > 0 {
        issues.push(ReadinessIssue::MissingAssignments { count: unassigned });
    }

    if participants.is_empty() {
        issues.push(ReadinessIssue::NoParticipants);
    }

    issues
}

/// Runs the readiness gate and, when it passes, the billing engine.
pub fn billing_status(
    participants: &[SessionParticipant],
    expenses: &[BillableExpense],
) -> BillingStatus {
    let issues = readiness_issues(participants, expenses);
    let ready = issues.is_empty();
    let bills = if ready {
        calculate_bills(participants, expenses)
    } else {
        Vec::new()
    };

    let grand_total: Decimal = bills.iter().map(|b| b.total).sum();
    let expense_total: Decimal = expenses.iter().filter_map(|e| e.total_cost).sum();
    let balance = grand_total - expense_total;

    let missing_cost = expenses
        .iter()
        .filter(|e| e.total_cost.is_none())
        .map(|e| MissingCostExpense {
            id: e.id,
            name: e.name.clone(),
            item_count: e.item_count,
        })
        .collect();

    debug!(ready, issues = issues.len(), %grand_total, %expense_total, %balance, "billing status");

    BillingStatus {
        ready,
        issues,
        bills,
        grand_total,
        expense_total,
        balance,
        missing_cost,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sharetab_core::{ParticipantId, SessionParticipantId};
    use sharetab_sharing::Assignment;

    fn participant(name: &str) -> SessionParticipant {
        SessionParticipant::new(SessionParticipantId::new(), ParticipantId::new(), name, 1).unwrap()
    }

    fn expense(cost: Option<Decimal>, holders: &[&SessionParticipant]) -> BillableExpense {
        BillableExpense {
            id: ExpenseId::new(),
            name: "Пиво".to_string(),
            item_count: Quantity::whole(holders.len() as u64),
            total_cost: cost,
            assignments: holders
                .iter()
                .map(|p| Assignment::new(p.id, Quantity::ONE))
                .collect(),
        }
    }

    #[test]
    fn ready_session_reports_rounding_balance() {
        let (a, b, c) = (participant("A"), participant("B"), participant("C"));
        let beer = expense(Some(dec!(10)), &[&a, &b, &c]);

        let status = billing_status(&[a, b, c], &[beer]);
        assert!(status.ready);
        assert!(status.issues.is_empty());
        assert_eq!(status.bills.len(), 3);
        assert_eq!(status.grand_total, dec!(9));
        assert_eq!(status.expense_total, dec!(10));
        assert_eq!(status.balance, dec!(-1));
        assert!(status.missing_cost.is_empty());
    }

    #[test]
    fn every_gate_failure_is_listed() {
        let a = participant("A");
        let unpriced = expense(None, &[&a]);
        let unclaimed = expense(Some(dec!(3)), &[]);
        let priced = expense(Some(dec!(4)), &[&a]);

        let issues = readiness_issues(&[], &[unpriced, unclaimed, priced]);
        assert_eq!(
            issues,
            vec![
                ReadinessIssue::MissingCost { count: 1 },
                ReadinessIssue::MissingAssignments { count: 1 },
                ReadinessIssue::NoParticipants,
            ]
        );
        assert_eq!(issues[0].to_string(), "1 expense(s) missing cost");
        assert_eq!(issues[1].to_string(), "1 expense(s) have no assignments");
        assert_eq!(issues[2].to_string(), "No participants in session");
    }

    #[test]
    fn unready_session_has_no_bills_and_excludes_unpriced_costs() {
        let (a, b) = (participant("A"), participant("B"));
        let unpriced = expense(None, &[&a]);
        let priced = expense(Some(dec!(7)), &[&a, &b]);
        let unpriced_id = unpriced.id;

        let status = billing_status(&[a, b], &[unpriced, priced]);
        assert!(!status.ready);
        assert!(status.bills.is_empty());
        assert_eq!(status.expense_total, dec!(7));
        assert_eq!(status.grand_total, Decimal::ZERO);
        assert_eq!(status.missing_cost.len(), 1);
        assert_eq!(status.missing_cost[0].id, unpriced_id);
        assert_eq!(status.missing_cost[0].item_count, Quantity::ONE);
    }

    #[test]
    fn empty_session_is_not_ready() {
        let status = billing_status(&[], &[]);
        assert!(!status.ready);
        assert_eq!(status.issues, vec![ReadinessIssue::NoParticipants]);
        assert_eq!(status.balance, Decimal::ZERO);
    }

    #[test]
    fn issues_serialize_with_kind_tag() {
        let json = serde_json::to_value(ReadinessIssue::MissingCost { count: 2 }).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "missing_cost", "count": 2 }));
    }
}
