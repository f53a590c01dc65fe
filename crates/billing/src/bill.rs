//! Per-participant bills.
//!
//! Each expense's cost is split proportionally to the shares claimed against
//! it. Amounts accumulate unrounded; rounding happens exactly once, after all
//! expenses are processed:
//! - a bill's `total` to whole currency units,
//! - each breakdown line's `cost` to 2 decimal places.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sharetab_core::{ExpenseId, ParticipantId, Quantity, SessionParticipantId, index_by_id};
use sharetab_sharing::{Assignment, Expense, SessionParticipant, ledger};

/// An expense as seen by billing: pool, cost (if entered), and claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillableExpense {
    pub id: ExpenseId,
    pub name: String,
    pub item_count: Quantity,
    pub total_cost: Option<Decimal>,
    pub assignments: Vec<Assignment>,
}

impl From<&Expense> for BillableExpense {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id_typed(),
            name: expense.name().to_string(),
            item_count: expense.item_count(),
            total_cost: expense.total_cost(),
            assignments: expense.assignments().to_vec(),
        }
    }
}

/// One expense's contribution to a participant's bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillLine {
    pub expense_id: ExpenseId,
    pub expense_name: String,
    pub share: Quantity,
    pub cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantBill {
    pub participant: SessionParticipantId,
    pub participant_id: ParticipantId,
    pub participant_name: String,
    pub person_count: u8,
    pub total: Decimal,
    pub breakdown: Vec<BillLine>,
}

impl ParticipantBill {
    fn open(participant: &SessionParticipant) -> Self {
        Self {
            participant: participant.id,
            participant_id: participant.participant_id,
            participant_name: participant.name.clone(),
            person_count: participant.person_count,
            total: Decimal::ZERO,
            breakdown: Vec::new(),
        }
    }
}

/// Computes one bill per participant, in participant order.
///
/// Expenses without a cost or without any claimed share are skipped. The
/// readiness gate is not enforced here; see [`crate::billing_status`].
pub fn calculate_bills(
    participants: &[SessionParticipant],
    expenses: &[BillableExpense],
) -> Vec<ParticipantBill> {
    let mut bills: Vec<ParticipantBill> = participants.iter().map(ParticipantBill::open).collect();
    let index = index_by_id(participants);

    for expense in expenses {
        let Some(total_cost) = expense.total_cost else {
            debug!(expense_id = %expense.id, "skipping expense without cost");
            continue;
        };
        let total_shares = ledger::total_shares(&expense.assignments);
        if total_shares.is_zero() {
            debug!(expense_id = %expense.id, "skipping expense without shares");
            continue;
        }

        let cost_per_share = total_cost / total_shares.to_decimal();
        for assignment in &expense.assignments {
            let Some(&i) = index.get(&assignment.participant) else {
                warn!(
                    expense_id = %expense.id,
                    participant = %assignment.participant,
                    "assignment references unknown participant"
                );
                continue;
            };
            let cost = assignment.share.to_decimal() * cost_per_share;
            let bill = &mut bills[i];
            bill.total += cost;
            bill.breakdown.push(BillLine {
                expense_id: expense.id,
                expense_name: expense.name.clone(),
                share: assignment.share,
                cost,
            });
        }
    }

    for bill in &mut bills {
        bill.total = round_half_up(bill.total, 0);
        for line in &mut bill.breakdown {
            line.cost = round_half_up(line.cost, 2);
        }
    }

    debug!(bills = bills.len(), expenses = expenses.len(), "bills calculated");
    bills
}

/// Rounds to `dp` decimal places, midpoints toward positive infinity.
///
/// Positive midpoints round away from zero and negative ones toward it, which
/// matches `floor(x * 10^dp + 0.5) / 10^dp` without scaling the value.
pub(crate) fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    let strategy = if value.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    };
    value.round_dp_with_strategy(dp, strategy)
}
