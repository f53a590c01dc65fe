//! Bulk cost entry.
//!
//! Prices arrive as `(name, cost)` pairs, typed in by hand or read off a
//! receipt, and are matched to the session's expenses by name ignoring case
//! and surrounding whitespace. Each entry goes to the first expense with that
//! name; when several entries hit the same expense the last one wins.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sharetab_core::ExpenseId;
use sharetab_sharing::{ExpenseCommand, SetTotalCost};

use crate::BillableExpense;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostEntry {
    pub name: String,
    pub cost: Decimal,
}

impl CostEntry {
    pub fn new(name: impl Into<String>, cost: Decimal) -> Self {
        Self {
            name: name.into(),
            cost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchedCost {
    pub expense_id: ExpenseId,
    pub total_cost: Decimal,
}

impl MatchedCost {
    pub fn into_command(self, occurred_at: DateTime<Utc>) -> ExpenseCommand {
        ExpenseCommand::SetTotalCost(SetTotalCost {
            expense_id: self.expense_id,
            total_cost: Some(self.total_cost),
            occurred_at,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostMatch {
    /// At most one entry per expense, in order of first match.
    pub matched: Vec<MatchedCost>,
    /// Entries with no matching expense or with a negative cost.
    pub unmatched: Vec<CostEntry>,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn match_costs(expenses: &[BillableExpense], entries: &[CostEntry]) -> CostMatch {
    let mut result = CostMatch::default();

    for entry in entries {
        if entry.cost.is_sign_negative() && !entry.cost.is_zero() {
            warn!(name = %entry.name, cost = %entry.cost, "ignoring negative cost entry");
            result.unmatched.push(entry.clone());
            continue;
        }

        let wanted = normalize(&entry.name);
        let Some(expense) = expenses.iter().find(|e| normalize(&e.name) == wanted) else {
            debug!(name = %entry.name, "no expense matches cost entry");
            result.unmatched.push(entry.clone());
            continue;
        };

        match result
            .matched
            .iter_mut()
            .find(|m| m.expense_id == expense.id)
        {
            Some(existing) => existing.total_cost = entry.cost,
            None => result.matched.push(MatchedCost {
                expense_id: expense.id,
                total_cost: entry.cost,
            }),
        }
    }

    debug!(
        matched = result.matched.len(),
        unmatched = result.unmatched.len(),
        "cost entries matched"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sharetab_core::{Aggregate, ExpectedVersion, Quantity, SessionId};
    use sharetab_sharing::{CreateExpense, Expense};

    fn expense(name: &str) -> BillableExpense {
        BillableExpense {
            id: ExpenseId::new(),
            name: name.to_string(),
            item_count: Quantity::ONE,
            total_cost: None,
            assignments: Vec::new(),
        }
    }

    #[test]
    fn names_match_ignoring_case_and_whitespace() {
        let beer = expense("Пиво");
        let tea = expense("Tea");

        let result = match_costs(
            &[beer.clone(), tea.clone()],
            &[
                CostEntry::new(" пиво ", dec!(450)),
                CostEntry::new("TEA", dec!(120.50)),
            ],
        );

        assert_eq!(
            result.matched,
            vec![
                MatchedCost {
                    expense_id: beer.id,
                    total_cost: dec!(450),
                },
                MatchedCost {
                    expense_id: tea.id,
                    total_cost: dec!(120.50),
                },
            ]
        );
        assert!(result.unmatched.is_empty());
    }

    #[test]
    fn unknown_names_and_negative_costs_are_unmatched() {
        let beer = expense("Пиво");
        let entries = [
            CostEntry::new("Квас", dec!(100)),
            CostEntry::new("Пиво", dec!(-5)),
        ];

        let result = match_costs(&[beer], &entries);
        assert!(result.matched.is_empty());
        assert_eq!(result.unmatched, entries.to_vec());
    }

    #[test]
    fn first_expense_takes_the_entry_and_last_entry_wins() {
        let first = expense("Чай");
        let second = expense("чай");

        let result = match_costs(
            &[first.clone(), second],
            &[CostEntry::new("ЧАЙ", dec!(10)), CostEntry::new("чай", dec!(12))],
        );

        assert_eq!(result.matched.len(), 1);
        assert_eq!(result.matched[0].expense_id, first.id);
        assert_eq!(result.matched[0].total_cost, dec!(12));
    }

    #[test]
    fn matched_cost_sets_the_expense_total() {
        let expense_id = ExpenseId::new();
        let mut aggregate = Expense::empty(expense_id);
        aggregate
            .execute(
                ExpectedVersion::Exact(0),
                &ExpenseCommand::CreateExpense(CreateExpense {
                    session_id: SessionId::new(),
                    expense_id,
                    name: "Веник".to_string(),
                    item_count: Quantity::whole(2),
                    assignments: Vec::new(),
                    occurred_at: Utc::now(),
                }),
            )
            .unwrap();

        let result = match_costs(
            &[BillableExpense::from(&aggregate)],
            &[CostEntry::new("веник", dec!(800))],
        );
        let command = result.matched[0].into_command(Utc::now());
        aggregate
            .execute(ExpectedVersion::Exact(1), &command)
            .unwrap();

        assert_eq!(aggregate.total_cost(), Some(dec!(800)));
    }
}
