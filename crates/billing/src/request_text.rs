//! The bill request sent to the venue.

use std::fmt::Write as _;

use sharetab_sharing::SessionParticipant;

use crate::{BillableExpense, BillingConfig};

/// Head count of a session; a participant entry may stand for several people.
pub fn total_people(participants: &[SessionParticipant]) -> u32 {
    participants.iter().map(|p| u32::from(p.person_count)).sum()
}

/// Formats the request as the greeting, the head count, then one
/// `name - count` line per expense other than the default one.
pub fn generate_request_text(
    total_people: u32,
    expenses: &[BillableExpense],
    config: &BillingConfig,
) -> String {
    let mut text = format!(
        "{}\n{} {}",
        config.greeting, total_people, config.people_suffix
    );
    for expense in expenses
        .iter()
        .filter(|e| !config.is_default_expense(&e.name))
    {
        // Writing into a String cannot fail.
        let _ = write!(text, "\n{} - {}", expense.name, expense.item_count);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_EXPENSE_NAME;
    use sharetab_core::{ExpenseId, ParticipantId, Quantity, SessionParticipantId};

    fn expense(name: &str, item_count: Quantity) -> BillableExpense {
        BillableExpense {
            id: ExpenseId::new(),
            name: name.to_string(),
            item_count,
            total_cost: None,
            assignments: Vec::new(),
        }
    }

    #[test]
    fn lists_non_default_expenses_after_head_count() {
        let expenses = [
            expense(DEFAULT_EXPENSE_NAME, Quantity::whole(5)),
            expense("Пиво", Quantity::whole(3)),
            expense("Веник", Quantity::from_halves(3)),
        ];

        let text = generate_request_text(5, &expenses, &BillingConfig::default());
        assert_eq!(
            text,
            "Посчитайте нас, пожалуйста.\n5 чел\nПиво - 3\nВеник - 1.5"
        );
    }

    #[test]
    fn only_head_count_when_nothing_else_was_ordered() {
        let expenses = [expense(DEFAULT_EXPENSE_NAME, Quantity::whole(2))];
        let text = generate_request_text(2, &expenses, &BillingConfig::default());
        assert_eq!(text, "Посчитайте нас, пожалуйста.\n2 чел");
    }

    #[test]
    fn config_controls_wording_and_default_expense() {
        let config = BillingConfig {
            default_expense_name: "Entry".to_string(),
            greeting: "Bill, please.".to_string(),
            people_suffix: "people".to_string(),
        };
        let expenses = [
            expense("Entry", Quantity::ONE),
            expense(DEFAULT_EXPENSE_NAME, Quantity::ONE),
        ];

        let text = generate_request_text(1, &expenses, &config);
        assert_eq!(text, format!("Bill, please.\n1 people\n{DEFAULT_EXPENSE_NAME} - 1"));
    }

    #[test]
    fn total_people_counts_companions() {
        let participants = [
            SessionParticipant::new(SessionParticipantId::new(), ParticipantId::new(), "Anna", 2)
                .unwrap(),
            SessionParticipant::new(SessionParticipantId::new(), ParticipantId::new(), "Boris", 1)
                .unwrap(),
        ];
        assert_eq!(total_people(&participants), 3);
        assert_eq!(total_people(&[]), 0);
    }
}
