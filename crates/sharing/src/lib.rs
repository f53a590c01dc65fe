//! Share accounting for session expenses.
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns. The
//! [`ledger`] functions compute how an expense's claimable pool must move when
//! a share is claimed, changed, or released; the [`Expense`] aggregate drives
//! them through commands and events.

pub mod assignment;
pub mod expense;
pub mod ledger;
pub mod participant;

pub use assignment::Assignment;
pub use expense::{
    ChangeShare, ClaimShare, CreateExpense, Expense, ExpenseCommand, ExpenseCreated, ExpenseEvent,
    MAX_ITEM_COUNT, ReleaseShare, SetTotalCost, ShareChanged, ShareClaimed, ShareReleased,
    TotalCostSet,
};
pub use participant::{PERSON_COUNT_RANGE, SessionParticipant, default_assignments};
