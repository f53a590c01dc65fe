use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use sharetab_core::{
    Aggregate, AggregateRoot, DomainError, ExpenseId, Quantity, SessionId, SessionParticipantId,
};
use sharetab_events::Event;

use crate::{Assignment, ledger};

/// Largest pool an expense may be created with.
pub const MAX_ITEM_COUNT: Quantity = Quantity::whole(99);

/// Aggregate root: Expense.
///
/// Holds the claimable pool and the shares claimed against it. Every pool
/// change goes through the [`ledger`] functions, so `item_count` always covers
/// the sum of shares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    id: ExpenseId,
    session_id: Option<SessionId>,
    name: String,
    item_count: Quantity,
    total_cost: Option<Decimal>,
    assignments: Vec<Assignment>,
    version: u64,
    created: bool,
}

impl Expense {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: ExpenseId) -> Self {
        Self {
            id,
            session_id: None,
            name: String::new(),
            item_count: Quantity::ZERO,
            total_cost: None,
            assignments: Vec::new(),
            version: 0,
            created: false,
        }
    }

    pub fn id_typed(&self) -> ExpenseId {
        self.id
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn item_count(&self) -> Quantity {
        self.item_count
    }

    pub fn total_cost(&self) -> Option<Decimal> {
        self.total_cost
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn share_of(&self, participant: SessionParticipantId) -> Option<Quantity> {
        self.assignments
            .iter()
            .find(|a| a.participant == participant)
            .map(|a| a.share)
    }

    /// Spare pool capacity not claimed by anyone.
    pub fn unassigned(&self) -> Quantity {
        ledger::unassigned(self.item_count, &self.assignments)
    }

    fn others(&self, participant: SessionParticipantId) -> Vec<Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.participant != participant)
            .copied()
            .collect()
    }
}

impl AggregateRoot for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: CreateExpense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateExpense {
    pub session_id: SessionId,
    pub expense_id: ExpenseId,
    pub name: String,
    pub item_count: Quantity,
    pub assignments: Vec<Assignment>,
    pub occurred_at: DateTime<Utc>,
}

impl CreateExpense {
    /// An expense created by a participant for themselves: the pool starts at
    /// their share and they hold all of it.
    pub fn claimed_by(
        session_id: SessionId,
        expense_id: ExpenseId,
        name: impl Into<String>,
        participant: SessionParticipantId,
        share: Quantity,
        occurred_at: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id,
            expense_id,
            name: name.into(),
            item_count: share,
            assignments: vec![Assignment::new(participant, share)],
            occurred_at,
        }
    }
}

/// Command: ClaimShare (a participant joins the expense).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimShare {
    pub expense_id: ExpenseId,
    pub participant: SessionParticipantId,
    pub share: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ChangeShare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeShare {
    pub expense_id: ExpenseId,
    pub participant: SessionParticipantId,
    pub new_share: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ReleaseShare (a participant leaves the expense).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseShare {
    pub expense_id: ExpenseId,
    pub participant: SessionParticipantId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetTotalCost (manual or extracted price entry; `None` clears it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetTotalCost {
    pub expense_id: ExpenseId,
    pub total_cost: Option<Decimal>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseCommand {
    CreateExpense(CreateExpense),
    ClaimShare(ClaimShare),
    ChangeShare(ChangeShare),
    ReleaseShare(ReleaseShare),
    SetTotalCost(SetTotalCost),
}

/// Event: ExpenseCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseCreated {
    pub session_id: SessionId,
    pub expense_id: ExpenseId,
    pub name: String,
    pub item_count: Quantity,
    pub assignments: Vec<Assignment>,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ShareClaimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareClaimed {
    pub expense_id: ExpenseId,
    pub participant: SessionParticipantId,
    pub share: Quantity,
    pub new_item_count: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ShareChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareChanged {
    pub expense_id: ExpenseId,
    pub participant: SessionParticipantId,
    pub old_share: Quantity,
    pub new_share: Quantity,
    pub new_item_count: Quantity,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ShareReleased.
///
/// `expense_emptied` is set when the last assignment is gone; deleting the
/// expense is left to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareReleased {
    pub expense_id: ExpenseId,
    pub participant: SessionParticipantId,
    pub share: Quantity,
    pub new_item_count: Quantity,
    pub expense_emptied: bool,
    pub occurred_at: DateTime<Utc>,
}

/// Event: TotalCostSet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalCostSet {
    pub expense_id: ExpenseId,
    pub total_cost: Option<Decimal>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseEvent {
    ExpenseCreated(ExpenseCreated),
    ShareClaimed(ShareClaimed),
    ShareChanged(ShareChanged),
    ShareReleased(ShareReleased),
    TotalCostSet(TotalCostSet),
}

impl Event for ExpenseEvent {
    type AggregateId = ExpenseId;

    fn event_type(&self) -> &'static str {
        match self {
            ExpenseEvent::ExpenseCreated(_) => "sharing.expense.created",
            ExpenseEvent::ShareClaimed(_) => "sharing.expense.share_claimed",
            ExpenseEvent::ShareChanged(_) => "sharing.expense.share_changed",
            ExpenseEvent::ShareReleased(_) => "sharing.expense.share_released",
            ExpenseEvent::TotalCostSet(_) => "sharing.expense.total_cost_set",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn aggregate_id(&self) -> ExpenseId {
        match self {
            ExpenseEvent::ExpenseCreated(e) => e.expense_id,
            ExpenseEvent::ShareClaimed(e) => e.expense_id,
            ExpenseEvent::ShareChanged(e) => e.expense_id,
            ExpenseEvent::ShareReleased(e) => e.expense_id,
            ExpenseEvent::TotalCostSet(e) => e.expense_id,
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ExpenseEvent::ExpenseCreated(e) => e.occurred_at,
            ExpenseEvent::ShareClaimed(e) => e.occurred_at,
            ExpenseEvent::ShareChanged(e) => e.occurred_at,
            ExpenseEvent::ShareReleased(e) => e.occurred_at,
            ExpenseEvent::TotalCostSet(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Expense {
    type Command = ExpenseCommand;
    type Event = ExpenseEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            ExpenseEvent::ExpenseCreated(e) => {
                self.id = e.expense_id;
                self.session_id = Some(e.session_id);
                self.name = e.name.clone();
                self.item_count = e.item_count;
                self.total_cost = None;
                self.assignments = e.assignments.clone();
                self.created = true;
            }
            ExpenseEvent::ShareClaimed(e) => {
                self.assignments.push(Assignment::new(e.participant, e.share));
                self.item_count = e.new_item_count;
            }
            ExpenseEvent::ShareChanged(e) => {
                if let Some(a) = self
                    .assignments
                    .iter_mut()
                    .find(|a| a.participant == e.participant)
                {
                    a.share = e.new_share;
                }
                self.item_count = e.new_item_count;
            }
            ExpenseEvent::ShareReleased(e) => {
                self.assignments.retain(|a| a.participant != e.participant);
                self.item_count = e.new_item_count;
            }
            ExpenseEvent::TotalCostSet(e) => {
                self.total_cost = e.total_cost;
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            ExpenseCommand::CreateExpense(cmd) => self.handle_create(cmd),
            ExpenseCommand::ClaimShare(cmd) => self.handle_claim(cmd),
            ExpenseCommand::ChangeShare(cmd) => self.handle_change(cmd),
            ExpenseCommand::ReleaseShare(cmd) => self.handle_release(cmd),
            ExpenseCommand::SetTotalCost(cmd) => self.handle_set_total_cost(cmd),
        }
    }
}

fn ensure_bounded(share: Quantity) -> Result<(), DomainError> {
    if share > Quantity::MAX {
        return Err(DomainError::invalid_quantity(format!(
            "share must not exceed {}",
            Quantity::MAX
        )));
    }
    Ok(())
}

impl Expense {
    fn ensure_created(&self, expense_id: ExpenseId) -> Result<(), DomainError> {
        if !self.created {
            return Err(DomainError::not_found("expense"));
        }
        if self.id != expense_id {
            return Err(DomainError::invariant("expense_id mismatch"));
        }
        Ok(())
    }

    fn handle_create(&self, cmd: &CreateExpense) -> Result<Vec<ExpenseEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("expense already exists"));
        }

        let name = cmd.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("expense name must not be empty"));
        }

        if cmd.item_count.is_zero() || cmd.item_count > MAX_ITEM_COUNT {
            return Err(DomainError::validation(format!(
                "item_count must be between 0.5 and {MAX_ITEM_COUNT}"
            )));
        }

        let mut assignments: Vec<Assignment> = Vec::with_capacity(cmd.assignments.len());
        for a in &cmd.assignments {
            if assignments.iter().any(|b| b.participant == a.participant) {
                return Err(DomainError::validation(
                    "participant assigned more than once",
                ));
            }
            ensure_bounded(a.share)?;
            assignments.push(*a);
        }
        assignments.retain(|a| !a.share.is_zero());

        // Auto-assigned defaults may claim more than the requested pool.
        let item_count = cmd.item_count.max(ledger::total_shares(&assignments));

        Ok(vec![ExpenseEvent::ExpenseCreated(ExpenseCreated {
            session_id: cmd.session_id,
            expense_id: cmd.expense_id,
            name: name.to_string(),
            item_count,
            assignments,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_claim(&self, cmd: &ClaimShare) -> Result<Vec<ExpenseEvent>, DomainError> {
        self.ensure_created(cmd.expense_id)?;

        if cmd.share.is_zero() {
            return Err(DomainError::validation("share must be positive"));
        }
        ensure_bounded(cmd.share)?;
        if self.share_of(cmd.participant).is_some() {
            return Err(DomainError::conflict("participant already holds a share"));
        }

        let new_item_count = ledger::on_addition(self.item_count, cmd.share, &self.assignments);

        Ok(vec![ExpenseEvent::ShareClaimed(ShareClaimed {
            expense_id: cmd.expense_id,
            participant: cmd.participant,
            share: cmd.share,
            new_item_count,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_change(&self, cmd: &ChangeShare) -> Result<Vec<ExpenseEvent>, DomainError> {
        self.ensure_created(cmd.expense_id)?;

        let old_share = self
            .share_of(cmd.participant)
            .ok_or(DomainError::not_found("assignment"))?;
        ensure_bounded(cmd.new_share)?;

        if cmd.new_share == old_share {
            return Ok(Vec::new());
        }
        if cmd.new_share.is_zero() {
            return self.release(cmd.participant, old_share, cmd.occurred_at);
        }

        let others = self.others(cmd.participant);
        let new_item_count =
            ledger::on_share_change(self.item_count, old_share, cmd.new_share, &others);

        Ok(vec![ExpenseEvent::ShareChanged(ShareChanged {
            expense_id: cmd.expense_id,
            participant: cmd.participant,
            old_share,
            new_share: cmd.new_share,
            new_item_count,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_release(&self, cmd: &ReleaseShare) -> Result<Vec<ExpenseEvent>, DomainError> {
        self.ensure_created(cmd.expense_id)?;

        let share = self
            .share_of(cmd.participant)
            .ok_or(DomainError::not_found("assignment"))?;

        self.release(cmd.participant, share, cmd.occurred_at)
    }

    fn release(
        &self,
        participant: SessionParticipantId,
        share: Quantity,
        occurred_at: DateTime<Utc>,
    ) -> Result<Vec<ExpenseEvent>, DomainError> {
        let others = self.others(participant);
        let new_item_count = ledger::on_deletion(self.item_count, share, &others);

        Ok(vec![ExpenseEvent::ShareReleased(ShareReleased {
            expense_id: self.id,
            participant,
            share,
            new_item_count,
            expense_emptied: others.is_empty(),
            occurred_at,
        })])
    }

    fn handle_set_total_cost(&self, cmd: &SetTotalCost) -> Result<Vec<ExpenseEvent>, DomainError> {
        self.ensure_created(cmd.expense_id)?;

        if cmd
            .total_cost
            .is_some_and(|cost| cost.is_sign_negative() && !cost.is_zero())
        {
            return Err(DomainError::validation("total_cost must be non-negative"));
        }

        Ok(vec![ExpenseEvent::TotalCostSet(TotalCostSet {
            expense_id: cmd.expense_id,
            total_cost: cmd.total_cost,
            occurred_at: cmd.occurred_at,
        })])
    }
}
