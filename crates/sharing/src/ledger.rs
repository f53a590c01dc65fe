//! Share ledger: keeps an expense's claimable pool (`item_count`) consistent
//! with the shares claimed against it.
//!
//! Rules:
//! - `item_count >= Σ share` after every operation.
//! - Spare capacity (`unassigned`) is always derived, never stored.
//! - The pool only grows when a claim cannot be absorbed by spare capacity and
//!   never shrinks below what is already claimed.
//!
//! Every function takes the assignments of the *other* participants (the one
//! being modified excluded) and returns the new `item_count`. They never fail;
//! out-of-range intermediate results are clamped.

use core::cmp::Ordering;

use tracing::trace;

use sharetab_core::Quantity;

use crate::Assignment;

/// Sum of all shares in `assignments`.
pub fn total_shares(assignments: &[Assignment]) -> Quantity {
    assignments.iter().map(|a| a.share).sum()
}

/// Spare pool capacity not claimed by any share (`max(0, item_count - Σ share)`).
pub fn unassigned(item_count: Quantity, assignments: &[Assignment]) -> Quantity {
    item_count.saturating_sub(total_shares(assignments))
}

/// New `item_count` after a participant's share moves from `old_share` to
/// `new_share`.
///
/// A larger claim grows the pool by exactly the increase. A smaller claim
/// frees only the whole-unit part of the reduction: going from 2 to 0.5 frees
/// 1 unit and leaves the trailing half as unassigned capacity. The result never
/// drops below what the others plus the new share still claim.
pub fn on_share_change(
    item_count: Quantity,
    old_share: Quantity,
    new_share: Quantity,
    other_assignments: &[Assignment],
) -> Quantity {
    let next = match new_share.cmp(&old_share) {
        Ordering::Greater => item_count + new_share.saturating_sub(old_share),
        Ordering::Less => {
            let reduction = old_share.saturating_sub(new_share).floor();
            let claimed = total_shares(other_assignments) + new_share;
            item_count.saturating_sub(reduction).max(claimed)
        }
        Ordering::Equal => item_count,
    };

    trace!(%item_count, %old_share, %new_share, %next, "share changed");
    next
}

/// New `item_count` after a participant holding `removed_share` leaves.
///
/// Removing a half share always frees one full unit. Any other share frees
/// exactly its size. Both are bounded below by what the others still claim;
/// for the half-share case this floor goes beyond a plain `max(0, item_count - 1)`
/// and is what keeps `item_count >= Σ share` when the others hold a trailing half.
pub fn on_deletion(
    item_count: Quantity,
    removed_share: Quantity,
    other_assignments: &[Assignment],
) -> Quantity {
    let freed = if removed_share == Quantity::HALF {
        Quantity::ONE
    } else {
        removed_share
    };
    let next = item_count
        .saturating_sub(freed)
        .max(total_shares(other_assignments));

    trace!(%item_count, %removed_share, %next, "share released");
    next
}

/// New `item_count` after a participant claims `new_share`.
///
/// The claim is absorbed by spare capacity when it fits; otherwise the pool
/// grows by exactly the unmet portion.
pub fn on_addition(
    item_count: Quantity,
    new_share: Quantity,
    existing_assignments: &[Assignment],
) -> Quantity {
    let spare = unassigned(item_count, existing_assignments);
    let next = if new_share <= spare {
        item_count
    } else {
        item_count + new_share.saturating_sub(spare)
    };

    trace!(%item_count, %new_share, %spare, %next, "share claimed");
    next
}
