//! Entities: records with identity that outlives their attribute values.

use std::collections::HashMap;

/// A record identified by id rather than by value.
///
/// Two session participants both named "Anna" are different entities; the
/// same participant renamed is still the same one.
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}

/// Maps each entity id to its position in `items`.
///
/// When ids repeat, the last position wins.
pub fn index_by_id<E: Entity>(items: &[E]) -> HashMap<E::Id, usize> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (item.id().clone(), i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named {
        id: u32,
    }

    impl Entity for Named {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.id
        }
    }

    #[test]
    fn index_points_at_positions() {
        let items = [Named { id: 7 }, Named { id: 3 }, Named { id: 7 }];
        let index = index_by_id(&items);
        assert_eq!(index.len(), 2);
        assert_eq!(index[&3], 1);
        assert_eq!(index[&7], 2);
    }
}
