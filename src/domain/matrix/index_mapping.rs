//! Explicit old-index to new-index projection used when items are added or
//! removed.

use serde::Serialize;

use crate::domain::foundation::DomainError;

/// Maps every old item index to its new index, or to `None` if the item was
/// dropped. New indices that no old index maps to are fresh items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexMapping {
    old_to_new: Vec<Option<usize>>,
    new_size: usize,
}

impl IndexMapping {
    /// Builds a mapping from an explicit table.
    ///
    /// # Errors
    ///
    /// Fails if a target index is `>= new_size` or two old indices share a
    /// target.
    pub fn new(old_to_new: Vec<Option<usize>>, new_size: usize) -> Result<Self, DomainError> {
        let mut taken = vec![false; new_size];
        for target in old_to_new.iter().flatten() {
            let slot = taken
                .get_mut(*target)
                .ok_or_else(|| DomainError::index_out_of_range("mapping target", *target, new_size))?;
            if *slot {
                return Err(DomainError::validation(
                    "mapping",
                    format!("new index {} is targeted twice", target),
                ));
            }
            *slot = true;
        }

        Ok(Self {
            old_to_new,
            new_size,
        })
    }

    /// Keeps every index in place.
    pub fn identity(size: usize) -> Self {
        Self::resize_tail(size, size)
    }

    /// Keeps old indices in place, appending fresh items or truncating the
    /// tail to reach `new_size`.
    pub fn resize_tail(old_size: usize, new_size: usize) -> Self {
        let old_to_new = (0..old_size)
            .map(|i| (i < new_size).then_some(i))
            .collect();
        Self {
            old_to_new,
            new_size,
        }
    }

    /// Inserts one fresh item at `at`, shifting later items up.
    pub fn insert_at(old_size: usize, at: usize) -> Result<Self, DomainError> {
        if at > old_size {
            return Err(DomainError::index_out_of_range("insert position", at, old_size + 1));
        }
        let old_to_new = (0..old_size)
            .map(|i| Some(if i < at { i } else { i + 1 }))
            .collect();
        Ok(Self {
            old_to_new,
            new_size: old_size + 1,
        })
    }

    /// Drops the item at `removed`, shifting later items down.
    pub fn remove_at(old_size: usize, removed: usize) -> Result<Self, DomainError> {
        if removed >= old_size {
            return Err(DomainError::index_out_of_range("item", removed, old_size));
        }
        let old_to_new = (0..old_size)
            .map(|i| match i.cmp(&removed) {
                std::cmp::Ordering::Less => Some(i),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(i - 1),
            })
            .collect();
        Ok(Self {
            old_to_new,
            new_size: old_size - 1,
        })
    }

    /// Number of items before the change.
    pub fn old_size(&self) -> usize {
        self.old_to_new.len()
    }

    /// Number of items after the change.
    pub fn new_size(&self) -> usize {
        self.new_size
    }

    /// New index of `old`, if the item survives.
    pub fn map(&self, old: usize) -> Option<usize> {
        self.old_to_new.get(old).copied().flatten()
    }

    /// Projects a per-item list through the mapping. Surviving items move to
    /// their new slot; fresh slots are produced by `fill(new_index)`.
    pub fn project<T>(&self, items: Vec<T>, mut fill: impl FnMut(usize) -> T) -> Vec<T> {
        let mut slots: Vec<Option<T>> = (0..self.new_size).map(|_| None).collect();
        for (old, item) in items.into_iter().enumerate() {
            if let Some(slot) = self.map(old).and_then(|new| slots.get_mut(new)) {
                *slot = Some(item);
            }
        }
        slots
            .into_iter()
            .enumerate()
            .map(|(new, slot)| slot.unwrap_or_else(|| fill(new)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_maps_every_index_to_itself() {
        let mapping = IndexMapping::identity(3);
        assert_eq!(mapping.map(0), Some(0));
        assert_eq!(mapping.map(2), Some(2));
        assert_eq!(mapping.map(3), None);
        assert_eq!(mapping.new_size(), 3);
    }

    #[test]
    fn resize_tail_truncates() {
        let mapping = IndexMapping::resize_tail(3, 2);
        assert_eq!(mapping.map(1), Some(1));
        assert_eq!(mapping.map(2), None);
    }

    #[test]
    fn insert_at_shifts_later_items_up() {
        let mapping = IndexMapping::insert_at(3, 1).unwrap();
        assert_eq!(mapping.map(0), Some(0));
        assert_eq!(mapping.map(1), Some(2));
        assert_eq!(mapping.map(2), Some(3));
        assert_eq!(mapping.new_size(), 4);
    }

    #[test]
    fn insert_past_end_is_rejected() {
        assert!(IndexMapping::insert_at(2, 3).is_err());
        assert!(IndexMapping::insert_at(2, 2).is_ok());
    }

    #[test]
    fn remove_at_skips_removed_and_shifts_down() {
        let mapping = IndexMapping::remove_at(4, 1).unwrap();
        assert_eq!(mapping.map(0), Some(0));
        assert_eq!(mapping.map(1), None);
        assert_eq!(mapping.map(2), Some(1));
        assert_eq!(mapping.map(3), Some(2));
        assert_eq!(mapping.new_size(), 3);
    }

    #[test]
    fn remove_missing_item_is_rejected() {
        assert!(IndexMapping::remove_at(2, 2).is_err());
        assert!(IndexMapping::remove_at(0, 0).is_err());
    }

    #[test]
    fn new_rejects_out_of_range_targets() {
        assert!(IndexMapping::new(vec![Some(0), Some(2)], 2).is_err());
    }

    #[test]
    fn new_rejects_shared_targets() {
        assert!(IndexMapping::new(vec![Some(1), Some(1)], 2).is_err());
    }

    #[test]
    fn new_accepts_permutations() {
        let mapping = IndexMapping::new(vec![Some(1), Some(0)], 2).unwrap();
        assert_eq!(mapping.map(0), Some(1));
    }

    #[test]
    fn project_moves_items_and_fills_gaps() {
        let mapping = IndexMapping::insert_at(2, 1).unwrap();
        let names = mapping.project(vec!["a", "c"], |_| "new");
        assert_eq!(names, vec!["a", "new", "c"]);
    }

    #[test]
    fn project_drops_removed_items() {
        let mapping = IndexMapping::remove_at(3, 0).unwrap();
        let names = mapping.project(vec!["a", "b", "c"], |_| "unused");
        assert_eq!(names, vec!["b", "c"]);
    }
}
