// Copyright (c) 2026 rezky_nightky

use std::sync::{Mutex, PoisonError};

use crate::stream::Stream;

/// Per-column stream slots behind one coarse lock.
///
/// Every access, reads included, goes through [`ColumnTable::with_lock`]:
/// a resize may truncate the storage, so no slot reference can outlive the
/// guard.
#[derive(Debug)]
pub struct ColumnTable {
    slots: Mutex<Columns>,
}

/// The locked view of the table. Only reachable inside `with_lock`.
#[derive(Debug, Default)]
pub struct Columns {
    slots: Vec<Option<Stream>>,
}

impl Columns {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn get(&self, col: usize) -> Option<&Stream> {
        self.slots.get(col).and_then(Option::as_ref)
    }

    #[allow(dead_code)]
    pub fn is_occupied(&self, col: usize) -> bool {
        self.get(col).is_some()
    }

    pub fn slot_mut(&mut self, col: usize) -> Option<&mut Option<Stream>> {
        self.slots.get_mut(col)
    }

    pub fn slots_mut(&mut self) -> std::slice::IterMut<'_, Option<Stream>> {
        self.slots.iter_mut()
    }

    #[allow(dead_code)]
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    fn resize(&mut self, width: usize) {
        // grow appends empty slots, shrink drops trailing streams
        self.slots.resize(width, None);
    }
}

impl ColumnTable {
    pub fn new(width: usize) -> Self {
        Self {
            slots: Mutex::new(Columns {
                slots: vec![None; width],
            }),
        }
    }

    /// Runs `f` with exclusive access to every slot. The guard is released
    /// on every exit path, unwinding included; a poisoned lock is recovered
    /// since the slots carry no cross-slot invariant a panic could break.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut Columns) -> R) -> R {
        let mut guard = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn resize(&self, width: usize) {
        self.with_lock(|cols| {
            if cols.len() != width {
                cols.resize(width);
            }
        });
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.with_lock(|cols| cols.len())
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use super::*;

    fn seeded(width: usize) -> ColumnTable {
        let table = ColumnTable::new(width);
        table.with_lock(|cols| {
            for (i, slot) in cols.slots_mut().enumerate() {
                *slot = Some(Stream::new(i as u16, 10 + i as u32));
            }
        });
        table
    }

    fn snapshot(table: &ColumnTable) -> Vec<Option<Stream>> {
        table.with_lock(|cols| (0..cols.len()).map(|i| cols.get(i).copied()).collect())
    }

    #[test]
    fn new_table_has_one_empty_slot_per_column() {
        let table = ColumnTable::new(7);
        assert_eq!(table.len(), 7);
        assert_eq!(table.with_lock(|cols| cols.occupied()), 0);
    }

    #[test]
    fn growing_keeps_existing_streams_and_appends_empty_slots() {
        let table = seeded(10);
        let before = snapshot(&table);

        table.resize(15);

        let after = snapshot(&table);
        assert_eq!(after.len(), 15);
        assert_eq!(&after[..10], &before[..]);
        assert!(after[10..].iter().all(Option::is_none));
    }

    #[test]
    fn shrinking_discards_trailing_streams_only() {
        let table = seeded(10);
        let before = snapshot(&table);

        table.resize(5);

        let after = snapshot(&table);
        assert_eq!(after, before[..5].to_vec());

        table.resize(10);
        assert!(snapshot(&table)[5..].iter().all(Option::is_none));
    }

    #[test]
    fn resize_to_same_width_is_a_no_op() {
        let table = seeded(8);
        let before = snapshot(&table);
        table.resize(8);
        table.resize(8);
        assert_eq!(snapshot(&table), before);
    }

    #[test]
    fn lock_is_released_after_a_panicking_closure() {
        let table = seeded(3);
        let res = catch_unwind(AssertUnwindSafe(|| {
            table.with_lock(|_| panic!("boom"));
        }));
        assert!(res.is_err());
        assert_eq!(table.len(), 3);
        table.resize(4);
        assert_eq!(table.len(), 4);
    }
}
