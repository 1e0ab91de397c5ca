// Copyright (c) 2026 rezky_nightky

use std::sync::Arc;

use crossbeam_channel::Receiver;

use crate::column::ColumnTable;
use crate::runtime::Size;

/// Applies width changes from the event loop to the column table.
pub struct ResizeCoordinator {
    table: Arc<ColumnTable>,
    last_width: u16,
}

impl ResizeCoordinator {
    pub fn new(table: Arc<ColumnTable>, initial_width: u16) -> Self {
        Self {
            table,
            last_width: initial_width,
        }
    }

    /// Returns whether the table was resized. Height-only changes are ignored.
    pub fn apply(&mut self, size: Size) -> bool {
        if size.width == self.last_width {
            return false;
        }
        tracing::debug!(
            from = self.last_width,
            to = size.width,
            "resizing column table"
        );
        self.table.resize(size.width as usize);
        self.last_width = size.width;
        true
    }

    /// Consumes notifications until every sender is gone.
    pub fn run(mut self, notifications: Receiver<Size>) {
        for size in notifications.iter() {
            self.apply(size);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::stream::Stream;

    #[test]
    fn only_width_changes_touch_the_table() {
        let table = Arc::new(ColumnTable::new(10));
        table.with_lock(|cols| {
            if let Some(slot) = cols.slot_mut(9) {
                *slot = Some(Stream::new(9, 4));
            }
        });
        let mut rc = ResizeCoordinator::new(Arc::clone(&table), 10);

        assert!(!rc.apply(Size::new(10, 99)));
        assert!(table.with_lock(|cols| cols.is_occupied(9)));

        assert!(rc.apply(Size::new(15, 30)));
        assert_eq!(table.len(), 15);
        assert!(table.with_lock(|cols| cols.is_occupied(9)));

        assert!(rc.apply(Size::new(5, 30)));
        assert!(!rc.apply(Size::new(5, 40)));
        assert_eq!(table.len(), 5);
        assert_eq!(table.with_lock(|cols| cols.occupied()), 0);
    }

    #[test]
    fn run_drains_queue_and_exits_when_sender_drops() {
        let table = Arc::new(ColumnTable::new(4));
        let rc = ResizeCoordinator::new(Arc::clone(&table), 4);
        let (tx, rx) = crossbeam_channel::bounded(0);
        let handle = thread::spawn(move || rc.run(rx));

        for w in [8u16, 8, 3, 12] {
            tx.send(Size::new(w, 10)).unwrap();
        }
        drop(tx);
        handle.join().unwrap();
        assert_eq!(table.len(), 12);
    }
}
