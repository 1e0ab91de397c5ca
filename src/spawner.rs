// Copyright (c) 2026 rezky_nightky

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::select;
use rand::Rng;

use crate::column::ColumnTable;
use crate::runtime::{SharedSize, Shutdown};
use crate::stream::Stream;

/// Seeds new streams into free columns, one attempt per tick.
pub struct Spawner {
    table: Arc<ColumnTable>,
    size: Arc<SharedSize>,
    base_length: u32,
    length_jitter: u32,
}

impl Spawner {
    pub fn new(
        table: Arc<ColumnTable>,
        size: Arc<SharedSize>,
        base_length: u32,
        length_jitter: u32,
    ) -> Self {
        Self {
            table,
            size,
            base_length,
            length_jitter,
        }
    }

    fn roll_length<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        let jitter = if self.length_jitter == 0 {
            0
        } else {
            rng.random_range(0..self.length_jitter)
        };
        self.base_length.saturating_add(jitter)
    }

    /// Starts a stream in `col` unless one is already live there or the
    /// column is outside the table. Returns whether a stream was created.
    pub fn try_spawn<R: Rng + ?Sized>(&self, col: usize, rng: &mut R) -> bool {
        let length = self.roll_length(rng);
        self.table.with_lock(|cols| {
            let Some(slot) = cols.slot_mut(col) else {
                return false;
            };
            if slot.is_some() {
                return false;
            }
            *slot = Some(Stream::new(col as u16, length));
            true
        })
    }

    /// One spawner tick: a single attempt at a uniformly random column.
    /// An occupied column is not retried until the next tick.
    pub fn tick<R: Rng + ?Sized>(&self, rng: &mut R) -> bool {
        let width = self.size.get().width as usize;
        if width == 0 {
            return false;
        }
        let col = rng.random_range(0..width);
        self.try_spawn(col, rng)
    }

    pub fn run(self, interval: Duration, shutdown: Shutdown) {
        let mut rng = rand::rng();
        let ticker = crossbeam_channel::tick(interval);
        loop {
            select! {
                recv(shutdown.signal()) -> _ => break,
                recv(ticker) -> _ => {
                    if self.tick(&mut rng) {
                        tracing::trace!("spawned stream");
                    }
                }
            }
        }
    }
}
