// Copyright (c) 2026 rezky_nightky

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::select;
use rand::Rng;

use crate::charset::Glyphs;
use crate::column::ColumnTable;
use crate::palette::Palette;
use crate::runtime::{SharedSize, Shutdown};
use crate::surface::Surface;

/// Advances every live stream once per tick and paints the result.
/// The only writer of the surface.
pub struct Simulator<S: Surface> {
    surface: S,
    table: Arc<ColumnTable>,
    size: Arc<SharedSize>,
    glyphs: Glyphs,
    palette: Palette,
}

impl<S: Surface> Simulator<S> {
    pub fn new(
        surface: S,
        table: Arc<ColumnTable>,
        size: Arc<SharedSize>,
        glyphs: Glyphs,
        palette: Palette,
    ) -> Self {
        Self {
            surface,
            table,
            size,
            glyphs,
            palette,
        }
    }

    #[allow(dead_code)]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Shows the frame prepared by the previous tick.
    pub fn flush(&mut self) {
        if let Err(e) = self.surface.flush() {
            tracing::warn!(error = %e, "frame flush failed");
        }
    }

    /// One simulation step over the whole table under a single lock.
    /// Returns the number of streams that finished this tick.
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) -> usize {
        let size = self.size.get();
        if self.surface.size() != size {
            self.surface.resize(size);
        }

        let surface = &mut self.surface;
        let glyphs = &self.glyphs;
        let palette = self.palette;
        self.table.with_lock(|cols| {
            // the event loop publishes a new width before the table catches up
            let width = (size.width as usize).min(cols.len());
            let mut finished = 0;
            for slot in cols.slots_mut().take(width) {
                let Some(stream) = slot.as_mut() else {
                    continue;
                };
                let col = stream.column();
                let step = stream.advance(size.height);
                if let Some(row) = step.painted {
                    surface.set_cell(col, row, glyphs.pick(rng), palette.active);
                }
                if let Some(row) = step.erased {
                    surface.set_cell(col, row, ' ', palette.blank);
                }
                if step.finished {
                    *slot = None;
                    finished += 1;
                }
            }
            finished
        })
    }

    /// Flushes, sleeps one interval, advances; until shutdown. Hands the
    /// surface back so the caller decides when the display is released.
    pub fn run(mut self, interval: Duration, shutdown: Shutdown) -> S {
        let mut rng = rand::rng();
        self.surface.clear();
        let ticker = crossbeam_channel::tick(interval);
        loop {
            self.flush();
            select! {
                recv(shutdown.signal()) -> _ => break,
                recv(ticker) -> _ => {
                    let finished = self.advance(&mut rng);
                    if finished > 0 {
                        tracing::trace!(finished, "streams erased");
                    }
                }
            }
        }
        self.surface
    }
}
