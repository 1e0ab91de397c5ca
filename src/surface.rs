// Copyright (c) 2026 rezky_nightky

use crate::cell::Style;
use crate::error::Result;
use crate::runtime::Size;

/// A character grid the renderer draws into.
///
/// Writes outside the current size are dropped. Nothing reaches the
/// display until [`Surface::flush`].
pub trait Surface: Send {
    fn size(&self) -> Size;

    fn resize(&mut self, size: Size);

    fn set_cell(&mut self, col: u16, row: u16, glyph: char, style: Style);

    fn clear(&mut self);

    fn flush(&mut self) -> Result<()>;
}
