// Copyright (c) 2026 rezky_nightky

/// One rain trail falling down a single column.
///
/// A live stream always sits in a `Some` slot of the column table; a slot
/// holding `None` is free for the spawner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stream {
    column: u16,
    length: u32,
    head_pos: u32,
    head_done: bool,
    tail_pos: u32,
}

/// What one tick did to a stream. Rows are in display coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Step {
    pub painted: Option<u16>,
    pub erased: Option<u16>,
    pub finished: bool,
}

impl Stream {
    pub fn new(column: u16, length: u32) -> Self {
        Self {
            column,
            length,
            head_pos: 0,
            head_done: false,
            tail_pos: 0,
        }
    }

    pub fn column(&self) -> u16 {
        self.column
    }

    #[allow(dead_code)]
    pub fn length(&self) -> u32 {
        self.length
    }

    #[allow(dead_code)]
    pub fn head_pos(&self) -> u32 {
        self.head_pos
    }

    #[allow(dead_code)]
    pub fn head_done(&self) -> bool {
        self.head_done
    }

    #[allow(dead_code)]
    pub fn tail_pos(&self) -> u32 {
        self.tail_pos
    }

    fn erasing(&self) -> bool {
        self.tail_pos > 0 || self.head_pos >= self.length || self.head_done
    }

    /// Advances the trail by one tick against a display `height` rows tall.
    ///
    /// The head paints one row per tick until it passes the bottom, then
    /// freezes. The tail starts erasing once the whole length is painted or
    /// the head has reached the bottom (longer trails are clipped), and the
    /// stream finishes on the first tick after the tail has erased row
    /// `height - 1`.
    pub fn advance(&mut self, height: u16) -> Step {
        let height = height as u32;
        let mut step = Step::default();

        if !self.head_done && self.head_pos <= height {
            // head_pos <= height <= u16::MAX
            step.painted = Some(self.head_pos as u16);
            self.head_pos += 1;
        } else {
            self.head_done = true;
        }

        if self.erasing() {
            if self.tail_pos < height {
                step.erased = Some(self.tail_pos as u16);
                self.tail_pos += 1;
            } else {
                step.finished = true;
            }
        }

        step
    }
}
