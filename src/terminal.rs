// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Stdout, Write};

use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal, ExecutableCommand, QueueableCommand,
};

use crate::cell::{Cell, Style};
use crate::error::Result;
use crate::frame::Frame;
use crate::runtime::Size;
use crate::surface::Surface;

/// Raw-mode alternate screen. Restores the terminal on drop.
pub struct Terminal {
    stdout: Stdout,
    last_size: Option<(u16, u16)>,
    cur_style: Option<Style>,
    run_buf: String,
}

impl Terminal {
    pub fn new() -> std::io::Result<Self> {
        let mut out = stdout();
        terminal::enable_raw_mode()?;
        let init_res: std::io::Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(terminal::Clear(terminal::ClearType::All))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self {
            stdout: out,
            last_size: None,
            cur_style: None,
            run_buf: String::with_capacity(64),
        })
    }

    pub fn size(&self) -> std::io::Result<(u16, u16)> {
        terminal::size()
    }

    fn queue_style(&mut self, style: Style) -> std::io::Result<()> {
        if self.cur_style == Some(style) {
            return Ok(());
        }
        self.stdout
            .queue(SetForegroundColor(style.fg.unwrap_or(Color::Reset)))?;
        self.stdout
            .queue(SetBackgroundColor(style.bg.unwrap_or(Color::Reset)))?;
        self.cur_style = Some(style);
        Ok(())
    }

    /// Writes the frame's dirty cells, or every cell after a size change.
    pub fn draw(&mut self, frame: &mut Frame) -> std::io::Result<()> {
        let size_changed = self.last_size != Some((frame.width, frame.height));
        self.cur_style = None;

        if size_changed || frame.is_dirty_all() {
            if size_changed {
                self.stdout
                    .queue(terminal::Clear(terminal::ClearType::All))?;
                self.last_size = Some((frame.width, frame.height));
            }
            for y in 0..frame.height {
                self.stdout.queue(cursor::MoveTo(0, y))?;
                for x in 0..frame.width {
                    let cell = frame.get(x, y).copied().unwrap_or_else(Cell::blank);
                    self.queue_style(cell.style)?;
                    self.stdout.queue(Print(cell.ch))?;
                }
            }
        } else {
            frame.sort_dirty();
            let width = frame.width as usize;
            let dirty = frame.dirty_indices();
            let mut i = 0usize;
            while i < dirty.len() {
                let idx0 = dirty[i];
                let cell0 = frame.cell_at_index(idx0);

                // coalesce horizontally adjacent cells sharing a style
                self.run_buf.clear();
                self.run_buf.push(cell0.ch);
                let mut last = idx0;
                let mut j = i + 1;
                while j < dirty.len() {
                    let idx1 = dirty[j];
                    let cell1 = frame.cell_at_index(idx1);
                    if idx1 != last + 1 || idx1 % width == 0 || cell1.style != cell0.style {
                        break;
                    }
                    self.run_buf.push(cell1.ch);
                    last = idx1;
                    j += 1;
                }

                let x0 = (idx0 % width) as u16;
                let y0 = (idx0 / width) as u16;
                self.stdout.queue(cursor::MoveTo(x0, y0))?;
                self.queue_style(cell0.style)?;
                self.stdout.queue(Print(self.run_buf.as_str()))?;
                i = j;
            }
        }

        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        frame.clear_dirty();
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.stdout.execute(SetAttribute(Attribute::Reset));
        let _ = self.stdout.execute(ResetColor);
        let _ = self.stdout.execute(cursor::Show);
        let _ = self.stdout.execute(terminal::EnableLineWrap);
        let _ = self.stdout.execute(terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        let _ = self.stdout.flush();
    }
}

pub fn restore_terminal_best_effort() {
    let mut out = stdout();
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
    let _ = out.flush();
}

/// The crossterm-backed [`Surface`]: a terminal plus the frame it mirrors.
pub struct Screen {
    term: Terminal,
    frame: Frame,
}

impl Screen {
    pub fn new() -> std::io::Result<Self> {
        let term = Terminal::new()?;
        let (w, h) = term.size()?;
        Ok(Self {
            term,
            frame: Frame::new(w, h),
        })
    }
}

impl Surface for Screen {
    fn size(&self) -> Size {
        Size::new(self.frame.width, self.frame.height)
    }

    fn resize(&mut self, size: Size) {
        self.frame.resize(size.width, size.height);
    }

    fn set_cell(&mut self, col: u16, row: u16, glyph: char, style: Style) {
        self.frame.set(col, row, Cell::new(glyph, style));
    }

    fn clear(&mut self) {
        self.frame.clear();
    }

    fn flush(&mut self) -> Result<()> {
        if self.frame.is_dirty_all() || !self.frame.dirty_indices().is_empty() {
            self.term.draw(&mut self.frame)?;
        }
        Ok(())
    }
}
