//! Status overlay redrawn in place on a terminal.

use std::io::Write;

use crossterm::cursor::MoveToPreviousLine;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use super::{RenderError, RenderPort};
use crate::binder::SceneFrame;
use crate::setup::Scene;

/// Writes the telemetry block, replacing the previous one.
pub struct TerminalRenderer<W: Write> {
    out: W,
    redraw_every: u64,
    lines_drawn: u16,
    header_drawn: bool,
}

impl<W: Write> TerminalRenderer<W> {
    /// Redraw on every `redraw_every`-th tick; `0` is treated as `1`.
    pub fn new(out: W, redraw_every: u64) -> Self {
        Self {
            out,
            redraw_every: redraw_every.max(1),
            lines_drawn: 0,
            header_drawn: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, scene: &Scene, status: &str) -> Result<(), RenderError> {
        if !self.header_drawn {
            queue!(self.out, Print(format!("{}\n\n", scene.viewport.title)))?;
            self.header_drawn = true;
        }
        if self.lines_drawn > 0 {
            queue!(
                self.out,
                MoveToPreviousLine(self.lines_drawn),
                Clear(ClearType::FromCursorDown)
            )?;
        }
        for line in status.lines() {
            queue!(self.out, Print(line), Print("\n"))?;
        }
        self.lines_drawn = status.lines().count() as u16;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> RenderPort for TerminalRenderer<W> {
    fn render(&mut self, scene: &Scene, frame: &SceneFrame<'_>) -> Result<(), RenderError> {
        if frame.tick == 1 || frame.tick % self.redraw_every == 0 {
            self.draw(scene, &frame.status)?;
        }
        Ok(())
    }

    fn finish(&mut self, scene: &Scene, frame: &SceneFrame<'_>) -> Result<(), RenderError> {
        self.draw(scene, &frame.status)
    }
}
