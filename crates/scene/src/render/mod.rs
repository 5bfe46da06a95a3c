//! Render ports consuming [`SceneFrame`]s.
//!
//! The flight loop only ever talks to [`RenderPort`]; concrete backends live in submodules.

pub mod plot;
pub mod terminal;

use thiserror::Error;

use crate::binder::SceneFrame;
use crate::setup::Scene;

pub use plot::PlotRenderer;
pub use terminal::TerminalRenderer;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render output failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("drawing failed: {0}")]
    Draw(String),
}

/// Sink for per-tick frames.
pub trait RenderPort {
    /// Present the frame produced by the current tick.
    fn render(&mut self, scene: &Scene, frame: &SceneFrame<'_>) -> Result<(), RenderError>;

    /// Present the last frame of the run. Called once, after the final `render`.
    fn finish(&mut self, scene: &Scene, frame: &SceneFrame<'_>) -> Result<(), RenderError> {
        self.render(scene, frame)
    }
}

/// Discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullRenderer;

impl RenderPort for NullRenderer {
    fn render(&mut self, _scene: &Scene, _frame: &SceneFrame<'_>) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Forwards each frame to several ports in order.
#[derive(Default)]
pub struct RenderFanout {
    ports: Vec<Box<dyn RenderPort>>,
}

impl RenderFanout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, port: Box<dyn RenderPort>) {
        self.ports.push(port);
    }

    pub fn len(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

impl RenderPort for RenderFanout {
    fn render(&mut self, scene: &Scene, frame: &SceneFrame<'_>) -> Result<(), RenderError> {
        for port in &mut self.ports {
            port.render(scene, frame)?;
        }
        Ok(())
    }

    fn finish(&mut self, scene: &Scene, frame: &SceneFrame<'_>) -> Result<(), RenderError> {
        for port in &mut self.ports {
            port.finish(scene, frame)?;
        }
        Ok(())
    }
}

impl<P: RenderPort + ?Sized> RenderPort for &mut P {
    fn render(&mut self, scene: &Scene, frame: &SceneFrame<'_>) -> Result<(), RenderError> {
        (**self).render(scene, frame)
    }

    fn finish(&mut self, scene: &Scene, frame: &SceneFrame<'_>) -> Result<(), RenderError> {
        (**self).finish(scene, frame)
    }
}
