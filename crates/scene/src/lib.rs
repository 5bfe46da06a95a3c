//! Scene construction and binding for the light sail animation.
//!
//! [`Scene`] is built once and never changes. [`SceneBinder`] turns per-tick [`Telemetry`]
//! into a [`SceneFrame`], which any [`RenderPort`] can present.

pub mod binder;
pub mod render;
pub mod setup;

pub use binder::{
    ARRIVAL_MESSAGE, BeamFrame, SceneBinder, SceneFrame, Telemetry, orbit_position, scientific,
    status_text,
};
pub use render::{
    NullRenderer, PlotRenderer, RenderError, RenderFanout, RenderPort, TerminalRenderer,
};
pub use setup::{Scene, SceneOptions};
