//! PNG snapshots of the 3D scene drawn with plotters.

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use sail_core::vector::{Vector3, add, normalize};
use tracing::debug;

use super::{RenderError, RenderPort};
use crate::binder::SceneFrame;
use crate::setup::{Rgb, Scene};

/// Writes one PNG every `frame_every` ticks plus one for the final frame.
#[derive(Debug)]
pub struct PlotRenderer {
    dir: PathBuf,
    width: u32,
    height: u32,
    frame_every: u64,
    labels: bool,
    written: Vec<PathBuf>,
}

impl PlotRenderer {
    /// Creates `dir` if needed. `frame_every` of `0` is treated as `1`.
    pub fn new(dir: impl Into<PathBuf>, width: u32, height: u32, frame_every: u64) -> Result<Self, RenderError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            width,
            height,
            frame_every: frame_every.max(1),
            labels: true,
            written: Vec::new(),
        })
    }

    /// Toggle text drawing (labels and the telemetry overlay). Text needs a system font.
    pub fn with_labels(mut self, labels: bool) -> Self {
        self.labels = labels;
        self
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn snapshot(&mut self, scene: &Scene, frame: &SceneFrame<'_>, path: PathBuf) -> Result<(), RenderError> {
        draw_frame(&path, (self.width, self.height), scene, frame, self.labels)?;
        debug!(path = %path.display(), tick = frame.tick, "frame written");
        self.written.push(path);
        Ok(())
    }
}

impl RenderPort for PlotRenderer {
    fn render(&mut self, scene: &Scene, frame: &SceneFrame<'_>) -> Result<(), RenderError> {
        if frame.tick % self.frame_every != 0 {
            return Ok(());
        }
        let path = self.dir.join(format!("frame_{:08}.png", frame.tick));
        self.snapshot(scene, frame, path)
    }

    fn finish(&mut self, scene: &Scene, frame: &SceneFrame<'_>) -> Result<(), RenderError> {
        let name = if frame.arrived { "arrival.png" } else { "final.png" };
        let path = self.dir.join(name);
        self.snapshot(scene, frame, path)
    }
}

fn draw_err<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Draw(err.to_string())
}

fn color(rgb: Rgb) -> RGBColor {
    let c = |v: f64| (v.clamp(0.0, 1.0) * 255.0) as u8;
    RGBColor(c(rgb[0]), c(rgb[1]), c(rgb[2]))
}

fn point(v: &Vector3) -> (f64, f64, f64) {
    (v[0], v[1], v[2])
}

/// The planet label stays where the planet started; it does not follow the orbit.
fn label_anchor(scene: &Scene) -> Vector3 {
    add(&scene.planet.position, &scene.planet_label.offset)
}

fn select_font_family() -> FontFamily<'static> {
    if cfg!(target_os = "macos") {
        FontFamily::Name("Helvetica")
    } else if cfg!(target_os = "windows") {
        FontFamily::Name("Arial")
    } else {
        FontFamily::Name("DejaVu Sans")
    }
}

fn draw_frame(
    path: &Path,
    size: (u32, u32),
    scene: &Scene,
    frame: &SceneFrame<'_>,
    labels: bool,
) -> Result<(), RenderError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&color(scene.viewport.background)).map_err(draw_err)?;

    let range = scene.viewport.range;
    let center = frame.camera_center;
    let x_window = (center[0] - range)..(center[0] + range);
    let y_window = (center[1] - range)..(center[1] + range);
    let z_window = (center[2] - range)..(center[2] + range);
    // Pixels per scene unit, used to size spheres.
    let px_per_unit = f64::from(size.0.min(size.1)) / (2.0 * range);
    let px = |radius: f64| ((radius * px_per_unit).round() as i32).max(1);
    let in_window = |v: &Vector3| x_window.contains(&v[0]);

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .build_cartesian_3d(x_window.clone(), y_window, z_window)
        .map_err(draw_err)?;
    let forward = normalize(&scene.viewport.forward);
    chart.with_projection(|mut pb| {
        pb.yaw = forward[2].atan2(-forward[0]) + 0.5;
        pb.pitch = (-forward[1]).asin() + 0.15;
        pb.scale = 0.9;
        pb.into_matrix()
    });

    chart
        .draw_series(
            scene
                .stars
                .iter()
                .filter(|star| in_window(&star.position))
                .map(|star| {
                    Circle::new(
                        point(&star.position),
                        px(star.radius),
                        color(star.color).mix(star.opacity).filled(),
                    )
                }),
        )
        .map_err(draw_err)?;

    for body in [&scene.halo, &scene.proxima] {
        if (body.position[0] - center[0]).abs() <= range + body.radius {
            chart
                .draw_series(std::iter::once(Circle::new(
                    point(&body.position),
                    px(body.radius),
                    color(body.color).mix(body.opacity).filled(),
                )))
                .map_err(draw_err)?;
        }
    }

    let trail_style = ShapeStyle::from(&color(scene.planet.color).mix(0.5)).stroke_width(1);
    chart
        .draw_series(std::iter::once(PathElement::new(
            frame.planet_trail.iter().filter(|p| in_window(*p)).map(point).collect::<Vec<_>>(),
            trail_style,
        )))
        .map_err(draw_err)?;
    if in_window(&frame.planet) {
        chart
            .draw_series(std::iter::once(Circle::new(
                point(&frame.planet),
                px(scene.planet.radius),
                color(scene.planet.color).filled(),
            )))
            .map_err(draw_err)?;
    }

    if frame.beam.visible {
        let beam_end = add(&frame.beam.origin, &frame.beam.axis);
        let beam_style = ShapeStyle::from(&color(scene.laser.color).mix(scene.laser.opacity))
            .stroke_width(px(scene.laser.radius) as u32);
        chart
            .draw_series(std::iter::once(PathElement::new(
                vec![point(&frame.beam.origin), point(&beam_end)],
                beam_style,
            )))
            .map_err(draw_err)?;
    }

    let sail_trail_style = ShapeStyle::from(&color(scene.sail.color).mix(0.4)).stroke_width(1);
    chart
        .draw_series(std::iter::once(PathElement::new(
            frame.sail_trail.iter().filter(|p| in_window(*p)).map(point).collect::<Vec<_>>(),
            sail_trail_style,
        )))
        .map_err(draw_err)?;

    // The cone is drawn as its base disc plus a thick spine towards the payload.
    let sail_color = color(scene.sail.color);
    chart
        .draw_series(std::iter::once(Circle::new(
            point(&frame.sail),
            px(scene.sail.radius),
            sail_color.mix(0.8).filled(),
        )))
        .map_err(draw_err)?;
    chart
        .draw_series(std::iter::once(PathElement::new(
            vec![point(&frame.sail), point(&frame.payload)],
            ShapeStyle::from(&sail_color).stroke_width(px(scene.sail.radius * 0.5) as u32),
        )))
        .map_err(draw_err)?;
    chart
        .draw_series(std::iter::once(Circle::new(
            point(&frame.payload),
            px(scene.sail.payload_radius),
            color(scene.sail.payload_color).filled(),
        )))
        .map_err(draw_err)?;

    if labels {
        let family = select_font_family();
        let anchor = label_anchor(scene);
        if in_window(&anchor) {
            let label_font = FontDesc::new(family, 16.0, FontStyle::Normal)
                .color(&color(scene.planet_label.color));
            chart
                .draw_series(std::iter::once(Text::new(
                    scene.planet_label.text.clone(),
                    point(&anchor),
                    label_font,
                )))
                .map_err(draw_err)?;
        }

        let overlay_font = FontDesc::new(family, 16.0, FontStyle::Normal).color(&WHITE);
        for (i, line) in frame.status.lines().enumerate() {
            root.draw(&Text::new(
                line.to_string(),
                (16, 16 + 20 * i as i32),
                overlay_font.clone(),
            ))
            .map_err(draw_err)?;
        }
    }

    root.present().map_err(draw_err)?;
    Ok(())
}
