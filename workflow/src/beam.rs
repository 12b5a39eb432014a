//! Beams: which connectors are lit, and where they are drawn.
//!
//! Activity is a pure selector over the animation step (`step >= threshold`)
//! and is never stored. Geometry is a pure function of the container and
//! anchor rectangles; [`BeamGeometry`] only caches the last result per input.

use serde::Serialize;

use crate::consts::{BEAM_COUNT, BEAM_CURVATURE};
use crate::palette::ColorGroup;
use crate::stage::Stage;

/// A beam endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Anchor {
    UserInterface,
    Stage(Stage),
}

/// A connector between two cards, lit from step `threshold` on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BeamSpec {
    pub from: Anchor,
    pub to: Anchor,
    pub threshold: usize,
    pub color: ColorGroup,
}

impl BeamSpec {
    #[must_use]
    pub const fn is_active(&self, step: usize) -> bool {
        step >= self.threshold
    }
}

const fn beam(from: Anchor, to: Stage, threshold: usize, color: ColorGroup) -> BeamSpec {
    BeamSpec { from, to: Anchor::Stage(to), threshold, color }
}

const fn stage(s: Stage) -> Anchor {
    Anchor::Stage(s)
}

pub const BEAMS: [BeamSpec; BEAM_COUNT] = [
    beam(Anchor::UserInterface, Stage::DataConnectors, 1, ColorGroup::Purple),
    beam(stage(Stage::DataConnectors), Stage::AIEngine, 2, ColorGroup::Blue),
    beam(stage(Stage::AIEngine), Stage::ManualTestCases, 3, ColorGroup::Pink),
    beam(stage(Stage::ManualTestCases), Stage::AzureDevOpsMCP, 4, ColorGroup::Green),
    beam(stage(Stage::TestConfig), Stage::PlaywrightMCP, 5, ColorGroup::Green),
    beam(stage(Stage::AzureDevOpsMCP), Stage::PlaywrightMCP, 6, ColorGroup::Blue),
    beam(stage(Stage::PlaywrightMCP), Stage::TestExecution, 7, ColorGroup::Blue),
];

/// Beams lit at `step`, in declaration order.
pub fn active_beams(step: usize) -> impl Iterator<Item = &'static BeamSpec> {
    BEAMS.iter().filter(move |b| b.is_active(step))
}

// ── Geometry ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// An axis-aligned rectangle in viewport coordinates, as reported by
/// `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point { x: self.left + self.width / 2.0, y: self.top + self.height / 2.0 }
    }
}

/// Shape tweaks for a beam. Offsets are added to the endpoint centers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamOptions {
    pub curvature: f64,
    pub start_offset: Point,
    pub end_offset: Point,
}

impl Default for BeamOptions {
    fn default() -> Self {
        Self { curvature: BEAM_CURVATURE, start_offset: Point::default(), end_offset: Point::default() }
    }
}

/// A quadratic curve relative to the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeamPath {
    pub start: Point,
    pub control: Point,
    pub end: Point,
    /// Container size, used as the SVG viewport.
    pub width: f64,
    pub height: f64,
}

impl BeamPath {
    /// SVG path data: `M sx,sy Q cx,cy ex,ey`.
    #[must_use]
    pub fn to_svg_d(&self) -> String {
        format!(
            "M {},{} Q {},{} {},{}",
            self.start.x, self.start.y, self.control.x, self.control.y, self.end.x, self.end.y
        )
    }
}

/// Path from the center of `from` to the center of `to`, relative to
/// `container`. The control point sits halfway across, raised by `curvature`.
#[must_use]
pub fn compute_path(container: Rect, from: Rect, to: Rect, opts: &BeamOptions) -> BeamPath {
    let a = from.center();
    let b = to.center();
    let start = Point { x: a.x - container.left + opts.start_offset.x, y: a.y - container.top + opts.start_offset.y };
    let end = Point { x: b.x - container.left + opts.end_offset.x, y: b.y - container.top + opts.end_offset.y };
    let control = Point { x: f64::midpoint(start.x, end.x), y: start.y - opts.curvature };
    BeamPath { start, control, end, width: container.width, height: container.height }
}

/// Last computed path, keyed by its inputs.
#[derive(Debug, Clone, Default)]
pub struct BeamGeometry {
    cached: Option<((Rect, Rect, Rect, BeamOptions), BeamPath)>,
}

impl BeamGeometry {
    /// Return the cached path when the inputs are unchanged, otherwise recompute.
    pub fn resolve(&mut self, container: Rect, from: Rect, to: Rect, opts: &BeamOptions) -> BeamPath {
        let key = (container, from, to, *opts);
        match self.cached {
            Some((cached_key, path)) if cached_key == key => path,
            _ => {
                let path = compute_path(container, from, to, opts);
                self.cached = Some((key, path));
                path
            }
        }
    }

    #[must_use]
    pub fn cached(&self) -> Option<BeamPath> {
        self.cached.map(|(_, path)| path)
    }
}

#[cfg(test)]
#[path = "beam_test.rs"]
mod beam_test;
