//! World <-> screen mapping for a 2D plot view, plus auto-fit and the
//! dynamic grid.
//!
//! Screen space is in pixels with y pointing down; world space has y
//! pointing up. `plot_center` is the world point shown at the middle of
//! the view.

use crate::geom::{BBox2, Vec2};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Pick distance for hit-testing, in pixels.
pub const HIT_RADIUS_PX: f64 = 16.0;

/// Zoom factor applied per mouse-wheel notch.
pub const WHEEL_ZOOM_STEP: f64 = 1.1;

/// Fallback fit rectangle (x, y, width, height) for empty or degenerate data.
pub const DEFAULT_FIT_RECT: (f64, f64, f64, f64) = (-1.0, -1.0, 11.0, 11.0);

const FIT_MARGIN: f64 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewOptions {
    pub draw_axis: bool,
    pub draw_grid: bool,
    /// Keep one world unit the same number of pixels on both axes.
    pub maintain_aspect: bool,
    pub grid_division_major: f64,
    pub grid_division_minor: f64,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            draw_axis: true,
            draw_grid: true,
            maintain_aspect: true,
            grid_division_major: 10.0,
            grid_division_minor: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewSize {
    pub width: f64,
    pub height: f64,
}

impl ViewSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn half(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// The capability the rest of the system needs from a renderer: mapping
/// points between screen and world space. Drawing is left to the caller.
pub trait ScreenTransform {
    fn point_to_world(&self, screen: Vec2) -> Vec2;
    fn point_to_screen(&self, world: Vec2) -> Vec2;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSteps {
    pub major: f64,
    pub minor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineOrientation {
    /// Constant x.
    Vertical,
    /// Constant y.
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub orientation: LineOrientation,
    /// The constant world coordinate of the line.
    pub coordinate: f64,
    pub major: bool,
    /// Extent along the other axis.
    pub from: f64,
    pub to: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    pub plot_scale: Vec2,
    pub plot_center: Vec2,
    pub view_size: ViewSize,
    pub options: ViewOptions,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewSize::new(100.0, 100.0))
    }
}

impl ScreenTransform for Viewport {
    fn point_to_world(&self, screen: Vec2) -> Vec2 {
        let offset = (screen - self.view_size.half()) / self.plot_scale;
        Vec2::new(offset.x, -offset.y) + self.plot_center
    }

    fn point_to_screen(&self, world: Vec2) -> Vec2 {
        let offset = (world - self.plot_center) * self.plot_scale;
        Vec2::new(offset.x, -offset.y) + self.view_size.half()
    }
}

impl Viewport {
    pub fn new(view_size: ViewSize) -> Self {
        Self {
            plot_scale: Vec2::new(1.0, 1.0),
            plot_center: Vec2::ZERO,
            view_size,
            options: ViewOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ViewOptions) -> Self {
        self.options = options;
        self
    }

    /// Screen position truncated to whole pixels.
    pub fn point_to_pixel(&self, world: Vec2) -> (i64, i64) {
        let s = self.point_to_screen(world);
        (s.x as i64, s.y as i64)
    }

    /// World-space size of the whole view.
    pub fn plot_size(&self) -> Vec2 {
        Vec2::new(
            self.view_size.width / self.plot_scale.x,
            self.view_size.height / self.plot_scale.y,
        )
    }

    pub fn plot_min_x(&self) -> f64 {
        self.plot_center.x - self.plot_size().x / 2.0
    }

    pub fn plot_max_x(&self) -> f64 {
        self.plot_center.x + self.plot_size().x / 2.0
    }

    pub fn plot_min_y(&self) -> f64 {
        self.plot_center.y - self.plot_size().y / 2.0
    }

    pub fn plot_max_y(&self) -> f64 {
        self.plot_center.y + self.plot_size().y / 2.0
    }

    pub fn visible_bounds(&self) -> BBox2 {
        BBox2::new(
            Vec2::new(self.plot_min_x(), self.plot_min_y()),
            Vec2::new(self.plot_max_x(), self.plot_max_y()),
        )
    }

    /// World units per pixel, on the finer axis.
    pub fn pixel_size(&self) -> f64 {
        1.0 / self.plot_scale.x.min(self.plot_scale.y)
    }

    pub fn hit_radius(&self) -> f64 {
        HIT_RADIUS_PX * self.pixel_size()
    }

    /// Fits the view to `bounds` with a margin on every side.
    pub fn auto_scale_for_points(&mut self, bounds: BBox2) {
        let degenerate = bounds.width() == 0.0 && bounds.height() == 0.0;
        let bounds = if degenerate || !bounds.is_finite() {
            warn!(?bounds, "no usable bounds to fit, using default rectangle");
            let (x, y, w, h) = DEFAULT_FIT_RECT;
            BBox2::from_xywh(x, y, w, h)
        } else {
            // Without a shared scale a flat extent would give an infinite
            // scale on its axis, so it borrows the other extent.
            let mut fit = bounds;
            if !self.options.maintain_aspect {
                if fit.width() == 0.0 {
                    let half = fit.height() / 2.0;
                    fit.min.x -= half;
                    fit.max.x += half;
                } else if fit.height() == 0.0 {
                    let half = fit.width() / 2.0;
                    fit.min.y -= half;
                    fit.max.y += half;
                }
            }
            fit.inflate(fit.width() * FIT_MARGIN, fit.height() * FIT_MARGIN)
        };

        let mut x_scale = self.view_size.width / bounds.width();
        let mut y_scale = self.view_size.height / bounds.height();
        if self.options.maintain_aspect {
            let scale = x_scale.min(y_scale);
            x_scale = scale;
            y_scale = scale;
        }

        self.plot_scale = Vec2::new(x_scale, y_scale);
        self.plot_center = bounds.center();
        debug!(
            scale_x = x_scale,
            scale_y = y_scale,
            center_x = self.plot_center.x,
            center_y = self.plot_center.y,
            "viewport fitted"
        );
    }

    /// Scales by `factor` while keeping the world point under `screen` in place.
    pub fn zoom_at(&mut self, screen: Vec2, factor: f64) {
        let before = self.point_to_world(screen);
        self.plot_scale = self.plot_scale * factor;
        let after = self.point_to_world(screen);
        self.plot_center += before - after;
    }

    pub fn zoom_wheel(&mut self, screen: Vec2, delta: i32) {
        if delta == 0 {
            return;
        }
        let factor = if delta < 0 {
            1.0 / WHEEL_ZOOM_STEP
        } else {
            WHEEL_ZOOM_STEP
        };
        self.zoom_at(screen, factor);
    }

    /// Drags the view content by a pixel offset.
    pub fn pan_pixels(&mut self, dx: f64, dy: f64) {
        self.plot_center += Vec2::new(dx / -self.plot_scale.x, dy / self.plot_scale.y);
    }

    pub fn grid_steps(&self) -> GridSteps {
        let size = self.plot_size();
        let max_dim = size.x.max(size.y);
        let digits = max_dim.log10().trunc() as i32;
        let major = self.options.grid_division_major.powi(digits);
        GridSteps {
            major,
            minor: major / self.options.grid_division_minor,
        }
    }

    /// Grid lines for the visible range, anchored on the world origin so
    /// panning never shifts them relative to the geometry.
    pub fn grid_lines(&self) -> Vec<GridLine> {
        if !self.options.draw_axis && !self.options.draw_grid {
            return Vec::new();
        }

        let steps = self.grid_steps();
        if !(steps.minor.is_finite() && steps.minor > 0.0) {
            return Vec::new();
        }

        let (span_x, span_y) = if self.options.draw_grid {
            (
                (self.plot_min_x(), self.plot_max_x()),
                (self.plot_min_y(), self.plot_max_y()),
            )
        } else {
            ((-steps.minor, steps.minor), (-steps.minor, steps.minor))
        };

        let size = self.plot_size();
        let mut lines = self.grid_axis(
            LineOrientation::Vertical,
            self.plot_min_x(),
            size.x,
            steps.minor,
            span_y,
        );
        lines.extend(self.grid_axis(
            LineOrientation::Horizontal,
            self.plot_min_y(),
            size.y,
            steps.minor,
            span_x,
        ));
        lines
    }

    fn grid_axis(
        &self,
        orientation: LineOrientation,
        plot_min: f64,
        plot_size: f64,
        minor: f64,
        (from, to): (f64, f64),
    ) -> Vec<GridLine> {
        let per_major = self.options.grid_division_minor.round() as i64;
        let first = (plot_min / minor).floor() as i64;
        let count = (plot_size / minor) as i64 + 2;

        (first..first + count)
            .map(|step| GridLine {
                orientation,
                coordinate: step as f64 * minor,
                major: per_major > 0 && step.rem_euclid(per_major) == 0,
                from,
                to,
            })
            .collect()
    }

    /// Origin axis segments across the visible range, x axis first.
    pub fn axis_lines(&self) -> Vec<(Vec2, Vec2)> {
        if !self.options.draw_axis {
            return Vec::new();
        }
        vec![
            (
                Vec2::new(self.plot_min_x(), 0.0),
                Vec2::new(self.plot_max_x(), 0.0),
            ),
            (
                Vec2::new(0.0, self.plot_min_y()),
                Vec2::new(0.0, self.plot_max_y()),
            ),
        ]
    }

    pub fn status_bounds(&self) -> String {
        format!(
            "X: [{:.3}, {:.3}] - Y: [{:.3}, {:.3}]",
            self.plot_min_x(),
            self.plot_max_x(),
            self.plot_min_y(),
            self.plot_max_y()
        )
    }

    pub fn status_size(&self) -> String {
        let size = self.plot_size();
        format!("{:.3}x{:.3}", size.x, size.y)
    }
}
