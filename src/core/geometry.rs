//! Canvas coordinate math.
//!
//! Pure functions mapping between screen space (raw pointer coordinates)
//! and world space (document coordinates), given the current pan offset and
//! zoom factor. The transform and its inverse round-trip exactly within
//! floating-point tolerance, and grid snapping is idempotent.

use serde::{Deserialize, Serialize};

/// Grid quantum that dragged table positions are rounded to.
pub const SNAP_SIZE: f64 = 20.0;

/// Lower zoom bound.
pub const MIN_ZOOM: f64 = 0.1;

/// Upper zoom bound.
pub const MAX_ZOOM: f64 = 3.0;

/// Multiplier applied per wheel tick when zooming in.
pub const WHEEL_ZOOM_IN: f64 = 1.1;

/// Multiplier applied per wheel tick when zooming out.
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

/// A point in either screen or world space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Axis-aligned rectangle, used for bookmark bounds and hit containment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Inclusive containment test on both bounds.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// Maps a screen-space point into world space:
/// `world = (screen - origin - pan) / zoom`.
pub fn screen_to_world(screen: Point, origin: Point, pan: Point, zoom: f64) -> Point {
    Point::new(
        (screen.x - origin.x - pan.x) / zoom,
        (screen.y - origin.y - pan.y) / zoom,
    )
}

/// Inverse of [`screen_to_world`].
pub fn world_to_screen(world: Point, origin: Point, pan: Point, zoom: f64) -> Point {
    Point::new(
        world.x * zoom + pan.x + origin.x,
        world.y * zoom + pan.y + origin.y,
    )
}

/// Rounds each axis independently to the nearest multiple of [`SNAP_SIZE`].
pub fn snap_to_grid(p: Point) -> Point {
    Point::new(
        (p.x / SNAP_SIZE).round() * SNAP_SIZE,
        (p.y / SNAP_SIZE).round() * SNAP_SIZE,
    )
}

/// Clamps a zoom factor into `[MIN_ZOOM, MAX_ZOOM]`.
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}
