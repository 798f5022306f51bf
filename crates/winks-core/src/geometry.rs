//! Screen-space geometry: points, rectangles and work-area corners.

use serde::{Deserialize, Serialize};

/// A pixel coordinate in virtual-screen space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, widened so screen extents cannot overflow.
    pub fn distance_sq(self, other: ScreenPoint) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}

impl From<(i32, i32)> for ScreenPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Rectangle in screen coordinates (window bounds, display work area).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Centre point, rounded toward the origin.
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    /// Grow the rectangle by `by` pixels on every side, saturating at the `i32` range.
    pub fn expanded(&self, by: i32) -> Rect {
        let grow = by.saturating_mul(2);
        Rect {
            x: self.x.saturating_sub(by),
            y: self.y.saturating_sub(by),
            width: self.width.saturating_add(grow),
            height: self.height.saturating_add(grow),
        }
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// One of the four corners of a work area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Enumeration order used for tie-breaking; must not change.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomLeft,
        Corner::BottomRight,
    ];

    /// The corner point of `area` itself.
    pub fn point(self, area: Rect) -> ScreenPoint {
        match self {
            Corner::TopLeft => ScreenPoint::new(area.x, area.y),
            Corner::TopRight => ScreenPoint::new(area.right(), area.y),
            Corner::BottomLeft => ScreenPoint::new(area.x, area.bottom()),
            Corner::BottomRight => ScreenPoint::new(area.right(), area.bottom()),
        }
    }

    /// Origin for a `width` x `height` window tucked into this corner of `area`.
    pub fn window_origin(self, area: Rect, width: i32, height: i32) -> ScreenPoint {
        match self {
            Corner::TopLeft => ScreenPoint::new(area.x, area.y),
            Corner::TopRight => ScreenPoint::new(area.right() - width, area.y),
            Corner::BottomLeft => ScreenPoint::new(area.x, area.bottom() - height),
            Corner::BottomRight => ScreenPoint::new(area.right() - width, area.bottom() - height),
        }
    }
}

/// Pick the corner of `area` closest to `anchor`.
///
/// Strictly smaller squared distance wins, so ties keep the earliest corner
/// in [`Corner::ALL`].
pub fn nearest_corner(anchor: ScreenPoint, area: Rect) -> Corner {
    let mut best = Corner::ALL[0];
    let mut best_distance = i64::MAX;

    for corner in Corner::ALL {
        let distance = anchor.distance_sq(corner.point(area));
        if distance < best_distance {
            best_distance = distance;
            best = corner;
        }
    }

    best
}
