// Value types shared by the rasterizer and the pointer path.

/// A pointer sample in buffer coordinates.
///
/// Origin is the top-left corner of the buffer, `y` grows downward, and one
/// unit is one pixel. Pixel `(x, y)` covers `[x, x+1) x [y, y+1)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Mirror across the horizontal axis of a surface `height` pixels tall.
    ///
    /// For hosts whose input space has a bottom-left origin.
    pub fn flip_y(self, height: f32) -> Self {
        Self { x: self.x, y: height - self.y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// True if the point lies in the closed rectangle `[0,width] x [0,height]`.
    #[inline]
    pub fn within(self, width: u32, height: u32) -> bool {
        self.x >= 0.0 && self.x <= width as f32 && self.y >= 0.0 && self.y <= height as f32
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// One round-capped line segment waiting to be rasterized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub start: Point,
    pub end: Point,
    pub width: f32,
}

impl Stroke {
    pub fn new(start: Point, end: Point, width: f32) -> Self {
        Self { start, end, width }
    }

    /// A tap without drag: both ends at `at`.
    pub fn dot(at: Point, width: f32) -> Self {
        Self { start: at, end: at, width }
    }
}
