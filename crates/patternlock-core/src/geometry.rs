#![forbid(unsafe_code)]

//! Pixel geometry for the dot matrix.
//!
//! [`GridGeometry`] maps between pointer coordinates and grid cells. The draw
//! area is split into `N` equal columns and `N` equal rows; each cell's dot
//! sits at the cell center. A coordinate hits row `r` only if it falls inside
//! a band of height `cell_height * hit_factor` centered on row `r`'s center;
//! columns work the same way along x. Anything outside both bands is a miss.
//!
//! All coordinates are in the caller's pixel space, origin at top-left.

use crate::error::ConfigError;
use crate::grid::{Dot, Grid};

/// Default fraction of a cell that counts as hittable along each axis.
pub const DEFAULT_HIT_FACTOR: f32 = 0.6;

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

/// A pointer position in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl From<(f32, f32)> for Point {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

// ---------------------------------------------------------------------------
// Insets
// ---------------------------------------------------------------------------

/// Padding between the view bounds and the draw area.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Insets {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Insets {
    /// Equal padding on every side.
    #[must_use]
    pub const fn all(val: f32) -> Self {
        Self {
            top: val,
            right: val,
            bottom: val,
            left: val,
        }
    }

    /// Padding with specific values.
    #[must_use]
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of left and right.
    #[inline]
    #[must_use]
    pub fn horizontal_sum(&self) -> f32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    #[must_use]
    pub fn vertical_sum(&self) -> f32 {
        self.top + self.bottom
    }
}

// ---------------------------------------------------------------------------
// DrawArea
// ---------------------------------------------------------------------------

/// The rectangle the dot matrix is laid out in, after insets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawArea {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl DrawArea {
    /// Create a new draw area.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Draw area for a view of `width × height` with `insets` removed.
    ///
    /// Negative remainders clamp to zero.
    #[must_use]
    pub fn from_view(width: f32, height: f32, insets: Insets) -> Self {
        Self {
            x: insets.left,
            y: insets.top,
            width: (width - insets.horizontal_sum()).max(0.0),
            height: (height - insets.vertical_sum()).max(0.0),
        }
    }

    /// Whether the area has no usable extent.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

// ---------------------------------------------------------------------------
// AspectRatio
// ---------------------------------------------------------------------------

/// How a measured view size is squared up before layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AspectRatio {
    /// Both sides become `min(width, height)`.
    #[default]
    Square,
    /// Width is kept; height becomes `min(width, height)`.
    WidthBias,
    /// Height is kept; width becomes `min(width, height)`.
    HeightBias,
}

impl AspectRatio {
    /// Apply the ratio to a measured size, returning `(width, height)`.
    #[must_use]
    pub fn fit(self, width: f32, height: f32) -> (f32, f32) {
        let min = width.min(height);
        match self {
            Self::Square => (min, min),
            Self::WidthBias => (width, min),
            Self::HeightBias => (min, height),
        }
    }
}

// ---------------------------------------------------------------------------
// GridGeometry
// ---------------------------------------------------------------------------

/// Pure mapping between pixel coordinates and cells of a [`Grid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    grid: Grid,
    area: DrawArea,
    hit_factor: f32,
}

/// Validate a hit factor lies in `(0, 1]`.
pub(crate) fn check_hit_factor(factor: f32) -> Result<f32, ConfigError> {
    if factor > 0.0 && factor <= 1.0 {
        Ok(factor)
    } else {
        Err(ConfigError::InvalidHitFactor { factor })
    }
}

impl GridGeometry {
    /// Geometry for `grid` laid out in `area`.
    pub fn new(grid: Grid, area: DrawArea, hit_factor: f32) -> Result<Self, ConfigError> {
        Ok(Self {
            grid,
            area,
            hit_factor: check_hit_factor(hit_factor)?,
        })
    }

    /// Geometry using [`DEFAULT_HIT_FACTOR`].
    #[must_use]
    pub fn with_default_hit_factor(grid: Grid, area: DrawArea) -> Self {
        Self {
            grid,
            area,
            hit_factor: DEFAULT_HIT_FACTOR,
        }
    }

    /// Geometry for a view of `width × height` with `insets` removed.
    pub fn from_view(
        grid: Grid,
        width: f32,
        height: f32,
        insets: Insets,
        hit_factor: f32,
    ) -> Result<Self, ConfigError> {
        Self::new(grid, DrawArea::from_view(width, height, insets), hit_factor)
    }

    #[inline]
    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[inline]
    #[must_use]
    pub fn area(&self) -> DrawArea {
        self.area
    }

    #[inline]
    #[must_use]
    pub fn hit_factor(&self) -> f32 {
        self.hit_factor
    }

    /// Replace the draw area, e.g. after a resize.
    pub fn set_area(&mut self, area: DrawArea) {
        self.area = area;
    }

    /// Width of one cell.
    #[inline]
    #[must_use]
    pub fn cell_width(&self) -> f32 {
        self.area.width / f32::from(self.grid.size())
    }

    /// Height of one cell.
    #[inline]
    #[must_use]
    pub fn cell_height(&self) -> f32 {
        self.area.height / f32::from(self.grid.size())
    }

    /// X coordinate of the dot centers in `column`.
    #[must_use]
    pub fn center_x(&self, column: u16) -> f32 {
        let cw = self.cell_width();
        self.area.x + f32::from(column) * cw + cw / 2.0
    }

    /// Y coordinate of the dot centers in `row`.
    #[must_use]
    pub fn center_y(&self, row: u16) -> f32 {
        let ch = self.cell_height();
        self.area.y + f32::from(row) * ch + ch / 2.0
    }

    /// Center point of `dot`.
    #[must_use]
    pub fn center(&self, dot: Dot) -> Point {
        Point::new(self.center_x(dot.column()), self.center_y(dot.row()))
    }

    /// Row whose hit band contains `y`.
    #[must_use]
    pub fn row_hit(&self, y: f32) -> Option<u16> {
        self.axis_hit(y, self.area.y, self.cell_height())
    }

    /// Column whose hit band contains `x`.
    #[must_use]
    pub fn column_hit(&self, x: f32) -> Option<u16> {
        self.axis_hit(x, self.area.x, self.cell_width())
    }

    /// Dot whose hit area contains `point`, if any.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<Dot> {
        let row = self.row_hit(point.y)?;
        let column = self.column_hit(point.x)?;
        self.grid.dot(row, column)
    }

    fn axis_hit(&self, coord: f32, origin: f32, cell: f32) -> Option<u16> {
        if !coord.is_finite() || !(cell > 0.0) {
            return None;
        }
        let offset = coord - origin;
        if offset < 0.0 {
            return None;
        }
        // A band never leaves its own cell, so only the cell under the
        // pointer and, on a shared edge, the one before it can match. Ties
        // go to the lower index. The far edge belongs to the last cell.
        let last = u32::from(self.grid.size()) - 1;
        let index = ((offset / cell).floor() as u32).min(last);
        let half_band = cell * self.hit_factor / 2.0;
        let in_band = |i: u32| {
            let center = origin + i as f32 * cell + cell / 2.0;
            (coord - center).abs() <= half_band
        };
        [index.checked_sub(1), Some(index)]
            .into_iter()
            .flatten()
            .find(|&i| in_band(i))
            .map(|i| i as u16)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
