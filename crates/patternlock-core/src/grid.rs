#![forbid(unsafe_code)]

//! Grid context and dot identifiers.
//!
//! A [`Grid`] is an immutable N×N dot matrix. It is the only way to obtain a
//! [`Dot`], so every dot carries the size of the grid that produced it and
//! dots from different grids never compare equal. There is no process-wide
//! dot size and no interning table to invalidate.
//!
//! # Invariants
//!
//! 1. `1 <= grid.size() <= MAX_GRID_SIZE`.
//! 2. For every dot: `row < size`, `column < size`, `id == row * size + column`.
//! 3. `grid.dot_by_id(dot.id()) == Some(dot)` for every dot of the grid.

use std::fmt;

use crate::error::ConfigError;

/// Default number of dots per axis.
pub const DEFAULT_GRID_SIZE: u16 = 3;

/// Largest supported number of dots per axis.
pub const MAX_GRID_SIZE: u16 = 64;

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// An N×N dot matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    size: u16,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            size: DEFAULT_GRID_SIZE,
        }
    }
}

impl Grid {
    /// Create a grid with `size` dots per axis.
    pub fn new(size: u16) -> Result<Self, ConfigError> {
        if size == 0 || size > MAX_GRID_SIZE {
            return Err(ConfigError::InvalidGridSize {
                size,
                max: MAX_GRID_SIZE,
            });
        }
        Ok(Self { size })
    }

    /// Dots per axis.
    #[inline]
    #[must_use]
    pub const fn size(self) -> u16 {
        self.size
    }

    /// Total number of dots (`size²`).
    #[inline]
    #[must_use]
    pub const fn cell_count(self) -> u32 {
        self.size as u32 * self.size as u32
    }

    /// The dot at `(row, column)`, or `None` if either is out of range.
    #[must_use]
    pub fn dot(self, row: u16, column: u16) -> Option<Dot> {
        (row < self.size && column < self.size).then_some(Dot {
            row,
            column,
            grid_size: self.size,
        })
    }

    /// Like [`dot`](Self::dot) but reports the out-of-range coordinates.
    pub fn dot_checked(self, row: u16, column: u16) -> Result<Dot, ConfigError> {
        self.dot(row, column).ok_or(ConfigError::DotOutOfRange {
            row,
            column,
            size: self.size,
        })
    }

    /// The dot with linear id `id` (`row = id / size`, `column = id % size`).
    #[must_use]
    pub fn dot_by_id(self, id: u32) -> Option<Dot> {
        if id >= self.cell_count() {
            return None;
        }
        let size = u32::from(self.size);
        // Both quotient and remainder are < size <= MAX_GRID_SIZE.
        self.dot((id / size) as u16, (id % size) as u16)
    }

    /// Whether `dot` was produced by a grid of this size.
    #[inline]
    #[must_use]
    pub fn contains(self, dot: Dot) -> bool {
        dot.grid_size == self.size
    }

    /// Every dot in id order (row-major).
    pub fn dots(self) -> impl Iterator<Item = Dot> {
        let size = self.size;
        (0..size).flat_map(move |row| {
            (0..size).map(move |column| Dot {
                row,
                column,
                grid_size: size,
            })
        })
    }
}

// ---------------------------------------------------------------------------
// Dot
// ---------------------------------------------------------------------------

/// One addressable cell of a [`Grid`].
///
/// Dots are plain values: equality and hashing compare row, column, and the
/// size of the owning grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "DotRepr", into = "DotRepr")
)]
pub struct Dot {
    row: u16,
    column: u16,
    grid_size: u16,
}

impl Dot {
    /// Row index, counted from the top.
    #[inline]
    #[must_use]
    pub const fn row(self) -> u16 {
        self.row
    }

    /// Column index, counted from the left.
    #[inline]
    #[must_use]
    pub const fn column(self) -> u16 {
        self.column
    }

    /// Linear id, counted left to right, top to bottom, starting at zero.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u32 {
        self.row as u32 * self.grid_size as u32 + self.column as u32
    }

    /// The grid this dot belongs to.
    #[inline]
    #[must_use]
    pub const fn grid(self) -> Grid {
        Grid {
            size: self.grid_size,
        }
    }
}

impl fmt::Debug for Dot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dot({}, {})", self.row, self.column)
    }
}

impl fmt::Display for Dot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(Row = {}, Col = {})", self.row, self.column)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct DotRepr {
    row: u16,
    column: u16,
    grid_size: u16,
}

#[cfg(feature = "serde")]
impl TryFrom<DotRepr> for Dot {
    type Error = ConfigError;

    fn try_from(repr: DotRepr) -> Result<Self, Self::Error> {
        Grid::new(repr.grid_size)?.dot_checked(repr.row, repr.column)
    }
}

#[cfg(feature = "serde")]
impl From<Dot> for DotRepr {
    fn from(dot: Dot) -> Self {
        Self {
            row: dot.row,
            column: dot.column,
            grid_size: dot.grid_size,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
