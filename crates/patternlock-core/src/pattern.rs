#![forbid(unsafe_code)]

//! Ordered, duplicate-free dot sequences.
//!
//! A [`Pattern`] keeps its dots in draw order together with a [`DrawLookup`]
//! membership table for O(1) "already visited" checks.
//!
//! # Invariants
//!
//! 1. Every dot belongs to the pattern's grid.
//! 2. No dot appears twice, so `len() <= grid.cell_count()`.
//! 3. The lookup marks exactly the dots in the sequence. This is asserted
//!    after every mutation in debug builds.

use std::slice;

use crate::error::ConfigError;
use crate::grid::{Dot, Grid};

// ---------------------------------------------------------------------------
// DrawLookup
// ---------------------------------------------------------------------------

/// `size × size` visited-cell table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DrawLookup {
    size: u16,
    visited: Vec<bool>,
}

impl DrawLookup {
    fn new(grid: Grid) -> Self {
        Self {
            size: grid.size(),
            visited: vec![false; grid.cell_count() as usize],
        }
    }

    /// Whether the cell at `(row, column)` is part of the pattern.
    ///
    /// Out-of-range coordinates are never visited.
    #[must_use]
    pub fn is_visited(&self, row: u16, column: u16) -> bool {
        if row >= self.size || column >= self.size {
            return false;
        }
        self.visited[usize::from(row) * usize::from(self.size) + usize::from(column)]
    }

    /// Number of visited cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.visited.iter().filter(|v| **v).count()
    }

    fn mark(&mut self, dot: Dot) {
        self.visited[dot.id() as usize] = true;
    }

    fn clear(&mut self) {
        self.visited.fill(false);
    }
}

// ---------------------------------------------------------------------------
// Pattern
// ---------------------------------------------------------------------------

/// An ordered, duplicate-free sequence of dots on one grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    grid: Grid,
    dots: Vec<Dot>,
    lookup: DrawLookup,
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new(Grid::default())
    }
}

impl Pattern {
    /// An empty pattern on `grid`.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            dots: Vec::with_capacity(grid.cell_count() as usize),
            lookup: DrawLookup::new(grid),
        }
    }

    /// Build a pattern from dots in draw order.
    ///
    /// Fails if a dot belongs to another grid or repeats.
    pub fn from_dots(grid: Grid, dots: impl IntoIterator<Item = Dot>) -> Result<Self, ConfigError> {
        let mut pattern = Self::new(grid);
        for dot in dots {
            pattern.try_push(dot)?;
        }
        Ok(pattern)
    }

    /// Append `dot`, rejecting foreign and repeated dots.
    pub fn try_push(&mut self, dot: Dot) -> Result<(), ConfigError> {
        if !self.grid.contains(dot) {
            return Err(ConfigError::GridMismatch {
                expected: self.grid.size(),
                found: dot.grid().size(),
            });
        }
        if !self.push_unvisited(dot) {
            return Err(ConfigError::DuplicateDot {
                row: dot.row(),
                column: dot.column(),
            });
        }
        Ok(())
    }

    /// Append `dot` if it is not visited yet. Returns whether it was added.
    ///
    /// The caller guarantees `dot` belongs to this grid.
    pub(crate) fn push_unvisited(&mut self, dot: Dot) -> bool {
        debug_assert!(self.grid.contains(dot));
        if self.contains(dot) {
            return false;
        }
        self.lookup.mark(dot);
        self.dots.push(dot);
        debug_assert!(self.lookup_consistent());
        true
    }

    /// Remove every dot.
    pub fn clear(&mut self) {
        self.dots.clear();
        self.lookup.clear();
        debug_assert!(self.lookup_consistent());
    }

    #[inline]
    #[must_use]
    pub fn grid(&self) -> Grid {
        self.grid
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.dots.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dots.is_empty()
    }

    /// Dots in draw order.
    #[inline]
    #[must_use]
    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Dot> {
        self.dots.iter()
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<Dot> {
        self.dots.first().copied()
    }

    /// Most recently added dot.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<Dot> {
        self.dots.last().copied()
    }

    /// O(1) membership test.
    #[inline]
    #[must_use]
    pub fn contains(&self, dot: Dot) -> bool {
        self.grid.contains(dot) && self.lookup.is_visited(dot.row(), dot.column())
    }

    /// Membership table backing [`contains`](Self::contains).
    #[inline]
    #[must_use]
    pub fn lookup(&self) -> &DrawLookup {
        &self.lookup
    }

    /// Linear ids in draw order.
    #[must_use]
    pub fn ids(&self) -> Vec<u32> {
        self.dots.iter().map(|dot| dot.id()).collect()
    }

    fn lookup_consistent(&self) -> bool {
        self.lookup.count() == self.dots.len()
            && self
                .dots
                .iter()
                .all(|dot| self.lookup.is_visited(dot.row(), dot.column()))
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a Dot;
    type IntoIter = slice::Iter<'a, Dot>;

    fn into_iter(self) -> Self::IntoIter {
        self.dots.iter()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
