#![forbid(unsafe_code)]

//! Random "captcha" patterns that are easy to redraw by hand.
//!
//! [`PatternGenerator`] picks a random first dot, then repeatedly grows the
//! pattern with an unused dot as close as possible to the previous one. It
//! scans square rings of increasing Chebyshev distance around the last dot;
//! each ring's four edges are visited in random order, and so are the cells
//! within an edge. The first unused cell found is taken.
//!
//! The result is biased toward short strokes, so it is **not** a uniform
//! sample over all patterns of a given length.
//!
//! # Invariants
//!
//! 1. A generated pattern has exactly the requested length.
//! 2. It never contains a dot twice.
//! 3. Every dot lies on the requested grid.
//!
//! # Failure Modes
//!
//! - `length == 0` or `length > size²` fails with
//!   [`ConfigError::InvalidLength`] before any randomness is drawn.
//! - Running out of unused dots mid-pattern is also `InvalidLength`; a
//!   short pattern is never returned.

use patternlock_core::{ConfigError, Dot, Grid, Pattern};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// Side of a square ring around the last dot.
#[derive(Debug, Clone, Copy)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Pattern generator over any random source.
#[derive(Debug, Clone)]
pub struct PatternGenerator<R = SmallRng> {
    rng: R,
}

impl PatternGenerator<SmallRng> {
    /// Deterministic generator for tests and reproducible demos.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self::new(SmallRng::from_os_rng())
    }
}

impl<R: Rng> PatternGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Consume the generator, returning its random source.
    pub fn into_inner(self) -> R {
        self.rng
    }

    /// Generate a pattern of `length` unique dots on `grid`.
    pub fn generate(&mut self, grid: Grid, length: usize) -> Result<Pattern, ConfigError> {
        let max = grid.cell_count() as usize;
        if length == 0 || length > max {
            return Err(ConfigError::InvalidLength { length, max });
        }

        let mut pattern = Pattern::new(grid);
        while pattern.len() < length {
            let dot = self.next_dot(&pattern)?;
            trace!(row = dot.row(), column = dot.column(), "generated dot");
            pattern.try_push(dot)?;
        }

        debug!(
            size = grid.size(),
            length,
            ids = ?pattern.ids(),
            "generated random pattern"
        );
        Ok(pattern)
    }

    /// The dot to append next, or an error if no unused dot is left.
    ///
    /// The rings around any dot cover the whole grid, so this only fails
    /// once the pattern already holds every dot.
    fn next_dot(&mut self, pattern: &Pattern) -> Result<Dot, ConfigError> {
        let grid = pattern.grid();
        let next = match pattern.last() {
            None => grid.dot_by_id(self.rng.random_range(0..grid.cell_count())),
            Some(last) => self.nearest_unused(pattern, last),
        };
        next.ok_or(ConfigError::InvalidLength {
            length: pattern.len() + 1,
            max: pattern.len(),
        })
    }

    fn nearest_unused(&mut self, pattern: &Pattern, last: Dot) -> Option<Dot> {
        let grid = pattern.grid();
        let n = i32::from(grid.size());
        let row = i32::from(last.row());
        let column = i32::from(last.column());
        let max_distance = row.max(n - 1 - row).max(column).max(n - 1 - column);

        let mut edges = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
        for distance in 1..=max_distance {
            // Ring corners: A is top-left, C is bottom-right.
            let (row_a, col_a) = (row - distance, column - distance);
            let (row_c, col_c) = (row + distance, column + distance);

            edges.shuffle(&mut self.rng);
            for edge in edges {
                let mut cells: Vec<(i32, i32)> = match edge {
                    Edge::Top if row_a >= 0 => (col_a.max(0)..(col_c + 1).min(n))
                        .map(|c| (row_a, c))
                        .collect(),
                    Edge::Right if col_c < n => ((row_a + 1).max(0)..(row_c + 1).min(n))
                        .map(|r| (r, col_c))
                        .collect(),
                    Edge::Bottom if row_c < n => (col_a.max(0)..col_c.min(n))
                        .map(|c| (row_c, c))
                        .collect(),
                    Edge::Left if col_a >= 0 => ((row_a + 1).max(0)..row_c.min(n))
                        .map(|r| (r, col_a))
                        .collect(),
                    _ => continue,
                };
                cells.shuffle(&mut self.rng);

                let found = cells
                    .into_iter()
                    .filter_map(|(r, c)| grid.dot(u16::try_from(r).ok()?, u16::try_from(c).ok()?))
                    .find(|dot| !pattern.contains(*dot));
                if found.is_some() {
                    return found;
                }
            }
        }
        None
    }
}

/// Generate a pattern with an OS-seeded generator.
pub fn generate_random_pattern(grid: Grid, length: usize) -> Result<Pattern, ConfigError> {
    PatternGenerator::from_os_rng().generate(grid, length)
}
