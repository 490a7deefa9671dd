#![forbid(unsafe_code)]

//! Pattern tracking: turns pointer samples into a connected dot sequence.
//!
//! [`PatternTracker`] owns the pattern being drawn, its visited-cell lookup,
//! and the gesture lifecycle. The host feeds it pointer events; the tracker
//! hit-tests each sample, fills single-cell gaps, and notifies listeners.
//!
//! # State Machine
//!
//! ```text
//!            down (hit)                 move (hit)
//!   Idle ─────────────────▶ Started ─────────────────▶ InProgress ◀─┐
//!    ▲ │                       │                           │  │      │ move (hit)
//!    │ │ down (miss)           │ up                   up   │  └──────┘
//!    │ ▼                       ▼                           ▼
//!    ├── Cleared ◀──cancel── (any drawing state)      Completed
//!    └────────────────────────────────────────────────────┘
//! ```
//!
//! `Completed` and `Cleared` are pass-through states: the tracker logs them
//! and settles in `Idle`. The finished pattern stays readable until the next
//! down, cancel, or [`reset`](PatternTracker::reset).
//!
//! # Invariants
//!
//! 1. Exactly one `Started` per gesture that hit a dot on down.
//! 2. Exactly one terminal event (`Complete` or `Cleared`) per gesture that
//!    reached down, and nothing after it until the next down.
//! 3. One `Progress` per appended dot, gap-fill dots included, always
//!    before the terminal event.
//! 4. The pattern never contains a dot twice.
//! 5. The events returned by each call are exactly the events dispatched to
//!    listeners during that call, in the same order.
//!
//! # Failure Modes
//!
//! - Misses, out-of-grid gap-fill cells, and non-finite coordinates are
//!   silently skipped. No pointer input can make the tracker fail.
//! - A down arriving while a gesture is still live (lost up) closes the old
//!   gesture with `Cleared` before starting the new one.
//! - [`reset`](PatternTracker::reset) and
//!   [`set_pattern`](PatternTracker::set_pattern) abandon a live gesture
//!   without any event; the caller owns that decision.

use tracing::{debug, debug_span, trace};

use crate::config::TrackerConfig;
use crate::error::{ConfigError, Result, StateError};
use crate::event::{PatternEvent, PointerEvent};
use crate::geometry::{AspectRatio, DrawArea, GridGeometry, Insets, Point};
use crate::grid::{Dot, Grid};
use crate::listener::{ListenerId, ListenerRegistry, PatternLockListener};
use crate::pattern::Pattern;

use std::rc::Rc;

// ---------------------------------------------------------------------------
// State and modes
// ---------------------------------------------------------------------------

/// Gesture lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TrackerState {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// Down hit a dot; no move has added one yet.
    Started,
    /// At least one move added a dot.
    InProgress,
    /// Pointer released with a non-empty pattern.
    Completed,
    /// Gesture ended without a pattern.
    Cleared,
}

impl TrackerState {
    /// Whether a gesture is live and accepting moves.
    #[inline]
    #[must_use]
    pub const fn is_drawing(self) -> bool {
        matches!(self, Self::Started | Self::InProgress)
    }
}

/// How a renderer should present the current pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ViewMode {
    /// Normal drawing, or a pattern accepted as correct.
    #[default]
    Correct,
    /// Replay the pattern for demo or tutorial purposes.
    AutoDraw,
    /// A pattern rejected as wrong.
    Wrong,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSnapshot {
    pub pattern: Pattern,
    pub view_mode: ViewMode,
    pub state: TrackerState,
    /// Latest pointer position while a gesture is live.
    pub pointer: Option<Point>,
}

// ---------------------------------------------------------------------------
// PatternTracker
// ---------------------------------------------------------------------------

/// Pointer-driven pattern state machine.
///
/// Call the `on_*` methods (or [`process`](Self::process)) from the input
/// thread, in arrival order. Each returns the events it dispatched.
pub struct PatternTracker {
    geometry: GridGeometry,
    aspect_ratio: AspectRatio,
    insets: Insets,

    pattern: Pattern,
    state: TrackerState,
    view_mode: ViewMode,
    input_enabled: bool,
    pointer: Option<Point>,

    listeners: ListenerRegistry,
}

impl std::fmt::Debug for PatternTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatternTracker")
            .field("grid", &self.grid().size())
            .field("state", &self.state)
            .field("pattern_len", &self.pattern.len())
            .field("view_mode", &self.view_mode)
            .finish()
    }
}

impl PatternTracker {
    /// Create a tracker from `config`.
    ///
    /// Rejects any config that [`TrackerConfig::validate`] would flag. The
    /// draw area starts empty, so nothing hits until
    /// [`layout`](Self::layout) or [`set_area`](Self::set_area) is called.
    pub fn new(config: &TrackerConfig) -> std::result::Result<Self, ConfigError> {
        let grid = config.grid()?;
        let insets = config.checked_insets()?;
        let geometry = GridGeometry::new(grid, DrawArea::default(), config.checked_hit_factor()?)?;
        Ok(Self {
            geometry,
            aspect_ratio: config.aspect_ratio,
            insets,
            pattern: Pattern::new(grid),
            state: TrackerState::Idle,
            view_mode: ViewMode::Correct,
            input_enabled: config.input_enabled,
            pointer: None,
            listeners: ListenerRegistry::new(),
        })
    }

    /// Create a tracker with default settings over an existing geometry.
    #[must_use]
    pub fn with_geometry(geometry: GridGeometry) -> Self {
        let grid = geometry.grid();
        Self {
            geometry,
            aspect_ratio: AspectRatio::Square,
            insets: Insets::default(),
            pattern: Pattern::new(grid),
            state: TrackerState::Idle,
            view_mode: ViewMode::Correct,
            input_enabled: true,
            pointer: None,
            listeners: ListenerRegistry::new(),
        }
    }

    // --- Accessors ---------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn grid(&self) -> Grid {
        self.geometry.grid()
    }

    #[inline]
    #[must_use]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> TrackerState {
        self.state
    }

    /// Whether a gesture is live.
    #[inline]
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        self.state.is_drawing()
    }

    /// The current pattern. Clone it to keep a copy past later mutations.
    #[inline]
    #[must_use]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    #[inline]
    #[must_use]
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    #[inline]
    #[must_use]
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    #[inline]
    #[must_use]
    pub fn is_input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Snapshot of everything a renderer reads.
    #[must_use]
    pub fn render_snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            pattern: self.pattern.clone(),
            view_mode: self.view_mode,
            state: self.state,
            pointer: self.pointer,
        }
    }

    // --- Listeners ---------------------------------------------------------

    /// Shared handle to the listener list.
    ///
    /// Clones of the handle may be moved into listeners so they can
    /// unregister themselves from inside a callback.
    #[must_use]
    pub fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }

    pub fn add_listener(&self, listener: Rc<dyn PatternLockListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    // --- Layout ------------------------------------------------------------

    /// Lay the grid out in a measured view of `width × height`.
    ///
    /// Applies the configured aspect ratio, then removes the insets.
    pub fn layout(&mut self, width: f32, height: f32) {
        let (width, height) = self.aspect_ratio.fit(width, height);
        self.set_area(DrawArea::from_view(width, height, self.insets));
    }

    /// Set the draw area directly.
    pub fn set_area(&mut self, area: DrawArea) {
        debug!(
            x = area.x,
            y = area.y,
            width = area.width,
            height = area.height,
            "pattern tracker layout"
        );
        self.geometry.set_area(area);
    }

    // --- Configuration -----------------------------------------------------

    /// Enable or disable pointer input.
    ///
    /// Disabling input during a live gesture cancels it, so the gesture
    /// still gets its terminal `Cleared`.
    pub fn set_input_enabled(&mut self, enabled: bool) -> Vec<PatternEvent> {
        let mut out = Vec::new();
        if !enabled && self.is_drawing() {
            self.cancel_into(&mut out);
        }
        self.input_enabled = enabled;
        out
    }

    /// Display `dots` instead of waiting for user input.
    ///
    /// Validates the dots against the grid, replaces the pattern, abandons
    /// any live gesture without events, and applies `mode`. On error nothing
    /// changes.
    pub fn set_pattern(&mut self, mode: ViewMode, dots: impl IntoIterator<Item = Dot>) -> Result<()> {
        let pattern = Pattern::from_dots(self.grid(), dots)?;
        if mode == ViewMode::AutoDraw && pattern.is_empty() {
            return Err(StateError::EmptyPatternForAutoDraw.into());
        }
        if self.is_drawing() {
            debug!("set_pattern abandons the live gesture");
        }
        self.pattern = pattern;
        self.pointer = None;
        self.transition(TrackerState::Idle);
        self.view_mode = mode;
        Ok(())
    }

    /// Change how the current pattern is presented.
    ///
    /// `AutoDraw` needs a non-empty pattern to replay.
    pub fn set_view_mode(&mut self, mode: ViewMode) -> std::result::Result<(), StateError> {
        if mode == ViewMode::AutoDraw && self.pattern.is_empty() {
            return Err(StateError::EmptyPatternForAutoDraw);
        }
        self.view_mode = mode;
        Ok(())
    }

    // --- Pointer input -----------------------------------------------------

    /// Feed one pointer event.
    pub fn process(&mut self, event: &PointerEvent) -> Vec<PatternEvent> {
        match event {
            PointerEvent::Down(point) => self.on_down(*point),
            PointerEvent::Move(samples) => self.on_move(samples),
            PointerEvent::Up => self.on_up(),
            PointerEvent::Cancel => self.on_cancel(),
        }
    }

    /// Pointer pressed at `point`.
    pub fn on_down(&mut self, point: Point) -> Vec<PatternEvent> {
        let mut out = Vec::with_capacity(2);
        if !self.input_enabled {
            return out;
        }

        if self.is_drawing() {
            debug!("down during a live gesture; closing it");
            self.transition(TrackerState::Cleared);
            self.emit(&mut out, PatternEvent::Cleared);
        }

        self.pattern.clear();
        self.view_mode = ViewMode::Correct;
        self.pointer = Some(point);

        match self.geometry.hit_test(point) {
            Some(dot) => {
                self.transition(TrackerState::Started);
                self.emit(&mut out, PatternEvent::Started);
                self.add_hit(dot, &mut out);
            }
            None => {
                self.transition(TrackerState::Cleared);
                self.emit(&mut out, PatternEvent::Cleared);
                self.transition(TrackerState::Idle);
            }
        }
        out
    }

    /// Pointer moved through `samples`, oldest first.
    ///
    /// Every sample is hit-tested, not just the last, so fast drags with
    /// sparse events still visit the cells they crossed.
    pub fn on_move(&mut self, samples: &[Point]) -> Vec<PatternEvent> {
        let mut out = Vec::new();
        if !self.input_enabled || !self.is_drawing() {
            return out;
        }

        let _span = debug_span!("patternlock.move", samples = samples.len()).entered();
        for &sample in samples {
            self.pointer = Some(sample);
            if let Some(dot) = self.new_hit(sample) {
                self.transition(TrackerState::InProgress);
                self.add_hit(dot, &mut out);
            }
        }
        out
    }

    /// Pointer released.
    pub fn on_up(&mut self) -> Vec<PatternEvent> {
        let mut out = Vec::with_capacity(1);
        if !self.input_enabled {
            return out;
        }

        self.pointer = None;
        if self.is_drawing() && !self.pattern.is_empty() {
            self.transition(TrackerState::Completed);
            debug!(len = self.pattern.len(), "pattern complete");
            self.emit(&mut out, PatternEvent::Complete(self.pattern.clone()));
        }
        self.transition(TrackerState::Idle);
        out
    }

    /// Gesture aborted by the host.
    ///
    /// Always discards the pattern and returns to `Idle`, whether or not
    /// input is enabled. Emits `Cleared` only if a gesture was live, so
    /// repeated cancels are harmless.
    pub fn on_cancel(&mut self) -> Vec<PatternEvent> {
        let mut out = Vec::with_capacity(1);
        self.cancel_into(&mut out);
        out
    }

    /// Discard the pattern and return to `Idle` without any event.
    pub fn reset(&mut self) {
        self.pattern.clear();
        self.pointer = None;
        self.view_mode = ViewMode::Correct;
        self.transition(TrackerState::Idle);
    }

    // --- Internals ---------------------------------------------------------

    fn cancel_into(&mut self, out: &mut Vec<PatternEvent>) {
        let was_drawing = self.is_drawing();
        self.pattern.clear();
        self.pointer = None;
        self.view_mode = ViewMode::Correct;
        if was_drawing {
            self.transition(TrackerState::Cleared);
            self.emit(out, PatternEvent::Cleared);
        }
        self.transition(TrackerState::Idle);
    }

    /// Dot under `point` that is not part of the pattern yet.
    fn new_hit(&self, point: Point) -> Option<Dot> {
        self.geometry
            .hit_test(point)
            .filter(|dot| !self.pattern.contains(*dot))
    }

    /// Append `dot`, preceded by the skipped cell if the jump from the last
    /// dot passes exactly one cell along an axis.
    fn add_hit(&mut self, dot: Dot, out: &mut Vec<PatternEvent>) {
        if let Some(fill) = self.gap_fill(dot) {
            if self.pattern.push_unvisited(fill) {
                trace!(row = fill.row(), column = fill.column(), "gap fill");
                self.emit(out, PatternEvent::Progress(self.pattern.clone()));
            }
        }
        if self.pattern.push_unvisited(dot) {
            trace!(row = dot.row(), column = dot.column(), "dot hit");
            self.emit(out, PatternEvent::Progress(self.pattern.clone()));
        }
    }

    fn gap_fill(&self, dot: Dot) -> Option<Dot> {
        let last = self.pattern.last()?;
        let d_row = i32::from(dot.row()) - i32::from(last.row());
        let d_column = i32::from(dot.column()) - i32::from(last.column());

        let mut fill_row = i32::from(last.row());
        let mut fill_column = i32::from(last.column());
        if d_row.abs() == 2 && d_column.abs() != 1 {
            fill_row += d_row.signum();
        }
        if d_column.abs() == 2 && d_row.abs() != 1 {
            fill_column += d_column.signum();
        }

        let row = u16::try_from(fill_row).ok()?;
        let column = u16::try_from(fill_column).ok()?;
        if (row, column) == (last.row(), last.column()) {
            return None;
        }
        self.grid().dot(row, column)
    }

    fn emit(&self, out: &mut Vec<PatternEvent>, event: PatternEvent) {
        self.listeners.dispatch(&event);
        out.push(event);
    }

    fn transition(&mut self, to: TrackerState) {
        if self.state != to {
            debug!(from = ?self.state, to = ?to, "pattern tracker transition");
            self.state = to;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
