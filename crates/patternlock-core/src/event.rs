#![forbid(unsafe_code)]

//! Pointer input and pattern lifecycle events.
//!
//! [`PointerEvent`] is what the host feeds into the tracker. [`PatternEvent`]
//! is what the tracker reports back, both through registered listeners and
//! as the return value of each tracker call.
//!
//! # Invariants
//!
//! Per gesture that reached a pointer-down, the emitted sequence matches
//! `Started Progress* (Complete | Cleared)` or, for a down that missed every
//! dot, a lone `Cleared`. Nothing is emitted after the terminal event until
//! the next down.

use crate::geometry::Point;
use crate::pattern::Pattern;

// ---------------------------------------------------------------------------
// PointerEvent
// ---------------------------------------------------------------------------

/// A single-pointer input event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PointerEvent {
    /// Pointer pressed at a position.
    Down(Point),
    /// Pointer moved. Carries every sample since the previous move,
    /// oldest first, with the current position last.
    Move(Vec<Point>),
    /// Pointer released.
    Up,
    /// Gesture aborted by the host.
    Cancel,
}

// ---------------------------------------------------------------------------
// PatternEvent
// ---------------------------------------------------------------------------

/// Discriminant of a [`PatternEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternEventKind {
    Started,
    Progress,
    Complete,
    Cleared,
}

impl PatternEventKind {
    /// Lowercase name, stable for logs and scripts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Started => "started",
            Self::Progress => "progress",
            Self::Complete => "complete",
            Self::Cleared => "cleared",
        }
    }
}

/// A lifecycle notification.
///
/// `Progress` and `Complete` own a snapshot of the pattern at the time of
/// the event; holders may keep it past later tracker mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternEvent {
    /// A gesture hit its first dot.
    Started,
    /// One dot was appended.
    Progress(Pattern),
    /// The pointer was released with a non-empty pattern.
    Complete(Pattern),
    /// The gesture ended without a pattern (missed down or cancel).
    Cleared,
}

impl PatternEvent {
    #[must_use]
    pub fn kind(&self) -> PatternEventKind {
        match self {
            Self::Started => PatternEventKind::Started,
            Self::Progress(_) => PatternEventKind::Progress,
            Self::Complete(_) => PatternEventKind::Complete,
            Self::Cleared => PatternEventKind::Cleared,
        }
    }

    /// Pattern snapshot carried by `Progress` and `Complete`.
    #[must_use]
    pub fn pattern(&self) -> Option<&Pattern> {
        match self {
            Self::Progress(pattern) | Self::Complete(pattern) => Some(pattern),
            Self::Started | Self::Cleared => None,
        }
    }

    /// Whether this event ends a gesture.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete(_) | Self::Cleared)
    }
}
