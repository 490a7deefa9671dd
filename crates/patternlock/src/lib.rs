#![forbid(unsafe_code)]

//! PatternLock public facade crate.
//!
//! Re-exports the tracker, codec, and generator behind one import, plus a
//! prelude for day-to-day usage:
//!
//! ```
//! use patternlock::prelude::*;
//!
//! let mut tracker = PatternTracker::new(&TrackerConfig::default())?;
//! tracker.layout(300.0, 300.0);
//! tracker.on_down(Point::new(50.0, 50.0));
//! tracker.on_move(&[Point::new(250.0, 250.0)]);
//! let events = tracker.on_up();
//!
//! let done = events[0].pattern().expect("complete carries the pattern");
//! assert_eq!(encode(done), "048");
//! # Ok::<(), patternlock::Error>(())
//! ```

// --- Core re-exports -------------------------------------------------------

pub use patternlock_core::{
    AspectRatio, ConfigError, DecodeError, Dot, DrawArea, DrawLookup, Error, Grid, GridGeometry,
    Insets, ListenerId, ListenerRegistry, Pattern, PatternEvent, PatternEventKind,
    PatternLockListener, PatternTracker, Point, PointerEvent, RenderSnapshot, Result, StateError,
    TrackerConfig, TrackerState, ViewMode, DEFAULT_GRID_SIZE, DEFAULT_HIT_FACTOR, MAX_GRID_SIZE,
};

#[cfg(feature = "config-file")]
pub use patternlock_core::ConfigFileError;

// --- Codec re-exports ------------------------------------------------------

#[cfg(feature = "codec")]
pub use patternlock_codec::{HashAlgorithm, IdFormat, decode, digest, encode, from_ids, hash, to_ids};

// --- Generator re-exports --------------------------------------------------

#[cfg(feature = "gen")]
pub use patternlock_gen::{PatternGenerator, generate_random_pattern};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Dot, Error, Grid, Pattern, PatternEvent, PatternLockListener, PatternTracker, Point,
        PointerEvent, Result, TrackerConfig, TrackerState, ViewMode,
    };

    #[cfg(feature = "codec")]
    pub use crate::{HashAlgorithm, decode, encode, hash};

    #[cfg(feature = "gen")]
    pub use crate::PatternGenerator;

    pub use crate::core;
    #[cfg(feature = "codec")]
    pub use crate::codec;
    #[cfg(feature = "gen")]
    pub use crate::generator;
}

pub use patternlock_core as core;
#[cfg(feature = "codec")]
pub use patternlock_codec as codec;
#[cfg(feature = "gen")]
pub use patternlock_gen as generator;
