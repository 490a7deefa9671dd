#![forbid(unsafe_code)]

//! Core: grid geometry, pattern tracking, and listener dispatch.
//!
//! # Role in PatternLock
//! `patternlock-core` is the input layer of the pattern lock widget. It maps
//! pointer coordinates to dots, runs the gesture state machine, and notifies
//! listeners as the pattern grows. Rendering is left to the host.
//!
//! # Primary responsibilities
//! - **GridGeometry**: cell sizing, dot centers, and hit-band tests.
//! - **PatternTracker**: down/move/up/cancel handling with gap fill.
//! - **ListenerRegistry**: ordered, re-entrancy-safe event fan-out.
//! - **TrackerConfig**: validated tunables, optionally loaded from files.
//!
//! # How it fits in the system
//! `patternlock-codec` serializes and hashes the [`Pattern`] values produced
//! here, and `patternlock-gen` builds random ones on the same [`Grid`]. The
//! `patternlock` facade re-exports all three.

pub mod config;
pub mod error;
pub mod event;
pub mod geometry;
pub mod grid;
pub mod listener;
pub mod pattern;
pub mod tracker;

pub use config::TrackerConfig;
#[cfg(feature = "config-file")]
pub use config::ConfigFileError;
pub use error::{ConfigError, DecodeError, Error, Result, StateError};
pub use event::{PatternEvent, PatternEventKind, PointerEvent};
pub use geometry::{AspectRatio, DEFAULT_HIT_FACTOR, DrawArea, GridGeometry, Insets, Point};
pub use grid::{DEFAULT_GRID_SIZE, Dot, Grid, MAX_GRID_SIZE};
pub use listener::{ListenerId, ListenerRegistry, PatternLockListener};
pub use pattern::{DrawLookup, Pattern};
pub use tracker::{PatternTracker, RenderSnapshot, TrackerState, ViewMode};
