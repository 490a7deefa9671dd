#![forbid(unsafe_code)]

//! Error taxonomy for pattern tracking, serialization, and generation.
//!
//! Three failure families exist and each has its own typed error so callers
//! can match on the one they care about:
//!
//! - [`ConfigError`]: invalid grid size, hit factor, generation length, or a
//!   dot that does not belong to the grid it is used with.
//! - [`DecodeError`]: a malformed serialized pattern.
//! - [`StateError`]: caller misuse of the view-mode API.
//!
//! Hit-test misses are never errors; they surface as `None`.

use thiserror::Error;

/// Standard result type for patternlock APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Umbrella error for all patternlock operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    State(#[from] StateError),
}

/// Invalid configuration or size parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid size must be in range [1, {max}], got {size}")]
    InvalidGridSize { size: u16, max: u16 },

    #[error("hit factor must be in range (0, 1], got {factor}")]
    InvalidHitFactor { factor: f32 },

    #[error("inset {side} must be a finite value >= 0, got {value}")]
    InvalidInsets { side: &'static str, value: f32 },

    #[error("pattern length must be in range [1, {max}], got {length}")]
    InvalidLength { length: usize, max: usize },

    #[error("dot (row = {row}, col = {column}) is outside a {size}x{size} grid")]
    DotOutOfRange { row: u16, column: u16, size: u16 },

    #[error("dot (row = {row}, col = {column}) appears more than once")]
    DuplicateDot { row: u16, column: u16 },

    #[error("dot belongs to a {found}x{found} grid, expected {expected}x{expected}")]
    GridMismatch { expected: u16, found: u16 },
}

/// A serialized pattern could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unexpected character {found:?} at position {index}")]
    InvalidCharacter { index: usize, found: char },

    #[error("dot id {id} at position {index} exceeds the grid maximum {max}")]
    IdOutOfRange { index: usize, id: u64, max: u32 },

    #[error("empty id field at position {index}")]
    EmptyField { index: usize },

    #[error("dot id {id} at position {index} repeats an earlier dot")]
    DuplicateId { index: usize, id: u32 },
}

/// The tracker was asked to do something its current contents do not allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("auto-draw mode requires a non-empty pattern")]
    EmptyPatternForAutoDraw,
}
