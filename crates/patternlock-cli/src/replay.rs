//! Scripted gesture replay.
//!
//! A script is a JSON document giving the view size and a list of pointer
//! events:
//!
//! ```json
//! {
//!   "width": 300, "height": 300,
//!   "events": [
//!     { "down": { "x": 50, "y": 50 } },
//!     { "move": [ { "x": 150, "y": 150 }, { "x": 250, "y": 250 } ] },
//!     "up"
//!   ]
//! }
//! ```
//!
//! Every emitted pattern event is written as one JSON line.

use std::io::Write;
use std::path::Path;

use patternlock::codec::encode;
use patternlock::{PatternEvent, PatternTracker, PointerEvent, TrackerConfig};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct ReplayScript {
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub events: Vec<PointerEvent>,
}

impl ReplayScript {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Reject view sizes no tracker can lay out a grid in.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("width", self.width), ("height", self.height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(CliError::invalid(format!(
                    "script {name} must be a finite value > 0, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    /// Index of the pointer event that produced this record.
    pub step: usize,
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoded: Option<String>,
}

impl EventRecord {
    fn new(step: usize, event: &PatternEvent) -> Self {
        Self {
            step,
            event: event.kind().as_str(),
            ids: event.pattern().map(|p| p.ids()),
            encoded: event.pattern().map(encode),
        }
    }
}

/// Load a tracker config, picking the format from the file extension.
pub fn load_config(path: &Path) -> Result<TrackerConfig> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        TrackerConfig::from_json_file(path)?
    } else {
        TrackerConfig::from_toml_file(path)?
    };
    Ok(config)
}

/// Run `script` through a fresh tracker and collect the emitted events.
pub fn replay(config: &TrackerConfig, script: &ReplayScript) -> Result<Vec<EventRecord>> {
    script.validate()?;
    let mut tracker = PatternTracker::new(config)?;
    tracker.layout(script.width, script.height);

    let mut records = Vec::new();
    for (step, pointer) in script.events.iter().enumerate() {
        records.extend(
            tracker
                .process(pointer)
                .iter()
                .map(|event| EventRecord::new(step, event)),
        );
    }
    info!(
        pointer_events = script.events.len(),
        pattern_events = records.len(),
        "replay finished"
    );
    Ok(records)
}

/// Write records as JSON lines.
pub fn write_records(out: &mut dyn Write, records: &[EventRecord]) -> Result<()> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        writeln!(out)?;
    }
    Ok(())
}
