//! Layout configuration, derived once from the window dimensions.
//!
//! Every pixel measure in the crate is a function of the staff height,
//! which itself is carved out of the window: the button bar and buffers
//! come off the bottom, and the remainder is split so that each staff gets
//! two staff-heights of paper plus one spare staff-height of margin.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Stem length in staff steps.
pub const STEM_STEPS: i32 = 7;
/// Notes may sit at most this many ledger lines above or below the staff.
/// Two lines each way is exactly what a staff's click strip covers.
pub const MAX_LEDGER_LINES: i32 = 2;

/// Immutable layout parameters threaded through every layout and render call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub window_width: f64,
    pub window_height: f64,
    pub button_width: f64,
    pub button_height: f64,
    /// Gap between the button bar and the window edges
    pub buffer: f64,
    /// Width of the dialogue panel on the right
    pub chat_width: f64,
    /// Number of systems (rows of paired staves) on the page
    pub systems: usize,
    /// Staves per system (upper + lower)
    pub staves_per_system: usize,
    pub measures_per_staff: u32,
    /// Ink stroke width for stems, hollow noteheads and beams
    pub note_line: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            window_width: 1200.0,
            window_height: 800.0,
            button_width: 60.0,
            button_height: 80.0,
            buffer: 10.0,
            chat_width: 200.0,
            systems: 3,
            staves_per_system: 2,
            measures_per_staff: 4,
            note_line: 4.0,
        }
    }
}

impl LayoutConfig {
    /// Default layout for a window of the given size.
    pub fn from_window(width: f64, height: f64) -> Self {
        Self {
            window_width: width,
            window_height: height,
            ..Self::default()
        }
    }

    /// Parse a layout config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn staff_count(&self) -> usize {
        self.systems * self.staves_per_system
    }

    pub fn staff_height(&self) -> f64 {
        let usable = self.window_height - self.button_height - 2.0 * self.buffer;
        (usable / (2 * self.staff_count() + 1) as f64).floor()
    }

    /// Length of the note-bearing part of a staff.
    pub fn staff_length(&self) -> f64 {
        self.window_width - self.chat_width - 4.0 * self.staff_height()
    }

    /// Width reserved for the clef and time-signature glyphs.
    pub fn sign_length(&self) -> f64 {
        2.0 * self.staff_height()
    }

    pub fn measure_width(&self) -> f64 {
        self.staff_length() / self.measures_per_staff as f64
    }

    /// Vertical distance of one diatonic step (half a line spacing).
    pub fn step_height(&self) -> f64 {
        self.staff_height() / 8.0
    }

    pub fn line_spacing(&self) -> f64 {
        self.staff_height() / 4.0
    }

    pub fn head_radius(&self) -> f64 {
        self.staff_height() / 8.0
    }

    /// Offset of the top staff line from the staff's anchor.
    pub fn top_line_offset(&self) -> f64 {
        self.staff_height() / 2.0
    }

    /// Clicks left of this x offset land on the clef.
    pub fn clef_zone_end(&self) -> f64 {
        1.5 * self.staff_height()
    }

    /// Horizontal offset where the first measure begins. Clicks between
    /// `clef_zone_end` and here land on the time signature.
    pub fn notes_origin(&self) -> f64 {
        self.staff_height() / 2.0 + self.sign_length()
    }

    pub fn staff_width(&self) -> f64 {
        self.staff_length() + self.sign_length() + self.staff_height()
    }

    /// Height of a staff's clickable strip of paper.
    pub fn staff_strip_height(&self) -> f64 {
        2.0 * self.staff_height()
    }
}
