//! musicmaker: notation core of the "Elisabeth and the Music Maker"
//! teaching game.
//!
//! Turns clicks plus the active tool into notes on a sheet of paired
//! staves, lays them out and beams them, draws them onto any 2D
//! [`Surface`], and translates the result into a MIDI performance.
//!
//! # Example
//! ```
//! use musicmaker::{Point, Session};
//!
//! let mut session = Session::default();
//! session.select_tool_named("quarter").unwrap();
//!
//! // First beat of the top staff, on its top line
//! let cfg = session.config().clone();
//! let anchor = session.paper().staves()[0].anchor;
//! let click = Point::new(anchor.x + cfg.notes_origin() + 1.0, anchor.y + cfg.top_line_offset());
//! assert!(session.click(click).needs_repaint());
//!
//! let note = &session.paper().staves()[0].notes()[0];
//! println!("placed {:?} at {:?}", note.pitch, note.time);
//!
//! let smf = session.export_midi();
//! assert_eq!(&smf[..4], b"MThd");
//! ```

pub mod beam;
pub mod config;
pub mod error;
pub mod layout;
pub mod midi;
pub mod model;
pub mod note;
pub mod ornament;
pub mod paper;
pub mod render;
pub mod session;
pub mod staff;
pub mod tools;

pub use config::LayoutConfig;
pub use error::{Error, Result};
pub use layout::{Point, Rect};
pub use midi::{encode_smf, translate, NoteEvent, Performance};
pub use model::*;
pub use note::Note;
pub use paper::Paper;
pub use render::{DisplayList, Primitive, Surface, SvgSurface};
pub use session::Session;
pub use staff::{ClickOutcome, Staff};
pub use tools::Tool;

/// Convert a performance's event list to a JSON string.
/// Useful for passing data across FFI boundaries.
pub fn performance_to_json(perf: &Performance) -> Result<String> {
    Ok(serde_json::to_string_pretty(perf)?)
}

/// Convert the notes of every staff on the paper to a JSON string.
pub fn paper_to_json(paper: &Paper) -> Result<String> {
    Ok(serde_json::to_string_pretty(paper.staves())?)
}
