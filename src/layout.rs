//! Geometry of a staff: click pixels ↔ (pitch, time, duration) ↔ screen
//! positions.
//!
//! Everything here is a pure function of the [`LayoutConfig`] and the
//! staff context passed in explicitly. Offsets are measured from the
//! staff's anchor (top-left corner of its strip of paper); y grows
//! downward and one diatonic step is an eighth of the staff height.

use serde::{Deserialize, Serialize};

use crate::config::{LayoutConfig, MAX_LEDGER_LINES, STEM_STEPS};
use crate::model::*;

/// Steps from the top line to the bottom line of the five-line staff.
pub const STAFF_BODY_STEPS: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// This point relative to `origin`.
    pub fn offset_from(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment, matching pixel hit-testing.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// Staff attributes every layout call needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StaffContext {
    pub anchor: Point,
    pub clef: Clef,
    pub time_signature: TimeSignature,
}

/// Horizontal regions of a staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffZone {
    Clef,
    TimeSignature,
    Notes,
}

pub fn zone_at(cfg: &LayoutConfig, x_offset: f64) -> StaffZone {
    if x_offset < cfg.clef_zone_end() {
        StaffZone::Clef
    } else if x_offset < cfg.notes_origin() {
        StaffZone::TimeSignature
    } else {
        StaffZone::Notes
    }
}

/// A click resolved into a musical event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub time: TimePosition,
    pub duration: f64,
    pub pitch: Pitch,
}

/// Resolve a placement click at `offset` (relative to the staff anchor)
/// with the given duration tool.
///
/// Returns `None` for clicks outside the note area, past the last measure,
/// beyond the ledger-line range, or that would need a note shorter than a
/// sixteenth to fit.
pub fn resolve_placement(
    cfg: &LayoutConfig,
    ctx: &StaffContext,
    offset: Point,
    value: NoteValue,
) -> Option<Placement> {
    if zone_at(cfg, offset.x) != StaffZone::Notes {
        return None;
    }

    let along = offset.x - cfg.notes_origin();
    let measure_px = cfg.measure_width();
    let measure_idx = (along / measure_px).floor();
    if measure_idx < 0.0 || measure_idx >= cfg.measures_per_staff as f64 {
        return None;
    }
    let remainder = along - measure_idx * measure_px;

    let capacity = ctx.time_signature.capacity();
    let slot_px = slot_width(cfg, ctx.time_signature, value.fraction());
    let slot = 1 + (remainder / slot_px).floor() as u32;

    let Some((duration, slot)) = fit_duration(value.fraction(), slot, capacity) else {
        log::warn!(
            "placement of {:?} at slot {slot} cannot fit measure {} above the sixteenth floor",
            value,
            measure_idx + 1.0
        );
        return None;
    };

    let steps = steps_down_at(cfg, offset.y);
    if !within_ledger_range(steps) {
        return None;
    }

    Some(Placement {
        time: TimePosition::new(measure_idx as u32 + 1, slot_to_beat(slot, duration)),
        duration,
        pitch: pitch_at(ctx.clef, steps),
    })
}

/// Shrink a placement until it fits the measure.
///
/// While `duration × slot` exceeds the measure's `capacity`, the duration
/// is halved and the 1-based slot index remapped so the note keeps its
/// onset. Gives up (returns `None`) below a sixteenth.
pub fn fit_duration(mut duration: f64, mut slot: u32, capacity: f64) -> Option<(f64, u32)> {
    while duration * slot as f64 > capacity + EPSILON {
        duration /= 2.0;
        slot = 1 + 2 * (slot - 1);
        if duration < NoteValue::shortest() - EPSILON {
            return None;
        }
    }
    Some((duration, slot))
}

/// Beat (1-based, in quarters) of a 1-based slot of the given duration.
pub fn slot_to_beat(slot: u32, duration: f64) -> f64 {
    (slot - 1) as f64 * 4.0 * duration + 1.0
}

/// Pixel width a duration occupies within a measure.
pub fn slot_width(cfg: &LayoutConfig, sig: TimeSignature, duration: f64) -> f64 {
    duration / sig.capacity() * cfg.measure_width()
}

/// Whether a note starting at `time` and lasting `duration` ends inside its measure.
pub fn fits_in_measure(sig: TimeSignature, time: &TimePosition, duration: f64) -> bool {
    time.offset_in_measure() + duration_in_beats(duration) <= sig.quarters_per_measure() + EPSILON
}

/// Offset of the click band whose centre is the top staff line.
fn head_band_offset(cfg: &LayoutConfig) -> f64 {
    cfg.top_line_offset() - cfg.step_height() / 2.0
}

/// Diatonic steps below the top staff line for a click at `y_offset`.
pub fn steps_down_at(cfg: &LayoutConfig, y_offset: f64) -> i32 {
    ((y_offset - head_band_offset(cfg)) / cfg.step_height()).floor() as i32
}

/// Vertical offset of a notehead centre `steps` below the top line.
pub fn steps_to_y(cfg: &LayoutConfig, steps: i32) -> f64 {
    cfg.top_line_offset() + steps as f64 * cfg.step_height()
}

pub fn steps_down(clef: Clef, pitch: &Pitch) -> i32 {
    clef.top_rung() - pitch.rung()
}

pub fn pitch_at(clef: Clef, steps: i32) -> Pitch {
    Pitch::from_rung(clef.top_rung() - steps)
}

pub fn within_ledger_range(steps: i32) -> bool {
    let reach = 2 * MAX_LEDGER_LINES;
    (-reach..=STAFF_BODY_STEPS + reach).contains(&steps)
}

/// Step positions of the ledger lines a note `steps` below the top line needs.
pub fn ledger_line_steps(steps: i32) -> Vec<i32> {
    if steps < 0 {
        (steps..=-2).rev().filter(|s| s % 2 == 0).collect()
    } else if steps > STAFF_BODY_STEPS {
        (STAFF_BODY_STEPS + 2..=steps).filter(|s| s % 2 == 0).collect()
    } else {
        Vec::new()
    }
}

/// Horizontal offset of a time position from the staff anchor.
pub fn time_to_x(cfg: &LayoutConfig, sig: TimeSignature, time: &TimePosition) -> f64 {
    let measures = time.measure.saturating_sub(1) as f64 + time.offset_in_measure() / sig.quarters_per_measure();
    cfg.notes_origin() + measures * cfg.measure_width()
}

/// Screen geometry of a note, in absolute pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NoteGeometry {
    /// Left edge of the note's time slot
    pub left: f64,
    /// Width of the time slot (never narrower than the head)
    pub width: f64,
    pub head: Point,
    pub steps_down: i32,
    pub stem_x: f64,
    /// y of the unbeamed stem tip
    pub stem_tip: f64,
    pub has_stem: bool,
}

impl NoteGeometry {
    /// Clickable box: the time slot horizontally, head plus stem vertically.
    pub fn bounds(&self, cfg: &LayoutConfig) -> Rect {
        let r = cfg.head_radius();
        let (top, bottom) = if self.has_stem {
            (self.head.y.min(self.stem_tip), self.head.y.max(self.stem_tip))
        } else {
            (self.head.y, self.head.y)
        };
        Rect::new(self.left, top - r, self.width, bottom - top + 2.0 * r)
    }
}

pub fn note_geometry(
    cfg: &LayoutConfig,
    ctx: &StaffContext,
    time: &TimePosition,
    pitch: &Pitch,
    duration: f64,
    stem: Stem,
) -> NoteGeometry {
    let r = cfg.head_radius();
    let steps = steps_down(ctx.clef, pitch);
    let left = ctx.anchor.x + time_to_x(cfg, ctx.time_signature, time);
    let head = Point::new(left + r, ctx.anchor.y + steps_to_y(cfg, steps));
    let stem_x = match stem {
        Stem::Up => head.x + r - cfg.note_line / 2.0,
        Stem::Down => head.x - r + cfg.note_line / 2.0,
    };

    NoteGeometry {
        left,
        width: slot_width(cfg, ctx.time_signature, duration).max(2.0 * r),
        head,
        steps_down: steps,
        stem_x,
        stem_tip: head.y + stem.direction() * STEM_STEPS as f64 * cfg.step_height(),
        has_stem: duration < NoteValue::Whole.fraction() - EPSILON,
    }
}
