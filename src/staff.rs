//! A staff: its signs, its time-sorted notes and click dispatch within it.

use serde::Serialize;

use crate::beam::{plan_beams, BeamNote, BeamPlan};
use crate::config::LayoutConfig;
use crate::layout::{fits_in_measure, resolve_placement, zone_at, Point, Rect, StaffContext, StaffZone};
use crate::model::{Clef, NoteValue, TimeSignature, EPSILON};
use crate::note::{Note, ToolEffect};
use crate::render::constants::SECONDARY_GAP_LINES;
use crate::render::{draw_staff, Surface};
use crate::tools::Tool;

/// What a click on a staff did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored,
    ClefApplied(Clef),
    TimeSignatureApplied(TimeSignature),
    /// A new note landed at this index
    Placed(usize),
    Edited(usize),
    Removed(usize),
}

impl ClickOutcome {
    pub fn needs_repaint(&self) -> bool {
        !matches!(self, ClickOutcome::Ignored)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Staff {
    /// Top-left corner of the staff's strip of paper
    pub anchor: Point,
    pub clef: Clef,
    pub time_signature: TimeSignature,
    /// Sorted by time; equal times keep insertion order
    notes: Vec<Note>,
}

impl Staff {
    pub fn new(anchor: Point, clef: Clef, time_signature: TimeSignature) -> Self {
        Self { anchor, clef, time_signature, notes: Vec::new() }
    }

    pub fn context(&self) -> StaffContext {
        StaffContext { anchor: self.anchor, clef: self.clef, time_signature: self.time_signature }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The staff's clickable strip.
    pub fn bounds(&self, cfg: &LayoutConfig) -> Rect {
        Rect::new(self.anchor.x, self.anchor.y, cfg.staff_width(), cfg.staff_strip_height())
    }

    /// Dispatch a click at absolute `point` with the active tool.
    ///
    /// The staff prefix takes clef and time-signature tools; the note area
    /// takes duration tools (always a new note) and edit tools (applied to
    /// the note under the pointer). Everything else is ignored.
    pub fn click(&mut self, cfg: &LayoutConfig, point: Point, tool: Tool) -> ClickOutcome {
        let offset = point.offset_from(self.anchor);
        match (zone_at(cfg, offset.x), tool) {
            (StaffZone::Clef, Tool::Clef(clef)) => {
                self.change_clef(cfg, clef);
                ClickOutcome::ClefApplied(clef)
            }
            (StaffZone::TimeSignature, Tool::TimeSignature(sig)) => {
                self.change_time_signature(cfg, sig);
                ClickOutcome::TimeSignatureApplied(sig)
            }
            (StaffZone::Notes, Tool::Duration(value)) => {
                self.place_note(cfg, point, value).map_or(ClickOutcome::Ignored, ClickOutcome::Placed)
            }
            (StaffZone::Notes, tool) if tool.edits_notes() => match self.note_at(cfg, point) {
                Some(index) => self.apply_tool_to(cfg, index, tool),
                None => ClickOutcome::Ignored,
            },
            _ => ClickOutcome::Ignored,
        }
    }

    /// Resolve a placement click into a new note. Returns its index, or
    /// `None` when the click does not map to a legal placement.
    pub fn place_note(&mut self, cfg: &LayoutConfig, point: Point, value: NoteValue) -> Option<usize> {
        let ctx = self.context();
        let placement = resolve_placement(cfg, &ctx, point.offset_from(self.anchor), value)?;
        log::debug!(
            "placed {} at measure {} beat {} pitch {:?}",
            placement.duration,
            placement.time.measure,
            placement.time.beat,
            placement.pitch
        );
        Some(self.insert(Note::placed(cfg, &ctx, placement)))
    }

    /// Insert keeping time order; a note tied with existing ones goes last.
    pub fn insert(&mut self, note: Note) -> usize {
        let index = self.notes.partition_point(|n| n.time <= note.time);
        self.notes.insert(index, note);
        index
    }

    /// Topmost note whose bounds contain `point`.
    pub fn note_at(&self, cfg: &LayoutConfig, point: Point) -> Option<usize> {
        self.notes.iter().rposition(|n| n.geometry().bounds(cfg).contains(point))
    }

    pub fn apply_tool_to(&mut self, cfg: &LayoutConfig, index: usize, tool: Tool) -> ClickOutcome {
        let ctx = self.context();
        let Some(note) = self.notes.get_mut(index) else {
            return ClickOutcome::Ignored;
        };
        match note.apply_tool(tool, cfg, &ctx) {
            ToolEffect::Unchanged => ClickOutcome::Ignored,
            ToolEffect::Changed => ClickOutcome::Edited(index),
            ToolEffect::Remove => {
                self.notes.remove(index);
                ClickOutcome::Removed(index)
            }
        }
    }

    pub fn change_clef(&mut self, cfg: &LayoutConfig, clef: Clef) {
        log::info!("clef {:?} -> {:?} at {:?}", self.clef, clef, self.anchor);
        self.clef = clef;
        self.relayout(cfg);
    }

    /// Switch time signature, refitting notes to the new measure length.
    ///
    /// Notes that start past the end of the shorter measure are dropped;
    /// notes that run over it are halved until they fit, and dropped if that
    /// takes them below a sixteenth.
    pub fn change_time_signature(&mut self, cfg: &LayoutConfig, sig: TimeSignature) {
        log::info!("time signature {:?} -> {:?} at {:?}", self.time_signature, sig, self.anchor);
        self.time_signature = sig;

        let before = self.notes.len();
        self.notes.retain_mut(|note| {
            if note.time.offset_in_measure() >= sig.quarters_per_measure() - EPSILON {
                return false;
            }
            while !fits_in_measure(sig, &note.time, note.duration) {
                note.duration /= 2.0;
                if note.duration < NoteValue::shortest() - EPSILON {
                    return false;
                }
            }
            true
        });
        if self.notes.len() < before {
            log::debug!("dropped {} notes that no longer fit", before - self.notes.len());
        }

        self.relayout(cfg);
    }

    /// Recompute every note's geometry from the staff's current signs.
    pub fn relayout(&mut self, cfg: &LayoutConfig) {
        let ctx = self.context();
        for note in &mut self.notes {
            note.set_position(cfg, &ctx);
        }
    }

    pub fn beam_plan(&self, cfg: &LayoutConfig) -> BeamPlan {
        let quarters = self.time_signature.quarters_per_measure();
        let beam_notes: Vec<BeamNote> = self
            .notes
            .iter()
            .enumerate()
            .map(|(index, n)| BeamNote {
                index,
                beat: n.time.quarters_from_staff_start(quarters).floor() as i64,
                stem: n.stem,
                stem_x: n.geometry().stem_x,
                tip_y: n.geometry().stem_tip,
                duration: n.duration,
            })
            .collect();
        plan_beams(&beam_notes, SECONDARY_GAP_LINES * cfg.note_line)
    }

    pub fn render<S: Surface + ?Sized>(&self, cfg: &LayoutConfig, surface: &mut S) {
        draw_staff(surface, cfg, self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::steps_to_y;
    use crate::model::{Accidental, Letter, Pitch, Stem, TimePosition};

    const ANCHOR: Point = Point { x: 26.0, y: 26.0 };

    fn staff() -> Staff {
        Staff::new(ANCHOR, Clef::Treble, TimeSignature::Common)
    }

    /// Absolute click at a fraction of a measure, `steps` below the top line.
    fn at(cfg: &LayoutConfig, measure: u32, fraction: f64, steps: i32) -> Point {
        let x = cfg.notes_origin() + ((measure - 1) as f64 + fraction) * cfg.measure_width() + 0.5;
        Point::new(ANCHOR.x + x, ANCHOR.y + steps_to_y(cfg, steps))
    }

    #[test]
    fn notes_stay_sorted_and_ties_keep_insertion_order() {
        let cfg = LayoutConfig::default();
        let mut s = staff();
        let q = Tool::Duration(NoteValue::Quarter);
        assert_eq!(s.click(&cfg, at(&cfg, 2, 0.0, 4), q), ClickOutcome::Placed(0));
        assert_eq!(s.click(&cfg, at(&cfg, 1, 0.25, 4), q), ClickOutcome::Placed(0));
        assert_eq!(s.click(&cfg, at(&cfg, 1, 0.25, 2), q), ClickOutcome::Placed(1));

        let times: Vec<TimePosition> = s.notes().iter().map(|n| n.time).collect();
        assert_eq!(times, vec![
            TimePosition::new(1, 2.0),
            TimePosition::new(1, 2.0),
            TimePosition::new(2, 1.0),
        ]);
        assert_eq!(s.notes()[0].pitch, Pitch::new(Letter::B, 4));
        assert_eq!(s.notes()[1].pitch, Pitch::new(Letter::D, 5));
    }

    #[test]
    fn prefix_zones_take_only_their_own_tools() {
        let cfg = LayoutConfig::default();
        let mut s = staff();
        let clef_zone = Point::new(ANCHOR.x + cfg.staff_height(), ANCHOR.y + 30.0);
        let sig_zone = Point::new(ANCHOR.x + 2.0 * cfg.staff_height(), ANCHOR.y + 30.0);

        assert_eq!(s.click(&cfg, clef_zone, Tool::TimeSignature(TimeSignature::SixFour)), ClickOutcome::Ignored);
        assert_eq!(s.click(&cfg, clef_zone, Tool::Clef(Clef::Bass)), ClickOutcome::ClefApplied(Clef::Bass));
        assert_eq!(s.clef, Clef::Bass);
        assert_eq!(s.click(&cfg, sig_zone, Tool::Duration(NoteValue::Half)), ClickOutcome::Ignored);
        assert_eq!(
            s.click(&cfg, sig_zone, Tool::TimeSignature(TimeSignature::ThreeTwo)),
            ClickOutcome::TimeSignatureApplied(TimeSignature::ThreeTwo)
        );
        assert!(s.notes().is_empty());
    }

    #[test]
    fn edit_tools_hit_the_note_under_the_pointer() {
        let cfg = LayoutConfig::default();
        let mut s = staff();
        let p = at(&cfg, 1, 0.0, 6);
        s.click(&cfg, p, Tool::Duration(NoteValue::Quarter));

        assert_eq!(s.click(&cfg, p, Tool::Dot), ClickOutcome::Edited(0));
        assert!(s.notes()[0].dotted);
        assert_eq!(s.click(&cfg, p, Tool::Accidental(Accidental::Flat)), ClickOutcome::Edited(0));
        // Empty paper under an edit tool
        assert_eq!(s.click(&cfg, at(&cfg, 3, 0.5, 6), Tool::Dot), ClickOutcome::Ignored);

        assert_eq!(s.click(&cfg, p, Tool::Eraser), ClickOutcome::Edited(0));
        assert_eq!(s.click(&cfg, p, Tool::Eraser), ClickOutcome::Edited(0));
        assert_eq!(s.click(&cfg, p, Tool::Eraser), ClickOutcome::Removed(0));
        assert!(s.notes().is_empty());
    }

    #[test]
    fn select_tool_is_a_no_op() {
        let cfg = LayoutConfig::default();
        let mut s = staff();
        let p = at(&cfg, 1, 0.0, 6);
        s.click(&cfg, p, Tool::Duration(NoteValue::Half));
        let before = s.clone();
        assert_eq!(s.click(&cfg, p, Tool::Select), ClickOutcome::Ignored);
        assert_eq!(s, before);
    }

    #[test]
    fn clef_change_relayouts_notes_and_keeps_pitches() {
        let cfg = LayoutConfig::default();
        let mut s = staff();
        s.click(&cfg, at(&cfg, 1, 0.0, 0), Tool::Duration(NoteValue::Whole));
        let head_before = s.notes()[0].geometry().head.y;
        s.change_clef(&cfg, Clef::Bass);
        assert_eq!(s.notes()[0].pitch, Pitch::new(Letter::F, 5));
        // F5 sits twelve steps above the bass top line
        let expected = ANCHOR.y + steps_to_y(&cfg, -12);
        assert_eq!(s.notes()[0].geometry().head.y, expected);
        assert!(expected < head_before);
    }

    #[test]
    fn shorter_measures_drop_or_halve_notes() {
        let cfg = LayoutConfig::default();
        let mut s = staff();
        s.click(&cfg, at(&cfg, 1, 0.5, 4), Tool::Duration(NoteValue::Half));
        s.click(&cfg, at(&cfg, 1, 0.75, 4), Tool::Duration(NoteValue::Quarter));
        s.click(&cfg, at(&cfg, 2, 0.0, 4), Tool::Duration(NoteValue::Quarter));
        assert_eq!(s.notes().len(), 3);

        s.change_time_signature(&cfg, TimeSignature::ThreeFour);
        let kept: Vec<(TimePosition, f64)> = s.notes().iter().map(|n| (n.time, n.duration)).collect();
        assert_eq!(kept, vec![
            (TimePosition::new(1, 3.0), 0.25),
            (TimePosition::new(2, 1.0), 0.25),
        ]);
    }

    #[test]
    fn eighths_sharing_a_beat_are_beamed() {
        let cfg = LayoutConfig::default();
        let mut s = staff();
        let e = Tool::Duration(NoteValue::Eighth);
        s.click(&cfg, at(&cfg, 1, 0.0, 6), e);
        s.click(&cfg, at(&cfg, 1, 0.125, 3), e);
        s.click(&cfg, at(&cfg, 1, 0.25, 5), e);

        let plan = s.beam_plan(&cfg);
        assert_eq!(plan.primary.len(), 1);
        assert_eq!(plan.stem_tips.len(), 2);
        assert_eq!(plan.flags.len(), 1);
        assert_eq!(plan.flags[0].index, 2);
        assert_eq!(plan.flags[0].stem, Stem::Up);
    }
}
