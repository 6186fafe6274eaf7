//! Beam grouping for eighth and sixteenth notes.
//!
//! Short notes are grouped by the integer beat they start in, and each
//! beat's notes are split by stem orientation: the two voices never share
//! a beam. A lone note keeps its flag; two or more notes get one straight
//! primary beam from the first stem tip to the last, with every inner stem
//! tip pulled onto that line. Sixteenth-level neighbours add secondary
//! beam segments just inside the primary.

use serde::Serialize;

use crate::layout::Point;
use crate::model::{is_beamable, is_sixteenth_level, Stem, EPSILON};

/// The part of a note the beam planner looks at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamNote {
    /// Index of the note on its staff
    pub index: usize,
    /// Integer beat the note starts in, counted from the staff start
    pub beat: i64,
    pub stem: Stem,
    pub stem_x: f64,
    pub tip_y: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Flag {
    pub index: usize,
    /// Stem tip the flag hangs from
    pub at: Point,
    pub count: u8,
    pub stem: Stem,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BeamPlan {
    /// Stem tips moved onto a beam: (note index, tip y)
    pub stem_tips: Vec<(usize, f64)>,
    pub primary: Vec<Segment>,
    pub secondary: Vec<Segment>,
    pub flags: Vec<Flag>,
}

impl BeamPlan {
    pub fn stem_tip(&self, index: usize) -> Option<f64> {
        self.stem_tips.iter().find(|(i, _)| *i == index).map(|&(_, y)| y)
    }
}

/// Plan beams and flags for a staff's notes in time order.
///
/// `secondary_gap` is the distance between primary and secondary beams.
pub fn plan_beams(notes: &[BeamNote], secondary_gap: f64) -> BeamPlan {
    let mut plan = BeamPlan::default();
    let mut current_beat: Option<i64> = None;
    let mut upper: Vec<BeamNote> = Vec::new();
    let mut lower: Vec<BeamNote> = Vec::new();

    for note in notes.iter().filter(|n| is_beamable(n.duration)) {
        if current_beat.is_some_and(|beat| note.beat > beat) {
            flush(&mut plan, &mut upper, secondary_gap);
            flush(&mut plan, &mut lower, secondary_gap);
        }
        current_beat = Some(note.beat);
        match note.stem {
            Stem::Up => upper.push(*note),
            Stem::Down => lower.push(*note),
        }
    }
    flush(&mut plan, &mut upper, secondary_gap);
    flush(&mut plan, &mut lower, secondary_gap);

    plan
}

fn flag_count(duration: f64) -> u8 {
    if is_sixteenth_level(duration) { 2 } else { 1 }
}

fn flag(note: &BeamNote) -> Flag {
    Flag {
        index: note.index,
        at: Point::new(note.stem_x, note.tip_y),
        count: flag_count(note.duration),
        stem: note.stem,
    }
}

fn flush(plan: &mut BeamPlan, group: &mut Vec<BeamNote>, secondary_gap: f64) {
    if group.is_empty() {
        return;
    }
    log::trace!("flushing beam group of {} at beat {}", group.len(), group[0].beat);

    let first = group[0];
    let last = group[group.len() - 1];
    let dx = last.stem_x - first.stem_x;

    if group.len() == 1 || dx.abs() < EPSILON {
        plan.flags.extend(group.iter().map(flag));
        group.clear();
        return;
    }

    let slope = (last.tip_y - first.tip_y) / dx;
    let beam_y = |x: f64| first.tip_y + slope * (x - first.stem_x);

    for note in group.iter() {
        plan.stem_tips.push((note.index, beam_y(note.stem_x)));
    }
    plan.primary.push(Segment {
        from: Point::new(first.stem_x, first.tip_y),
        to: Point::new(last.stem_x, last.tip_y),
    });

    // Secondary beams sit between the primary beam and the heads.
    let offset = -first.stem.direction() * secondary_gap;
    let secondary_at = |x: f64| Point::new(x, beam_y(x) + offset);

    for pair in group.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let half = (b.stem_x - a.stem_x) / 2.0;
        let span = match (is_sixteenth_level(a.duration), is_sixteenth_level(b.duration)) {
            (true, true) => Some((a.stem_x, b.stem_x)),
            (true, false) => Some((a.stem_x, a.stem_x + half)),
            (false, true) => Some((b.stem_x - half, b.stem_x)),
            (false, false) => None,
        };
        if let Some((x1, x2)) = span {
            plan.secondary.push(Segment { from: secondary_at(x1), to: secondary_at(x2) });
        }
    }

    group.clear();
}
