//! Note rendering: ledger lines, heads, stems, dots, accidental and
//! ornament marks, flags and beams.

use std::f64::consts::FRAC_PI_2;

use super::constants::*;
use super::Surface;
use crate::beam::{BeamPlan, Flag};
use crate::config::LayoutConfig;
use crate::layout::{ledger_line_steps, steps_to_y, Point, Rect, StaffContext};
use crate::model::{NoteValue, Stem, EPSILON};
use crate::note::Note;
use crate::tools::{accidental_asset, ornament_asset};

pub(super) fn draw_notes<S: Surface + ?Sized>(
    surface: &mut S,
    cfg: &LayoutConfig,
    ctx: &StaffContext,
    notes: &[Note],
    plan: &BeamPlan,
) {
    for (i, note) in notes.iter().enumerate() {
        let tip = plan.stem_tip(i).unwrap_or(note.geometry().stem_tip);
        draw_note(surface, cfg, ctx, note, tip);
    }

    for flag in &plan.flags {
        draw_flag(surface, cfg, flag);
    }

    for beam in plan.primary.iter().chain(&plan.secondary) {
        surface.line(beam.from, beam.to, cfg.note_line);
    }
}

fn draw_note<S: Surface + ?Sized>(
    surface: &mut S,
    cfg: &LayoutConfig,
    ctx: &StaffContext,
    note: &Note,
    stem_tip: f64,
) {
    let g = note.geometry();
    let r = cfg.head_radius();
    let head = g.head;

    for steps in ledger_line_steps(g.steps_down) {
        let y = ctx.anchor.y + steps_to_y(cfg, steps);
        surface.line(
            Point::new(head.x - LEDGER_HALF_LENGTH * r, y),
            Point::new(head.x + LEDGER_HALF_LENGTH * r, y),
            LEDGER_LINE_WIDTH,
        );
    }

    // Halves and wholes are hollow
    if note.duration < NoteValue::Half.fraction() - EPSILON {
        surface.circle(head, r, None);
    } else {
        surface.circle(head, r, Some(cfg.note_line));
    }

    if g.has_stem {
        surface.line(Point::new(g.stem_x, head.y), Point::new(g.stem_x, stem_tip), cfg.note_line);
    }

    if note.dotted {
        // A head on a line gets its dot in the space above
        let lift = if g.steps_down % 2 == 0 { cfg.step_height() } else { 0.0 };
        surface.circle(Point::new(head.x + DOT_OFFSET * r, head.y - lift), DOT_RADIUS * r, None);
    }

    if let Some(acc) = note.accidental() {
        let w = ACCIDENTAL_WIDTH * r;
        let h = ACCIDENTAL_HEIGHT * r;
        surface.image(
            accidental_asset(acc),
            Rect::new(head.x - r - ACCIDENTAL_GAP * r - w, head.y - h / 2.0, w, h),
        );
    }

    if let Some(orn) = note.ornament {
        let size = ORNAMENT_SIZE * r;
        let mut top = head.y - r;
        if g.has_stem && note.stem == Stem::Up {
            top = top.min(stem_tip);
        }
        surface.image(ornament_asset(orn), Rect::new(head.x - size / 2.0, top - size - r, size, size));
    }
}

/// Quarter-circle tails hanging off the stem tip, one per flag, stacked
/// toward the head.
fn draw_flag<S: Surface + ?Sized>(surface: &mut S, cfg: &LayoutConfig, flag: &Flag) {
    let radius = FLAG_RADIUS_STEPS * cfg.step_height();
    let toward_head = -flag.stem.direction();
    for k in 0..flag.count {
        let tip_y = flag.at.y + toward_head * k as f64 * cfg.line_spacing();
        let (center, start) = match flag.stem {
            Stem::Up => (Point::new(flag.at.x, tip_y + radius), -FRAC_PI_2),
            Stem::Down => (Point::new(flag.at.x, tip_y - radius), FRAC_PI_2),
        };
        surface.arc(center, radius, start, 0.0, cfg.note_line);
    }
}
