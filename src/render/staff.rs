//! Staff rendering: lines, barlines, clef and time-signature glyphs, then
//! the notes with their beams.

use super::constants::*;
use super::notes::draw_notes;
use super::Surface;
use crate::config::LayoutConfig;
use crate::layout::{Point, Rect};
use crate::staff::Staff;
use crate::tools::{clef_asset, time_signature_asset};

pub(crate) fn draw_staff<S: Surface + ?Sized>(surface: &mut S, cfg: &LayoutConfig, staff: &Staff) {
    let h = cfg.staff_height();
    let anchor = staff.anchor;
    let left = anchor.x + h / 2.0;
    let right = left + cfg.sign_length() + cfg.staff_length();
    let top = anchor.y + cfg.top_line_offset();
    let bottom = top + 4.0 * cfg.line_spacing();

    // ── Five lines ──
    for i in 0..5 {
        let y = top + i as f64 * cfg.line_spacing();
        surface.line(Point::new(left, y), Point::new(right, y), STAFF_LINE_WIDTH);
    }

    // ── Barlines: staff start, then the end of every measure ──
    surface.line(Point::new(left, top), Point::new(left, bottom), BARLINE_WIDTH);
    for m in 1..=cfg.measures_per_staff {
        let x = anchor.x + cfg.notes_origin() + m as f64 * cfg.measure_width();
        surface.line(Point::new(x, top), Point::new(x, bottom), BARLINE_WIDTH);
    }

    // ── Signs ──
    surface.image(clef_asset(staff.clef), Rect::new(left, top, h, h));
    surface.image(
        time_signature_asset(staff.time_signature),
        Rect::new(anchor.x + cfg.clef_zone_end(), top, h, h),
    );

    draw_notes(surface, cfg, &staff.context(), staff.notes(), &staff.beam_plan(cfg));
}
