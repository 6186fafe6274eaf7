//! Integration tests for click placement, note editing and beaming,
//! driven through a session the way the game shell drives it.

use musicmaker::layout::steps_to_y;
use musicmaker::{
    Accidental, ClickOutcome, Error, Letter, Ornament, Pitch, Point, Session, Stem, TimePosition,
    TimeSignature, Tool,
};
use pretty_assertions::assert_eq;

/// Absolute click inside staff `staff`: a fraction into `measure`, `steps`
/// diatonic steps below the top line.
fn note_point(s: &Session, staff: usize, measure: u32, fraction: f64, steps: i32) -> Point {
    let cfg = s.config();
    let anchor = s.paper().staves()[staff].anchor;
    let x = cfg.notes_origin() + ((measure - 1) as f64 + fraction) * cfg.measure_width() + 0.5;
    Point::new(anchor.x + x, anchor.y + steps_to_y(cfg, steps))
}

fn place(s: &mut Session, tool: &str, staff: usize, measure: u32, fraction: f64, steps: i32) -> ClickOutcome {
    s.select_tool_named(tool).unwrap();
    let p = note_point(s, staff, measure, fraction, steps);
    s.click(p)
}

// ═══════════════════════════════════════════════════════════════════════
// Placement
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn whole_note_on_the_treble_top_line() {
    let mut s = Session::default();
    assert_eq!(place(&mut s, "whole", 0, 1, 0.0, 0), ClickOutcome::Placed(0));

    let note = &s.paper().staves()[0].notes()[0];
    assert_eq!(note.time, TimePosition::new(1, 1.0));
    assert_eq!(note.duration, 1.0);
    assert_eq!(note.pitch, Pitch::new(Letter::F, 5));
    assert_eq!(note.accidental(), None);
    assert_eq!(note.ornament, None);
    assert_eq!(note.stem, Stem::Up);
    println!("✓ whole note at (1,1) = {:?}", note.pitch);
}

#[test]
fn lower_staff_reads_in_bass_clef() {
    let mut s = Session::default();
    place(&mut s, "eighth", 1, 2, 5.0 / 8.0, 4);
    let note = &s.paper().staves()[1].notes()[0];
    assert_eq!(note.time, TimePosition::new(2, 3.5));
    assert_eq!(note.pitch, Pitch::new(Letter::D, 3));
}

#[test]
fn duration_tool_always_places_a_new_note() {
    let mut s = Session::default();
    place(&mut s, "quarter", 0, 1, 0.0, 6);
    assert_eq!(place(&mut s, "quarter", 0, 1, 0.0, 6), ClickOutcome::Placed(1));
    assert_eq!(s.paper().staves()[0].notes().len(), 2);
}

#[test]
fn overflow_shrinks_instead_of_rejecting() {
    let mut s = Session::default();
    s.select_tool_named("3-4").unwrap();
    let h = s.config().staff_height();
    let anchor = s.paper().staves()[0].anchor;
    s.click(Point::new(anchor.x + 2.0 * h, anchor.y + 30.0));
    assert!(s.paper().staves().iter().all(|st| st.time_signature == TimeSignature::ThreeFour));

    // Second half-note slot of a 3/4 measure cannot hold a half
    place(&mut s, "half", 0, 1, 0.7, 4);
    let note = &s.paper().staves()[0].notes()[0];
    assert_eq!(note.duration, 0.25);
    assert_eq!(note.time, TimePosition::new(1, 3.0));
    println!("✓ overflowing half became a quarter on beat 3");
}

#[test]
fn two_ledger_lines_reach_each_way_through_the_paper() {
    let mut s = Session::default();
    // Second ledger line above the bass staff: E4
    assert_eq!(place(&mut s, "quarter", 1, 1, 0.0, -4), ClickOutcome::Placed(0));
    assert_eq!(s.paper().staves()[1].notes()[0].pitch, Pitch::new(Letter::E, 4));
    assert!(s.paper().staves()[0].notes().is_empty());

    // Second ledger line below the treble staff, just above where it meets the bass strip: A3
    let p = note_point(&s, 0, 2, 0.0, 12);
    assert_eq!(s.click(Point::new(p.x, p.y - 2.0)), ClickOutcome::Placed(0));
    assert_eq!(s.paper().staves()[0].notes()[0].pitch, Pitch::new(Letter::A, 3));
    assert_eq!(s.paper().staves()[1].notes().len(), 1);

    // A third ledger line above the top staff is off the paper
    assert_eq!(place(&mut s, "quarter", 0, 3, 0.0, -6), ClickOutcome::Ignored);
    assert_eq!(s.paper().staves()[0].notes().len(), 1);
}

#[test]
fn prefix_clicks_with_duration_tools_do_nothing() {
    let mut s = Session::default();
    s.select_tool_named("quarter").unwrap();
    let anchor = s.paper().staves()[0].anchor;
    assert_eq!(s.click(Point::new(anchor.x + 10.0, anchor.y + 40.0)), ClickOutcome::Ignored);
    assert!(s.paper().staves()[0].notes().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
// Editing
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn edit_tools_round_trip_on_a_placed_note() {
    let mut s = Session::default();
    place(&mut s, "quarter", 0, 1, 0.0, 6);
    let p = note_point(&s, 0, 1, 0.0, 6);

    for tool in ["sharp", "dot", "pince", "inverse"] {
        s.select_tool_named(tool).unwrap();
        assert_eq!(s.click(p), ClickOutcome::Edited(0), "{tool}");
    }
    let note = s.paper().staves()[0].notes()[0].clone();
    assert_eq!(note.accidental(), Some(Accidental::Sharp));
    assert!(note.dotted);
    assert_eq!(note.duration, 0.375);
    assert_eq!(note.ornament, Some(Ornament::Pince));
    assert_eq!(note.stem, Stem::Down);
}

#[test]
fn eraser_removes_one_mark_per_click() {
    let mut s = Session::default();
    place(&mut s, "half", 0, 1, 0.0, 3);
    let p = note_point(&s, 0, 1, 0.0, 3);
    for tool in ["dot", "tremblement"] {
        s.select_tool_named(tool).unwrap();
        s.click(p);
    }

    s.select_tool_named("eraser").unwrap();
    assert_eq!(s.click(p), ClickOutcome::Edited(0));
    let note = &s.paper().staves()[0].notes()[0];
    assert_eq!(note.ornament, None);
    assert!(note.dotted, "the first erase only strips the ornament");

    assert_eq!(s.click(p), ClickOutcome::Edited(0));
    assert!(!s.paper().staves()[0].notes()[0].dotted);

    assert_eq!(s.click(p), ClickOutcome::Removed(0));
    assert!(s.paper().staves()[0].notes().is_empty());
}

#[test]
fn port_de_voix_dots_and_coule_undots() {
    let mut s = Session::default();
    place(&mut s, "eighth", 0, 1, 0.0, 5);
    let p = note_point(&s, 0, 1, 0.0, 5);

    s.select_tool_named("port-de-voix").unwrap();
    s.click(p);
    assert_eq!(s.paper().staves()[0].notes()[0].duration, 0.1875);

    s.select_tool_named("coule").unwrap();
    s.click(p);
    let note = &s.paper().staves()[0].notes()[0];
    assert_eq!(note.duration, 0.125);
    assert_eq!(note.ornament, Some(Ornament::Coule));
}

#[test]
fn port_de_voix_keeps_an_undotted_last_beat() {
    let mut s = Session::default();
    place(&mut s, "quarter", 0, 1, 0.75, 4);
    let p = note_point(&s, 0, 1, 0.75, 4);
    assert_eq!(s.paper().staves()[0].notes()[0].time, TimePosition::new(1, 4.0));

    // A dotted quarter on beat 4 would spill into measure 2
    s.select_tool_named("port-de-voix").unwrap();
    assert_eq!(s.click(p), ClickOutcome::Edited(0));
    let note = &s.paper().staves()[0].notes()[0];
    assert_eq!(note.ornament, Some(Ornament::PortDeVoix));
    assert!(!note.dotted);
    assert_eq!(note.duration, 0.25);
}

#[test]
fn unknown_tool_names_are_errors() {
    let mut s = Session::default();
    let err = s.select_tool_named("glissando").unwrap_err();
    assert!(matches!(err, Error::UnknownTool(_)));
    assert_eq!(s.tool(), Tool::Select);
}

// ═══════════════════════════════════════════════════════════════════════
// Beaming
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn four_sixteenths_share_primary_and_secondary_beams() {
    let mut s = Session::default();
    for (i, steps) in [4, 5, 6, 7].into_iter().enumerate() {
        place(&mut s, "sixteenth", 0, 1, i as f64 / 16.0, steps);
    }
    let staff = &s.paper().staves()[0];
    let plan = staff.beam_plan(s.config());
    assert_eq!(plan.primary.len(), 1);
    assert_eq!(plan.secondary.len(), 3);
    assert!(plan.flags.is_empty());

    // Every tip lies on the primary beam
    let beam = plan.primary[0];
    let slope = (beam.to.y - beam.from.y) / (beam.to.x - beam.from.x);
    for (i, note) in staff.notes().iter().enumerate() {
        let x = note.geometry().stem_x;
        let y = plan.stem_tip(i).unwrap();
        assert!((beam.from.y + slope * (x - beam.from.x) - y).abs() < 1e-9);
    }
    println!("✓ four sixteenths beamed, slope {slope:.3}");
}

#[test]
fn lone_eighth_keeps_its_flag() {
    let mut s = Session::default();
    place(&mut s, "eighth", 0, 1, 0.0, 4);
    place(&mut s, "quarter", 0, 1, 0.25, 4);
    let plan = s.paper().staves()[0].beam_plan(s.config());
    assert!(plan.primary.is_empty());
    assert_eq!(plan.flags.len(), 1);
    assert_eq!(plan.flags[0].count, 1);
}
