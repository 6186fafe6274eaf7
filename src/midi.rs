//! Score-to-MIDI translation and Standard MIDI File encoding.
//!
//! The translator walks the paper's staves and flattens their notes into
//! timed [`NoteEvent`]s, expanding agréments through the ornament table.
//! The encoder turns those events into a single-track SMF (format 0) with
//! a fixed tempo and a single instrument.

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::model::{duration_in_beats, Ornament};
use crate::note::Note;
use crate::ornament;
use crate::staff::Staff;

// ═══════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════

/// Ticks per quarter note in our MIDI output.
pub const TICKS_PER_QUARTER: u16 = 480;
pub const TEMPO_BPM: f64 = 120.0;
/// General MIDI harpsichord (0-based)
pub const PROGRAM: u8 = 6;
pub const CHANNEL: u8 = 0;
pub const VELOCITY: u8 = 127;

/// One sounding note, timed in quarter-note beats from the start of the piece.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoteEvent {
    /// MIDI key number
    pub pitch: u8,
    pub start: f64,
    pub duration: f64,
    pub velocity: u8,
}

/// The translated piece.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Performance {
    pub events: Vec<NoteEvent>,
    /// At least one agrément was expanded
    pub ornamented: bool,
}

/// Translate staves into note events.
///
/// `staves` yields `(system index, staff)` pairs in playback order. Every
/// system covers the same span of beats, so the upper and lower staff of a
/// system sound together.
pub fn translate<'a, I>(cfg: &LayoutConfig, staves: I) -> Performance
where
    I: IntoIterator<Item = (usize, &'a Staff)>,
{
    let mut perf = Performance::default();
    for (system, staff) in staves {
        let quarters = staff.time_signature.quarters_per_measure();
        let system_start = system as f64 * cfg.measures_per_staff as f64 * quarters;
        translate_staff(&mut perf, staff.notes(), system_start, quarters);
    }
    log::debug!(
        "translated {} events (ornamented: {})",
        perf.events.len(),
        perf.ornamented
    );
    perf
}

/// Encode a performance as a format 0 Standard MIDI File.
pub fn encode_smf(perf: &Performance) -> Vec<u8> {
    let uspq = (60_000_000.0 / TEMPO_BPM) as u32; // microseconds per quarter
    let mut events = vec![
        // Meta event: FF 51 03 tt tt tt
        MidiEvent {
            tick: 0,
            bytes: vec![
                0xFF,
                0x51,
                0x03,
                ((uspq >> 16) & 0xFF) as u8,
                ((uspq >> 8) & 0xFF) as u8,
                (uspq & 0xFF) as u8,
            ],
        },
        MidiEvent { tick: 0, bytes: vec![0xC0 | CHANNEL, PROGRAM] },
    ];

    for e in &perf.events {
        events.push(MidiEvent {
            tick: beats_to_ticks(e.start),
            bytes: vec![0x90 | CHANNEL, e.pitch, e.velocity],
        });
        events.push(MidiEvent {
            tick: beats_to_ticks(e.start + e.duration),
            bytes: vec![0x80 | CHANNEL, e.pitch, 0],
        });
    }

    build_smf(&[encode_track(&events, "Elisabeth")])
}

// ═══════════════════════════════════════════════════════════════════════
// Translation
// ═══════════════════════════════════════════════════════════════════════

/// Emit one staff's notes in time order. The previous note is kept so a
/// "double" can alternate with it; the previous note itself still sounds
/// as written, ornament included.
fn translate_staff(perf: &mut Performance, notes: &[Note], system_start: f64, quarters: f64) {
    let mut prev: Option<&Note> = None;

    for note in notes {
        let start = system_start + note.time.quarters_from_staff_start(quarters);
        match (note.ornament, prev) {
            (Some(Ornament::Double), Some(p)) => emit_double(perf, p, note, start),
            _ => emit(perf, note, start),
        }
        prev = Some(note);
    }
}

fn plain(note: &Note, start: f64) -> NoteEvent {
    NoteEvent {
        pitch: note.pitch.midi_key(),
        start,
        duration: duration_in_beats(note.duration),
        velocity: VELOCITY,
    }
}

fn emit(perf: &mut Performance, note: &Note, start: f64) {
    match note.ornament.and_then(ornament::rule) {
        Some(rule) => {
            perf.events.extend(rule.expand(&note.pitch, start, note.duration, VELOCITY));
            perf.ornamented = true;
        }
        None => perf.events.push(plain(note, start)),
    }
}

/// Four equal alternations between the previous note's pitch and the
/// double's, filling the double's own written slot.
fn emit_double(perf: &mut Performance, prev: &Note, note: &Note, start: f64) {
    let length = duration_in_beats(note.duration) / 4.0;
    let keys = [prev.pitch.midi_key(), note.pitch.midi_key()];
    perf.events.extend((0..4).map(|i| NoteEvent {
        pitch: keys[i % 2],
        start: start + i as f64 * length,
        duration: length,
        velocity: VELOCITY,
    }));
    perf.ornamented = true;
}

fn beats_to_ticks(beats: f64) -> u32 {
    (beats * TICKS_PER_QUARTER as f64).round().max(0.0) as u32
}

// ═══════════════════════════════════════════════════════════════════════
// SMF byte encoding
// ═══════════════════════════════════════════════════════════════════════

/// A single MIDI event (note on/off, program change, meta).
#[derive(Debug, Clone)]
struct MidiEvent {
    /// Absolute time in ticks from the start of the track
    tick: u32,
    /// Raw MIDI message bytes (status + data)
    bytes: Vec<u8>,
}

impl MidiEvent {
    fn is_note_on(&self) -> bool {
        self.bytes.first().is_some_and(|s| s & 0xF0 == 0x90)
    }
}

/// Build the complete Standard MIDI File bytes.
fn build_smf(tracks: &[Vec<u8>]) -> Vec<u8> {
    let mut out = Vec::new();

    // MThd header
    out.extend_from_slice(b"MThd");
    out.extend_from_slice(&6u32.to_be_bytes()); // header length
    out.extend_from_slice(&0u16.to_be_bytes()); // format type 0
    out.extend_from_slice(&(tracks.len() as u16).to_be_bytes());
    out.extend_from_slice(&TICKS_PER_QUARTER.to_be_bytes());

    for track_data in tracks {
        out.extend_from_slice(b"MTrk");
        out.extend_from_slice(&(track_data.len() as u32).to_be_bytes());
        out.extend_from_slice(track_data);
    }

    out
}

/// Encode a track's events into raw MTrk bytes (delta-time encoded).
fn encode_track(events: &[MidiEvent], name: &str) -> Vec<u8> {
    let mut data = Vec::new();

    // Track name meta event
    let name_bytes = name.as_bytes();
    data.push(0x00);
    data.push(0xFF);
    data.push(0x03);
    write_vlq(&mut data, name_bytes.len() as u32);
    data.extend_from_slice(name_bytes);

    // Note-offs go before note-ons on the same tick so repeated keys retrigger
    let mut sorted: Vec<&MidiEvent> = events.iter().collect();
    sorted.sort_by_key(|e| (e.tick, e.is_note_on()));

    let mut last_tick: u32 = 0;
    for event in &sorted {
        let delta = event.tick.saturating_sub(last_tick);
        write_vlq(&mut data, delta);
        data.extend_from_slice(&event.bytes);
        last_tick = event.tick;
    }

    // End of track
    data.extend_from_slice(&[0x00, 0xFF, 0x2F, 0x00]);

    data
}

/// Write a variable-length quantity (VLQ) to a byte vector.
fn write_vlq(out: &mut Vec<u8>, mut value: u32) {
    let mut buf = [0u8; 5];
    let mut i = 0;
    loop {
        buf[i] = (value & 0x7F) as u8;
        if i > 0 {
            buf[i] |= 0x80;
        }
        value >>= 7;
        i += 1;
        if value == 0 {
            break;
        }
    }
    out.extend(buf[..i].iter().rev());
}
