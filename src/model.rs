//! Musical vocabulary of the game: pitches, time positions, durations,
//! clefs, time signatures, stems and ornaments.
//!
//! The vocabulary is deliberately small and closed. Durations are plain
//! `f64` fractions of a whole note, optionally carrying a single dot.

use serde::{Deserialize, Serialize};

/// Tolerance for comparing durations and beat positions.
pub const EPSILON: f64 = 1e-9;

/// Multiplier applied by a dot. Undotting multiplies by its inverse.
pub const DOT_RATIO: f64 = 1.5;

/// A diatonic letter name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    pub const ALL: [Letter; 7] = [
        Letter::C,
        Letter::D,
        Letter::E,
        Letter::F,
        Letter::G,
        Letter::A,
        Letter::B,
    ];

    /// Position within the octave, C = 0 … B = 6.
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Letter for a diatonic index, wrapping in both directions.
    pub fn from_index(index: i32) -> Letter {
        Self::ALL[index.rem_euclid(7) as usize]
    }

    /// Semitones above C.
    pub fn semitone(self) -> i32 {
        match self {
            Letter::C => 0,
            Letter::D => 2,
            Letter::E => 4,
            Letter::F => 5,
            Letter::G => 7,
            Letter::A => 9,
            Letter::B => 11,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    pub fn alter(self) -> i32 {
        match self {
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// Pitch of a note: letter, octave (middle C = C4) and optional accidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pitch {
    pub letter: Letter,
    pub octave: i32,
    pub accidental: Option<Accidental>,
}

impl Pitch {
    pub fn new(letter: Letter, octave: i32) -> Self {
        Self { letter, octave, accidental: None }
    }

    /// Natural pitch sitting on a diatonic rung.
    pub fn from_rung(rung: i32) -> Self {
        Self::new(Letter::from_index(rung), rung.div_euclid(7))
    }

    /// Diatonic rung: letter index + 7 × octave. Ignores the accidental.
    pub fn rung(&self) -> i32 {
        self.letter.index() + 7 * self.octave
    }

    /// Chromatic semitone number: letter + 12 × octave + accidental.
    pub fn semitone(&self) -> i32 {
        self.letter.semitone() + 12 * self.octave + self.accidental.map_or(0, Accidental::alter)
    }

    /// MIDI key number (C4 = 60), clamped to the MIDI range.
    pub fn midi_key(&self) -> u8 {
        (self.semitone() + 12).clamp(0, 127) as u8
    }
}

/// Position in time: 1-based measure and 1-based beat within the measure.
///
/// Beats count quarter notes regardless of the time signature's beat unit,
/// and are fractional for subdivided placements (e.g. 2.5 is the eighth
/// after beat 2).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimePosition {
    pub measure: u32,
    pub beat: f64,
}

impl TimePosition {
    pub fn new(measure: u32, beat: f64) -> Self {
        Self { measure, beat }
    }

    /// Quarters elapsed since the start of this position's measure.
    pub fn offset_in_measure(&self) -> f64 {
        self.beat - 1.0
    }

    /// Total ordering key for a staff with the given measure length.
    pub fn key(&self, quarters_per_measure: f64) -> f64 {
        self.measure as f64 * quarters_per_measure + self.beat
    }

    /// Quarters elapsed since the start of the staff. Measure 0 counts as
    /// the first measure.
    pub fn quarters_from_staff_start(&self, quarters_per_measure: f64) -> f64 {
        self.measure.saturating_sub(1) as f64 * quarters_per_measure + self.offset_in_measure()
    }
}

impl PartialOrd for TimePosition {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match self.measure.cmp(&other.measure) {
            std::cmp::Ordering::Equal => self.beat.partial_cmp(&other.beat),
            ord => Some(ord),
        }
    }
}

/// The undotted note values a duration tool can place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteValue {
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteValue {
    /// Fraction of a whole note.
    pub fn fraction(self) -> f64 {
        match self {
            NoteValue::Whole => 1.0,
            NoteValue::Half => 0.5,
            NoteValue::Quarter => 0.25,
            NoteValue::Eighth => 0.125,
            NoteValue::Sixteenth => 0.0625,
        }
    }

    /// The shortest value placement may substitute.
    pub fn shortest() -> f64 {
        NoteValue::Sixteenth.fraction()
    }
}

/// Length of a duration in quarter-note beats.
pub fn duration_in_beats(duration: f64) -> f64 {
    duration * 4.0
}

/// Eighth notes and shorter take part in beaming.
pub fn is_beamable(duration: f64) -> bool {
    duration < NoteValue::Quarter.fraction() - EPSILON
}

/// Sixteenth-level durations carry a second flag or beam.
pub fn is_sixteenth_level(duration: f64) -> bool {
    duration < NoteValue::Eighth.fraction() - EPSILON
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clef {
    Treble,
    /// C clef with middle C on the bottom line.
    CClef,
    Bass,
}

impl Clef {
    /// Diatonic rung of the top staff line.
    pub fn top_rung(self) -> i32 {
        match self {
            Clef::Treble => 38, // F5
            Clef::CClef => 36,  // D5
            Clef::Bass => 26,   // A3
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeSignature {
    /// 4/4
    Common,
    ThreeFour,
    SixFour,
    ThreeTwo,
}

impl TimeSignature {
    pub fn beats(self) -> u32 {
        match self {
            TimeSignature::Common => 4,
            TimeSignature::ThreeFour => 3,
            TimeSignature::SixFour => 6,
            TimeSignature::ThreeTwo => 3,
        }
    }

    pub fn beat_unit(self) -> u32 {
        match self {
            TimeSignature::Common | TimeSignature::ThreeFour | TimeSignature::SixFour => 4,
            TimeSignature::ThreeTwo => 2,
        }
    }

    /// Measure length as a fraction of a whole note.
    pub fn capacity(self) -> f64 {
        self.beats() as f64 / self.beat_unit() as f64
    }

    pub fn quarters_per_measure(self) -> f64 {
        duration_in_beats(self.capacity())
    }
}

/// Stem orientation. `Up` is shaped like a "d", `Down` like a "p".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stem {
    #[default]
    Up,
    Down,
}

impl Stem {
    pub fn flipped(self) -> Stem {
        match self {
            Stem::Up => Stem::Down,
            Stem::Down => Stem::Up,
        }
    }

    /// +1 when the stem tip lies below the head (pixel y grows downward).
    pub fn direction(self) -> f64 {
        match self {
            Stem::Up => -1.0,
            Stem::Down => 1.0,
        }
    }
}

/// Baroque agréments the game offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ornament {
    /// Trill starting on the upper auxiliary.
    Tremblement,
    /// Mordent: main, lower neighbour, main.
    Pince,
    /// Appoggiatura from the lower neighbour.
    PortDeVoix,
    /// Slide down from the upper neighbour.
    Coule,
    /// Alternation of this note with the one before it.
    Double,
}
