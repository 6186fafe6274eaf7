//! Agrément expansion table.
//!
//! Each ornament expands into a short fixed figure of sub-notes. Pitches
//! are the written note or the natural note on the letter above or below
//! it, so F#4 dips to E4 and B♭4 trills with C5. Sub-note lengths are
//! exact fractions of the written duration.
//!
//! [`Ornament::Double`] has no entry here: it pairs a note with its
//! predecessor and is expanded by the MIDI translator.

use crate::midi::NoteEvent;
use crate::model::{duration_in_beats, Ornament, Pitch};

/// Which pitch a sub-note sounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighbour {
    Main,
    Upper,
    Lower,
}

impl Neighbour {
    fn key(self, pitch: &Pitch) -> u8 {
        match self {
            Neighbour::Main => pitch.midi_key(),
            Neighbour::Upper => Pitch::from_rung(pitch.rung() + 1).midi_key(),
            Neighbour::Lower => Pitch::from_rung(pitch.rung() - 1).midi_key(),
        }
    }
}

pub struct OrnamentRule {
    pub ornament: Ornament,
    /// Dot state the ornament imposes on its note, if any
    pub required_dot: Option<bool>,
    /// Sub-notes in order: (pitch, fraction of the written duration)
    pub figure: &'static [(Neighbour, f64)],
}

pub static ORNAMENT_RULES: &[OrnamentRule] = &[
    OrnamentRule {
        ornament: Ornament::Tremblement,
        required_dot: None,
        figure: &[
            (Neighbour::Upper, 0.25),
            (Neighbour::Main, 0.25),
            (Neighbour::Upper, 0.25),
            (Neighbour::Main, 0.25),
        ],
    },
    OrnamentRule {
        ornament: Ornament::Pince,
        required_dot: None,
        figure: &[
            (Neighbour::Main, 0.25),
            (Neighbour::Lower, 0.25),
            (Neighbour::Main, 0.5),
        ],
    },
    OrnamentRule {
        ornament: Ornament::PortDeVoix,
        required_dot: Some(true),
        figure: &[(Neighbour::Lower, 1.0 / 3.0), (Neighbour::Main, 2.0 / 3.0)],
    },
    OrnamentRule {
        ornament: Ornament::Coule,
        required_dot: Some(false),
        figure: &[(Neighbour::Upper, 0.5), (Neighbour::Main, 0.5)],
    },
];

pub fn rule(ornament: Ornament) -> Option<&'static OrnamentRule> {
    ORNAMENT_RULES.iter().find(|r| r.ornament == ornament)
}

/// Dot state an ornament forces on the note carrying it.
pub fn required_dot(ornament: Ornament) -> Option<bool> {
    rule(ornament).and_then(|r| r.required_dot)
}

impl OrnamentRule {
    /// Sub-events for a note starting at `start` beats and lasting
    /// `duration` (fraction of a whole note).
    pub fn expand(&self, pitch: &Pitch, start: f64, duration: f64, velocity: u8) -> Vec<NoteEvent> {
        let total = duration_in_beats(duration);
        let mut at = start;
        self.figure
            .iter()
            .map(|&(neighbour, share)| {
                let length = total * share;
                let event = NoteEvent { pitch: neighbour.key(pitch), start: at, duration: length, velocity };
                at += length;
                event
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Accidental, Letter};

    #[test]
    fn figures_fill_the_whole_note() {
        for r in ORNAMENT_RULES {
            let share: f64 = r.figure.iter().map(|&(_, s)| s).sum();
            assert!((share - 1.0).abs() < 1e-12, "{:?}", r.ornament);
        }
        assert!(rule(Ornament::Double).is_none());
    }

    #[test]
    fn tremblement_alternates_with_the_step_above() {
        // E → F is a half step
        let e = Pitch::new(Letter::E, 4);
        let events = rule(Ornament::Tremblement).unwrap().expand(&e, 2.0, 0.25, 127);
        let keys: Vec<u8> = events.iter().map(|e| e.pitch).collect();
        assert_eq!(keys, vec![65, 64, 65, 64]);
        let starts: Vec<f64> = events.iter().map(|e| e.start).collect();
        assert_eq!(starts, vec![2.0, 2.25, 2.5, 2.75]);
        assert!(events.iter().all(|e| e.duration == 0.25));
    }

    #[test]
    fn pince_dips_to_the_step_below() {
        // C → B is a half step, D → C a whole step
        let c = Pitch::new(Letter::C, 5);
        let keys: Vec<u8> = rule(Ornament::Pince).unwrap().expand(&c, 0.0, 0.5, 100)
            .iter().map(|e| e.pitch).collect();
        assert_eq!(keys, vec![72, 71, 72]);

        let d = Pitch::new(Letter::D, 5);
        let keys: Vec<u8> = rule(Ornament::Pince).unwrap().expand(&d, 0.0, 0.5, 100)
            .iter().map(|e| e.pitch).collect();
        assert_eq!(keys, vec![74, 72, 74]);
    }

    #[test]
    fn altered_notes_take_neighbours_from_the_next_letter() {
        let f_sharp = Pitch { accidental: Some(Accidental::Sharp), ..Pitch::new(Letter::F, 4) };
        let events = rule(Ornament::PortDeVoix).unwrap().expand(&f_sharp, 0.0, 0.375, 90);
        assert_eq!(events[0].pitch, 64); // E4
        assert_eq!(events[1].pitch, 66);
        assert!((events[0].duration - 0.5).abs() < 1e-12);
        assert!((events[1].duration - 1.0).abs() < 1e-12);

        let keys: Vec<u8> = rule(Ornament::Pince).unwrap().expand(&f_sharp, 0.0, 0.25, 90)
            .iter().map(|e| e.pitch).collect();
        assert_eq!(keys, vec![66, 64, 66]);

        let b_flat = Pitch { accidental: Some(Accidental::Flat), ..Pitch::new(Letter::B, 4) };
        let keys: Vec<u8> = rule(Ornament::Tremblement).unwrap().expand(&b_flat, 0.0, 0.25, 90)
            .iter().map(|e| e.pitch).collect();
        assert_eq!(keys, vec![72, 70, 72, 70]); // C5 against B♭4
    }

    #[test]
    fn dot_requirements() {
        assert_eq!(required_dot(Ornament::PortDeVoix), Some(true));
        assert_eq!(required_dot(Ornament::Coule), Some(false));
        assert_eq!(required_dot(Ornament::Tremblement), None);
        assert_eq!(required_dot(Ornament::Double), None);
    }
}
