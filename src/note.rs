//! A note on a staff and the edits a tool can make to it.

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::layout::{fits_in_measure, note_geometry, NoteGeometry, Placement, StaffContext};
use crate::model::*;
use crate::ornament;
use crate::tools::Tool;

/// What applying a tool did to a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolEffect {
    Unchanged,
    Changed,
    /// Nothing left to erase: the owning staff should drop the note.
    Remove,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub time: TimePosition,
    /// Fraction of a whole note, dot included
    pub duration: f64,
    pub pitch: Pitch,
    pub ornament: Option<Ornament>,
    pub stem: Stem,
    pub dotted: bool,
    geometry: NoteGeometry,
}

impl Note {
    /// A note with no layout yet. Call [`Note::set_position`] before drawing it.
    pub fn new(time: TimePosition, duration: f64, pitch: Pitch) -> Self {
        Self {
            time,
            duration,
            pitch,
            ornament: None,
            stem: Stem::default(),
            dotted: false,
            geometry: NoteGeometry::default(),
        }
    }

    pub fn placed(cfg: &LayoutConfig, ctx: &StaffContext, placement: Placement) -> Self {
        let mut note = Self::new(placement.time, placement.duration, placement.pitch);
        note.set_position(cfg, ctx);
        note
    }

    pub fn accidental(&self) -> Option<Accidental> {
        self.pitch.accidental
    }

    pub fn geometry(&self) -> &NoteGeometry {
        &self.geometry
    }

    /// Recompute screen geometry from the note's musical state and its staff.
    pub fn set_position(&mut self, cfg: &LayoutConfig, ctx: &StaffContext) {
        self.geometry = note_geometry(cfg, ctx, &self.time, &self.pitch, self.duration, self.stem);
    }

    pub fn apply_tool(&mut self, tool: Tool, cfg: &LayoutConfig, ctx: &StaffContext) -> ToolEffect {
        match tool {
            Tool::Accidental(acc) => {
                if self.pitch.accidental == Some(acc) {
                    return ToolEffect::Unchanged;
                }
                self.pitch.accidental = Some(acc);
                ToolEffect::Changed
            }
            Tool::Inverse => {
                self.stem = self.stem.flipped();
                self.set_position(cfg, ctx);
                ToolEffect::Changed
            }
            Tool::Dot => {
                if !self.toggle_dot(ctx.time_signature) {
                    return ToolEffect::Unchanged;
                }
                self.set_position(cfg, ctx);
                ToolEffect::Changed
            }
            Tool::Ornament(orn) => {
                let mut changed = self.ornament != Some(orn);
                self.ornament = Some(orn);
                if let Some(dotted) = ornament::required_dot(orn) {
                    if dotted != self.dotted {
                        changed |= self.toggle_dot(ctx.time_signature);
                    }
                }
                self.set_position(cfg, ctx);
                if changed { ToolEffect::Changed } else { ToolEffect::Unchanged }
            }
            Tool::Eraser => self.erase_one(cfg, ctx),
            Tool::Select | Tool::Clef(_) | Tool::TimeSignature(_) | Tool::Duration(_) => {
                ToolEffect::Unchanged
            }
        }
    }

    /// Strip one mark per click: ornament, then dot, then accidental.
    fn erase_one(&mut self, cfg: &LayoutConfig, ctx: &StaffContext) -> ToolEffect {
        if self.ornament.take().is_some() {
            return ToolEffect::Changed;
        }
        if self.dotted {
            self.toggle_dot(ctx.time_signature);
            self.set_position(cfg, ctx);
            return ToolEffect::Changed;
        }
        if self.pitch.accidental.take().is_some() {
            return ToolEffect::Changed;
        }
        ToolEffect::Remove
    }

    /// Add or remove the dot. Adding is refused when the dotted note would
    /// spill out of its measure.
    fn toggle_dot(&mut self, sig: TimeSignature) -> bool {
        if self.dotted {
            self.duration /= DOT_RATIO;
        } else {
            let dotted = self.duration * DOT_RATIO;
            if !fits_in_measure(sig, &self.time, dotted) {
                log::debug!("dot refused at {:?}: {} overflows the measure", self.time, dotted);
                return false;
            }
            self.duration = dotted;
        }
        self.dotted = !self.dotted;
        true
    }
}
