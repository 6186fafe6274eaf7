//! The closed tool vocabulary and its registry tables.
//!
//! Each tool category has one static table mapping the tool's external
//! name to its display asset and its semantic value. Click dispatch and
//! rendering both read from these tables, so adding a glyph and adding a
//! behaviour happen in the same place.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::model::{Accidental, Clef, NoteValue, Ornament, TimeSignature};

/// One row of a tool registry.
#[derive(Debug, Clone, Copy)]
pub struct ToolEntry<T: 'static> {
    /// Name the UI shell tracks as the active tool
    pub name: &'static str,
    /// Image asset drawn on the button and on the paper
    pub asset: &'static str,
    pub value: T,
}

pub static CLEF_TOOLS: &[ToolEntry<Clef>] = &[
    ToolEntry { name: "treble", asset: "treble.png", value: Clef::Treble },
    ToolEntry { name: "cclef", asset: "cclef.png", value: Clef::CClef },
    ToolEntry { name: "bass", asset: "bass.png", value: Clef::Bass },
];

pub static TIME_SIGNATURE_TOOLS: &[ToolEntry<TimeSignature>] = &[
    ToolEntry { name: "common", asset: "common.png", value: TimeSignature::Common },
    ToolEntry { name: "3-4", asset: "three_four.png", value: TimeSignature::ThreeFour },
    ToolEntry { name: "6-4", asset: "six_four.png", value: TimeSignature::SixFour },
    ToolEntry { name: "3-2", asset: "three_two.png", value: TimeSignature::ThreeTwo },
];

pub static ACCIDENTAL_TOOLS: &[ToolEntry<Accidental>] = &[
    ToolEntry { name: "sharp", asset: "sharp.png", value: Accidental::Sharp },
    ToolEntry { name: "flat", asset: "flat.png", value: Accidental::Flat },
];

pub static DURATION_TOOLS: &[ToolEntry<NoteValue>] = &[
    ToolEntry { name: "whole", asset: "whole.png", value: NoteValue::Whole },
    ToolEntry { name: "half", asset: "half.png", value: NoteValue::Half },
    ToolEntry { name: "quarter", asset: "quarter.png", value: NoteValue::Quarter },
    ToolEntry { name: "eighth", asset: "eighth.png", value: NoteValue::Eighth },
    ToolEntry { name: "sixteenth", asset: "sixteenth.png", value: NoteValue::Sixteenth },
];

pub static ORNAMENT_TOOLS: &[ToolEntry<Ornament>] = &[
    ToolEntry { name: "tremblement", asset: "tremblement.png", value: Ornament::Tremblement },
    ToolEntry { name: "pince", asset: "pince.png", value: Ornament::Pince },
    ToolEntry { name: "port-de-voix", asset: "port_de_voix.png", value: Ornament::PortDeVoix },
    ToolEntry { name: "coule", asset: "coule.png", value: Ornament::Coule },
    ToolEntry { name: "double", asset: "double.png", value: Ornament::Double },
];

fn entry<T: PartialEq>(table: &'static [ToolEntry<T>], value: T) -> Option<&'static ToolEntry<T>> {
    table.iter().find(|e| e.value == value)
}

fn by_name<T: Copy>(table: &'static [ToolEntry<T>], name: &str) -> Option<T> {
    table.iter().find(|e| e.name == name).map(|e| e.value)
}

pub fn clef_asset(clef: Clef) -> &'static str {
    entry(CLEF_TOOLS, clef).map_or("", |e| e.asset)
}

pub fn time_signature_asset(sig: TimeSignature) -> &'static str {
    entry(TIME_SIGNATURE_TOOLS, sig).map_or("", |e| e.asset)
}

pub fn accidental_asset(accidental: Accidental) -> &'static str {
    entry(ACCIDENTAL_TOOLS, accidental).map_or("", |e| e.asset)
}

pub fn ornament_asset(ornament: Ornament) -> &'static str {
    entry(ORNAMENT_TOOLS, ornament).map_or("", |e| e.asset)
}

/// The tool currently held by the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Idle: clicks on the paper do nothing.
    #[default]
    Select,
    Clef(Clef),
    TimeSignature(TimeSignature),
    Accidental(Accidental),
    Duration(NoteValue),
    /// Flip stem orientation
    Inverse,
    Eraser,
    Dot,
    Ornament(Ornament),
}

impl Tool {
    pub fn name(&self) -> &'static str {
        match *self {
            Tool::Select => "select",
            Tool::Clef(c) => entry(CLEF_TOOLS, c).map_or("", |e| e.name),
            Tool::TimeSignature(t) => entry(TIME_SIGNATURE_TOOLS, t).map_or("", |e| e.name),
            Tool::Accidental(a) => entry(ACCIDENTAL_TOOLS, a).map_or("", |e| e.name),
            Tool::Duration(d) => entry(DURATION_TOOLS, d).map_or("", |e| e.name),
            Tool::Inverse => "inverse",
            Tool::Eraser => "eraser",
            Tool::Dot => "dot",
            Tool::Ornament(o) => entry(ORNAMENT_TOOLS, o).map_or("", |e| e.name),
        }
    }

    /// Button/paper asset, if the tool has one.
    pub fn asset(&self) -> Option<&'static str> {
        match *self {
            Tool::Select => None,
            Tool::Clef(c) => Some(clef_asset(c)),
            Tool::TimeSignature(t) => Some(time_signature_asset(t)),
            Tool::Accidental(a) => Some(accidental_asset(a)),
            Tool::Duration(d) => entry(DURATION_TOOLS, d).map(|e| e.asset),
            Tool::Inverse => Some("inverse.png"),
            Tool::Eraser => Some("eraser.png"),
            Tool::Dot => Some("dot.png"),
            Tool::Ornament(o) => Some(ornament_asset(o)),
        }
    }

    /// Tools that edit an existing note rather than place or set up a staff.
    pub fn edits_notes(&self) -> bool {
        matches!(
            self,
            Tool::Accidental(_) | Tool::Inverse | Tool::Eraser | Tool::Dot | Tool::Ornament(_)
        )
    }
}

impl FromStr for Tool {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tool = match s {
            "select" => Tool::Select,
            "inverse" => Tool::Inverse,
            "eraser" => Tool::Eraser,
            "dot" => Tool::Dot,
            _ => by_name(CLEF_TOOLS, s)
                .map(Tool::Clef)
                .or_else(|| by_name(TIME_SIGNATURE_TOOLS, s).map(Tool::TimeSignature))
                .or_else(|| by_name(ACCIDENTAL_TOOLS, s).map(Tool::Accidental))
                .or_else(|| by_name(DURATION_TOOLS, s).map(Tool::Duration))
                .or_else(|| by_name(ORNAMENT_TOOLS, s).map(Tool::Ornament))
                .ok_or_else(|| Error::UnknownTool(s.to_string()))?,
        };
        Ok(tool)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_name_parses_back_to_its_tool() {
        let names = CLEF_TOOLS.iter().map(|e| e.name)
            .chain(TIME_SIGNATURE_TOOLS.iter().map(|e| e.name))
            .chain(ACCIDENTAL_TOOLS.iter().map(|e| e.name))
            .chain(DURATION_TOOLS.iter().map(|e| e.name))
            .chain(ORNAMENT_TOOLS.iter().map(|e| e.name))
            .chain(["select", "inverse", "eraser", "dot"]);
        for name in names {
            let tool: Tool = name.parse().unwrap();
            assert_eq!(tool.name(), name);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = "crescendo".parse::<Tool>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown tool 'crescendo'");
    }

    #[test]
    fn assets_come_from_the_registry() {
        assert_eq!(clef_asset(Clef::Bass), "bass.png");
        assert_eq!(Tool::Ornament(Ornament::PortDeVoix).asset(), Some("port_de_voix.png"));
        assert_eq!(Tool::Select.asset(), None);
    }

    #[test]
    fn edit_tools() {
        assert!(Tool::Eraser.edits_notes());
        assert!(Tool::Accidental(Accidental::Flat).edits_notes());
        assert!(!Tool::Duration(NoteValue::Half).edits_notes());
        assert!(!Tool::Clef(Clef::Treble).edits_notes());
    }
}
