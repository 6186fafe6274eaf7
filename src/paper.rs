//! The sheet of paper: systems of paired upper and lower staves.

use crate::config::LayoutConfig;
use crate::layout::{Point, Rect};
use crate::model::{Clef, TimeSignature};
use crate::render::Surface;
use crate::staff::{ClickOutcome, Staff};
use crate::tools::Tool;

#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    staves: Vec<Staff>,
    staves_per_system: usize,
}

impl Paper {
    /// Fresh paper: upper staves in treble, lower staves in bass, all in
    /// common time.
    pub fn new(cfg: &LayoutConfig) -> Self {
        let h = cfg.staff_height();
        let per_system = cfg.staves_per_system.max(1);
        let staves = (0..cfg.staff_count())
            .map(|s| {
                let anchor = Point::new(h / 2.0, (4 * s + 1) as f64 * h / 2.0);
                let clef = if s % per_system == 0 { Clef::Treble } else { Clef::Bass };
                Staff::new(anchor, clef, TimeSignature::Common)
            })
            .collect();
        Self { staves, staves_per_system: per_system }
    }

    pub fn rect(cfg: &LayoutConfig) -> Rect {
        let h = cfg.staff_height();
        let height = cfg.window_height - cfg.button_height - 2.0 * cfg.buffer - h;
        Rect::new(h / 2.0, h / 2.0, cfg.staff_width(), height)
    }

    pub fn staves(&self) -> &[Staff] {
        &self.staves
    }

    pub fn system_of(&self, index: usize) -> usize {
        index / self.staves_per_system
    }

    /// First staff of its system.
    pub fn is_upper(&self, index: usize) -> bool {
        index % self.staves_per_system == 0
    }

    pub fn staff_at(&self, cfg: &LayoutConfig, point: Point) -> Option<usize> {
        self.staves.iter().position(|s| s.bounds(cfg).contains(point))
    }

    /// Route a click to the staff under it. `None` when it misses every staff.
    pub fn click(&mut self, cfg: &LayoutConfig, point: Point, tool: Tool) -> Option<(usize, ClickOutcome)> {
        let index = self.staff_at(cfg, point)?;
        let outcome = self.staves[index].click(cfg, point, tool);
        Some((index, outcome))
    }

    pub fn set_time_signature(&mut self, cfg: &LayoutConfig, sig: TimeSignature) {
        for staff in self.staves.iter_mut().filter(|s| s.time_signature != sig) {
            staff.change_time_signature(cfg, sig);
        }
    }

    pub fn set_upper_clef(&mut self, cfg: &LayoutConfig, clef: Clef) {
        let per_system = self.staves_per_system;
        for (i, staff) in self.staves.iter_mut().enumerate() {
            if i % per_system == 0 && staff.clef != clef {
                staff.change_clef(cfg, clef);
            }
        }
    }

    /// Staves in playback order with their system index.
    pub fn performance_order(&self) -> impl Iterator<Item = (usize, &Staff)> {
        self.staves.iter().enumerate().map(move |(i, s)| (self.system_of(i), s))
    }

    pub fn render<S: Surface + ?Sized>(&self, cfg: &LayoutConfig, surface: &mut S) {
        surface.paper(Self::rect(cfg));
        for staff in &self.staves {
            staff.render(cfg, surface);
        }
    }
}
