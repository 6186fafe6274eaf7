//! A play session: the active tool, the one-shot tool locks, click routing
//! across the paper and export.

use std::path::Path;

use crate::config::LayoutConfig;
use crate::error::{Error, Result};
use crate::layout::Point;
use crate::midi::{self, Performance};
use crate::paper::Paper;
use crate::render::{DisplayList, Surface, SvgSurface};
use crate::staff::ClickOutcome;
use crate::tools::Tool;

#[derive(Debug, Clone)]
pub struct Session {
    config: LayoutConfig,
    paper: Paper,
    tool: Tool,
    time_signature_locked: bool,
    clef_locked: bool,
    ornament_used: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl Session {
    pub fn new(config: LayoutConfig) -> Self {
        let paper = Paper::new(&config);
        Self {
            config,
            paper,
            tool: Tool::Select,
            time_signature_locked: false,
            clef_locked: false,
            ornament_used: false,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn paper(&self) -> &Paper {
        &self.paper
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Whether an export has expanded at least one agrément.
    pub fn ornament_used(&self) -> bool {
        self.ornament_used
    }

    pub fn is_locked(&self, tool: Tool) -> bool {
        match tool {
            Tool::Clef(_) => self.clef_locked,
            Tool::TimeSignature(_) => self.time_signature_locked,
            _ => false,
        }
    }

    pub fn select_tool(&mut self, tool: Tool) -> Result<()> {
        if self.is_locked(tool) {
            return Err(Error::ToolLocked(tool.name().to_string()));
        }
        log::debug!("tool {} -> {}", self.tool, tool);
        self.tool = tool;
        Ok(())
    }

    /// Select a tool by the name the UI shell tracks.
    pub fn select_tool_named(&mut self, name: &str) -> Result<Tool> {
        let tool: Tool = name.parse()?;
        self.select_tool(tool)?;
        Ok(tool)
    }

    /// Apply the active tool at an absolute window position.
    ///
    /// A time signature set on any staff spreads to every staff; a clef set
    /// on an upper staff spreads to every upper staff. Either one then
    /// locks its tool family and drops back to the select tool.
    pub fn click(&mut self, point: Point) -> ClickOutcome {
        let Some((index, outcome)) = self.paper.click(&self.config, point, self.tool) else {
            return ClickOutcome::Ignored;
        };

        match outcome {
            ClickOutcome::TimeSignatureApplied(sig) => {
                self.paper.set_time_signature(&self.config, sig);
                self.time_signature_locked = true;
                self.tool = Tool::Select;
                log::info!("time signature {:?} applied to every staff; locked", sig);
            }
            ClickOutcome::ClefApplied(clef) if self.paper.is_upper(index) => {
                self.paper.set_upper_clef(&self.config, clef);
                self.clef_locked = true;
                self.tool = Tool::Select;
                log::info!("clef {:?} applied to every upper staff; locked", clef);
            }
            _ => {}
        }
        outcome
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        self.paper.render(&self.config, surface);
    }

    pub fn display_list(&self) -> DisplayList {
        let mut list = DisplayList::new();
        self.render(&mut list);
        list
    }

    pub fn render_svg(&self) -> String {
        let mut svg = SvgSurface::new(self.config.window_width, self.config.window_height);
        self.render(&mut svg);
        svg.build()
    }

    pub fn export_performance(&mut self) -> Performance {
        let perf = midi::translate(&self.config, self.paper.performance_order());
        self.ornament_used |= perf.ornamented;
        perf
    }

    pub fn export_midi(&mut self) -> Vec<u8> {
        midi::encode_smf(&self.export_performance())
    }

    pub fn write_midi<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let bytes = self.export_midi();
        std::fs::write(path.as_ref(), &bytes)?;
        log::info!("wrote {} bytes of MIDI to {}", bytes.len(), path.as_ref().display());
        Ok(())
    }
}
