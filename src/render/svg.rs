//! SVG surface: accumulates SVG elements and produces the final string.

use std::f64::consts::PI;

use super::constants::*;
use super::Surface;
use crate::layout::{Point, Rect};

pub struct SvgSurface {
    elements: Vec<String>,
    width: f64,
    height: f64,
    /// Prefix for image hrefs
    asset_dir: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
            asset_dir: "assets".to_string(),
        }
    }

    pub fn with_asset_dir(mut self, dir: &str) -> Self {
        self.asset_dir = dir.trim_end_matches('/').to_string();
        self
    }

    pub fn build(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl Surface for SvgSurface {
    fn paper(&mut self, rect: Rect) {
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            rect.x, rect.y, rect.width, rect.height, PAPER_COLOR
        ));
    }

    fn line(&mut self, from: Point, to: Point, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}"/>"#,
            from.x, from.y, to.x, to.y, INK_COLOR, width
        ));
    }

    fn circle(&mut self, center: Point, radius: f64, stroke: Option<f64>) {
        match stroke {
            Some(w) => self.elements.push(format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="none" stroke="{}" stroke-width="{:.1}"/>"#,
                center.x, center.y, radius - w / 2.0, INK_COLOR, w
            )),
            None => self.elements.push(format!(
                r#"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}"/>"#,
                center.x, center.y, radius, INK_COLOR
            )),
        }
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64, width: f64) {
        let (x1, y1) = (center.x + radius * start.cos(), center.y + radius * start.sin());
        let (x2, y2) = (center.x + radius * end.cos(), center.y + radius * end.sin());
        let large = if (end - start).abs() > PI { 1 } else { 0 };
        let sweep = if end > start { 1 } else { 0 };
        self.elements.push(format!(
            r#"<path d="M{:.1},{:.1} A{:.1},{:.1} 0 {} {} {:.1},{:.1}" fill="none" stroke="{}" stroke-width="{:.1}"/>"#,
            x1, y1, radius, radius, large, sweep, x2, y2, INK_COLOR, width
        ));
    }

    fn image(&mut self, asset: &str, rect: Rect) {
        self.elements.push(format!(
            r#"<image href="{}/{}" x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}"/>"#,
            self.asset_dir, asset, rect.x, rect.y, rect.width, rect.height
        ));
    }
}
