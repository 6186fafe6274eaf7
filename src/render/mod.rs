//! Rendering: staves and notes drawn as geometric primitives onto a
//! [`Surface`].
//!
//! The surface is the seam to whatever 2D library the host uses. Two
//! surfaces ship with the crate: [`DisplayList`], which records the
//! primitives (and serializes them for hosts across an FFI boundary), and
//! [`SvgSurface`], which produces a self-contained SVG of the page.

pub(crate) mod constants;
mod notes;
mod staff;
mod svg;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{Point, Rect};

pub(crate) use staff::draw_staff;
pub use svg::SvgSurface;

/// A 2D drawing surface in absolute screen pixels. All strokes are ink.
pub trait Surface {
    /// Fill a rectangle with paper colour.
    fn paper(&mut self, rect: Rect);

    fn line(&mut self, from: Point, to: Point, width: f64);

    /// A circle outlined with the given stroke width, or filled when `stroke` is `None`.
    fn circle(&mut self, center: Point, radius: f64, stroke: Option<f64>);

    /// Circular arc from angle `start` to `end` (radians, y down).
    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64, width: f64);

    /// An image asset scaled into `rect`.
    fn image(&mut self, asset: &str, rect: Rect);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Paper { rect: Rect },
    Line { from: Point, to: Point, width: f64 },
    Circle { center: Point, radius: f64, stroke: Option<f64> },
    Arc { center: Point, radius: f64, start: f64, end: f64, width: f64 },
    Image { asset: String, rect: Rect },
}

/// Surface that records every primitive in draw order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayList {
    pub primitives: Vec<Primitive>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Assets of every image primitive, in draw order.
    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Image { asset, .. } => Some(asset.as_str()),
            _ => None,
        })
    }

    /// Serialize for hosts that draw on the other side of an FFI boundary.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Surface for DisplayList {
    fn paper(&mut self, rect: Rect) {
        self.primitives.push(Primitive::Paper { rect });
    }

    fn line(&mut self, from: Point, to: Point, width: f64) {
        self.primitives.push(Primitive::Line { from, to, width });
    }

    fn circle(&mut self, center: Point, radius: f64, stroke: Option<f64>) {
        self.primitives.push(Primitive::Circle { center, radius, stroke });
    }

    fn arc(&mut self, center: Point, radius: f64, start: f64, end: f64, width: f64) {
        self.primitives.push(Primitive::Arc { center, radius, start, end, width });
    }

    fn image(&mut self, asset: &str, rect: Rect) {
        self.primitives.push(Primitive::Image { asset: asset.to_string(), rect });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_list_serializes_tagged_primitives() {
        let mut list = DisplayList::new();
        list.line(Point::new(0.0, 1.0), Point::new(2.0, 1.0), 4.0);
        list.image("sharp.png", Rect::new(1.0, 2.0, 3.0, 4.0));
        let json = list.to_json().unwrap();
        assert!(json.contains(r#""kind":"line""#));
        assert!(json.contains(r#""asset":"sharp.png""#));

        let back: DisplayList = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
        assert_eq!(back.images().collect::<Vec<_>>(), vec!["sharp.png"]);
    }
}
