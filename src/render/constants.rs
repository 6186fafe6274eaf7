//! Shared drawing constants. Sizes are multiples of the layout's staff
//! height or note line so they scale with the window.

// ── Colors ──────────────────────────────────────────────────────────
pub(crate) const PAPER_COLOR: &str = "rgb(230,230,200)";
pub(crate) const INK_COLOR: &str = "rgb(40,20,20)";

// ── Strokes ─────────────────────────────────────────────────────────
pub(crate) const STAFF_LINE_WIDTH: f64 = 1.0;
pub(crate) const BARLINE_WIDTH: f64 = 1.0;
pub(crate) const LEDGER_LINE_WIDTH: f64 = 1.0;

// ── Proportions (× head radius unless noted) ────────────────────────
pub(crate) const LEDGER_HALF_LENGTH: f64 = 1.8;
pub(crate) const DOT_OFFSET: f64 = 1.8;
pub(crate) const DOT_RADIUS: f64 = 0.35;
pub(crate) const ACCIDENTAL_WIDTH: f64 = 1.6;
pub(crate) const ACCIDENTAL_HEIGHT: f64 = 3.0;
pub(crate) const ACCIDENTAL_GAP: f64 = 0.6;
pub(crate) const ORNAMENT_SIZE: f64 = 2.4;
/// Flag arc radius, in staff steps
pub(crate) const FLAG_RADIUS_STEPS: f64 = 2.5;
/// Secondary beam distance, in note lines
pub(crate) const SECONDARY_GAP_LINES: f64 = 2.0;
