pub mod subdivide;
pub mod viewport;

use serde::{Deserialize, Serialize};

pub use subdivide::subdivide;
pub use viewport::{
    bounding_rect, ring_to_viewport, DEFAULT_BOUNDS, DEFAULT_MARGIN_PX, DEFAULT_VIEWPORT_PX,
};

/// Axis-aligned rectangle in viewport units (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Zero, negative and NaN extents are all undrawable.
    pub fn is_drawable(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Closed SVG path tracing the rectangle clockwise from its origin.
    pub fn path(&self) -> String {
        format!(
            "M {:.2} {:.2} h {:.2} v {:.2} h {:.2} Z",
            self.x, self.y, self.w, self.h, -self.w
        )
    }
}

/// Direction in which a bounding rect is sliced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Full-width bands stacked top to bottom.
    #[default]
    Horizontal,
    /// Full-height bands laid out left to right.
    Vertical,
}

impl Axis {
    pub fn name(self) -> &'static str {
        match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        }
    }
}

impl std::str::FromStr for Axis {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" | "h" => Ok(Axis::Horizontal),
            "vertical" | "v" => Ok(Axis::Vertical),
            other => anyhow::bail!("unknown axis '{other}' (expected horizontal or vertical)"),
        }
    }
}

/// One occupant's requested share, in the same unit as the total area.
#[derive(Debug, Clone, PartialEq)]
pub struct OccupantAllocation<K> {
    pub occupant: K,
    pub size: f64,
}

impl<K> OccupantAllocation<K> {
    pub fn new(occupant: K, size: f64) -> Self {
        Self { occupant, size }
    }
}

/// One occupant's slice of the bounding rect.
#[derive(Debug, Clone, PartialEq)]
pub struct Band<K> {
    pub occupant: K,
    /// Fraction of the rect's extent along the split axis, in `[0, 1]`.
    pub ratio: f64,
    /// `None` is the no-draw marker for a band with no positive extent.
    pub rect: Option<Rect>,
}

impl<K> Band<K> {
    pub fn is_empty(&self) -> bool {
        self.rect.is_none()
    }

    /// SVG path data for the band, `None` when there is nothing to draw.
    pub fn path(&self) -> Option<String> {
        self.rect.as_ref().map(Rect::path)
    }
}
