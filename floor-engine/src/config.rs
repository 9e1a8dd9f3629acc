//! Layout configuration and canvas bounds

use crate::geometry::{Point, clamp};

/// Layout constants shared by the resolver and the drag controller
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | FLOOR_CARD_WIDTH | 132 | Card width (px) |
/// | FLOOR_CARD_HEIGHT | 96 | Card height (px) |
/// | FLOOR_PADDING | 12 | Right/bottom canvas padding (px) |
/// | FLOOR_HEADER_BAND | 36 | Reserved band at the top of the canvas (px) |
/// | FLOOR_GAP | 16 | Collision gap and resolver step (px) |
/// | FLOOR_MAX_ATTEMPTS | 200 | Resolver attempts per card |
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub card_width: f64,
    pub card_height: f64,
    pub padding: f64,
    pub header_band: f64,
    /// Must be positive, otherwise the resolver cannot move a card
    pub gap: f64,
    pub max_attempts: u32,
}

impl LayoutConfig {
    pub const DEFAULT_CARD_WIDTH: f64 = 132.0;
    pub const DEFAULT_CARD_HEIGHT: f64 = 96.0;
    pub const DEFAULT_PADDING: f64 = 12.0;
    pub const DEFAULT_HEADER_BAND: f64 = 36.0;
    pub const DEFAULT_GAP: f64 = 16.0;
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 200;

    /// Load from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            card_width: positive_env("FLOOR_CARD_WIDTH").unwrap_or(Self::DEFAULT_CARD_WIDTH),
            card_height: positive_env("FLOOR_CARD_HEIGHT").unwrap_or(Self::DEFAULT_CARD_HEIGHT),
            padding: std::env::var("FLOOR_PADDING")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(Self::DEFAULT_PADDING),
            header_band: std::env::var("FLOOR_HEADER_BAND")
                .ok()
                .and_then(|v| v.parse::<f64>().ok())
                .filter(|v| v.is_finite() && *v >= 0.0)
                .unwrap_or(Self::DEFAULT_HEADER_BAND),
            gap: positive_env("FLOOR_GAP").unwrap_or(Self::DEFAULT_GAP),
            max_attempts: std::env::var("FLOOR_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(Self::DEFAULT_MAX_ATTEMPTS),
        }
    }

    /// Set the card size
    pub fn with_card_size(mut self, width: f64, height: f64) -> Self {
        self.card_width = width;
        self.card_height = height;
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Position bounds for a card's top-left corner on `canvas`.
    ///
    /// A canvas smaller than one card (plus padding, plus the header band
    /// vertically) is treated as exactly that size, so the ranges never invert.
    pub fn bounds(&self, canvas: Canvas) -> CanvasBounds {
        let width = canvas.width.max(self.card_width + 2.0 * self.padding);
        let height = canvas
            .height
            .max(self.header_band + self.card_height + self.padding);

        CanvasBounds {
            min_x: 0.0,
            max_x: width - self.card_width - self.padding,
            min_y: self.header_band,
            max_y: height - self.card_height - self.padding,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            card_width: Self::DEFAULT_CARD_WIDTH,
            card_height: Self::DEFAULT_CARD_HEIGHT,
            padding: Self::DEFAULT_PADDING,
            header_band: Self::DEFAULT_HEADER_BAND,
            gap: Self::DEFAULT_GAP,
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
        }
    }
}

fn positive_env(key: &str) -> Option<f64> {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Current canvas size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

impl Canvas {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(760.0, 520.0)
    }
}

/// Allowed range for a card's top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl CanvasBounds {
    pub fn clamp(&self, point: Point) -> Point {
        Point::new(
            clamp(point.x, self.min_x, self.max_x),
            clamp(point.y, self.min_y, self.max_y),
        )
    }

    pub fn contains(&self, point: Point) -> bool {
        (self.min_x..=self.max_x).contains(&point.x) && (self.min_y..=self.max_y).contains(&point.y)
    }
}
