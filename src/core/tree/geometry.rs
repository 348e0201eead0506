//! Container-relative geometry and the box model used to place cards

use serde::{Deserialize, Serialize};

/// A point in container coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal offset from the container's left edge
    pub x: f64,
    /// Vertical offset from the container's top edge
    pub y: f64,
}

impl Point {
    /// Create a point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned box in container coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a rectangle
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center point of the rectangle
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Sizes that drive card placement on the page
///
/// Bands stack vertically; cards inside a band sit side by side and the band
/// is centered horizontally in the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutMetrics {
    /// Card width
    pub card_width: f64,
    /// Card height
    pub card_height: f64,
    /// Horizontal gap between cards of one band
    pub card_gap: f64,
    /// Vertical gap between bands
    pub band_gap: f64,
    /// Height of the band label above the cards
    pub label_height: f64,
    /// Inner padding of the container
    pub padding: f64,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            card_width: 140.0,
            card_height: 190.0,
            card_gap: 24.0,
            band_gap: 56.0,
            label_height: 32.0,
            padding: 24.0,
        }
    }
}

impl LayoutMetrics {
    /// Width of a band holding `cards` cards
    #[must_use]
    pub fn band_width(&self, cards: usize) -> f64 {
        if cards == 0 {
            return 0.0;
        }
        let n = cards as f64;
        n.mul_add(self.card_width, (n - 1.0) * self.card_gap)
    }

    /// Height of one band including its label
    #[must_use]
    pub fn band_height(&self) -> f64 {
        self.label_height + self.card_height
    }

    /// Top edge of the band at `band_index`
    #[must_use]
    pub fn band_top(&self, band_index: usize) -> f64 {
        (band_index as f64).mul_add(self.band_height() + self.band_gap, self.padding)
    }

    /// Container size for bands with the given card counts
    #[must_use]
    pub fn container_size(&self, band_sizes: &[usize]) -> (f64, f64) {
        let widest = band_sizes.iter().copied().max().unwrap_or(0);
        let width = 2.0f64.mul_add(self.padding, self.band_width(widest));
        let bands = band_sizes.len() as f64;
        let height = if band_sizes.is_empty() {
            2.0 * self.padding
        } else {
            2.0f64.mul_add(
                self.padding,
                bands.mul_add(self.band_height(), (bands - 1.0) * self.band_gap),
            )
        };
        (width, height)
    }

    /// Box of the card in `slot` of band `band_index`
    ///
    /// `band_sizes` lists the card count of every band so the band can be
    /// centered against the widest one.
    #[must_use]
    pub fn card_rect(&self, band_sizes: &[usize], band_index: usize, slot: usize) -> Rect {
        let (container_width, _) = self.container_size(band_sizes);
        let cards = band_sizes.get(band_index).copied().unwrap_or(0);
        let left = (container_width - self.band_width(cards)) / 2.0;
        let x = (slot as f64).mul_add(self.card_width + self.card_gap, left);
        let y = self.band_top(band_index) + self.label_height;
        Rect::new(x, y, self.card_width, self.card_height)
    }
}
