//! Custom colormaps for distinguishing overlapping line series.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TsPlotError};

/// A named, ordered, immutable list of colors.
///
/// The order is stable across calls; consumers index into it (with
/// wrap-around) to pick per-series colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: &'static str,
    colors: &'static [RGBColor],
}

impl Colormap {
    /// The registered name of this colormap.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// The ordered color list.
    pub const fn colors(&self) -> &'static [RGBColor] {
        self.colors
    }

    /// Number of colors in the map.
    pub const fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the map holds no colors.
    pub const fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for the given series index, cycling past the end of the list.
    pub fn color(&self, index: usize) -> RGBColor {
        self.colors[index % self.colors.len()]
    }
}

/// High-contrast seven-color map for plots where multiple lines frequently
/// intersect; the stock palettes make such lines hard to tell apart.
pub const PONG7: Colormap = Colormap {
    name: "pong7",
    colors: &[
        RGBColor(0x1f, 0x77, 0xb4), // tab10 blue
        RGBColor(0xd6, 0x8d, 0x04), // ochre orange
        RGBColor(0xde, 0x18, 0x2c), // lava red
        RGBColor(0x2c, 0x8a, 0x0f), // mint green
        RGBColor(0xff, 0x0f, 0xd7), // fuchsia pink
        RGBColor(0x04, 0xd6, 0x8d), // sky blue
        RGBColor(0x56, 0x3d, 0x61), // plum purple
    ],
};

static REGISTRY: Lazy<HashMap<&'static str, &'static Colormap>> = Lazy::new(|| {
    let mut maps: HashMap<&'static str, &'static Colormap> = HashMap::new();
    for cmap in [&PONG7] {
        maps.insert(cmap.name(), cmap);
    }
    maps
});

/// Looks up a registered colormap by name.
pub fn lookup(name: &str) -> Option<&'static Colormap> {
    REGISTRY.get(name).copied()
}

/// Parses a color string (`#rrggbb` hex format) to an [`RGBColor`].
///
/// Defaults to black if parsing fails.
pub fn parse_color(color_str: &str) -> RGBColor {
    if let Some(hex) = color_str.strip_prefix('#') {
        if hex.len() == 6 {
            if let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            ) {
                return RGBColor(r, g, b);
            }
        }
    }
    tracing::warn!(color = color_str, "unparseable color, falling back to black");
    RGBColor(0, 0, 0)
}

/// Series color selection for a figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeriesColors {
    /// A registered colormap, referenced by name.
    Named(String),
    /// An explicit ordered list of `#rrggbb` colors.
    Custom(Vec<String>),
}

impl Default for SeriesColors {
    fn default() -> Self {
        Self::Named(PONG7.name().to_string())
    }
}

impl SeriesColors {
    /// Resolves the selection to a concrete color vector.
    pub fn resolve(&self) -> Result<Vec<RGBColor>> {
        match self {
            Self::Named(name) => lookup(name)
                .map(|cmap| cmap.colors().to_vec())
                .ok_or_else(|| TsPlotError::colormap(name.clone())),
            Self::Custom(colors) => {
                if colors.is_empty() {
                    return Err(TsPlotError::input("custom color list is empty"));
                }
                Ok(colors.iter().map(|color| parse_color(color)).collect())
            }
        }
    }
}
