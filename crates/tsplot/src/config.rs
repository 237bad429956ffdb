//! Figure configuration types and builder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::colormap::SeriesColors;
use crate::error::{Result, TsPlotError};
use crate::frequency::Frequency;

/// Configuration for a time-series figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    /// Number of subplot rows.
    pub rows: usize,
    /// Number of subplot columns.
    pub cols: usize,
    /// Figure title rendered above all subplots.
    pub title: Option<String>,
    /// Explicit pixel width; derived from `cols` when absent.
    pub width: Option<u32>,
    /// Explicit pixel height; derived from `rows` when absent.
    pub height: Option<u32>,
    /// Step between derived axis points; inferred from the x-sample when absent.
    pub frequency: Option<Frequency>,
    /// strftime-style x tick label format; chosen from the axis span when absent.
    pub x_label_format: Option<String>,
    /// First timestamp of the derived range; taken from the x-sample when absent.
    pub start_time: Option<DateTime<Utc>>,
    /// X-axis description.
    pub x_label: Option<String>,
    /// Y-axis description.
    pub y_label: Option<String>,
    /// Styling configuration.
    pub style: StyleConfig,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 1,
            title: None,
            width: None,
            height: None,
            frequency: None,
            x_label_format: None,
            start_time: None,
            x_label: None,
            y_label: None,
            style: StyleConfig::default(),
        }
    }
}

impl FigureConfig {
    /// Starts a chainable configuration builder.
    pub fn builder() -> FigureConfigBuilder {
        FigureConfigBuilder::new()
    }

    /// Validates the configuration settings.
    pub fn validate(&self) -> Result<()> {
        if self.rows < 1 {
            return Err(TsPlotError::input("rows must be at least 1"));
        }
        if self.cols < 1 {
            return Err(TsPlotError::input("cols must be at least 1"));
        }
        if self.width == Some(0) {
            return Err(TsPlotError::input("width must be positive"));
        }
        if self.height == Some(0) {
            return Err(TsPlotError::input("height must be positive"));
        }
        Ok(())
    }

    /// Pixel dimensions of the figure, growing with the subplot grid when
    /// not set explicitly.
    pub fn dimensions(&self) -> (u32, u32) {
        let width = self
            .width
            .unwrap_or_else(|| (14 + 2 * self.cols as u32) * 80);
        let height = self
            .height
            .unwrap_or_else(|| (6 + 2 * self.rows as u32) * 80);
        (width, height)
    }
}

/// Font configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    /// Font family name.
    pub family: String,
    /// Font size in points.
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 12,
        }
    }
}

/// Margin configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    /// Top margin in pixels.
    pub top: u32,
    /// Right margin in pixels.
    pub right: u32,
    /// Bottom label area in pixels.
    pub bottom: u32,
    /// Left label area in pixels.
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 20,
            bottom: 40,
            left: 60,
        }
    }
}

/// Grid line configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Draw grid lines for x ticks.
    pub show_x: bool,
    /// Draw grid lines for y ticks.
    pub show_y: bool,
    /// Grid line color; the default light gray when absent.
    pub color: Option<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            show_x: true,
            show_y: true,
            color: None,
        }
    }
}

/// Styling configuration for a figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Series color selection.
    pub colors: SeriesColors,
    /// Background fill color.
    pub background_color: Option<String>,
    /// Title font.
    pub title_font: FontConfig,
    /// Axis description font.
    pub axis_font: FontConfig,
    /// Tick label font.
    pub label_font: FontConfig,
    /// Margins and label areas.
    pub margins: MarginConfig,
    /// Grid lines.
    pub grid: GridConfig,
    /// Rotate x tick labels a quarter turn to avoid overlap.
    pub rotate_x_labels: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            colors: SeriesColors::default(),
            background_color: Some("#ffffff".to_string()),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 16,
            },
            axis_font: FontConfig::default(),
            label_font: FontConfig::default(),
            margins: MarginConfig::default(),
            grid: GridConfig::default(),
            rotate_x_labels: true,
        }
    }
}

/// Builder for creating figure configurations.
#[derive(Debug, Clone, Default)]
pub struct FigureConfigBuilder {
    config: FigureConfig,
}

impl FigureConfigBuilder {
    /// Creates a new builder with defaults.
    pub fn new() -> Self {
        Self {
            config: FigureConfig::default(),
        }
    }

    /// Sets the subplot grid.
    pub fn subplots(mut self, rows: usize, cols: usize) -> Self {
        self.config.rows = rows;
        self.config.cols = cols;
        self
    }

    /// Sets the figure title.
    pub fn title(mut self, title: &str) -> Self {
        self.config.title = Some(title.to_string());
        self
    }

    /// Sets explicit figure dimensions.
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.config.width = Some(width);
        self.config.height = Some(height);
        self
    }

    /// Sets the derived-range frequency.
    pub fn frequency(mut self, frequency: Frequency) -> Self {
        self.config.frequency = Some(frequency);
        self
    }

    /// Sets a custom x tick label format.
    pub fn x_label_format(mut self, format: &str) -> Self {
        self.config.x_label_format = Some(format.to_string());
        self
    }

    /// Sets the derived-range start time.
    pub fn start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.config.start_time = Some(start_time);
        self
    }

    /// Sets axis descriptions.
    pub fn labels(mut self, x_label: Option<&str>, y_label: Option<&str>) -> Self {
        self.config.x_label = x_label.map(std::string::ToString::to_string);
        self.config.y_label = y_label.map(std::string::ToString::to_string);
        self
    }

    /// Sets the series color selection.
    pub fn colors(mut self, colors: SeriesColors) -> Self {
        self.config.style.colors = colors;
        self
    }

    /// Sets the background color.
    pub fn background_color(mut self, color: &str) -> Self {
        self.config.style.background_color = Some(color.to_string());
        self
    }

    /// Sets grid line visibility.
    pub fn grid(mut self, show_x: bool, show_y: bool) -> Self {
        self.config.style.grid.show_x = show_x;
        self.config.style.grid.show_y = show_y;
        self
    }

    /// Sets the grid line color.
    pub fn grid_color(mut self, color: &str) -> Self {
        self.config.style.grid.color = Some(color.to_string());
        self
    }

    /// Sets margins and label areas.
    pub fn margins(mut self, top: u32, right: u32, bottom: u32, left: u32) -> Self {
        self.config.style.margins = MarginConfig {
            top,
            right,
            bottom,
            left,
        };
        self
    }

    /// Sets the title font.
    pub fn title_font(mut self, family: &str, size: u32) -> Self {
        self.config.style.title_font = FontConfig {
            family: family.to_string(),
            size,
        };
        self
    }

    /// Sets the tick label font.
    pub fn label_font(mut self, family: &str, size: u32) -> Self {
        self.config.style.label_font = FontConfig {
            family: family.to_string(),
            size,
        };
        self
    }

    /// Toggles x tick label rotation.
    pub fn rotate_x_labels(mut self, rotate: bool) -> Self {
        self.config.style.rotate_x_labels = rotate;
        self
    }

    /// Validates and returns the finished configuration.
    pub fn build(self) -> Result<FigureConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyUnit;

    #[test]
    fn test_default_config() {
        let config = FigureConfig::default();
        assert_eq!(config.rows, 1);
        assert_eq!(config.cols, 1);
        assert!(config.frequency.is_none());
        assert!(config.style.grid.show_x);
        assert!(config.style.rotate_x_labels);
        assert_eq!(config.style.title_font.size, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dynamic_dimensions() {
        let config = FigureConfig::default();
        assert_eq!(config.dimensions(), (1280, 640));

        let grid = FigureConfig {
            rows: 2,
            cols: 3,
            ..Default::default()
        };
        assert_eq!(grid.dimensions(), (1600, 800));

        let explicit = FigureConfig {
            width: Some(800),
            height: Some(600),
            ..Default::default()
        };
        assert_eq!(explicit.dimensions(), (800, 600));
    }

    #[test]
    fn test_validation_rejects_degenerate_values() {
        let config = FigureConfig {
            rows: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TsPlotError::Input(_))));

        let config = FigureConfig {
            width: Some(0),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(TsPlotError::Input(_))));
    }

    #[test]
    fn test_builder_chain() {
        let frequency = Frequency::new(15, FrequencyUnit::Minute).unwrap();
        let config = FigureConfig::builder()
            .subplots(2, 2)
            .title("Throughput")
            .frequency(frequency)
            .labels(Some("time"), Some("requests"))
            .grid(true, false)
            .margins(10, 10, 50, 70)
            .rotate_x_labels(false)
            .build()
            .unwrap();

        assert_eq!(config.rows, 2);
        assert_eq!(config.title.as_deref(), Some("Throughput"));
        assert_eq!(config.frequency, Some(frequency));
        assert_eq!(config.y_label.as_deref(), Some("requests"));
        assert!(!config.style.grid.show_y);
        assert_eq!(config.style.margins.left, 70);
        assert!(!config.style.rotate_x_labels);
    }

    #[test]
    fn test_builder_validates() {
        assert!(FigureConfig::builder().subplots(0, 1).build().is_err());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = FigureConfig::builder()
            .title("Latency")
            .frequency(Frequency::daily())
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: FigureConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("Latency"));
        assert_eq!(parsed.frequency, Some(Frequency::daily()));
        assert_eq!(parsed.style.margins.left, config.style.margins.left);
    }
}
