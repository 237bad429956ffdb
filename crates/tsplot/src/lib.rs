//! # tsplot
//!
//! Time-series figure construction and axis formatting helpers for
//! [plotters](https://docs.rs/plotters).
//!
//! The library removes the boilerplate of setting up a time-series chart:
//! [`time_series`] derives an evenly spaced date range from a sample of
//! existing x and/or y values and builds a styled figure around it, while
//! [`PONG7`] provides a high-contrast colormap for plots where several line
//! series overlap.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod axis;
pub mod colormap;
pub mod config;
pub mod error;
pub mod figure;
pub mod frequency;
pub mod range;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use colormap::{Colormap, SeriesColors, PONG7};
pub use config::{
    FigureConfig, FigureConfigBuilder, FontConfig, GridConfig, MarginConfig, StyleConfig,
};
pub use error::{Result, TsPlotError};
pub use figure::{time_series, TimeChart, TimeSeriesFigure};
pub use frequency::{infer_frequency, Frequency, FrequencyUnit};
pub use range::date_range;
