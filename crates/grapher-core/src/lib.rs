// File: crates/grapher-core/src/lib.rs
// Summary: Core library entry point; config, data loading, chart model and rendering.

pub mod axis;
pub mod builder;
pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod series;
pub mod style;
pub mod text;
pub mod theme;
pub mod types;
pub mod view;
pub mod yaml;

pub use axis::Axis;
pub use builder::GraphBuilder;
pub use chart::{Chart, Fonts, ImageFormat, RenderOptions};
pub use config::{Config, DataSource};
pub use data::{DataInput, DataProcessor, Dataset, XValues};
pub use error::{GrapherError, Result};
pub use series::{Series, SeriesStyle, SeriesType};
pub use style::{LineStyle, Marker};
pub use text::TextShaper;
pub use theme::Theme;
pub use view::{Limits, ViewState};
pub use yaml::YamlDocument;
