//! qi-profile: subtest score validation and grouped bar chart rendering.
//!
//! Raw form input is validated into fixed 13-subtest (QI Verbal/Executivo)
//! or 11-subtest (ICV/IOP/IMO/IVP) tables, which are then laid out into a
//! backend-agnostic frame and optionally rasterized to PNG through Cairo.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{ChartConfig, RenderStyle, build_chart_frame};
#[cfg(feature = "cairo-backend")]
pub use api::{RenderedChart, render_png};
pub use crate::core::{
    NamedScores, RawScore, ResultTable, build_index_table, build_qi_table, validate,
};
pub use error::{ChartError, ChartResult, ScoreResult, ValidationError};
