mod axis_ticks;
mod chart_config;
mod chart_render;
mod chart_scene;
mod json_contract;
mod layout_helpers;
mod palette;
mod reference_lines;
mod render_frame_builder;
mod render_style;

pub use axis_ticks::{SCORE_AXIS_FLOOR, ScoreAxis};
pub use chart_config::{ChartConfig, SESSION_DEFAULT_SAFETY_MARGIN, parse_palette_text};
pub use chart_render::{build_chart_frame, build_chart_frame_with_style, render_with};
#[cfg(feature = "cairo-backend")]
pub use chart_render::{RenderedChart, render_png, render_png_with_style};
pub use chart_scene::{
    ChartScene, DEFAULT_X_LABEL, LegendEntry, LegendMarker, SceneBar, UNGROUPED_LABEL,
    build_scene,
};
pub use json_contract::{
    RESULT_TABLE_JSON_SCHEMA_V1, ResultTableJsonContractV1, SCORE_PROFILE_REQUEST_JSON_SCHEMA_V1,
    ScoreProfileRequest, ScoreProfileRequestJsonContractV1,
};
pub use palette::{default_palette, resolve_group_colors, viridis};
pub use reference_lines::{
    ReferenceLine, ReferenceLineKind, ReferenceLines, ReferenceZone, resolve_reference_lines,
};
pub use render_frame_builder::{ChartLayout, build_render_frame, resolve_chart_layout};
pub use render_style::RenderStyle;
