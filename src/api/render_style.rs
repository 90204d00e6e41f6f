use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineStrokeStyle};

/// Visual constants for one chart render.
///
/// Sizes are in pixels; the defaults approximate a white-grid statistical
/// bar plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub background_color: Color,
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    pub axis_line_color: Color,
    pub axis_line_width: f64,
    pub text_color: Color,

    pub title_font_size_px: f64,
    pub axis_label_font_size_px: f64,
    pub tick_label_font_size_px: f64,
    pub annotation_font_size_px: f64,
    pub legend_font_size_px: f64,

    pub margin_left_px: f64,
    pub margin_top_px: f64,
    pub margin_right_px: f64,
    pub margin_bottom_px: f64,
    pub min_plot_size_px: f64,

    pub bar_width_ratio: f64,
    pub ungrouped_bar_color: Color,
    pub annotation_offset_px: f64,
    pub tick_label_padding_px: f64,
    pub x_tick_label_rotation_deg: f64,

    pub mean_line_color: Color,
    pub mean_line_width: f64,
    pub mean_line_style: LineStrokeStyle,
    pub margin_line_color: Color,
    pub margin_line_width: f64,
    pub margin_line_style: LineStrokeStyle,
    pub reference_zone_color: Color,

    pub legend_gap_px: f64,
    pub legend_padding_px: f64,
    pub legend_marker_width_px: f64,
    pub legend_border_color: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            background_color: Color::rgb(1.0, 1.0, 1.0),
            grid_line_color: Color::rgb8(0xcc, 0xcc, 0xcc),
            grid_line_width: 1.0,
            axis_line_color: Color::rgb8(0xcc, 0xcc, 0xcc),
            axis_line_width: 1.25,
            text_color: Color::rgb8(0x26, 0x26, 0x26),

            title_font_size_px: 16.0,
            axis_label_font_size_px: 12.0,
            tick_label_font_size_px: 10.0,
            annotation_font_size_px: 10.0,
            legend_font_size_px: 10.0,

            margin_left_px: 80.0,
            margin_top_px: 70.0,
            margin_right_px: 20.0,
            margin_bottom_px: 200.0,
            min_plot_size_px: 60.0,

            bar_width_ratio: 0.8,
            ungrouped_bar_color: Color::rgb8(0x1f, 0x77, 0xb4),
            annotation_offset_px: 3.0,
            tick_label_padding_px: 6.0,
            x_tick_label_rotation_deg: 45.0,

            mean_line_color: Color::rgb(1.0, 0.0, 0.0),
            mean_line_width: 1.5,
            mean_line_style: LineStrokeStyle::Dashed,
            margin_line_color: Color::rgb(0.0, 0.5, 0.0),
            margin_line_width: 1.0,
            margin_line_style: LineStrokeStyle::Dotted,
            reference_zone_color: Color::rgba(0.0, 0.5, 0.0, 0.12),

            legend_gap_px: 24.0,
            legend_padding_px: 8.0,
            legend_marker_width_px: 22.0,
            legend_border_color: Color::rgb8(0xcc, 0xcc, 0xcc),
        }
    }
}

impl RenderStyle {
    pub fn validate(&self) -> ChartResult<()> {
        for color in [
            self.background_color,
            self.grid_line_color,
            self.axis_line_color,
            self.text_color,
            self.ungrouped_bar_color,
            self.mean_line_color,
            self.margin_line_color,
            self.reference_zone_color,
            self.legend_border_color,
        ] {
            color.validate()?;
        }

        for (name, value) in [
            ("grid_line_width", self.grid_line_width),
            ("axis_line_width", self.axis_line_width),
            ("title_font_size_px", self.title_font_size_px),
            ("axis_label_font_size_px", self.axis_label_font_size_px),
            ("tick_label_font_size_px", self.tick_label_font_size_px),
            ("annotation_font_size_px", self.annotation_font_size_px),
            ("legend_font_size_px", self.legend_font_size_px),
            ("mean_line_width", self.mean_line_width),
            ("margin_line_width", self.margin_line_width),
            ("legend_marker_width_px", self.legend_marker_width_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "render style `{name}` must be finite and > 0"
                )));
            }
        }

        for (name, value) in [
            ("margin_left_px", self.margin_left_px),
            ("margin_top_px", self.margin_top_px),
            ("margin_right_px", self.margin_right_px),
            ("margin_bottom_px", self.margin_bottom_px),
            ("min_plot_size_px", self.min_plot_size_px),
            ("annotation_offset_px", self.annotation_offset_px),
            ("tick_label_padding_px", self.tick_label_padding_px),
            ("legend_gap_px", self.legend_gap_px),
            ("legend_padding_px", self.legend_padding_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "render style `{name}` must be finite and >= 0"
                )));
            }
        }

        if !self.bar_width_ratio.is_finite()
            || self.bar_width_ratio <= 0.0
            || self.bar_width_ratio > 1.0
        {
            return Err(ChartError::InvalidConfig(
                "bar width ratio must be in (0, 1]".to_owned(),
            ));
        }
        if !self.x_tick_label_rotation_deg.is_finite() {
            return Err(ChartError::InvalidConfig(
                "tick label rotation must be finite".to_owned(),
            ));
        }
        Ok(())
    }
}
