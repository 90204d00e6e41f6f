use crate::core::{BandScale, LinearScale, PixelSpan, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CanvasLayerKind, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
};

use super::chart_scene::{ChartScene, LegendMarker};
use super::layout_helpers::{estimate_label_text_width_px, estimate_text_height_px};
use super::reference_lines::ReferenceLineKind;
use super::render_style::RenderStyle;

/// Pixel regions of one chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub plot_left: f64,
    pub plot_top: f64,
    pub plot_right: f64,
    pub plot_bottom: f64,
    /// Left edge and width of the legend box; zero width when there is no legend.
    pub legend_left: f64,
    pub legend_width: f64,
}

impl ChartLayout {
    #[must_use]
    pub fn x_span(self) -> PixelSpan {
        PixelSpan::new(self.plot_left, self.plot_right)
    }

    /// Bottom-to-top span used for score values.
    #[must_use]
    pub fn y_span(self) -> PixelSpan {
        PixelSpan::new(self.plot_bottom, self.plot_top)
    }
}

fn legend_row_height(style: &RenderStyle) -> f64 {
    estimate_text_height_px(style.legend_font_size_px) + 4.0
}

fn legend_box_width(scene: &ChartScene, style: &RenderStyle) -> f64 {
    if !scene.has_legend() {
        return 0.0;
    }
    let entries_width = scene
        .legend
        .iter()
        .map(|entry| {
            style.legend_marker_width_px
                + 6.0
                + estimate_label_text_width_px(&entry.label, style.legend_font_size_px)
        })
        .fold(0.0, f64::max);
    let title_width = scene.legend_title.as_deref().map_or(0.0, |title| {
        estimate_label_text_width_px(title, style.legend_font_size_px)
    });
    entries_width.max(title_width) + 2.0 * style.legend_padding_px
}

/// Splits the viewport into plot area and right-hand legend gutter.
pub fn resolve_chart_layout(
    scene: &ChartScene,
    style: &RenderStyle,
    viewport: Viewport,
) -> ChartResult<ChartLayout> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let width = f64::from(viewport.width);
    let height = f64::from(viewport.height);
    let legend_width = legend_box_width(scene, style);
    let legend_gutter = if legend_width > 0.0 {
        legend_width + style.legend_gap_px
    } else {
        0.0
    };

    let plot_left = style.margin_left_px;
    let plot_top = style.margin_top_px;
    let plot_right = width - style.margin_right_px - legend_gutter;
    let plot_bottom = height - style.margin_bottom_px;
    if plot_right - plot_left < style.min_plot_size_px
        || plot_bottom - plot_top < style.min_plot_size_px
    {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    Ok(ChartLayout {
        plot_left,
        plot_top,
        plot_right,
        plot_bottom,
        legend_left: plot_right + style.legend_gap_px,
        legend_width,
    })
}

/// Materializes backend-agnostic primitives for one chart.
///
/// Geometry is a pure function of scene, style and viewport, so two builds of
/// the same input produce identical frames.
pub fn build_render_frame(
    scene: &ChartScene,
    style: &RenderStyle,
    viewport: Viewport,
) -> ChartResult<RenderFrame> {
    let layout = resolve_chart_layout(scene, style, viewport)?;
    let mut frame = RenderFrame::new(viewport);

    frame.push_rect(
        CanvasLayerKind::Background,
        RectPrimitive::new(
            0.0,
            0.0,
            f64::from(viewport.width),
            f64::from(viewport.height),
            style.background_color,
        ),
    );

    let y_scale = LinearScale::new(scene.y_axis.range_start, scene.y_axis.range_end)?;
    let y_span = layout.y_span();

    push_score_axis(&mut frame, scene, style, layout, y_scale)?;
    push_reference_zone(&mut frame, scene, style, layout, y_scale)?;
    push_bars(&mut frame, scene, style, layout, y_scale)?;
    push_reference_lines(&mut frame, scene, style, layout, y_scale)?;
    push_titles(&mut frame, scene, style, layout, viewport);
    push_legend(&mut frame, scene, style, layout);

    // Spines on the left and bottom of the plot area.
    frame.push_line(
        CanvasLayerKind::Axis,
        LinePrimitive::new(
            layout.plot_left,
            y_span.start,
            layout.plot_left,
            y_span.end,
            style.axis_line_width,
            style.axis_line_color,
        ),
    );
    frame.push_line(
        CanvasLayerKind::Axis,
        LinePrimitive::new(
            layout.plot_left,
            layout.plot_bottom,
            layout.plot_right,
            layout.plot_bottom,
            style.axis_line_width,
            style.axis_line_color,
        ),
    );

    Ok(frame)
}

fn push_score_axis(
    frame: &mut RenderFrame,
    scene: &ChartScene,
    style: &RenderStyle,
    layout: ChartLayout,
    y_scale: LinearScale,
) -> ChartResult<()> {
    let label_height = estimate_text_height_px(style.tick_label_font_size_px);
    for tick in &scene.y_axis.ticks {
        let y = y_scale.domain_to_pixel(*tick as f64, layout.y_span())?;
        frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(
                layout.plot_left,
                y,
                layout.plot_right,
                y,
                style.grid_line_width,
                style.grid_line_color,
            ),
        );
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                tick.to_string(),
                layout.plot_left - style.tick_label_padding_px,
                y - label_height / 2.0,
                style.tick_label_font_size_px,
                style.text_color,
                TextHAlign::Right,
            ),
        );
    }
    Ok(())
}

fn push_reference_zone(
    frame: &mut RenderFrame,
    scene: &ChartScene,
    style: &RenderStyle,
    layout: ChartLayout,
    y_scale: LinearScale,
) -> ChartResult<()> {
    let Some(zone) = scene.reference.as_ref().and_then(|reference| reference.zone) else {
        return Ok(());
    };

    let top = y_scale.clamped_domain_to_pixel(zone.upper, layout.y_span())?;
    let bottom = y_scale.clamped_domain_to_pixel(zone.lower, layout.y_span())?;
    frame.push_rect(
        CanvasLayerKind::ReferenceZone,
        RectPrimitive::new(
            layout.plot_left,
            top,
            layout.plot_right - layout.plot_left,
            bottom - top,
            style.reference_zone_color,
        ),
    );
    Ok(())
}

fn push_bars(
    frame: &mut RenderFrame,
    scene: &ChartScene,
    style: &RenderStyle,
    layout: ChartLayout,
    y_scale: LinearScale,
) -> ChartResult<()> {
    if scene.bars.is_empty() {
        return Ok(());
    }

    let bands = BandScale::new(scene.bars.len(), layout.x_span())?;
    let bar_width = bands.step_px() * style.bar_width_ratio;
    let annotation_height = estimate_text_height_px(style.annotation_font_size_px);
    let tick_label_y = layout.plot_bottom + style.tick_label_padding_px;

    for (index, bar) in scene.bars.iter().enumerate() {
        let center_x = bands.center_px(index);
        // Scores below the axis floor collapse to a zero-height bar.
        let top = y_scale.clamped_domain_to_pixel(bar.score as f64, layout.y_span())?;
        frame.push_rect(
            CanvasLayerKind::Bars,
            RectPrimitive::new(
                center_x - bar_width / 2.0,
                top,
                bar_width,
                layout.plot_bottom - top,
                bar.color,
            ),
        );
        frame.push_text(
            CanvasLayerKind::Annotations,
            TextPrimitive::new(
                bar.score.to_string(),
                center_x,
                top - style.annotation_offset_px - annotation_height,
                style.annotation_font_size_px,
                style.text_color,
                TextHAlign::Center,
            ),
        );
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                bar.label.clone(),
                center_x,
                tick_label_y,
                style.tick_label_font_size_px,
                style.text_color,
                TextHAlign::Right,
            )
            .with_rotation(style.x_tick_label_rotation_deg),
        );
    }
    Ok(())
}

fn push_reference_lines(
    frame: &mut RenderFrame,
    scene: &ChartScene,
    style: &RenderStyle,
    layout: ChartLayout,
    y_scale: LinearScale,
) -> ChartResult<()> {
    let Some(reference) = &scene.reference else {
        return Ok(());
    };

    for line in &reference.lines {
        // Lines outside the fixed axis range stay in the legend only.
        if !scene.y_axis.contains(line.value) {
            continue;
        }
        let y = y_scale.domain_to_pixel(line.value, layout.y_span())?;
        let (color, width, stroke) = match line.kind {
            ReferenceLineKind::Mean => (
                style.mean_line_color,
                style.mean_line_width,
                style.mean_line_style,
            ),
            ReferenceLineKind::UpperMargin | ReferenceLineKind::LowerMargin => (
                style.margin_line_color,
                style.margin_line_width,
                style.margin_line_style,
            ),
        };
        frame.push_line(
            CanvasLayerKind::ReferenceLines,
            LinePrimitive::new(layout.plot_left, y, layout.plot_right, y, width, color)
                .with_stroke_style(stroke),
        );
    }
    Ok(())
}

fn push_titles(
    frame: &mut RenderFrame,
    scene: &ChartScene,
    style: &RenderStyle,
    layout: ChartLayout,
    viewport: Viewport,
) {
    let plot_center_x = (layout.plot_left + layout.plot_right) / 2.0;
    let plot_center_y = (layout.plot_top + layout.plot_bottom) / 2.0;
    let title_height = estimate_text_height_px(style.title_font_size_px);
    let axis_label_height = estimate_text_height_px(style.axis_label_font_size_px);

    frame.push_text(
        CanvasLayerKind::Axis,
        TextPrimitive::new(
            scene.title.clone(),
            plot_center_x,
            (layout.plot_top - title_height) / 2.0,
            style.title_font_size_px,
            style.text_color,
            TextHAlign::Center,
        ),
    );
    frame.push_text(
        CanvasLayerKind::Axis,
        TextPrimitive::new(
            scene.x_label.clone(),
            plot_center_x,
            f64::from(viewport.height) - axis_label_height - 12.0,
            style.axis_label_font_size_px,
            style.text_color,
            TextHAlign::Center,
        ),
    );
    frame.push_text(
        CanvasLayerKind::Axis,
        TextPrimitive::new(
            scene.y_label.clone(),
            12.0,
            plot_center_y,
            style.axis_label_font_size_px,
            style.text_color,
            TextHAlign::Center,
        )
        .with_rotation(90.0),
    );
}

fn push_legend(
    frame: &mut RenderFrame,
    scene: &ChartScene,
    style: &RenderStyle,
    layout: ChartLayout,
) {
    if !scene.has_legend() {
        return;
    }

    let row_height = legend_row_height(style);
    let title_rows = usize::from(scene.legend_title.is_some());
    let row_count = scene.legend.len() + title_rows;
    let box_height = row_count as f64 * row_height + 2.0 * style.legend_padding_px;
    let left = layout.legend_left;
    let top = layout.plot_top;

    frame.push_rect(
        CanvasLayerKind::Legend,
        RectPrimitive::new(left, top, layout.legend_width, box_height, style.background_color)
            .with_border(1.0, style.legend_border_color),
    );

    let content_left = left + style.legend_padding_px;
    let mut row_top = top + style.legend_padding_px;
    if let Some(title) = &scene.legend_title {
        frame.push_text(
            CanvasLayerKind::Legend,
            TextPrimitive::new(
                title.clone(),
                content_left,
                row_top,
                style.legend_font_size_px,
                style.text_color,
                TextHAlign::Left,
            ),
        );
        row_top += row_height;
    }

    for entry in &scene.legend {
        let marker_mid_y = row_top + row_height / 2.0;
        match entry.marker {
            LegendMarker::Swatch(color) => frame.push_rect(
                CanvasLayerKind::Legend,
                RectPrimitive::new(
                    content_left,
                    marker_mid_y - 5.0,
                    style.legend_marker_width_px,
                    10.0,
                    color,
                ),
            ),
            LegendMarker::Line { color, style: stroke } => frame.push_line(
                CanvasLayerKind::Legend,
                LinePrimitive::new(
                    content_left,
                    marker_mid_y,
                    content_left + style.legend_marker_width_px,
                    marker_mid_y,
                    1.5,
                    color,
                )
                .with_stroke_style(stroke),
            ),
        }
        frame.push_text(
            CanvasLayerKind::Legend,
            TextPrimitive::new(
                entry.label.clone(),
                content_left + style.legend_marker_width_px + 6.0,
                row_top + 2.0,
                style.legend_font_size_px,
                style.text_color,
                TextHAlign::Left,
            ),
        );
        row_top += row_height;
    }
}
