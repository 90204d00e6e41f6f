use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{GroupColumn, ResultTable};
use crate::error::ChartResult;
use crate::render::{Color, LineStrokeStyle};

use super::axis_ticks::ScoreAxis;
use super::chart_config::{ChartConfig, non_empty_or};
use super::palette::resolve_group_colors;
use super::reference_lines::{ReferenceLineKind, ReferenceLines, resolve_reference_lines};
use super::render_style::RenderStyle;

pub const UNGROUPED_LABEL: &str = "Individual Scores";
pub const DEFAULT_X_LABEL: &str = "Intelligence Subtest";

/// One bar of the chart, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneBar {
    pub label: String,
    pub score: i64,
    pub group: Option<String>,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendMarker {
    Swatch(Color),
    Line { color: Color, style: LineStrokeStyle },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub marker: LegendMarker,
}

/// Resolved chart content before pixel layout.
///
/// Everything a renderer needs to know about *what* to draw: labels, bar
/// colors, reference lines and the fixed score axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartScene {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub grouping_label: &'static str,
    pub group_column: Option<GroupColumn>,
    pub group_colors: IndexMap<String, Color>,
    pub bars: Vec<SceneBar>,
    pub reference: Option<ReferenceLines>,
    pub y_axis: ScoreAxis,
    pub legend_title: Option<String>,
    pub legend: Vec<LegendEntry>,
}

impl ChartScene {
    #[must_use]
    pub fn has_legend(&self) -> bool {
        !self.legend.is_empty()
    }

    #[must_use]
    pub fn reference_values(&self) -> Vec<f64> {
        self.reference
            .as_ref()
            .map(ReferenceLines::values)
            .unwrap_or_default()
    }
}

/// Resolves labels, group colors, reference lines and axis for one chart.
pub fn build_scene(
    table: &ResultTable,
    config: &ChartConfig,
    style: &RenderStyle,
) -> ChartResult<ChartScene> {
    config.validate()?;
    style.validate()?;

    let group_column = table.group_column();
    let grouping_label = match group_column {
        Some(column) => column.grouping_label(),
        None => {
            warn!("table has no group column; plotting individual scores without grouping");
            UNGROUPED_LABEL
        }
    };

    let group_colors = if group_column.is_some() {
        resolve_group_colors(&table.distinct_groups(), config.custom_palette())?
    } else {
        IndexMap::new()
    };

    let bars = table
        .rows()
        .iter()
        .map(|row| {
            let color = row
                .group
                .as_ref()
                .and_then(|group| group_colors.get(group).copied())
                .unwrap_or(style.ungrouped_bar_color);
            SceneBar {
                label: row.label.clone(),
                score: row.score.get(),
                group: row.group.clone(),
                color,
            }
        })
        .collect::<Vec<_>>();

    let reference = resolve_reference_lines(config.reference_mean, config.safety_margin);
    if config.reference_mean.is_none() && config.safety_margin.is_some() {
        debug!("safety margin ignored without a reference mean");
    }

    let mut legend: Vec<LegendEntry> = group_colors
        .iter()
        .map(|(group, color)| LegendEntry {
            label: group.clone(),
            marker: LegendMarker::Swatch(*color),
        })
        .collect();
    if let Some(reference) = &reference {
        legend.extend(reference.lines.iter().map(|line| {
            let (color, stroke) = match line.kind {
                ReferenceLineKind::Mean => (style.mean_line_color, style.mean_line_style),
                ReferenceLineKind::UpperMargin | ReferenceLineKind::LowerMargin => {
                    (style.margin_line_color, style.margin_line_style)
                }
            };
            LegendEntry {
                label: line.label.clone(),
                marker: LegendMarker::Line {
                    color,
                    style: stroke,
                },
            }
        }));
    }

    let policy = table.policy();
    let title = non_empty_or(config.title.as_deref(), || {
        format!("Intelligence Subtest Scores by {grouping_label}")
    });
    let x_label = non_empty_or(config.x_label.as_deref(), || DEFAULT_X_LABEL.to_owned());
    let y_label = non_empty_or(config.y_label.as_deref(), || {
        format!("Score ({}-{})", policy.min(), policy.max())
    });

    debug!(
        bar_count = bars.len(),
        group_count = group_colors.len(),
        has_reference = reference.is_some(),
        "resolved chart scene"
    );

    Ok(ChartScene {
        title,
        x_label,
        y_label,
        grouping_label,
        group_column,
        legend_title: group_column.map(|_| grouping_label.to_owned()),
        group_colors,
        bars,
        reference,
        y_axis: ScoreAxis::for_policy(policy),
        legend,
    })
}
