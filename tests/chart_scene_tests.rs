use approx::assert_abs_diff_eq;
use qi_profile::api::{
    ChartConfig, LegendMarker, ReferenceLineKind, RenderStyle, UNGROUPED_LABEL, build_scene,
    default_palette,
};
use qi_profile::core::{NamedScores, RawScore, ResultTable, ScorePolicy};
use qi_profile::render::Color;
use qi_profile::{ChartError, build_index_table, build_qi_table};

fn qi_table() -> ResultTable {
    build_qi_table(&NamedScores::new()).expect("qi table")
}

fn index_table() -> ResultTable {
    build_index_table(&NamedScores::new()).expect("index table")
}

#[test]
fn grouping_label_follows_the_table_column() {
    let style = RenderStyle::default();
    let qi = build_scene(&qi_table(), &ChartConfig::new(), &style).expect("qi scene");
    let index = build_scene(&index_table(), &ChartConfig::new(), &style).expect("index scene");

    assert_eq!(qi.grouping_label, "QI Category");
    assert_eq!(index.grouping_label, "Factorial Indices");
    assert_eq!(qi.legend_title.as_deref(), Some("QI Category"));
    assert_eq!(qi.title, "Intelligence Subtest Scores by QI Category");
    assert_eq!(index.title, "Intelligence Subtest Scores by Factorial Indices");
}

#[test]
fn mean_and_margin_produce_three_lines_and_a_zone() {
    let config = ChartConfig::new()
        .with_reference_mean(8.0)
        .with_safety_margin(2.0);
    let scene = build_scene(&qi_table(), &config, &RenderStyle::default()).expect("scene");
    let reference = scene.reference.as_ref().expect("reference lines");

    assert_eq!(scene.reference_values(), vec![8.0, 10.0, 6.0]);
    let zone = reference.zone.expect("zone");
    assert_abs_diff_eq!(zone.lower, 6.0);
    assert_abs_diff_eq!(zone.upper, 10.0);
    assert_eq!(
        reference.line(ReferenceLineKind::Mean).map(|l| l.label.as_str()),
        Some("Mean (8.0)")
    );
    assert_eq!(
        reference
            .line(ReferenceLineKind::UpperMargin)
            .map(|l| l.label.as_str()),
        Some("Upper margin (10.0)")
    );
    assert_eq!(
        reference
            .line(ReferenceLineKind::LowerMargin)
            .map(|l| l.label.as_str()),
        Some("Lower margin (6.0)")
    );
}

#[test]
fn zero_or_absent_margin_keeps_only_the_mean() {
    let style = RenderStyle::default();
    for config in [
        ChartConfig::new().with_reference_mean(9.5),
        ChartConfig::new()
            .with_reference_mean(9.5)
            .with_safety_margin(0.0),
    ] {
        let scene = build_scene(&qi_table(), &config, &style).expect("scene");
        assert_eq!(scene.reference_values(), vec![9.5]);
        assert!(scene.reference.as_ref().is_some_and(|r| r.zone.is_none()));
    }
}

#[test]
fn margin_without_mean_draws_nothing() {
    let config = ChartConfig::new().with_safety_margin(3.0);
    let scene = build_scene(&qi_table(), &config, &RenderStyle::default()).expect("scene");
    assert!(scene.reference.is_none());
    assert!(scene.reference_values().is_empty());
    assert!(
        scene
            .legend
            .iter()
            .all(|entry| matches!(entry.marker, LegendMarker::Swatch(_)))
    );
}

#[test]
fn default_colors_are_distinct_per_group() {
    let scene =
        build_scene(&index_table(), &ChartConfig::new(), &RenderStyle::default()).expect("scene");
    let colors: Vec<Color> = scene.group_colors.values().copied().collect();
    assert_eq!(colors, default_palette(4));
    assert_eq!(
        scene.group_colors.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["ICV", "IOP", "IMO", "IVP"]
    );

    // Bars of the same group share one color.
    assert_eq!(scene.bars[0].color, scene.bars[2].color);
    assert_ne!(scene.bars[2].color, scene.bars[3].color);
}

#[test]
fn short_custom_palette_cycles_over_groups() {
    let config = ChartConfig::new().with_palette(["#ff0000", "#0000ff"]);
    let scene = build_scene(&index_table(), &config, &RenderStyle::default()).expect("scene");
    let red = Color::rgb8(0xff, 0x00, 0x00);
    let blue = Color::rgb8(0x00, 0x00, 0xff);

    let colors: Vec<Color> = scene.group_colors.values().copied().collect();
    assert_eq!(colors, vec![red, blue, red, blue]);
}

#[test]
fn empty_palette_text_falls_back_to_default_colors() {
    let config = ChartConfig::new().with_palette_text(" , ");
    let scene = build_scene(&qi_table(), &config, &RenderStyle::default()).expect("scene");
    let colors: Vec<Color> = scene.group_colors.values().copied().collect();
    assert_eq!(colors, default_palette(2));
}

#[test]
fn malformed_palette_entry_is_a_color_error() {
    let config = ChartConfig::new().with_palette(["#12345", "#00ff00"]);
    let result = build_scene(&qi_table(), &config, &RenderStyle::default());
    assert!(matches!(result, Err(ChartError::InvalidColor(_))));
}

#[test]
fn score_axis_covers_the_full_policy_range() {
    let scene = build_scene(&qi_table(), &ChartConfig::new(), &RenderStyle::default())
        .expect("scene");
    assert_eq!(scene.y_axis.ticks, (1..=18).collect::<Vec<i64>>());
    assert_abs_diff_eq!(scene.y_axis.range_start, 1.0);
    assert_abs_diff_eq!(scene.y_axis.range_end, 19.0);
    assert_eq!(scene.y_label, "Score (0-18)");
}

#[test]
fn custom_labels_override_defaults_and_blank_ones_do_not() {
    let config = ChartConfig::new()
        .with_title("Perfil")
        .with_axis_labels("  ", "Pontos");
    let scene = build_scene(&qi_table(), &config, &RenderStyle::default()).expect("scene");
    assert_eq!(scene.title, "Perfil");
    assert_eq!(scene.x_label, "Intelligence Subtest");
    assert_eq!(scene.y_label, "Pontos");
}

#[test]
fn tables_without_groups_use_a_single_color() {
    let table = ResultTable::ungrouped(
        ScorePolicy::default(),
        [("A", RawScore::from(3)), ("B", RawScore::from(11))],
    )
    .expect("table");
    let style = RenderStyle::default();
    let scene = build_scene(&table, &ChartConfig::new(), &style).expect("scene");

    assert_eq!(scene.grouping_label, UNGROUPED_LABEL);
    assert!(scene.group_colors.is_empty());
    assert!(scene.legend_title.is_none());
    assert!(scene.bars.iter().all(|bar| bar.color == style.ungrouped_bar_color));
    assert!(!scene.has_legend());
}

#[test]
fn legend_lists_groups_then_reference_lines() {
    let config = ChartConfig::session_defaults(ScorePolicy::default());
    let scene = build_scene(&qi_table(), &config, &RenderStyle::default()).expect("scene");
    let labels: Vec<&str> = scene.legend.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "QI Verbal",
            "QI Executivo",
            "Mean (8.0)",
            "Upper margin (10.0)",
            "Lower margin (6.0)"
        ]
    );
    assert_eq!(scene.title, "Perfil de Scores");
}

#[test]
fn negative_margin_is_rejected() {
    let config = ChartConfig::new()
        .with_reference_mean(8.0)
        .with_safety_margin(-1.0);
    let result = build_scene(&qi_table(), &config, &RenderStyle::default());
    assert!(matches!(result, Err(ChartError::InvalidConfig(_))));
}
