use approx::assert_abs_diff_eq;
use qi_profile::api::{
    ChartConfig, RenderStyle, build_chart_frame_with_style, build_scene, render_with,
    resolve_chart_layout,
};
use qi_profile::core::{NamedScores, ResultTable, ScorePolicy, Viewport};
use qi_profile::render::{CanvasLayerKind, LineStrokeStyle, NullRenderer, Renderer};
use qi_profile::{ChartError, build_chart_frame, build_index_table, build_qi_table};

fn qi_table(scores: &NamedScores) -> ResultTable {
    build_qi_table(scores).expect("qi table")
}

#[test]
fn null_renderer_counts_every_primitive() {
    let table = qi_table(&NamedScores::new());
    let config = ChartConfig::session_defaults(ScorePolicy::default());
    let mut renderer = NullRenderer::default();

    render_with(&mut renderer, &table, &config, &RenderStyle::default()).expect("render");

    // Background, zone, 13 bars, legend box and 2 group swatches.
    assert_eq!(renderer.last_rect_count, 18);
    // 18 grid lines, 3 reference lines, 3 legend line markers and 2 spines.
    assert_eq!(renderer.last_line_count, 26);
    // 18 tick labels, 13 annotations, 13 subtest labels, 3 titles,
    // legend title and 5 legend entries.
    assert_eq!(renderer.last_text_count, 53);
    assert_eq!(renderer.render_count, 1);
}

#[test]
fn frame_without_reference_lines_has_no_reference_layers() {
    let table = qi_table(&NamedScores::new());
    let frame = build_chart_frame(&table, &ChartConfig::new()).expect("frame");

    assert!(frame.layer(CanvasLayerKind::ReferenceZone).rects.is_empty());
    assert!(frame.layer(CanvasLayerKind::ReferenceLines).lines.is_empty());
    assert_eq!(frame.layer(CanvasLayerKind::Bars).rects.len(), 13);
    assert_eq!(frame.layer(CanvasLayerKind::Annotations).texts.len(), 13);
}

#[test]
fn identical_inputs_build_identical_frames() {
    let scores = NamedScores::new().with("Cubos", 14).with("Codigos", 2);
    let table = qi_table(&scores);
    let config = ChartConfig::session_defaults(ScorePolicy::default());

    let first = build_chart_frame(&table, &config).expect("first");
    let second = build_chart_frame(&table, &config).expect("second");
    assert_eq!(first, second);
}

#[test]
fn layers_are_kept_in_paint_order() {
    let table = build_index_table(&NamedScores::new()).expect("index table");
    let frame = build_chart_frame(&table, &ChartConfig::new()).expect("frame");
    let kinds: Vec<_> = frame.layers.iter().map(|layer| layer.kind).collect();
    assert_eq!(kinds, CanvasLayerKind::CANONICAL_ORDER.to_vec());
}

#[test]
fn bar_heights_follow_scores_and_zero_collapses() {
    let scores = NamedScores::new()
        .with("Vocabulario", 18)
        .with("Semelhancas", 0)
        .with("Aritmetica", 10);
    let table = qi_table(&scores);
    let frame = build_chart_frame(&table, &ChartConfig::new()).expect("frame");
    let bars = &frame.layer(CanvasLayerKind::Bars).rects;

    let plot_bottom = bars[0].bottom();
    assert!(bars.iter().all(|bar| (bar.bottom() - plot_bottom).abs() < 1e-9));
    assert!(bars[0].height > bars[2].height);
    assert!(bars[2].height > bars[3].height);
    assert_abs_diff_eq!(bars[1].height, 0.0);

    // Each step of the score axis has the same pixel height.
    let per_unit = bars[0].height / 17.0;
    assert_abs_diff_eq!(bars[2].height, per_unit * 9.0, epsilon = 1e-9);
}

#[test]
fn annotations_show_the_integer_score_above_each_bar() {
    let scores = NamedScores::new().with("Vocabulario", 12);
    let table = qi_table(&scores);
    let frame = build_chart_frame(&table, &ChartConfig::new()).expect("frame");
    let bars = &frame.layer(CanvasLayerKind::Bars).rects;
    let annotations = &frame.layer(CanvasLayerKind::Annotations).texts;

    assert_eq!(annotations[0].text, "12");
    assert_eq!(annotations[1].text, "8");
    for (bar, label) in bars.iter().zip(annotations) {
        assert!(label.y < bar.y);
        assert_abs_diff_eq!(label.x, bar.x + bar.width / 2.0, epsilon = 1e-9);
    }
}

#[test]
fn subtest_labels_are_rotated_and_right_aligned() {
    let table = qi_table(&NamedScores::new());
    let frame = build_chart_frame(&table, &ChartConfig::new()).expect("frame");
    let rotated: Vec<_> = frame
        .layer(CanvasLayerKind::Axis)
        .texts
        .iter()
        .filter(|text| text.rotation_deg == 45.0)
        .collect();

    assert_eq!(rotated.len(), 13);
    assert_eq!(rotated[0].text, "Vocabulário");
    assert!(
        rotated
            .iter()
            .all(|text| text.h_align == qi_profile::render::TextHAlign::Right)
    );
}

#[test]
fn reference_lines_use_their_stroke_styles() {
    let table = qi_table(&NamedScores::new());
    let config = ChartConfig::new()
        .with_reference_mean(8.0)
        .with_safety_margin(2.0);
    let frame = build_chart_frame(&table, &config).expect("frame");
    let lines = &frame.layer(CanvasLayerKind::ReferenceLines).lines;
    let style = RenderStyle::default();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].stroke_style, LineStrokeStyle::Dashed);
    assert_eq!(lines[0].color, style.mean_line_color);
    assert_eq!(lines[1].stroke_style, LineStrokeStyle::Dotted);
    assert_eq!(lines[2].stroke_style, LineStrokeStyle::Dotted);
    // Upper margin sits higher on screen than the mean, lower margin below it.
    assert!(lines[1].y1 < lines[0].y1);
    assert!(lines[2].y1 > lines[0].y1);

    let zone = frame.layer(CanvasLayerKind::ReferenceZone).rects[0];
    assert_abs_diff_eq!(zone.y, lines[1].y1, epsilon = 1e-9);
    assert_abs_diff_eq!(zone.bottom(), lines[2].y1, epsilon = 1e-9);
}

#[test]
fn reference_lines_outside_the_axis_stay_in_the_legend_only() {
    let table = qi_table(&NamedScores::new());
    let config = ChartConfig::new()
        .with_reference_mean(8.0)
        .with_safety_margin(12.0);
    let frame = build_chart_frame(&table, &config).expect("frame");

    assert_eq!(frame.layer(CanvasLayerKind::ReferenceLines).lines.len(), 1);
    let legend_lines = &frame.layer(CanvasLayerKind::Legend).lines;
    assert_eq!(legend_lines.len(), 3);

    // The zone is clamped to the plot area.
    let zone = frame.layer(CanvasLayerKind::ReferenceZone).rects[0];
    let bars = &frame.layer(CanvasLayerKind::Bars).rects;
    assert_abs_diff_eq!(zone.bottom(), bars[0].bottom(), epsilon = 1e-9);
}

#[test]
fn viewport_too_small_for_the_plot_is_rejected() {
    let table = qi_table(&NamedScores::new());
    let config = ChartConfig::new().with_viewport(Viewport::new(200, 200));
    let result = build_chart_frame(&table, &config);
    assert!(matches!(
        result,
        Err(ChartError::InvalidViewport {
            width: 200,
            height: 200
        })
    ));
}

#[test]
fn legend_gutter_narrows_the_plot() {
    let table = qi_table(&NamedScores::new());
    let style = RenderStyle::default();
    let scene = build_scene(&table, &ChartConfig::new(), &style).expect("scene");
    let layout = resolve_chart_layout(&scene, &style, Viewport::default()).expect("layout");

    assert!(layout.legend_width > 0.0);
    assert!(layout.plot_right < 1400.0 - style.margin_right_px);
    assert_abs_diff_eq!(layout.legend_left, layout.plot_right + style.legend_gap_px);
}

#[test]
fn custom_style_flows_into_the_frame() {
    let table = qi_table(&NamedScores::new());
    let style = RenderStyle {
        x_tick_label_rotation_deg: 30.0,
        ..RenderStyle::default()
    };
    let frame =
        build_chart_frame_with_style(&table, &ChartConfig::new(), &style).expect("frame");
    let rotated = frame
        .layer(CanvasLayerKind::Axis)
        .texts
        .iter()
        .filter(|text| text.rotation_deg == 30.0)
        .count();
    assert_eq!(rotated, 13);
}

#[test]
fn null_renderer_rejects_invalid_frames() {
    let mut frame = qi_profile::render::RenderFrame::new(Viewport::default());
    frame.push_text(
        CanvasLayerKind::Axis,
        qi_profile::render::TextPrimitive::new(
            "",
            0.0,
            0.0,
            10.0,
            qi_profile::render::Color::rgb(0.0, 0.0, 0.0),
            qi_profile::render::TextHAlign::Left,
        ),
    );
    let mut renderer = NullRenderer::default();
    assert!(matches!(
        renderer.render(&frame),
        Err(ChartError::InvalidData(_))
    ));
    assert_eq!(renderer.render_count, 0);
}
