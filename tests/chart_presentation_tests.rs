use approx::assert_abs_diff_eq;
use chrono::{TimeZone, Utc};
use price_chart::api::{
    ChartConfig, ChartView, LOADING_PLACEHOLDER, LabelTimeZone, LoadedSeries, NO_DATA_PLACEHOLDER,
    NoDataReason, PriceChart, ResponseOutcome, SeriesData,
};
use price_chart::core::{PeriodKey, Series, SeriesPoint, Ticker};
use price_chart::error::FetchError;
use price_chart::render::NullRenderer;

fn daily_series(closes: &[f64]) -> LoadedSeries {
    let points = closes
        .iter()
        .enumerate()
        .map(|(day, &close)| {
            let time = Utc
                .with_ymd_and_hms(2024, 1, 2 + day as u32, 0, 0, 0)
                .single()
                .expect("valid timestamp");
            SeriesPoint::new(time, close)
        })
        .collect();
    let series = Series::new(points).expect("valid series");
    LoadedSeries {
        is_positive: series.net_change() >= 0.0,
        change_percent: series.change_percent(),
        series,
    }
}

fn loaded_chart(closes: &[f64]) -> PriceChart<NullRenderer> {
    let config = ChartConfig::default().with_timezone(LabelTimeZone::Utc);
    let mut chart = PriceChart::new(NullRenderer::default(), config).expect("chart init");
    let ticket = chart
        .select_ticker(Ticker::parse("AAPL").expect("valid ticker"))
        .expect("ticket");
    let outcome = chart.apply_response(&ticket, Ok(SeriesData::Loaded(daily_series(closes))));
    assert_eq!(outcome, ResponseOutcome::Applied);
    chart
}

#[test]
fn fresh_chart_is_idle_and_asks_for_nothing() {
    let mut chart =
        PriceChart::new(NullRenderer::default(), ChartConfig::default()).expect("chart init");

    assert_eq!(chart.view(), &ChartView::Idle);
    assert_eq!(chart.period(), PeriodKey::Month);
    assert!(chart.select_period(PeriodKey::Year).is_none());
    assert_eq!(chart.period(), PeriodKey::Year);
    assert!(chart.presentation().placeholder.is_none());
}

#[test]
fn reselecting_the_active_key_issues_no_request() {
    let mut chart = loaded_chart(&[1.0, 2.0]);

    assert!(chart.select_ticker(Ticker::parse("aapl").expect("valid")).is_none());
    assert!(chart.select_period(PeriodKey::Month).is_none());
    assert!(chart.series().is_some());
}

#[test]
fn loading_state_shows_placeholder_and_drops_hover() {
    let mut chart = loaded_chart(&[100.0, 105.0, 95.0, 110.0]);
    assert!(chart.pointer_move(270.0).is_some());

    let ticket = chart.select_period(PeriodKey::Week);
    assert!(ticket.is_some());
    assert!(chart.is_loading());
    assert!(chart.hover_state().is_none());

    let presentation = chart.presentation();
    assert_eq!(presentation.placeholder, Some(LOADING_PLACEHOLDER));
    assert!(presentation.change.is_none());
    assert!(presentation.axis.is_none());
}

#[test]
fn hover_resolves_price_time_and_coordinates() {
    let mut chart = loaded_chart(&[100.0, 105.0, 95.0, 110.0]);

    let hover = chart.pointer_move(270.0).expect("inside canvas").clone();
    assert_eq!(hover.index, 1);
    assert_eq!(hover.price, 105.0);
    assert_eq!(hover.label, "Jan 3, 2024");
    assert_abs_diff_eq!(hover.x, 268.0, epsilon = 1e-9);

    let caption = chart.presentation().hover.expect("caption");
    assert_eq!(caption.price, "$105.00");
    assert_eq!(caption.label, "Jan 3, 2024");
}

#[test]
fn hover_clears_outside_the_canvas_and_on_leave() {
    let mut chart = loaded_chart(&[100.0, 105.0, 95.0, 110.0]);

    assert!(chart.pointer_move(-1.0).is_none());
    assert!(chart.pointer_move(801.0).is_none());

    assert!(chart.pointer_move(0.0).is_some());
    chart.pointer_leave();
    assert!(chart.hover_state().is_none());
    assert!(chart.presentation().hover.is_none());
}

#[test]
fn stretched_surface_offsets_hit_the_right_sample() {
    let mut chart = loaded_chart(&[100.0, 105.0, 95.0, 110.0]);

    let hover = chart
        .pointer_move_client(400.0, 400.0)
        .expect("valid offset")
        .expect("inside canvas");
    assert_eq!(hover.index, 3);
}

#[test]
fn ready_presentation_carries_badge_axis_and_hint() {
    let chart = loaded_chart(&[100.0, 105.0, 95.0, 110.0]);
    let presentation = chart.presentation();

    let badge = presentation.change.expect("badge");
    assert_eq!(badge.text, "+10.00%");
    assert!(badge.is_positive);

    let axis = presentation.axis.expect("axis labels");
    assert_eq!(axis.start, "Jan 2, 2024 · $95.00");
    assert_eq!(axis.end, "$110.00 · Jan 5, 2024");

    assert!(presentation.hint.contains("historical"));
    assert!(presentation.placeholder.is_none());
}

#[test]
fn empty_and_failed_responses_show_no_data() {
    let mut chart = loaded_chart(&[1.0, 2.0]);

    let ticket = chart.reload().expect("ticket");
    chart.apply_response(&ticket, Ok(SeriesData::NoPoints));
    assert_eq!(chart.view(), &ChartView::NoData(NoDataReason::Empty));
    assert_eq!(chart.presentation().placeholder, Some(NO_DATA_PLACEHOLDER));

    let ticket = chart.reload().expect("ticket");
    let failure = FetchError::Status {
        status: 500,
        detail: Some("upstream down".to_owned()),
    };
    chart.apply_response(&ticket, Err(failure.clone()));
    assert_eq!(chart.view(), &ChartView::NoData(NoDataReason::Failed(failure)));
    assert!(chart.pointer_move(100.0).is_none());
}

#[test]
fn render_emits_area_and_line_then_hover_glyphs() {
    let mut chart = loaded_chart(&[100.0, 105.0, 95.0, 110.0]);

    chart.render().expect("render");
    assert_eq!(chart.renderer().last_path_count, 2);
    assert_eq!(chart.renderer().last_line_count, 0);
    assert_eq!(chart.renderer().last_circle_count, 0);

    chart.pointer_move(530.0);
    chart.render().expect("render");
    let renderer = chart.into_renderer();
    assert_eq!(renderer.frames_rendered, 2);
    assert_eq!(renderer.last_line_count, 1);
    assert_eq!(renderer.last_circle_count, 1);
}

#[test]
fn idle_chart_renders_an_empty_frame() {
    let chart =
        PriceChart::new(NullRenderer::default(), ChartConfig::default()).expect("chart init");
    let frame = chart.build_render_frame().expect("frame");
    assert!(frame.is_empty());
}
