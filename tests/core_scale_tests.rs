use approx::assert_abs_diff_eq;
use price_chart::core::{ChartCanvas, ScaleContext, Viewport};
use price_chart::error::ChartError;

#[test]
fn scale_context_spans_min_to_max() {
    let scale = ScaleContext::from_prices(&[100.0, 105.0, 95.0, 110.0], ChartCanvas::default())
        .expect("valid scale");

    assert_eq!(scale.min(), 95.0);
    assert_eq!(scale.max(), 110.0);
    assert_eq!(scale.range(), 15.0);
    assert_eq!(scale.sample_count(), 4);
}

#[test]
fn first_and_last_samples_sit_on_the_padding() {
    let scale = ScaleContext::from_prices(&[100.0, 105.0, 95.0, 110.0], ChartCanvas::default())
        .expect("valid scale");

    assert_eq!(scale.to_x(0), 4.0);
    assert_eq!(scale.to_x(3), 796.0);
    assert_abs_diff_eq!(scale.to_x(1), 268.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scale.step_x(), 264.0, epsilon = 1e-9);
}

#[test]
fn extremes_map_to_padded_top_and_bottom() {
    let scale = ScaleContext::from_prices(&[100.0, 105.0, 95.0, 110.0], ChartCanvas::default())
        .expect("valid scale");

    assert_abs_diff_eq!(scale.to_y(110.0), 8.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scale.to_y(95.0), 112.0, epsilon = 1e-9);
    assert_abs_diff_eq!(scale.to_y(100.0), 112.0 - 104.0 / 3.0, epsilon = 1e-9);
}

#[test]
fn flat_series_is_drawn_at_mid_height() {
    let scale = ScaleContext::from_prices(&[50.0, 50.0, 50.0], ChartCanvas::default())
        .expect("valid scale");

    assert_eq!(scale.range(), 1.0);
    assert_abs_diff_eq!(scale.to_y(50.0), 60.0, epsilon = 1e-9);
}

#[test]
fn single_sample_maps_to_left_padding() {
    let scale =
        ScaleContext::from_prices(&[42.0], ChartCanvas::default()).expect("valid scale");

    assert_eq!(scale.to_x(0), 4.0);
    assert_eq!(scale.step_x(), 0.0);
    assert!(scale.x_to_fractional_index(100.0).is_none());
    assert!(scale.to_y(42.0).is_finite());
}

#[test]
fn empty_prices_are_rejected() {
    let result = ScaleContext::from_prices(&[], ChartCanvas::default());
    assert!(matches!(result, Err(ChartError::EmptySeries)));
}

#[test]
fn non_finite_prices_are_rejected() {
    let result = ScaleContext::from_prices(&[1.0, f64::NAN], ChartCanvas::default());
    assert!(matches!(result, Err(ChartError::InvalidData(_))));
}

#[test]
fn spread_beyond_f64_range_is_rejected() {
    let result = ScaleContext::from_prices(&[1e308, -1e308], ChartCanvas::default());
    assert!(matches!(result, Err(ChartError::InvalidData(_))));

    let scale = ScaleContext::from_prices(&[f64::MAX, 0.0], ChartCanvas::default())
        .expect("spread still representable");
    assert!(scale.to_y(f64::MAX).is_finite());
    assert!(scale.to_y(0.0).is_finite());
}

#[test]
fn zero_viewport_is_rejected() {
    let canvas = ChartCanvas::new(Viewport::new(0, 120), 4.0, 8.0);
    let result = ScaleContext::from_prices(&[1.0, 2.0], canvas);
    assert!(matches!(
        result,
        Err(ChartError::InvalidViewport {
            width: 0,
            height: 120
        })
    ));
}

#[test]
fn padding_that_eats_the_canvas_is_rejected() {
    let canvas = ChartCanvas::new(Viewport::new(8, 120), 4.0, 8.0);
    assert!(ScaleContext::from_prices(&[1.0, 2.0], canvas).is_err());
}

#[test]
fn fractional_index_inverts_to_x() {
    let scale = ScaleContext::from_prices(&[1.0, 2.0, 3.0, 4.0, 5.0], ChartCanvas::default())
        .expect("valid scale");

    for index in 0..5 {
        let recovered = scale
            .x_to_fractional_index(scale.to_x(index))
            .expect("multi-sample scale");
        assert_abs_diff_eq!(recovered, index as f64, epsilon = 1e-9);
    }
}

#[test]
fn stretched_client_offsets_map_back_to_logical_units() {
    let canvas = ChartCanvas::default();

    let x = canvas.client_to_logical_x(200.0, 400.0).expect("valid offset");
    assert_abs_diff_eq!(x, 400.0, epsilon = 1e-9);

    assert!(canvas.client_to_logical_x(10.0, 0.0).is_err());
    assert!(canvas.client_to_logical_x(f64::NAN, 400.0).is_err());
}
