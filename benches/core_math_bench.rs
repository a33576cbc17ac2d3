use chrono::{Duration, TimeZone, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use price_chart::api::{ChartRenderer, ChartStyle};
use price_chart::core::{ChartCanvas, ScaleContext, Series, SeriesPoint};
use price_chart::interaction::HoverLocator;
use price_chart::render::{Renderer, SvgRenderer};
use std::hint::black_box;

fn synthetic_series(len: usize) -> Series {
    let start = Utc
        .with_ymd_and_hms(2020, 1, 1, 0, 0, 0)
        .single()
        .expect("valid start");
    let points = (0..len)
        .map(|i| {
            let t = i as f64;
            let close = 100.0 + (t * 0.05).sin() * 12.0 + t * 0.01;
            SeriesPoint::new(start + Duration::minutes(i as i64 * 5), close)
        })
        .collect();
    Series::new(points).expect("valid generated series")
}

fn bench_scale_context_10k(c: &mut Criterion) {
    let closes = synthetic_series(10_000).closes();

    c.bench_function("scale_context_10k", |b| {
        b.iter(|| {
            let _ = ScaleContext::from_prices(black_box(&closes), ChartCanvas::default())
                .expect("valid scale");
        })
    });
}

fn bench_hover_lookup(c: &mut Criterion) {
    let closes = synthetic_series(10_000).closes();
    let scale = ScaleContext::from_prices(&closes, ChartCanvas::default()).expect("valid scale");

    c.bench_function("hover_nearest_index_10k", |b| {
        b.iter(|| {
            let _ = HoverLocator::nearest_index(black_box(scale), black_box(413.7));
        })
    });

    c.bench_function("hover_nearest_index_scan_10k", |b| {
        b.iter(|| {
            let _ = HoverLocator::nearest_index_scan(black_box(scale), black_box(413.7));
        })
    });
}

fn bench_frame_to_svg_2k(c: &mut Criterion) {
    let series = synthetic_series(2_000);
    let scale =
        ScaleContext::from_prices(&series.closes(), ChartCanvas::default()).expect("valid scale");
    let painter = ChartRenderer::new(ChartStyle::default());

    c.bench_function("frame_to_svg_2k", |b| {
        b.iter(|| {
            let frame = painter.build_frame(black_box(&series), scale, true, None);
            let mut svg = SvgRenderer::new();
            svg.render(&frame).expect("render");
            black_box(svg.into_document());
        })
    });
}

criterion_group!(
    benches,
    bench_scale_context_10k,
    bench_hover_lookup,
    bench_frame_to_svg_2k
);
criterion_main!(benches);
